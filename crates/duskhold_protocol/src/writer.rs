//! # Binary Packet Writer
//!
//! Growable byte buffer with an opcode header, typed primitive writers in
//! both byte orders the protocol mixes, fixed and length-prefixed string
//! fields, and absolute-position seeking for patch-back writes (count fields
//! whose value is only known after the variable part is written).
//!
//! The writer never enforces the payload budget itself; keeping packets
//! under budget is the segmentation layer's job, and blowing past
//! [`MAX_PAYLOAD`] is a caller bug.

use crate::error::ProtocolError;
use crate::transport::TransportClass;

/// Maximum payload size of this protocol family, excluding the opcode byte.
pub const MAX_PAYLOAD: usize = 2048;

/// Byte order of an integer field.
///
/// The protocol mixes network order with a reversed "low-endian" order for
/// specific fields (session ids, model numbers). The writer never infers the
/// order; every call site states which one its field needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Big-endian network order. Most fields.
    Network,
    /// Reversed low-endian order.
    LowEndian,
}

/// A finished outbound packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    /// Message opcode.
    pub opcode: u8,
    /// Payload bytes, opcode excluded.
    pub payload: Vec<u8>,
    /// Which transport channel carries it.
    pub class: TransportClass,
}

impl Packet {
    /// Payload length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true if the payload is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Full wire image: opcode byte followed by the payload.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.payload.len());
        bytes.push(self.opcode);
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// Packet writer over a growable buffer.
///
/// Writes happen at the cursor; writing inside already-written territory
/// overwrites in place, which is how count fields get patched after the
/// fact.
#[derive(Debug)]
pub struct PacketWriter {
    opcode: u8,
    buf: Vec<u8>,
    pos: usize,
}

impl PacketWriter {
    /// Opens a writer for the given opcode.
    #[must_use]
    pub fn open(opcode: u8) -> Self {
        Self { opcode, buf: Vec::with_capacity(128), pos: 0 }
    }

    /// Opcode this packet was opened with.
    #[inline]
    #[must_use]
    pub const fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Bytes written so far (high-water mark, independent of the cursor).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current cursor position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to an absolute position within the written range.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies past the end of the written payload; seeking
    /// into unwritten territory is a caller bug.
    pub fn seek(&mut self, pos: usize) {
        assert!(pos <= self.buf.len(), "seek past end of payload: {pos} > {}", self.buf.len());
        self.pos = pos;
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    /// Writes one byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    /// Writes a u16 in the stated byte order.
    #[inline]
    pub fn write_u16(&mut self, value: u16, order: ByteOrder) {
        match order {
            ByteOrder::Network => self.put(&value.to_be_bytes()),
            ByteOrder::LowEndian => self.put(&value.to_le_bytes()),
        }
    }

    /// Writes a u32 in the stated byte order.
    #[inline]
    pub fn write_u32(&mut self, value: u32, order: ByteOrder) {
        match order {
            ByteOrder::Network => self.put(&value.to_be_bytes()),
            ByteOrder::LowEndian => self.put(&value.to_le_bytes()),
        }
    }

    /// Writes a u64 in the stated byte order.
    #[inline]
    pub fn write_u64(&mut self, value: u64, order: ByteOrder) {
        match order {
            ByteOrder::Network => self.put(&value.to_be_bytes()),
            ByteOrder::LowEndian => self.put(&value.to_le_bytes()),
        }
    }

    /// Writes exactly `width` bytes: the string's bytes left-justified,
    /// zero-padded, silently truncated when longer.
    pub fn write_fixed_str(&mut self, s: &str, width: usize) {
        let bytes = s.as_bytes();
        let n = bytes.len().min(width);
        self.put(&bytes[..n]);
        if n < width {
            self.fill(0, width - n);
        }
    }

    /// Writes a one-byte length (0..=255, truncating longer strings)
    /// followed by the raw bytes. No terminator.
    pub fn write_short_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let n = bytes.len().min(u8::MAX as usize);
        self.put(&[n as u8]);
        self.put(&bytes[..n]);
    }

    /// Writes `count` copies of `byte`.
    pub fn fill(&mut self, byte: u8, count: usize) {
        let end = self.pos + count;
        if end > self.buf.len() {
            self.buf.resize(end, byte);
            // The resize filled the tail; only the already-written overlap
            // still needs stamping.
        }
        for b in &mut self.buf[self.pos..end] {
            *b = byte;
        }
        self.pos = end;
    }

    /// Discards everything written at or after `pos` and parks the cursor
    /// there. Used by segmentation to un-write an element that overflowed
    /// the budget.
    pub(crate) fn rewind_to(&mut self, pos: usize) {
        self.buf.truncate(pos);
        self.pos = pos;
    }

    /// Finalizes into a [`Packet`] on the given transport class.
    ///
    /// Payload size is the segmentation layer's contract; this only spots
    /// the latent-defect case in debug builds.
    #[must_use]
    pub fn finish(self, class: TransportClass) -> Packet {
        debug_assert!(
            self.buf.len() <= MAX_PAYLOAD,
            "payload overflow on opcode {:#04x}: {} bytes",
            self.opcode,
            self.buf.len()
        );
        Packet { opcode: self.opcode, payload: self.buf, class }
    }

    /// Finalizes like [`Self::finish`], surfacing the overflow case as an
    /// error instead of a debug assertion.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::PayloadOverflow`] when the payload exceeds
    /// [`MAX_PAYLOAD`].
    pub fn finish_checked(self, class: TransportClass) -> Result<Packet, ProtocolError> {
        if self.buf.len() > MAX_PAYLOAD {
            return Err(ProtocolError::PayloadOverflow {
                opcode: self.opcode,
                len: self.buf.len(),
            });
        }
        Ok(Packet { opcode: self.opcode, payload: self.buf, class })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_byte_order() {
        let mut w = PacketWriter::open(0x10);
        w.write_u16(0x1234, ByteOrder::Network);
        w.write_u16(0x1234, ByteOrder::LowEndian);
        w.write_u32(0xAABB_CCDD, ByteOrder::Network);
        w.write_u32(0xAABB_CCDD, ByteOrder::LowEndian);
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(
            p.payload,
            vec![0x12, 0x34, 0x34, 0x12, 0xAA, 0xBB, 0xCC, 0xDD, 0xDD, 0xCC, 0xBB, 0xAA]
        );
    }

    #[test]
    fn test_u64_orders() {
        let mut w = PacketWriter::open(0);
        w.write_u64(0x0102_0304_0506_0708, ByteOrder::Network);
        w.write_u64(0x0102_0304_0506_0708, ByteOrder::LowEndian);
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(&p.payload[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&p.payload[8..], &[8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_fixed_str_pads_and_truncates() {
        let mut w = PacketWriter::open(0);
        w.write_fixed_str("ab", 4);
        w.write_fixed_str("longname", 4);
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(p.payload, b"ab\0\0long");
    }

    #[test]
    fn test_short_str_length_prefix() {
        let mut w = PacketWriter::open(0);
        w.write_short_str("dusk");
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(p.payload, vec![4, b'd', b'u', b's', b'k']);
    }

    #[test]
    fn test_short_str_caps_at_255() {
        let long = "x".repeat(300);
        let mut w = PacketWriter::open(0);
        w.write_short_str(&long);
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(p.payload.len(), 256);
        assert_eq!(p.payload[0], 255);
    }

    #[test]
    fn test_seek_patches_in_place() {
        let mut w = PacketWriter::open(0);
        w.write_u8(0); // count placeholder
        w.write_u16(0xBEEF, ByteOrder::Network);
        let end = w.position();
        w.seek(0);
        w.write_u8(42);
        w.seek(end);
        w.write_u8(7);
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(p.payload, vec![42, 0xBE, 0xEF, 7]);
    }

    #[test]
    #[should_panic(expected = "seek past end")]
    fn test_seek_past_end_panics() {
        let mut w = PacketWriter::open(0);
        w.write_u8(1);
        w.seek(5);
    }

    #[test]
    fn test_fill() {
        let mut w = PacketWriter::open(0);
        w.fill(0xFF, 3);
        w.write_u8(1);
        w.seek(0);
        w.fill(0xAA, 2);
        let p = w.finish(TransportClass::Reliable);
        assert_eq!(p.payload, vec![0xAA, 0xAA, 0xFF, 1]);
    }

    #[test]
    fn test_finish_checked_overflow() {
        let mut w = PacketWriter::open(0x77);
        w.fill(0, MAX_PAYLOAD + 1);
        let err = w.finish_checked(TransportClass::Reliable).unwrap_err();
        assert_eq!(err, ProtocolError::PayloadOverflow { opcode: 0x77, len: MAX_PAYLOAD + 1 });
    }

    #[test]
    fn test_to_bytes_prepends_opcode() {
        let mut w = PacketWriter::open(0x2A);
        w.write_u8(9);
        let p = w.finish(TransportClass::Unreliable);
        assert_eq!(p.to_bytes(), vec![0x2A, 9]);
    }

    #[test]
    fn test_determinism() {
        let build = || {
            let mut w = PacketWriter::open(1);
            w.write_u32(77, ByteOrder::Network);
            w.write_short_str("stable");
            w.finish(TransportClass::Reliable)
        };
        assert_eq!(build(), build());
    }
}
