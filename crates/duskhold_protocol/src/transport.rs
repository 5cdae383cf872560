//! # Transport Seam
//!
//! The codec hands finished packets to a [`Transport`] and forgets about
//! them; delivery, framing and retransmission live outside this layer.
//! Structural state (object lifecycle, inventory) goes over the reliable
//! ordered channel, frequent loss-tolerant updates (positions, health
//! ticks) over the unreliable one.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::writer::Packet;

/// Which delivery channel a packet rides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportClass {
    /// Ordered, retransmitted. Structural state.
    Reliable,
    /// Fire-and-forget datagrams. Continuous updates.
    Unreliable,
}

/// Packet sink the codecs write into.
pub trait Transport: Send + Sync {
    /// Queues a packet on the reliable ordered channel.
    fn send_reliable(&self, packet: Packet);

    /// Queues a packet on the unreliable channel.
    fn send_unreliable(&self, packet: Packet);
}

/// Channel-backed transport.
///
/// Production wires the receivers into the socket layer; tests keep them and
/// assert on what the codec emitted.
pub struct ChannelTransport {
    reliable_tx: Sender<Packet>,
    unreliable_tx: Sender<Packet>,
}

impl ChannelTransport {
    /// Creates the transport plus the receivers for both channels.
    #[must_use]
    pub fn new() -> (Self, Receiver<Packet>, Receiver<Packet>) {
        let (reliable_tx, reliable_rx) = unbounded();
        let (unreliable_tx, unreliable_rx) = unbounded();
        (Self { reliable_tx, unreliable_tx }, reliable_rx, unreliable_rx)
    }
}

impl Transport for ChannelTransport {
    fn send_reliable(&self, packet: Packet) {
        // Fire-and-forget: a closed receiver means the session is gone and
        // the packet is moot.
        let _ = self.reliable_tx.send(packet);
    }

    fn send_unreliable(&self, packet: Packet) {
        let _ = self.unreliable_tx.send(packet);
    }
}

/// Transport that drops everything. Benchmarks and codec-construction tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn send_reliable(&self, _packet: Packet) {}

    fn send_unreliable(&self, _packet: Packet) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::PacketWriter;

    #[test]
    fn test_channel_transport_routes_by_class() {
        let (transport, reliable_rx, unreliable_rx) = ChannelTransport::new();

        let mut w = PacketWriter::open(0x01);
        w.write_u8(1);
        transport.send_reliable(w.finish(TransportClass::Reliable));

        let mut w = PacketWriter::open(0x02);
        w.write_u8(2);
        transport.send_unreliable(w.finish(TransportClass::Unreliable));

        assert_eq!(reliable_rx.recv().unwrap().opcode, 0x01);
        assert_eq!(unreliable_rx.recv().unwrap().opcode, 0x02);
        assert!(reliable_rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_transport_survives_dropped_receiver() {
        let (transport, reliable_rx, _unreliable_rx) = ChannelTransport::new();
        drop(reliable_rx);

        let mut w = PacketWriter::open(0x01);
        w.write_u8(1);
        // Must not panic.
        transport.send_reliable(w.finish(TransportClass::Reliable));
    }
}
