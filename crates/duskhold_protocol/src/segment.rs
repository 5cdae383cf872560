//! # Packet Segmentation
//!
//! A logical message ("here are 140 inventory slots", "here are 600
//! trainable skills") rarely fits one packet. This module batches whole
//! elements under a per-message byte budget, patches the true element count
//! into each packet's header once it is known, and flags continuation with a
//! sentinel subtype when more packets follow.
//!
//! The budget is advisory for *batching*: a single element that alone
//! exceeds it still ships whole in its own packet. An element's bytes are
//! never split across packets; oversized *content* (arbitrary-length names)
//! is truncated upstream in projection before it ever reaches this decision.
//!
//! Budgets differ per message type for historical client-compatibility
//! reasons and are preserved as distinct named constants, never unified.

use tracing::trace;

use crate::transport::TransportClass;
use crate::writer::{Packet, PacketWriter};

/// Subtype sentinel meaning "more packets follow".
pub const CONTINUATION_SUBTYPE: u8 = 99;

/// Byte budget of trainer window pages.
pub const TRAINER_BUDGET: usize = 1000;
/// Byte budget of inventory window pages.
pub const INVENTORY_BUDGET: usize = 1400;
/// Byte budget of skill table pages.
pub const SKILL_TABLE_BUDGET: usize = 1500;
/// Byte budget of quest journal pages.
pub const QUEST_LIST_BUDGET: usize = 1000;
/// Byte budget of house interior pages.
pub const INTERIOR_BUDGET: usize = 1500;
/// Byte budget of keep component pages.
pub const KEEP_COMPONENT_BUDGET: usize = 2045;

/// Positions of the header fields a finished page patches in place.
#[derive(Clone, Copy, Debug)]
pub struct SegmentHeader {
    /// Position of the one-byte element count.
    pub count_pos: usize,
    /// Position of the one-byte subtype/terminator field.
    pub subtype_pos: usize,
}

/// Batches `items` into as few packets as the budget allows.
///
/// `write_header` opens each page: it writes the message header including
/// placeholder count and subtype bytes, receives the index of the first
/// element the page will carry, and reports where the placeholders sit.
/// `encode_item` appends one element.
///
/// Every element appears exactly once, in input order. Each page's count
/// field holds the number of elements actually placed; the subtype field
/// holds [`CONTINUATION_SUBTYPE`] on every page but the last, which gets
/// `terminal_subtype`. An empty input still emits one page with count 0 so
/// the client clears its window.
pub fn encode_batched<T>(
    opcode: u8,
    budget: usize,
    terminal_subtype: u8,
    items: &[T],
    write_header: impl Fn(&mut PacketWriter, usize) -> SegmentHeader,
    encode_item: impl Fn(&mut PacketWriter, &T),
) -> Vec<Packet> {
    let mut packets = Vec::new();
    let mut index = 0;

    loop {
        let mut w = PacketWriter::open(opcode);
        let header = write_header(&mut w, index);
        let mut count: u8 = 0;

        while index < items.len() {
            let mark = w.position();
            encode_item(&mut w, &items[index]);
            if w.len() > budget && count > 0 {
                // Overflowed and the page already holds elements: un-write
                // this one, it opens the next page.
                w.rewind_to(mark);
                break;
            }
            count += 1;
            index += 1;
            if count == u8::MAX {
                // Count field is one byte.
                break;
            }
        }

        let more = index < items.len();
        let end = w.len();
        w.seek(header.count_pos);
        w.write_u8(count);
        w.seek(header.subtype_pos);
        w.write_u8(if more { CONTINUATION_SUBTYPE } else { terminal_subtype });
        w.seek(end);

        trace!(opcode, count, more, bytes = end, "batched page");
        packets.push(w.finish(TransportClass::Reliable));

        if !more {
            break;
        }
    }

    packets
}
