//! # Revision 1105
//!
//! The newest shipped revision: NPC models flip to the reversed byte order
//! with a trailing extension byte, and item records gain the crafter
//! trailer plus the longer 55-byte name cap.

use tracing::debug;

use duskhold_world::{Item, NpcState, TradeWindow};

use super::{opcode, rev168, CodecOps, SessionCodec};
use crate::project::ItemWire;
use crate::transport::TransportClass;
use crate::writer::{ByteOrder, PacketWriter};

/// Patches the table entries this revision changed.
pub(crate) fn apply(ops: &mut CodecOps) {
    ops.npc_create = npc_create;
    ops.inventory_window = inventory_window;
    ops.inventory_update = inventory_update;
    ops.trade_window = trade_window;
}

fn npc_create(codec: &SessionCodec, npc: &NpcState, tick: u64) {
    if !codec.cache.try_announce(npc.pos.region, npc.id, tick) {
        debug!(id = npc.id.0, "npc already announced, suppressed");
        return;
    }

    let mut w = PacketWriter::open(opcode::NPC_CREATE);
    rev168::npc_create_body(&mut w, npc, ByteOrder::LowEndian, true);
    codec.send(w.finish(TransportClass::Reliable));
}

fn inventory_window(codec: &SessionCodec, items: &[Item]) {
    rev168::inventory_window_with(codec, items, &ItemWire::INVENTORY_V1105);
}

fn inventory_update(codec: &SessionCodec, items: &[Item]) {
    rev168::inventory_update_with(codec, items, &ItemWire::INVENTORY_V1105);
}

fn trade_window(codec: &SessionCodec, window: &TradeWindow) {
    rev168::trade_window_with(codec, window, &ItemWire::TRADE_V1105);
}
