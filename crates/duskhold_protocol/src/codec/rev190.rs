//! # Revision 190
//!
//! Adds a subtype byte to the spell-effect visual and the health/status
//! pair to keep component records.

use duskhold_world::{Keep, ObjectId};

use super::{opcode, rev168, CodecOps, SessionCodec};
use crate::transport::TransportClass;
use crate::writer::{ByteOrder, PacketWriter};

/// Patches the table entries this revision changed.
pub(crate) fn apply(ops: &mut CodecOps) {
    ops.spell_effect = spell_effect;
    ops.keep_components = keep_components;
}

fn spell_effect(
    codec: &SessionCodec,
    caster: ObjectId,
    spell_id: u16,
    target: ObjectId,
    success: bool,
) {
    let mut w = PacketWriter::open(opcode::SPELL_EFFECT);
    w.write_u16(caster.0, ByteOrder::Network);
    w.write_u16(spell_id, ByteOrder::Network);
    w.write_u16(target.0, ByteOrder::Network);
    w.write_u16(codec.next_effect_seq(), ByteOrder::Network);
    // Subtype distinguishes cast visuals from pulse visuals client-side.
    w.write_u8(1);
    w.write_u8(u8::from(success));
    w.write_u8(0);
    codec.send(w.finish(TransportClass::Unreliable));
}

fn keep_components(codec: &SessionCodec, keep: &Keep) {
    rev168::keep_components_with(codec, keep, true);
}
