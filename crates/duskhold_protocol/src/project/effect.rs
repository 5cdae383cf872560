//! # Effect Records

use duskhold_world::SpellEffect;

use super::clamp_name;
use crate::writer::{ByteOrder, PacketWriter};

const FLAG_DEBUFF: u8 = 0x01;
const FLAG_IMMUNITY: u8 = 0x02;

/// Appends one effect-bar record: icon, remaining seconds, flags, name.
pub fn write_effect_record(w: &mut PacketWriter, effect: &SpellEffect) {
    w.write_u16(effect.icon, ByteOrder::Network);
    w.write_u16(effect.remaining_secs, ByteOrder::Network);
    let mut flags = 0u8;
    if effect.debuff {
        flags |= FLAG_DEBUFF;
    }
    if effect.immunity {
        flags |= FLAG_IMMUNITY;
    }
    w.write_u8(flags);
    w.write_short_str(&clamp_name(&effect.name, 47, "effect"));
}
