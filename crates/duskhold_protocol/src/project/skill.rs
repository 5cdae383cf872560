//! # Skill and Trainer Records

use duskhold_world::{Skill, TrainableSpec};

use super::clamp_name;
use crate::writer::{ByteOrder, PacketWriter};

/// Name cap for skill and trainer records.
pub const SKILL_NAME_CAP: usize = 55;

/// Appends one skill-table record: level, page, icon, name.
pub fn write_skill_record(w: &mut PacketWriter, skill: &Skill) {
    w.write_u8(skill.level);
    w.write_u8(skill.page.code());
    w.write_u16(skill.icon, ByteOrder::Network);
    w.write_short_str(&clamp_name(&skill.name, SKILL_NAME_CAP, "skill"));
}

/// Appends one trainer-window record: level, point cost, name.
pub fn write_trainable_record(w: &mut PacketWriter, spec: &TrainableSpec) {
    w.write_u8(spec.level);
    w.write_u16(spec.cost, ByteOrder::Network);
    w.write_short_str(&clamp_name(&spec.name, SKILL_NAME_CAP, "spec"));
}
