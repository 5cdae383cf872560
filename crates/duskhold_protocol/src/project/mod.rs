//! # Entity Projection
//!
//! Pure functions mapping long-lived domain entities to their ephemeral
//! wire records. Nothing here touches the transport; encoders only append
//! to a [`crate::writer::PacketWriter`].
//!
//! Display names are decorated (stack counts, sale prices) *before* they are
//! capped, and capping happens here, upstream of segmentation, so an
//! attacker-controlled name can never inflate an element past the packet
//! budget.

mod effect;
mod item;
mod skill;

pub use effect::write_effect_record;
pub use item::{
    display_name, effective_tint, hand_flag_byte, has_extended_emblem, slot_fields,
    type_damage_byte, write_item_record, ItemWire, SlotFields, EMBLEM_EXTENDED_BIT,
};
pub use skill::{write_skill_record, write_trainable_record, SKILL_NAME_CAP};

use tracing::warn;

/// Caps a display string at `cap` bytes.
///
/// Non-ASCII characters are replaced first so the cap can never land inside
/// a multi-byte sequence; truncation is logged, never fatal.
#[must_use]
pub fn clamp_name(s: &str, cap: usize, field: &'static str) -> String {
    let ascii: String =
        s.chars().map(|c| if c.is_ascii() { c } else { '?' }).collect();
    if ascii.len() > cap {
        warn!(name = %s, cap, field, "display string truncated");
        ascii[..cap].to_string()
    } else {
        ascii
    }
}
