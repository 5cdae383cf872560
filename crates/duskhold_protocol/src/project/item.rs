//! # Item Records
//!
//! The item wire record and the type-dependent rules the historical
//! protocol buries in two generic value bytes, a pair of bit-packed flag
//! bytes, and the emblem/color precedence.

use duskhold_world::{Item, ItemKind};

use super::clamp_name;
use crate::writer::{ByteOrder, PacketWriter};

/// Bit 16 of the 17-bit emblem id: the "new guild emblem" marker, relocated
/// into a message flag byte by the messages that support it.
pub const EMBLEM_EXTENDED_BIT: u32 = 0x1_0000;

/// Flag-byte bit set when the extended emblem marker was relocated here.
const FLAG_EXTENDED_EMBLEM: u8 = 0x08;

/// What the two generic value bytes mean for one concrete item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotFields {
    /// First generic byte field.
    pub value1: u8,
    /// Second generic byte field.
    pub value2: u8,
}

/// Resolves the type-dependent value fields.
///
/// This is the closed switch on object type the wire contract demands:
/// every arm, including the default, mirrors the historical encoder.
#[must_use]
pub fn slot_fields(item: &Item) -> SlotFields {
    match &item.kind {
        ItemKind::Ammo { count } => SlotFields {
            value1: (*count).min(u16::from(u8::MAX)) as u8,
            value2: 0,
        },
        ItemKind::Weapon { dps, speed, .. } => SlotFields { value1: *dps, value2: *speed },
        ItemKind::Shield { size, damage_type } => {
            SlotFields { value1: *size, value2: *damage_type as u8 }
        }
        ItemKind::Instrument { kind } => SlotFields { value1: 0, value2: *kind },
        ItemKind::Furniture { width } => SlotFields { value1: *width, value2: 0 },
        ItemKind::Armor { factor, absorb } => SlotFields { value1: *factor, value2: *absorb },
        ItemKind::Generic => SlotFields::default(),
    }
}

/// Hand usage packed into the high 2 bits; low 6 bits are unused.
#[must_use]
pub fn hand_flag_byte(item: &Item) -> u8 {
    match &item.kind {
        ItemKind::Weapon { hand, .. } => (*hand as u8) << 6,
        _ => 0,
    }
}

/// Damage type in bits 6-7 combined with the object-type code in bits 0-5.
#[must_use]
pub fn type_damage_byte(item: &Item) -> u8 {
    let damage = match &item.kind {
        ItemKind::Weapon { damage_type, .. } | ItemKind::Shield { damage_type, .. } => {
            *damage_type as u8
        }
        _ => 0,
    };
    (damage << 6) | (item.kind.code() & 0x3F)
}

/// Displayed tint: the emblem's low 16 bits when an emblem is set, else the
/// plain dye color.
#[must_use]
pub fn effective_tint(item: &Item) -> u16 {
    if item.emblem != 0 {
        (item.emblem & 0xFFFF) as u16
    } else {
        item.color
    }
}

/// True when the emblem carries the extended (bit 16) marker.
#[must_use]
pub fn has_extended_emblem(item: &Item) -> bool {
    item.emblem & EMBLEM_EXTENDED_BIT != 0
}

/// Decorated display name: stack count and sale price are concatenated
/// *before* the byte cap is applied.
#[must_use]
pub fn display_name(item: &Item, cap: usize) -> String {
    let mut name = item.name.clone();
    if item.count > 1 {
        name.push_str(&format!(" ({})", item.count));
    }
    if item.sell_price > 0 {
        let gold = item.sell_price / 10_000;
        let silver = (item.sell_price % 10_000) / 100;
        let copper = item.sell_price % 100;
        name.push_str(&format!(" [{gold}g {silver}s {copper}c]"));
    }
    clamp_name(&name, cap, "item")
}

/// Per-message item wire shape. Revisions and messages pick one of the
/// named constants; the record layout itself never branches on a revision
/// number.
#[derive(Clone, Copy, Debug)]
pub struct ItemWire {
    /// Display name byte cap for this message.
    pub name_cap: usize,
    /// Whether this message relocates the emblem's bit 16 into the record
    /// flag byte (a per-message rule, not a per-entity one).
    pub emblem_flag: bool,
    /// Whether the record carries the durability/condition trailer pair.
    pub condition_trailer: bool,
    /// Whether the record carries the crafter/market trailer.
    pub crafter_trailer: bool,
}

impl ItemWire {
    /// Inventory messages, baseline revision.
    pub const INVENTORY_V168: Self =
        Self { name_cap: 47, emblem_flag: true, condition_trailer: false, crafter_trailer: false };
    /// Trade window, baseline revision: no emblem relocation in this message.
    pub const TRADE_V168: Self =
        Self { name_cap: 47, emblem_flag: false, condition_trailer: false, crafter_trailer: false };
    /// Inventory messages with the condition/durability trailer pair.
    pub const INVENTORY_V183: Self =
        Self { name_cap: 47, emblem_flag: true, condition_trailer: true, crafter_trailer: false };
    /// Trade window with the trailer pair.
    pub const TRADE_V183: Self =
        Self { name_cap: 47, emblem_flag: false, condition_trailer: true, crafter_trailer: false };
    /// Inventory messages with the crafter/market trailer and the longer
    /// name cap.
    pub const INVENTORY_V1105: Self =
        Self { name_cap: 55, emblem_flag: true, condition_trailer: true, crafter_trailer: true };
    /// Trade window with both trailers and the longer name cap.
    pub const TRADE_V1105: Self =
        Self { name_cap: 55, emblem_flag: false, condition_trailer: true, crafter_trailer: true };
}

/// Bytes in the fixed (pre-name) part of a record, trailers excluded.
const FIXED_LEN: usize = 19;

/// Appends one item record.
///
/// `item = None` writes a zero-filled placeholder of exactly the size a
/// present item with an empty name would occupy, keeping equipment and
/// inventory slots positionally addressable.
pub fn write_item_record(w: &mut PacketWriter, slot: u8, item: Option<&Item>, wire: &ItemWire) {
    let Some(item) = item else {
        w.write_u8(slot);
        w.fill(0, FIXED_LEN - 1);
        if wire.condition_trailer {
            w.fill(0, 2);
        }
        if wire.crafter_trailer {
            w.write_short_str("");
            w.fill(0, 2);
        }
        w.write_short_str("");
        return;
    };

    let fields = slot_fields(item);

    w.write_u8(slot);
    w.write_u8(item.level);
    w.write_u8(fields.value1);
    w.write_u8(fields.value2);
    w.write_u8(hand_flag_byte(item));
    w.write_u8(type_damage_byte(item));
    w.write_u16(item.weight, ByteOrder::Network);
    w.write_u8(item.condition);
    w.write_u8(item.durability);
    w.write_u8(item.quality);
    w.write_u8(item.bonus);
    // Model numbers ride the reversed order in this protocol family.
    w.write_u16(item.model, ByteOrder::LowEndian);
    w.write_u16(effective_tint(item), ByteOrder::Network);
    w.write_u16(item.effect, ByteOrder::Network);

    let mut flags = 0u8;
    if item.emblem != 0 {
        flags |= 0x01;
    }
    if wire.emblem_flag && has_extended_emblem(item) {
        flags |= FLAG_EXTENDED_EMBLEM;
    }
    w.write_u8(flags);

    if wire.condition_trailer {
        w.write_u8(item.durability);
        w.write_u8(item.condition);
    }
    if wire.crafter_trailer {
        w.write_short_str(&clamp_name(&item.crafter, wire.name_cap, "crafter"));
        w.write_u16((item.template & 0xFFFF) as u16, ByteOrder::Network);
    }

    w.write_short_str(&display_name(item, wire.name_cap));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportClass;
    use duskhold_world::{DamageType, HandUsage};

    fn encode(slot: u8, item: Option<&Item>, wire: &ItemWire) -> Vec<u8> {
        let mut w = PacketWriter::open(0x02);
        write_item_record(&mut w, slot, item, wire);
        w.finish(TransportClass::Reliable).payload
    }

    fn sample_weapon() -> Item {
        Item {
            template: 0x0001_2345,
            name: "Ashbrand".into(),
            kind: ItemKind::Weapon {
                dps: 165,
                speed: 37,
                damage_type: DamageType::Slash,
                hand: HandUsage::TwoHand,
            },
            slot: 10,
            level: 50,
            model: 0x01C2,
            color: 0,
            emblem: 0,
            effect: 0,
            quality: 99,
            condition: 100,
            durability: 98,
            bonus: 35,
            weight: 45,
            count: 0,
            sell_price: 0,
            crafter: String::new(),
        }
    }

    #[test]
    fn test_value_fields_per_kind() {
        let mut item = sample_weapon();
        assert_eq!(slot_fields(&item), SlotFields { value1: 165, value2: 37 });

        item.kind = ItemKind::Ammo { count: 500 };
        assert_eq!(slot_fields(&item), SlotFields { value1: 255, value2: 0 });

        item.kind = ItemKind::Shield { size: 3, damage_type: DamageType::Crush };
        assert_eq!(slot_fields(&item), SlotFields { value1: 3, value2: 1 });

        item.kind = ItemKind::Instrument { kind: 2 };
        assert_eq!(slot_fields(&item), SlotFields { value1: 0, value2: 2 });

        item.kind = ItemKind::Furniture { width: 4 };
        assert_eq!(slot_fields(&item), SlotFields { value1: 4, value2: 0 });

        item.kind = ItemKind::Armor { factor: 102, absorb: 27 };
        assert_eq!(slot_fields(&item), SlotFields { value1: 102, value2: 27 });

        item.kind = ItemKind::Generic;
        assert_eq!(slot_fields(&item), SlotFields::default());
    }

    #[test]
    fn test_bit_packed_flag_bytes() {
        let item = sample_weapon();
        // Two-hand = 1 in the high two bits.
        assert_eq!(hand_flag_byte(&item), 0b0100_0000);
        // Slash = 2 in bits 6-7, weapon kind code 2 in the low six.
        assert_eq!(type_damage_byte(&item), 0b1000_0010);
    }

    #[test]
    fn test_emblem_precedence_and_relocation() {
        let mut item = sample_weapon();
        item.color = 0x0042;
        assert_eq!(effective_tint(&item), 0x0042);

        item.emblem = 0x1_0005;
        assert_eq!(effective_tint(&item), 0x0005);
        assert!(has_extended_emblem(&item));

        let bytes = encode(10, Some(&item), &ItemWire::INVENTORY_V168);
        // Tint field carries the emblem's low 16 bits.
        assert_eq!(&bytes[14..16], &[0x00, 0x05]);
        // Flag byte carries both "has emblem" and the relocated bit 16.
        assert_eq!(bytes[18], 0x01 | 0x08);

        // The trade message does not relocate: flag bit stays clear.
        let trade = encode(10, Some(&item), &ItemWire::TRADE_V168);
        assert_eq!(trade[18], 0x01);
    }

    #[test]
    fn test_model_is_low_endian() {
        let item = sample_weapon();
        let bytes = encode(10, Some(&item), &ItemWire::INVENTORY_V168);
        assert_eq!(&bytes[12..14], &[0xC2, 0x01]);
    }

    #[test]
    fn test_placeholder_matches_present_size() {
        for wire in [
            ItemWire::INVENTORY_V168,
            ItemWire::TRADE_V168,
            ItemWire::INVENTORY_V183,
            ItemWire::TRADE_V183,
            ItemWire::INVENTORY_V1105,
        ] {
            let mut item = sample_weapon();
            item.name = String::new();
            let present = encode(3, Some(&item), &wire);
            let empty = encode(3, None, &wire);
            assert_eq!(present.len(), empty.len(), "wire {wire:?}");
            assert_eq!(empty[0], 3, "slot stays addressable");
            assert!(empty[1..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_name_decoration_before_truncation() {
        let mut item = sample_weapon();
        item.name = "n".repeat(45);
        item.count = 20;
        let name = display_name(&item, 47);
        // 45 bytes of name + " (20)" = 50, capped to 47.
        assert_eq!(name.len(), 47);
        assert!(name.starts_with(&"n".repeat(45)));
    }

    #[test]
    fn test_sixty_byte_name_caps_at_fifty_five() {
        let mut item = sample_weapon();
        item.name = "m".repeat(60);
        assert_eq!(display_name(&item, 55).len(), 55);
        let bytes = encode(0, Some(&item), &ItemWire::INVENTORY_V1105);
        // Short-string length prefix at the tail records exactly the cap.
        let name_len = bytes[bytes.len() - 56];
        assert_eq!(name_len, 55);
    }

    #[test]
    fn test_sell_price_in_display_name() {
        let mut item = sample_weapon();
        item.sell_price = 23_412;
        assert_eq!(display_name(&item, 55), "Ashbrand [2g 34s 12c]");
    }

    #[test]
    fn test_record_is_deterministic() {
        let item = sample_weapon();
        assert_eq!(
            encode(10, Some(&item), &ItemWire::INVENTORY_V183),
            encode(10, Some(&item), &ItemWire::INVENTORY_V183)
        );
    }
}
