//! # Items
//!
//! Inventory items and the type-dependent data the wire format reuses two
//! generic byte fields for. The historical protocol carries "value1" and
//! "value2" whose meaning depends on the item's object type; here that is a
//! tagged union so the wrong field can never be read for the wrong kind.

/// Melee damage type carried by weapons and shields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DamageType {
    /// No damage type (non-weapons).
    #[default]
    None = 0,
    /// Crushing damage.
    Crush = 1,
    /// Slashing damage.
    Slash = 2,
    /// Thrusting damage.
    Thrust = 3,
}

/// How a weapon occupies the hands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum HandUsage {
    /// Main-hand (or either hand).
    #[default]
    OneHand = 0,
    /// Both hands.
    TwoHand = 1,
    /// Off-hand only.
    LeftHand = 2,
}

/// Type-dependent item payload.
///
/// Each variant carries exactly the data the wire's generic value fields
/// mean for that object type. The mapping to wire bytes lives in the
/// protocol crate; this enum only makes the semantics explicit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemKind {
    /// Plain loot, keys, quest items. Both value fields read as zero.
    #[default]
    Generic,
    /// Arrows and bolts; value1 is the remaining count.
    Ammo {
        /// Remaining projectiles in the stack slot.
        count: u16,
    },
    /// Melee or ranged weapon.
    Weapon {
        /// Damage per second, pre-scaled to wire units.
        dps: u8,
        /// Swing speed in tenths of a second.
        speed: u8,
        /// Damage type dealt.
        damage_type: DamageType,
        /// Hand usage.
        hand: HandUsage,
    },
    /// Shield; value1 is the size class, value2 the damage type it deals.
    Shield {
        /// Size class (1 = small, 2 = medium, 3 = large).
        size: u8,
        /// Damage type for shield strikes.
        damage_type: DamageType,
    },
    /// Musical instrument; value2 is the instrument kind.
    Instrument {
        /// Instrument kind code (drum, flute, lute ...).
        kind: u8,
    },
    /// House decoration; value1 is the display width class.
    Furniture {
        /// Width class used by the interior placement grid.
        width: u8,
    },
    /// Worn armor.
    Armor {
        /// Armor factor.
        factor: u8,
        /// Absorb percentage.
        absorb: u8,
    },
}

impl ItemKind {
    /// Closed object-type code, 0..=63, packed into the low 6 bits of the
    /// type/damage wire byte.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Generic => 0,
            Self::Ammo { .. } => 1,
            Self::Weapon { .. } => 2,
            Self::Shield { .. } => 3,
            Self::Instrument { .. } => 4,
            Self::Furniture { .. } => 5,
            Self::Armor { .. } => 6,
        }
    }
}

/// An inventory item as the simulation owns it.
///
/// Everything here is long-lived state; the protocol layer projects it into
/// ephemeral per-revision records on every send.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    /// Template id.
    pub template: u32,
    /// Display name before decoration/truncation.
    pub name: String,
    /// Type-dependent payload.
    pub kind: ItemKind,
    /// Inventory slot this item occupies.
    pub slot: u8,
    /// Item level.
    pub level: u8,
    /// Client model number.
    pub model: u16,
    /// Plain dye color.
    pub color: u16,
    /// Guild emblem id; 17 bits, zero when none. Bit 16 is the "new guild
    /// emblem" marker some messages relocate into a flag byte.
    pub emblem: u32,
    /// Proc/charge effect id.
    pub effect: u16,
    /// Quality percentage.
    pub quality: u8,
    /// Condition percentage.
    pub condition: u8,
    /// Durability percentage.
    pub durability: u8,
    /// Magical bonus percentage.
    pub bonus: u8,
    /// Weight in tenths of pounds.
    pub weight: u16,
    /// Stack count; 0 and 1 both mean a single item.
    pub count: u16,
    /// Sale price in copper when listed by a merchant, else 0.
    pub sell_price: u32,
    /// Name of the crafter, empty when drop loot.
    pub crafter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_fit_six_bits() {
        let kinds = [
            ItemKind::Generic,
            ItemKind::Ammo { count: 10 },
            ItemKind::Weapon {
                dps: 165,
                speed: 37,
                damage_type: DamageType::Slash,
                hand: HandUsage::TwoHand,
            },
            ItemKind::Shield { size: 2, damage_type: DamageType::Crush },
            ItemKind::Instrument { kind: 1 },
            ItemKind::Furniture { width: 3 },
            ItemKind::Armor { factor: 102, absorb: 27 },
        ];
        for kind in &kinds {
            assert!(kind.code() <= 0x3F);
        }
    }
}
