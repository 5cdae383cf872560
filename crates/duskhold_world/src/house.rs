//! # Player Housing

use crate::actor::WorldPos;
use crate::ids::HouseId;

/// An item placed inside a house.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteriorItem {
    /// Client model number.
    pub model: u16,
    /// Dye color.
    pub color: u16,
    /// X offset inside the house.
    pub x: i16,
    /// Y offset inside the house.
    pub y: i16,
    /// Rotation, 0..4096.
    pub rotation: u16,
    /// Size percentage.
    pub size: u8,
    /// Placement surface (floor, wall hook ...).
    pub surface: u8,
}

/// A player house on its lot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct House {
    /// House id.
    pub id: HouseId,
    /// Lot number within the housing zone.
    pub lot: u16,
    /// Position of the lot.
    pub pos: WorldPos,
    /// Exterior model.
    pub model: u8,
    /// Guild emblem on the banner, 0 when none.
    pub emblem: u32,
    /// Roof material.
    pub roof_material: u8,
    /// Wall material.
    pub wall_material: u8,
    /// Door material.
    pub door_material: u8,
    /// House name on the sign.
    pub name: String,
    /// Owner character name.
    pub owner: String,
    /// Items placed inside.
    pub interior: Vec<InteriorItem>,
}
