//! # Actor Snapshots
//!
//! What the simulation hands the protocol layer when an entity must be
//! announced or updated: players, NPCs and static world objects, each with
//! the position block the client expects.

use crate::ids::{ObjectId, Realm, RegionId, SessionId};

/// World position plus facing, in region-local coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldPos {
    /// Region the coordinates are local to.
    pub region: RegionId,
    /// X coordinate.
    pub x: u32,
    /// Y coordinate.
    pub y: u32,
    /// Z coordinate.
    pub z: u16,
    /// Heading, 0..4096 for a full turn.
    pub heading: u16,
}

/// Per-resist-line values shown in the client's resist bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resists {
    /// Crush resist percent.
    pub crush: i8,
    /// Slash resist percent.
    pub slash: i8,
    /// Thrust resist percent.
    pub thrust: i8,
    /// Heat resist percent.
    pub heat: i8,
    /// Cold resist percent.
    pub cold: i8,
    /// Matter resist percent.
    pub matter: i8,
    /// Body resist percent.
    pub body: i8,
    /// Spirit resist percent.
    pub spirit: i8,
    /// Energy resist percent.
    pub energy: i8,
}

/// A static or semi-static world object (chest, banner, siege part ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldObject {
    /// Region-local object id.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Client model number.
    pub model: u16,
    /// Guild emblem when the object carries one (banners), else 0.
    pub emblem: u32,
    /// Position and facing.
    pub pos: WorldPos,
    /// Object flag bits (targetable, underwater ...).
    pub flags: u8,
}

/// An NPC as seen by one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NpcState {
    /// Region-local object id.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Guild name shown under the NPC, may be empty.
    pub guild_name: String,
    /// Client model number.
    pub model: u16,
    /// Size percentage, 100 = normal.
    pub size: u8,
    /// Level.
    pub level: u8,
    /// Realm allegiance.
    pub realm: Realm,
    /// Position and facing.
    pub pos: WorldPos,
    /// Current movement speed in wire units, 0 when standing.
    pub speed: u16,
    /// NPC flag bits (dead, stealthed, flying ...).
    pub flags: u8,
}

/// A player character as seen by one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Session of the viewing or owning connection.
    pub session: SessionId,
    /// Region-local object id.
    pub id: ObjectId,
    /// Character name.
    pub name: String,
    /// Guild name, may be empty.
    pub guild_name: String,
    /// Client model number.
    pub model: u16,
    /// Level.
    pub level: u8,
    /// Realm.
    pub realm: Realm,
    /// Position and facing.
    pub pos: WorldPos,
    /// Health percentage 0..=100.
    pub health_percent: u8,
    /// Power percentage 0..=100.
    pub power_percent: u8,
    /// Endurance percentage 0..=100.
    pub endurance_percent: u8,
    /// Concentration percentage 0..=100.
    pub concentration_percent: u8,
    /// Resist lines.
    pub resists: Resists,
}
