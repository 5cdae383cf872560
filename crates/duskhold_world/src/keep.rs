//! # Siege Keeps
//!
//! Keeps and their wall/tower components. Components are positioned on a
//! coarse grid relative to the keep origin, which is why their coordinates
//! are single signed bytes.

use crate::ids::{KeepId, Realm};

/// One wall segment, gate or tower of a keep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeepComponent {
    /// Component id within the keep.
    pub id: u16,
    /// Skin (wall, gate, tower ...).
    pub skin: u8,
    /// Grid X relative to the keep origin.
    pub x: i8,
    /// Grid Y relative to the keep origin.
    pub y: i8,
    /// Facing, 0..=3 quarter turns.
    pub heading: u8,
    /// Height in levels.
    pub height: u8,
    /// Health percentage.
    pub health_percent: u8,
    /// Status bits (raized, under attack ...).
    pub status: u8,
}

/// A claimable siege keep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keep {
    /// Keep id.
    pub id: KeepId,
    /// Display name.
    pub name: String,
    /// Owning realm.
    pub realm: Realm,
    /// Upgrade level.
    pub level: u8,
    /// World X of the keep origin.
    pub x: u32,
    /// World Y of the keep origin.
    pub y: u32,
    /// Heading of the keep origin.
    pub heading: u16,
    /// Guild emblem of the claiming guild, 0 when unclaimed.
    pub emblem: u32,
    /// Wall and tower components.
    pub components: Vec<KeepComponent>,
}
