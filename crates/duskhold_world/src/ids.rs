//! # Identifiers
//!
//! Newtype ids for everything the protocol layer addresses on the wire.
//!
//! Object ids are session-local u16 handles handed out by the region; they
//! are what the client uses to refer back to an entity, so they appear in
//! nearly every outbound message.

use thiserror::Error;

/// Unique identifier for a world entity within its region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u16);

impl ObjectId {
    /// Invalid/null object ID.
    pub const NULL: Self = Self(0);

    /// Returns true if this is the null ID.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Identifier of a world region (zone cluster).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u16);

/// Per-connection session identifier, echoed back by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SessionId(pub u16);

/// Identifier of a player house lot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HouseId(pub u16);

/// Identifier of a siege keep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeepId(pub u16);

/// The three playable realms, plus the unset value.
///
/// `None` is what freshly spawned or realm-less entities carry; passing it
/// to a realm-scoped operation is a caller bug, not a runtime condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Realm {
    /// No realm assigned.
    #[default]
    None = 0,
    /// The realm of Dawn.
    Dawn = 1,
    /// The realm of Dusk.
    Dusk = 2,
    /// The realm of Night.
    Night = 3,
}

impl Realm {
    /// Wire code for this realm.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// A realm code that does not name a realm.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid realm code: {0}")]
pub struct InvalidRealm(pub u8);

impl TryFrom<u8> for Realm {
    type Error = InvalidRealm;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Dawn),
            2 => Ok(Self::Dusk),
            3 => Ok(Self::Night),
            other => Err(InvalidRealm(other)),
        }
    }
}
