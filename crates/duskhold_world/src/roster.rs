//! # Simulation-Owned Collections
//!
//! Collections many threads mutate while a codec might be mid-encode: group
//! rosters, trade windows, concentration lists. Each one hides its contents
//! behind a lock and hands the protocol layer a snapshot, so every packet
//! sees a self-consistent view and never a collection mutated mid-encode.

use parking_lot::RwLock;

use crate::effect::SpellEffect;
use crate::ids::ObjectId;
use crate::item::Item;

/// One member line of the group window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupMember {
    /// Member's region-local object id.
    pub id: ObjectId,
    /// Character name.
    pub name: String,
    /// Level.
    pub level: u8,
    /// Health percentage.
    pub health_percent: u8,
    /// Power percentage.
    pub power_percent: u8,
    /// Endurance percentage.
    pub endurance_percent: u8,
    /// False once the member died.
    pub alive: bool,
}

/// The group roster, shared between simulation threads.
#[derive(Debug, Default)]
pub struct GroupRoster {
    members: RwLock<Vec<GroupMember>>,
}

impl GroupRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member.
    pub fn join(&self, member: GroupMember) {
        self.members.write().push(member);
    }

    /// Removes a member by object id.
    pub fn leave(&self, id: ObjectId) {
        self.members.write().retain(|m| m.id != id);
    }

    /// Replaces a member's line in place, if present.
    pub fn update(&self, member: GroupMember) {
        let mut members = self.members.write();
        if let Some(slot) = members.iter_mut().find(|m| m.id == member.id) {
            *slot = member;
        }
    }

    /// Copies the roster under the lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<GroupMember> {
        self.members.read().clone()
    }
}

/// Contents of one side of a trade window.
///
/// The slot vector always holds [`TradeState::SLOT_COUNT`] entries so the
/// window stays positionally addressable; empty slots are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeState {
    /// Name of the trade partner.
    pub partner: String,
    /// Offered items by window slot.
    pub slots: Vec<Option<Item>>,
    /// Offered money in copper.
    pub copper: u32,
    /// True once this side accepted.
    pub accepted: bool,
}

impl TradeState {
    /// Number of item slots in a trade window.
    pub const SLOT_COUNT: usize = 10;
}

impl Default for TradeState {
    fn default() -> Self {
        Self {
            partner: String::new(),
            slots: vec![None; Self::SLOT_COUNT],
            copper: 0,
            accepted: false,
        }
    }
}

/// A trade window shared between the two participating sessions' threads.
#[derive(Debug, Default)]
pub struct TradeWindow {
    state: RwLock<TradeState>,
}

impl TradeWindow {
    /// Creates an empty trade window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places an item in a window slot. Out-of-range slots are ignored.
    pub fn offer(&self, slot: usize, item: Item) {
        let mut state = self.state.write();
        if let Some(entry) = state.slots.get_mut(slot) {
            *entry = Some(item);
        }
    }

    /// Sets the offered money.
    pub fn offer_copper(&self, copper: u32) {
        self.state.write().copper = copper;
    }

    /// Marks this side as accepted.
    pub fn accept(&self) {
        self.state.write().accepted = true;
    }

    /// Copies the whole window under the lock.
    #[must_use]
    pub fn snapshot(&self) -> TradeState {
        self.state.read().clone()
    }
}

/// Effects currently drawing from a caster's concentration pool.
#[derive(Debug, Default)]
pub struct ConcentrationList {
    effects: RwLock<Vec<SpellEffect>>,
}

impl ConcentrationList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect.
    pub fn add(&self, effect: SpellEffect) {
        self.effects.write().push(effect);
    }

    /// Removes every effect matching the icon.
    pub fn remove(&self, icon: u16) {
        self.effects.write().retain(|e| e.icon != icon);
    }

    /// Copies the list under the lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SpellEffect> {
        self.effects.read().clone()
    }
}
