//! # Per-Revision Codecs
//!
//! One codec per protocol revision, all exposing the same outbound
//! operation contract. The historical implementations stacked dozens of
//! concrete subclasses, each overriding a handful of messages; here the
//! same "most specific override wins" semantics come from a flat table of
//! function pointers: [`rev168`] supplies the complete baseline, every
//! later revision module patches only the entries whose wire layout
//! changed, and building a codec folds the patches oldest to newest up to
//! the session's revision.
//!
//! Codecs hold no protocol state machine. A session is bound to one codec
//! when its revision is known after the handshake, then the codec is a
//! stable strategy invoked for the lifetime of the connection.

pub(crate) mod rev1105;
pub(crate) mod rev168;
pub(crate) mod rev174;
pub(crate) mod rev183;
pub(crate) mod rev190;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use duskhold_world::{
    ConcentrationList, GroupMember, GroupRoster, GuildInfo, House, Item, Keep, NpcState,
    ObjectId, PlayerState, QuestEntry, Realm, RegionId, SessionId, Skill, TradeWindow,
    TrainableSpec, WorldObject,
};

use crate::cache::UpdateCache;
use crate::error::ProtocolError;
use crate::transport::{Transport, TransportClass};
use crate::writer::Packet;

/// Server name written into the login-granted packet.
pub const SERVER_NAME: &str = "Duskhold";

/// A client-declared protocol revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolRevision(pub u32);

impl ProtocolRevision {
    /// Baseline revision.
    pub const R168: Self = Self(168);
    /// Adds resist bars, housing, the login expansion byte.
    pub const R174: Self = Self(174);
    /// Adds item condition trailers and quest level bytes.
    pub const R183: Self = Self(183);
    /// Adds the spell-effect subtype and extended keep components.
    pub const R190: Self = Self(190);
    /// Adds low-endian NPC models and item crafter trailers.
    pub const R1105: Self = Self(1105);
}

impl std::fmt::Display for ProtocolRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rev{}", self.0)
    }
}

/// Opcode table. Values are stable across the shipped revisions; layout
/// differences live in the per-revision operation overrides.
pub(crate) mod opcode {
    pub const LOGIN_GRANTED: u8 = 0x2A;
    pub const LOGIN_DENIED: u8 = 0x2C;
    pub const SESSION_ID: u8 = 0x28;
    pub const REALM: u8 = 0xFE;
    pub const GAME_OPEN: u8 = 0x29;
    pub const TIME: u8 = 0xB1;
    pub const OBJECT_CREATE: u8 = 0xD9;
    pub const NPC_CREATE: u8 = 0xDA;
    pub const PLAYER_CREATE: u8 = 0x4B;
    pub const OBJECT_UPDATE: u8 = 0xA1;
    pub const OBJECT_REMOVE: u8 = 0xAA;
    pub const OBJECT_DELETE: u8 = 0xAB;
    pub const MODEL_CHANGE: u8 = 0x1D;
    pub const EMBLEM: u8 = 0xDE;
    pub const COMBAT_ANIMATION: u8 = 0xB2;
    pub const SPELL_EFFECT: u8 = 0xB3;
    pub const STATUS_UPDATE: u8 = 0xAD;
    pub const HEALTH_PERCENT: u8 = 0xEF;
    pub const REGEN_RATES: u8 = 0xEC;
    pub const CONCENTRATION_LIST: u8 = 0x75;
    pub const INVENTORY_WINDOW: u8 = 0x02;
    pub const INVENTORY_UPDATE: u8 = 0x03;
    pub const TRADE_WINDOW: u8 = 0xEA;
    pub const ENCUMBRANCE: u8 = 0xBD;
    pub const GROUP_WINDOW: u8 = 0x06;
    pub const GROUP_MEMBER_UPDATE: u8 = 0x07;
    pub const GUILD_INFO: u8 = 0x7F;
    pub const QUEST_ENTRY: u8 = 0x8B;
    pub const QUEST_LIST: u8 = 0x8C;
    pub const SKILL_TABLE: u8 = 0x7E;
    pub const TRAINER_WINDOW: u8 = 0x7C;
    pub const HOUSE_CREATE: u8 = 0xC0;
    pub const HOUSE_ENTER: u8 = 0xC1;
    pub const HOUSE_INTERIOR: u8 = 0xC8;
    pub const KEEP_INFO: u8 = 0x69;
    pub const KEEP_COMPONENT: u8 = 0x6A;
    pub const MESSAGE: u8 = 0xAF;
}

/// Why a login attempt was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LoginDenyReason {
    /// Wrong account name or password.
    InvalidCredentials = 1,
    /// Account suspended.
    AccountBanned = 2,
    /// Server at population cap.
    ServerFull = 3,
    /// Subscription lapsed.
    ExpiredSubscription = 4,
}

/// Chat channel a message line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ChatChannel {
    /// System notifications.
    System = 0,
    /// Local say.
    Say = 1,
    /// Guild chat.
    Guild = 2,
    /// Group chat.
    Group = 3,
    /// Server-wide broadcast.
    Broadcast = 4,
}

/// External rules collaborator: resolves the name color a logging-in
/// player is shown with. Owned by the game-rules layer, not this crate.
pub trait LoginColors {
    /// Display color code for a character of the given realm.
    fn account_color(&self, realm: Realm) -> u8;
}

/// The full outbound operation table of one revision.
///
/// Every field is one operation. [`rev168::ops`] fills the whole table;
/// later revisions overwrite a sparse subset, so any entry a revision does
/// not touch behaves exactly as the nearest earlier revision.
#[derive(Clone, Copy)]
pub struct CodecOps {
    pub(crate) login_granted: fn(&SessionCodec, &PlayerState, u8),
    pub(crate) login_denied: fn(&SessionCodec, LoginDenyReason),
    pub(crate) session_id: fn(&SessionCodec, SessionId),
    pub(crate) realm: fn(&SessionCodec, Realm),
    pub(crate) game_open: fn(&SessionCodec),
    pub(crate) time: fn(&SessionCodec, u32, u32),
    pub(crate) object_create: fn(&SessionCodec, &WorldObject, u64),
    pub(crate) npc_create: fn(&SessionCodec, &NpcState, u64),
    pub(crate) player_create: fn(&SessionCodec, &PlayerState, u64),
    pub(crate) object_update: fn(&SessionCodec, &WorldObject, u64),
    pub(crate) object_remove: fn(&SessionCodec, RegionId, ObjectId),
    pub(crate) object_delete: fn(&SessionCodec, RegionId, ObjectId),
    pub(crate) model_change: fn(&SessionCodec, ObjectId, u16),
    pub(crate) emblem: fn(&SessionCodec, ObjectId, u32),
    pub(crate) combat_animation: fn(&SessionCodec, ObjectId, ObjectId, u16, u8, u8),
    pub(crate) spell_effect: fn(&SessionCodec, ObjectId, u16, ObjectId, bool),
    pub(crate) status_update: fn(&SessionCodec, &PlayerState),
    pub(crate) health_percent: fn(&SessionCodec, ObjectId, u8),
    pub(crate) regen_rates: fn(&SessionCodec, u8, u8, u8),
    pub(crate) concentration_list: fn(&SessionCodec, &ConcentrationList),
    pub(crate) inventory_window: fn(&SessionCodec, &[Item]),
    pub(crate) inventory_update: fn(&SessionCodec, &[Item]),
    pub(crate) trade_window: fn(&SessionCodec, &TradeWindow),
    pub(crate) encumbrance: fn(&SessionCodec, u16, u16),
    pub(crate) group_window: fn(&SessionCodec, &GroupRoster),
    pub(crate) group_member_update: fn(&SessionCodec, &GroupMember),
    pub(crate) guild_info: fn(&SessionCodec, &GuildInfo),
    pub(crate) quest_entry: fn(&SessionCodec, &QuestEntry),
    pub(crate) quest_list: fn(&SessionCodec, &[QuestEntry]),
    pub(crate) skill_table: fn(&SessionCodec, &[Skill]),
    pub(crate) trainer_window: fn(&SessionCodec, &[TrainableSpec]),
    pub(crate) house_create: fn(&SessionCodec, &House, u64),
    pub(crate) house_enter: fn(&SessionCodec, &House),
    pub(crate) house_interior: fn(&SessionCodec, &House),
    pub(crate) keep_info: fn(&SessionCodec, &Keep),
    pub(crate) keep_components: fn(&SessionCodec, &Keep),
    pub(crate) message: fn(&SessionCodec, &str, ChatChannel),
}

/// One session's bound codec.
///
/// Exclusively owned by its session; safe to invoke from multiple
/// simulation threads targeting independent entities. The update cache is
/// the only shared mutable structure and synchronizes per key.
pub struct SessionCodec {
    pub(crate) revision: ProtocolRevision,
    pub(crate) ops: CodecOps,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) cache: UpdateCache,
    /// Projected trainer window, rebuilt after skill changes.
    pub(crate) trainer_cache: Mutex<Option<Vec<Packet>>>,
    /// Per-session visual-effect sequence counter.
    pub(crate) effect_seq: AtomicU16,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCodec")
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    pub(crate) fn new(
        revision: ProtocolRevision,
        ops: CodecOps,
        transport: Arc<dyn Transport>,
    ) -> Self {
        debug!(%revision, "codec bound");
        Self {
            revision,
            ops,
            transport,
            cache: UpdateCache::new(),
            trainer_cache: Mutex::new(None),
            effect_seq: AtomicU16::new(0),
        }
    }

    /// Revision this codec serves.
    #[must_use]
    pub const fn revision(&self) -> ProtocolRevision {
        self.revision
    }

    /// The session's update-suppression cache.
    #[must_use]
    pub fn update_cache(&self) -> &UpdateCache {
        &self.cache
    }

    /// Drops the cached trainer window. Call on any skill change.
    pub fn invalidate_trainer_cache(&self) {
        *self.trainer_cache.lock() = None;
    }

    pub(crate) fn next_effect_seq(&self) -> u16 {
        self.effect_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Routes a finished packet onto its transport channel.
    pub(crate) fn send(&self, packet: Packet) {
        match packet.class {
            TransportClass::Reliable => self.transport.send_reliable(packet),
            TransportClass::Unreliable => self.transport.send_unreliable(packet),
        }
    }

    fn require_realm(realm: Realm) -> Result<(), ProtocolError> {
        if realm == Realm::None {
            return Err(ProtocolError::InvalidRealm(realm.code()));
        }
        Ok(())
    }

    // ---- login sequence -------------------------------------------------

    /// Grants login: resolves the display color through the rules
    /// collaborator, then delegates to the byte-level variant.
    pub fn send_login_granted(&self, player: &PlayerState, colors: &dyn LoginColors) {
        let color = colors.account_color(player.realm);
        (self.ops.login_granted)(self, player, color);
    }

    /// Refuses login.
    pub fn send_login_denied(&self, reason: LoginDenyReason) {
        (self.ops.login_denied)(self, reason);
    }

    /// Announces the session id the client must echo.
    pub fn send_session_id(&self, session: SessionId) {
        (self.ops.session_id)(self, session);
    }

    /// Announces the character's realm.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidRealm`] when handed the unset realm; that is
    /// a caller bug, not a user condition.
    pub fn send_realm(&self, realm: Realm) -> Result<(), ProtocolError> {
        Self::require_realm(realm)?;
        (self.ops.realm)(self, realm);
        Ok(())
    }

    /// Tells the client the world is ready.
    pub fn send_game_open(&self) {
        (self.ops.game_open)(self);
    }

    /// Pushes the game clock.
    pub fn send_time(&self, seconds: u32, rate: u32) {
        (self.ops.time)(self, seconds, rate);
    }

    // ---- world object lifecycle -----------------------------------------

    /// Announces a static world object, unless the session already knows it.
    pub fn send_object_create(&self, object: &WorldObject, tick: u64) {
        (self.ops.object_create)(self, object, tick);
    }

    /// Announces an NPC, unless the session already knows it.
    pub fn send_npc_create(&self, npc: &NpcState, tick: u64) {
        (self.ops.npc_create)(self, npc, tick);
    }

    /// Announces another player character.
    pub fn send_player_create(&self, player: &PlayerState, tick: u64) {
        (self.ops.player_create)(self, player, tick);
    }

    /// Pushes an object movement update; falls back to a create when the
    /// session has never been told about the object.
    pub fn send_object_update(&self, object: &WorldObject, tick: u64) {
        (self.ops.object_update)(self, object, tick);
    }

    /// Removes an object from the client's view.
    pub fn send_object_remove(&self, region: RegionId, id: ObjectId) {
        (self.ops.object_remove)(self, region, id);
    }

    /// Destroys an object outright.
    pub fn send_object_delete(&self, region: RegionId, id: ObjectId) {
        (self.ops.object_delete)(self, region, id);
    }

    /// Swaps an announced object's model.
    pub fn send_model_change(&self, id: ObjectId, model: u16) {
        (self.ops.model_change)(self, id, model);
    }

    /// Updates an object's guild emblem.
    pub fn send_emblem(&self, id: ObjectId, emblem: u32) {
        (self.ops.emblem)(self, id, emblem);
    }

    // ---- combat and status ----------------------------------------------

    /// Plays a combat swing with its outcome.
    pub fn send_combat_animation(
        &self,
        attacker: ObjectId,
        defender: ObjectId,
        weapon: u16,
        style: u8,
        result: u8,
    ) {
        (self.ops.combat_animation)(self, attacker, defender, weapon, style, result);
    }

    /// Plays a spell visual on the target.
    pub fn send_spell_effect(
        &self,
        caster: ObjectId,
        spell_id: u16,
        target: ObjectId,
        success: bool,
    ) {
        (self.ops.spell_effect)(self, caster, spell_id, target, success);
    }

    /// Pushes the session's own status bars.
    pub fn send_status_update(&self, player: &PlayerState) {
        (self.ops.status_update)(self, player);
    }

    /// Pushes another entity's health bar (loss-tolerant).
    pub fn send_health_percent(&self, id: ObjectId, percent: u8) {
        (self.ops.health_percent)(self, id, percent);
    }

    /// Pushes regeneration rates.
    pub fn send_regen_rates(&self, health: u8, power: u8, endurance: u8) {
        (self.ops.regen_rates)(self, health, power, endurance);
    }

    /// Pushes the concentration window. Snapshots the list under its lock.
    pub fn send_concentration_list(&self, list: &ConcentrationList) {
        (self.ops.concentration_list)(self, list);
    }

    // ---- inventory and trade --------------------------------------------

    /// Sends the full inventory window, segmented under its byte budget.
    pub fn send_inventory_window(&self, items: &[Item]) {
        (self.ops.inventory_window)(self, items);
    }

    /// Pushes a batch of changed inventory slots.
    pub fn send_inventory_update(&self, items: &[Item]) {
        (self.ops.inventory_update)(self, items);
    }

    /// Pushes the trade window. Snapshots it under its lock.
    pub fn send_trade_window(&self, window: &TradeWindow) {
        (self.ops.trade_window)(self, window);
    }

    /// Pushes carried/max encumbrance.
    pub fn send_encumbrance(&self, current: u16, max: u16) {
        (self.ops.encumbrance)(self, current, max);
    }

    // ---- group and guild ------------------------------------------------

    /// Sends the group window. Snapshots the roster under its lock.
    pub fn send_group_window(&self, roster: &GroupRoster) {
        (self.ops.group_window)(self, roster);
    }

    /// Pushes one group member's bars.
    pub fn send_group_member_update(&self, member: &GroupMember) {
        (self.ops.group_member_update)(self, member);
    }

    /// Pushes guild name, MOTD and emblem.
    pub fn send_guild_info(&self, guild: &GuildInfo) {
        (self.ops.guild_info)(self, guild);
    }

    // ---- quests and training --------------------------------------------

    /// Pushes one journal entry.
    pub fn send_quest_entry(&self, quest: &QuestEntry) {
        (self.ops.quest_entry)(self, quest);
    }

    /// Sends the whole journal, segmented under its byte budget.
    pub fn send_quest_list(&self, quests: &[QuestEntry]) {
        (self.ops.quest_list)(self, quests);
    }

    /// Sends the skill table, segmented under its byte budget.
    pub fn send_skill_table(&self, skills: &[Skill]) {
        (self.ops.skill_table)(self, skills);
    }

    /// Sends the trainer window, reusing the session's projected copy until
    /// a skill change invalidates it.
    pub fn send_trainer_window(&self, specs: &[TrainableSpec]) {
        (self.ops.trainer_window)(self, specs);
    }

    // ---- housing ---------------------------------------------------------

    /// Announces a house lot. No-op on revisions without housing.
    pub fn send_house_create(&self, house: &House, tick: u64) {
        (self.ops.house_create)(self, house, tick);
    }

    /// Puts the session inside a house.
    pub fn send_house_enter(&self, house: &House) {
        (self.ops.house_enter)(self, house);
    }

    /// Sends the house interior, segmented under its byte budget.
    pub fn send_house_interior(&self, house: &House) {
        (self.ops.house_interior)(self, house);
    }

    // ---- keeps ------------------------------------------------------------

    /// Pushes keep ownership and shape.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidRealm`] when the keep carries the unset
    /// realm (caller bug).
    pub fn send_keep_info(&self, keep: &Keep) -> Result<(), ProtocolError> {
        Self::require_realm(keep.realm)?;
        (self.ops.keep_info)(self, keep);
        Ok(())
    }

    /// Pushes the keep's wall and tower components, segmented.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidRealm`] when the keep carries the unset
    /// realm (caller bug).
    pub fn send_keep_components(&self, keep: &Keep) -> Result<(), ProtocolError> {
        Self::require_realm(keep.realm)?;
        (self.ops.keep_components)(self, keep);
        Ok(())
    }

    // ---- chat --------------------------------------------------------------

    /// Pushes a chat line.
    pub fn send_message(&self, text: &str, channel: ChatChannel) {
        (self.ops.message)(self, text, channel);
    }
}
