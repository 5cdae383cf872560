//! # Revision 168 (Baseline)
//!
//! The oldest shipped revision supplies the complete operation table;
//! every later revision starts from this one and patches the entries whose
//! layout changed. Shared bodies that later revisions re-parameterize
//! (item wire shape, resist block, login trailer) live here as
//! `pub(super)` helpers.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{debug, error, trace};

use duskhold_world::{
    ConcentrationList, GroupMember, GroupRoster, GuildInfo, House, Item, Keep, KeepComponent,
    NpcState, ObjectId, PlayerState, QuestEntry, Realm, RegionId, SessionId, Skill, TradeState,
    TradeWindow, TrainableSpec, WorldObject,
};

use super::opcode;
use super::{ChatChannel, CodecOps, LoginDenyReason, SessionCodec, SERVER_NAME};
use crate::project::{
    clamp_name, write_effect_record, write_item_record, write_skill_record,
    write_trainable_record, ItemWire, EMBLEM_EXTENDED_BIT, SKILL_NAME_CAP,
};
use crate::segment::{
    encode_batched, SegmentHeader, INTERIOR_BUDGET, INVENTORY_BUDGET, KEEP_COMPONENT_BUDGET,
    QUEST_LIST_BUDGET, SKILL_TABLE_BUDGET, TRAINER_BUDGET,
};
use crate::transport::TransportClass;
use crate::writer::{ByteOrder, PacketWriter};

/// Most entries the concentration window shows.
const CONCENTRATION_CAP: usize = 50;

/// Complete baseline operation table.
pub(crate) fn ops() -> CodecOps {
    CodecOps {
        login_granted,
        login_denied,
        session_id,
        realm,
        game_open,
        time,
        object_create,
        npc_create,
        player_create,
        object_update,
        object_remove,
        object_delete,
        model_change,
        emblem,
        combat_animation,
        spell_effect,
        status_update,
        health_percent,
        regen_rates,
        concentration_list,
        inventory_window,
        inventory_update,
        trade_window,
        encumbrance,
        group_window,
        group_member_update,
        guild_info,
        quest_entry,
        quest_list,
        skill_table,
        trainer_window,
        house_create: house_unsupported_create,
        house_enter: house_unsupported_enter,
        house_interior: house_unsupported_interior,
        keep_info,
        keep_components,
        message,
    }
}

// ---- login sequence ------------------------------------------------------

/// Shared login-granted body; revisions that append trailer bytes pass them
/// through `expansion`.
pub(super) fn login_granted_body(
    codec: &SessionCodec,
    player: &PlayerState,
    color: u8,
    expansion: Option<u8>,
) {
    let mut w = PacketWriter::open(opcode::LOGIN_GRANTED);
    w.write_u8(1);
    w.write_u8(color);
    w.write_u8(player.realm.code());
    w.write_u8(player.level);
    // Session ids ride the reversed byte order.
    w.write_u16(player.session.0, ByteOrder::LowEndian);
    w.write_short_str(&clamp_name(&player.name, 47, "character"));
    w.write_fixed_str(SERVER_NAME, 20);
    if let Some(byte) = expansion {
        w.write_u8(byte);
    }
    codec.send(w.finish(TransportClass::Reliable));
}

fn login_granted(codec: &SessionCodec, player: &PlayerState, color: u8) {
    login_granted_body(codec, player, color, None);
}

fn login_denied(codec: &SessionCodec, reason: LoginDenyReason) {
    let mut w = PacketWriter::open(opcode::LOGIN_DENIED);
    w.write_u8(reason as u8);
    w.write_u8(0x01);
    codec.send(w.finish(TransportClass::Reliable));
}

fn session_id(codec: &SessionCodec, session: SessionId) {
    let mut w = PacketWriter::open(opcode::SESSION_ID);
    w.write_u16(session.0, ByteOrder::LowEndian);
    codec.send(w.finish(TransportClass::Reliable));
}

fn realm(codec: &SessionCodec, realm: Realm) {
    let mut w = PacketWriter::open(opcode::REALM);
    w.write_u8(realm.code());
    codec.send(w.finish(TransportClass::Reliable));
}

fn game_open(codec: &SessionCodec) {
    let mut w = PacketWriter::open(opcode::GAME_OPEN);
    w.write_u8(0);
    codec.send(w.finish(TransportClass::Reliable));
}

fn time(codec: &SessionCodec, seconds: u32, rate: u32) {
    let mut w = PacketWriter::open(opcode::TIME);
    w.write_u32(seconds, ByteOrder::Network);
    w.write_u32(rate, ByteOrder::Network);
    codec.send(w.finish(TransportClass::Reliable));
}

// ---- world object lifecycle ------------------------------------------------

fn object_create(codec: &SessionCodec, object: &WorldObject, tick: u64) {
    if !codec.cache.try_announce(object.pos.region, object.id, tick) {
        debug!(id = object.id.0, "object already announced, suppressed");
        return;
    }

    let mut w = PacketWriter::open(opcode::OBJECT_CREATE);
    w.write_u16(object.id.0, ByteOrder::Network);
    // Model numbers ride the reversed byte order.
    w.write_u16(object.model, ByteOrder::LowEndian);
    w.write_u16(object.pos.heading, ByteOrder::Network);
    w.write_u16(object.pos.z, ByteOrder::Network);
    w.write_u32(object.pos.x, ByteOrder::Network);
    w.write_u32(object.pos.y, ByteOrder::Network);
    w.write_u16((object.emblem & 0xFFFF) as u16, ByteOrder::Network);
    let mut flags = object.flags;
    if object.emblem & EMBLEM_EXTENDED_BIT != 0 {
        flags |= 0x08;
    }
    w.write_u8(flags);
    w.write_short_str(&clamp_name(&object.name, 47, "object"));
    codec.send(w.finish(TransportClass::Reliable));
}

fn npc_create(codec: &SessionCodec, npc: &NpcState, tick: u64) {
    if !codec.cache.try_announce(npc.pos.region, npc.id, tick) {
        debug!(id = npc.id.0, "npc already announced, suppressed");
        return;
    }

    let mut w = PacketWriter::open(opcode::NPC_CREATE);
    npc_create_body(&mut w, npc, ByteOrder::Network, false);
    codec.send(w.finish(TransportClass::Reliable));
}

/// Shared NPC-create body. Revision 1105 flips the model byte order and
/// appends the extension byte.
pub(super) fn npc_create_body(
    w: &mut PacketWriter,
    npc: &NpcState,
    model_order: ByteOrder,
    extension: bool,
) {
    w.write_u16(npc.id.0, ByteOrder::Network);
    w.write_u16(npc.speed, ByteOrder::Network);
    w.write_u16(npc.pos.heading, ByteOrder::Network);
    w.write_u16(npc.pos.z, ByteOrder::Network);
    w.write_u32(npc.pos.x, ByteOrder::Network);
    w.write_u32(npc.pos.y, ByteOrder::Network);
    w.write_u16(npc.model, model_order);
    w.write_u8(npc.size);
    w.write_u8(npc.level);
    w.write_u8(npc.flags);
    w.write_u8(npc.realm.code());
    w.write_short_str(&clamp_name(&npc.name, 47, "npc"));
    w.write_short_str(&clamp_name(&npc.guild_name, 47, "npc guild"));
    if extension {
        w.write_u8(0xFF);
    }
    w.write_u8(0);
}

fn player_create(codec: &SessionCodec, player: &PlayerState, tick: u64) {
    if !codec.cache.try_announce(player.pos.region, player.id, tick) {
        debug!(id = player.id.0, "player already announced, suppressed");
        return;
    }

    let mut w = PacketWriter::open(opcode::PLAYER_CREATE);
    w.write_u16(player.session.0, ByteOrder::LowEndian);
    w.write_u16(player.id.0, ByteOrder::Network);
    w.write_u16(player.model, ByteOrder::LowEndian);
    w.write_u16(player.pos.z, ByteOrder::Network);
    w.write_u32(player.pos.x, ByteOrder::Network);
    w.write_u32(player.pos.y, ByteOrder::Network);
    w.write_u16(player.pos.heading, ByteOrder::Network);
    w.write_u8(player.realm.code());
    w.write_u8(player.level);
    w.write_short_str(&clamp_name(&player.name, 47, "character"));
    w.write_short_str(&clamp_name(&player.guild_name, 47, "guild"));
    codec.send(w.finish(TransportClass::Reliable));
}

fn object_update(codec: &SessionCodec, object: &WorldObject, tick: u64) {
    let region = object.pos.region;
    match codec.cache.last_sent(region, object.id) {
        // Never announced: the client cannot apply a delta, re-dispatch the
        // create through the table so revision overrides still win.
        None => (codec.ops.object_create)(codec, object, tick),
        Some(last) if last == tick => {
            trace!(id = object.id.0, tick, "object update suppressed");
        }
        Some(_) => {
            let mut w = PacketWriter::open(opcode::OBJECT_UPDATE);
            w.write_u16(object.id.0, ByteOrder::Network);
            w.write_u16(object.pos.heading, ByteOrder::Network);
            w.write_u16(object.pos.z, ByteOrder::Network);
            w.write_u32(object.pos.x, ByteOrder::Network);
            w.write_u32(object.pos.y, ByteOrder::Network);
            codec.send(w.finish(TransportClass::Unreliable));
            codec.cache.mark_sent(region, object.id, tick);
        }
    }
}

fn object_remove(codec: &SessionCodec, region: RegionId, id: ObjectId) {
    codec.cache.forget(region, id);
    let mut w = PacketWriter::open(opcode::OBJECT_REMOVE);
    w.write_u16(id.0, ByteOrder::Network);
    w.write_u16(1, ByteOrder::Network);
    codec.send(w.finish(TransportClass::Reliable));
}

fn object_delete(codec: &SessionCodec, region: RegionId, id: ObjectId) {
    codec.cache.forget(region, id);
    let mut w = PacketWriter::open(opcode::OBJECT_DELETE);
    w.write_u16(id.0, ByteOrder::Network);
    w.write_u16(0, ByteOrder::Network);
    codec.send(w.finish(TransportClass::Reliable));
}

fn model_change(codec: &SessionCodec, id: ObjectId, model: u16) {
    let mut w = PacketWriter::open(opcode::MODEL_CHANGE);
    w.write_u16(id.0, ByteOrder::Network);
    w.write_u16(model, ByteOrder::LowEndian);
    codec.send(w.finish(TransportClass::Reliable));
}

fn emblem(codec: &SessionCodec, id: ObjectId, emblem: u32) {
    let mut w = PacketWriter::open(opcode::EMBLEM);
    w.write_u16(id.0, ByteOrder::Network);
    w.write_u16((emblem & 0xFFFF) as u16, ByteOrder::Network);
    let flags = if emblem & EMBLEM_EXTENDED_BIT != 0 { 0x08 } else { 0 };
    w.write_u8(flags);
    codec.send(w.finish(TransportClass::Reliable));
}

// ---- combat and status -------------------------------------------------------

fn combat_animation(
    codec: &SessionCodec,
    attacker: ObjectId,
    defender: ObjectId,
    weapon: u16,
    style: u8,
    result: u8,
) {
    let mut w = PacketWriter::open(opcode::COMBAT_ANIMATION);
    w.write_u16(attacker.0, ByteOrder::Network);
    w.write_u16(defender.0, ByteOrder::Network);
    w.write_u16(weapon, ByteOrder::Network);
    w.write_u8(style);
    w.write_u8(result);
    codec.send(w.finish(TransportClass::Unreliable));
}

fn spell_effect(
    codec: &SessionCodec,
    caster: ObjectId,
    spell_id: u16,
    target: ObjectId,
    success: bool,
) {
    let mut w = PacketWriter::open(opcode::SPELL_EFFECT);
    w.write_u16(caster.0, ByteOrder::Network);
    w.write_u16(spell_id, ByteOrder::Network);
    w.write_u16(target.0, ByteOrder::Network);
    w.write_u16(codec.next_effect_seq(), ByteOrder::Network);
    w.write_u8(u8::from(success));
    w.write_u8(0);
    codec.send(w.finish(TransportClass::Unreliable));
}

/// Shared status body; revisions with resist bars set `resists`.
pub(super) fn status_update_body(codec: &SessionCodec, player: &PlayerState, resists: bool) {
    let mut w = PacketWriter::open(opcode::STATUS_UPDATE);
    w.write_u16(player.session.0, ByteOrder::LowEndian);
    w.write_u8(player.health_percent);
    w.write_u8(player.power_percent);
    w.write_u8(player.endurance_percent);
    w.write_u8(player.concentration_percent);
    if resists {
        let r = &player.resists;
        for value in [
            r.crush, r.slash, r.thrust, r.heat, r.cold, r.matter, r.body, r.spirit, r.energy,
        ] {
            w.write_u8(value as u8);
        }
    }
    codec.send(w.finish(TransportClass::Reliable));
}

fn status_update(codec: &SessionCodec, player: &PlayerState) {
    status_update_body(codec, player, false);
}

fn health_percent(codec: &SessionCodec, id: ObjectId, percent: u8) {
    let mut w = PacketWriter::open(opcode::HEALTH_PERCENT);
    w.write_u16(id.0, ByteOrder::Network);
    w.write_u8(percent);
    codec.send(w.finish(TransportClass::Unreliable));
}

fn regen_rates(codec: &SessionCodec, health: u8, power: u8, endurance: u8) {
    let mut w = PacketWriter::open(opcode::REGEN_RATES);
    w.write_u8(health);
    w.write_u8(power);
    w.write_u8(endurance);
    codec.send(w.finish(TransportClass::Reliable));
}

fn concentration_list(codec: &SessionCodec, list: &ConcentrationList) {
    // Snapshot under the list's lock: the packet must never observe a
    // collection mutated mid-encode.
    let effects = list.snapshot();
    let shown = effects.len().min(CONCENTRATION_CAP);

    let mut w = PacketWriter::open(opcode::CONCENTRATION_LIST);
    w.write_u8(shown as u8);
    w.write_u8(0);
    for effect in &effects[..shown] {
        write_effect_record(&mut w, effect);
    }
    codec.send(w.finish(TransportClass::Reliable));
}

// ---- inventory and trade ----------------------------------------------------

/// Orders items by slot, logging and skipping duplicates (first wins; the
/// send continues).
pub(super) fn slot_map(items: &[Item]) -> Vec<&Item> {
    let mut by_slot: BTreeMap<u8, &Item> = BTreeMap::new();
    for item in items {
        match by_slot.entry(item.slot) {
            Entry::Vacant(entry) => {
                entry.insert(item);
            }
            Entry::Occupied(entry) => {
                error!(
                    slot = item.slot,
                    kept = %entry.get().name,
                    skipped = %item.name,
                    "duplicate inventory slot, keeping first"
                );
            }
        }
    }
    by_slot.into_values().collect()
}

fn batched_header(w: &mut PacketWriter, first_index: usize, window: u8) -> SegmentHeader {
    let count_pos = w.position();
    w.write_u8(0);
    // Skill and trainer lists run past 255 elements; the starting index is
    // two bytes so later pages address their records correctly.
    w.write_u16(first_index as u16, ByteOrder::Network);
    let subtype_pos = w.position();
    w.write_u8(0);
    w.write_u8(window);
    SegmentHeader { count_pos, subtype_pos }
}

/// Shared inventory-window body, parameterized by the revision's item wire
/// shape.
pub(super) fn inventory_window_with(codec: &SessionCodec, items: &[Item], wire: &ItemWire) {
    let ordered = slot_map(items);
    let packets = encode_batched(
        opcode::INVENTORY_WINDOW,
        INVENTORY_BUDGET,
        0,
        &ordered,
        |w, first| batched_header(w, first, 0x01),
        |w, item| write_item_record(w, item.slot, Some(*item), wire),
    );
    for packet in packets {
        codec.send(packet);
    }
}

/// Shared inventory-delta body.
pub(super) fn inventory_update_with(codec: &SessionCodec, items: &[Item], wire: &ItemWire) {
    let ordered = slot_map(items);
    let packets = encode_batched(
        opcode::INVENTORY_UPDATE,
        INVENTORY_BUDGET,
        0,
        &ordered,
        |w, first| batched_header(w, first, 0x00),
        |w, item| write_item_record(w, item.slot, Some(*item), wire),
    );
    for packet in packets {
        codec.send(packet);
    }
}

fn inventory_window(codec: &SessionCodec, items: &[Item]) {
    inventory_window_with(codec, items, &ItemWire::INVENTORY_V168);
}

fn inventory_update(codec: &SessionCodec, items: &[Item]) {
    inventory_update_with(codec, items, &ItemWire::INVENTORY_V168);
}

/// Shared trade-window body. The ten slots are positionally addressable:
/// empty ones carry full-size zero placeholders.
pub(super) fn trade_window_with(codec: &SessionCodec, window: &TradeWindow, wire: &ItemWire) {
    let state = window.snapshot();

    let mut w = PacketWriter::open(opcode::TRADE_WINDOW);
    w.write_u8(u8::from(state.accepted));
    w.write_u8(0);
    w.write_u32(state.copper, ByteOrder::Network);
    w.write_short_str(&clamp_name(&state.partner, 47, "trade partner"));
    for slot in 0..TradeState::SLOT_COUNT {
        write_item_record(&mut w, slot as u8, state.slots[slot].as_ref(), wire);
    }
    codec.send(w.finish(TransportClass::Reliable));
}

fn trade_window(codec: &SessionCodec, window: &TradeWindow) {
    trade_window_with(codec, window, &ItemWire::TRADE_V168);
}

fn encumbrance(codec: &SessionCodec, current: u16, max: u16) {
    let mut w = PacketWriter::open(opcode::ENCUMBRANCE);
    w.write_u16(max, ByteOrder::Network);
    w.write_u16(current, ByteOrder::Network);
    codec.send(w.finish(TransportClass::Reliable));
}

// ---- group and guild ----------------------------------------------------------

fn group_window(codec: &SessionCodec, roster: &GroupRoster) {
    let members = roster.snapshot();

    let mut w = PacketWriter::open(opcode::GROUP_WINDOW);
    w.write_u8(members.len() as u8);
    w.write_u8(0);
    for member in &members {
        w.write_u8(member.level);
        w.write_u8(member.health_percent);
        w.write_u8(member.power_percent);
        w.write_u8(member.endurance_percent);
        w.write_u8(u8::from(member.alive));
        w.write_u16(member.id.0, ByteOrder::Network);
        w.write_short_str(&clamp_name(&member.name, 47, "member"));
    }
    codec.send(w.finish(TransportClass::Reliable));
}

fn group_member_update(codec: &SessionCodec, member: &GroupMember) {
    let mut w = PacketWriter::open(opcode::GROUP_MEMBER_UPDATE);
    w.write_u16(member.id.0, ByteOrder::Network);
    w.write_u8(member.health_percent);
    w.write_u8(member.power_percent);
    w.write_u8(member.endurance_percent);
    w.write_u8(u8::from(member.alive));
    codec.send(w.finish(TransportClass::Unreliable));
}

fn guild_info(codec: &SessionCodec, guild: &GuildInfo) {
    let mut w = PacketWriter::open(opcode::GUILD_INFO);
    w.write_u8(guild.level);
    w.write_u16((guild.emblem & 0xFFFF) as u16, ByteOrder::Network);
    // This message relocates the extended-emblem bit into its flag byte.
    let flags = if guild.emblem & EMBLEM_EXTENDED_BIT != 0 { 0x08 } else { 0 };
    w.write_u8(flags);
    w.write_short_str(&clamp_name(&guild.name, 47, "guild"));
    w.write_short_str(&clamp_name(&guild.motd, SKILL_NAME_CAP, "motd"));
    codec.send(w.finish(TransportClass::Reliable));
}

// ---- quests and training ----------------------------------------------------

/// Shared quest record; revisions with the level byte set `with_level`.
pub(super) fn quest_record(w: &mut PacketWriter, quest: &QuestEntry, with_level: bool) {
    w.write_u8(quest.index);
    if with_level {
        w.write_u8(quest.level);
    }
    w.write_u8(quest.step);
    w.write_short_str(&clamp_name(&quest.name, SKILL_NAME_CAP, "quest"));
    w.write_short_str(&clamp_name(&quest.description, 255, "quest description"));
}

/// Shared single-entry body.
pub(super) fn quest_entry_with(codec: &SessionCodec, quest: &QuestEntry, with_level: bool) {
    let mut w = PacketWriter::open(opcode::QUEST_ENTRY);
    quest_record(&mut w, quest, with_level);
    codec.send(w.finish(TransportClass::Reliable));
}

/// Shared journal body.
pub(super) fn quest_list_with(codec: &SessionCodec, quests: &[QuestEntry], with_level: bool) {
    let packets = encode_batched(
        opcode::QUEST_LIST,
        QUEST_LIST_BUDGET,
        0,
        quests,
        |w, first| batched_header(w, first, 0x00),
        |w, quest| quest_record(w, quest, with_level),
    );
    for packet in packets {
        codec.send(packet);
    }
}

fn quest_entry(codec: &SessionCodec, quest: &QuestEntry) {
    quest_entry_with(codec, quest, false);
}

fn quest_list(codec: &SessionCodec, quests: &[QuestEntry]) {
    quest_list_with(codec, quests, false);
}

fn skill_table(codec: &SessionCodec, skills: &[Skill]) {
    let packets = encode_batched(
        opcode::SKILL_TABLE,
        SKILL_TABLE_BUDGET,
        0x03,
        skills,
        |w, first| batched_header(w, first, 0x00),
        |w, skill| write_skill_record(w, skill),
    );
    for packet in packets {
        codec.send(packet);
    }
}

fn trainer_window(codec: &SessionCodec, specs: &[TrainableSpec]) {
    let mut cached = codec.trainer_cache.lock();
    let packets = match cached.as_ref() {
        Some(packets) => {
            trace!("trainer window served from session cache");
            packets.clone()
        }
        None => {
            let packets = encode_batched(
                opcode::TRAINER_WINDOW,
                TRAINER_BUDGET,
                0,
                specs,
                |w, first| batched_header(w, first, 0x00),
                |w, spec| write_trainable_record(w, spec),
            );
            *cached = Some(packets.clone());
            packets
        }
    };
    drop(cached);

    for packet in packets {
        codec.send(packet);
    }
}

// ---- housing (unsupported before revision 174) -------------------------------

pub(super) fn house_unsupported_create(codec: &SessionCodec, house: &House, _tick: u64) {
    trace!(revision = %codec.revision, house = house.id.0, "housing not in this revision, dropped");
}

pub(super) fn house_unsupported_enter(codec: &SessionCodec, house: &House) {
    trace!(revision = %codec.revision, house = house.id.0, "housing not in this revision, dropped");
}

pub(super) fn house_unsupported_interior(codec: &SessionCodec, house: &House) {
    trace!(revision = %codec.revision, house = house.id.0, "housing not in this revision, dropped");
}

// ---- keeps ---------------------------------------------------------------------

fn keep_info(codec: &SessionCodec, keep: &Keep) {
    let mut w = PacketWriter::open(opcode::KEEP_INFO);
    w.write_u16(keep.id.0, ByteOrder::Network);
    w.write_u8(keep.level);
    w.write_u8(keep.realm.code());
    w.write_u16(keep.heading, ByteOrder::Network);
    w.write_u32(keep.x, ByteOrder::Network);
    w.write_u32(keep.y, ByteOrder::Network);
    w.write_u16((keep.emblem & 0xFFFF) as u16, ByteOrder::Network);
    let flags = if keep.emblem & EMBLEM_EXTENDED_BIT != 0 { 0x08 } else { 0 };
    w.write_u8(flags);
    w.write_u8(keep.components.len() as u8);
    w.write_short_str(&clamp_name(&keep.name, 47, "keep"));
    codec.send(w.finish(TransportClass::Reliable));
}

/// Shared component record; revision 190 appends health and status.
pub(super) fn keep_component_record(
    w: &mut PacketWriter,
    component: &KeepComponent,
    extended: bool,
) {
    w.write_u16(component.id, ByteOrder::Network);
    w.write_u8(component.skin);
    w.write_u8(component.x as u8);
    w.write_u8(component.y as u8);
    w.write_u8(component.heading);
    w.write_u8(component.height);
    if extended {
        w.write_u8(component.health_percent);
        w.write_u8(component.status);
    }
}

/// Shared component-page body.
pub(super) fn keep_components_with(codec: &SessionCodec, keep: &Keep, extended: bool) {
    let packets = encode_batched(
        opcode::KEEP_COMPONENT,
        KEEP_COMPONENT_BUDGET,
        0,
        &keep.components,
        |w, first| {
            w.write_u16(keep.id.0, ByteOrder::Network);
            batched_header(w, first, 0x00)
        },
        |w, component| keep_component_record(w, component, extended),
    );
    for packet in packets {
        codec.send(packet);
    }
}

fn keep_components(codec: &SessionCodec, keep: &Keep) {
    keep_components_with(codec, keep, false);
}

// ---- housing bodies shared with revision 174+ ----------------------------------

/// Real house announcement, first shipped in revision 174.
pub(super) fn house_create_real(codec: &SessionCodec, house: &House, tick: u64) {
    if !codec.cache.try_announce(house.pos.region, house.id, tick) {
        debug!(house = house.id.0, "house already announced, suppressed");
        return;
    }

    let mut w = PacketWriter::open(opcode::HOUSE_CREATE);
    w.write_u16(house.id.0, ByteOrder::Network);
    w.write_u16(house.lot, ByteOrder::Network);
    w.write_u16(house.pos.z, ByteOrder::Network);
    w.write_u32(house.pos.x, ByteOrder::Network);
    w.write_u32(house.pos.y, ByteOrder::Network);
    w.write_u16(house.pos.heading, ByteOrder::Network);
    w.write_u8(house.model);
    w.write_u8(house.roof_material);
    w.write_u8(house.wall_material);
    w.write_u8(house.door_material);
    w.write_u16((house.emblem & 0xFFFF) as u16, ByteOrder::Network);
    let flags = if house.emblem & EMBLEM_EXTENDED_BIT != 0 { 0x08 } else { 0 };
    w.write_u8(flags);
    w.write_short_str(&clamp_name(&house.name, 47, "house"));
    codec.send(w.finish(TransportClass::Reliable));
}

/// Real house-enter, first shipped in revision 174.
pub(super) fn house_enter_real(codec: &SessionCodec, house: &House) {
    let mut w = PacketWriter::open(opcode::HOUSE_ENTER);
    w.write_u16(house.id.0, ByteOrder::Network);
    w.write_u16(house.lot, ByteOrder::Network);
    codec.send(w.finish(TransportClass::Reliable));
}

/// Real interior page, first shipped in revision 174.
pub(super) fn house_interior_real(codec: &SessionCodec, house: &House) {
    let packets = encode_batched(
        opcode::HOUSE_INTERIOR,
        INTERIOR_BUDGET,
        0,
        &house.interior,
        |w, first| {
            w.write_u16(house.id.0, ByteOrder::Network);
            batched_header(w, first, 0x00)
        },
        |w, item| {
            w.write_u16(item.model, ByteOrder::LowEndian);
            w.write_u16(item.color, ByteOrder::Network);
            w.write_u16(item.x as u16, ByteOrder::Network);
            w.write_u16(item.y as u16, ByteOrder::Network);
            w.write_u16(item.rotation, ByteOrder::Network);
            w.write_u8(item.size);
            w.write_u8(item.surface);
        },
    );
    for packet in packets {
        codec.send(packet);
    }
}

// ---- chat -------------------------------------------------------------------------

fn message(codec: &SessionCodec, text: &str, channel: ChatChannel) {
    let mut w = PacketWriter::open(opcode::MESSAGE);
    w.write_u8(channel as u8);
    w.write_u8(0);
    w.write_short_str(&clamp_name(text, 255, "message"));
    codec.send(w.finish(TransportClass::Reliable));
}

