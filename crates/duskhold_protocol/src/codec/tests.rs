use std::sync::Arc;

use crossbeam_channel::Receiver;

use duskhold_world::{
    House, HouseId, Item, ItemKind, Keep, KeepComponent, KeepId, NpcState, ObjectId, PlayerState,
    QuestEntry, Realm, RegionId, Resists, SessionId, WorldObject, WorldPos,
};

use super::{opcode, LoginColors, ProtocolRevision, SessionCodec};
use crate::error::ProtocolError;
use crate::registry::CodecRegistry;
use crate::transport::ChannelTransport;
use crate::writer::Packet;

fn bind(revision: ProtocolRevision) -> (SessionCodec, Receiver<Packet>, Receiver<Packet>) {
    let (transport, reliable, unreliable) = ChannelTransport::new();
    let codec = CodecRegistry::standard()
        .create_codec(revision, Arc::new(transport))
        .unwrap();
    (codec, reliable, unreliable)
}

fn drain(rx: &Receiver<Packet>) -> Vec<Packet> {
    rx.try_iter().collect()
}

struct FlatColors;

impl LoginColors for FlatColors {
    fn account_color(&self, _realm: Realm) -> u8 {
        7
    }
}

fn pos() -> WorldPos {
    WorldPos { region: RegionId(51), x: 531_000, y: 478_000, z: 2_048, heading: 1_024 }
}

fn player() -> PlayerState {
    PlayerState {
        session: SessionId(0x41AB),
        id: ObjectId(600),
        name: "Aldric".into(),
        guild_name: "Night Watch".into(),
        model: 488,
        level: 50,
        realm: Realm::Dusk,
        pos: pos(),
        health_percent: 92,
        power_percent: 64,
        endurance_percent: 100,
        concentration_percent: 80,
        resists: Resists {
            crush: 10,
            slash: 11,
            thrust: 12,
            heat: 5,
            cold: 6,
            matter: 7,
            body: 8,
            spirit: 9,
            energy: 4,
        },
    }
}

fn npc(model: u16) -> NpcState {
    NpcState {
        id: ObjectId(900),
        name: "Dusk Sentinel".into(),
        guild_name: String::new(),
        model,
        size: 50,
        level: 38,
        realm: Realm::Dusk,
        pos: pos(),
        speed: 191,
        flags: 0,
    }
}

fn object(emblem: u32) -> WorldObject {
    WorldObject { id: ObjectId(1200), name: "Forge".into(), model: 0x0F10, emblem, pos: pos(), flags: 0 }
}

fn item(slot: u8) -> Item {
    Item {
        template: 7_042,
        name: "Ashen Blade".into(),
        kind: ItemKind::Generic,
        slot,
        level: 50,
        model: 310,
        color: 0,
        emblem: 0,
        effect: 0,
        quality: 97,
        condition: 100,
        durability: 88,
        bonus: 25,
        weight: 42,
        count: 0,
        sell_price: 0,
        crafter: String::new(),
    }
}

fn keep(components: usize) -> Keep {
    Keep {
        id: KeepId(24),
        name: "Caer Duskmoor".into(),
        realm: Realm::Dawn,
        level: 4,
        x: 612_000,
        y: 590_000,
        heading: 2_048,
        emblem: 0,
        components: (0..components)
            .map(|i| KeepComponent {
                id: i as u16,
                skin: 1,
                x: i as i8,
                y: 0,
                heading: 0,
                height: 2,
                health_percent: 100,
                status: 0,
            })
            .collect(),
    }
}

fn house() -> House {
    House {
        id: HouseId(77),
        lot: 1_577,
        pos: pos(),
        model: 9,
        emblem: 0,
        roof_material: 1,
        wall_material: 2,
        door_material: 0,
        name: "Aldric's Cottage".into(),
        owner: "Aldric".into(),
        interior: Vec::new(),
    }
}

fn quest() -> QuestEntry {
    QuestEntry {
        index: 3,
        name: "Embers of the Old War".into(),
        description: "Speak with the sentinel at the ford.".into(),
        level: 42,
        step: 2,
    }
}

#[test]
fn test_login_granted_gains_expansion_byte_at_174() {
    let (old, old_rx, _) = bind(ProtocolRevision::R168);
    let (new, new_rx, _) = bind(ProtocolRevision::R174);

    old.send_login_granted(&player(), &FlatColors);
    new.send_login_granted(&player(), &FlatColors);

    let old_packet = &drain(&old_rx)[0];
    let new_packet = &drain(&new_rx)[0];
    assert_eq!(old_packet.opcode, opcode::LOGIN_GRANTED);
    assert_eq!(new_packet.len(), old_packet.len() + 1);
    assert_eq!(*new_packet.payload.last().unwrap(), 1);
    // Shared prefix identical, including the resolved color byte.
    assert_eq!(new_packet.payload[..old_packet.len()], old_packet.payload[..]);
    assert_eq!(old_packet.payload[1], 7);
}

#[test]
fn test_status_update_resists_appear_at_174_and_inherit_at_183() {
    let (r168, rx168, _) = bind(ProtocolRevision::R168);
    let (r174, rx174, _) = bind(ProtocolRevision::R174);
    let (r183, rx183, _) = bind(ProtocolRevision::R183);

    let p = player();
    r168.send_status_update(&p);
    r174.send_status_update(&p);
    r183.send_status_update(&p);

    let short = &drain(&rx168)[0];
    let with_resists = &drain(&rx174)[0];
    let inherited = &drain(&rx183)[0];

    assert_eq!(with_resists.len(), short.len() + 9);
    // 183 never retouched this message, so it keeps the 174 layout.
    assert_eq!(inherited.payload, with_resists.payload);
    // Resist order is fixed: crush first, energy last.
    assert_eq!(with_resists.payload[short.len()], 10);
    assert_eq!(*with_resists.payload.last().unwrap(), 4);
}

#[test]
fn test_housing_dropped_before_174() {
    let (old, old_rx, _) = bind(ProtocolRevision::R168);
    let (new, new_rx, _) = bind(ProtocolRevision::R174);
    let h = house();

    old.send_house_create(&h, 1);
    old.send_house_enter(&h);
    old.send_house_interior(&h);
    assert!(drain(&old_rx).is_empty());

    new.send_house_create(&h, 1);
    let packets = drain(&new_rx);
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].opcode, opcode::HOUSE_CREATE);

    // Houses ride the same announce-once cache as other objects.
    new.send_house_create(&h, 2);
    assert!(drain(&new_rx).is_empty());
}

#[test]
fn test_npc_model_byte_order_flips_at_1105() {
    let (old, old_rx, _) = bind(ProtocolRevision::R190);
    let (new, new_rx, _) = bind(ProtocolRevision::R1105);
    let n = npc(0x1234);

    old.send_npc_create(&n, 1);
    new.send_npc_create(&n, 1);

    let before = &drain(&old_rx)[0];
    let after = &drain(&new_rx)[0];

    // id(2) speed(2) heading(2) z(2) x(4) y(4) puts the model at offset 16.
    assert_eq!(&before.payload[16..18], &[0x12, 0x34]);
    assert_eq!(&after.payload[16..18], &[0x34, 0x12]);
    // Trailing extension byte.
    assert_eq!(after.len(), before.len() + 1);
}

#[test]
fn test_object_create_relocates_extended_emblem_bit() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);

    codec.send_object_create(&object(0x0001_0005), 1);
    let packet = &drain(&rx)[0];

    // id(2) model(2) heading(2) z(2) x(4) y(4) puts the emblem at offset 16.
    assert_eq!(&packet.payload[16..18], &[0x00, 0x05]);
    assert_eq!(packet.payload[18] & 0x08, 0x08);
}

#[test]
fn test_object_create_suppressed_after_first_announce() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    let o = object(0);

    codec.send_object_create(&o, 1);
    codec.send_object_create(&o, 2);
    assert_eq!(drain(&rx).len(), 1);
}

#[test]
fn test_object_update_falls_back_to_create_then_moves() {
    let (codec, reliable, unreliable) = bind(ProtocolRevision::R168);
    let o = object(0);

    // Never announced: the update re-dispatches as a create.
    codec.send_object_update(&o, 5);
    let created = drain(&reliable);
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].opcode, opcode::OBJECT_CREATE);
    assert!(drain(&unreliable).is_empty());

    // Same tick: suppressed.
    codec.send_object_update(&o, 5);
    assert!(drain(&reliable).is_empty());
    assert!(drain(&unreliable).is_empty());

    // Later tick: movement rides the unreliable channel.
    codec.send_object_update(&o, 6);
    let moved = drain(&unreliable);
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].opcode, opcode::OBJECT_UPDATE);
}

#[test]
fn test_object_remove_forgets_so_recreate_goes_through() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    let o = object(0);
    let region = o.pos.region;

    codec.send_object_create(&o, 1);
    codec.send_object_remove(region, o.id);
    codec.send_object_create(&o, 2);

    let opcodes: Vec<u8> = drain(&rx).iter().map(|p| p.opcode).collect();
    assert_eq!(
        opcodes,
        vec![opcode::OBJECT_CREATE, opcode::OBJECT_REMOVE, opcode::OBJECT_CREATE]
    );
}

#[test]
fn test_duplicate_inventory_slot_keeps_first() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);

    let first = item(12);
    let mut second = item(12);
    second.name = "Rusted Blade".into();

    codec.send_inventory_window(&[first, second]);
    let packets = drain(&rx);
    assert_eq!(packets.len(), 1);
    // Count byte holds one record, duplicate skipped.
    assert_eq!(packets[0].payload[0], 1);
    let body = String::from_utf8_lossy(&packets[0].payload).into_owned();
    assert!(body.contains("Ashen Blade"));
    assert!(!body.contains("Rusted Blade"));
}

#[test]
fn test_trainer_window_reuses_projection_until_invalidated() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    let before = vec![duskhold_world::TrainableSpec { name: "Swords".into(), level: 12, cost: 1 }];
    let after = vec![duskhold_world::TrainableSpec { name: "Swords".into(), level: 13, cost: 1 }];

    codec.send_trainer_window(&before);
    let original = drain(&rx);

    // Cached: the changed input is ignored until invalidation.
    codec.send_trainer_window(&after);
    let cached = drain(&rx);
    assert_eq!(cached[0].payload, original[0].payload);

    codec.invalidate_trainer_cache();
    codec.send_trainer_window(&after);
    let rebuilt = drain(&rx);
    assert_ne!(rebuilt[0].payload, original[0].payload);
}

#[test]
fn test_batched_pages_keep_true_start_index_past_255() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    let specs: Vec<duskhold_world::TrainableSpec> = (0..600)
        .map(|i| duskhold_world::TrainableSpec {
            name: format!("Discipline {i}"),
            level: (i % 50) as u8,
            cost: 1,
        })
        .collect();

    codec.send_trainer_window(&specs);
    let packets = drain(&rx);
    assert!(packets.len() > 3, "600 records cannot fit three budgeted pages");

    // Each page states where its records start; a later page must pick up
    // exactly where the previous one stopped, even past element 255.
    let mut consumed: usize = 0;
    for packet in &packets {
        let first = u16::from_be_bytes([packet.payload[1], packet.payload[2]]);
        assert_eq!(usize::from(first), consumed);
        consumed += usize::from(packet.payload[0]);
    }
    assert_eq!(consumed, 600);
}

#[test]
fn test_quest_description_clamped_like_names() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    let mut q = quest();
    q.description = "ö".repeat(300);

    codec.send_quest_entry(&q);
    let packet = &drain(&rx)[0];

    // index(1) step(1), then the name as a length-prefixed string.
    let name_len = usize::from(packet.payload[2]);
    let desc_len_pos = 3 + name_len;
    assert_eq!(packet.payload[desc_len_pos], 255);
    let desc = &packet.payload[desc_len_pos + 1..];
    assert_eq!(desc.len(), 255);
    assert!(desc.iter().all(|b| *b == b'?'));
}

#[test]
fn test_house_does_not_suppress_object_with_same_id() {
    let (codec, rx, _) = bind(ProtocolRevision::R174);
    let mut o = object(0);
    o.id = ObjectId(house().id.0);

    codec.send_object_create(&o, 1);
    codec.send_house_create(&house(), 1);

    let opcodes: Vec<u8> = drain(&rx).iter().map(|p| p.opcode).collect();
    assert_eq!(opcodes, vec![opcode::OBJECT_CREATE, opcode::HOUSE_CREATE]);
}

#[test]
fn test_quest_records_gain_level_byte_at_183() {
    let (old, old_rx, _) = bind(ProtocolRevision::R174);
    let (new, new_rx, _) = bind(ProtocolRevision::R183);
    let q = quest();

    old.send_quest_entry(&q);
    new.send_quest_entry(&q);

    let before = &drain(&old_rx)[0];
    let after = &drain(&new_rx)[0];
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.payload[1], 42);
}

#[test]
fn test_keep_components_extended_at_190() {
    let (old, old_rx, _) = bind(ProtocolRevision::R183);
    let (new, new_rx, _) = bind(ProtocolRevision::R190);
    let k = keep(6);

    old.send_keep_components(&k).unwrap();
    new.send_keep_components(&k).unwrap();

    let before = &drain(&old_rx)[0];
    let after = &drain(&new_rx)[0];
    // Health and status bytes on each of the six records.
    assert_eq!(after.len(), before.len() + 2 * 6);
}

#[test]
fn test_keep_info_refuses_unset_realm() {
    let (codec, rx, _) = bind(ProtocolRevision::R190);
    let mut k = keep(1);
    k.realm = Realm::None;

    let err = codec.send_keep_info(&k).unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidRealm(0)));
    assert!(drain(&rx).is_empty());
}

#[test]
fn test_spell_effect_gains_subtype_at_190() {
    let (old, _, old_rx) = bind(ProtocolRevision::R183);
    let (new, _, new_rx) = bind(ProtocolRevision::R190);

    old.send_spell_effect(ObjectId(1), 4_100, ObjectId(2), true);
    new.send_spell_effect(ObjectId(1), 4_100, ObjectId(2), true);

    let before = &drain(&old_rx)[0];
    let after = &drain(&new_rx)[0];
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.payload[8], 1);
}

#[test]
fn test_spell_effect_sequence_advances_per_session() {
    let (codec, _, rx) = bind(ProtocolRevision::R168);

    codec.send_spell_effect(ObjectId(1), 4_100, ObjectId(2), true);
    codec.send_spell_effect(ObjectId(1), 4_100, ObjectId(2), false);

    let packets = drain(&rx);
    assert_eq!(&packets[0].payload[6..8], &[0, 0]);
    assert_eq!(&packets[1].payload[6..8], &[0, 1]);
}

#[test]
fn test_realm_rejects_unset() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    assert!(matches!(
        codec.send_realm(Realm::None),
        Err(ProtocolError::InvalidRealm(0))
    ));
    codec.send_realm(Realm::Night).unwrap();
    let packets = drain(&rx);
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].payload, vec![3]);
}

#[test]
fn test_session_id_rides_reversed_byte_order() {
    let (codec, rx, _) = bind(ProtocolRevision::R168);
    codec.send_session_id(SessionId(0x41AB));
    assert_eq!(drain(&rx)[0].payload, vec![0xAB, 0x41]);
}
