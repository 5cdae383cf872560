//! # Duskhold World
//!
//! Shared domain types consumed by the outbound protocol layer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - the protocol crate (encoders project *from* these types, never back)
//! - any I/O or transport crate
//!
//! The simulation owns these values; the protocol layer only reads them.

#![deny(unsafe_code)]

pub mod actor;
pub mod effect;
pub mod guild;
pub mod house;
pub mod ids;
pub mod item;
pub mod keep;
pub mod quest;
pub mod roster;
pub mod skill;

pub use actor::{NpcState, PlayerState, Resists, WorldObject, WorldPos};
pub use effect::SpellEffect;
pub use guild::GuildInfo;
pub use house::{House, InteriorItem};
pub use ids::{HouseId, InvalidRealm, KeepId, ObjectId, Realm, RegionId, SessionId};
pub use item::{DamageType, HandUsage, Item, ItemKind};
pub use keep::{Keep, KeepComponent};
pub use quest::QuestEntry;
pub use roster::{ConcentrationList, GroupMember, GroupRoster, TradeState, TradeWindow};
pub use skill::{Skill, SkillPage, TrainableSpec};
