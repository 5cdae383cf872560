//! # Duskhold Protocol - The Outbound Wire
//!
//! Version-differential outbound codec for the Duskhold game server.
//!
//! ## Architecture
//!
//! The live population spans years of incompatible client builds, so the
//! server speaks every shipped protocol revision simultaneously:
//!
//! - **Writer**: opcode-headed byte buffer, dual byte order, patch-back
//!   seeking for count fields written after their elements
//! - **Projection**: pure encoders from simulation state to wire records
//!   (items, skills, effects), parameterized by per-message wire shapes
//! - **Segmentation**: list messages split under per-message byte budgets,
//!   continuation-flagged so the client keeps its window open
//! - **Codecs**: one flat operation table per revision; later revisions
//!   patch only the entries whose layout changed
//! - **Registry**: binds a session to its revision's folded table after the
//!   handshake
//! - **Cache**: per-session update suppression keyed by region and entity
//!
//! ## Concurrency Model
//!
//! A bound [`SessionCodec`] is immutable apart from its update cache and
//! the projected trainer window, both internally synchronized; simulation
//! threads may push updates for independent entities concurrently.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use duskhold_protocol::{ChannelTransport, CodecRegistry, ProtocolRevision};
//!
//! let registry = CodecRegistry::standard();
//! let (transport, reliable, _unreliable) = ChannelTransport::new();
//! let codec = registry.create_codec(ProtocolRevision::R1105, Arc::new(transport))?;
//!
//! codec.send_game_open();
//! let packet = reliable.recv()?;
//! ```

#![deny(unsafe_code)]

pub mod cache;
pub mod codec;
pub mod error;
pub mod project;
pub mod registry;
pub mod segment;
pub mod transport;
pub mod writer;

pub use cache::{EntityKey, UpdateCache};
pub use codec::{
    ChatChannel, CodecOps, LoginColors, LoginDenyReason, ProtocolRevision, SessionCodec,
    SERVER_NAME,
};
pub use error::ProtocolError;
pub use registry::CodecRegistry;
pub use transport::{ChannelTransport, NullTransport, Transport, TransportClass};
pub use writer::{ByteOrder, Packet, PacketWriter, MAX_PAYLOAD};
