//! # Protocol Error Types
//!
//! Every error here is a caller bug or a session-setup rejection; nothing in
//! the send path itself is fallible at runtime (missing entities become
//! placeholders, long names are truncated).

use duskhold_world::InvalidRealm;
use thiserror::Error;

/// Errors surfaced by the outbound protocol layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A session declared a protocol revision no codec is registered for.
    /// Fatal for that session only; the connection is rejected at setup.
    #[error("unknown protocol revision: {0}")]
    UnknownRevision(u32),

    /// A realm-scoped operation was handed an unset or invalid realm.
    /// This is a programming error in the caller, not a user condition.
    #[error("invalid realm passed to realm-scoped operation: {0}")]
    InvalidRealm(u8),

    /// A finished packet exceeded the protocol's maximum payload size.
    /// Segmentation prevents this by construction; seeing it means a latent
    /// defect in an encoder, not a recoverable runtime condition.
    #[error("payload overflow on opcode {opcode:#04x}: {len} bytes")]
    PayloadOverflow {
        /// Opcode of the oversized packet.
        opcode: u8,
        /// Payload length that was reached.
        len: usize,
    },
}

impl From<InvalidRealm> for ProtocolError {
    fn from(err: InvalidRealm) -> Self {
        Self::InvalidRealm(err.0)
    }
}
