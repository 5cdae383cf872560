//! # Codec Registry
//!
//! Maps the revision a client declares during the handshake to a bound
//! [`SessionCodec`]. Each registered revision contributes a patch over the
//! baseline operation table; binding folds every patch at or below the
//! requested revision, oldest first, so an operation no revision retouched
//! keeps the nearest earlier layout.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::codec::{
    rev1105, rev168, rev174, rev183, rev190, CodecOps, ProtocolRevision, SessionCodec,
};
use crate::error::ProtocolError;
use crate::transport::Transport;

type OpsPatch = fn(&mut CodecOps);

fn baseline_patch(_ops: &mut CodecOps) {}

/// Registry of the revisions this server agrees to speak.
pub struct CodecRegistry {
    patches: BTreeMap<ProtocolRevision, OpsPatch>,
}

impl CodecRegistry {
    /// An empty registry. Use [`CodecRegistry::standard`] unless a test
    /// needs a trimmed set.
    #[must_use]
    pub fn new() -> Self {
        Self { patches: BTreeMap::new() }
    }

    /// All shipped revisions.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(ProtocolRevision::R168, baseline_patch);
        registry.register(ProtocolRevision::R174, rev174::apply);
        registry.register(ProtocolRevision::R183, rev183::apply);
        registry.register(ProtocolRevision::R190, rev190::apply);
        registry.register(ProtocolRevision::R1105, rev1105::apply);
        registry
    }

    /// Adds (or replaces) a revision's patch.
    pub fn register(&mut self, revision: ProtocolRevision, patch: OpsPatch) {
        self.patches.insert(revision, patch);
    }

    /// Revisions currently accepted, ascending.
    #[must_use]
    pub fn revisions(&self) -> Vec<ProtocolRevision> {
        self.patches.keys().copied().collect()
    }

    /// Binds a codec for one session.
    ///
    /// Only declared revisions are accepted: a client between two shipped
    /// revisions is running a build the server was never tested against.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownRevision`] when `revision` was never
    /// registered.
    pub fn create_codec(
        &self,
        revision: ProtocolRevision,
        transport: Arc<dyn Transport>,
    ) -> Result<SessionCodec, ProtocolError> {
        if !self.patches.contains_key(&revision) {
            return Err(ProtocolError::UnknownRevision(revision.0));
        }

        let mut ops = rev168::ops();
        for patch in self.patches.range(..=revision).map(|(_, patch)| patch) {
            patch(&mut ops);
        }

        info!(%revision, "session codec created");
        Ok(SessionCodec::new(revision, ops, transport))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
