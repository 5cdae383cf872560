//! # Quest Journal

/// One journal entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestEntry {
    /// Journal index the client addresses this entry by.
    pub index: u8,
    /// Quest name.
    pub name: String,
    /// Current step description.
    pub description: String,
    /// Suggested level.
    pub level: u8,
    /// Current step number.
    pub step: u8,
}
