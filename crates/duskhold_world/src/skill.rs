//! # Skills
//!
//! Trained abilities, specializations, combat styles and spells. The client
//! renders them in pages; the wire carries the page code with every record.

/// Which client-side page a skill lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum SkillPage {
    /// Passive and active abilities.
    #[default]
    Abilities = 0,
    /// Trainable specialization lines.
    Specialization = 1,
    /// Combat styles.
    Styles = 2,
    /// Castable spells.
    Spells = 3,
}

impl SkillPage {
    /// Wire code for this page.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// One entry of a character's skill table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Skill {
    /// Skill id.
    pub id: u16,
    /// Display name.
    pub name: String,
    /// Trained level.
    pub level: u8,
    /// Page the client shows it on.
    pub page: SkillPage,
    /// Icon number.
    pub icon: u16,
}

/// One line offered by a trainer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainableSpec {
    /// Display name of the line.
    pub name: String,
    /// Current trained level.
    pub level: u8,
    /// Point cost of the next level.
    pub cost: u16,
}
