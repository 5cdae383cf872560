//! # Spell Effects
//!
//! Active effects shown in the client's effect bar and concentration window.

/// An active effect on a living entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellEffect {
    /// Icon number shown in the effect bar.
    pub icon: u16,
    /// Display name.
    pub name: String,
    /// Remaining duration in seconds; 0 for permanent effects.
    pub remaining_secs: u16,
    /// True for harmful effects.
    pub debuff: bool,
    /// True while the immunity timer runs after the effect expired.
    pub immunity: bool,
}
