//! # Guilds

/// Guild state shown in the guild window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuildInfo {
    /// Guild name.
    pub name: String,
    /// Message of the day.
    pub motd: String,
    /// Guild emblem; 17 bits, bit 16 marks the extended emblem set.
    pub emblem: u32,
    /// Guild level.
    pub level: u8,
}
