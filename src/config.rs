//! Runtime configuration read from the environment (and `.env` via `dotenv`).

use std::env;

use poise::serenity_prelude::GuildId;

use crate::commands::music::utils::music_manager::{MusicError, MusicResult};
use crate::commands::music::utils::progress_bar;

/// Bot settings gathered at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Discord bot token (`DISCORD_TOKEN`).
    pub discord_token: String,
    /// Guild to register commands in instead of globally (`DEV_GUILD_ID`).
    pub dev_guild_id: Option<GuildId>,
    /// Guild whose custom emojis provide the progress-bar glyphs (`EMOJI_GUILD_ID`).
    pub emoji_guild_id: Option<GuildId>,
    /// Number of cells in the "now playing" progress bar (`PROGRESS_BAR_WIDTH`).
    pub progress_bar_width: usize,
}

impl Config {
    pub fn from_env() -> MusicResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any key lookup, mainly so tests don't
    /// have to touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MusicResult<Self> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| MusicError::ConfigError("Missing DISCORD_TOKEN".to_string()))?;

        let dev_guild_id = lookup("DEV_GUILD_ID")
            .map(|value| parse_guild_id("DEV_GUILD_ID", &value))
            .transpose()?;

        let emoji_guild_id = lookup("EMOJI_GUILD_ID")
            .map(|value| parse_guild_id("EMOJI_GUILD_ID", &value))
            .transpose()?;

        let progress_bar_width = match lookup("PROGRESS_BAR_WIDTH") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(width) if width > 0 => width,
                _ => {
                    return Err(MusicError::ConfigError(format!(
                        "PROGRESS_BAR_WIDTH must be a positive integer, got '{}'",
                        value
                    )));
                }
            },
            None => progress_bar::DEFAULT_WIDTH,
        };

        Ok(Self {
            discord_token,
            dev_guild_id,
            emoji_guild_id,
            progress_bar_width,
        })
    }
}

fn parse_guild_id(name: &str, value: &str) -> MusicResult<GuildId> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(GuildId::new(id)),
        _ => Err(MusicError::ConfigError(format!(
            "{} must be a non-zero guild id, got '{}'",
            name, value
        ))),
    }
}
