//! Discord music bot: "now playing" embeds, player-thread notices and the
//! `/music` subcommand family.

use std::sync::{Arc, LazyLock};

use poise::serenity_prelude as serenity;
use tracing::{info, warn};

pub mod commands;
pub mod config;

use commands::music::audio_sources::{VideoInfoApi, youtube::YtDlpApi};
use commands::music::utils::{
    average_color::ThumbnailColor,
    embedded_messages::PlayerEmbeds,
    emoji_registry::EmojiMap,
    music_manager::PlayerRegistry,
};
use config::Config;

pub use commands::music::utils::music_manager::MusicError;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// Shared HTTP client for thumbnail fetches and songbird's `yt-dlp` inputs.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub players: PlayerRegistry,
    pub embeds: Arc<PlayerEmbeds>,
    pub videos: Arc<dyn VideoInfoApi>,
}

impl Data {
    /// Wires the production collaborators together.
    ///
    /// Progress-bar glyphs come from the configured emoji guild when there is
    /// one, with the built-in unicode set filling any gaps.
    pub async fn initialise(ctx: &serenity::Context, config: &Config) -> Self {
        let mut emojis = EmojiMap::unicode_fallback();

        if let Some(guild_id) = config.emoji_guild_id {
            match EmojiMap::from_guild(&ctx.http, guild_id).await {
                Ok(guild_emojis) => {
                    info!(
                        "Loaded {} custom emojis from guild {}",
                        guild_emojis.len(),
                        guild_id
                    );
                    emojis = emojis.overlay(guild_emojis);
                }
                Err(e) => warn!("Failed to load emojis from guild {}: {}", guild_id, e),
            }
        }

        let videos: Arc<dyn VideoInfoApi> = Arc::new(YtDlpApi);
        let embeds = PlayerEmbeds::new(
            videos.clone(),
            Arc::new(ThumbnailColor::new(HTTP_CLIENT.clone())),
            Arc::new(emojis),
        )
        .with_progress_width(config.progress_bar_width);

        Self {
            players: PlayerRegistry::default(),
            embeds: Arc::new(embeds),
            videos,
        }
    }
}
