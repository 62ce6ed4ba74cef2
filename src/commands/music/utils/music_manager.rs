use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::all::{ChannelType, CreateThread};
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::{Call, Songbird};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use super::player_state::GuildPlayer;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("The queue is empty")]
    EmptyQueue,

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Audio source error: {0}")]
    AudioSourceError(String),

    #[error("Colour extraction error: {0}")]
    ColorError(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Name of the thread created to hold player announcements.
pub const PLAYER_THREAD_NAME: &str = "🎶 Music player";

/// Per-guild players. Each guild's player sits behind its own mutex, so
/// everything touching one guild is serialised while guilds stay independent.
#[derive(Clone, Default)]
pub struct PlayerRegistry {
    players: Arc<DashMap<GuildId, Arc<Mutex<GuildPlayer>>>>,
}

impl PlayerRegistry {
    /// The player for `guild_id`, created empty on first use.
    pub fn get(&self, guild_id: GuildId) -> Arc<Mutex<GuildPlayer>> {
        self.players.entry(guild_id).or_default().clone()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.players.len()
    }
}

/// Songbird and Discord helpers shared by the music commands
pub struct MusicManager;

impl MusicManager {
    /// Get the Songbird voice client from the context
    pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
        songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
    }

    /// Get the current voice channel call handle
    pub async fn get_call(
        ctx: &Context,
        guild_id: GuildId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let songbird = Self::get_songbird(ctx).await?;
        songbird.get(guild_id).ok_or(MusicError::NotConnected)
    }

    /// Join a voice channel
    pub async fn join_channel(
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let songbird = Self::get_songbird(ctx).await?;

        let handle = songbird
            .join(guild_id, channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;

        info!("Joined voice channel {} in guild {}", channel_id, guild_id);
        Ok(handle)
    }

    /// The existing call for the guild, or a fresh one in `channel_id`.
    pub async fn get_or_join_call(
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        match Self::get_call(ctx, guild_id).await {
            Ok(call) => Ok(call),
            Err(MusicError::NotConnected) => Self::join_channel(ctx, guild_id, channel_id).await,
            Err(e) => Err(e),
        }
    }

    /// Leave a voice channel
    pub async fn leave_channel(ctx: &Context, guild_id: GuildId) -> MusicResult<()> {
        let songbird = Self::get_songbird(ctx).await?;

        // Check if we're in a voice channel
        if songbird.get(guild_id).is_none() {
            return Err(MusicError::NotConnected);
        }

        songbird
            .remove(guild_id)
            .await
            .map_err(|_| MusicError::JoinError("Failed to leave voice channel".to_string()))?;

        Ok(())
    }

    /// Get the voice channel ID that the user is currently in
    pub fn get_user_voice_channel(
        ctx: &Context,
        guild_id: GuildId,
        user_id: serenity::UserId,
    ) -> MusicResult<ChannelId> {
        let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

        let voice_state = guild
            .voice_states
            .get(&user_id)
            .ok_or(MusicError::UserNotInVoiceChannel)?;

        voice_state
            .channel_id
            .ok_or(MusicError::UserNotInVoiceChannel)
    }

    /// Opens the public thread player announcements are posted to.
    pub async fn open_player_thread(ctx: &Context, channel_id: ChannelId) -> MusicResult<ChannelId> {
        let thread = channel_id
            .create_thread(
                ctx,
                CreateThread::new(PLAYER_THREAD_NAME).kind(ChannelType::PublicThread),
            )
            .await?;

        info!("Opened player thread {} in channel {}", thread.id, channel_id);
        Ok(thread.id)
    }
}
