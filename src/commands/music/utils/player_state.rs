//! Per-guild player state read by the embed builders and mutated by the
//! subcommands and the track-end handler.

use poise::serenity_prelude::ChannelId;
use serenity::async_trait;
use songbird::tracks::TrackHandle;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::music_manager::{MusicError, MusicResult};
use crate::commands::music::audio_sources::SongSource;

/// What was asked to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRequest {
    pub url: String,
    pub source: SongSource,
    /// Start offset in seconds.
    pub seek: Option<u64>,
}

/// A queue entry: the request and who made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedSong {
    pub song: SongRequest,
    /// Display name of the requester.
    pub user: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    pub is_paused: bool,
    pub on_repeat: bool,
}

/// The running track, as far as the player needs to see it.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Time spent playing since the track started, not counting any seek.
    async fn playback_position(&self) -> Duration;
    fn pause_playback(&self) -> MusicResult<()>;
    fn resume_playback(&self) -> MusicResult<()>;
    fn stop_playback(&self) -> MusicResult<()>;
}

#[async_trait]
impl AudioPlayer for TrackHandle {
    async fn playback_position(&self) -> Duration {
        self.get_info()
            .await
            .map(|state| state.play_time)
            .unwrap_or_default()
    }

    fn pause_playback(&self) -> MusicResult<()> {
        self.pause().map_err(|e| MusicError::Playback(e.to_string()))
    }

    fn resume_playback(&self) -> MusicResult<()> {
        self.play().map_err(|e| MusicError::Playback(e.to_string()))
    }

    fn stop_playback(&self) -> MusicResult<()> {
        self.stop().map_err(|e| MusicError::Playback(e.to_string()))
    }
}

/// Everything the bot tracks for one guild. The head of `queue` is the song
/// currently playing (or about to).
#[derive(Default)]
pub struct GuildPlayer {
    pub queue: VecDeque<QueuedSong>,
    pub status: PlayerStatus,
    pub audio_player: Option<Arc<dyn AudioPlayer>>,
    /// Discussion thread announcements are posted to.
    pub player_thread: Option<ChannelId>,
    /// Set by `/music skip` so a repeating head is still dropped when it ends.
    pub skip_requested: bool,
    /// Bumped whenever a track is started or the player is reset, so the end
    /// of a track that was already replaced can be told apart.
    pub track_serial: u64,
}

impl GuildPlayer {
    /// The current song, or `EmptyQueue`.
    pub fn head(&self) -> MusicResult<&QueuedSong> {
        self.queue.front().ok_or(MusicError::EmptyQueue)
    }

    /// Songs waiting behind the head.
    pub fn upcoming(&self) -> impl Iterator<Item = &QueuedSong> {
        self.queue.iter().skip(1)
    }

    /// Called when the current track ends: drops the head unless it should
    /// repeat, and clears per-track state. Returns the new head.
    pub fn advance(&mut self) -> Option<&QueuedSong> {
        let skipped = std::mem::take(&mut self.skip_requested);
        if !self.status.on_repeat || skipped {
            self.queue.pop_front();
        }
        self.audio_player = None;
        self.status.is_paused = false;
        self.queue.front()
    }

    /// Drops the start offset of the current song, for when the seek did not
    /// take.
    pub fn clear_seek(&mut self) {
        if let Some(head) = self.queue.front_mut() {
            head.song.seek = None;
        }
    }

    /// Copies what the embed builders read, so the lock can be released
    /// before any metadata is fetched.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current: self.queue.front().cloned(),
            status: self.status,
            queue_len: self.queue.len(),
            audio_player: self.audio_player.clone(),
            player_thread: self.player_thread,
        }
    }

    /// Forgets the queue and playback state; the thread is kept.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.status = PlayerStatus::default();
        self.audio_player = None;
        self.skip_requested = false;
        self.track_serial += 1;
    }
}

/// An owned copy of the parts of a [`GuildPlayer`] shown in the embeds.
#[derive(Clone, Default)]
pub struct PlayerSnapshot {
    pub current: Option<QueuedSong>,
    pub status: PlayerStatus,
    /// Length of the queue including the current song.
    pub queue_len: usize,
    pub audio_player: Option<Arc<dyn AudioPlayer>>,
    pub player_thread: Option<ChannelId>,
}

impl PlayerSnapshot {
    pub fn head(&self) -> MusicResult<&QueuedSong> {
        self.current.as_ref().ok_or(MusicError::EmptyQueue)
    }

    /// Songs waiting behind the current one.
    pub fn waiting(&self) -> usize {
        self.queue_len.saturating_sub(1)
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FixedPosition(pub Duration);

#[cfg(test)]
#[async_trait]
impl AudioPlayer for FixedPosition {
    async fn playback_position(&self) -> Duration {
        self.0
    }

    fn pause_playback(&self) -> MusicResult<()> {
        Ok(())
    }

    fn resume_playback(&self) -> MusicResult<()> {
        Ok(())
    }

    fn stop_playback(&self) -> MusicResult<()> {
        Ok(())
    }
}
