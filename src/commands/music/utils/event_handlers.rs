use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::async_trait;
use songbird::input::YoutubeDl;
use songbird::tracks::TrackResult;
use tracing::{debug, error, info, warn};

use crate::{
    Data, HTTP_CLIENT,
    commands::music::utils::{
        embedded_messages::{PlayerEmbeds, SongChanged, ThreadChannel},
        music_manager::{MusicError, MusicResult, PlayerRegistry},
        player_state::{GuildPlayer, PlayerSnapshot},
    },
};

/// Event handler for when a song ends
#[derive(Clone)]
pub struct SongEndNotifier {
    pub ctx: serenity::Context,
    pub guild_id: serenity::GuildId,
    pub call: Arc<serenity::prelude::Mutex<songbird::Call>>,
    pub players: PlayerRegistry,
    pub embeds: Arc<PlayerEmbeds>,
    /// `GuildPlayer::track_serial` of the track this handler watches.
    pub track_serial: u64,
}

impl SongEndNotifier {
    pub fn new(
        ctx: &serenity::Context,
        guild_id: serenity::GuildId,
        call: Arc<serenity::prelude::Mutex<songbird::Call>>,
        data: &Data,
    ) -> Self {
        Self {
            ctx: ctx.clone(),
            guild_id,
            call,
            players: data.players.clone(),
            embeds: data.embeds.clone(),
            track_serial: 0,
        }
    }
}

#[async_trait]
impl songbird::EventHandler for SongEndNotifier {
    async fn act(&self, ctx: &songbird::EventContext<'_>) -> Option<songbird::Event> {
        if let songbird::EventContext::Track(_) = ctx {
            self.handle_track_end().await;
        }
        None
    }
}

impl SongEndNotifier {
    async fn handle_track_end(&self) {
        info!("Track ended for guild {}", self.guild_id);

        let player = self.players.get(self.guild_id);
        let mut player = player.lock().await;

        if player.track_serial != self.track_serial {
            debug!("Ignoring end of a replaced track in guild {}", self.guild_id);
            return;
        }

        if player.advance().is_none() {
            info!("No more tracks in queue for guild {}", self.guild_id);
            return;
        }

        let snapshot = match play_current(self, &mut player).await {
            Ok(true) => player.snapshot(),
            Ok(false) => return,
            Err(e) => {
                error!("Failed to play next track for guild {}: {}", self.guild_id, e);
                return;
            }
        };
        drop(player);

        self.announce(&snapshot).await;
    }

    /// Posts the "song changed" embed for the new head. Failures only cost
    /// the announcement.
    async fn announce(&self, player: &PlayerSnapshot) {
        let http = self.ctx.http.clone();
        let outcome = self
            .embeds
            .song_changed(player, |thread_id| ThreadChannel::new(http, thread_id))
            .await;

        match outcome {
            Ok(SongChanged::Sent) => {}
            Ok(SongChanged::NoThread) => {
                debug!("Guild {} has no player thread", self.guild_id)
            }
            Ok(SongChanged::Skipped(reason)) => {
                debug!("Song change not announced: {:?}", reason)
            }
            Err(e) => warn!("Failed to announce song change: {}", e),
        }
    }
}

/// Starts the head of `player`'s queue on the guild's call and hooks up the
/// end-of-track handler. Returns false if the queue is empty.
pub async fn play_current(notifier: &SongEndNotifier, player: &mut GuildPlayer) -> MusicResult<bool> {
    let Some(current) = player.queue.front() else {
        return Ok(false);
    };
    let url = current.song.url.clone();
    let seek = current.song.seek;

    info!("Playing {} in guild {}", url, notifier.guild_id);
    let input = YoutubeDl::new(HTTP_CLIENT.clone(), url);

    let track_handle = {
        let mut handler = notifier.call.lock().await;
        handler.play_input(input.into())
    };

    player.track_serial += 1;

    if let Some(seconds) = seek.filter(|&seconds| seconds > 0) {
        debug!("Seeking to {}s", seconds);
        let callback = track_handle.seek(Duration::from_secs(seconds));
        let players = notifier.players.clone();
        let guild_id = notifier.guild_id;
        let serial = player.track_serial;
        tokio::spawn(async move {
            seek_finished(&players, guild_id, serial, callback.result_async().await).await;
        });
    }

    let end_handler = SongEndNotifier {
        track_serial: player.track_serial,
        ..notifier.clone()
    };

    track_handle
        .add_event(
            songbird::Event::Track(songbird::TrackEvent::End),
            end_handler,
        )
        .map_err(|e| MusicError::Playback(e.to_string()))?;

    player.audio_player = Some(Arc::new(track_handle));
    player.status.is_paused = false;

    Ok(true)
}

/// Logs how a seek on the track numbered `serial` went. A failed seek leaves
/// the track at its start, so the offset is dropped from the progress shown.
async fn seek_finished(
    players: &PlayerRegistry,
    guild_id: serenity::GuildId,
    serial: u64,
    result: TrackResult<Duration>,
) {
    match result {
        Ok(position) => debug!("Seeked to {:?} in guild {}", position, guild_id),
        Err(e) => {
            warn!("Seek failed in guild {}: {}", guild_id, e);
            let player = players.get(guild_id);
            let mut player = player.lock().await;
            if player.track_serial == serial {
                player.clear_seek();
            }
        }
    }
}
