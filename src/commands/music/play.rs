use super::*;
use crate::commands::music::{
    audio_sources::{AudioSource, ensure_playable},
    utils::{
        event_handlers::{SongEndNotifier, play_current},
        player_state::{QueuedSong, SongRequest},
    },
};

/// Play a song from a YouTube link or a search query
#[poise::command(slash_command, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "YouTube URL or search query"] query: String,
    #[description = "Start position in seconds"] seek: Option<u64>,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let guild_id = guild_of(&ctx)?;

    // Get the user's voice channel
    let user_id = ctx.author().id;
    let channel_id =
        match MusicManager::get_user_voice_channel(ctx.serenity_context(), guild_id, user_id) {
            Ok(channel_id) => channel_id,
            Err(err) => {
                ctx.send(embedded_messages::user_not_in_voice_channel(err))
                    .await?;
                return Ok(());
            }
        };

    // Defer the response since searching and joining might take time
    ctx.defer().await?;

    let url = if AudioSource::is_url(&query) {
        query
    } else {
        match ctx.data().videos.search(&query).await {
            Ok(url) => url,
            Err(err) => {
                ctx.send(embedded_messages::failed_to_process_audio_source(err))
                    .await?;
                return Ok(());
            }
        }
    };

    let source = match ensure_playable(&url) {
        Ok(source) => source,
        Err(err) => {
            info!("Rejecting link: {}", err);
            ctx.send(embedded_messages::unsupported_source(err)).await?;
            return Ok(());
        }
    };

    let call =
        match MusicManager::get_or_join_call(ctx.serenity_context(), guild_id, channel_id).await {
            Ok(call) => call,
            Err(err) => {
                ctx.send(embedded_messages::failed_to_join_voice_channel(err))
                    .await?;
                return Ok(());
            }
        };

    let data = ctx.data();
    let player = data.players.get(guild_id);

    // The thread is opened without holding the player lock
    let opened_thread = if player.lock().await.player_thread.is_none() {
        match MusicManager::open_player_thread(ctx.serenity_context(), ctx.channel_id()).await {
            Ok(thread_id) => Some(thread_id),
            Err(e) => {
                warn!("Failed to open player thread in guild {}: {}", guild_id, e);
                None
            }
        }
    } else {
        None
    };

    let mut player = player.lock().await;
    if player.player_thread.is_none() {
        player.player_thread = opened_thread;
    }

    player.queue.push_back(QueuedSong {
        song: SongRequest {
            url: url.clone(),
            source,
            seek,
        },
        user: ctx.author().display_name().to_string(),
    });
    let position = player.queue.len() - 1;
    debug!("Queued {} at position {} in guild {}", url, position, guild_id);

    // If nothing is currently playing, start playback
    if player.audio_player.is_none() {
        let notifier = SongEndNotifier::new(ctx.serenity_context(), guild_id, call, data);
        play_current(&notifier, &mut player).await?;
    }

    let snapshot = player.snapshot();
    drop(player);

    let reply = if position == 0 {
        now_playing_reply(&ctx, &snapshot).await
    } else {
        None
    };
    let player_thread = snapshot.player_thread;

    ctx.send(reply.unwrap_or_else(|| embedded_messages::added_to_queue(&url, position)))
        .await?;

    notify(&ctx, player_thread, format!("🎵 Added <{}> to the queue", url)).await;

    Ok(())
}
