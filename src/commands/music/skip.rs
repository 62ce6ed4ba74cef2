use super::*;

/// Skip the current track
#[poise::command(slash_command, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_of(&ctx)?;

    // Get the current voice call
    if let Err(err) = MusicManager::get_call(ctx.serenity_context(), guild_id).await {
        ctx.send(embedded_messages::bot_not_in_voice_channel(err))
            .await?;
        return Ok(());
    }

    let player = ctx.data().players.get(guild_id);
    let mut player = player.lock().await;

    let current_url = player.head().ok().map(|current| current.song.url.clone());
    let (Some(audio_player), Some(url)) = (player.audio_player.clone(), current_url) else {
        drop(player);
        ctx.send(embedded_messages::no_track_to_skip()).await?;
        return Ok(());
    };

    // The track-end handler drops the head and starts the next song
    player.skip_requested = true;
    audio_player.stop_playback()?;
    info!("Skipped {} in guild {}", url, guild_id);

    let player_thread = player.player_thread;
    drop(player);

    ctx.send(embedded_messages::skipped(&url)).await?;
    notify(&ctx, player_thread, format!("⏭️ Skipped <{}>", url)).await;

    Ok(())
}
