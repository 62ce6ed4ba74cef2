use super::*;

/// Pause or resume the current track
#[poise::command(slash_command, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_of(&ctx)?;

    // Get the current voice call
    if let Err(err) = MusicManager::get_call(ctx.serenity_context(), guild_id).await {
        ctx.send(embedded_messages::bot_not_in_voice_channel(err))
            .await?;
        return Ok(());
    }

    let player = ctx.data().players.get(guild_id);
    let mut player = player.lock().await;

    let Some(audio_player) = player.audio_player.clone() else {
        drop(player);
        ctx.send(embedded_messages::no_track_playing()).await?;
        return Ok(());
    };

    let (reply, notice) = if player.status.is_paused {
        audio_player.resume_playback()?;
        player.status.is_paused = false;
        (embedded_messages::resumed(), "▶️ Resumed the music")
    } else {
        audio_player.pause_playback()?;
        player.status.is_paused = true;
        (embedded_messages::paused(), "⏸️ Paused the music")
    };
    info!("{} in guild {}", notice, guild_id);

    let player_thread = player.player_thread;
    drop(player);

    ctx.send(reply).await?;
    notify(&ctx, player_thread, notice.to_string()).await;

    Ok(())
}
