use super::*;

/// Stop the music, clear the queue, and leave the voice channel
#[poise::command(slash_command, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let guild_id = guild_of(&ctx)?;

    // Get the current voice call
    if let Err(err) = MusicManager::get_call(ctx.serenity_context(), guild_id).await {
        ctx.send(embedded_messages::bot_not_in_voice_channel(err))
            .await?;
        return Ok(());
    }

    let player = ctx.data().players.get(guild_id);
    let mut player = player.lock().await;

    // Stop the current track if there is one
    if let Some(audio_player) = player.audio_player.take() {
        if let Err(e) = audio_player.stop_playback() {
            warn!("Failed to stop track in guild {}: {}", guild_id, e);
        }
    }
    player.reset();

    let player_thread = player.player_thread;
    drop(player);

    // Attempt to leave the voice channel
    if let Err(e) = MusicManager::leave_channel(ctx.serenity_context(), guild_id).await {
        // Log the error but continue, as the main goal (stopping) is achieved
        warn!("Failed to leave voice channel during stop: {}", e);
    }

    ctx.send(embedded_messages::stopped()).await?;
    notify(&ctx, player_thread, "⏹️ Stopped the music".to_string()).await;

    Ok(())
}
