use super::*;

/// Show the current track and the queue, optionally toggling repeat
#[poise::command(slash_command, category = "Music")]
pub async fn queue(
    ctx: Context<'_>,
    #[description = "Repeat the current song"] repeat: Option<bool>,
) -> CommandResult {
    let guild_id = guild_of(&ctx)?;

    ctx.defer().await?;

    let player = ctx.data().players.get(guild_id);
    let mut player = player.lock().await;

    if player.queue.is_empty() {
        drop(player);
        ctx.send(embedded_messages::queue_is_empty()).await?;
        return Ok(());
    }

    if let Some(repeat) = repeat {
        player.status.on_repeat = repeat;
        info!("Repeat set to {} in guild {}", repeat, guild_id);
    }

    let snapshot = player.snapshot();
    let up_next = embedded_messages::up_next(&player);
    drop(player);

    let reply = now_playing_reply(&ctx, &snapshot)
        .await
        .unwrap_or_default()
        .embed(up_next.into());

    ctx.send(reply).await?;

    Ok(())
}
