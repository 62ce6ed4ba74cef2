//! Music playback commands: the `/music` parent command and its subcommands.

pub mod audio_sources;
pub mod utils;

mod pause;
mod play;
mod queue;
mod skip;
mod stop;

use poise::{CreateReply, serenity_prelude as serenity};
use tracing::{debug, info, warn};

use crate::{CommandResult, Context};
use utils::{
    embedded_messages::{self, EmbedAuthor, NoticeOptions, NowPlaying, notify_thread},
    music_manager::{MusicError, MusicManager},
    player_state::PlayerSnapshot,
};

/// The five handlers `/music` dispatches to, under one import surface.
pub mod subcommands {
    pub use super::pause::pause;
    pub use super::play::play;
    pub use super::queue::queue;
    pub use super::skip::skip;
    pub use super::stop::stop;
}

use subcommands::{pause, play, queue, skip, stop};

/// Music playback controls
#[poise::command(
    slash_command,
    guild_only,
    category = "Music",
    subcommands("pause", "play", "queue", "skip", "stop"),
    subcommand_required
)]
pub async fn music(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

/// Guild the command was invoked in, as a music error when there is none.
fn guild_of(ctx: &Context<'_>) -> Result<serenity::GuildId, MusicError> {
    ctx.guild_id().ok_or(MusicError::NotInGuild)
}

/// The "now playing" embed as a reply, or `None` when it cannot be built.
async fn now_playing_reply(ctx: &Context<'_>, player: &PlayerSnapshot) -> Option<CreateReply> {
    match ctx.data().embeds.now_playing(player).await {
        Ok(NowPlaying::Ready(embed)) => Some(CreateReply::default().embed(embed.into())),
        Ok(NowPlaying::Skipped(reason)) => {
            debug!("Now playing embed skipped: {:?}", reason);
            None
        }
        Err(e) => {
            warn!("Failed to build now playing embed: {}", e);
            None
        }
    }
}

/// Signs a notice with the invoking user and posts it to the player thread.
async fn notify(ctx: &Context<'_>, player_thread: Option<serenity::ChannelId>, description: String) {
    notify_thread(
        ctx.serenity_context().http.clone(),
        player_thread,
        EmbedAuthor::from(ctx.author()),
        NoticeOptions::new(description),
    )
    .await;
}
