use poise::{CreateReply, serenity_prelude as serenity};
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage, Http, Timestamp,
    User,
};
use serenity::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    average_color::ColorExtractor,
    emoji_registry::EmojiRegistry,
    format_millis,
    music_manager::{MusicError, MusicResult},
    number_with_spaces,
    player_state::{GuildPlayer, PlayerSnapshot, QueuedSong},
    progress_bar,
};
use crate::commands::music::audio_sources::{SongSource, VideoDetails, VideoInfoApi};

/// Longest description a thread notice carries, in characters.
pub const THREAD_NOTICE_MAX_LEN: usize = 255;

/// Zero-width space; Discord rejects empty field values.
const BLANK: &str = "\u{200B}";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
    pub url: Option<String>,
}

impl From<&User> for EmbedAuthor {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            icon_url: Some(user.face()),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Everything an embed shows, kept as plain data until it is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedPayload {
    pub author: Option<EmbedAuthor>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    pub timestamp: Option<Timestamp>,
}

impl From<EmbedPayload> for CreateEmbed {
    fn from(payload: EmbedPayload) -> Self {
        let mut embed = CreateEmbed::new();

        if let Some(author) = payload.author {
            let mut builder = CreateEmbedAuthor::new(author.name);
            if let Some(icon_url) = author.icon_url {
                builder = builder.icon_url(icon_url);
            }
            if let Some(url) = author.url {
                builder = builder.url(url);
            }
            embed = embed.author(builder);
        }
        if let Some(title) = payload.title {
            embed = embed.title(title);
        }
        if let Some(url) = payload.url {
            embed = embed.url(url);
        }
        if let Some(description) = payload.description {
            embed = embed.description(description);
        }
        if let Some(color) = payload.color {
            embed = embed.color(color);
        }
        embed = embed.fields(
            payload
                .fields
                .into_iter()
                .map(|field| (field.name, field.value, field.inline)),
        );
        if let Some(thumbnail) = payload.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if let Some(footer) = payload.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        if let Some(timestamp) = payload.timestamp {
            embed = embed.timestamp(timestamp);
        }

        embed
    }
}

/// Somewhere an embed can be posted.
#[async_trait]
pub trait EmbedSink: Send + Sync {
    async fn send_embed(&self, embed: EmbedPayload) -> MusicResult<()>;
}

/// A Discord channel or thread reached over HTTP.
#[derive(Clone)]
pub struct ThreadChannel {
    pub http: Arc<Http>,
    pub channel_id: ChannelId,
}

impl ThreadChannel {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl EmbedSink for ThreadChannel {
    async fn send_embed(&self, embed: EmbedPayload) -> MusicResult<()> {
        self.channel_id
            .send_message(&*self.http, CreateMessage::new().embed(embed.into()))
            .await?;
        Ok(())
    }
}

/// Why a builder produced nothing without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The head of the queue comes from a source that is never rendered.
    UnsupportedSource,
    /// The video has no channel name or no channel icon.
    MissingChannelMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NowPlaying {
    Ready(EmbedPayload),
    Skipped(SkipReason),
}

impl NowPlaying {
    pub fn into_embed(self) -> Option<EmbedPayload> {
        match self {
            NowPlaying::Ready(embed) => Some(embed),
            NowPlaying::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongChanged {
    Sent,
    /// The guild has no player thread to announce in.
    NoThread,
    Skipped(SkipReason),
}

/// Builds the player embeds from fresh metadata on every call.
pub struct PlayerEmbeds {
    videos: Arc<dyn VideoInfoApi>,
    colors: Arc<dyn ColorExtractor>,
    emojis: Arc<dyn EmojiRegistry>,
    progress_width: usize,
}

impl PlayerEmbeds {
    pub fn new(
        videos: Arc<dyn VideoInfoApi>,
        colors: Arc<dyn ColorExtractor>,
        emojis: Arc<dyn EmojiRegistry>,
    ) -> Self {
        Self {
            videos,
            colors,
            emojis,
            progress_width: progress_bar::DEFAULT_WIDTH,
        }
    }

    pub fn with_progress_width(mut self, width: usize) -> Self {
        self.progress_width = width;
        self
    }

    /// The "now playing" embed for the head of the queue.
    ///
    /// Returns `Skipped` when the head cannot be rendered (unsupported
    /// source, incomplete channel metadata) and `Err` when a collaborator
    /// fails. Nothing is sent.
    pub async fn now_playing(&self, player: &PlayerSnapshot) -> MusicResult<NowPlaying> {
        let current = player.head()?;
        if let Some(reason) = unsupported(current) {
            return Ok(NowPlaying::Skipped(reason));
        }

        let details = self.videos.video_info(&current.song.url).await?;

        let Some(channel) = details.channel.as_ref() else {
            debug!("No channel metadata for {}", details.url);
            return Ok(NowPlaying::Skipped(SkipReason::MissingChannelMetadata));
        };
        let (Some(channel_name), Some(channel_icon)) = (&channel.name, &channel.icon) else {
            debug!("Incomplete channel metadata for {}", details.url);
            return Ok(NowPlaying::Skipped(SkipReason::MissingChannelMetadata));
        };

        let position = match &player.audio_player {
            Some(audio_player) => audio_player.playback_position().await,
            None => Duration::ZERO,
        };
        let elapsed_ms = (position.as_millis() as u64)
            .saturating_add(current.song.seek.unwrap_or(0).saturating_mul(1000));

        let bar = progress_bar::render(
            self.emojis.as_ref(),
            elapsed_ms,
            details.duration_ms(),
            self.progress_width,
        )
        .await;
        let color = self.thumbnail_color(&details).await?;

        let mut description = String::new();
        if player.status.is_paused {
            description.push_str("⏸️ | ");
        }
        if player.status.on_repeat {
            description.push_str("🔁 | ");
        }
        description.push_str(&format!(
            "🎧 {} {} {}",
            format_millis(elapsed_ms),
            bar,
            details.duration_raw
        ));

        let mut footer = format!("📨 Requested by: {}", current.user);
        let waiting = player.waiting();
        if waiting > 0 {
            footer.push_str(&format!(" | 🎼 Tracks in queue: {}", waiting));
        }

        Ok(NowPlaying::Ready(EmbedPayload {
            author: Some(EmbedAuthor {
                name: channel_name.clone(),
                icon_url: Some(channel_icon.clone()),
                url: channel.url.clone(),
            }),
            title: Some(details.title.clone()),
            url: Some(details.url.clone()),
            description: Some(description),
            color: Some(color),
            thumbnail: details.thumbnail().map(str::to_string),
            footer: Some(footer),
            ..Default::default()
        }))
    }

    /// Announces the head of the queue in the player thread.
    ///
    /// `open` turns the thread id into a sink; it is only called once the
    /// embed is ready.
    pub async fn song_changed<S, F>(
        &self,
        player: &PlayerSnapshot,
        open: F,
    ) -> MusicResult<SongChanged>
    where
        S: EmbedSink,
        F: FnOnce(ChannelId) -> S + Send,
    {
        let Some(thread_id) = player.player_thread else {
            return Ok(SongChanged::NoThread);
        };

        let current = player.head()?;
        if let Some(reason) = unsupported(current) {
            return Ok(SongChanged::Skipped(reason));
        }

        let details = self.videos.video_info(&current.song.url).await?;
        let color = self.thumbnail_color(&details).await?;

        let channel_name = details
            .channel
            .as_ref()
            .and_then(|channel| channel.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| BLANK.to_string());

        let embed = EmbedPayload {
            author: Some(EmbedAuthor {
                name: "💭 Now playing:".to_string(),
                ..Default::default()
            }),
            title: Some(details.title.clone()),
            url: Some(details.url.clone()),
            color: Some(color),
            fields: vec![
                field("**👋 Author**", channel_name),
                field("**👀 Views**", number_with_spaces(details.views)),
                field("**👍 Likes**", number_with_spaces(details.likes)),
            ],
            thumbnail: details.thumbnail().map(str::to_string),
            footer: Some(format!("📨 Requested by: {}", current.user)),
            timestamp: Some(Timestamp::now()),
            ..Default::default()
        };

        open(thread_id).send_embed(embed).await?;
        debug!("Announced {} in thread {}", details.url, thread_id);

        Ok(SongChanged::Sent)
    }

    async fn thumbnail_color(&self, details: &VideoDetails) -> MusicResult<u32> {
        let thumbnail = details
            .thumbnail()
            .ok_or_else(|| MusicError::ColorError(format!("No thumbnail for {}", details.url)))?;
        self.colors.average_color(thumbnail).await
    }
}

fn unsupported(current: &QueuedSong) -> Option<SkipReason> {
    match current.song.source {
        SongSource::Spotify => {
            debug!("Not rendering unsupported source {}", current.song.url);
            Some(SkipReason::UnsupportedSource)
        }
        SongSource::YouTube => None,
    }
}

fn field(name: &str, value: String) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value,
        inline: true,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeOptions {
    pub description: String,
    /// Defaults to black.
    pub color: Option<u32>,
}

impl NoticeOptions {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            color: None,
        }
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

/// A short notice signed by `author`, with the description cut to
/// [`THREAD_NOTICE_MAX_LEN`] characters.
pub fn thread_notice(author: EmbedAuthor, options: NoticeOptions) -> EmbedPayload {
    EmbedPayload {
        author: Some(author),
        description: Some(options.description.chars().take(THREAD_NOTICE_MAX_LEN).collect()),
        color: Some(options.color.unwrap_or(0x000000)),
        timestamp: Some(Timestamp::now()),
        ..Default::default()
    }
}

pub async fn send_thread_notice(
    sink: &impl EmbedSink,
    author: EmbedAuthor,
    options: NoticeOptions,
) -> MusicResult<()> {
    sink.send_embed(thread_notice(author, options)).await
}

/// Posts a notice to the guild's player thread, if it has one. Failures are
/// logged and otherwise ignored.
pub async fn notify_thread(
    http: Arc<Http>,
    player_thread: Option<ChannelId>,
    author: EmbedAuthor,
    options: NoticeOptions,
) {
    let Some(thread_id) = player_thread else {
        return;
    };

    let sink = ThreadChannel::new(http, thread_id);
    if let Err(e) = send_thread_notice(&sink, author, options).await {
        warn!("Failed to post notice in thread {}: {}", thread_id, e);
    }
}

/// The songs waiting behind the current one.
pub fn up_next(player: &GuildPlayer) -> EmbedPayload {
    let lines: Vec<String> = player
        .upcoming()
        .enumerate()
        .map(|(index, queued)| {
            format!(
                "`{}.` <{}> (requested by {})",
                index + 1,
                queued.song.url,
                queued.user
            )
        })
        .collect();

    let description = if lines.is_empty() {
        "**📭 Nothing queued**".to_string()
    } else {
        lines.join("\n")
    };

    EmbedPayload {
        title: Some("📋 Up next".to_string()),
        description: Some(description),
        color: Some(0x00ff00),
        ..Default::default()
    }
}

fn error_reply(description: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("❌ Error")
            .description(description)
            .color(0xff0000),
    )
}

/// Create an embed for when the bot is not connected to a voice channel
pub fn bot_not_in_voice_channel(err: MusicError) -> CreateReply {
    error_reply(format!("Not connected to a voice channel: {}", err))
}

/// Create an embed for when a user is not connected to a voice channel
pub fn user_not_in_voice_channel(err: MusicError) -> CreateReply {
    error_reply(format!("You need to be in a voice channel: {}", err)).ephemeral(true)
}

/// Create an embed for when the bot fails to join a voice channel
pub fn failed_to_join_voice_channel(err: MusicError) -> CreateReply {
    error_reply(format!("Failed to join voice channel: {}", err))
}

/// Create an embed for when the bot fails to process an audio source
pub fn failed_to_process_audio_source(err: MusicError) -> CreateReply {
    error_reply(format!("Failed to process audio source: {}", err))
}

/// Create an embed for when a link points at a source the bot cannot play
pub fn unsupported_source(err: MusicError) -> CreateReply {
    error_reply(format!("{}, try a YouTube link", err)).ephemeral(true)
}

/// Create an embed for when no track is playing
pub fn no_track_playing() -> CreateReply {
    error_reply("No track is currently playing")
}

/// Create an embed for when there is no track to skip
pub fn no_track_to_skip() -> CreateReply {
    error_reply("There is no track to skip")
}

/// Create an embed for when the queue is empty
pub fn queue_is_empty() -> CreateReply {
    error_reply("The queue is empty")
}

/// Create an embed for when a song is added behind others
pub fn added_to_queue(url: &str, position: usize) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("🎵 Added to Queue")
            .description(format!("<{}>", url))
            .field("Position", format!("`#{}`", position), true)
            .color(0x00ff00),
    )
}

/// Create an embed for when a track is paused
pub fn paused() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏸️ Paused")
            .description("Playback paused")
            .color(0x00ff00),
    )
}

/// Create an embed for when a track is resumed
pub fn resumed() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("▶️ Resumed")
            .description("Playback resumed")
            .color(0x00ff00),
    )
}

/// Create an embed for when a track is skipped
pub fn skipped(url: &str) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏭️ Skipped")
            .description(format!("Skipped <{}>", url))
            .color(0x00ff00),
    )
}

/// Create an embed for when the bot stops playing music
pub fn stopped() -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title("⏹️ Stopped")
            .description("Playback stopped and queue cleared")
            .color(0x00ff00),
    )
}
