//! Sample videos, queue entries and glyph sets used in tests

use poise::serenity_prelude::ChannelId;
use tunecord::commands::music::{
    audio_sources::{ChannelInfo, SongSource, VideoDetails},
    utils::{
        emoji_registry::EmojiMap,
        player_state::{GuildPlayer, QueuedSong, SongRequest},
    },
};

pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const SPOTIFY_URL: &str = "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC";
pub const THUMBNAIL_URL: &str = "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg";
pub const CHANNEL_ICON: &str = "https://yt3.ggpht.com/rick-astley.jpg";

/// A 3:33 video with complete channel metadata.
pub fn sample_video() -> VideoDetails {
    VideoDetails {
        title: "Rick Astley - Never Gonna Give You Up".to_string(),
        url: VIDEO_URL.to_string(),
        channel: Some(ChannelInfo {
            name: Some("Rick Astley".to_string()),
            icon: Some(CHANNEL_ICON.to_string()),
            url: Some("https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw".to_string()),
        }),
        views: 1_500_000_000,
        likes: 17_000_000,
        duration_secs: 213,
        duration_raw: "3:33".to_string(),
        thumbnails: vec![
            "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg".to_string(),
            THUMBNAIL_URL.to_string(),
        ],
    }
}

pub fn queued(url: &str, source: SongSource, user: &str) -> QueuedSong {
    QueuedSong {
        song: SongRequest {
            url: url.to_string(),
            source,
            seek: None,
        },
        user: user.to_string(),
    }
}

/// A player whose queue holds `count` copies of the sample video.
pub fn player_with_videos(count: usize) -> GuildPlayer {
    GuildPlayer {
        queue: (0..count)
            .map(|_| queued(VIDEO_URL, SongSource::YouTube, "rick_fan"))
            .collect(),
        ..Default::default()
    }
}

pub fn player_thread() -> ChannelId {
    ChannelId::new(987654321)
}

pub fn ascii_glyphs() -> EmojiMap {
    EmojiMap::new()
        .with_glyph("ProgressBarStart", "[")
        .with_glyph("ProgressBarPlaying", "=")
        .with_glyph("ProgressBarMedium", "o")
        .with_glyph("ProgressBarWaiting", "-")
        .with_glyph("ProgressBarEnd", "]")
}
