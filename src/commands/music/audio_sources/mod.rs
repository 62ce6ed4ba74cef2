//! This module defines where songs come from and how their video metadata is fetched.
//! `YtDlpApi` is the production `VideoInfoApi`; `VideoDetails` is what every
//! embed builder renders from.

/// Submodule defining the `VideoDetails` struct and its `yt-dlp` parsing.
pub(crate) mod video_details;
/// Submodule implementing the `VideoInfoApi` trait for YouTube via `yt-dlp`.
pub(crate) mod youtube;

use crate::commands::music::utils::music_manager::{MusicError, MusicResult};
use serenity::async_trait;
use url::Url;

pub use video_details::{ChannelInfo, VideoDetails};

/// Where a queued song was requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongSource {
    YouTube,
    /// Accepted as a link but never rendered or played.
    Spotify,
}

impl SongSource {
    /// Classifies a URL by host, `None` for anything unrecognised.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        match parsed.host_str()? {
            "open.spotify.com" | "play.spotify.com" => Some(Self::Spotify),
            _ if youtube::YtDlpApi::is_youtube_url(url) => Some(Self::YouTube),
            _ => None,
        }
    }
}

/// The source of a link the bot can actually play, `UnsupportedSource`
/// for anything else.
pub fn ensure_playable(url: &str) -> MusicResult<SongSource> {
    match SongSource::from_url(url) {
        Some(SongSource::YouTube) => Ok(SongSource::YouTube),
        _ => Err(MusicError::UnsupportedSource(url.to_string())),
    }
}

/// Fetches fresh video metadata. Nothing is cached between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoInfoApi: Send + Sync {
    /// Metadata for a single video URL.
    async fn video_info(&self, url: &str) -> MusicResult<VideoDetails>;

    /// URL of the first video matching a free-text search.
    async fn search(&self, query: &str) -> MusicResult<String>;
}

/// A utility struct providing general helper functions related to audio sources.
pub struct AudioSource;

impl AudioSource {
    /// Performs a basic check if the input string can be parsed as a URL.
    /// Does not validate if the URL is actually reachable or supported by any specific API.
    pub fn is_url(input: &str) -> bool {
        Url::parse(input).is_ok()
    }
}
