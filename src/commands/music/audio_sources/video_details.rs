//! Defines `VideoDetails`, the video metadata the embeds are built from, and
//! its conversion from `yt-dlp --dump-json` output.

use crate::commands::music::utils::{
    format_duration,
    music_manager::{MusicError, MusicResult},
};
use serde::Deserialize;
use std::process::Output;
use std::time::Duration;

/// Uploader of a video. Every field may be missing from the metadata source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelInfo {
    pub name: Option<String>,
    /// Avatar image URL.
    pub icon: Option<String>,
    pub url: Option<String>,
}

/// Metadata of a single video, fetched fresh for every embed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub title: String,
    /// Canonical watch URL.
    pub url: String,
    pub channel: Option<ChannelInfo>,
    pub views: u64,
    pub likes: u64,
    pub duration_secs: u64,
    /// Duration as displayed by the source, e.g. `"3:45"`.
    pub duration_raw: String,
    /// Thumbnail URLs ordered from lowest to highest quality.
    pub thumbnails: Vec<String>,
}

impl VideoDetails {
    /// The highest quality thumbnail, used both for display and colour sampling.
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnails.last().map(String::as_str)
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_secs.saturating_mul(1000)
    }

    /// Parses a single `yt-dlp -j` JSON document.
    pub fn from_json(json: &str) -> MusicResult<Self> {
        let raw: YtDlpVideo = serde_json::from_str(json).map_err(|e| {
            MusicError::AudioSourceError(format!("Failed to parse video metadata: {}", e))
        })?;
        Ok(raw.into())
    }
}

/// Subset of the `yt-dlp` info dict this bot reads.
#[derive(Debug, Deserialize)]
struct YtDlpVideo {
    title: Option<String>,
    webpage_url: Option<String>,
    channel: Option<String>,
    uploader: Option<String>,
    channel_url: Option<String>,
    uploader_url: Option<String>,
    view_count: Option<u64>,
    like_count: Option<u64>,
    duration: Option<f64>,
    duration_string: Option<String>,
    thumbnail: Option<String>,
    #[serde(default)]
    thumbnails: Vec<YtDlpThumbnail>,
}

#[derive(Debug, Deserialize)]
struct YtDlpThumbnail {
    url: String,
}

impl From<YtDlpVideo> for VideoDetails {
    fn from(raw: YtDlpVideo) -> Self {
        let name = raw.channel.or(raw.uploader);
        let channel_url = raw.channel_url.or(raw.uploader_url);
        let channel = if name.is_some() || channel_url.is_some() {
            Some(ChannelInfo {
                name,
                icon: None,
                url: channel_url,
            })
        } else {
            None
        };

        let duration_secs = raw
            .duration
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(|secs| secs.round() as u64)
            .unwrap_or(0);

        let duration_raw = raw
            .duration_string
            .unwrap_or_else(|| format_duration(Duration::from_secs(duration_secs)));

        // yt-dlp lists thumbnails worst to best; the top-level one is its pick.
        let mut thumbnails: Vec<String> = raw.thumbnails.into_iter().map(|t| t.url).collect();
        if let Some(best) = raw.thumbnail {
            thumbnails.retain(|url| url != &best);
            thumbnails.push(best);
        }

        Self {
            title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
            url: raw.webpage_url.unwrap_or_default(),
            channel,
            views: raw.view_count.unwrap_or(0),
            likes: raw.like_count.unwrap_or(0),
            duration_secs,
            duration_raw,
            thumbnails,
        }
    }
}

/// Converts the output of `yt-dlp --dump-json` into `VideoDetails`.
impl TryFrom<Output> for VideoDetails {
    type Error = MusicError;

    fn try_from(value: Output) -> Result<Self, Self::Error> {
        let metadata_str = String::from_utf8_lossy(&value.stdout);
        Self::from_json(&metadata_str)
    }
}

/// Channel page metadata from `yt-dlp -J --flat-playlist`; only the artwork is read.
#[derive(Debug, Deserialize)]
struct YtDlpChannel {
    #[serde(default)]
    thumbnails: Vec<YtDlpChannelThumbnail>,
}

#[derive(Debug, Deserialize)]
struct YtDlpChannelThumbnail {
    id: Option<String>,
    url: String,
}

/// Picks the channel avatar out of a channel page's JSON, if it has one.
pub(crate) fn avatar_from_channel_json(json: &str) -> Option<String> {
    let channel: YtDlpChannel = serde_json::from_str(json).ok()?;
    let is_avatar = |t: &&YtDlpChannelThumbnail| {
        t.id.as_deref()
            .is_some_and(|id| id.starts_with("avatar"))
    };

    channel
        .thumbnails
        .iter()
        .find(|t| t.id.as_deref() == Some("avatar_uncropped"))
        .or_else(|| channel.thumbnails.iter().find(is_avatar))
        .map(|t| t.url.clone())
}
