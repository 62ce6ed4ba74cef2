//! Implements the `VideoInfoApi` trait for YouTube.
//! Uses the `yt-dlp` command-line tool for extracting information.

use crate::commands::music::utils::music_manager::{MusicError, MusicResult};
use serenity::async_trait;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

use super::video_details::avatar_from_channel_json;
use super::{VideoDetails, VideoInfoApi};

/// Path prefixes followed by a video id.
const VIDEO_PATH_PREFIXES: [&str; 2] = ["/shorts/", "/live/"];

/// The main struct implementing YouTube API logic (via `yt-dlp`).
#[derive(Debug, Default, Clone, Copy)]
pub struct YtDlpApi;

#[async_trait]
impl VideoInfoApi for YtDlpApi {
    /// Fetches metadata for a single YouTube video URL, then looks up the
    /// uploader's avatar from the channel page.
    async fn video_info(&self, url: &str) -> MusicResult<VideoDetails> {
        info!("Fetching video metadata for URL: {}", url);

        let output = run_yt_dlp(&["-j", "--no-playlist", url]).await?;
        let mut details = VideoDetails::try_from(output)?;

        if let Some(channel) = details.channel.as_mut() {
            if let Some(channel_url) = channel.url.clone() {
                channel.icon = Self::channel_avatar(&channel_url).await;
            }
        }

        Ok(details)
    }

    /// Resolves the first result of a `ytsearch:` query to its watch URL.
    async fn search(&self, query: &str) -> MusicResult<String> {
        info!("Searching YouTube for: {}", query);
        let search_param = format!("ytsearch1:{}", query);

        let output = run_yt_dlp(&["-j", "--no-playlist", "--flat-playlist", &search_param]).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        let first = stdout
            .lines()
            .find_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .ok_or_else(|| {
                MusicError::AudioSourceError(format!("No results for search query: {}", query))
            })?;

        first["webpage_url"]
            .as_str()
            .or_else(|| first["url"].as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                MusicError::AudioSourceError(format!("Search result without URL: {}", query))
            })
    }
}

impl YtDlpApi {
    /// Checks if the input string points at a single YouTube video: a watch,
    /// shorts or live page, or a youtu.be link.
    pub fn is_youtube_url(query: &str) -> bool {
        let Ok(url) = Url::parse(query) else {
            return false;
        };
        match url.host_str() {
            Some("www.youtube.com" | "youtube.com" | "m.youtube.com" | "music.youtube.com") => {
                let path = url.path();
                path.starts_with("/watch")
                    || VIDEO_PATH_PREFIXES
                        .iter()
                        .any(|prefix| path.strip_prefix(prefix).is_some_and(|id| !id.is_empty()))
            }
            Some("youtu.be") => true,
            _ => false,
        }
    }

    /// Avatar of the channel at `channel_url`. A failed lookup only costs the
    /// embed its author icon, so it is logged and dropped.
    async fn channel_avatar(channel_url: &str) -> Option<String> {
        let output = match run_yt_dlp(&[
            "-J",
            "--flat-playlist",
            "--playlist-items",
            "0",
            channel_url,
        ])
        .await
        {
            Ok(output) => output,
            Err(e) => {
                debug!("Channel avatar lookup failed for {}: {}", channel_url, e);
                return None;
            }
        };

        avatar_from_channel_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Runs `yt-dlp` with the given arguments, failing on a non-zero exit status.
async fn run_yt_dlp(args: &[&str]) -> MusicResult<Output> {
    let output = Command::new("yt-dlp")
        .args(args)
        .output()
        .await
        .map_err(|e| MusicError::AudioSourceError(format!("Failed to run yt-dlp: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MusicError::AudioSourceError(format!(
            "yt-dlp exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(output)
}
