//! Mock implementations for the embed builders' collaborators

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockall::mock;
use serenity::async_trait;
use tunecord::commands::music::{
    audio_sources::{VideoDetails, VideoInfoApi},
    utils::{
        average_color::ColorExtractor,
        embedded_messages::{EmbedPayload, EmbedSink},
        music_manager::MusicResult,
        player_state::AudioPlayer,
    },
};

mock! {
    pub Videos {}

    #[async_trait]
    impl VideoInfoApi for Videos {
        async fn video_info(&self, url: &str) -> MusicResult<VideoDetails>;
        async fn search(&self, query: &str) -> MusicResult<String>;
    }
}

mock! {
    pub Colors {}

    #[async_trait]
    impl ColorExtractor for Colors {
        async fn average_color(&self, image_url: &str) -> MusicResult<u32>;
    }
}

/// Videos that always resolve to `details`.
pub fn videos_returning(details: VideoDetails) -> MockVideos {
    let mut videos = MockVideos::new();
    videos
        .expect_video_info()
        .returning(move |_| Ok(details.clone()));
    videos
}

/// Videos that must not be fetched.
pub fn videos_never_called() -> MockVideos {
    let mut videos = MockVideos::new();
    videos.expect_video_info().never();
    videos
}

pub fn colors_returning(color: u32) -> MockColors {
    let mut colors = MockColors::new();
    colors.expect_average_color().returning(move |_| Ok(color));
    colors
}

pub fn colors_never_called() -> MockColors {
    let mut colors = MockColors::new();
    colors.expect_average_color().never();
    colors
}

/// Sink that keeps every embed it is given.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<EmbedPayload>>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<EmbedPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbedSink for RecordingSink {
    async fn send_embed(&self, embed: EmbedPayload) -> MusicResult<()> {
        self.sent.lock().unwrap().push(embed);
        Ok(())
    }
}

/// A track frozen at a fixed position.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Duration);

#[async_trait]
impl AudioPlayer for FixedPosition {
    async fn playback_position(&self) -> Duration {
        self.0
    }

    fn pause_playback(&self) -> MusicResult<()> {
        Ok(())
    }

    fn resume_playback(&self) -> MusicResult<()> {
        Ok(())
    }

    fn stop_playback(&self) -> MusicResult<()> {
        Ok(())
    }
}
