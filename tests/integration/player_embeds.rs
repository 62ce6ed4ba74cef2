use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use tunecord::MusicError;
use tunecord::commands::music::{
    audio_sources::SongSource,
    utils::{
        embedded_messages::{NowPlaying, SkipReason, SongChanged},
        player_state::{GuildPlayer, PlayerSnapshot},
    },
};

use crate::common::{
    fixtures::{
        CHANNEL_ICON, SPOTIFY_URL, THUMBNAIL_URL, player_thread, player_with_videos, queued,
        sample_video,
    },
    mocks::{
        FixedPosition, MockColors, RecordingSink, colors_never_called, colors_returning,
        videos_never_called, videos_returning,
    },
    player_embeds, unicode_player_embeds,
};

#[tokio::test]
async fn test_now_playing_halfway_through() {
    crate::test_utils::init();
    let embeds = player_embeds(videos_returning(sample_video()), colors_returning(0xFF_00_00));
    let mut player = player_with_videos(3);
    player.audio_player = Some(Arc::new(FixedPosition(Duration::from_millis(106_500))));

    let embed = embeds
        .now_playing(&player.snapshot())
        .await
        .unwrap()
        .into_embed()
        .expect("embed should be built");

    assert_eq!(embed.description.as_deref(), Some("🎧 1:46 [====o----] 3:33"));
    assert_eq!(
        embed.footer.as_deref(),
        Some("📨 Requested by: rick_fan | 🎼 Tracks in queue: 2")
    );
    assert_eq!(embed.color, Some(0xFF_00_00));
    assert_eq!(embed.thumbnail.as_deref(), Some(THUMBNAIL_URL));
    assert_eq!(
        embed.author.and_then(|author| author.icon_url).as_deref(),
        Some(CHANNEL_ICON)
    );
}

#[tokio::test]
async fn test_now_playing_with_unicode_glyphs() {
    let embeds = unicode_player_embeds(videos_returning(sample_video()), colors_returning(0));
    let player = player_with_videos(1);

    let embed = embeds.now_playing(&player.snapshot()).await.unwrap().into_embed().unwrap();

    assert_eq!(
        embed.description,
        Some(format!("🎧 0:00 ▬🔘{} 3:33", "▭".repeat(9)))
    );
}

#[tokio::test]
async fn test_now_playing_on_empty_queue_is_an_error() {
    let embeds = player_embeds(videos_never_called(), colors_never_called());

    assert_matches!(
        embeds.now_playing(&PlayerSnapshot::default()).await,
        Err(MusicError::EmptyQueue)
    );
}

#[tokio::test]
async fn test_spotify_head_is_never_rendered() {
    let embeds = player_embeds(videos_never_called(), colors_never_called());
    let player = GuildPlayer {
        queue: vec![queued(SPOTIFY_URL, SongSource::Spotify, "rick_fan")].into(),
        ..Default::default()
    };

    assert_eq!(
        embeds.now_playing(&player.snapshot()).await.unwrap(),
        NowPlaying::Skipped(SkipReason::UnsupportedSource)
    );
}

#[tokio::test]
async fn test_missing_channel_name_skips_embed() {
    let mut video = sample_video();
    if let Some(channel) = video.channel.as_mut() {
        channel.name = None;
    }
    let embeds = player_embeds(videos_returning(video), colors_never_called());

    assert_eq!(
        embeds.now_playing(&player_with_videos(1).snapshot()).await.unwrap(),
        NowPlaying::Skipped(SkipReason::MissingChannelMetadata)
    );
}

#[tokio::test]
async fn test_color_failure_surfaces_as_error() {
    let mut colors = MockColors::new();
    colors
        .expect_average_color()
        .times(1)
        .returning(|_| Err(MusicError::ColorError("unsupported image".to_string())));
    let embeds = player_embeds(videos_returning(sample_video()), colors);

    assert_matches!(
        embeds.now_playing(&player_with_videos(1).snapshot()).await,
        Err(MusicError::ColorError(_))
    );
}

#[tokio::test]
async fn test_song_changed_posts_to_player_thread() {
    let embeds = player_embeds(videos_returning(sample_video()), colors_returning(0x33_66_99));
    let mut player = player_with_videos(2);
    player.player_thread = Some(player_thread());
    let sink = RecordingSink::default();

    let outcome = embeds
        .song_changed(&player.snapshot(), |thread_id| {
            assert_eq!(thread_id, player_thread());
            sink.clone()
        })
        .await
        .unwrap();

    assert_eq!(outcome, SongChanged::Sent);
    let sent = sink.sent();
    assert_eq!(sent.len(), 1);

    let values: Vec<&str> = sent[0].fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(values, ["Rick Astley", "1 500 000 000", "17 000 000"]);
    assert!(sent[0].fields.iter().all(|f| f.inline));
    assert_eq!(sent[0].footer.as_deref(), Some("📨 Requested by: rick_fan"));
}

#[tokio::test]
async fn test_song_changed_without_thread_fetches_nothing() {
    let embeds = player_embeds(videos_never_called(), colors_never_called());
    let sink = RecordingSink::default();

    let outcome = embeds
        .song_changed(&player_with_videos(1).snapshot(), |_| sink.clone())
        .await
        .unwrap();

    assert_eq!(outcome, SongChanged::NoThread);
    assert!(sink.sent().is_empty());
}
