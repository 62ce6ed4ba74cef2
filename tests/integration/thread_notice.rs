use pretty_assertions::assert_eq;
use tunecord::commands::music::utils::embedded_messages::{
    EmbedAuthor, NoticeOptions, THREAD_NOTICE_MAX_LEN, send_thread_notice, thread_notice,
};

use crate::common::mocks::RecordingSink;

fn author() -> EmbedAuthor {
    EmbedAuthor {
        name: "rick_fan".to_string(),
        icon_url: Some("https://cdn.discordapp.com/embed/avatars/0.png".to_string()),
        url: None,
    }
}

#[test]
fn test_long_description_is_cut_to_maximum() {
    let notice = thread_notice(author(), NoticeOptions::new("🎵".repeat(THREAD_NOTICE_MAX_LEN + 45)));

    let description = notice.description.unwrap();
    assert_eq!(description.chars().count(), THREAD_NOTICE_MAX_LEN);
    assert!(description.chars().all(|c| c == '🎵'));
}

#[test]
fn test_description_at_maximum_is_kept() {
    let text = "a".repeat(THREAD_NOTICE_MAX_LEN);
    let notice = thread_notice(author(), NoticeOptions::new(text.clone()));

    assert_eq!(notice.description, Some(text));
}

#[tokio::test]
async fn test_notice_is_sent_once() {
    crate::test_utils::init();
    let sink = RecordingSink::default();

    send_thread_notice(
        &sink,
        author(),
        NoticeOptions::new("⏭️ Skipped the song").color(0x5865F2),
    )
    .await
    .unwrap();

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].author, Some(author()));
    assert_eq!(sent[0].color, Some(0x5865F2));
    assert_eq!(sent[0].description.as_deref(), Some("⏭️ Skipped the song"));
}
