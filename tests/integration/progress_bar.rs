use pretty_assertions::assert_eq;
use rstest::rstest;
use tunecord::commands::music::utils::{emoji_registry::EmojiMap, progress_bar};

use crate::common::fixtures::ascii_glyphs;

#[rstest]
#[case(1)]
#[case(8)]
#[case(13)]
#[case(40)]
fn test_cells_always_add_up_to_width(#[case] width: usize) {
    let total = 213_000;
    for elapsed in (0..=total).step_by(1_000) {
        let (filled, empty) = progress_bar::segments(elapsed, total, width);
        assert_eq!(filled + empty, width, "elapsed={}", elapsed);
    }
}

#[rstest]
#[case(0, "[o--------]")]
#[case(213_000, "[========o]")]
#[case(106_500, "[====o----]")]
#[case(999_999, "[========o]")]
#[tokio::test]
async fn test_render_with_custom_glyphs(#[case] elapsed: u64, #[case] expected: &str) {
    let bar = progress_bar::render(&ascii_glyphs(), elapsed, 213_000, 8).await;
    assert_eq!(bar, expected);
}

#[tokio::test]
async fn test_render_with_unicode_fallback() {
    let emojis = EmojiMap::unicode_fallback();

    let bar = progress_bar::render(&emojis, 0, 60_000, progress_bar::DEFAULT_WIDTH).await;

    assert_eq!(bar, format!("▬🔘{}", "▭".repeat(9)));
}

#[tokio::test]
async fn test_unknown_track_length_renders_empty_bar() {
    let bar = progress_bar::render(&ascii_glyphs(), 5_000, 0, 4).await;
    assert_eq!(bar, "[o----]");
}
