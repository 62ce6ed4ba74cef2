//! Fixed-width progress bar built from five named emoji glyphs.

use futures::join;

use super::emoji_registry::EmojiRegistry;

/// Cells in the "now playing" bar unless configured otherwise.
pub const DEFAULT_WIDTH: usize = 8;

/// The glyph categories a bar is made of, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarGlyph {
    Start,
    Playing,
    Medium,
    Waiting,
    End,
}

impl BarGlyph {
    pub const ALL: [BarGlyph; 5] = [
        BarGlyph::Start,
        BarGlyph::Playing,
        BarGlyph::Medium,
        BarGlyph::Waiting,
        BarGlyph::End,
    ];

    /// Emoji name the glyph is registered under.
    pub const fn name(self) -> &'static str {
        match self {
            BarGlyph::Start => "ProgressBarStart",
            BarGlyph::Playing => "ProgressBarPlaying",
            BarGlyph::Medium => "ProgressBarMedium",
            BarGlyph::Waiting => "ProgressBarWaiting",
            BarGlyph::End => "ProgressBarEnd",
        }
    }
}

/// Splits `width` cells into `(filled, empty)` for the given position.
///
/// The ratio is clamped to `[0, 1]` and a zero total counts as nothing
/// played, so `filled + empty == width` always holds.
pub fn segments(elapsed_ms: u64, total_ms: u64, width: usize) -> (usize, usize) {
    if total_ms == 0 {
        return (0, width);
    }

    let ratio = (elapsed_ms as f64 / total_ms as f64).clamp(0.0, 1.0);
    let filled = ((width as f64 * ratio).round() as usize).min(width);

    (filled, width - filled)
}

/// Renders start, `filled` playing glyphs, the midpoint marker, `empty`
/// waiting glyphs and the end cap. Unknown glyphs render as nothing.
pub async fn render(
    emojis: &dyn EmojiRegistry,
    elapsed_ms: u64,
    total_ms: u64,
    width: usize,
) -> String {
    let (filled, empty) = segments(elapsed_ms, total_ms, width);

    let (start, playing, medium, waiting, end) = join!(
        glyph(emojis, BarGlyph::Start),
        glyph(emojis, BarGlyph::Playing),
        glyph(emojis, BarGlyph::Medium),
        glyph(emojis, BarGlyph::Waiting),
        glyph(emojis, BarGlyph::End),
    );

    let mut bar = String::with_capacity(
        start.len() + playing.len() * filled + medium.len() + waiting.len() * empty + end.len(),
    );
    bar.push_str(&start);
    bar.push_str(&playing.repeat(filled));
    bar.push_str(&medium);
    bar.push_str(&waiting.repeat(empty));
    bar.push_str(&end);
    bar
}

async fn glyph(emojis: &dyn EmojiRegistry, glyph: BarGlyph) -> String {
    emojis.get_emoji(glyph.name()).await.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::music::utils::emoji_registry::EmojiMap;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ascii_glyphs() -> EmojiMap {
        EmojiMap::new()
            .with_glyph("ProgressBarStart", "[")
            .with_glyph("ProgressBarPlaying", "=")
            .with_glyph("ProgressBarMedium", "o")
            .with_glyph("ProgressBarWaiting", "-")
            .with_glyph("ProgressBarEnd", "]")
    }

    #[rstest]
    #[case(0, 240_000, 8, (0, 8))]
    #[case(240_000, 240_000, 8, (8, 0))]
    #[case(90_000, 240_000, 8, (3, 5))]
    #[case(15_000, 240_000, 8, (1, 7))] // 0.5 rounds up
    #[case(1, 3, 1, (0, 1))]
    #[case(500_000, 240_000, 8, (8, 0))]
    #[case(10, 0, 8, (0, 8))]
    #[case(10, 20, 0, (0, 0))]
    fn test_segments(
        #[case] elapsed: u64,
        #[case] total: u64,
        #[case] width: usize,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(segments(elapsed, total, width), expected);
    }

    #[test]
    fn test_segments_always_fill_width() {
        let total = 187_000;
        for width in 1..=20 {
            for elapsed in (0..=total).step_by(997) {
                let (filled, empty) = segments(elapsed, total, width);
                assert_eq!(filled + empty, width, "elapsed={} width={}", elapsed, width);
            }
        }
    }

    #[tokio::test]
    async fn test_render_start_and_end() {
        let emojis = ascii_glyphs();

        assert_eq!(render(&emojis, 0, 60_000, 8).await, "[o--------]");
        assert_eq!(render(&emojis, 60_000, 60_000, 8).await, "[========o]");
        assert_eq!(render(&emojis, 30_000, 60_000, 8).await, "[====o----]");
    }

    #[tokio::test]
    async fn test_render_missing_glyphs_are_empty() {
        let emojis = EmojiMap::new().with_glyph("ProgressBarMedium", "o");

        assert_eq!(render(&emojis, 30_000, 60_000, 8).await, "o");
        assert_eq!(render(&EmojiMap::new(), 30_000, 60_000, 8).await, "");
    }
}
