use std::time::Duration;
use thousands::{Separable, SeparatorPolicy, digits};

// Export music utilities
pub mod average_color;
pub mod embedded_messages;
pub mod emoji_registry;
pub mod event_handlers;
pub mod music_manager;
pub mod player_state;
pub mod progress_bar;

/// Format a duration into a human-readable string (e.g., "3:45" or "1:23:45")
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Same as [`format_duration`], for a millisecond count.
pub fn format_millis(ms: u64) -> String {
    format_duration(Duration::from_millis(ms))
}

const SPACE_SEPARATED: SeparatorPolicy<'static> = SeparatorPolicy {
    separator: " ",
    groups: &[3],
    digits: digits::ASCII_DECIMAL,
};

/// Groups digits in threes with spaces, e.g. `1234567` becomes `"1 234 567"`.
pub fn number_with_spaces(n: u64) -> String {
    n.separate_by_policy(SPACE_SEPARATED)
}
