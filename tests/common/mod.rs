//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across the integration tests

pub mod fixtures;
pub mod mocks;

use std::sync::Arc;

use tunecord::commands::music::utils::{
    embedded_messages::PlayerEmbeds, emoji_registry::EmojiMap,
};

use mocks::{MockColors, MockVideos};

/// Embed builders over the given collaborators, with bracket glyphs for the bar.
pub fn player_embeds(videos: MockVideos, colors: MockColors) -> PlayerEmbeds {
    PlayerEmbeds::new(
        Arc::new(videos),
        Arc::new(colors),
        Arc::new(fixtures::ascii_glyphs()),
    )
}

/// Embed builders using the built-in unicode glyphs.
pub fn unicode_player_embeds(videos: MockVideos, colors: MockColors) -> PlayerEmbeds {
    PlayerEmbeds::new(
        Arc::new(videos),
        Arc::new(colors),
        Arc::new(EmojiMap::unicode_fallback()),
    )
}
