//! Name-based emoji lookup used by the progress bar.

use poise::serenity_prelude::{Emoji, GuildId, Http};
use serenity::async_trait;
use std::collections::HashMap;

use super::music_manager::MusicResult;
use super::progress_bar::BarGlyph;

/// Resolves a logical emoji name to something Discord can display.
#[async_trait]
pub trait EmojiRegistry: Send + Sync {
    /// `None` when the registry has nothing under `name`.
    async fn get_emoji(&self, name: &str) -> Option<String>;
}

/// In-memory registry from logical name to displayable glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmojiMap {
    glyphs: HashMap<String, String>,
}

impl EmojiMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyph(mut self, name: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.glyphs.insert(name.into(), glyph.into());
        self
    }

    /// Plain unicode progress-bar glyphs for guilds without custom emojis.
    pub fn unicode_fallback() -> Self {
        Self::new()
            .with_glyph(BarGlyph::Start.name(), "▬")
            .with_glyph(BarGlyph::Playing.name(), "▬")
            .with_glyph(BarGlyph::Medium.name(), "🔘")
            .with_glyph(BarGlyph::Waiting.name(), "▭")
            .with_glyph(BarGlyph::End.name(), "▭")
    }

    /// Indexes custom emojis by name, rendered as `<:name:id>` mentions.
    pub fn from_emojis(emojis: impl IntoIterator<Item = Emoji>) -> Self {
        emojis
            .into_iter()
            .map(|emoji| (emoji.name.clone(), emoji.to_string()))
            .collect()
    }

    /// Loads every custom emoji of a guild.
    pub async fn from_guild(http: impl AsRef<Http>, guild_id: GuildId) -> MusicResult<Self> {
        let emojis = guild_id.emojis(http).await?;
        Ok(Self::from_emojis(emojis))
    }

    /// Entries of `other` replace entries of `self` with the same name.
    pub fn overlay(mut self, other: EmojiMap) -> Self {
        self.glyphs.extend(other.glyphs);
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(String, String)> for EmojiMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EmojiRegistry for EmojiMap {
    async fn get_emoji(&self, name: &str) -> Option<String> {
        self.glyphs.get(name).cloned()
    }
}
