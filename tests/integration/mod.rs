//! Integration tests against the public library API

mod player_embeds;
mod progress_bar;
mod thread_notice;
