//! Message content rewriting for hosted 7TV emotes.
//!
//! Turns lone emote links in an already-rendered message tree into inline
//! emote nodes, decides when a link preview duplicates such an emote, and
//! annotates detail views of synthesized emotes.

pub mod embed;
pub mod node;
pub mod notice;
pub mod parse;
pub mod rewrite;

pub use embed::{Embed, EmbedKind, Message, should_suppress};
pub use node::{Children, CustomEmoji, Element, Node};
pub use notice::{FAKE_EMOTE_NOTICE, annotate};
pub use parse::{EmoteRef, parse_emote_url};
pub use rewrite::{rewrite, try_rewrite};

/// Maximum element nesting the rewriter will walk.
pub const MAX_DEPTH: usize = 64;

/// Unified error type for the emote-rewrite crate.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Content tree nested deeper than {depth} levels")]
    TooDeep { depth: usize },
}
