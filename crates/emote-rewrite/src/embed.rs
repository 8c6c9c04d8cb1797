//! Link preview suppression for messages that are a single emote link.

use serde::{Deserialize, Serialize};

use crate::parse::parse_emote_url;

/// Preview panel type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    Image,
    Gifv,
    Video,
    Link,
    Rich,
    Article,
    #[serde(other)]
    Other,
}

/// A rendered link preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embed {
    #[serde(rename = "type")]
    pub kind: EmbedKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "proxyURL", alias = "proxy_url")]
    pub proxy_url: Option<String>,
}

/// The message owning a preview. Only its raw text matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: String,
}

/// Whether `embed` only repeats the emote the message already shows inline.
pub fn should_suppress(embed: &Embed, message: &Message) -> bool {
    let tokens: Vec<&str> = message.content.split_whitespace().collect();
    if tokens.len() > 1 || embed.kind != EmbedKind::Image {
        return false;
    }

    [embed.url.as_deref(), embed.proxy_url.as_deref()]
        .into_iter()
        .flatten()
        .any(|url| tokens.contains(&url) && parse_emote_url(url).is_some())
}
