//! Recognizes links to hosted emote images.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::node::{CUSTOM_EMOJI_TAG, CustomEmoji};

/// Name used when a link carries no `name` query parameter.
pub const DEFAULT_EMOTE_NAME: &str = "emote";

static EMOTE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/emote/([0-9a-fA-F]+)/[^/]+\.(png|webp|gif)$").unwrap()
});

/// An emote identified from its CDN link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteRef {
    pub id: String,
    pub animated: bool,
    pub name: String,
}

impl EmoteRef {
    /// Build the synthetic emoji node that replaces the link.
    pub fn into_fake(self, jumboable: bool) -> CustomEmoji {
        CustomEmoji {
            tag: CUSTOM_EMOJI_TAG.to_string(),
            emoji_id: self.id,
            name: self.name,
            animated: self.animated,
            jumboable,
            fake: true,
        }
    }
}

/// Parse `https://<host>/emote/<hex-id>/<file>.<png|webp|gif>[?name=...]`.
///
/// Returns `None` for anything else. A link that does not parse as a URL can
/// still match on its raw path, in which case it gets the default name.
pub fn parse_emote_url(link: &str) -> Option<EmoteRef> {
    let parsed = Url::parse(link).ok();
    let path = match &parsed {
        Some(url) => url.path(),
        None => link.split(['?', '#']).next().unwrap_or(link),
    };

    let caps = EMOTE_PATH.captures(path)?;
    let id = caps.get(1)?.as_str().to_string();
    let animated = caps.get(2)?.as_str() == "gif";

    let name = parsed
        .as_ref()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "name")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_EMOTE_NAME.to_string());

    Some(EmoteRef { id, animated, name })
}
