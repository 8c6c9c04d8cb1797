//! Response payloads from the 7TV catalog, identity, and cosmetics APIs.

use serde::{Deserialize, Serialize};

use crate::settings::ImageSize;

/// A catalog emote as returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmoteItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub flags: u32,
    pub host: ImageHost,
    #[serde(default)]
    pub owner: Option<Owner>,
}

/// CDN location and the files available there.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageHost {
    /// Protocol-relative base, e.g. `//cdn.7tv.app/emote/<id>`.
    pub url: String,
    #[serde(default)]
    pub files: Vec<ImageFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFile {
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
}

/// An active cosmetic badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    #[serde(default)]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub host: Option<ImageHost>,
}

impl EmoteItem {
    /// Link to insert into the chat input for this emote.
    ///
    /// Uses `gif` for animated emotes and `webp` otherwise, and carries the
    /// emote name so receivers can label it.
    pub fn link(&self, size: ImageSize) -> String {
        let ext = if self.animated { "gif" } else { "webp" };
        let base = self.host.url.trim_end_matches('/');
        let base = if base.starts_with("//") {
            format!("https:{base}")
        } else {
            base.to_string()
        };
        let name: String = url::form_urlencoded::byte_serialize(self.name.as_bytes()).collect();
        format!("{base}/{size}.{ext}?name={name}")
    }

    /// Display name of the uploader, if known.
    pub fn owner_name(&self) -> Option<&str> {
        let owner = self.owner.as_ref()?;
        if owner.display_name.is_empty() {
            Some(owner.username.as_str()).filter(|name| !name.is_empty())
        } else {
            Some(owner.display_name.as_str())
        }
    }
}

/// Envelope shared by all GraphQL responses.
#[derive(Debug, Deserialize)]
pub struct GqlResponse<T> {
    pub data: Option<T>,
    /// Absent or `null` on success.
    #[serde(default)]
    pub errors: Option<Vec<GqlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GqlError {
    pub message: String,
}

impl<T> GqlResponse<T> {
    /// First reported error message, if the server reported any.
    pub fn error_message(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(|errors| errors.first())
            .map(|e| e.message.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub emotes: Option<EmoteSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct EmoteSearchResult {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub items: Option<Vec<EmoteItem>>,
}

#[derive(Debug, Deserialize)]
pub struct CosmeticsData {
    #[serde(default)]
    pub user: Option<CosmeticsUser>,
}

#[derive(Debug, Deserialize)]
pub struct CosmeticsUser {
    #[serde(default)]
    pub style: Option<UserStyle>,
}

#[derive(Debug, Deserialize)]
pub struct UserStyle {
    #[serde(default)]
    pub badge: Option<Badge>,
}

/// Platform connection returned by the identity lookup.
#[derive(Debug, Deserialize)]
pub struct UserConnection {
    #[serde(default)]
    pub user: Option<ConnectedUser>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectedUser {
    pub id: String,
}
