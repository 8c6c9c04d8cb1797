//! Attribution notice for synthesized emotes.

use crate::node::{Children, Node};

/// Shown in detail views of emotes created by [`crate::rewrite`].
pub const FAKE_EMOTE_NOTICE: &str =
    "This is a 7TV emote rendered from a link. Only users of the 7TV extension see it as an emote.";

/// Append the attribution notice when `is_fake` is set.
pub fn annotate(nodes: impl Into<Children>, is_fake: bool) -> Vec<Node> {
    let mut nodes = nodes.into().into_vec();
    if is_fake {
        nodes.push(Node::text(FAKE_EMOTE_NOTICE));
    }
    nodes
}
