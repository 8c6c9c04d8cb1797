//! Render hooks called by the chat client with JSON payloads.
//!
//! Every hook is fail-open: a payload that does not decode comes back
//! unchanged (or, for the embed hook, the panel is kept).

use emote_rewrite::{Children, Embed, Message, Node};
use serde_json::Value;

/// Message content hook. `content` is a node or an array of nodes.
pub fn render_message_content(content: &Value, inline: bool) -> Value {
    let nodes = match serde_json::from_value::<Children>(content.clone()) {
        Ok(children) => children.into_vec(),
        Err(e) => {
            tracing::warn!(error = %e, "Unrecognized message content, leaving as-is");
            return content.clone();
        }
    };

    let rewritten = emote_rewrite::rewrite(&nodes, inline);
    if rewritten == nodes {
        return content.clone();
    }
    match serde_json::to_value(&rewritten) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode rewritten content");
            content.clone()
        }
    }
}

/// Preview panel hook. Returns `true` when the panel should be dropped.
pub fn should_drop_embed(embed: &Value, message: &Value) -> bool {
    let embed: Embed = match serde_json::from_value(embed.clone()) {
        Ok(embed) => embed,
        Err(e) => {
            tracing::debug!(error = %e, "Unrecognized embed, keeping it");
            return false;
        }
    };
    let message: Message = match serde_json::from_value(message.clone()) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(error = %e, "Unrecognized message, keeping embed");
            return false;
        }
    };
    emote_rewrite::should_suppress(&embed, &message)
}

/// Detail view hook: appends the fake-emote notice to `nodes` when `is_fake`.
pub fn annotate_popout(nodes: &Value, is_fake: bool) -> Value {
    if !is_fake {
        return nodes.clone();
    }
    let children: Children = match serde_json::from_value(nodes.clone()) {
        Ok(children) => children,
        Err(e) => {
            tracing::warn!(error = %e, "Unrecognized popout content, leaving as-is");
            return nodes.clone();
        }
    };
    let annotated: Vec<Node> = emote_rewrite::annotate(children, true);
    serde_json::to_value(annotated).unwrap_or_else(|_| nodes.clone())
}
