//! Content tree rewriter.
//!
//! A message whose whole content is one emote link renders the emote
//! instead of the link. Inside list containers emote links are stripped, and
//! lists left with nothing to show disappear. Mixed prose is never touched.


use crate::node::{Children, CustomEmoji, Element, Node};
use crate::parse::parse_emote_url;
use crate::{MAX_DEPTH, RewriteError};

/// Where in the tree the walk currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Emote links become emoji nodes.
    Inline { jumboable: bool },
    /// Emote links are removed.
    List,
}

/// Rewrite a message's content, falling back to the original on failure.
///
/// The input is never modified; a new tree is returned.
pub fn rewrite(content: &[Node], inline: bool) -> Vec<Node> {
    match try_rewrite(content, inline) {
        Ok(nodes) => nodes,
        Err(e) => {
            tracing::warn!(error = %e, "Emote rewrite failed, showing original content");
            content.iter().map(scrubbed).collect()
        }
    }
}

/// Rewrite a message's content, reporting internal failures to the caller.
pub fn try_rewrite(content: &[Node], inline: bool) -> Result<Vec<Node>, RewriteError> {
    let [only] = content else {
        return Ok(content.iter().map(scrubbed).collect());
    };
    if only.is_structural_block() {
        return Ok(content.iter().map(scrubbed).collect());
    }

    // Emotes sent on their own render large.
    let scope = Scope::Inline {
        jumboable: !inline && !only.is_block(),
    };
    walk_siblings(content, scope, 0)
}

fn walk_siblings(nodes: &[Node], scope: Scope, depth: usize) -> Result<Vec<Node>, RewriteError> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut changed = false;
    for node in nodes {
        match walk_node(node, scope, depth)? {
            Some(kept) => {
                changed |= matches!((node, &kept), (Node::Element(_), Node::Emoji(_)));
                out.push(kept);
            }
            None => changed = true,
        }
    }
    if changed {
        trim_edges(&mut out);
    }
    Ok(out)
}

fn walk_node(node: &Node, scope: Scope, depth: usize) -> Result<Option<Node>, RewriteError> {
    if depth > MAX_DEPTH {
        return Err(RewriteError::TooDeep { depth: MAX_DEPTH });
    }
    let el = match node {
        Node::Element(el) => el,
        Node::Emoji(_) => return Ok(Some(scrubbed(node))),
        Node::Text(_) => return Ok(Some(node.clone())),
    };

    if let Some(emote) = el.link_target().and_then(parse_emote_url) {
        return Ok(match scope {
            Scope::Inline { jumboable } => Some(Node::Emoji(emote.into_fake(jumboable))),
            Scope::List => None,
        });
    }

    if el.is_list() {
        return walk_list(el, depth);
    }

    let Some(children) = &el.content else {
        return Ok(Some(node.clone()));
    };
    let before = children.as_slice();
    let after = walk_siblings(before, scope, depth + 1)?;
    if after.is_empty() && !before.is_empty() {
        return Ok(None);
    }
    Ok(Some(Node::Element(Element {
        content: Some(Children::Many(after)),
        ..el.clone()
    })))
}

fn walk_list(list: &Element, depth: usize) -> Result<Option<Node>, RewriteError> {
    let items = list.content.as_ref().map(Children::as_slice).unwrap_or_default();

    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        match walk_node(item, Scope::List, depth + 1)? {
            Some(Node::Element(item)) => {
                if item.content.as_ref().is_some_and(|c| !c.is_empty()) {
                    kept.push(Node::Element(item));
                }
            }
            // Separators between items.
            Some(Node::Text(text)) if text.trim().is_empty() => {}
            Some(other) => kept.push(other),
            None => {}
        }
    }

    if kept.is_empty() {
        return Ok(None);
    }
    Ok(Some(Node::Element(Element {
        content: Some(Children::Many(kept)),
        ..list.clone()
    })))
}

/// Copy `node` as-is, except that emoji not synthesized by this walk are
/// never marked fake.
fn scrubbed(node: &Node) -> Node {
    match node {
        Node::Emoji(emoji) => Node::Emoji(CustomEmoji {
            fake: false,
            ..emoji.clone()
        }),
        Node::Element(el) => Node::Element(Element {
            content: el.content.as_ref().map(|children| match children {
                Children::Many(nodes) => Children::Many(nodes.iter().map(scrubbed).collect()),
                Children::One(node) => Children::One(Box::new(scrubbed(node))),
            }),
            ..el.clone()
        }),
        Node::Text(_) => node.clone(),
    }
}

/// Strip whitespace from text at either end of a sibling run, dropping text
/// that becomes empty.
fn trim_edges(nodes: &mut Vec<Node>) {
    while let Some(Node::Text(text)) = nodes.first_mut() {
        let kept = text.trim_start().len();
        if kept > 0 {
            let cut = text.len() - kept;
            text.drain(..cut);
            break;
        }
        nodes.remove(0);
    }
    while let Some(Node::Text(text)) = nodes.last_mut() {
        let kept = text.trim_end().len();
        if kept > 0 {
            text.truncate(kept);
            break;
        }
        nodes.pop();
    }
}
