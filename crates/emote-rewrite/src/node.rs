//! Content tree produced by the host's message renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag the host renderer uses for custom emoji nodes.
pub const CUSTOM_EMOJI_TAG: &str = "customEmoji";

/// Tags that introduce block structure the rewriter never rewrites into.
const STRUCTURAL_TAGS: &[&str] = &["heading", "codeBlock", "blockQuote", "subtext"];

/// List container tags. Children are list items.
const LIST_TAGS: &[&str] = &["list", "ul", "ol"];

/// One node of a rendered message.
///
/// On the wire a bare string is text; objects carrying `emojiId` are custom
/// emoji; any other object is a generic element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Emoji(CustomEmoji),
    Element(Element),
}

/// A custom emoji node, either from the host or synthesized from a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEmoji {
    #[serde(rename = "type")]
    pub tag: String,
    pub emoji_id: String,
    pub name: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub jumboable: bool,
    /// Set only on nodes this crate synthesized; never read from input.
    #[serde(default, skip_deserializing)]
    pub fake: bool,
}

/// A typed element with attributes and optional children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub tag: String,
    /// Present on hyperlinks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Some renderers key the link URL as `href`; written back under the same key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Children>,
    /// Attributes the rewriter does not interpret, carried through as-is.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, Value>,
}

/// Element children: the renderer emits either a single node or a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    Many(Vec<Node>),
    One(Box<Node>),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Whether this node is a structural block (heading, code block, ...),
    /// excluding lists.
    pub fn is_structural_block(&self) -> bool {
        self.as_element()
            .is_some_and(|el| STRUCTURAL_TAGS.contains(&el.tag.as_str()))
    }

    /// Whether this node is any block container, lists included.
    pub fn is_block(&self) -> bool {
        self.is_structural_block() || self.as_element().is_some_and(Element::is_list)
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            trusted: None,
            target: None,
            href: None,
            content: None,
            attrs: BTreeMap::new(),
        }
    }

    /// A trusted hyperlink pointing at `target`.
    pub fn link(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            trusted: Some(true),
            content: Some(Children::Many(vec![Node::Text(target.clone())])),
            target: Some(target),
            ..Self::new("link")
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.content = Some(Children::Many(children));
        self
    }

    pub fn is_list(&self) -> bool {
        LIST_TAGS.contains(&self.tag.as_str())
    }

    /// The hyperlink target, when this element is a link.
    pub fn link_target(&self) -> Option<&str> {
        self.trusted
            .and(self.target.as_deref().or(self.href.as_deref()))
    }
}

impl Children {
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Children::Many(nodes) => nodes,
            Children::One(node) => std::slice::from_ref(node),
        }
    }

    pub fn into_vec(self) -> Vec<Node> {
        match self {
            Children::Many(nodes) => nodes,
            Children::One(node) => vec![*node],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<Node> for Children {
    fn from(node: Node) -> Self {
        Children::One(Box::new(node))
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Children::Many(nodes)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<CustomEmoji> for Node {
    fn from(emoji: CustomEmoji) -> Self {
        Node::Emoji(emoji)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_host_tree() {
        let raw = json!([
            "hi ",
            {
                "type": "link",
                "trusted": true,
                "target": "https://example.com",
                "content": [{ "type": "text", "content": "example" }],
                "title": "Example"
            },
            { "type": "customEmoji", "emojiId": "42", "name": ":pog:", "animated": false }
        ]);

        let nodes: Vec<Node> = serde_json::from_value(raw).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], Node::text("hi "));

        let link = nodes[1].as_element().unwrap();
        assert_eq!(link.link_target(), Some("https://example.com"));
        assert_eq!(link.attrs.get("title"), Some(&json!("Example")));

        match &nodes[2] {
            Node::Emoji(emoji) => {
                assert_eq!(emoji.emoji_id, "42");
                assert!(!emoji.fake);
            }
            other => panic!("expected emoji, got {other:?}"),
        }
    }

    #[test]
    fn test_single_child_and_href_key() {
        let raw = json!({ "type": "link", "trusted": false, "href": "https://a.b", "content": "a.b" });
        let node: Node = serde_json::from_value(raw.clone()).unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.link_target(), Some("https://a.b"));
        assert_eq!(el.target, None);
        assert_eq!(el.content, Some(Children::One(Box::new(Node::text("a.b")))));
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn test_host_cannot_mark_emoji_fake() {
        let raw = json!({ "type": "customEmoji", "emojiId": "42", "name": ":pog:", "fake": true });
        let node: Node = serde_json::from_value(raw).unwrap();
        match node {
            Node::Emoji(emoji) => assert!(!emoji.fake),
            other => panic!("expected emoji, got {other:?}"),
        }
    }

    #[test]
    fn test_untrusted_attribute_missing_is_not_a_link() {
        let mut el = Element::new("text");
        el.target = Some("https://example.com".into());
        assert_eq!(el.link_target(), None);
    }

    #[test]
    fn test_block_classification() {
        assert!(Node::from(Element::new("heading")).is_structural_block());
        assert!(!Node::from(Element::new("list")).is_structural_block());
        assert!(Node::from(Element::new("list")).is_block());
        assert!(!Node::from(Element::link("https://x.y")).is_block());
        assert!(!Node::text("plain").is_block());
    }
}
