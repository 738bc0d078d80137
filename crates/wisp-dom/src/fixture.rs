//! JSON document fixtures.
//!
//! Tests and the CLI describe documents as nested JSON instead of HTML:
//!
//! ```json
//! [
//!   { "tag": "body", "children": [
//!       "Hello ",
//!       { "tag": "a", "attrs": { "href": "/next" }, "children": ["next"] },
//!       { "comment": "ignored" }
//!   ] }
//! ]
//! ```
//!
//! A bare string is a text node, an object with `comment` is a comment, and
//! an object with `tag` is an element.

use serde::Deserialize;

use crate::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// One node of a JSON document fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeFixture {
    /// A text node.
    Text(String),
    /// A comment node.
    Comment {
        /// Comment body.
        comment: String,
    },
    /// An element with optional attributes and children.
    Element {
        /// Tag name (lowercased on load).
        tag: String,
        /// Attribute map.
        #[serde(default)]
        attrs: AttributesMap,
        /// Child nodes in document order.
        #[serde(default)]
        children: Vec<NodeFixture>,
    },
}

impl DomTree {
    /// Build a document whose root children are `nodes`.
    #[must_use]
    pub fn from_fixture(nodes: &[NodeFixture]) -> Self {
        let mut tree = Self::new();
        for node in nodes {
            let _ = tree.append_fixture(NodeId::ROOT, node);
        }
        tree
    }

    /// Append a fixture subtree under `parent`, returning the new node.
    pub fn append_fixture(&mut self, parent: NodeId, node: &NodeFixture) -> NodeId {
        match node {
            NodeFixture::Text(text) => self.append_text(parent, text),
            NodeFixture::Comment { comment } => {
                let id = self.alloc(NodeType::Comment(comment.clone()));
                self.append_child(parent, id);
                id
            }
            NodeFixture::Element {
                tag,
                attrs,
                children,
            } => {
                let mut data = ElementData::new(tag);
                data.attrs.clone_from(attrs);
                let id = self.append_element(parent, data);
                for child in children {
                    let _ = self.append_fixture(id, child);
                }
                id
            }
        }
    }
}
