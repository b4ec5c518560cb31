//! Element/text tree produced by the tree builder.

use crate::serializer::{self, SerializeOptions};
use crate::tree_builder::TreeBuilder;
use crate::SvgResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Element names that carry metadata only and are never wrapped by mutations.
pub const NON_GROUPABLE_ELEMENTS: &[&str] = &["title", "desc", "defs", "metadata"];

/// Attributes in insertion order. Keys are unique.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Element,
    Text,
}

/// A node in the markup tree.
///
/// Children are owned exclusively; there is no link back to the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name; empty for text nodes.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Text payload; empty for elements.
    pub value: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Node {
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Element,
            value: String::new(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            kind: NodeKind::Text,
            value: value.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child list setter.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn is_element_named(&self, name: &str) -> bool {
        self.is_element() && self.name == name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute. An existing key keeps its position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Whether margin/radius wrapping may move this node into a group.
    pub fn is_groupable(&self) -> bool {
        self.is_element() && !NON_GROUPABLE_ELEMENTS.contains(&self.name.as_str())
    }

    /// Collect every `id` attribute in this subtree, in document order.
    pub fn find_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        if let Some(id) = self.attr("id") {
            ids.push(id);
        }
        for child in &self.children {
            child.collect_ids(ids);
        }
    }

    pub fn to_markup(&self) -> String {
        serializer::serialize_node(self, &SerializeOptions::default())
    }
}

/// A parsed markup document.
///
/// `root` is a synthetic container that is never emitted; its children are
/// the top-level elements of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub root: Node,
}

impl Document {
    /// Parse markup into a document.
    ///
    /// Malformed markup is tolerated. The only failure is a result without a
    /// top-level `svg` element.
    pub fn parse(input: &str) -> SvgResult<Self> {
        let mut builder = TreeBuilder::new();
        builder.feed(input);
        builder.finish()
    }

    pub fn top_level(&self) -> &[Node] {
        &self.root.children
    }

    /// The first top-level `svg` element.
    pub fn svg(&self) -> Option<&Node> {
        self.root.children.iter().find(|n| n.is_element_named("svg"))
    }

    pub fn svg_mut(&mut self) -> Option<&mut Node> {
        self.root
            .children
            .iter_mut()
            .find(|n| n.is_element_named("svg"))
    }

    pub fn to_markup(&self) -> String {
        self.to_markup_with(&SerializeOptions::default())
    }

    pub fn to_markup_with(&self, options: &SerializeOptions) -> String {
        serializer::serialize_nodes(&self.root.children, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_keeps_position() {
        let mut node = Node::element("rect").with_attr("a", "1").with_attr("b", "2");
        node.set_attr("a", "3");
        let keys: Vec<&str> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(node.attr("a"), Some("3"));
    }

    #[test]
    fn test_groupable() {
        assert!(Node::element("circle").is_groupable());
        assert!(Node::element("g").is_groupable());
        for name in NON_GROUPABLE_ELEMENTS {
            assert!(!Node::element(*name).is_groupable());
        }
        assert!(!Node::text("hello").is_groupable());
    }

    #[test]
    fn test_find_ids() {
        let node = Node::element("svg").with_children(vec![
            Node::element("defs").with_children(vec![Node::element("linearGradient").with_attr("id", "a")]),
            Node::element("mask").with_attr("id", "b"),
        ]);
        assert_eq!(node.find_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_json_export_has_no_parent() {
        let node = Node::element("g").with_children(vec![Node::text("hi")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "element");
        assert_eq!(json["children"][0]["type"], "text");
        assert!(json.get("parent").is_none());
    }

    #[test]
    fn test_svg_lookup_among_siblings() {
        let doc = Document::parse("<title>x</title><svg id=\"main\"/>").unwrap();
        assert_eq!(doc.top_level().len(), 2);
        assert_eq!(doc.svg().and_then(|s| s.attr("id")), Some("main"));
    }
}
