//! Markup serializer.
//!
//! Depth-first, pre-order rendering of [`Node`]s back into markup.

use crate::node::{Node, NodeKind};

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";
/// Splits a literal `]]>` across two CDATA sections.
const CDATA_CLOSE_SPLIT: &str = "]]]]><![CDATA[>";

/// Serializer settings.
#[derive(Debug, Clone, Copy)]
pub struct SerializeOptions {
    /// Emit `<tag/>` for childless elements instead of `<tag></tag>`.
    pub self_close: bool,
    /// Renders one attribute from its name and raw value.
    pub attribute_formatter: fn(&str, &str) -> String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            self_close: true,
            attribute_formatter: format_attribute,
        }
    }
}

/// Default attribute formatter: `name="escaped value"`.
pub fn format_attribute(name: &str, value: &str) -> String {
    format!("{}=\"{}\"", name, escape_attr(value))
}

/// Escape an attribute value.
///
/// `&` is replaced first so entities introduced by later replacements are
/// not escaped twice.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text content, wrapping it in CDATA when it contains markup
/// characters.
pub fn escape_text(value: &str) -> String {
    if value.contains(['&', '<', '>']) {
        format!(
            "{}{}{}",
            CDATA_OPEN,
            value.replace(CDATA_CLOSE, CDATA_CLOSE_SPLIT),
            CDATA_CLOSE
        )
    } else {
        value.to_string()
    }
}

/// Serialize a single node.
pub fn serialize_node(node: &Node, options: &SerializeOptions) -> String {
    let mut out = String::new();
    write_node(node, options, &mut out);
    out
}

/// Serialize sibling nodes back to back.
pub fn serialize_nodes(nodes: &[Node], options: &SerializeOptions) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, options, &mut out);
    }
    out
}

fn write_node(node: &Node, options: &SerializeOptions, out: &mut String) {
    match node.kind {
        NodeKind::Text => out.push_str(&escape_text(&node.value)),
        NodeKind::Element => {
            out.push('<');
            out.push_str(&node.name);
            for (name, value) in &node.attributes {
                out.push(' ');
                out.push_str(&(options.attribute_formatter)(name, value));
            }

            if node.children.is_empty() && options.self_close {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for child in &node.children {
                write_node(child, options, out);
            }
            out.push_str("</");
            out.push_str(&node.name);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing() {
        let node = Node::element("rect").with_attr("x", "0");
        assert_eq!(serialize_node(&node, &SerializeOptions::default()), r#"<rect x="0"/>"#);
    }

    #[test]
    fn test_explicit_close_policy() {
        let options = SerializeOptions {
            self_close: false,
            ..Default::default()
        };
        let node = Node::element("rect").with_attr("x", "0");
        assert_eq!(serialize_node(&node, &options), r#"<rect x="0"></rect>"#);
    }

    #[test]
    fn test_children() {
        let node = Node::element("g").with_children(vec![Node::element("path"), Node::text("hi")]);
        assert_eq!(
            serialize_node(&node, &SerializeOptions::default()),
            "<g><path/>hi</g>"
        );
    }

    #[test]
    fn test_escape_attr_order() {
        assert_eq!(escape_attr("a&b"), "a&amp;b");
        assert_eq!(escape_attr("<\"'>"), "&lt;&quot;&apos;&gt;");
        assert_eq!(escape_attr("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_text_plain() {
        assert_eq!(escape_text("plain text"), "plain text");
    }

    #[test]
    fn test_escape_text_cdata() {
        assert_eq!(escape_text("5 < 10 & true"), "<![CDATA[5 < 10 & true]]>");
    }

    #[test]
    fn test_escape_text_neutralizes_cdata_close() {
        assert_eq!(escape_text("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_custom_attribute_formatter() {
        fn single_quoted(name: &str, value: &str) -> String {
            format!("{}='{}'", name, value)
        }
        let options = SerializeOptions {
            attribute_formatter: single_quoted,
            ..Default::default()
        };
        let node = Node::element("svg").with_attr("a", "1").with_attr("b", "2");
        assert_eq!(serialize_node(&node, &options), "<svg a='1' b='2'/>");
    }

    #[test]
    fn test_sibling_sequence() {
        let nodes = vec![Node::element("title"), Node::element("svg")];
        assert_eq!(
            serialize_nodes(&nodes, &SerializeOptions::default()),
            "<title/><svg/>"
        );
    }
}
