//! The root element's `viewBox` and number formatting for injected geometry.

use crate::node::Node;

/// SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse a viewBox attribute value.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse())
            .collect::<Result<_, _>>()
            .ok()?;

        if parts.len() >= 4 {
            Some(ViewBox {
                min_x: parts[0],
                min_y: parts[1],
                width: parts[2],
                height: parts[3],
            })
        } else {
            None
        }
    }

    /// Read the viewBox of an `svg` element.
    pub fn of(svg: &Node) -> Option<Self> {
        svg.attr("viewBox").and_then(Self::parse)
    }

    /// A rect element covering the whole viewBox.
    pub fn covering_rect(&self) -> Node {
        Node::element("rect")
            .with_attr("width", format_number(self.width))
            .with_attr("height", format_number(self.height))
            .with_attr("x", format_number(self.min_x))
            .with_attr("y", format_number(self.min_y))
    }
}

/// Format a number for an attribute: `10`, `0.8`, `12.5`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spaces() {
        let vb = ViewBox::parse("0 0 100 50").unwrap();
        assert_eq!(vb.width, 100.0);
        assert_eq!(vb.height, 50.0);
    }

    #[test]
    fn test_parse_commas_and_negatives() {
        let vb = ViewBox::parse("-10,-5, 20 30").unwrap();
        assert_eq!(vb.min_x, -10.0);
        assert_eq!(vb.min_y, -5.0);
        assert_eq!(vb.width, 20.0);
        assert_eq!(vb.height, 30.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(ViewBox::parse("0 0 100").is_none());
        assert!(ViewBox::parse("a b c d").is_none());
        assert!(ViewBox::parse("").is_none());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(0.8), "0.8");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_covering_rect() {
        let rect = ViewBox::parse("1 2 3 4").unwrap().covering_rect();
        assert_eq!(rect.to_markup(), r#"<rect width="3" height="4" x="1" y="2"/>"#);
    }
}
