//! Option-driven rewrites of the root `svg` element.
//!
//! All steps operate on the root's direct children only, in this order:
//! size, margin, background, radius. Every step reuses the viewBox read
//! before the first mutation.

use crate::node::{Document, Node};
use crate::options::AvatarOptions;
use crate::random::Prng;
use crate::viewbox::{format_number, ViewBox};
use crate::{SvgError, SvgResult};
use std::collections::HashSet;
use tracing::debug;

/// Apply `options` to the document's root `svg` element.
pub fn apply_options(document: &mut Document, options: &AvatarOptions) -> SvgResult<()> {
    let svg = document.svg_mut().ok_or(SvgError::NothingToParse)?;
    let view_box = ViewBox::of(svg);

    let view_box = match view_box {
        Some(vb) => Some(vb),
        None if options.needs_view_box() => return Err(SvgError::MissingViewBox),
        None => None,
    };

    for (name, value) in [("margin", options.margin), ("radius", options.radius)] {
        if let Some(v) = value {
            if !(0.0..=100.0).contains(&v) {
                debug!(option = name, value = v, "Option outside 0-100, applying as given");
            }
        }
    }

    set_size(svg, options.width, options.height);

    if let Some(vb) = view_box {
        if let Some(margin) = options.margin {
            add_margin(svg, &vb, margin);
        }
        if let Some(background) = &options.background {
            add_background(svg, &vb, background);
        }
        if let Some(radius) = options.radius {
            add_radius(svg, &vb, radius);
        }
    }

    Ok(())
}

/// Override the root `width`/`height` attributes.
pub fn set_size(svg: &mut Node, width: Option<f64>, height: Option<f64>) {
    if let Some(width) = width {
        svg.set_attr("width", format_number(width));
    }
    if let Some(height) = height {
        svg.set_attr("height", format_number(height));
    }
}

/// Split children into (kept in place, groupable), each in original order.
fn partition_groupable(svg: &mut Node) -> (Vec<Node>, Vec<Node>) {
    std::mem::take(&mut svg.children)
        .into_iter()
        .partition(|child| !child.is_groupable())
}

/// Inset the groupable children by `margin` percent of the viewBox.
pub fn add_margin(svg: &mut Node, view_box: &ViewBox, margin: f64) {
    let translate_x = view_box.width * margin / 100.0;
    let translate_y = view_box.height * margin / 100.0;
    let scale = 1.0 - margin * 2.0 / 100.0;
    debug!(translate_x, translate_y, scale, "Adding margin");

    let (mut children, groupable) = partition_groupable(svg);

    let mut scaled = Vec::with_capacity(groupable.len() + 1);
    scaled.push(view_box.covering_rect().with_attr("fill", "none"));
    scaled.extend(groupable);

    let inner = Node::element("g")
        .with_attr("transform", format!("scale({})", format_number(scale)))
        .with_children(scaled);
    let outer = Node::element("g")
        .with_attr(
            "transform",
            format!(
                "translate({}, {})",
                format_number(translate_x),
                format_number(translate_y)
            ),
        )
        .with_children(vec![inner]);

    children.push(outer);
    svg.children = children;
}

/// Insert a full-canvas rect filled with `paint` behind everything else.
pub fn add_background(svg: &mut Node, view_box: &ViewBox, paint: &str) {
    debug!(paint, "Adding background");
    let mut rect = Node::element("rect").with_attr("fill", paint);
    rect.attributes.extend(view_box.covering_rect().attributes);
    svg.children.insert(0, rect);
}

/// Round the corners of the groupable children with a generated mask.
pub fn add_radius(svg: &mut Node, view_box: &ViewBox, radius: f64) {
    let rx = view_box.width * radius / 100.0;
    let ry = view_box.height * radius / 100.0;
    let markup = svg.to_markup();
    let mask_id = generate_mask_id(&markup, &svg.find_ids().into_iter().collect());
    debug!(rx, ry, mask_id = %mask_id, "Adding radius mask");

    let (mut children, groupable) = partition_groupable(svg);

    let mask_rect = Node::element("rect")
        .with_attr("width", format_number(view_box.width))
        .with_attr("height", format_number(view_box.height))
        .with_attr("rx", format_number(rx))
        .with_attr("ry", format_number(ry))
        .with_attr("x", format_number(view_box.min_x))
        .with_attr("y", format_number(view_box.min_y))
        .with_attr("fill", "#fff");
    let mask = Node::element("mask")
        .with_attr("id", mask_id.clone())
        .with_children(vec![mask_rect]);
    let masked = Node::element("g")
        .with_attr("mask", format!("url(#{})", mask_id))
        .with_children(groupable);

    children.push(mask);
    children.push(masked);
    svg.children = children;
}

/// A mask id drawn from a PRNG seeded with `seed`, skipping `existing` ids.
fn generate_mask_id(seed: &str, existing: &HashSet<&str>) -> String {
    let mut prng = Prng::new(seed);
    loop {
        let id = format!("mask-{:08x}", prng.next() as u32);
        if !existing.contains(id.as_str()) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svg_of(markup: &str) -> Document {
        Document::parse(markup).unwrap()
    }

    #[test]
    fn test_set_size_only() {
        let mut doc = svg_of(r#"<svg width="10"><circle/></svg>"#);
        let options = AvatarOptions {
            width: Some(64.0),
            height: Some(48.0),
            ..Default::default()
        };
        apply_options(&mut doc, &options).unwrap();
        assert_eq!(doc.to_markup(), r#"<svg width="64" height="48"><circle/></svg>"#);
    }

    #[test]
    fn test_size_does_not_need_view_box() {
        let mut doc = svg_of("<svg/>");
        let options = AvatarOptions {
            width: Some(1.0),
            ..Default::default()
        };
        assert!(apply_options(&mut doc, &options).is_ok());
    }

    #[test]
    fn test_geometry_needs_view_box() {
        let mut doc = svg_of("<svg><circle/></svg>");
        let options = AvatarOptions {
            margin: Some(10.0),
            ..Default::default()
        };
        assert!(matches!(
            apply_options(&mut doc, &options),
            Err(SvgError::MissingViewBox)
        ));
        assert_eq!(doc.to_markup(), "<svg><circle/></svg>");
    }

    #[test]
    fn test_margin_keeps_metadata_in_place() {
        let mut doc = svg_of(r#"<svg viewBox="0 0 100 100"><title>t</title><circle/><desc>d</desc><path/></svg>"#);
        let options = AvatarOptions {
            margin: Some(10.0),
            ..Default::default()
        };
        apply_options(&mut doc, &options).unwrap();
        let svg = doc.svg().unwrap();
        let names: Vec<&str> = svg.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["title", "desc", "g"]);
        let inner = &svg.children[2].children[0];
        let inner_names: Vec<&str> = inner.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(inner_names, vec!["rect", "circle", "path"]);
    }

    #[test]
    fn test_margin_with_offset_view_box() {
        let mut doc = svg_of(r#"<svg viewBox="-5 -5 40 20"><circle/></svg>"#);
        let options = AvatarOptions {
            margin: Some(25.0),
            ..Default::default()
        };
        apply_options(&mut doc, &options).unwrap();
        assert_eq!(
            doc.to_markup(),
            concat!(
                r#"<svg viewBox="-5 -5 40 20"><g transform="translate(10, 5)">"#,
                r#"<g transform="scale(0.5)">"#,
                r#"<rect width="40" height="20" x="-5" y="-5" fill="none"/><circle/>"#,
                r#"</g></g></svg>"#
            )
        );
    }

    #[test]
    fn test_background_rect_attributes() {
        let mut doc = svg_of(r#"<svg viewBox="0 0 8 8"><path/></svg>"#);
        let options = AvatarOptions {
            background: Some("#abcdef".into()),
            ..Default::default()
        };
        apply_options(&mut doc, &options).unwrap();
        assert_eq!(
            doc.to_markup(),
            r##"<svg viewBox="0 0 8 8"><rect fill="#abcdef" width="8" height="8" x="0" y="0"/><path/></svg>"##
        );
    }

    #[test]
    fn test_radius_masks_background_too() {
        let mut doc = svg_of(r#"<svg viewBox="0 0 10 10"><path/></svg>"#);
        let options = AvatarOptions {
            background: Some("red".into()),
            radius: Some(10.0),
            ..Default::default()
        };
        apply_options(&mut doc, &options).unwrap();
        let svg = doc.svg().unwrap();
        assert_eq!(svg.children.len(), 2);
        let group = &svg.children[1];
        assert_eq!(group.children[0].attr("fill"), Some("red"));
        assert_eq!(group.children[1].name, "path");
    }

    #[test]
    fn test_mask_id_is_deterministic_and_unique() {
        let markup = r#"<svg viewBox="0 0 10 10"><path/></svg>"#;
        let options = AvatarOptions {
            radius: Some(20.0),
            ..Default::default()
        };
        let mut a = svg_of(markup);
        let mut b = svg_of(markup);
        apply_options(&mut a, &options).unwrap();
        apply_options(&mut b, &options).unwrap();
        assert_eq!(a, b);

        let id = a.svg().unwrap().children[0].attr("id").unwrap();
        assert!(id.starts_with("mask-"));
        assert_eq!(id.len(), "mask-".len() + 8);
    }

    #[test]
    fn test_mask_id_avoids_existing_ids() {
        let first = generate_mask_id("<svg/>", &HashSet::new());
        let taken: HashSet<&str> = [first.as_str()].into_iter().collect();
        let second = generate_mask_id("<svg/>", &taken);
        assert_ne!(first, second);
        assert!(second.starts_with("mask-"));
    }

    #[test]
    fn test_negative_margin_is_computed_through() {
        let mut doc = svg_of(r#"<svg viewBox="0 0 100 100"><circle/></svg>"#);
        let options = AvatarOptions {
            margin: Some(-10.0),
            ..Default::default()
        };
        apply_options(&mut doc, &options).unwrap();
        let outer = &doc.svg().unwrap().children[0];
        assert_eq!(outer.attr("transform"), Some("translate(-10, -10)"));
        assert_eq!(outer.children[0].attr("transform"), Some("scale(1.2)"));
    }
}
