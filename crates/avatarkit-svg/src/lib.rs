//! # AvatarKit SVG
//!
//! A small SVG micro-parser used to post-process generated avatar markup.
//!
//! ## Features
//!
//! - **Tokenizer**: character-at-a-time state machine, resumable across chunks
//! - **Tree builder**: permissive construction of an owned element/text tree
//! - **Serializer**: markup output with CDATA text escaping and self-closing tags
//! - **Mutation**: size, margin, background and corner-radius rewrites
//! - **Utilities**: seeded PRNG for variant picking, data URI encoding
//!
//! ## Architecture
//!
//! ```text
//! markup ──► Tokenizer ──► Token stream ──► TreeBuilder ──► Document
//!                                                             │
//!                                           apply_options ◄───┘
//!                                                 │
//!                                                 ▼
//!                                            Serializer ──► markup
//! ```

pub mod data_uri;
pub mod entities;
pub mod mutate;
pub mod node;
pub mod options;
pub mod random;
pub mod serializer;
pub mod tokenizer;
pub mod tree_builder;
pub mod viewbox;

use thiserror::Error;

pub use data_uri::{decode_data_uri, to_base64_data_uri, to_utf8_data_uri};
pub use mutate::apply_options;
pub use node::{Attributes, Document, Node, NodeKind};
pub use options::AvatarOptions;
pub use random::Prng;
pub use serializer::SerializeOptions;
pub use tokenizer::{tokenize, Token, TokenKind, TokenSink, Tokenizer};
pub use tree_builder::TreeBuilder;
pub use viewbox::ViewBox;

/// Errors that can occur while processing avatar markup.
#[derive(Error, Debug)]
pub enum SvgError {
    /// The parsed document has no top-level `svg` element.
    #[error("nothing to parse: no top-level <svg> element found")]
    NothingToParse,

    /// A geometry option was requested but the root has no usable viewBox.
    #[error("missing or malformed viewBox on root <svg> element")]
    MissingViewBox,

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}

/// Result type for SVG operations.
pub type SvgResult<T> = Result<T, SvgError>;

/// Parse `markup`, apply `options` and serialize the result.
pub fn render(markup: &str, options: &AvatarOptions) -> SvgResult<String> {
    render_with(markup, options, &SerializeOptions::default())
}

/// Like [`render`], with explicit serializer settings.
pub fn render_with(
    markup: &str,
    options: &AvatarOptions,
    serialize: &SerializeOptions,
) -> SvgResult<String> {
    let mut document = Document::parse(markup)?;
    apply_options(&mut document, options)?;
    Ok(document.to_markup_with(serialize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_options_round_trips() {
        let out = render(
            r#"<svg viewBox="0 0 10 10"><rect x="1"></rect></svg>"#,
            &AvatarOptions::default(),
        )
        .unwrap();
        assert_eq!(out, r#"<svg viewBox="0 0 10 10"><rect x="1"/></svg>"#);
    }

    #[test]
    fn test_render_rejects_non_svg() {
        let err = render("<g><rect/></g>", &AvatarOptions::default()).unwrap_err();
        assert!(matches!(err, SvgError::NothingToParse));
    }

    #[test]
    fn test_render_with_explicit_close() {
        let serialize = SerializeOptions {
            self_close: false,
            ..Default::default()
        };
        let out = render_with("<svg><path/></svg>", &AvatarOptions::default(), &serialize).unwrap();
        assert_eq!(out, "<svg><path></path></svg>");
    }
}
