//! Tree builder.
//!
//! Consumes tokens and builds a [`Document`]. Construction happens in an
//! arena where each slot records its parent index; the arena is folded into
//! an owned [`Node`] tree by [`TreeBuilder::finish`], so no parent link
//! outlives the build.

use crate::node::{Document, Node};
use crate::tokenizer::{Token, TokenKind, TokenSink, Tokenizer};
use crate::{SvgError, SvgResult};
use tracing::{debug, trace};

const ROOT: usize = 0;

#[derive(Debug)]
struct Slot {
    node: Node,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Incremental tree builder.
#[derive(Debug)]
pub struct TreeBuilder {
    tokenizer: Tokenizer,
    slots: Vec<Slot>,
    current: usize,
    pending_attr: Option<String>,
    /// Inside the tag of an XML declaration, DOCTYPE or comment.
    skipping: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            slots: vec![Slot {
                node: Node::element(""),
                parent: None,
                children: Vec::new(),
            }],
            current: ROOT,
            pending_attr: None,
            skipping: false,
        }
    }

    /// Tokenize `chunk` and apply the resulting tokens.
    pub fn feed(&mut self, chunk: &str) {
        let mut tokenizer = std::mem::take(&mut self.tokenizer);
        tokenizer.feed(chunk, self);
        self.tokenizer = tokenizer;
    }

    /// Name of the element under the cursor; empty at the root.
    pub fn current_name(&self) -> &str {
        &self.slots[self.current].node.name
    }

    /// Depth of the cursor below the synthetic root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut index = self.current;
        while let Some(parent) = self.slots[index].parent {
            depth += 1;
            index = parent;
        }
        depth
    }

    fn append(&mut self, node: Node) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot {
            node,
            parent: Some(self.current),
            children: Vec::new(),
        });
        self.slots[self.current].children.push(index);
        index
    }

    fn handle_open_tag(&mut self, name: String) {
        let index = self.append(Node::element(name));
        self.current = index;
    }

    fn handle_close_tag(&mut self, name: String) {
        let Some(parent) = self.slots[self.current].parent else {
            debug!(tag = %name, "Ignoring close tag with no open element");
            return;
        };
        let open = &self.slots[self.current].node.name;
        if *open != name {
            debug!(open = %open, close = %name, "Mismatched close tag, abandoning element");
        }
        self.current = parent;
    }

    fn handle_attribute_name(&mut self, name: String) {
        if self.current == ROOT {
            return;
        }
        self.slots[self.current].node.set_attr(name.clone(), "");
        self.pending_attr = Some(name);
    }

    fn handle_attribute_value(&mut self, value: String) {
        if self.current == ROOT {
            return;
        }
        if let Some(name) = self.pending_attr.take() {
            self.slots[self.current].node.set_attr(name, value);
        }
    }

    /// Finish building and validate the result.
    pub fn finish(self) -> SvgResult<Document> {
        let mut slots = self.slots;
        let root = assemble(&mut slots, ROOT);

        if !root.children.iter().any(|n| n.is_element_named("svg")) {
            return Err(SvgError::NothingToParse);
        }

        Ok(Document { root })
    }
}

fn is_declaration(name: &str) -> bool {
    name.starts_with('?') || name.starts_with('!')
}

fn assemble(slots: &mut [Slot], index: usize) -> Node {
    let child_indices = std::mem::take(&mut slots[index].children);
    let mut node = std::mem::replace(&mut slots[index].node, Node::text(""));
    node.children = child_indices
        .into_iter()
        .map(|child| assemble(slots, child))
        .collect();
    node
}

impl TokenSink for TreeBuilder {
    fn process_token(&mut self, token: Token) {
        trace!(kind = token.kind.as_str(), value = %token.value, depth = self.depth(), "Processing token");

        match token.kind {
            TokenKind::OpenTag | TokenKind::CloseTag if is_declaration(&token.value) => {
                self.skipping = true;
                self.pending_attr = None;
            }
            TokenKind::AttributeName | TokenKind::AttributeValue if self.skipping => {}
            TokenKind::OpenTag => {
                self.skipping = false;
                self.handle_open_tag(token.value);
            }
            TokenKind::CloseTag => {
                self.skipping = false;
                self.handle_close_tag(token.value);
            }
            TokenKind::Text => {
                self.skipping = false;
                self.append(Node::text(token.value));
            }
            TokenKind::AttributeName => self.handle_attribute_name(token.value),
            TokenKind::AttributeValue => self.handle_attribute_value(token.value),
        }
    }
}
