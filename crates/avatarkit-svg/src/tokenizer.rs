//! SVG tokenizer.
//!
//! Implements a small, permissive XML-like tokenizer as an explicit
//! finite-state machine. Each input character is classified into an
//! [`Action`] and dispatched exactly once on the `(state, action)` pair.
//! Tokens are handed to a [`TokenSink`] as soon as they are complete, so the
//! tokenizer never buffers more than the token under construction.
//!
//! Entity references are decoded in character data and attribute values.
//! CDATA sections are passed through verbatim.

use crate::entities;
use tracing::trace;

const CDATA_OPEN: &str = "![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Kinds of token emitted by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenTag,
    CloseTag,
    AttributeName,
    AttributeValue,
    Text,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::OpenTag => "open-tag",
            TokenKind::CloseTag => "close-tag",
            TokenKind::AttributeName => "attribute-name",
            TokenKind::AttributeValue => "attribute-value",
            TokenKind::Text => "text",
        }
    }
}

/// A classified fragment of the input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Tag name, attribute name, attribute value or text content.
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Receiver for tokens as they are produced.
pub trait TokenSink {
    fn process_token(&mut self, token: Token);
}

impl TokenSink for Vec<Token> {
    fn process_token(&mut self, token: Token) {
        self.push(token);
    }
}

/// Tokenization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    Cdata,
    TagBegin,
    TagName,
    TagEnd,
    AttributeNameStart,
    AttributeName,
    AttributeNameEnd,
    AttributeValueBegin,
    AttributeValue,
}

/// Input character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Lt,
    Gt,
    Space,
    Equal,
    Quote,
    Slash,
    Char,
}

impl Action {
    fn classify(ch: char) -> Self {
        match ch {
            '<' => Action::Lt,
            '>' => Action::Gt,
            ' ' | '\t' | '\n' | '\r' => Action::Space,
            '=' => Action::Equal,
            '"' | '\'' => Action::Quote,
            '/' => Action::Slash,
            _ => Action::Char,
        }
    }
}

/// Streaming SVG tokenizer.
///
/// Input may be supplied in any number of chunks via [`Tokenizer::feed`];
/// the machine state and partial buffers carry over between calls.
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    data: String,
    tag_name: String,
    attr_name: String,
    attr_value: String,
    is_closing: bool,
    opening_quote: Option<char>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: State::Data,
            data: String::new(),
            tag_name: String::new(),
            attr_name: String::new(),
            attr_value: String::new(),
            is_closing: false,
            opening_quote: None,
        }
    }

    /// Run every character of `chunk` through the state machine.
    pub fn feed<S: TokenSink + ?Sized>(&mut self, chunk: &str, sink: &mut S) {
        for ch in chunk.chars() {
            self.step(ch, sink);
        }
    }

    fn emit<S: TokenSink + ?Sized>(sink: &mut S, kind: TokenKind, value: String) {
        trace!(kind = kind.as_str(), value = %value, "Emitting token");
        sink.process_token(Token { kind, value });
    }

    fn emit_tag<S: TokenSink + ?Sized>(&self, sink: &mut S) {
        let kind = if self.is_closing {
            TokenKind::CloseTag
        } else {
            TokenKind::OpenTag
        };
        Self::emit(sink, kind, self.tag_name.clone());
    }

    fn emit_attr_name<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        Self::emit(sink, TokenKind::AttributeName, std::mem::take(&mut self.attr_name));
    }

    fn emit_attr_value<S: TokenSink + ?Sized>(&mut self, sink: &mut S) {
        let value = entities::decode(&std::mem::take(&mut self.attr_value));
        Self::emit(sink, TokenKind::AttributeValue, value);
    }

    /// Back to character data; whatever accumulated inside the tag is dropped.
    fn enter_data(&mut self) {
        self.data.clear();
        self.state = State::Data;
    }

    fn step<S: TokenSink + ?Sized>(&mut self, ch: char, sink: &mut S) {
        let action = Action::classify(ch);

        match (self.state, action) {
            (State::Data, Action::Lt) => {
                let text = std::mem::take(&mut self.data);
                if !text.trim().is_empty() {
                    Self::emit(sink, TokenKind::Text, entities::decode(&text));
                }
                self.tag_name.clear();
                self.is_closing = false;
                self.state = State::TagBegin;
            }
            (State::Data, _) => self.data.push(ch),

            (State::Cdata, _) => {
                self.data.push(ch);
                if self.data.ends_with(CDATA_CLOSE) {
                    let mut text = std::mem::take(&mut self.data);
                    text.truncate(text.len() - CDATA_CLOSE.len());
                    Self::emit(sink, TokenKind::Text, text);
                    self.state = State::Data;
                }
            }

            (State::TagBegin, Action::Space) => {}
            (State::TagBegin, Action::Slash) => {
                self.tag_name.clear();
                self.is_closing = true;
            }
            (State::TagBegin, _) => {
                self.tag_name.clear();
                self.tag_name.push(ch);
                self.state = State::TagName;
            }

            (State::TagName, Action::Space) => {
                if self.is_closing {
                    self.state = State::TagEnd;
                } else {
                    self.emit_tag(sink);
                    self.state = State::AttributeNameStart;
                }
            }
            (State::TagName, Action::Gt) => {
                self.emit_tag(sink);
                self.enter_data();
            }
            (State::TagName, Action::Slash) => {
                if !self.is_closing {
                    self.emit_tag(sink);
                }
                self.state = State::TagEnd;
            }
            (State::TagName, _) => {
                self.tag_name.push(ch);
                if self.tag_name == CDATA_OPEN {
                    self.tag_name.clear();
                    self.data.clear();
                    self.state = State::Cdata;
                }
            }

            (State::TagEnd, Action::Gt) => {
                Self::emit(sink, TokenKind::CloseTag, self.tag_name.clone());
                self.enter_data();
            }
            (State::TagEnd, _) => {}

            (State::AttributeNameStart, Action::Space) => {}
            (State::AttributeNameStart, Action::Gt) => self.enter_data(),
            (State::AttributeNameStart, Action::Slash) => {
                self.is_closing = true;
                self.state = State::TagEnd;
            }
            (State::AttributeNameStart, _) => {
                self.attr_name.clear();
                self.attr_name.push(ch);
                self.state = State::AttributeName;
            }

            (State::AttributeName, Action::Space) => self.state = State::AttributeNameEnd,
            (State::AttributeName, Action::Equal) | (State::AttributeNameEnd, Action::Equal) => {
                self.emit_attr_name(sink);
                self.state = State::AttributeValueBegin;
            }
            (State::AttributeName, Action::Gt) | (State::AttributeNameEnd, Action::Gt) => {
                self.emit_attr_name(sink);
                self.emit_attr_value(sink);
                self.enter_data();
            }
            (State::AttributeName, Action::Slash) | (State::AttributeNameEnd, Action::Slash) => {
                self.emit_attr_name(sink);
                self.emit_attr_value(sink);
                self.is_closing = true;
                self.state = State::TagEnd;
            }
            (State::AttributeName, _) => self.attr_name.push(ch),

            (State::AttributeNameEnd, Action::Space) => {}
            (State::AttributeNameEnd, _) => {
                // Previous attribute had no value.
                self.emit_attr_name(sink);
                self.emit_attr_value(sink);
                self.attr_name.push(ch);
                self.state = State::AttributeName;
            }

            (State::AttributeValueBegin, Action::Space) => {}
            (State::AttributeValueBegin, Action::Quote) => {
                self.opening_quote = Some(ch);
                self.attr_value.clear();
                self.state = State::AttributeValue;
            }
            (State::AttributeValueBegin, Action::Gt) => {
                self.emit_attr_value(sink);
                self.enter_data();
            }
            (State::AttributeValueBegin, _) => {
                self.opening_quote = None;
                self.attr_value.clear();
                self.attr_value.push(ch);
                self.state = State::AttributeValue;
            }

            (State::AttributeValue, _) => match self.opening_quote {
                Some(quote) if quote == ch => {
                    self.emit_attr_value(sink);
                    self.state = State::AttributeNameStart;
                }
                Some(_) => self.attr_value.push(ch),
                None if matches!(action, Action::Space | Action::Gt | Action::Slash) => {
                    self.emit_attr_value(sink);
                    self.state = State::AttributeNameStart;
                    self.step(ch, sink);
                }
                None => self.attr_value.push(ch),
            },
        }
    }
}

/// Tokenize a complete input string.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    Tokenizer::new().feed(input, &mut tokens);
    tokens
}
