//! Token types and the pull-based token stream abstraction.
//!
//! This module defines the core data structures that flow through the
//! analysis pipeline.
//!
//! # Core Types
//!
//! - [`Token`] - A single analyzed token with text, offsets, position and payload
//! - [`TokenType`] - Classification tag of a token
//! - [`TokenStream`] - Pull-based source of tokens (`next_token`, `reset`, `close`)
//! - [`VecTokenStream`] - Replayable in-memory token stream
//!
//! # Token Graphs
//!
//! Tokens describe positions relative to each other through
//! `position_increment`. Synonyms share the position of the token they were
//! derived from:
//!
//! ```text
//! Input: "quick" with payload "fast"
//!
//! Token Graph:
//!   Position 0: "quick" (pos_inc=1)
//!   Position 0: "fast"  (pos_inc=0, type=synonym)  ← same position
//! ```
//!
//! # Examples
//!
//! ```
//! use payload_synonym::analysis::token::{Token, TokenStream, VecTokenStream};
//!
//! let mut stream = VecTokenStream::new(vec![
//!     Token::with_offsets("hello", 0, 5),
//!     Token::with_offsets("world", 6, 11).with_payload("earth"),
//! ]);
//!
//! let tokens = stream.collect_tokens().unwrap();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].payload.as_deref(), Some("earth".as_bytes()));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PayloadSynonymError, Result};

/// A token represents a single unit of text after tokenization.
///
/// # Fields
///
/// - `text` - The token's text content
/// - `start_offset` / `end_offset` - Byte offsets in original text
/// - `token_type` - Type tag (default: [`TokenType::Word`])
/// - `position_increment` - Position relative to previous token (default: 1)
/// - `position_length` - Number of positions this token spans (default: 1)
/// - `payload` - Optional raw bytes attached to the token
///
/// # Examples
///
/// ```
/// use payload_synonym::analysis::token::{Token, TokenType};
///
/// let token = Token::new("search")
///     .with_token_type(TokenType::Alphanum)
///     .with_payload(vec![1, 2, 3]);
///
/// assert_eq!(token.text, "search");
/// assert_eq!(token.position_increment, 1);
/// assert!(token.has_payload());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The byte offset where this token starts in the original text
    #[serde(default)]
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    #[serde(default)]
    pub end_offset: usize,

    /// Type tag of the token
    #[serde(default, rename = "type")]
    pub token_type: TokenType,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1 (default): Normal increment, next position
    /// - 0: Same position as previous token (e.g., for synonyms)
    /// - >1: Skip positions (e.g., for removed stop words)
    #[serde(default = "default_position_value")]
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    #[serde(default = "default_position_value")]
    pub position_length: usize,

    /// Raw bytes attached to the token by an earlier stage of the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<u8>>,
}

fn default_position_value() -> usize {
    1
}

/// Token type classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Plain word, the type assigned by most tokenizers
    #[default]
    Word,
    /// Alphanumeric text
    Alphanum,
    /// Numeric values
    Num,
    /// Synonym token (generated by a synonym filter)
    Synonym,
    /// Other/unknown token types
    Other,
}

impl TokenType {
    /// The stable string tag of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Word => "word",
            TokenType::Alphanum => "alphanum",
            TokenType::Num => "num",
            TokenType::Synonym => "synonym",
            TokenType::Other => "other",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            start_offset: 0,
            end_offset: 0,
            token_type: TokenType::Word,
            position_increment: 1,
            position_length: 1,
            payload: None,
        }
    }

    /// Create a new token with text and byte offsets.
    pub fn with_offsets<S: Into<String>>(text: S, start_offset: usize, end_offset: usize) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text)
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Attach a payload to this token.
    pub fn with_payload<B: Into<Vec<u8>>>(mut self, payload: B) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Check if this token carries a payload.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Remove and return the payload of this token.
    pub fn take_payload(&mut self) -> Option<Vec<u8>> {
        self.payload.take()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A pull-based stream of tokens.
///
/// Consumers call [`next_token`](TokenStream::next_token) until it returns
/// `Ok(None)`. Filters wrap another `TokenStream` and are streams themselves,
/// so they can be chained.
pub trait TokenStream {
    /// Pull the next token, or `None` once the stream is exhausted.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Rewind the stream to its start and drop any buffered state.
    fn reset(&mut self) -> Result<()>;

    /// Release resources held by the stream.
    fn close(&mut self) -> Result<()>;

    /// Drain the remaining tokens into a vector.
    fn collect_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// A boxed token stream that can cross thread boundaries.
pub type BoxTokenStream = Box<dyn TokenStream + Send>;

impl<S: TokenStream + ?Sized> TokenStream for Box<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<S: TokenStream + ?Sized> TokenStream for &mut S {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// An in-memory token stream that can be replayed with [`TokenStream::reset`].
#[derive(Clone, Debug, Default)]
pub struct VecTokenStream {
    tokens: Vec<Token>,
    cursor: usize,
    closed: bool,
}

impl VecTokenStream {
    /// Create a stream over the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        VecTokenStream {
            tokens,
            cursor: 0,
            closed: false,
        }
    }

    /// Number of tokens not yet pulled.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    /// Check if the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl TokenStream for VecTokenStream {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.closed {
            return Err(PayloadSynonymError::invalid_operation(
                "next_token called on a closed stream",
            ));
        }

        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        Ok(token)
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        self.closed = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> BoxTokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> BoxTokenStream {
        Box::new(VecTokenStream::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello");
        assert_eq!(token.text, "hello");
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.token_type, TokenType::Word);
        assert_eq!(token.position_increment, 1);
        assert_eq!(token.position_length, 1);
        assert!(token.payload.is_none());
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("world", 6, 11);
        assert_eq!(token.text, "world");
        assert_eq!(token.start_offset, 6);
        assert_eq!(token.end_offset, 11);
    }

    #[test]
    fn test_token_methods() {
        let mut token = Token::new("test")
            .with_token_type(TokenType::Alphanum)
            .with_position_increment(2)
            .with_position_length(3)
            .with_payload("D_E");

        assert_eq!(token.token_type, TokenType::Alphanum);
        assert_eq!(token.position_increment, 2);
        assert_eq!(token.position_length, 3);
        assert!(token.has_payload());

        assert_eq!(token.take_payload(), Some(b"D_E".to_vec()));
        assert!(!token.has_payload());

        let copy = token.with_text("other");
        assert_eq!(copy.text, "other");
        assert_eq!(copy.position_increment, 2);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello");
        assert_eq!(format!("{token}"), "hello");
        assert_eq!(TokenType::Synonym.to_string(), "synonym");
    }

    #[test]
    fn test_token_deserialize_defaults() {
        let token: Token = serde_json::from_str(r#"{"text": "A"}"#).unwrap();
        assert_eq!(token, Token::new("A"));

        let token: Token =
            serde_json::from_str(r#"{"text": "B", "type": "synonym", "position_increment": 0}"#)
                .unwrap();
        assert_eq!(token.token_type, TokenType::Synonym);
        assert_eq!(token.position_increment, 0);
    }

    #[test]
    fn test_vec_token_stream_exhaustion_and_reset() {
        let mut stream = VecTokenStream::new(vec![Token::new("hello"), Token::new("world")]);

        assert_eq!(stream.next_token().unwrap().unwrap().text, "hello");
        assert_eq!(stream.remaining(), 1);
        assert_eq!(stream.next_token().unwrap().unwrap().text, "world");
        assert!(stream.next_token().unwrap().is_none());
        assert!(stream.next_token().unwrap().is_none());

        stream.reset().unwrap();
        assert_eq!(stream.collect_tokens().unwrap().len(), 2);
    }

    #[test]
    fn test_vec_token_stream_close() {
        let mut stream = VecTokenStream::new(vec![Token::new("hello")]);
        stream.close().unwrap();
        assert!(stream.is_closed());

        match stream.next_token() {
            Err(PayloadSynonymError::InvalidOperation(_)) => {}
            other => panic!("Expected invalid operation, got {other:?}"),
        }

        stream.reset().unwrap();
        assert_eq!(stream.next_token().unwrap().unwrap().text, "hello");
    }

    #[test]
    fn test_token_stream() {
        let tokens = vec![Token::new("hello"), Token::new("world")];

        let mut stream = tokens.into_token_stream();
        let collected = stream.collect_tokens().unwrap();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].text, "hello");
        assert_eq!(collected[1].text, "world");
    }
}
