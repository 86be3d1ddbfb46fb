//! Token filter implementations for token transformation.
//!
//! Filters wrap an upstream [`TokenStream`](crate::analysis::token::TokenStream)
//! and transform the tokens pulled through them.
//!
//! # Available Filters
//!
//! - [`payload_synonym::PayloadSynonymFilter`] - Expands payload-encoded synonyms
//!
//! # Examples
//!
//! ```
//! use payload_synonym::analysis::token::{IntoTokenStream, Token, TokenStream};
//! use payload_synonym::analysis::token_filter::Filter;
//! use payload_synonym::analysis::token_filter::payload_synonym::PayloadSynonymFilter;
//!
//! let filter = PayloadSynonymFilter::default();
//! let tokens = vec![Token::new("quick").with_payload("fast"), Token::new("fox")];
//! let mut stream = filter.filter(tokens.into_token_stream()).unwrap();
//!
//! let texts: Vec<_> = stream
//!     .collect_tokens()
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["quick", "fast", "fox"]);
//! ```
//!
//! # Filter Chaining
//!
//! A filter produces a stream, so the output of one filter can be handed to
//! the next:
//!
//! ```text
//! Source → PayloadSynonym → ... → Index
//! ```

use crate::analysis::token::BoxTokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// A filter holds only its configuration; calling [`Filter::filter`] builds a
/// new stream over the given input. The trait requires `Send + Sync` so a
/// single configured filter can build streams on several threads.
pub trait Filter: Send + Sync {
    /// Wrap a token stream with this filter.
    fn filter(&self, tokens: BoxTokenStream) -> Result<BoxTokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod payload_synonym;

pub use payload_synonym::{PayloadSynonymConfig, PayloadSynonymFilter, PayloadSynonymTokenStream};
