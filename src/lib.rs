//! # payload-synonym
//!
//! A token filter for search analysis pipelines that reads synonyms from the
//! payload attached to each token and emits them as extra tokens at the same
//! position as the token that carried them.
//!
//! ## Features
//!
//! - Pull-based [`TokenStream`](analysis::token::TokenStream) abstraction with
//!   `next_token`, `reset` and `close`
//! - Single or multiple synonyms per payload, with a configurable delimiter
//! - Optional payload removal from the original token
//! - Configuration from factory arguments or JSON
//! - A small CLI to run the filter over JSON lines token dumps

pub mod analysis;
pub mod cli;
pub mod error;

pub mod prelude {
    pub use crate::analysis::token::{
        BoxTokenStream, IntoTokenStream, Token, TokenStream, TokenType, VecTokenStream,
    };
    pub use crate::analysis::token_filter::{
        Filter, PayloadSynonymConfig, PayloadSynonymFilter, PayloadSynonymTokenStream,
    };
    pub use crate::error::{PayloadSynonymError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
