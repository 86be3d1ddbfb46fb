//! Payload synonym filter.
//!
//! Reads the payload of each token and emits it as one or more synonym tokens
//! at the same position as the token that carried it. Only single-token
//! synonyms are produced: every synonym gets `position_increment = 0` and
//! inherits the offsets of the original token.
//!
//! The payload is expected to be UTF-8 text. With
//! [`multiple_tokens`](PayloadSynonymConfig::multiple_tokens) it is split on
//! the delimiter into several synonyms; otherwise every delimiter is replaced
//! by a space and the whole payload becomes a single synonym.
//!
//! # Examples
//!
//! ```
//! use payload_synonym::analysis::token::{Token, TokenStream, TokenType, VecTokenStream};
//! use payload_synonym::analysis::token_filter::payload_synonym::{
//!     PayloadSynonymConfig, PayloadSynonymFilter,
//! };
//!
//! let config = PayloadSynonymConfig::default().with_multiple_tokens(true);
//! let filter = PayloadSynonymFilter::new(config).unwrap();
//!
//! let source = VecTokenStream::new(vec![Token::with_offsets("A", 0, 1).with_payload("D_E")]);
//! let tokens = filter.wrap(source).collect_tokens().unwrap();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].text, "D");
//! assert_eq!(tokens[2].text, "E");
//! assert_eq!(tokens[2].position_increment, 0);
//! assert_eq!(tokens[2].token_type, TokenType::Synonym);
//! ```

use std::collections::{HashMap, VecDeque};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::token::{BoxTokenStream, Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::{PayloadSynonymError, Result};

/// Argument key enabling payload removal.
pub const REMOVE_PAYLOAD_ARG: &str = "remove";
/// Argument key enabling multiple synonym tokens.
pub const MULTIPLE_TOKENS_ARG: &str = "multiple";
/// Argument key for the delimiter.
pub const DELIMITER_ARG: &str = "delimiter";
/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = "_";

/// Keys every analysis factory accepts and ignores.
const IGNORED_ARGS: &[&str] = &["class", "luceneMatchVersion"];

/// Configuration of the payload synonym filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadSynonymConfig {
    /// Clear the payload of the original token after it has been read.
    #[serde(alias = "remove")]
    pub remove_payload: bool,

    /// Split the payload on the delimiter into several synonym tokens.
    #[serde(alias = "multiple")]
    pub multiple_tokens: bool,

    /// Literal separator between synonyms in the payload.
    pub delimiter: String,
}

impl Default for PayloadSynonymConfig {
    fn default() -> Self {
        Self {
            remove_payload: false,
            multiple_tokens: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl PayloadSynonymConfig {
    /// Build a configuration from factory arguments.
    ///
    /// Recognised keys are `remove`, `multiple` and `delimiter`. Unknown keys
    /// are rejected.
    pub fn from_args(args: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        for (key, value) in args {
            match key.as_str() {
                REMOVE_PAYLOAD_ARG => config.remove_payload = parse_bool(key, value)?,
                MULTIPLE_TOKENS_ARG => config.multiple_tokens = parse_bool(key, value)?,
                DELIMITER_ARG => config.delimiter = value.clone(),
                k if IGNORED_ARGS.contains(&k) => {}
                _ => {
                    return Err(PayloadSynonymError::invalid_config(format!(
                        "Unknown parameter: {key}"
                    )));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a filter.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(PayloadSynonymError::invalid_config(
                "delimiter must not be empty",
            ));
        }
        Ok(())
    }

    /// Set whether the payload is removed from the original token.
    pub fn with_remove_payload(mut self, remove_payload: bool) -> Self {
        self.remove_payload = remove_payload;
        self
    }

    /// Set whether the payload is split into several synonyms.
    pub fn with_multiple_tokens(mut self, multiple_tokens: bool) -> Self {
        self.multiple_tokens = multiple_tokens;
        self
    }

    /// Set the delimiter.
    pub fn with_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Turn decoded payload text into the synonyms to emit, in order.
    ///
    /// Every piece is kept, including empty ones produced by adjacent,
    /// leading or trailing delimiters.
    fn synonyms(&self, payload: &str) -> VecDeque<String> {
        if self.multiple_tokens {
            payload
                .split(self.delimiter.as_str())
                .map(str::to_string)
                .collect()
        } else {
            VecDeque::from([payload.replace(self.delimiter.as_str(), " ")])
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(PayloadSynonymError::invalid_config(format!(
            "Parameter {key} must be true or false, got {value:?}"
        )))
    }
}

/// A filter that expands token payloads into synonym tokens.
///
/// The filter only holds a validated configuration. Use
/// [`wrap`](PayloadSynonymFilter::wrap) to build a statically typed stream or
/// [`Filter::filter`] to build a boxed one.
#[derive(Clone, Debug, Default)]
pub struct PayloadSynonymFilter {
    config: PayloadSynonymConfig,
}

impl PayloadSynonymFilter {
    /// Create a new filter from a configuration.
    pub fn new(config: PayloadSynonymConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a new filter from factory arguments.
    pub fn from_args(args: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            config: PayloadSynonymConfig::from_args(args)?,
        })
    }

    /// Get the configuration of this filter.
    pub fn config(&self) -> &PayloadSynonymConfig {
        &self.config
    }

    /// Wrap a token stream with this filter.
    pub fn wrap<S: TokenStream>(&self, input: S) -> PayloadSynonymTokenStream<S> {
        PayloadSynonymTokenStream {
            input,
            config: self.config.clone(),
            pending: None,
        }
    }
}

impl Filter for PayloadSynonymFilter {
    fn filter(&self, tokens: BoxTokenStream) -> Result<BoxTokenStream> {
        Ok(Box::new(self.wrap(tokens)))
    }

    fn name(&self) -> &'static str {
        "payload_synonym"
    }
}

/// Synonyms still to be emitted, together with the token they came from.
#[derive(Debug)]
struct PendingSynonyms {
    snapshot: Token,
    synonyms: VecDeque<String>,
}

/// Token stream emitting each token followed by the synonyms in its payload.
///
/// While synonyms of a token are pending, no token is pulled from the input.
#[derive(Debug)]
pub struct PayloadSynonymTokenStream<S> {
    input: S,
    config: PayloadSynonymConfig,
    pending: Option<PendingSynonyms>,
}

impl<S: TokenStream> PayloadSynonymTokenStream<S> {
    /// Create a new stream over `input`.
    pub fn new(input: S, config: PayloadSynonymConfig) -> Result<Self> {
        Ok(PayloadSynonymFilter::new(config)?.wrap(input))
    }

    /// Check if synonyms of the last token are still waiting to be emitted.
    pub fn is_expanding(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of synonyms waiting to be emitted.
    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, |p| p.synonyms.len())
    }

    /// Get a reference to the wrapped stream.
    pub fn get_ref(&self) -> &S {
        &self.input
    }

    /// Unwrap this stream, returning the wrapped one.
    pub fn into_inner(self) -> S {
        self.input
    }

    fn next_synonym(&mut self) -> Option<Token> {
        let pending = self.pending.as_mut()?;
        let text = pending.synonyms.pop_front()?;

        let mut token = if pending.synonyms.is_empty() {
            self.pending.take()?.snapshot
        } else {
            pending.snapshot.clone()
        };

        token.text = text;
        token.position_increment = 0;
        token.token_type = TokenType::Synonym;
        Some(token)
    }
}

impl<S: TokenStream> TokenStream for PayloadSynonymTokenStream<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(synonym) = self.next_synonym() {
            return Ok(Some(synonym));
        }

        let Some(mut token) = self.input.next_token()? else {
            return Ok(None);
        };

        if let Some(payload) = token.payload.as_deref() {
            let synonyms = match std::str::from_utf8(payload) {
                Ok(text) => self.config.synonyms(text),
                Err(err) => {
                    warn!("payload of token {:?} is not valid UTF-8: {err}", token.text);
                    return Err(PayloadSynonymError::payload_decode(token.text, err));
                }
            };

            if self.config.remove_payload {
                token.payload = None;
            }

            // Splitting and replacing both yield at least one piece.
            trace!("token {:?} expands to {:?}", token.text, synonyms);
            self.pending = Some(PendingSynonyms {
                snapshot: token.clone(),
                synonyms,
            });
        }

        Ok(Some(token))
    }

    fn reset(&mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            debug!(
                "reset discards {} pending synonym(s) of {:?}",
                pending.synonyms.len(),
                pending.snapshot.text
            );
        }
        self.input.reset()
    }

    fn close(&mut self) -> Result<()> {
        debug!("closing payload synonym stream");
        self.input.close()
    }
}
