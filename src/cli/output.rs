//! Token records read and written by the CLI.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenType};
use crate::cli::args::OutputFormat;
use crate::error::{PayloadSynonymError, Result};

/// A token as it appears in a JSON lines dump.
///
/// `payload` carries UTF-8 text; `payload_bytes` carries raw bytes and is
/// the only way to feed a payload that is not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    #[serde(default, alias = "start_offset")]
    pub start: usize,
    #[serde(default, alias = "end_offset")]
    pub end: usize,
    #[serde(default, rename = "type")]
    pub token_type: TokenType,
    #[serde(default = "default_position_increment")]
    pub position_increment: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_bytes: Option<Vec<u8>>,
}

fn default_position_increment() -> usize {
    1
}

impl TokenRecord {
    /// Convert this record into a token.
    pub fn into_token(self) -> Result<Token> {
        let payload = match (self.payload, self.payload_bytes) {
            (Some(_), Some(_)) => {
                return Err(PayloadSynonymError::analysis(format!(
                    "token {:?} sets both payload and payload_bytes",
                    self.text
                )));
            }
            (Some(text), None) => Some(text.into_bytes()),
            (None, bytes) => bytes,
        };

        let mut token = Token::with_offsets(self.text, self.start, self.end)
            .with_token_type(self.token_type)
            .with_position_increment(self.position_increment);
        token.payload = payload;
        Ok(token)
    }
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        let (payload, payload_bytes) = match &token.payload {
            Some(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => (Some(text.to_string()), None),
                Err(_) => (None, Some(bytes.clone())),
            },
            None => (None, None),
        };

        TokenRecord {
            text: token.text.clone(),
            start: token.start_offset,
            end: token.end_offset,
            token_type: token.token_type,
            position_increment: token.position_increment,
            payload,
            payload_bytes,
        }
    }
}

/// Summary of an expand run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpandSummary {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub synonyms: usize,
}

/// Write a single token in the requested format.
pub fn write_token<W: Write>(
    writer: &mut W,
    token: &Token,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => write_token_human(writer, token),
        OutputFormat::Json => {
            let record = TokenRecord::from(token);
            let line = if pretty {
                serde_json::to_string_pretty(&record)?
            } else {
                serde_json::to_string(&record)?
            };
            writeln!(writer, "{line}")?;
            Ok(())
        }
    }
}

fn write_token_human<W: Write>(writer: &mut W, token: &Token) -> Result<()> {
    write!(
        writer,
        "{}\t[{}..{}]\t{}\t+{}",
        token.text, token.start_offset, token.end_offset, token.token_type, token.position_increment
    )?;

    if let Some(payload) = &token.payload {
        write!(writer, "\tpayload={}", String::from_utf8_lossy(payload))?;
    }

    writeln!(writer)?;
    Ok(())
}
