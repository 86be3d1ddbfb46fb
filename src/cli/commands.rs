//! Command implementations for the payload-synonym CLI.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};

use log::{debug, info};

use crate::analysis::token::{Token, TokenStream, VecTokenStream};
use crate::analysis::token_filter::payload_synonym::{PayloadSynonymConfig, PayloadSynonymFilter};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{PayloadSynonymError, Result};

/// Execute a CLI command.
pub fn execute_command(args: PayloadSynonymArgs) -> Result<()> {
    match &args.command {
        Command::Expand(expand_args) => expand(expand_args, &args),
    }
}

/// Run the filter over a token dump and print the result.
fn expand(args: &ExpandArgs, cli_args: &PayloadSynonymArgs) -> Result<()> {
    let filter = build_filter(args)?;
    debug!("filter configuration: {:?}", filter.config());

    let reader: Box<dyn BufRead> = if args.reads_stdin() {
        Box::new(BufReader::new(io::stdin()))
    } else {
        debug!("reading tokens from {}", args.input.display());
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let summary = expand_tokens(
        reader,
        &mut writer,
        &filter,
        cli_args.output_format,
        cli_args.pretty,
    )?;
    writer.flush()?;

    info!(
        "expanded {} tokens into {} ({} synonyms)",
        summary.input_tokens, summary.output_tokens, summary.synonyms
    );
    Ok(())
}

/// Build the filter from the config file (if any) and command line flags.
///
/// Flags only ever switch options on or replace the delimiter; they never
/// turn off an option set in the file.
pub fn build_filter(args: &ExpandArgs) -> Result<PayloadSynonymFilter> {
    let mut config = match &args.config {
        Some(path) => PayloadSynonymConfig::from_json(&fs::read_to_string(path)?)?,
        None => PayloadSynonymConfig::default(),
    };

    if args.remove {
        config.remove_payload = true;
    }
    if args.multiple {
        config.multiple_tokens = true;
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = delimiter.clone();
    }

    PayloadSynonymFilter::new(config)
}

/// Parse a JSON lines token dump. Blank lines are skipped.
pub fn read_tokens<R: BufRead>(reader: R) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: TokenRecord = serde_json::from_str(&line).map_err(|e| {
            PayloadSynonymError::analysis(format!("line {}: invalid token: {e}", index + 1))
        })?;
        tokens.push(record.into_token()?);
    }

    Ok(tokens)
}

/// Read tokens, run them through `filter` and write every emitted token.
pub fn expand_tokens<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    filter: &PayloadSynonymFilter,
    format: OutputFormat,
    pretty: bool,
) -> Result<ExpandSummary> {
    let tokens = read_tokens(reader)?;
    let mut summary = ExpandSummary {
        input_tokens: tokens.len(),
        ..Default::default()
    };

    let mut stream = filter.wrap(VecTokenStream::new(tokens));
    while let Some(token) = stream.next_token()? {
        summary.output_tokens += 1;
        write_token(writer, &token, format, pretty)?;
    }
    stream.close()?;

    // Every input token is emitted once, anything beyond that came from a payload.
    summary.synonyms = summary.output_tokens - summary.input_tokens;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const DUMP: &str = r#"{"text": "A", "start": 0, "end": 1, "payload": "D_E"}

{"text": "B", "start": 2, "end": 3}
"#;

    fn expand_args() -> ExpandArgs {
        ExpandArgs {
            input: PathBuf::from("-"),
            config: None,
            remove: false,
            multiple: false,
            delimiter: None,
        }
    }

    #[test]
    fn test_read_tokens() {
        let tokens = read_tokens(DUMP.as_bytes()).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].payload.as_deref(), Some("D_E".as_bytes()));
        assert!(tokens[1].payload.is_none());
    }

    #[test]
    fn test_read_tokens_reports_line() {
        let err = read_tokens("{\"text\": \"A\"}\nnot json\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_expand_tokens_human() {
        let filter = PayloadSynonymFilter::default();
        let mut out = Vec::new();

        let summary =
            expand_tokens(DUMP.as_bytes(), &mut out, &filter, OutputFormat::Human, false).unwrap();

        assert_eq!(summary.input_tokens, 2);
        assert_eq!(summary.output_tokens, 3);
        assert_eq!(summary.synonyms, 1);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("D E\t[0..1]\tsynonym\t+0"));
        assert!(lines[2].starts_with("B\t[2..3]\tword\t+1"));
    }

    #[test]
    fn test_expand_tokens_counts_only_produced_synonyms() {
        let filter = PayloadSynonymFilter::default();
        let mut out = Vec::new();
        let dump = r#"{"text": "A", "payload": "D"}
{"text": "AA", "type": "synonym", "position_increment": 0}
{"text": "B"}
"#;

        let summary =
            expand_tokens(dump.as_bytes(), &mut out, &filter, OutputFormat::Human, false).unwrap();

        assert_eq!(summary.input_tokens, 3);
        assert_eq!(summary.output_tokens, 4);
        assert_eq!(summary.synonyms, 1);
    }

    #[test]
    fn test_expand_tokens_json() {
        let mut args = expand_args();
        args.multiple = true;
        args.remove = true;
        let filter = build_filter(&args).unwrap();
        let mut out = Vec::new();

        expand_tokens(DUMP.as_bytes(), &mut out, &filter, OutputFormat::Json, false).unwrap();

        let records: Vec<TokenRecord> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let texts: Vec<_> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "D", "E", "B"]);
        assert!(records.iter().all(|r| r.payload.is_none()));
        assert_eq!(records[2].position_increment, 0);
    }

    #[test]
    fn test_expand_tokens_invalid_payload() {
        let filter = PayloadSynonymFilter::default();
        let mut out = Vec::new();
        let dump = r#"{"text": "A", "payload_bytes": [195, 40]}"#;

        match expand_tokens(dump.as_bytes(), &mut out, &filter, OutputFormat::Human, false) {
            Err(PayloadSynonymError::PayloadDecode { token, .. }) => assert_eq!(token, "A"),
            other => panic!("Expected payload decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_filter_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter.json");
        fs::write(&path, r#"{"remove": true, "delimiter": "-"}"#).unwrap();

        let mut args = expand_args();
        args.config = Some(path);
        args.multiple = true;

        let filter = build_filter(&args).unwrap();
        assert!(filter.config().remove_payload);
        assert!(filter.config().multiple_tokens);
        assert_eq!(filter.config().delimiter, "-");

        args.delimiter = Some("+".to_string());
        assert_eq!(build_filter(&args).unwrap().config().delimiter, "+");
    }

    #[test]
    fn test_build_filter_rejects_empty_delimiter() {
        let mut args = expand_args();
        args.delimiter = Some(String::new());
        assert!(matches!(
            build_filter(&args),
            Err(PayloadSynonymError::InvalidConfig(_))
        ));
    }
}
