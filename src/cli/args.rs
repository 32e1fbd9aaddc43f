//! Command-line argument parsing.

use std::path::PathBuf;

use thiserror::Error;

use crate::endpoint::Endpoint;

/// Usage text for `--help` and argument errors.
pub const USAGE: &str = "\
Usage: harvest [OPTIONS] [FILE]

Decode a captured response stream and print the structured record as JSON.
Reads FILE, or stdin when FILE is omitted or `-`.

Options:
      --url URL      Select the projector by endpoint URL
      --kind KIND    Select the projector by kind: conversation (default) or product
      --approx       Use the pattern-based extractor instead of the event decoder
      --deliver      Post the record to the ingestion backend
      --pretty       Pretty-print the JSON output
  -V, --version      Print version
  -h, --help         Print this help

Environment:
  HARVEST_BACKEND_URL, HARVEST_IP_LOOKUP_URL, HARVEST_SETTINGS_PATH,
  HARVEST_TIMEOUT_SECS, HARVEST_LOG";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Decode a stream (the default)
    Capture(CaptureOptions),
}

/// Options for [`CliCommand::Capture`].
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    pub endpoint: Endpoint,
    pub approx: bool,
    pub deliver: bool,
    pub pretty: bool,
    /// `None` reads stdin
    pub input: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::Conversation,
            approx: false,
            deliver: false,
            pretty: false,
            input: None,
        }
    }
}

/// Argument errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("'{0}' is not a captured endpoint URL")]
    UnknownUrl(String),

    #[error("unknown kind '{0}', expected 'conversation' or 'product'")]
    UnknownKind(String),

    #[error("--url and --kind are mutually exclusive")]
    ConflictingEndpoint,

    #[error("--approx output cannot be delivered")]
    ApproxNotDeliverable,

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parse command-line arguments (program name first).
///
/// ```
/// use harvest::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["harvest".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = CaptureOptions::default();
    let mut endpoint_flag: Option<&'static str> = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--approx" => options.approx = true,
            "--deliver" => options.deliver = true,
            "--pretty" => options.pretty = true,
            "--url" | "--kind" => {
                let flag = if arg == "--url" { "--url" } else { "--kind" };
                if endpoint_flag.is_some_and(|seen| seen != flag) {
                    return Err(CliError::ConflictingEndpoint);
                }
                endpoint_flag = Some(flag);

                let value = args
                    .next()
                    .ok_or_else(|| CliError::MissingValue(flag.to_string()))?;
                options.endpoint = if flag == "--url" {
                    Endpoint::from_url(&value).ok_or(CliError::UnknownUrl(value))?
                } else {
                    match value.as_str() {
                        "conversation" => Endpoint::Conversation,
                        "product" => Endpoint::Product,
                        _ => return Err(CliError::UnknownKind(value)),
                    }
                };
            }
            "-" if options.input.is_none() => {}
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::UnknownOption(arg));
            }
            _ if options.input.is_none() => options.input = Some(PathBuf::from(arg)),
            _ => return Err(CliError::UnexpectedArgument(arg)),
        }
    }

    if options.approx && options.deliver {
        return Err(CliError::ApproxNotDeliverable);
    }

    Ok(CliCommand::Capture(options))
}
