//! CLI for the `harvest` binary.
//!
//! ```ignore
//! use harvest::cli::{parse_args, run};
//!
//! let command = parse_args(std::env::args())?;
//! run(command).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CaptureOptions, CliCommand, CliError, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::adapters::{FileSettingsStore, ReqwestHttpClient};
use crate::config::HarvestConfig;
use crate::delivery::IngestClient;
use crate::extract::extract_approx;

/// Run a parsed command.
pub async fn run(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Capture(options) => run_capture(options).await,
    }
}

async fn read_input(options: &CaptureOptions) -> Result<String> {
    match &options.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .wrap_err("failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Serialize for stdout.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

async fn run_capture(options: CaptureOptions) -> Result<()> {
    let raw = read_input(&options).await?;
    tracing::debug!(bytes = raw.len(), endpoint = %options.endpoint, "stream read");

    if options.approx {
        let approx = extract_approx(&raw);
        println!("{}", render_json(&approx, options.pretty)?);
        return Ok(());
    }

    let capture = options.endpoint.project(&raw);
    println!("{}", render_json(&capture.record_json()?, options.pretty)?);

    if options.deliver {
        let config = HarvestConfig::from_env()?;
        let settings = FileSettingsStore::from_config(&config)?;
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        let client = IngestClient::new(http, settings, config);

        if !client.deliver(&capture).await {
            return Err(eyre!("delivery to {} failed", client.config().backend_url));
        }
    }

    Ok(())
}
