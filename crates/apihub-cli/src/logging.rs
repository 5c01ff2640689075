//! Tracing subscriber set-up.
//!
//! Logs never go to stdout: in stdio mode stdout carries the protocol.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use apihub_config::{LogFormat, LoggingConfig};

/// Filter directive for the given verbosity.
///
/// `-v` and `-vv` override the configured level; `RUST_LOG`, when set,
/// overrides both.
pub fn filter_directive(config: &LoggingConfig, verbose: u8) -> String {
    if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !env.trim().is_empty() {
            return env;
        }
    }
    match verbose {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn make_writer(config: &LoggingConfig) -> anyhow::Result<BoxMakeWriter> {
    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {path}"))?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

/// Installs the global subscriber.
pub fn init(config: &LoggingConfig, verbose: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(config, verbose))
        .context("invalid log filter")?;
    let writer = make_writer(config)?;
    let ansi = config.file.is_none();

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init(),
        LogFormat::Plain => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))
}
