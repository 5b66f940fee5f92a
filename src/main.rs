// docsnip - terminal documentation viewer
//
// Shows markdown pages with syntax-highlighted, copyable code snippets and
// in-page anchor navigation.
//
// Architecture:
// - Docs: markdown pages parsed into headings, text and code blocks
// - Highlight: line-oriented lexers turning snippets into token grids
// - Nav: router publishing location changes; scroll restorer reacting to them
// - TUI (ratatui): sidebar, document panel with code block widgets, status bar

mod cli;
mod config;
mod docs;
mod highlight;
mod logging;
mod nav;
mod theme;
mod timer;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rolling file appender for the configured directory and rotation
fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(&config.file_dir).with_context(|| {
        format!(
            "Could not create log directory {}",
            config.file_dir.display()
        )
    })?;
    let rotation = match config.file_rotation {
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    };
    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(&config.file_prefix)
        .build(&config.file_dir)
        .context("Failed to create log file")
}

/// Install the tracing subscriber
///
/// Logs always go to the in-memory buffer (the terminal belongs to the TUI).
/// File logging adds a JSON layer on a rolling, non-blocking writer; the
/// returned guard must live until exit so buffered lines get flushed.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(config: &LoggingConfig, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("docsnip={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_writer = if config.file_enabled {
        match file_appender(config) {
            Ok(appender) => Some(tracing_appender::non_blocking(appender)),
            Err(e) => {
                eprintln!("Warning: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    let (file_layer, guard) = match file_writer {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Subcommands run and exit
    if let Some(command) = cli.command {
        return cli::handle_command(command);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            config::print_config_error(&e);
            std::process::exit(1);
        }
    };

    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config.logging, &log_buffer);

    // After init_logging so the outcome is logged
    Config::ensure_config_exists();

    let pages = if cli.files.is_empty() {
        docs::demo_pages()
    } else {
        docs::load_pages(&cli.files).context("Failed to load documentation")?
    };
    tracing::info!("docsnip {} started with {} page(s)", config::VERSION, pages.len());

    tui::run_tui(pages, config, log_buffer, cli.route).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn logging_in(dir: PathBuf) -> LoggingConfig {
        LoggingConfig {
            file_enabled: true,
            file_dir: dir,
            file_rotation: LogRotation::Never,
            file_prefix: "docsnip.log".to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn file_appender_creates_log_dir() {
        let dir = std::env::temp_dir()
            .join(format!("docsnip-logs-{}", std::process::id()))
            .join("nested");
        let _ = std::fs::remove_dir_all(&dir);

        assert!(file_appender(&logging_in(dir.clone())).is_ok());
        assert!(dir.is_dir());

        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn file_appender_reports_unusable_dir() {
        let file = std::env::temp_dir().join(format!("docsnip-not-a-dir-{}", std::process::id()));
        std::fs::write(&file, "").unwrap();

        let err = file_appender(&logging_in(file.join("logs"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Could not create log directory"));

        std::fs::remove_file(file).unwrap();
    }
}
