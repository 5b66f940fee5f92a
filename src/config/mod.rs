//! Configuration for the viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/docsnip/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Language for code fences without an info string
    pub default_language: String,

    /// Whether snippets get a copy control
    pub show_copy: bool,

    /// UI tick: redraw and smooth-scroll step interval
    pub tick_ms: u64,

    /// Mouse capture (hover reveal, click to copy, wheel)
    pub mouse: bool,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: crate::highlight::DEFAULT_LANGUAGE.to_string(),
            show_copy: true,
            tick_ms: 50,
            mouse: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Tick interval, never below 10ms
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub default_language: Option<String>,
    pub show_copy: Option<bool>,
    pub tick_ms: Option<u64>,
    pub mouse: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

fn truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Config {
    /// Get the config file path: ~/.config/docsnip/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("docsnip").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        // Config is optional: failures here are not fatal
        match Self::ensure_config_at(&path) {
            Ok(true) => tracing::info!("Created default config at {}", path.display()),
            Ok(false) => {}
            Err(e) => tracing::warn!("Could not create {}: {:#}", path.display(), e),
        }
    }

    /// Write the template to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub(crate) fn ensure_config_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::write_default(path)?;
        Ok(true)
    }

    /// Write the default template to `path`, replacing any existing file
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Read and parse a config file. A missing file is an empty config.
    pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Merge a parsed file with an environment lookup: env > file > default
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let default_language = env("DOCSNIP_DEFAULT_LANGUAGE")
            .filter(|v| !v.trim().is_empty())
            .or(file.default_language)
            .unwrap_or(defaults.default_language);

        // Mouse: env can only turn it off
        let mouse = match env("DOCSNIP_NO_MOUSE") {
            Some(v) if truthy(&v) => false,
            _ => file.mouse.unwrap_or(defaults.mouse),
        };

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(dir) = env("DOCSNIP_LOG_DIR").filter(|v| !v.trim().is_empty()) {
            logging.file_dir = PathBuf::from(dir);
            logging.file_enabled = true;
        }

        Self {
            default_language,
            show_copy: file.show_copy.unwrap_or(defaults.show_copy),
            tick_ms: file.tick_ms.unwrap_or(defaults.tick_ms),
            mouse,
            logging,
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }
}

/// Print a config failure the way users can act on it
pub fn print_config_error(error: &anyhow::Error) {
    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║  CONFIG ERROR - Failed to load configuration file            ║");
    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
    eprintln!("  Error: {:#}\n", error);
    eprintln!("  Tip: Check for:\n");
    eprintln!("    - Missing quotes around string values");
    eprintln!("    - Invalid boolean values (use true/false)");
    eprintln!("    - Typos in key or section names\n");
    eprintln!("  To reset, run `docsnip config --reset`.\n");
}
