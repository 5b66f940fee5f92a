//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# docsnip configuration

# Language for code fences without an info string (bash, json, powershell, ...)
default_language = "{language}"

# Show the copy control on snippets (hover or Tab to a snippet)
show_copy = {show_copy}

# Redraw / smooth-scroll tick, in milliseconds
tick_ms = {tick}

# Mouse support: hover reveal, click to copy, wheel scroll
mouse = {mouse}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON log files (the TUI keeps recent entries in memory regardless)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            language = escape(&self.default_language),
            show_copy = self.show_copy,
            tick = self.tick_ms,
            mouse = self.mouse,
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.to_string_lossy()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }
}

/// Escape for a TOML basic string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
