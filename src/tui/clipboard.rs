//! Clipboard access for copy actions
//!
//! Uses `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The clipboard is created fresh each time to avoid holding resources.
//! Components talk to [`ClipboardWriter`] so tests can swap in a recorder.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Host capability: write text to a clipboard
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Copy text to the system clipboard
///
/// Returns Ok(()) on success, or an error if clipboard access fails.
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every write; optionally fails them all
    #[derive(Debug, Default)]
    pub struct RecordingClipboard {
        writes: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingClipboard {
        pub fn failing() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl ClipboardWriter for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            self.writes.lock().unwrap().push(text.to_string());
            if self.fail {
                anyhow::bail!("clipboard unavailable");
            }
            Ok(())
        }
    }
}
