//! Copyable trait for components that provide clipboard content

use super::Component;

/// Trait for components that can provide content for the clipboard
///
/// The document copies its whole page; a code block copies its snippet.
pub trait Copyable: Component {
    /// Human-readable text for the clipboard
    ///
    /// Returns `None` if there's nothing to copy (e.g., empty panel).
    fn copy_text(&self) -> Option<String>;

    /// Description of what will be copied, for log lines
    fn copy_description(&self) -> String {
        format!("{:?}", self.id())
    }
}
