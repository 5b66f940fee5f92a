//! Interactive trait for components that handle keyboard input

use super::Component;
use crossterm::event::{KeyCode, KeyEvent};

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that can handle keyboard input
///
/// ```text
/// KeyEvent ──▶ App (global: q, Tab, b, [ ])
///                 │ not handled
///                 ▼
///          Focused component ──▶ Handled::Yes / Handled::No
/// ```
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints for the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

/// Default key handling for components that are both Interactive and Scrollable
pub trait ScrollableInteractive: Interactive + super::Scrollable {
    /// Returns `Handled::Yes` for: Up, Down, k, j, Home, End, PageUp, PageDown
    fn handle_scroll_keys(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }
}

// Anything that implements both traits gets this for free
impl<T: Interactive + super::Scrollable> ScrollableInteractive for T {}
