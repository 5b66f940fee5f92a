//! Core component trait - the foundation of the UI system
//!
//! Every UI element that can be rendered implements `Component`.

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identity of a component, used for focus tracking and input routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Page and section index on the left
    Sidebar,
    /// The rendered page
    Document,
    /// A code snippet inside the document (focus moves within the document)
    CodeBlock,
}

impl ComponentId {
    /// Whether this component can receive keyboard focus
    pub fn is_focusable(&self) -> bool {
        matches!(self, ComponentId::Sidebar | ComponentId::Document)
    }

    /// Cycle between the focusable panels
    pub fn next_focus(self) -> Self {
        match self {
            Self::Sidebar => Self::Document,
            Self::Document => Self::Sidebar,
            // Code blocks live inside the document
            Self::CodeBlock => Self::Document,
        }
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need, not the whole App.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId) -> Self {
        Self { theme, focus }
    }

    /// Check if a component is currently focused
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }
}

/// Base trait for all UI components
///
/// A component is anything that can render itself to the terminal.
pub trait Component {
    /// Identifier for this component
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_between_panels() {
        assert_eq!(ComponentId::Sidebar.next_focus(), ComponentId::Document);
        assert_eq!(ComponentId::Document.next_focus(), ComponentId::Sidebar);
        assert_eq!(ComponentId::CodeBlock.next_focus(), ComponentId::Document);
        assert!(!ComponentId::CodeBlock.is_focusable());
    }
}
