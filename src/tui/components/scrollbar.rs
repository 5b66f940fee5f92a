//! Scrollbar drawn on the right border of a panel

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::{Margin, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// ↑ and ↓ at the ends
    Arrows,
    /// Thumb only
    #[default]
    Minimal,
}

/// Render a vertical scrollbar over the right border of `area`
///
/// Nothing is drawn when the content fits the viewport.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, style: ScrollbarStyle) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let (begin, end) = match style {
        ScrollbarStyle::Arrows => (Some("↑"), Some("↓")),
        ScrollbarStyle::Minimal => (None, None),
    };
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(begin)
        .end_symbol(end);

    // Keep the corners of the border intact
    let track = area.inner(Margin {
        vertical: 1,
        horizontal: 0,
    });
    let mut state = ScrollbarState::new(scroll.max_offset()).position(scroll.offset());
    f.render_stateful_widget(scrollbar, track, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn right_edge(scroll: &ScrollState, style: ScrollbarStyle) -> String {
        let mut terminal = Terminal::new(TestBackend::new(10, 6)).unwrap();
        terminal
            .draw(|f| render_scrollbar(f, f.area(), scroll, style))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..6).map(|y| buffer[(9, y)].symbol().to_string()).collect()
    }

    #[test]
    fn arrows_only_when_content_overflows() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(4, 4);
        assert_eq!(right_edge(&scroll, ScrollbarStyle::Arrows).trim(), "");

        scroll.update_dimensions(40, 4);
        let edge = right_edge(&scroll, ScrollbarStyle::Arrows);
        assert!(edge.contains('↑') && edge.contains('↓'));

        let edge = right_edge(&scroll, ScrollbarStyle::Minimal);
        assert!(!edge.contains('↑') && !edge.contains('↓'));
    }
}
