// UI rendering logic
//
// Layout, top to bottom: title bar, main area (sidebar | document), status
// bar. The sidebar is hidden on narrow terminals.

use super::app::App;
use super::components::document_panel::panel_block;
use super::components::{status_bar, title_bar};
use super::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    Frame,
};

/// Below this width the document takes the whole main area
const SIDEBAR_MIN_TOTAL_WIDTH: u16 = 60;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Min(3),    // Sidebar | document
        Constraint::Length(2), // Status bar
    ])
    .split(f.area());

    title_bar::render(f, chunks[0], app);

    let (sidebar_area, document_area) = split_main(chunks[1]);
    let ctx = RenderContext::new(&app.theme, app.focus);

    match sidebar_area {
        Some(area) => {
            app.sidebar.prepare(area.inner(Margin::new(1, 1)));
            app.sidebar.render(f, area, &ctx);
        }
        None => app.sidebar.prepare(Rect::default()),
    }

    {
        let mut document = app.document.lock();
        let block = panel_block(
            document.title(),
            ctx.is_focused(ComponentId::Document),
            ctx.theme,
        );
        let inner = block.inner(document_area);
        document.prepare(inner);
        document.render(f, document_area, &ctx);
    }

    status_bar::render(f, chunks[2], app);
}

/// Sidebar and document areas for the main row
fn split_main(area: Rect) -> (Option<Rect>, Rect) {
    if area.width < SIDEBAR_MIN_TOTAL_WIDTH {
        return (None, area);
    }
    let sidebar_width = (area.width / 4).clamp(20, 32);
    let columns =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(10)]).split(area);
    (Some(columns[0]), columns[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::docs::demo_pages;
    use crate::highlight::Highlighter;
    use crate::logging::LogBuffer;
    use crate::tui::clipboard::testing::RecordingClipboard;
    use crate::tui::components::code_block::{COPIED_LABEL, COPY_LABEL};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        App::new(
            demo_pages(),
            &Config::default(),
            LogBuffer::new(),
            Arc::new(Highlighter::new()),
            Arc::new(RecordingClipboard::default()),
            None,
        )
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        screen(&terminal)
    }

    #[tokio::test]
    async fn draws_shell_and_page() {
        let mut app = app();
        let text = render(&mut app, 100, 30);
        assert!(text.contains("docsnip"));
        assert!(text.contains("Pages"));
        assert!(text.contains("Quickstart"));
        assert!(text.contains("curl -fsSL"));
        assert!(text.contains(" / "));
    }

    #[tokio::test]
    async fn narrow_terminal_hides_sidebar() {
        let mut app = app();
        let text = render(&mut app, 50, 20);
        assert!(!text.contains("Pages"));
    }

    #[tokio::test]
    async fn focused_snippet_shows_control_then_confirmation() {
        let mut app = app();
        render(&mut app, 100, 30);
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        let text = render(&mut app, 100, 30);
        assert!(text.contains(COPY_LABEL));

        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let text = render(&mut app, 100, 30);
        assert!(text.contains(COPIED_LABEL));
    }
}
