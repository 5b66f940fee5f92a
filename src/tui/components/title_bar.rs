// Title bar component
//
// One row: app name, current page title, and a back marker when there is
// history to return to.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let title = app.document.lock().title().to_string();

    let mut spans = vec![
        Span::styled(
            " docsnip ",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("── ", Style::default().fg(theme.border)),
        Span::styled(title, Style::default().fg(theme.foreground)),
    ];
    if app.router.can_go_back() {
        spans.push(Span::styled("  ‹ b", Style::default().fg(theme.muted)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
