// Status bar component
//
// Renders the current route, key hints for the focused panel and the most
// recent log line (info or worse).

use crate::logging::LogLevel;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let route = format!(" {} ", app.router.current());
    let hint = app.focus_hint().unwrap_or("");

    let mut spans = vec![
        Span::styled(route.clone(), Style::default().fg(theme.highlight)),
        Span::styled("│ ", Style::default().fg(theme.border)),
        Span::styled(hint, Style::default().fg(theme.status_bar)),
    ];

    if let Some(entry) = app.log_buffer.latest_at_least(LogLevel::Info) {
        let used = route.width() + 2 + hint.width();
        let room = (area.width as usize).saturating_sub(used + 3);
        let color = match entry.level {
            LogLevel::Error | LogLevel::Warn => theme.copy_control,
            _ => theme.muted,
        };
        let message = truncate(&entry.summary(), room);
        if !message.is_empty() {
            spans.push(Span::styled(" │ ", Style::default().fg(theme.border)));
            spans.push(Span::styled(message, Style::default().fg(color)));
        }
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(status, area);
}

/// Cut to `max` display cells, marking the cut with `…`
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
