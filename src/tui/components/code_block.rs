//! Code block component
//!
//! Read-only, syntax-colored view of a snippet with a one-key copy action.
//!
//! ```text
//! ╭─ bash ──────────────────────── ⧉ copy ─╮
//! │ curl -sSL https://example.com | bash   │
//! ╰────────────────────────────────────────╯
//! ```
//!
//! The copy control sits in the top border and is only drawn while the block
//! is hovered or focused. Activation does not depend on visibility: a focused
//! block copies on Enter even if the pointer is elsewhere.

use crate::highlight::{normalize_language, StyledToken, TokenLines, Tokenizer, DEFAULT_LANGUAGE};
use crate::theme::Theme;
use crate::tui::clipboard::ClipboardWriter;
use crate::tui::confirm::CopyConfirmation;
use crate::tui::traits::{Component, ComponentId, Copyable, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const COPY_LABEL: &str = "⧉ copy";
pub const COPIED_LABEL: &str = "✓ copied";

/// Tabs are expanded for display only; `lines()` keeps the raw text
const TAB: &str = "    ";

/// Inputs of a code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockProps {
    pub code: String,
    pub language: String,
    pub show_copy: bool,
}

impl CodeBlockProps {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            show_copy: true,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn show_copy(mut self, show: bool) -> Self {
        self.show_copy = show;
        self
    }
}

/// Host capabilities a code block depends on
#[derive(Clone)]
pub struct Capabilities {
    pub tokenizer: Arc<dyn Tokenizer>,
    pub clipboard: Arc<dyn ClipboardWriter>,
}

impl Capabilities {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        Self {
            tokenizer,
            clipboard,
        }
    }
}

pub struct CodeBlock {
    /// Trimmed snippet; this is what gets copied
    code: String,
    /// Normalized language name
    language: String,
    show_copy: bool,
    /// Token grid, computed once
    lines: TokenLines,
    confirmation: CopyConfirmation,
    clipboard: Arc<dyn ClipboardWriter>,

    /// Pointer is over the block
    pub hovered: bool,
    /// Keyboard focus is on the block
    pub focused: bool,
}

impl CodeBlock {
    pub fn new(props: CodeBlockProps, caps: &Capabilities) -> Self {
        let code = props.code.trim().to_string();
        let lines = caps.tokenizer.tokenize(&code, &props.language);

        Self {
            code,
            language: normalize_language(&props.language),
            show_copy: props.show_copy,
            lines,
            confirmation: CopyConfirmation::new(),
            clipboard: Arc::clone(&caps.clipboard),
            hovered: false,
            focused: false,
        }
    }

    #[cfg(test)]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[cfg(test)]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[cfg(test)]
    pub fn lines(&self) -> &TokenLines {
        &self.lines
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Rows taken when rendered: code lines plus top and bottom border
    pub fn height(&self) -> usize {
        self.lines.len() + 2
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_confirmed()
    }

    /// Presentation rule: control shown only on hover or focus
    pub fn control_visible(&self) -> bool {
        self.show_copy && (self.hovered || self.focused)
    }

    pub fn control_label(&self) -> &'static str {
        if self.is_confirmed() {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    /// Copy the snippet and show the confirmation
    ///
    /// Returns false (and does nothing) when the block has no copy control.
    /// A failed clipboard write is logged; the confirmation still shows.
    pub fn activate_copy(&mut self) -> bool {
        if !self.show_copy {
            return false;
        }

        if let Err(e) = self.clipboard.write_text(&self.code) {
            tracing::warn!("Copy of {} failed: {:#}", self.copy_description(), e);
        } else {
            tracing::debug!(
                "Copied {} ({} bytes)",
                self.copy_description(),
                self.code.len()
            );
        }

        self.confirmation.trigger();
        true
    }

    /// Columns `[start, end)` of the copy control within the top border,
    /// relative to the block's left edge. `None` when there is no control
    /// or it does not fit.
    pub fn control_columns(&self, width: u16) -> Option<(u16, u16)> {
        if !self.show_copy {
            return None;
        }
        let (_, control) = self.top_parts(width as usize, true);
        let control_width = control?.width();
        let end = (width as usize).saturating_sub(2);
        let start = end.saturating_sub(control_width);
        Some((start as u16, end as u16))
    }

    fn display_language(&self) -> &str {
        if self.language.is_empty() {
            "text"
        } else {
            &self.language
        }
    }

    /// Title and control text that fit into a top border of `width` cells.
    /// The control wins over the title when space is short.
    fn top_parts(&self, width: usize, show_control: bool) -> (Option<String>, Option<String>) {
        // ╭ + ─╮
        let mut budget = width.saturating_sub(3);

        let control = show_control
            .then(|| format!(" {} ", self.control_label()))
            .filter(|c| c.width() <= budget);
        if let Some(c) = &control {
            budget -= c.width();
        }

        let title = Some(format!("─ {} ", self.display_language())).filter(|t| t.width() <= budget);
        (title, control)
    }

    pub fn top_border(&self, width: u16, theme: &Theme) -> Line<'static> {
        let w = width as usize;
        let border = Style::default().fg(theme.code_border);
        if w < 3 {
            return Line::from(Span::styled("─".repeat(w), border));
        }

        let (title, control) = self.top_parts(w, self.control_visible());
        let title_width = title.as_deref().map_or(0, UnicodeWidthStr::width);
        let control_width = control.as_deref().map_or(0, UnicodeWidthStr::width);
        let fill = w - 3 - title_width - control_width;

        let mut spans = vec![Span::styled("╭", border)];
        if let Some(title) = title {
            spans.push(Span::styled(title, Style::default().fg(theme.muted)));
        }
        spans.push(Span::styled("─".repeat(fill), border));
        if let Some(control) = control {
            let style = if self.is_confirmed() {
                Style::default()
                    .fg(theme.copy_confirmed)
                    .add_modifier(Modifier::BOLD)
            } else if self.focused {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.copy_control)
            };
            spans.push(Span::styled(control, style));
        }
        spans.push(Span::styled("─╮", border));
        Line::from(spans)
    }

    /// One code row. Missing indices render as an empty row.
    pub fn body_line(&self, index: usize, width: u16, theme: &Theme) -> Line<'static> {
        let w = width as usize;
        let border = Style::default().fg(theme.code_border);
        let background = Style::default().bg(theme.code_background);
        let tokens = self.lines.get(index).map(Vec::as_slice).unwrap_or(&[]);

        if w < 4 {
            return Line::from(fit_tokens(tokens, w, theme).0);
        }

        let inner = w - 4;
        let (mut spans, used) = fit_tokens(tokens, inner, theme);
        spans.insert(0, Span::styled("│ ", border));
        if used < inner {
            spans.push(Span::styled(" ".repeat(inner - used), background));
        }
        spans.push(Span::styled(" │", border));
        Line::from(spans)
    }

    pub fn bottom_border(&self, width: u16, theme: &Theme) -> Line<'static> {
        let w = width as usize;
        let border = Style::default().fg(theme.code_border);
        if w < 2 {
            return Line::from(Span::styled("─".repeat(w), border));
        }
        Line::from(Span::styled(
            format!("╰{}╯", "─".repeat(w - 2)),
            border,
        ))
    }

    /// Every row of the block, top border to bottom border
    pub fn to_lines(&self, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        let mut out = Vec::with_capacity(self.height());
        out.push(self.top_border(width, theme));
        for index in 0..self.lines.len() {
            out.push(self.body_line(index, width, theme));
        }
        out.push(self.bottom_border(width, theme));
        out
    }
}

/// Styled spans for a token row, cut to `max_width` cells.
/// Returns the spans and the width they occupy.
fn fit_tokens(tokens: &[StyledToken], max_width: usize, theme: &Theme) -> (Vec<Span<'static>>, usize) {
    let mut spans = Vec::with_capacity(tokens.len());
    let mut used = 0;

    for token in tokens {
        if used >= max_width {
            break;
        }
        let text = token.text.replace('\t', TAB);
        let style = theme.token_style(token.kind);
        let width = text.width();

        if used + width <= max_width {
            used += width;
            spans.push(Span::styled(text, style));
            continue;
        }

        let mut cut = String::new();
        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > max_width {
                break;
            }
            used += ch_width;
            cut.push(ch);
        }
        if !cut.is_empty() {
            spans.push(Span::styled(cut, style));
        }
        break;
    }

    (spans, used)
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for CodeBlock {
    fn id(&self) -> ComponentId {
        ComponentId::CodeBlock
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let lines = self.to_lines(area.width, ctx.theme);
        f.render_widget(Paragraph::new(lines), area);
    }
}

impl Copyable for CodeBlock {
    fn copy_text(&self) -> Option<String> {
        (!self.code.is_empty()).then(|| self.code.clone())
    }

    fn copy_description(&self) -> String {
        format!("{} snippet", self.display_language())
    }
}

impl Interactive for CodeBlock {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Enter | KeyCode::Char('c') => self.activate_copy().into(),
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        self.show_copy
            .then_some("Enter/c:copy  Tab:next snippet  n/p:section  y:copy page")
    }
}
