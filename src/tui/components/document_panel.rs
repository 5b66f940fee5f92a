//! Document panel: one page laid out as scrollable rows
//!
//! Headings and paragraphs are word-wrapped to the panel width; code blocks
//! are [`CodeBlock`] widgets occupying `height()` consecutive rows. Layout is
//! redone only when the page or the width changes.
//!
//! The panel is shared with the scroll restorer through [`SharedDocument`],
//! which implements [`ScrollHost`]: anchors resolve to row indices and
//! `scroll_into_view` animates toward the target over the next ticks.

use super::code_block::{Capabilities, CodeBlock, CodeBlockProps};
use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::docs::{Block as PageBlock, Page};
use crate::highlight::DEFAULT_LANGUAGE;
use crate::nav::ScrollHost;
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, ScrollableInteractive,
    Scrollable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Defaults applied to every snippet on a page
#[derive(Debug, Clone)]
pub struct SnippetDefaults {
    /// Language for fences without an info string
    pub language: String,
    pub show_copy: bool,
}

impl Default for SnippetDefaults {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            show_copy: true,
        }
    }
}

enum Item {
    Heading { level: u8, text: String },
    Text(String),
    Code(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Blank,
    Heading { level: u8, text: String },
    Text(String),
    /// Row `line` of code block `block`; 0 is the top border
    Code { block: usize, line: usize },
}

/// Where a screen position lands inside the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Nothing,
    Block(usize),
    /// On the copy control of a block
    Control(usize),
}

pub struct DocumentView {
    path: String,
    title: String,
    /// Page text for whole-page copies
    plain_text: String,
    items: Vec<Item>,
    /// Heading anchor for each item index that has one
    item_anchors: HashMap<String, usize>,
    blocks: Vec<CodeBlock>,

    rows: Vec<Row>,
    /// First row of each item
    item_rows: Vec<usize>,
    anchor_rows: HashMap<String, usize>,
    layout_width: u16,

    scroll: ScrollState,
    /// Offset a smooth scroll is heading for
    scroll_target: Option<usize>,
    /// Inner area of the last render, for mouse hit tests
    area: Rect,

    hovered: Option<usize>,
    focused: Option<usize>,
    panel_focused: bool,

    caps: Capabilities,
    defaults: SnippetDefaults,
}

impl DocumentView {
    pub fn new(caps: Capabilities, defaults: SnippetDefaults) -> Self {
        Self {
            path: "/".to_string(),
            title: String::new(),
            plain_text: String::new(),
            items: Vec::new(),
            item_anchors: HashMap::new(),
            blocks: Vec::new(),
            rows: Vec::new(),
            item_rows: Vec::new(),
            anchor_rows: HashMap::new(),
            layout_width: 0,
            scroll: ScrollState::new(),
            scroll_target: None,
            area: Rect::default(),
            hovered: None,
            focused: None,
            panel_focused: false,
            caps,
            defaults,
        }
    }

    /// Replace the page. Scroll position is left to the scroll restorer.
    pub fn set_page(&mut self, page: &Page) {
        self.path = page.path.clone();
        self.title = page.title.clone();
        self.plain_text = page.plain_text();
        self.items.clear();
        self.item_anchors.clear();
        self.blocks.clear();
        self.hovered = None;
        self.focused = None;
        self.scroll_target = None;

        for block in &page.blocks {
            match block {
                PageBlock::Heading {
                    level,
                    text,
                    anchor,
                } => {
                    self.item_anchors.insert(anchor.clone(), self.items.len());
                    self.items.push(Item::Heading {
                        level: *level,
                        text: text.clone(),
                    });
                }
                PageBlock::Text(text) => self.items.push(Item::Text(text.clone())),
                PageBlock::Code { language, code } => {
                    let props = CodeBlockProps::new(code.clone())
                        .language(
                            language
                                .clone()
                                .unwrap_or_else(|| self.defaults.language.clone()),
                        )
                        .show_copy(self.defaults.show_copy);
                    self.items.push(Item::Code(self.blocks.len()));
                    self.blocks.push(CodeBlock::new(props, &self.caps));
                }
            }
        }

        tracing::debug!(
            "Showing {} ({} items, {} snippets)",
            self.path,
            self.items.len(),
            self.blocks.len()
        );

        let width = self.layout_width;
        self.layout_width = 0;
        if width > 0 {
            self.relayout(width);
        } else {
            self.rows.clear();
            self.anchor_rows.clear();
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn focused_block(&self) -> Option<usize> {
        self.focused
    }

    #[cfg(test)]
    pub fn hovered_block(&self) -> Option<usize> {
        self.hovered
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.scroll_target.is_some()
    }

    /// Lay out for a content area (inside the panel border)
    pub fn prepare(&mut self, inner: Rect) {
        if inner.width != self.layout_width {
            self.relayout(inner.width);
        }
        self.area = inner;
        self.scroll
            .update_dimensions(self.rows.len(), inner.height as usize);
        if let Some(target) = self.scroll_target {
            self.scroll_target = Some(target.min(self.scroll.max_offset()));
        }
    }

    fn relayout(&mut self, width: u16) {
        self.layout_width = width;
        self.rows.clear();
        self.item_rows.clear();
        self.anchor_rows.clear();
        let w = width as usize;

        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                self.rows.push(Row::Blank);
            }
            self.item_rows.push(self.rows.len());
            match item {
                Item::Heading { level, text } => {
                    let prefix = "#".repeat(*level as usize);
                    for line in wrap(&format!("{} {}", prefix, text), w) {
                        self.rows.push(Row::Heading {
                            level: *level,
                            text: line,
                        });
                    }
                }
                Item::Text(text) => {
                    for paragraph in text.split('\n') {
                        for line in wrap(paragraph, w) {
                            self.rows.push(Row::Text(line));
                        }
                    }
                }
                Item::Code(block) => {
                    let height = self.blocks[*block].height();
                    for line in 0..height {
                        self.rows.push(Row::Code {
                            block: *block,
                            line,
                        });
                    }
                }
            }
        }

        for (anchor, item) in &self.item_anchors {
            self.anchor_rows
                .insert(anchor.clone(), self.item_rows[*item]);
        }
        self.scroll.update_dimensions(self.rows.len(), self.scroll.viewport());
    }

    // ─────────────────────────────────────────────────────────────
    // Scroll host operations
    // ─────────────────────────────────────────────────────────────

    pub fn anchor_row(&self, anchor: &str) -> Option<usize> {
        self.anchor_rows.get(anchor).copied()
    }

    /// Anchor of the nearest heading below (or above) the viewport top
    ///
    /// Measured from where a running smooth scroll will stop, so repeated
    /// jumps keep advancing.
    pub fn section_anchor(&self, forward: bool) -> Option<String> {
        let top = self.scroll_target.unwrap_or_else(|| self.scroll_offset());
        let rows = self.anchor_rows.iter().map(|(anchor, row)| (*row, anchor));
        let found = if forward {
            rows.filter(|(row, _)| *row > top).min_by_key(|(row, _)| *row)
        } else {
            rows.filter(|(row, _)| *row < top).max_by_key(|(row, _)| *row)
        };
        found.map(|(_, anchor)| anchor.clone())
    }

    /// Start a smooth scroll that puts `row` at the top of the viewport
    pub fn smooth_scroll_to(&mut self, row: usize) {
        let target = row.min(self.scroll.max_offset());
        self.scroll_target = (target != self.scroll.offset()).then_some(target);
    }

    pub fn scroll_to_origin(&mut self) {
        self.scroll_target = None;
        self.scroll.scroll_to_top();
    }

    /// Advance a smooth scroll by one frame. Returns whether it moved.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.scroll_target else {
            return false;
        };
        let offset = self.scroll.offset();
        let distance = target.abs_diff(offset);
        let step = (distance / 3).max(1);
        let next = if target > offset {
            offset + step
        } else {
            offset - step
        };
        self.scroll.scroll_to(next);
        if self.scroll.offset() == target || self.scroll.offset() == offset {
            self.scroll_target = None;
        }
        true
    }

    // ─────────────────────────────────────────────────────────────
    // Pointer and focus
    // ─────────────────────────────────────────────────────────────

    /// What lies under screen cell `(column, row)`
    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        let area = self.area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return Hit::Nothing;
        }
        let content_row = self.scroll.offset() + (row - area.y) as usize;
        let Some(Row::Code { block, line }) = self.rows.get(content_row) else {
            return Hit::Nothing;
        };
        if *line == 0 {
            if let Some((start, end)) = self.blocks[*block].control_columns(area.width) {
                let x = column - area.x;
                if x >= start && x < end {
                    return Hit::Control(*block);
                }
            }
        }
        Hit::Block(*block)
    }

    /// Pointer moved: update hover
    pub fn hover_at(&mut self, column: u16, row: u16) {
        let hovered = match self.hit_test(column, row) {
            Hit::Block(b) | Hit::Control(b) => Some(b),
            Hit::Nothing => None,
        };
        self.set_hovered(hovered);
    }

    fn set_hovered(&mut self, hovered: Option<usize>) {
        if self.hovered == hovered {
            return;
        }
        if let Some(old) = self.hovered.and_then(|b| self.blocks.get_mut(b)) {
            old.hovered = false;
        }
        if let Some(new) = hovered.and_then(|b| self.blocks.get_mut(b)) {
            new.hovered = true;
        }
        self.hovered = hovered;
    }

    /// Pointer clicked. Returns true when a copy was activated.
    pub fn click_at(&mut self, column: u16, row: u16) -> bool {
        match self.hit_test(column, row) {
            Hit::Control(block) => {
                self.set_hovered(Some(block));
                self.blocks[block].activate_copy()
            }
            Hit::Block(block) => {
                self.set_hovered(Some(block));
                false
            }
            Hit::Nothing => false,
        }
    }

    pub fn set_panel_focused(&mut self, focused: bool) {
        self.panel_focused = focused;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        let active = self.panel_focused.then_some(self.focused).flatten();
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.focused = active == Some(index);
        }
    }

    /// Move keyboard focus to the next (or previous) code block
    pub fn focus_next(&mut self, forward: bool) -> bool {
        let count = self.blocks.len();
        if count == 0 {
            return false;
        }
        let next = match (self.focused, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.focused = Some(next);
        self.sync_focus();
        self.reveal_block(next);
        true
    }

    fn reveal_block(&mut self, block: usize) {
        let Some(start) = self
            .rows
            .iter()
            .position(|r| matches!(r, Row::Code { block: b, .. } if *b == block))
        else {
            return;
        };
        self.scroll_target = None;
        let height = self.blocks[block].height();
        self.scroll.reveal(start + height - 1);
        self.scroll.reveal(start);
    }

    // ─────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────

    fn row_line(&self, row: &Row, theme: &Theme) -> Line<'static> {
        let width = self.layout_width;
        match row {
            Row::Blank => Line::default(),
            Row::Heading { level, text } => {
                Line::styled(text.clone(), theme.heading_style(*level))
            }
            Row::Text(text) => Line::styled(text.clone(), Style::default().fg(theme.foreground)),
            Row::Code { block, line } => {
                let block = &self.blocks[*block];
                if *line == 0 {
                    block.top_border(width, theme)
                } else if *line + 1 == block.height() {
                    block.bottom_border(width, theme)
                } else {
                    block.body_line(*line - 1, width, theme)
                }
            }
        }
    }

    /// Rows currently in the viewport
    pub fn visible_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let (start, end) = self.scroll.visible_range();
        self.rows[start..end]
            .iter()
            .map(|row| self.row_line(row, theme))
            .collect()
    }
}

/// Word-wrap to `width` display cells; words longer than a line are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.width() <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for DocumentView {
    fn id(&self) -> ComponentId {
        ComponentId::Document
    }

    /// Call [`DocumentView::prepare`] with `panel_block(area).inner(area)` first
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = panel_block(&self.title, ctx.is_focused(ComponentId::Document), ctx.theme);
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(self.visible_lines(ctx.theme)), inner);
        render_scrollbar(f, area, self.scroll_state(), ScrollbarStyle::Arrows);
    }
}

/// Border around the document; shared by layout and render
pub fn panel_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.highlight
    } else {
        theme.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(theme.title))
}

impl Scrollable for DocumentView {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        // Manual scrolling takes over from any animation
        self.scroll_target = None;
        &mut self.scroll
    }
}

impl Copyable for DocumentView {
    fn copy_text(&self) -> Option<String> {
        (!self.plain_text.is_empty()).then(|| self.plain_text.clone())
    }

    fn copy_description(&self) -> String {
        format!("page {}", self.path)
    }
}

impl Interactive for DocumentView {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Tab => self.focus_next(true).into(),
            KeyCode::BackTab => self.focus_next(false).into(),
            KeyCode::Enter | KeyCode::Char('c') => match self.focused {
                Some(b) => self.blocks[b].handle_key(key),
                None => Handled::No,
            },
            _ => self.handle_scroll_keys(key),
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        self.focused
            .and_then(|b| self.blocks[b].focus_hint())
            .or(Some("Tab:snippet  n/p:section  j/k:scroll  y:copy page"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Shared handle
// ═══════════════════════════════════════════════════════════════════════════

/// The document as seen by the UI loop and the scroll restorer
#[derive(Clone)]
pub struct SharedDocument(Arc<Mutex<DocumentView>>);

impl SharedDocument {
    pub fn new(view: DocumentView) -> Self {
        Self(Arc::new(Mutex::new(view)))
    }

    pub fn lock(&self) -> MutexGuard<'_, DocumentView> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ScrollHost for SharedDocument {
    fn find_anchor(&self, id: &str) -> Option<usize> {
        self.lock().anchor_row(id)
    }

    fn scroll_into_view(&self, row: usize) {
        self.lock().smooth_scroll_to(row);
    }

    fn scroll_to_origin(&self) {
        self.lock().scroll_to_origin();
    }
}
