//! Sidebar: page index with each page's section headings
//!
//! Selection-based scrolling: the selected entry is always kept visible.
//! Enter queues the entry's route (`/path` or `/path#anchor`) for the App
//! to hand to the router.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::docs::Page;
use crate::nav::Location;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub label: String,
    /// Nesting depth: 0 for pages, heading level - 1 for sections
    pub depth: usize,
    pub target: Location,
}

pub struct Sidebar {
    entries: Vec<SidebarEntry>,
    selected: usize,
    /// Entry matching the current route
    current: Option<usize>,
    scroll: ScrollState,
    activated: Option<Location>,
    area: Rect,
}

impl Sidebar {
    /// Build the index. Level-1 headings are skipped: the page entry
    /// already stands for them.
    pub fn new(pages: &[Page]) -> Self {
        let mut entries = Vec::new();
        for page in pages {
            entries.push(SidebarEntry {
                label: page.title.clone(),
                depth: 0,
                target: Location::new(page.path.clone(), None),
            });
            for (level, text, anchor) in page.headings().filter(|(level, ..)| *level > 1) {
                entries.push(SidebarEntry {
                    label: text.to_string(),
                    depth: (level - 1) as usize,
                    target: Location::new(page.path.clone(), Some(anchor.to_string())),
                });
            }
        }

        Self {
            entries,
            selected: 0,
            current: None,
            scroll: ScrollState::new(),
            activated: None,
            area: Rect::default(),
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Highlight the entry for `location` and move the selection to it
    ///
    /// Falls back to the page entry when the anchor has no entry.
    pub fn sync_current(&mut self, location: &Location) {
        let exact = self.entries.iter().position(|e| e.target == *location);
        let page = || {
            self.entries
                .iter()
                .position(|e| e.depth == 0 && e.target.path == location.path)
        };
        self.current = exact.or_else(page);
        if let Some(index) = self.current {
            self.select(index);
        }
    }

    fn select(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = index.min(self.entries.len() - 1);
        self.scroll.reveal(self.selected);
    }

    fn move_selection(&mut self, delta: isize) {
        let next = self.selected.saturating_add_signed(delta);
        self.select(next);
    }

    /// Route chosen with Enter or a click, if any
    pub fn take_activated(&mut self) -> Option<Location> {
        self.activated.take()
    }

    /// Whether screen cell `(column, row)` is inside the list
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let area = self.area;
        column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height
    }

    /// Click on an entry: select and activate it
    pub fn click_at(&mut self, column: u16, row: u16) -> bool {
        if !self.contains(column, row) {
            return false;
        }
        let index = self.scroll.offset() + (row - self.area.y) as usize;
        if index >= self.entries.len() {
            return false;
        }
        self.select(index);
        self.activated = Some(self.entries[index].target.clone());
        true
    }

    /// Sync viewport size for the content area (inside the border)
    pub fn prepare(&mut self, inner: Rect) {
        self.area = inner;
        self.scroll
            .update_dimensions(self.entries.len(), inner.height as usize);
        self.scroll.reveal(self.selected);
    }
}

impl Component for Sidebar {
    fn id(&self) -> ComponentId {
        ComponentId::Sidebar
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(ComponentId::Sidebar);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let index = start + i;
                let marker = if Some(index) == self.current { "▸ " } else { "  " };
                let text = format!("{}{}{}", marker, "  ".repeat(entry.depth), entry.label);

                let mut style = if entry.depth == 0 {
                    Style::default()
                        .fg(theme.heading)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                if index == self.selected && focused {
                    style = Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD);
                } else if Some(index) == self.current {
                    style = style.fg(theme.highlight);
                }
                ListItem::new(text).style(style)
            })
            .collect();

        let border = if focused { theme.highlight } else { theme.border };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border))
                .title(" Pages ")
                .title_style(Style::default().fg(theme.title)),
        );
        f.render_widget(list, area);
        render_scrollbar(f, area, self.scroll_state(), ScrollbarStyle::Minimal);
    }
}

impl Scrollable for Sidebar {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for Sidebar {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let page = self.scroll.viewport().max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                match self.entries.get(self.selected) {
                    Some(entry) => self.activated = Some(entry.target.clone()),
                    None => return Handled::No,
                }
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("j/k:select  Enter:open  Tab:document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::demo_pages;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sidebar() -> Sidebar {
        let mut sidebar = Sidebar::new(&demo_pages());
        sidebar.prepare(Rect::new(1, 1, 30, 5));
        sidebar
    }

    #[test]
    fn lists_pages_with_sections() {
        let sidebar = sidebar();
        let first = &sidebar.entries()[0];
        assert_eq!(first.depth, 0);
        assert_eq!(first.target, Location::root());

        assert!(sidebar
            .entries()
            .iter()
            .any(|e| e.target == Location::parse("/pricing#pricing") && e.depth == 1));
        // H1 headings fold into their page entry
        assert!(!sidebar
            .entries()
            .iter()
            .any(|e| e.target.anchor.as_deref() == Some("quickstart")));
    }

    #[test]
    fn enter_activates_selection() {
        let mut sidebar = sidebar();
        assert!(sidebar.handle_key(key(KeyCode::Char('j'))).was_handled());
        assert!(sidebar.handle_key(key(KeyCode::Enter)).was_handled());

        let expected = sidebar.entries()[1].target.clone();
        assert_eq!(sidebar.take_activated(), Some(expected));
        assert_eq!(sidebar.take_activated(), None);
    }

    #[test]
    fn selection_stays_visible() {
        let mut sidebar = sidebar();
        sidebar.handle_key(key(KeyCode::End));
        let (start, end) = sidebar.scroll_state().visible_range();
        assert!(start <= sidebar.selected() && sidebar.selected() < end);
        assert_eq!(sidebar.selected(), sidebar.entries().len() - 1);

        sidebar.handle_key(key(KeyCode::Char('g')));
        assert_eq!(sidebar.scroll_offset(), 0);
    }

    #[test]
    fn sync_current_falls_back_to_page() {
        let mut sidebar = sidebar();
        sidebar.sync_current(&Location::parse("/pricing#no-such-section"));
        let selected = &sidebar.entries()[sidebar.selected()];
        assert_eq!(selected.target, Location::parse("/pricing"));

        sidebar.sync_current(&Location::parse("/pricing#limits"));
        let selected = &sidebar.entries()[sidebar.selected()];
        assert_eq!(selected.target, Location::parse("/pricing#limits"));
    }

    #[test]
    fn click_selects_and_activates() {
        let mut sidebar = sidebar();
        assert!(!sidebar.click_at(0, 0));
        assert!(sidebar.click_at(3, 3));
        assert_eq!(sidebar.selected(), 2);
        assert_eq!(
            sidebar.take_activated(),
            Some(sidebar.entries()[2].target.clone())
        );
    }
}
