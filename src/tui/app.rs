// TUI application state
//
// The App owns the page set, the router and the panels. The document panel
// sits behind a shared handle so the scroll restorer (a background task
// subscribed to the router) can reposition it.
//
// Navigation order: the router publishes the new location, the App swaps
// the page synchronously, and the restorer applies its scroll policy
// afterwards (immediately for the origin, after a short delay for anchors).

use super::clipboard::ClipboardWriter;
use super::components::code_block::Capabilities;
use super::components::document_panel::{DocumentView, SharedDocument, SnippetDefaults};
use super::components::sidebar::Sidebar;
use super::traits::{ComponentId, Copyable, Handled, Interactive, Scrollable};
use crate::config::Config;
use crate::docs::{not_found_page, Page};
use crate::highlight::Tokenizer;
use crate::logging::LogBuffer;
use crate::nav::{Location, Router, ScrollRestorer};
use crate::theme::Theme;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::sync::Arc;

/// Main application state for the TUI
pub struct App {
    pub theme: Theme,
    pub pages: Vec<Page>,
    pub router: Router,
    pub document: SharedDocument,
    pub sidebar: Sidebar,
    /// Focused panel: Sidebar or Document
    pub focus: ComponentId,
    pub should_quit: bool,
    pub log_buffer: LogBuffer,

    clipboard: Arc<dyn ClipboardWriter>,
    /// Path currently loaded into the document panel
    shown_path: Option<String>,
    /// Unsubscribes (and cancels any pending anchor lookup) on drop
    _restorer: ScrollRestorer,
}

impl App {
    /// Build the app and start scroll restoration
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        pages: Vec<Page>,
        config: &Config,
        log_buffer: LogBuffer,
        tokenizer: Arc<dyn Tokenizer>,
        clipboard: Arc<dyn ClipboardWriter>,
        initial_route: Option<&str>,
    ) -> Self {
        let caps = Capabilities::new(tokenizer, Arc::clone(&clipboard));
        let defaults = SnippetDefaults {
            language: config.default_language.clone(),
            show_copy: config.show_copy,
        };
        let document = SharedDocument::new(DocumentView::new(caps, defaults));

        let initial = initial_route
            .map(Location::parse)
            .or_else(|| pages.first().map(|p| Location::new(p.path.clone(), None)))
            .unwrap_or_default();
        let router = Router::new(initial);

        let restorer = ScrollRestorer::spawn(router.subscribe(), Arc::new(document.clone()));

        let mut app = Self {
            theme: Theme::default(),
            sidebar: Sidebar::new(&pages),
            pages,
            router,
            document,
            focus: ComponentId::Document,
            should_quit: false,
            log_buffer,
            clipboard,
            shown_path: None,
            _restorer: restorer,
        };
        app.set_focus(ComponentId::Document);
        app.sync_location();
        app
    }

    /// Page for a route path, or the not-found page
    pub fn page(&self, path: &str) -> Page {
        self.pages
            .iter()
            .find(|p| p.path == path)
            .cloned()
            .unwrap_or_else(|| not_found_page(path))
    }

    pub fn current_page_index(&self) -> Option<usize> {
        let current = self.router.current();
        self.pages.iter().position(|p| p.path == current.path)
    }

    // ─────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────

    /// Follow a link target (`/path`, `/path#anchor` or `#anchor`)
    pub fn navigate(&mut self, target: &str) -> bool {
        let changed = self.router.navigate(target);
        if changed {
            self.sync_location();
        }
        changed
    }

    pub fn navigate_to(&mut self, location: Location) -> bool {
        let changed = self.router.navigate_to(location);
        if changed {
            self.sync_location();
        }
        changed
    }

    pub fn back(&mut self) -> bool {
        let changed = self.router.back();
        if changed {
            self.sync_location();
        }
        changed
    }

    /// Follow the next or previous heading on the current page
    pub fn jump_section(&mut self, forward: bool) -> bool {
        let anchor = self.document.lock().section_anchor(forward);
        match anchor {
            Some(anchor) => self.navigate(&format!("#{anchor}")),
            None => false,
        }
    }

    /// Previous (-1) or next (+1) page in sidebar order, wrapping
    pub fn step_page(&mut self, delta: isize) -> bool {
        let count = self.pages.len();
        if count == 0 {
            return false;
        }
        let next = match self.current_page_index() {
            Some(i) => (i as isize + delta).rem_euclid(count as isize) as usize,
            None => 0,
        };
        let location = Location::new(self.pages[next].path.clone(), None);
        self.navigate_to(location)
    }

    /// Load the page for the current location if it changed
    fn sync_location(&mut self) {
        let location = self.router.current();
        if self.shown_path.as_deref() != Some(location.path.as_str()) {
            let page = self.page(&location.path);
            self.document.lock().set_page(&page);
            self.shown_path = Some(location.path.clone());
        }
        self.sidebar.sync_current(&location);
        tracing::info!("Showing {}", location);
    }

    // ─────────────────────────────────────────────────────────────
    // Focus and actions
    // ─────────────────────────────────────────────────────────────

    pub fn set_focus(&mut self, focus: ComponentId) {
        if !focus.is_focusable() {
            return;
        }
        self.focus = focus;
        self.document
            .lock()
            .set_panel_focused(focus == ComponentId::Document);
    }

    /// Copy the whole current page as plain text
    pub fn copy_page(&self) -> bool {
        let document = self.document.lock();
        let Some(text) = document.copy_text() else {
            return false;
        };
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                tracing::info!("Copied {}", document.copy_description());
                true
            }
            Err(e) => {
                tracing::warn!("Copy of {} failed: {:#}", document.copy_description(), e);
                false
            }
        }
    }

    /// Advance animations by one frame
    pub fn tick(&mut self) {
        self.document.lock().tick();
    }

    /// Keybind hint for the focused panel
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::Sidebar => self.sidebar.focus_hint(),
            _ => self.document.lock().focus_hint(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────

    /// Layered dispatch: global keys, then the focused panel
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.handle_global_key(key) {
            return;
        }

        let handled = match self.focus {
            ComponentId::Sidebar => self.handle_sidebar_key(key),
            _ => self.document.lock().handle_key(key),
        };
        if !handled.was_handled() && key.code == KeyCode::Esc {
            self.set_focus(self.focus.next_focus());
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Backspace => {
                self.back();
            }
            KeyCode::Char('[') => {
                self.step_page(-1);
            }
            KeyCode::Char(']') => {
                self.step_page(1);
            }
            KeyCode::Char('y') => {
                self.copy_page();
            }
            KeyCode::Char('n') if self.focus == ComponentId::Document => {
                self.jump_section(true);
            }
            KeyCode::Char('p') if self.focus == ComponentId::Document => {
                self.jump_section(false);
            }
            KeyCode::Char('h') | KeyCode::Left if self.focus == ComponentId::Document => {
                self.set_focus(ComponentId::Sidebar);
            }
            KeyCode::Tab | KeyCode::BackTab if self.focus == ComponentId::Sidebar => {
                self.set_focus(ComponentId::Document);
                self.document
                    .lock()
                    .handle_key(KeyEvent::new(key.code, KeyModifiers::NONE));
            }
            _ => return false,
        }
        true
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) -> Handled {
        let handled = self.sidebar.handle_key(key);
        if let Some(location) = self.sidebar.take_activated() {
            self.navigate_to(location);
        }
        handled
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => self.document.lock().hover_at(column, row),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.sidebar.click_at(column, row) {
                    self.set_focus(ComponentId::Sidebar);
                    if let Some(location) = self.sidebar.take_activated() {
                        self.navigate_to(location);
                    }
                } else {
                    self.set_focus(ComponentId::Document);
                    self.document.lock().click_at(column, row);
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let down = mouse.kind == MouseEventKind::ScrollDown;
                if self.sidebar.contains(column, row) {
                    if down {
                        self.sidebar.scroll_down();
                    } else {
                        self.sidebar.scroll_up();
                    }
                } else {
                    let mut document = self.document.lock();
                    for _ in 0..3 {
                        if down {
                            document.scroll_down();
                        } else {
                            document.scroll_up();
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::demo_pages;
    use crate::highlight::Highlighter;
    use crate::tui::clipboard::testing::RecordingClipboard;
    use ratatui::layout::Rect;
    use std::time::Duration;
    use tokio::time::sleep;

    fn app_with(clipboard: Arc<RecordingClipboard>, route: Option<&str>) -> App {
        App::new(
            demo_pages(),
            &Config::default(),
            LogBuffer::new(),
            Arc::new(Highlighter::new()),
            clipboard,
            route,
        )
    }

    fn app() -> App {
        app_with(Arc::new(RecordingClipboard::default()), None)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn starts_on_first_page() {
        let app = app();
        assert_eq!(app.router.current(), Location::root());
        assert_eq!(app.document.lock().path(), "/");
        assert_eq!(app.focus, ComponentId::Document);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_route_shows_not_found() {
        let mut app = app();
        app.navigate("/nope");
        assert_eq!(app.document.lock().title(), "Not found");
    }

    #[tokio::test(start_paused = true)]
    async fn anchor_navigation_scrolls_after_delay() {
        let mut app = app();
        app.document.lock().prepare(Rect::new(0, 0, 60, 5));

        app.navigate("/pricing#limits");
        let target = app.document.lock().anchor_row("limits").unwrap();
        assert!(target > 0);

        sleep(ms(50)).await;
        assert!(!app.document.lock().is_animating());

        sleep(ms(60)).await;
        assert!(app.document.lock().is_animating());
        for _ in 0..50 {
            app.tick();
        }
        let document = app.document.lock();
        assert_eq!(
            document.scroll_offset(),
            target.min(document.scroll_state().max_offset())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn section_keys_follow_headings() {
        let mut app = app_with(Arc::new(RecordingClipboard::default()), Some("/pricing"));
        app.document.lock().prepare(Rect::new(0, 0, 60, 5));

        app.handle_key(press(KeyCode::Char('n')));
        let first = app.router.current();
        assert_eq!(first.path, "/pricing");
        let anchor = first.anchor.clone().unwrap();
        let row = app.document.lock().anchor_row(&anchor).unwrap();
        assert!(row > 0);

        sleep(ms(110)).await;
        for _ in 0..50 {
            app.tick();
        }
        {
            let document = app.document.lock();
            assert_eq!(
                document.scroll_offset(),
                row.min(document.scroll_state().max_offset())
            );
        }

        // Back up to a heading above the viewport top, same page
        app.handle_key(press(KeyCode::Char('p')));
        let previous = app.router.current();
        assert_eq!(previous.path, "/pricing");
        let above = app
            .document
            .lock()
            .anchor_row(previous.anchor.as_deref().unwrap())
            .unwrap();
        assert!(above < app.document.lock().scroll_offset());
        assert_eq!(app.document.lock().path(), "/pricing");
    }

    #[tokio::test(start_paused = true)]
    async fn plain_navigation_returns_to_top() {
        let mut app = app();
        app.document.lock().prepare(Rect::new(0, 0, 60, 5));
        app.document.lock().scroll_state_mut().scroll_to_bottom();
        assert!(app.document.lock().scroll_offset() > 0);

        app.navigate("/api");
        sleep(ms(1)).await;
        assert_eq!(app.document.lock().scroll_offset(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn page_keys_and_back() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char(']')));
        assert_eq!(app.router.current().path, "/api");
        app.handle_key(press(KeyCode::Char('[')));
        app.handle_key(press(KeyCode::Char('[')));
        assert_eq!(app.router.current().path, "/pricing");

        app.handle_key(press(KeyCode::Char('b')));
        assert_eq!(app.router.current().path, "/");
        app.handle_key(press(KeyCode::Char('b')));
        assert_eq!(app.router.current().path, "/api");
    }

    #[tokio::test(start_paused = true)]
    async fn sidebar_enter_navigates() {
        let mut app = app();
        app.handle_key(press(KeyCode::Char('h')));
        assert_eq!(app.focus, ComponentId::Sidebar);

        let target = app
            .sidebar
            .entries()
            .iter()
            .position(|e| e.target == Location::parse("/pricing#pricing"))
            .unwrap();
        for _ in 0..target {
            app.handle_key(press(KeyCode::Char('j')));
        }
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.router.current(), Location::parse("/pricing#pricing"));
        assert_eq!(app.document.lock().path(), "/pricing");
    }

    #[tokio::test(start_paused = true)]
    async fn tab_from_sidebar_focuses_first_snippet() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let mut app = app_with(clipboard.clone(), None);
        app.set_focus(ComponentId::Sidebar);

        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, ComponentId::Document);
        assert_eq!(app.document.lock().focused_block(), Some(0));

        app.handle_key(press(KeyCode::Enter));
        let writes = clipboard.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].starts_with("curl -fsSL"));
    }

    #[tokio::test(start_paused = true)]
    async fn copy_page_writes_plain_text() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let mut app = app_with(clipboard.clone(), Some("/api"));
        app.handle_key(press(KeyCode::Char('y')));
        let writes = clipboard.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].starts_with("# API reference"));
    }

    #[tokio::test(start_paused = true)]
    async fn quit_keys() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_route_is_honoured() {
        let app = app_with(Arc::new(RecordingClipboard::default()), Some("/pricing#limits"));
        assert_eq!(app.document.lock().path(), "/pricing");
        assert_eq!(app.current_page_index(), Some(3));
    }
}
