// Scroll state shared by the sidebar and the document panel
//
// Each component owns its ScrollState; the App only routes input.
// Offsets are in rows: `offset` is the row shown at the top of the viewport.

/// Scroll state for a single panel
///
/// Owns all state needed for scrolling: position, content size, viewport size.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (row index at top of viewport)
    offset: usize,

    /// Total number of rows in content
    total: usize,

    /// Number of rows visible in viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        // Dimensions not known yet: allow it, next update clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Jump to an offset, clamped to the content
    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    /// Scroll the minimum amount needed to make `row` visible
    pub fn reveal(&mut self, row: usize) {
        if row < self.offset {
            self.offset = row;
        } else if self.viewport > 0 && row >= self.offset + self.viewport {
            self.scroll_to(row + 1 - self.viewport);
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end.max(start))
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_when_content_shrinks() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 90);

        scroll.update_dimensions(20, 10);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn scroll_to_is_clamped() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(30, 10);
        scroll.scroll_to(500);
        assert_eq!(scroll.offset(), 20);
        scroll.scroll_to(3);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);

        scroll.reveal(5);
        assert_eq!(scroll.offset(), 0);

        scroll.reveal(15);
        assert_eq!(scroll.offset(), 6);

        scroll.reveal(2);
        assert_eq!(scroll.offset(), 2);
    }

    #[test]
    fn visible_range_and_paging() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(25, 10);
        assert_eq!(scroll.visible_range(), (0, 10));

        scroll.page_down();
        assert_eq!(scroll.visible_range(), (10, 20));

        scroll.page_down();
        assert_eq!(scroll.visible_range(), (15, 25));

        scroll.page_up();
        scroll.page_up();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn scroll_down_stops_at_bottom() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(12, 10);
        scroll.scroll_down();
        scroll.scroll_down();
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 2);
        assert!(scroll.needs_scrollbar());
    }
}
