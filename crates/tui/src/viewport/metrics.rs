//! Scroll position bookkeeping for the article viewport.
//!
//! Tracks content height, viewport height and the current offset in terminal
//! rows, with bounded line, page and absolute movement.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollMetrics {
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub const fn content_height(&self) -> u16 {
        self.content_height
    }

    pub const fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    pub fn update_viewport_height(&mut self, viewport_height: u16) {
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    pub fn update_content_height(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Scrolls by relative line count (`+` down, `-` up). Returns whether the offset moved.
    pub fn scroll_lines(&mut self, delta: i32) -> bool {
        if delta == 0 || !self.is_scrollable() {
            return false;
        }
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset()));
        self.scroll_to(u16::try_from(next).unwrap_or(0))
    }

    pub fn scroll_pages(&mut self, delta_pages: i32) -> bool {
        if delta_pages == 0 || self.viewport_height == 0 {
            return false;
        }
        self.scroll_lines(i32::from(self.viewport_height).saturating_mul(delta_pages))
    }

    /// Jump to `offset`, clamped to the valid range.
    pub fn scroll_to(&mut self, offset: u16) -> bool {
        let next = offset.min(self.max_offset());
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn clamp(&self, offset: u16) -> u16 {
        offset.min(self.max_offset())
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
