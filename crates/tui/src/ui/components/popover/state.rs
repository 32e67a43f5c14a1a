use ratatui::layout::Rect;

/// State of the centered section menu.
#[derive(Debug, Clone, Default)]
pub struct PopoverState {
    open: bool,
    pub cursor: usize,
    pub last_area: Rect,
    pub per_item_areas: Vec<Rect>,
}

impl PopoverState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open with the cursor on `cursor`, usually the active section.
    pub fn open(&mut self, cursor: usize) {
        self.open = true;
        self.cursor = cursor;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.per_item_areas.clear();
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }
}
