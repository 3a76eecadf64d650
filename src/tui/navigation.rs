//! Row selection and scrolling for the table pane

/// Selected row and the first visible row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub selected: usize,
    pub offset: usize,
}

impl Cursor {
    /// Move down one row, scrolling when the selection leaves the window.
    pub fn down(&mut self, row_count: usize, visible_rows: usize) {
        if row_count == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(row_count - 1);
        self.follow(visible_rows);
    }

    pub fn up(&mut self, visible_rows: usize) {
        self.selected = self.selected.saturating_sub(1);
        self.follow(visible_rows);
    }

    pub fn reset(&mut self) {
        *self = Cursor::default();
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, row_count: usize, visible_rows: usize) {
        if row_count == 0 {
            self.reset();
            return;
        }
        self.selected = self.selected.min(row_count - 1);
        self.follow(visible_rows);
    }

    fn follow(&mut self, visible_rows: usize) {
        self.offset = adjust_scroll(self.offset, self.selected, visible_rows);
    }
}

/// Scroll offset that keeps `selected` inside a window of `visible_rows`.
pub fn adjust_scroll(offset: usize, selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    if selected < offset {
        return selected;
    }
    if selected >= offset + visible_rows {
        return selected + 1 - visible_rows;
    }
    offset
}
