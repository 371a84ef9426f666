/// cursor and scroll offset over the filtered view
///
/// keeps `offset <= cursor < offset + visible_rows()` and `cursor < len`
/// (or `cursor == 0` when the view is empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    cursor: usize,
    offset: usize,
    height: usize,
    reserved_rows: usize,
}

impl Viewport {
    /// `reserved_rows` are lines of the terminal height not used for table rows
    pub fn new(reserved_rows: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            height: reserved_rows + 1,
            reserved_rows,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// number of table rows that fit on screen, at least one
    pub fn visible_rows(&self) -> usize {
        self.height.saturating_sub(self.reserved_rows).max(1)
    }

    /// half a page, used by page up/down
    fn half_page(&self) -> usize {
        (self.visible_rows() / 2).max(1)
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// returns true when the cursor moved
    pub fn move_down(&mut self, len: usize) -> bool {
        if self.cursor + 1 >= len {
            return false;
        }
        self.cursor += 1;
        if self.cursor >= self.offset + self.visible_rows() {
            self.offset += 1;
        }
        true
    }

    /// returns true when the cursor moved
    pub fn move_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        if self.cursor < self.offset {
            self.offset -= 1;
        }
        true
    }

    pub fn page_down(&mut self, len: usize) -> bool {
        let target = self.cursor.saturating_add(self.half_page());
        self.jump_to(target, len)
    }

    pub fn page_up(&mut self, len: usize) -> bool {
        let target = self.cursor.saturating_sub(self.half_page());
        self.jump_to(target, len)
    }

    pub fn jump_to_top(&mut self, len: usize) -> bool {
        self.jump_to(0, len)
    }

    pub fn jump_to_bottom(&mut self, len: usize) -> bool {
        self.jump_to(len.saturating_sub(1), len)
    }

    /// move the cursor to `target` (clamped) and scroll the minimum to keep it visible
    fn jump_to(&mut self, target: usize, len: usize) -> bool {
        let target = target.min(len.saturating_sub(1));
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        self.scroll_to_cursor();
        true
    }

    /// apply a new terminal height and clamp the offset so the cursor stays visible
    pub fn resize(&mut self, height: usize, len: usize) {
        self.height = height;
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let rows = self.visible_rows();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + rows {
            self.offset = self.cursor + 1 - rows;
        }
    }

    /// range of filtered positions currently on screen
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = (self.offset + self.visible_rows()).min(len);
        start..end
    }
}
