use tracing::debug;

use crate::buffer::{Cursor, Document, Position, Row};

/// On-screen cursor cell, relative to the top-left of the text area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderedCursor {
    pub row: usize,
    pub col: usize,
}

/// Visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Text rows on screen (terminal height minus the footer)
    pub rows: usize,
    pub cols: usize,
    /// First document row on screen
    pub row_offset: usize,
    /// First rendered column on screen
    pub col_offset: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_offset: 0,
            col_offset: 0,
        }
    }

    /// Size the text area from the terminal size, leaving `footer_rows` free
    pub fn for_terminal(term_rows: u16, term_cols: u16, footer_rows: usize) -> Self {
        Self::new((term_rows as usize).saturating_sub(footer_rows), term_cols as usize)
    }

    pub fn resize(&mut self, rows: usize, cols: usize) {
        debug!(rows, cols, "viewport resized");
        self.rows = rows;
        self.cols = cols;
    }

    /// Last document row on screen (may be past the end of the document)
    pub fn last_visible_row(&self) -> usize {
        self.row_offset + self.rows.max(1) - 1
    }

    /// Scroll the minimum amount needed to keep the cursor on screen and
    /// return where it lands. Calling this again without changes is a no-op.
    pub fn fix_rendered_cursor(&mut self, cursor: Position, row: &Row, tab_stop: usize) -> RenderedCursor {
        let rows = self.rows.max(1);
        let cols = self.cols.max(1);
        let rendered_col = row.rendered_col(cursor.col, tab_stop);

        if rendered_col < self.col_offset {
            self.col_offset = rendered_col;
        } else if rendered_col >= self.col_offset + cols {
            self.col_offset = rendered_col + 1 - cols;
        }

        if cursor.row < self.row_offset {
            self.row_offset = cursor.row;
        } else if cursor.row >= self.row_offset + rows {
            self.row_offset = cursor.row + 1 - rows;
        }

        RenderedCursor {
            row: cursor.row - self.row_offset,
            col: rendered_col - self.col_offset,
        }
    }

    /// Page Down: cursor and first row both move one screen down
    pub fn page_down(&mut self, doc: &Document, cursor: &mut Cursor, tab_stop: usize) {
        let height = self.rows.max(1);
        let last = doc.last_row();
        cursor.move_vertically(doc, (cursor.row + height).min(last), tab_stop);
        self.row_offset = (self.row_offset + height).min(last);
    }

    /// Page Up: cursor and first row both move one screen up
    pub fn page_up(&mut self, doc: &Document, cursor: &mut Cursor, tab_stop: usize) {
        let height = self.rows.max(1);
        cursor.move_vertically(doc, cursor.row.saturating_sub(height), tab_stop);
        self.row_offset = self.row_offset.saturating_sub(height);
    }

    /// Scroll one row down, dragging the cursor along if it would fall off the top
    pub fn scroll_down(&mut self, doc: &Document, cursor: &mut Cursor, tab_stop: usize) {
        if self.row_offset >= doc.last_row() {
            return;
        }
        self.row_offset += 1;
        if cursor.row < self.row_offset {
            cursor.move_vertically(doc, self.row_offset, tab_stop);
        }
    }

    /// Scroll one row up, dragging the cursor along if it would fall off the bottom
    pub fn scroll_up(&mut self, doc: &Document, cursor: &mut Cursor, tab_stop: usize) {
        if self.row_offset == 0 {
            return;
        }
        self.row_offset -= 1;
        if cursor.row > self.last_visible_row() {
            cursor.move_vertically(doc, self.last_visible_row(), tab_stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_rows(n: usize) -> Document {
        let text = (0..n).map(|i| format!("row {}", i)).collect::<Vec<_>>().join("\n");
        Document::from_text(text.as_bytes())
    }

    #[test]
    fn test_cursor_inside_viewport_does_not_scroll() {
        let mut vp = Viewport::new(10, 20);
        let row = Row::from("hello");
        let rc = vp.fix_rendered_cursor(Position::new(3, 4), &row, 8);
        assert_eq!(rc, RenderedCursor { row: 3, col: 4 });
        assert_eq!((vp.row_offset, vp.col_offset), (0, 0));
    }

    #[test]
    fn test_horizontal_scroll_is_minimal() {
        let mut vp = Viewport::new(10, 10);
        let row = Row::from("0123456789abcdefghij");

        let rc = vp.fix_rendered_cursor(Position::new(0, 15), &row, 8);
        assert_eq!(vp.col_offset, 6);
        assert_eq!(rc.col, 9);

        // Moving back inside the window keeps the offset
        let rc = vp.fix_rendered_cursor(Position::new(0, 8), &row, 8);
        assert_eq!(vp.col_offset, 6);
        assert_eq!(rc.col, 2);

        let rc = vp.fix_rendered_cursor(Position::new(0, 2), &row, 8);
        assert_eq!(vp.col_offset, 2);
        assert_eq!(rc.col, 0);
    }

    #[test]
    fn test_tabs_count_toward_scrolling() {
        let mut vp = Viewport::new(10, 10);
        let row = Row::from("\t\tx");
        let rc = vp.fix_rendered_cursor(Position::new(0, 2), &row, 8);
        assert_eq!(vp.col_offset, 7);
        assert_eq!(rc.col, 9);
    }

    #[test]
    fn test_vertical_scroll_is_minimal() {
        let mut vp = Viewport::new(5, 20);
        let row = Row::default();

        let rc = vp.fix_rendered_cursor(Position::new(7, 0), &row, 8);
        assert_eq!(vp.row_offset, 3);
        assert_eq!(rc.row, 4);

        let rc = vp.fix_rendered_cursor(Position::new(1, 0), &row, 8);
        assert_eq!(vp.row_offset, 1);
        assert_eq!(rc.row, 0);
    }

    #[test]
    fn test_fix_is_idempotent() {
        let mut vp = Viewport::new(4, 6);
        let row = Row::from("a\tbcdefghijkl");
        let first = vp.fix_rendered_cursor(Position::new(9, 12), &row, 8);
        let offsets = (vp.row_offset, vp.col_offset);
        let second = vp.fix_rendered_cursor(Position::new(9, 12), &row, 8);
        assert_eq!(first, second);
        assert_eq!(offsets, (vp.row_offset, vp.col_offset));
    }

    #[test]
    fn test_zero_sized_viewport_does_not_panic() {
        let mut vp = Viewport::new(0, 0);
        let rc = vp.fix_rendered_cursor(Position::new(3, 2), &Row::from("abc"), 8);
        assert_eq!(rc, RenderedCursor { row: 0, col: 0 });
    }

    #[test]
    fn test_page_down_and_up() {
        let doc = doc_with_rows(25);
        let mut vp = Viewport::new(10, 40);
        let mut cursor = Cursor::from_position(Position::new(2, 1));

        vp.page_down(&doc, &mut cursor, 8);
        assert_eq!(cursor.row, 12);
        assert_eq!(vp.row_offset, 10);

        vp.page_down(&doc, &mut cursor, 8);
        assert_eq!(cursor.row, 22);
        assert_eq!(vp.row_offset, 20);

        // Clamped to the last row
        vp.page_down(&doc, &mut cursor, 8);
        assert_eq!(cursor.row, 24);
        assert_eq!(vp.row_offset, 24);

        vp.page_up(&doc, &mut cursor, 8);
        assert_eq!(cursor.row, 14);
        assert_eq!(vp.row_offset, 14);

        vp.page_up(&doc, &mut cursor, 8);
        vp.page_up(&doc, &mut cursor, 8);
        assert_eq!(cursor.row, 0);
        assert_eq!(vp.row_offset, 0);
    }

    #[test]
    fn test_scroll_drags_cursor() {
        let doc = doc_with_rows(30);
        let mut vp = Viewport::new(5, 40);
        let mut cursor = Cursor::new();

        vp.scroll_down(&doc, &mut cursor, 8);
        assert_eq!(vp.row_offset, 1);
        assert_eq!(cursor.row, 1);

        cursor.set_position(Position::new(5, 0));
        vp.scroll_up(&doc, &mut cursor, 8);
        assert_eq!(vp.row_offset, 0);
        assert_eq!(cursor.row, 4);

        vp.scroll_up(&doc, &mut cursor, 8);
        assert_eq!(vp.row_offset, 0);
    }
}
