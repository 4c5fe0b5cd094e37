use super::{Document, Position};
use crate::highlight::is_separator;

/// Cursor position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Row index (0-indexed)
    pub row: usize,
    /// Byte column (0-indexed, may equal the row length)
    pub col: usize,
    /// Rendered column remembered across vertical moves
    sticky_col: Option<usize>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(pos: Position) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            sticky_col: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Jump to a position. Forgets the remembered column.
    pub fn set_position(&mut self, pos: Position) {
        self.row = pos.row;
        self.col = pos.col;
        self.sticky_col = None;
    }

    pub fn sticky_col(&self) -> Option<usize> {
        self.sticky_col
    }

    /// Pull the cursor back inside the document after rows were removed
    pub fn clamp(&mut self, doc: &Document) {
        self.row = self.row.min(doc.last_row());
        self.col = self.col.min(doc.row_len(self.row));
    }

    /// Move cursor left one byte, wrapping to the end of the previous row
    pub fn move_left(&mut self, doc: &Document) {
        self.sticky_col = None;
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = doc.row_len(self.row);
        }
    }

    /// Move cursor right one byte, wrapping to the start of the next row
    pub fn move_right(&mut self, doc: &Document) {
        self.sticky_col = None;
        if self.col < doc.row_len(self.row) {
            self.col += 1;
        } else if self.row < doc.last_row() {
            self.row += 1;
            self.col = 0;
        }
    }

    /// Move to the previous row, landing as close as possible to the
    /// remembered rendered column. On the first row, go to column 0.
    pub fn move_up(&mut self, doc: &Document, tab_stop: usize) {
        if self.row == 0 {
            self.move_to_line_start();
            return;
        }
        self.move_vertically(doc, self.row - 1, tab_stop);
    }

    /// Move to the next row. On the last row, go to the end of the row.
    pub fn move_down(&mut self, doc: &Document, tab_stop: usize) {
        if self.row >= doc.last_row() {
            self.move_to_line_end(doc);
            return;
        }
        self.move_vertically(doc, self.row + 1, tab_stop);
    }

    pub(crate) fn move_vertically(&mut self, doc: &Document, target_row: usize, tab_stop: usize) {
        let target_row = target_row.min(doc.last_row());
        let wanted = match self.sticky_col {
            Some(col) => col,
            None => doc
                .row(self.row)
                .map_or(0, |row| row.rendered_col(self.col, tab_stop)),
        };

        self.sticky_col = Some(wanted);
        self.row = target_row;
        self.col = doc
            .row(target_row)
            .map_or(0, |row| row.col_for_rendered(wanted, tab_stop));
    }

    /// Move to start of line
    pub fn move_to_line_start(&mut self) {
        self.sticky_col = None;
        self.col = 0;
    }

    /// Move to end of line
    pub fn move_to_line_end(&mut self, doc: &Document) {
        self.sticky_col = None;
        self.col = doc.row_len(self.row);
    }

    /// Ctrl+Left: back to the previous separator boundary. Sitting right
    /// after a separator (or at column 0) is a plain one-byte move.
    pub fn word_left(&mut self, doc: &Document) {
        let Some(row) = doc.row(self.row) else { return };
        let bytes = row.as_bytes();
        self.col = self.col.min(bytes.len());
        if self.col == 0 || bytes.get(self.col - 1).is_some_and(|&b| is_separator(b)) {
            self.move_left(doc);
            return;
        }

        self.sticky_col = None;
        while self.col > 0 && !is_separator(bytes[self.col - 1]) {
            self.col -= 1;
        }
    }

    /// Ctrl+Right: forward to the next separator. Sitting on a separator
    /// (or at the end of the row) is a plain one-byte move.
    pub fn word_right(&mut self, doc: &Document) {
        let Some(row) = doc.row(self.row) else { return };
        let bytes = row.as_bytes();
        if self.col >= bytes.len() || is_separator(bytes[self.col]) {
            self.move_right(doc);
            return;
        }

        self.sticky_col = None;
        while self.col < bytes.len() && !is_separator(bytes[self.col]) {
            self.col += 1;
        }
    }
}
