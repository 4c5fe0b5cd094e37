pub mod cursor;
mod row;


use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, trace};

use crate::error::{EditorError, Result};

pub use cursor::Cursor;
pub use row::Row;

/// A (row, col) location in document bytes, both 0-indexed.
/// `col` may equal the row length, meaning "after the last byte".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Backspace: removes the byte before the cursor
    Backward,
    /// Delete: removes the byte under the cursor
    Forward,
}

/// Ordered rows of bytes. Always holds at least one row.
///
/// Mutations take the position they act on and return the cursor position
/// that results, or `None` when the position is out of range or the edit has
/// nothing to do. Out-of-range requests are ignored rather than reported.
#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self {
            rows: vec![Row::default()],
            path: None,
            modified: false,
        }
    }

    pub fn from_text(raw: &[u8]) -> Self {
        Self {
            rows: Self::load_from_text(raw),
            path: None,
            modified: false,
        }
    }

    /// Split raw bytes into rows on `\n`. A trailing newline yields a final
    /// empty row and empty input yields a single empty row.
    pub fn load_from_text(raw: &[u8]) -> Vec<Row> {
        raw.split(|&b| b == b'\n').map(Row::from).collect()
    }

    /// Join rows with `\n`, no newline after the final row.
    pub fn serialize_to_text(rows: &[Row]) -> Vec<u8> {
        let total = rows.iter().map(Row::len).sum::<usize>() + rows.len().saturating_sub(1);
        let mut out = Vec::with_capacity(total);
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(row.as_bytes());
        }
        out
    }

    /// Read a file byte-for-byte.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|source| EditorError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut doc = Self::from_text(&raw);
        doc.path = Some(path.to_path_buf());
        info!(path = %path.display(), rows = doc.row_count(), bytes = raw.len(), "loaded file");
        Ok(doc)
    }

    /// Empty document that will be written to `path` on save.
    pub fn create(path: impl AsRef<Path>) -> Self {
        let mut doc = Self::new();
        doc.path = Some(path.as_ref().to_path_buf());
        doc
    }

    /// Write the document to its path, returning the number of bytes written.
    pub fn save(&mut self) -> Result<usize> {
        let path = self.path.clone().ok_or_else(|| EditorError::Write {
            path: PathBuf::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"),
        })?;
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = self.to_text();
        fs::write(path, &text).map_err(|source| EditorError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        self.path = Some(path.to_path_buf());
        self.modified = false;
        info!(path = %path.display(), bytes = text.len(), "saved file");
        Ok(text.len())
    }

    pub fn to_text(&self) -> Vec<u8> {
        Self::serialize_to_text(&self.rows)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Length of a row in bytes, 0 for rows that don't exist
    pub fn row_len(&self, idx: usize) -> usize {
        self.rows.get(idx).map_or(0, Row::len)
    }

    pub fn last_row(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// True when the document is a single empty row
    pub fn is_blank(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].is_empty()
    }

    fn contains(&self, row: usize, col: usize) -> bool {
        let ok = row < self.rows.len() && col <= self.rows[row].len();
        if !ok {
            trace!(row, col, rows = self.rows.len(), "ignoring out-of-range edit");
        }
        ok
    }

    /// Insert one byte before `col`. A newline byte splits the row instead.
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) -> Option<Position> {
        if byte == b'\n' {
            return self.split_row(row, col);
        }
        if !self.contains(row, col) {
            return None;
        }

        self.rows[row].insert(col, byte);
        self.modified = true;
        Some(Position::new(row, col + 1))
    }

    /// Backspace or Delete at (row, col). Crossing a row boundary joins rows;
    /// backward at the document start and forward at the document end do nothing.
    pub fn delete_char(&mut self, row: usize, col: usize, direction: DeleteDirection) -> Option<Position> {
        if !self.contains(row, col) {
            return None;
        }

        match direction {
            DeleteDirection::Backward => {
                if col == 0 {
                    // join_row refuses row 0
                    return self.join_row(row);
                }
                self.rows[row].remove(col - 1);
                self.modified = true;
                Some(Position::new(row, col - 1))
            }
            DeleteDirection::Forward => {
                if col == self.rows[row].len() {
                    // Pull the next row up; the cursor stays where it is
                    return self.join_row(row + 1);
                }
                self.rows[row].remove(col);
                self.modified = true;
                Some(Position::new(row, col))
            }
        }
    }

    /// Enter at (row, col). The cursor always lands at the start of the next row.
    pub fn split_row(&mut self, row: usize, col: usize) -> Option<Position> {
        if !self.contains(row, col) {
            return None;
        }

        let len = self.rows[row].len();
        if col == len {
            self.rows.insert(row + 1, Row::default());
        } else if col == 0 {
            self.rows.insert(row, Row::default());
        } else {
            let tail = self.rows[row].split_off(col);
            self.rows.insert(row + 1, tail);
        }

        self.modified = true;
        Some(Position::new(row + 1, 0))
    }

    /// Append `row` to the row above it and remove it. The returned cursor
    /// sits at the join point.
    pub fn join_row(&mut self, row: usize) -> Option<Position> {
        if row == 0 || row >= self.rows.len() {
            trace!(row, rows = self.rows.len(), "ignoring join");
            return None;
        }

        let removed = self.rows.remove(row);
        let prev = &mut self.rows[row - 1];
        let join_col = prev.len();
        prev.append(removed);

        self.modified = true;
        Some(Position::new(row - 1, join_col))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
