use std::fmt;
use std::ops::Range;

use crate::buffer::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightType {
    Normal,
    Comment,
    MultilineComment,
    KeywordBuiltInType,
    KeywordControl,
    KeywordOther,
    String,
    Number,
}

impl HighlightType {
    /// 256-colour palette index
    pub fn color(self) -> u8 {
        match self {
            HighlightType::Normal => 255,             // white
            HighlightType::Comment => 40,             // light green
            HighlightType::MultilineComment => 28,    // dark green
            HighlightType::KeywordBuiltInType => 196, // red
            HighlightType::KeywordControl => 177,     // pinkish purple
            HighlightType::KeywordOther => 105,       // purple
            HighlightType::String => 215,             // orange
            HighlightType::Number => 6,               // blue
        }
    }
}

impl fmt::Display for HighlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightType::Normal => write!(f, "Normal"),
            HighlightType::Comment => write!(f, "Comment"),
            HighlightType::MultilineComment => write!(f, "MultilineComment"),
            HighlightType::KeywordBuiltInType => write!(f, "KeywordBuiltInType"),
            HighlightType::KeywordControl => write!(f, "KeywordControl"),
            HighlightType::KeywordOther => write!(f, "KeywordOther"),
            HighlightType::String => write!(f, "String"),
            HighlightType::Number => write!(f, "Number"),
        }
    }
}

/// A coloured range of document bytes. The end column is exclusive and may
/// lie on a later row than the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub kind: HighlightType,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl HighlightSpan {
    pub fn new(kind: HighlightType, start: Position, end: Position) -> Self {
        Self {
            kind,
            start_row: start.row,
            start_col: start.col,
            end_row: end.row,
            end_col: end.col,
        }
    }

    pub fn on_row(kind: HighlightType, row: usize, cols: Range<usize>) -> Self {
        Self::new(kind, Position::new(row, cols.start), Position::new(row, cols.end))
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_row, self.start_col)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_row, self.end_col)
    }

    pub fn touches_row(&self, row: usize) -> bool {
        self.start_row <= row && row <= self.end_row
    }

    /// Byte columns this span covers on `row`, given that row's length
    pub fn cols_on_row(&self, row: usize, row_len: usize) -> Option<Range<usize>> {
        if !self.touches_row(row) {
            return None;
        }
        let start = if row == self.start_row { self.start_col } else { 0 };
        let end = if row == self.end_row { self.end_col } else { row_len };
        let end = end.min(row_len);
        (start < end).then_some(start..end)
    }
}
