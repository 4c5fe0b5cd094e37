pub mod grammar;
pub mod scanner;
pub mod span;

use tracing::debug;

use crate::buffer::{Position, Row};

pub use grammar::{select_grammar, Grammar, GrammarCatalog};
pub use scanner::{scan, scan_range};
pub use span::{HighlightSpan, HighlightType};

/// Bytes that end a token: whitespace, punctuation, quotes and brackets.
pub fn is_separator(b: u8) -> bool {
    matches!(
        b,
        b' ' | b'\t'
            | b',' | b'.' | b';' | b':'
            | b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'<' | b'>'
            | b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'!' | b'&' | b'|' | b'^' | b'~' | b'?'
            | b'"' | b'\'' | b'#' | b'\\'
    )
}

/// Highlight spans for the document, rebuilt lazily from the first edited
/// row downwards.
///
/// Spans above the edit point stay as they are. Anything that starts at or
/// after the edited row, or that crosses it, is dropped and re-derived the
/// next time the visible rows are requested.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    spans: Vec<HighlightSpan>,
    /// Where scanning continues; everything before it is up to date
    resume: Position,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn clear(&mut self) {
        self.spans.clear();
        self.resume = Position::default();
    }

    /// Forget spans that may have changed after an edit on `row`.
    pub fn invalidate_from(&mut self, row: usize) {
        let mut restart = row;
        // Spans are in document order, so stale ones sit at the tail
        while let Some(last) = self.spans.last() {
            if last.end_row < restart {
                break;
            }
            restart = restart.min(last.start_row);
            self.spans.pop();
        }

        let restart = Position::new(restart, 0);
        if restart < self.resume {
            self.resume = restart;
        }
    }

    /// Make sure every row up to `through_row` has been scanned.
    pub fn ensure_scanned(&mut self, rows: &[Row], grammar: Option<&Grammar>, through_row: usize) {
        let Some(grammar) = grammar else {
            self.spans.clear();
            return;
        };
        if self.resume.row > through_row || self.resume.row >= rows.len() {
            return;
        }

        let (spans, resume) = scanner::scan_from(rows, grammar, self.resume, through_row);
        debug!(from = self.resume.row, through = through_row, found = spans.len(), "highlight scan");
        self.spans.extend(spans);
        self.resume = resume;
    }

    /// Invalidate from the edited row and rebuild through `through_row`.
    pub fn rescan(&mut self, rows: &[Row], grammar: Option<&Grammar>, edited_row: usize, through_row: usize) {
        self.invalidate_from(edited_row);
        self.ensure_scanned(rows, grammar, through_row);
    }
}
