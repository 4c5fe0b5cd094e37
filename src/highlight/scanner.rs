use super::{is_separator, Grammar, HighlightSpan, HighlightType};
use crate::buffer::{Position, Row};

/// Scan every row from `start_row` to the end of the document.
pub fn scan(rows: &[Row], grammar: &Grammar, start_row: usize) -> Vec<HighlightSpan> {
    scan_range(rows, grammar, start_row, usize::MAX)
}

/// Scan rows `start_row..=stop_row`. A comment or string opened inside the
/// range is followed to its end even when that lies past `stop_row`.
pub fn scan_range(rows: &[Row], grammar: &Grammar, start_row: usize, stop_row: usize) -> Vec<HighlightSpan> {
    scan_from(rows, grammar, Position::new(start_row, 0), stop_row).0
}

/// Scan from an arbitrary position outside any span. Also returns where a
/// later scan should pick up.
pub(crate) fn scan_from(
    rows: &[Row],
    grammar: &Grammar,
    start: Position,
    stop_row: usize,
) -> (Vec<HighlightSpan>, Position) {
    let mut scanner = Scanner::new(rows, grammar);
    let resume = scanner.run(start, stop_row);
    (scanner.spans, resume)
}

enum RowOutcome {
    /// Row done, continue at the start of the next one
    Finished,
    /// A span ended here, continue scanning from this position
    ResumeAt(Position),
}

struct Scanner<'a> {
    rows: &'a [Row],
    grammar: &'a Grammar,
    spans: Vec<HighlightSpan>,
}

impl<'a> Scanner<'a> {
    fn new(rows: &'a [Row], grammar: &'a Grammar) -> Self {
        Self {
            rows,
            grammar,
            spans: Vec::new(),
        }
    }

    fn run(&mut self, start: Position, stop_row: usize) -> Position {
        let mut pos = start;
        while pos.row < self.rows.len() && pos.row <= stop_row {
            pos = match self.scan_row(pos.row, pos.col) {
                RowOutcome::Finished => Position::new(pos.row + 1, 0),
                RowOutcome::ResumeAt(next) => next,
            };
        }
        pos
    }

    fn scan_row(&mut self, row: usize, from: usize) -> RowOutcome {
        let bytes = self.rows[row].as_bytes();
        let mut token_start = from.min(bytes.len());
        let mut col = token_start;

        while col < bytes.len() {
            let b = bytes[col];
            if !is_separator(b) {
                col += 1;
                continue;
            }

            self.push_token(row, token_start, col, &bytes[token_start..col]);
            let rest = &bytes[col..];

            // Comment markers win over quotes at the same position
            if let Some((open, close)) = self.grammar.multi_line_comment {
                if !open.is_empty() && rest.starts_with(open.as_bytes()) {
                    let end = self.find_marker(Position::new(row, col + open.len()), close.as_bytes());
                    self.spans.push(HighlightSpan::new(
                        HighlightType::MultilineComment,
                        Position::new(row, col),
                        end,
                    ));
                    return RowOutcome::ResumeAt(end);
                }
            }

            if let Some(marker) = self.grammar.single_line_comment {
                if !marker.is_empty() && rest.starts_with(marker.as_bytes()) {
                    self.spans
                        .push(HighlightSpan::on_row(HighlightType::Comment, row, col..bytes.len()));
                    return RowOutcome::Finished;
                }
            }

            if b == b'"' || b == b'\'' {
                let end = self.find_string_end(Position::new(row, col + 1), b);
                self.spans
                    .push(HighlightSpan::new(HighlightType::String, Position::new(row, col), end));
                return RowOutcome::ResumeAt(end);
            }

            col += 1;
            token_start = col;
        }

        self.push_token(row, token_start, bytes.len(), &bytes[token_start..]);
        RowOutcome::Finished
    }

    fn push_token(&mut self, row: usize, start: usize, end: usize, token: &[u8]) {
        if let Some(kind) = self.grammar.classify(token) {
            self.spans.push(HighlightSpan::on_row(kind, row, start..end));
        }
    }

    fn end_of_document(&self) -> Position {
        let last = self.rows.len().saturating_sub(1);
        Position::new(last, self.rows.get(last).map_or(0, Row::len))
    }

    /// Position just past the next `marker` at or after `from`, or the end of
    /// the document. Markers never span rows.
    fn find_marker(&self, from: Position, marker: &[u8]) -> Position {
        if marker.is_empty() {
            return self.end_of_document();
        }

        let mut pos = from;
        while pos.row < self.rows.len() {
            let bytes = self.rows[pos.row].as_bytes();
            if pos.col < bytes.len() {
                if let Some(idx) = bytes[pos.col..].windows(marker.len()).position(|w| w == marker) {
                    return Position::new(pos.row, pos.col + idx + marker.len());
                }
            }
            pos = Position::new(pos.row + 1, 0);
        }
        self.end_of_document()
    }

    /// Position just past the closing `quote`, or the end of the document.
    /// Escape runs reset at the start of every row.
    fn find_string_end(&self, from: Position, quote: u8) -> Position {
        let escape = self.grammar.string_escape;
        let mut pos = from;

        while pos.row < self.rows.len() {
            let bytes = self.rows[pos.row].as_bytes();
            let mut escapes = 0usize;
            while pos.col < bytes.len() {
                let b = bytes[pos.col];
                if Some(b) == escape {
                    escapes += 1;
                } else {
                    if b == quote && escapes % 2 == 0 {
                        return Position::new(pos.row, pos.col + 1);
                    }
                    escapes = 0;
                }
                pos.col += 1;
            }
            pos = Position::new(pos.row + 1, 0);
        }
        self.end_of_document()
    }
}
