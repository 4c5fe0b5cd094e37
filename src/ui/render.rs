use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::status::StatusInfo;
use super::viewport::{RenderedCursor, Viewport};
use crate::buffer::Row;
use crate::config::EditorConfig;
use crate::highlight::{HighlightSpan, HighlightType};
use crate::mode::Mode;

/// Everything needed to draw one frame
pub struct Frame<'a> {
    pub rows: &'a [Row],
    /// Highlight spans in document order
    pub spans: &'a [HighlightSpan],
    pub viewport: &'a Viewport,
    pub cursor: RenderedCursor,
    pub status: StatusInfo<'a>,
    pub message: &'a str,
    /// Show the welcome banner instead of the (empty) document
    pub blank: bool,
}

/// Turns a [`Frame`] into the bytes that redraw the whole screen
pub struct FrameRenderer<'a> {
    config: &'a EditorConfig,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(config: &'a EditorConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, frame: &Frame) -> io::Result<Vec<u8>> {
        let vp = frame.viewport;
        let mut out = Vec::with_capacity((vp.rows + 2) * (vp.cols + 16));

        queue!(out, Hide)?;
        for y in 0..vp.rows {
            let doc_row = vp.row_offset + y;
            queue!(out, MoveTo(0, cell(y)))?;

            if frame.blank && y == vp.rows / 3 && doc_row >= frame.rows.len() {
                self.draw_banner(&mut out, vp.cols)?;
            } else if let Some(row) = frame.rows.get(doc_row) {
                self.draw_text_row(&mut out, frame, doc_row, row)?;
            } else {
                out.write_all(self.config.empty_row_marker.as_bytes())?;
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
        }

        self.draw_footer(&mut out, frame)?;

        if frame.status.mode == Mode::Command {
            queue!(out, MoveTo(1, cell(vp.rows + 1)))?;
        } else {
            queue!(out, MoveTo(cell(frame.cursor.col), cell(frame.cursor.row)))?;
        }
        queue!(out, Show)?;
        Ok(out)
    }

    fn draw_text_row(&self, out: &mut Vec<u8>, frame: &Frame, doc_row: usize, row: &Row) -> io::Result<()> {
        let vp = frame.viewport;
        let rendered = row.render(self.config.tab_stop);
        let start = vp.col_offset.min(rendered.len());
        let end = (vp.col_offset + vp.cols).min(rendered.len());
        let visible = &rendered[start..end];
        let kinds = self.cell_kinds(frame.spans, doc_row, row, start, visible.len());

        let mut i = 0;
        while i < visible.len() {
            let kind = kinds[i];
            let run = kinds[i..].iter().take_while(|k| **k == kind).count();
            let text = &visible[i..i + run];
            if kind == HighlightType::Normal {
                out.write_all(text)?;
            } else {
                queue!(out, SetForegroundColor(Color::AnsiValue(kind.color())))?;
                out.write_all(text)?;
                queue!(out, SetForegroundColor(Color::Reset))?;
            }
            i += run;
        }
        Ok(())
    }

    /// Highlight kind of each visible cell. Later spans win where they overlap.
    fn cell_kinds(
        &self,
        spans: &[HighlightSpan],
        doc_row: usize,
        row: &Row,
        start: usize,
        width: usize,
    ) -> Vec<HighlightType> {
        let tab_stop = self.config.tab_stop;
        let mut kinds = vec![HighlightType::Normal; width];
        let first = spans.partition_point(|s| s.end_row < doc_row);

        for span in spans[first..].iter().take_while(|s| s.start_row <= doc_row) {
            let Some(cols) = span.cols_on_row(doc_row, row.len()) else {
                continue;
            };
            let from = row.rendered_col(cols.start, tab_stop).clamp(start, start + width) - start;
            let to = row.rendered_col(cols.end, tab_stop).clamp(start, start + width) - start;
            kinds[from..to].fill(span.kind);
        }
        kinds
    }

    fn draw_banner(&self, out: &mut Vec<u8>, cols: usize) -> io::Result<()> {
        let banner: String = self.config.welcome.chars().take(cols).collect();
        let mut padding = (cols - banner.chars().count()) / 2;
        if padding > 0 {
            out.write_all(self.config.empty_row_marker.as_bytes())?;
            padding -= 1;
        }
        out.resize(out.len() + padding, b' ');
        out.write_all(banner.as_bytes())
    }

    fn draw_footer(&self, out: &mut Vec<u8>, frame: &Frame) -> io::Result<()> {
        let vp = frame.viewport;
        queue!(out, MoveTo(0, cell(vp.rows)), SetAttribute(Attribute::Reverse))?;
        out.write_all(frame.status.compose(vp.cols).as_bytes())?;
        queue!(out, SetAttribute(Attribute::NoReverse))?;

        if self.config.footer_rows < 2 {
            return Ok(());
        }
        queue!(out, MoveTo(0, cell(vp.rows + 1)))?;
        if frame.status.mode == Mode::Command {
            out.write_all(b":")?;
        } else {
            let message: String = frame.message.chars().take(vp.cols).collect();
            out.write_all(message.as_bytes())?;
        }
        queue!(out, Clear(ClearType::UntilNewLine))
    }
}

fn cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Document, Position};
    use crate::highlight::{scan, grammar::CPP};

    /// Drop escape sequences, keeping one line of text per `MoveTo`
    fn screen_text(bytes: &[u8]) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'[') {
                let mut j = i + 2;
                while j < bytes.len() && !(0x40..=0x7e).contains(&bytes[j]) {
                    j += 1;
                }
                if bytes.get(j) == Some(&b'H') {
                    lines.push(String::new());
                }
                i = j + 1;
            } else {
                if let Some(line) = lines.last_mut() {
                    line.push(bytes[i] as char);
                }
                i += 1;
            }
        }
        lines
    }

    fn status(mode: Mode) -> StatusInfo<'static> {
        StatusInfo {
            file_name: "t.cpp",
            line_count: 1,
            modified: false,
            mode,
            cursor: Position::new(0, 0),
        }
    }

    fn render(doc: &Document, spans: &[HighlightSpan], vp: &Viewport, mode: Mode, message: &str) -> Vec<u8> {
        let config = EditorConfig::default();
        let frame = Frame {
            rows: doc.rows(),
            spans,
            viewport: vp,
            cursor: RenderedCursor::default(),
            status: status(mode),
            message,
            blank: doc.is_blank(),
        };
        FrameRenderer::new(&config).render(&frame).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_rows_and_markers() {
        let doc = Document::from_text(b"abc\n\tx");
        let vp = Viewport::new(4, 12);
        let lines = screen_text(&render(&doc, &[], &vp, Mode::ReadOnly, "saved"));
        assert_eq!(lines[0], "abc");
        assert_eq!(lines[1], "        x");
        assert_eq!(lines[2], "~");
        assert_eq!(lines[3], "~");
        assert_eq!(lines[4].chars().count(), 12);
        assert_eq!(lines[5], "saved");
    }

    #[test]
    fn test_horizontal_slice() {
        let doc = Document::from_text(b"0123456789");
        let mut vp = Viewport::new(1, 4);
        vp.col_offset = 3;
        let lines = screen_text(&render(&doc, &[], &vp, Mode::ReadOnly, ""));
        assert_eq!(lines[0], "3456");
    }

    #[test]
    fn test_colours_wrap_highlighted_text() {
        let doc = Document::from_text(b"int x = 5;");
        let spans = scan(doc.rows(), &CPP, 0);
        let vp = Viewport::new(1, 40);
        let bytes = render(&doc, &spans, &vp, Mode::ReadOnly, "");
        assert!(contains(&bytes, b"\x1b[38;5;196mint\x1b[39m"));
        assert!(contains(&bytes, b"\x1b[38;5;6m5\x1b[39m;"));
    }

    #[test]
    fn test_spans_clipped_to_viewport() {
        let doc = Document::from_text(b"// a long comment line");
        let spans = vec![
            HighlightSpan::on_row(HighlightType::Comment, 0, 0..22),
            HighlightSpan::on_row(HighlightType::Number, 0, 3..100),
            HighlightSpan::on_row(HighlightType::String, 0, 50..60),
        ];
        let mut vp = Viewport::new(1, 5);
        vp.col_offset = 1;
        let bytes = render(&doc, &spans, &vp, Mode::ReadOnly, "");
        assert!(contains(&bytes, b"\x1b[38;5;40m/ \x1b[39m\x1b[38;5;6ma l\x1b[39m"));
        assert_eq!(screen_text(&bytes)[0], "/ a l");
    }

    #[test]
    fn test_multi_row_span_colours_middle_rows() {
        let doc = Document::from_text(b"/* a\nb\nc */ x");
        let spans = scan(doc.rows(), &CPP, 0);
        let vp = Viewport::new(3, 20);
        let bytes = render(&doc, &spans, &vp, Mode::ReadOnly, "");
        assert!(contains(&bytes, b"\x1b[38;5;28mb\x1b[39m"));
        assert!(contains(&bytes, b"\x1b[38;5;28mc */\x1b[39m x"));
    }

    #[test]
    fn test_control_bytes_are_masked() {
        let doc = Document::from_text(b"a\x1b[2Jb");
        let vp = Viewport::new(1, 20);
        let bytes = render(&doc, &[], &vp, Mode::ReadOnly, "");
        assert!(!contains(&bytes, b"\x1b[2J"));
        assert_eq!(screen_text(&bytes)[0], "a?[2Jb");
    }

    #[test]
    fn test_welcome_banner_on_blank_document() {
        let doc = Document::new();
        let vp = Viewport::new(9, 60);
        let lines = screen_text(&render(&doc, &[], &vp, Mode::ReadOnly, ""));
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "~");
        let banner = &lines[3];
        assert!(banner.starts_with('~'));
        assert!(banner.trim_start_matches('~').trim_start().starts_with("Nutty Editor -- version"));
    }

    #[test]
    fn test_banner_narrower_than_text() {
        let doc = Document::new();
        let vp = Viewport::new(3, 6);
        let lines = screen_text(&render(&doc, &[], &vp, Mode::ReadOnly, ""));
        assert_eq!(lines[1], "Nutty ");
    }

    #[test]
    fn test_banner_skipped_on_short_screen() {
        let doc = Document::new();
        let vp = Viewport::new(2, 20);
        let lines = screen_text(&render(&doc, &[], &vp, Mode::ReadOnly, ""));
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "~");
    }

    #[test]
    fn test_command_prompt_and_cursor() {
        let doc = Document::from_text(b"abc");
        let vp = Viewport::new(2, 20);
        let bytes = render(&doc, &[], &vp, Mode::Command, "ignored");
        let lines = screen_text(&bytes);
        assert_eq!(lines[3], ":");
        // Cursor parked after the prompt: row 4, col 2 (1-based)
        assert!(contains(&bytes, b"\x1b[4;2H\x1b[?25h"));
    }

    #[test]
    fn test_cursor_placed_last() {
        let config = EditorConfig::default();
        let doc = Document::from_text(b"abc");
        let vp = Viewport::new(2, 20);
        let frame = Frame {
            rows: doc.rows(),
            spans: &[],
            viewport: &vp,
            cursor: RenderedCursor { row: 0, col: 2 },
            status: status(Mode::Edit),
            message: "",
            blank: false,
        };
        let bytes = FrameRenderer::new(&config).render(&frame).unwrap();
        assert!(bytes.ends_with(b"\x1b[1;3H\x1b[?25h"));
        assert!(bytes.starts_with(b"\x1b[?25l"));
    }

    #[test]
    fn test_zero_width_viewport() {
        let doc = Document::from_text(b"abc");
        let vp = Viewport::new(2, 0);
        let bytes = render(&doc, &[], &vp, Mode::ReadOnly, "message");
        let lines = screen_text(&bytes);
        assert_eq!(lines[0], "");
        assert_eq!(lines[3], "");
    }
}
