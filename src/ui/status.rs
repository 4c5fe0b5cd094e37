use crate::buffer::Position;
use crate::mode::Mode;

/// What the status line reports
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo<'a> {
    pub file_name: &'a str,
    pub line_count: usize,
    pub modified: bool,
    pub mode: Mode,
    pub cursor: Position,
}

impl StatusInfo<'_> {
    /// Lay out the status line in exactly `cols` cells.
    ///
    /// The file summary goes on the left and the mode plus position on the
    /// right. When both don't fit the mode label goes first, then the left
    /// side is cut short.
    pub fn compose(&self, cols: usize) -> String {
        let left = format!(
            "{} - {} lines{}",
            self.file_name,
            self.line_count,
            if self.modified { " (modified)" } else { "" }
        );
        let position = format!(
            "row {}/{} col {}",
            self.cursor.row + 1,
            self.line_count,
            self.cursor.col + 1
        );
        let with_mode = format!("{}  {}", self.mode.label(), position);

        let left_width = left.chars().count();
        let right = if left_width + 1 + with_mode.len() <= cols {
            with_mode
        } else {
            position
        };
        let right = truncate(&right, cols);
        let room = cols - right.chars().count();

        // Keep a gap between the halves when there is any room at all
        let left = truncate(&left, room.saturating_sub(1));
        let pad = room - left.chars().count();

        let mut line = String::with_capacity(cols);
        line.push_str(&left);
        line.extend(std::iter::repeat(' ').take(pad));
        line.push_str(&right);
        line
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(modified: bool) -> StatusInfo<'static> {
        StatusInfo {
            file_name: "main.cpp",
            line_count: 42,
            modified,
            mode: Mode::Edit,
            cursor: Position::new(3, 7),
        }
    }

    #[test]
    fn test_wide_status_line() {
        let line = info(true).compose(60);
        assert_eq!(line.len(), 60);
        assert!(line.starts_with("main.cpp - 42 lines (modified)"));
        assert!(line.ends_with("EDIT  row 4/42 col 8"));
    }

    #[test]
    fn test_unmodified_has_no_flag() {
        let line = info(false).compose(60);
        assert!(line.starts_with("main.cpp - 42 lines "));
        assert!(!line.contains("modified"));
    }

    #[test]
    fn test_mode_label_dropped_when_crowded() {
        // left is 30 wide, position 14, mode+position 20
        let line = info(true).compose(48);
        assert_eq!(line.len(), 48);
        assert!(line.ends_with("row 4/42 col 8"));
        assert!(!line.contains("EDIT"));
        assert!(line.starts_with("main.cpp - 42 lines (modified)"));
    }

    #[test]
    fn test_left_side_truncated_last() {
        let line = info(true).compose(20);
        assert_eq!(line, "main. row 4/42 col 8");
    }

    #[test]
    fn test_tiny_widths() {
        assert_eq!(info(false).compose(0), "");
        assert_eq!(info(false).compose(5), "row 4");
        for cols in 0..80 {
            assert_eq!(info(true).compose(cols).chars().count(), cols);
        }
    }
}
