/// One line of the document, without its trailing newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    text: Vec<u8>,
}

impl Row {
    pub fn new(text: Vec<u8>) -> Self {
        Self { text }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn byte_at(&self, col: usize) -> Option<u8> {
        self.text.get(col).copied()
    }

    pub(crate) fn insert(&mut self, col: usize, byte: u8) {
        self.text.insert(col, byte);
    }

    pub(crate) fn remove(&mut self, col: usize) -> u8 {
        self.text.remove(col)
    }

    pub(crate) fn split_off(&mut self, col: usize) -> Row {
        Row::new(self.text.split_off(col))
    }

    pub(crate) fn append(&mut self, mut other: Row) {
        self.text.append(&mut other.text);
    }

    /// Screen column of the byte at `col` once tabs are expanded.
    /// A tab at rendered column `i` advances to the next multiple of `tab_stop`.
    pub fn rendered_col(&self, col: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        self.text
            .iter()
            .take(col)
            .fold(0, |rcol, &b| if b == b'\t' { rcol + tab_stop - rcol % tab_stop } else { rcol + 1 })
    }

    /// Width of the whole row once tabs are expanded
    pub fn rendered_len(&self, tab_stop: usize) -> usize {
        self.rendered_col(self.text.len(), tab_stop)
    }

    /// File column whose rendered position is closest to `target`.
    /// Ties go to the leftmost column; the result never exceeds the row length.
    pub fn col_for_rendered(&self, target: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut best = (0, target);
        let mut rcol = 0;

        for (col, &b) in self.text.iter().enumerate() {
            rcol = if b == b'\t' { rcol + tab_stop - rcol % tab_stop } else { rcol + 1 };
            let distance = rcol.abs_diff(target);
            if distance < best.1 {
                best = (col + 1, distance);
            }
            if rcol >= target {
                break;
            }
        }
        best.0
    }

    /// Tab-expanded copy of the row for display. Other control bytes become `?`.
    pub fn render(&self, tab_stop: usize) -> Vec<u8> {
        let tab_stop = tab_stop.max(1);
        let mut out = Vec::with_capacity(self.text.len());
        for &b in &self.text {
            match b {
                b'\t' => {
                    let pad = tab_stop - out.len() % tab_stop;
                    out.resize(out.len() + pad, b' ');
                }
                0x00..=0x1f | 0x7f => out.push(b'?'),
                _ => out.push(b),
            }
        }
        out
    }
}

impl From<&[u8]> for Row {
    fn from(text: &[u8]) -> Self {
        Self::new(text.to_vec())
    }
}

impl From<&str> for Row {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_expansion() {
        let row = Row::from("a\tb");
        assert_eq!(row.render(8), b"a       b");
        assert_eq!(row.rendered_col(2, 8), 8);
        assert_eq!(row.rendered_len(8), 9);
    }

    #[test]
    fn test_tab_width_depends_on_column() {
        for i in 0..20 {
            let mut text = vec![b'x'; i];
            text.push(b'\t');
            let row = Row::new(text);
            assert_eq!(row.render(8).len() - i, 8 - (i % 8), "tab at column {}", i);
        }
    }

    #[test]
    fn test_leading_tabs() {
        let row = Row::from("\t\tx");
        assert_eq!(row.rendered_col(1, 8), 8);
        assert_eq!(row.rendered_col(2, 8), 16);
        assert_eq!(row.render(4), b"        x");
    }

    #[test]
    fn test_col_for_rendered() {
        let row = Row::from("\tabc");
        // Inside the tab: snap to whichever edge is nearer
        assert_eq!(row.col_for_rendered(3, 8), 0);
        assert_eq!(row.col_for_rendered(5, 8), 1);
        assert_eq!(row.col_for_rendered(9, 8), 2);
        // Past the end clamps to the row length
        assert_eq!(row.col_for_rendered(40, 8), 4);
        assert_eq!(Row::default().col_for_rendered(7, 8), 0);
    }

    #[test]
    fn test_control_bytes_are_masked() {
        let row = Row::new(vec![b'a', 0x1b, b'[', b'2', b'J', b'\r']);
        assert_eq!(row.render(8), b"a?[2J?");
    }
}
