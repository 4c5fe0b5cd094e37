use std::path::PathBuf;
use std::time::Duration;

/// Compile-time editor settings.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Columns between tab stops
    pub tab_stop: usize,
    /// Terminal rows reserved below the text area (status line + message line)
    pub footer_rows: usize,
    /// Drawn in the first cell of rows past the end of the document
    pub empty_row_marker: &'static str,
    /// Shown at one third of the screen height when the document is blank
    pub welcome: String,
    /// How often the resize watcher probes the terminal size
    pub resize_poll_interval: Duration,
    pub log_file: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: 8,
            footer_rows: 2,
            empty_row_marker: "~",
            welcome: format!("Nutty Editor -- version {}", env!("CARGO_PKG_VERSION")),
            resize_poll_interval: Duration::from_millis(100),
            log_file: std::env::temp_dir().join("nutty.log"),
        }
    }
}
