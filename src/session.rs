use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::buffer::{Cursor, Document};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::highlight::{select_grammar, Grammar, HighlightSpan, Highlighter};
use crate::mode::{Command, EditMode, EditorContext, InputResult, Mode, ModeEvent, ModeHandler, ReadOnlyMode};
use crate::terminal::Key;
use crate::ui::{Frame, FrameRenderer, RenderedCursor, StatusInfo, Viewport};

const REFUSED_QUIT: &str = "No write since last change (use :q! to override)";

/// One open file and all the editor state around it.
///
/// The session owns the document. Mode handlers borrow it for the duration
/// of a single key, and rendering only reads it.
pub struct EditorSession {
    config: EditorConfig,
    document: Document,
    cursor: Cursor,
    viewport: Viewport,
    rendered: RenderedCursor,
    grammar: Option<Grammar>,
    highlighter: Highlighter,
    mode: Mode,
    read_only: ReadOnlyMode,
    edit: EditMode,
    file_name: String,
    status_message: String,
}

impl EditorSession {
    /// Open `path` for a terminal of `size` (rows, cols). A missing file
    /// starts as a new empty document; other read errors are shown on the
    /// status line.
    pub fn open(path: impl AsRef<Path>, config: EditorConfig, size: (u16, u16)) -> Self {
        let path = path.as_ref();
        let (document, message) = match Document::open(path) {
            Ok(doc) => (doc, String::new()),
            Err(EditorError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "new file");
                (Document::create(path), "New file".to_string())
            }
            Err(e) => {
                warn!(error = %e, "open failed");
                (Document::create(path), e.to_string())
            }
        };

        let mut session = Self::with_document(document, path.display().to_string(), config, size);
        session.grammar = select_grammar(path);
        session.status_message = message;
        session
    }

    /// Session over in-memory text. `name` picks the grammar as a file name would.
    pub fn from_text(name: &str, text: &[u8], config: EditorConfig, size: (u16, u16)) -> Self {
        let mut session = Self::with_document(Document::from_text(text), name.to_string(), config, size);
        session.grammar = select_grammar(Path::new(name));
        session
    }

    fn with_document(document: Document, file_name: String, config: EditorConfig, size: (u16, u16)) -> Self {
        let viewport = Viewport::for_terminal(size.0, size.1, config.footer_rows);
        Self {
            config,
            document,
            cursor: Cursor::new(),
            viewport,
            rendered: RenderedCursor::default(),
            grammar: None,
            highlighter: Highlighter::new(),
            mode: Mode::default(),
            read_only: ReadOnlyMode::new(),
            edit: EditMode::new(),
            file_name,
            status_message: String::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Cursor cell from the last rendered frame
    pub fn rendered_cursor(&self) -> RenderedCursor {
        self.rendered
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_ref()
    }

    pub fn spans(&self) -> &[HighlightSpan] {
        self.highlighter.spans()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn is_running(&self) -> bool {
        self.mode != Mode::Exit
    }

    /// Apply a new terminal size (rows, cols)
    pub fn resize(&mut self, rows: u16, cols: u16) {
        let text_rows = (rows as usize).saturating_sub(self.config.footer_rows);
        self.viewport.resize(text_rows, cols as usize);
    }

    /// Process one key in read-only or edit mode
    pub fn handle_key(&mut self, key: Key) {
        self.status_message.clear();

        let ctx = EditorContext {
            document: &mut self.document,
            cursor: &mut self.cursor,
            viewport: &mut self.viewport,
            tab_stop: self.config.tab_stop,
        };
        let result = match self.mode {
            Mode::ReadOnly => self.read_only.handle_key(key, ctx),
            Mode::Edit => self.edit.handle_key(key, ctx),
            Mode::Command | Mode::Exit => InputResult::NotHandled,
        };

        match result {
            InputResult::Edited { row } => self.highlighter.invalidate_from(row),
            InputResult::ModeSwitch(event) => self.mode = self.mode.next(event),
            InputResult::Handled | InputResult::NotHandled => {}
        }
    }

    /// Run a line typed after `:` and leave command mode
    pub fn execute_command(&mut self, line: &str) {
        let quit = match Command::parse(line) {
            None => {
                debug!(line = line.trim(), "unknown command");
                false
            }
            Some(Command::Quit) if self.document.is_modified() => {
                self.status_message = REFUSED_QUIT.to_string();
                false
            }
            Some(Command::Quit) | Some(Command::ForceQuit) => true,
            Some(Command::Write) => {
                self.save();
                false
            }
            Some(Command::WriteQuit) => self.save(),
        };
        self.mode = self.mode.next(ModeEvent::CommandDone { quit });
    }

    fn save(&mut self) -> bool {
        match self.document.save() {
            Ok(bytes) => {
                self.status_message = format!("\"{}\" {} bytes written", self.file_name, bytes);
                true
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.status_message = e.to_string();
                false
            }
        }
    }

    /// Bring the viewport and highlighting up to date and draw the screen
    pub fn render_frame(&mut self) -> io::Result<Vec<u8>> {
        let tab_stop = self.config.tab_stop;
        self.cursor.clamp(&self.document);
        if let Some(row) = self.document.row(self.cursor.row) {
            self.rendered = self.viewport.fix_rendered_cursor(self.cursor.position(), row, tab_stop);
        }
        self.highlighter.ensure_scanned(
            self.document.rows(),
            self.grammar.as_ref(),
            self.viewport.last_visible_row(),
        );

        let frame = Frame {
            rows: self.document.rows(),
            spans: self.highlighter.spans(),
            viewport: &self.viewport,
            cursor: self.rendered,
            status: StatusInfo {
                file_name: &self.file_name,
                line_count: self.document.row_count(),
                modified: self.document.is_modified(),
                mode: self.mode,
                cursor: self.cursor.position(),
            },
            message: &self.status_message,
            blank: self.document.is_blank(),
        };
        FrameRenderer::new(&self.config).render(&frame)
    }
}
