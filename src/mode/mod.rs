pub mod command;
pub mod edit;
pub mod read_only;

use tracing::debug;

use crate::buffer::{Cursor, Document};
use crate::terminal::Key;
use crate::ui::viewport::Viewport;

pub use command::Command;
pub use edit::EditMode;
pub use read_only::ReadOnlyMode;

/// Editor mode states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    ReadOnly,
    Edit,
    Command,
    Exit,
}

/// Inputs that drive mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// `i`
    Insert,
    /// `:`
    Colon,
    /// `Esc`
    Escape,
    /// A command line finished; `quit` says whether it asked to leave
    CommandDone { quit: bool },
}

impl Mode {
    /// The state reached from `self` on `event`. Events that don't apply
    /// leave the mode unchanged; `Exit` is final.
    pub fn next(self, event: ModeEvent) -> Mode {
        let next = match (self, event) {
            (Mode::ReadOnly, ModeEvent::Insert) => Mode::Edit,
            (Mode::ReadOnly | Mode::Edit, ModeEvent::Colon) => Mode::Command,
            (Mode::Edit, ModeEvent::Escape) => Mode::ReadOnly,
            (Mode::Command, ModeEvent::Escape) => Mode::ReadOnly,
            (Mode::Command, ModeEvent::CommandDone { quit: true }) => Mode::Exit,
            (Mode::Command, ModeEvent::CommandDone { quit: false }) => Mode::ReadOnly,
            (mode, _) => mode,
        };
        if next != self {
            debug!(from = ?self, to = ?next, ?event, "mode transition");
        }
        next
    }

    /// Label shown in the status line
    pub fn label(&self) -> &'static str {
        match self {
            Mode::ReadOnly => "READ ONLY",
            Mode::Edit => "EDIT",
            Mode::Command => "COMMAND",
            Mode::Exit => "EXIT",
        }
    }

    /// Whether the terminal should deliver single keystrokes in this mode.
    /// Command mode reads a whole line with echo.
    pub fn wants_raw_input(&self) -> bool {
        matches!(self, Mode::ReadOnly | Mode::Edit)
    }
}

/// Context passed to mode handlers
pub struct EditorContext<'a> {
    pub document: &'a mut Document,
    pub cursor: &'a mut Cursor,
    pub viewport: &'a mut Viewport,
    pub tab_stop: usize,
}

/// Result of handling an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Input was handled, continue
    Handled,
    /// The document changed at or below this row
    Edited { row: usize },
    /// Request mode change
    ModeSwitch(ModeEvent),
    /// Input not handled
    NotHandled,
}

/// Trait for mode-specific input handlers
pub trait ModeHandler {
    fn handle_key(&mut self, key: Key, ctx: EditorContext) -> InputResult;
}

/// Cursor and scroll keys shared by read-only and edit mode
pub(crate) fn navigate(key: Key, ctx: &mut EditorContext) -> Option<InputResult> {
    let doc = &*ctx.document;
    match key {
        Key::Left => ctx.cursor.move_left(doc),
        Key::Right => ctx.cursor.move_right(doc),
        Key::Up => ctx.cursor.move_up(doc, ctx.tab_stop),
        Key::Down => ctx.cursor.move_down(doc, ctx.tab_stop),
        Key::WordLeft => ctx.cursor.word_left(doc),
        Key::WordRight => ctx.cursor.word_right(doc),
        Key::Home => ctx.cursor.move_to_line_start(),
        Key::End => ctx.cursor.move_to_line_end(doc),
        Key::PageUp => ctx.viewport.page_up(doc, ctx.cursor, ctx.tab_stop),
        Key::PageDown => ctx.viewport.page_down(doc, ctx.cursor, ctx.tab_stop),
        Key::ScrollUp => ctx.viewport.scroll_up(doc, ctx.cursor, ctx.tab_stop),
        Key::ScrollDown => ctx.viewport.scroll_down(doc, ctx.cursor, ctx.tab_stop),
        _ => return None,
    }
    Some(InputResult::Handled)
}
