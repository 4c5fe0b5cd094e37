use super::{navigate, EditorContext, InputResult, ModeEvent, ModeHandler};
use crate::buffer::{DeleteDirection, Position};
use crate::terminal::Key;

/// Edit mode handler - text editing
pub struct EditMode;

impl EditMode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EditMode {
    fn default() -> Self {
        Self::new()
    }
}

/// Move the cursor to the result of an edit. Ignored edits leave it alone.
fn apply_edit(ctx: &mut EditorContext, before: Position, after: Option<Position>) -> InputResult {
    match after {
        Some(pos) => {
            ctx.cursor.set_position(pos);
            InputResult::Edited {
                row: before.row.min(pos.row),
            }
        }
        None => InputResult::Handled,
    }
}

impl ModeHandler for EditMode {
    fn handle_key(&mut self, key: Key, mut ctx: EditorContext) -> InputResult {
        let at = ctx.cursor.position();
        match key {
            Key::Esc => InputResult::ModeSwitch(ModeEvent::Escape),

            // Character insertion, including tabs and ':'
            Key::Char(byte) => {
                let after = ctx.document.insert_char(at.row, at.col, byte);
                apply_edit(&mut ctx, at, after)
            }

            Key::Enter => {
                let after = ctx.document.split_row(at.row, at.col);
                apply_edit(&mut ctx, at, after)
            }

            Key::Backspace => {
                let after = ctx.document.delete_char(at.row, at.col, DeleteDirection::Backward);
                apply_edit(&mut ctx, at, after)
            }

            Key::Delete => {
                let after = ctx.document.delete_char(at.row, at.col, DeleteDirection::Forward);
                apply_edit(&mut ctx, at, after)
            }

            key => navigate(key, &mut ctx).unwrap_or(InputResult::NotHandled),
        }
    }
}
