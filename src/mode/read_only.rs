use super::{navigate, EditorContext, InputResult, ModeEvent, ModeHandler};
use crate::terminal::Key;

/// Read-only mode handler - navigation and mode switches
pub struct ReadOnlyMode;

impl ReadOnlyMode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadOnlyMode {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeHandler for ReadOnlyMode {
    fn handle_key(&mut self, key: Key, mut ctx: EditorContext) -> InputResult {
        match key {
            Key::Char(b'i') => InputResult::ModeSwitch(ModeEvent::Insert),
            Key::Char(b':') => InputResult::ModeSwitch(ModeEvent::Colon),
            key => navigate(key, &mut ctx).unwrap_or(InputResult::NotHandled),
        }
    }
}
