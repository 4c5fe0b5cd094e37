mod crossterm_term;
mod resize;

use std::io;
use std::time::Duration;

pub use crossterm_term::{decode_key, restore_terminal, CrosstermTerminal};
pub use resize::ResizeWatcher;

/// Logical key actions the editor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable byte, tab included
    Char(u8),
    Enter,
    Backspace,
    Delete,
    Esc,
    Left,
    Right,
    Up,
    Down,
    /// Ctrl+Left
    WordLeft,
    /// Ctrl+Right
    WordRight,
    /// Ctrl+Up
    ScrollUp,
    /// Ctrl+Down
    ScrollDown,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Capabilities the editor needs from the terminal
pub trait Terminal {
    fn enable_raw_mode(&mut self) -> io::Result<()>;
    fn disable_raw_mode(&mut self) -> io::Result<()>;
    /// Current size as `(rows, cols)`
    fn size(&self) -> io::Result<(u16, u16)>;
    /// Wait up to `timeout` for a key. `Ok(None)` means nothing usable arrived.
    fn read_key(&mut self, timeout: Duration) -> io::Result<Option<Key>>;
    /// Read one line of cooked input (command mode)
    fn read_line(&mut self) -> io::Result<String>;
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Query the controlling terminal size as `(rows, cols)`
pub fn probe_size() -> io::Result<(u16, u16)> {
    let (cols, rows) = crossterm::terminal::size()?;
    Ok((rows, cols))
}
