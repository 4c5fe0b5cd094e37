use std::io::{self, stdin, stdout, BufRead, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use tracing::debug;

use super::{probe_size, Key, Terminal};

/// Terminal backed by crossterm on stdout
pub struct CrosstermTerminal {
    out: Stdout,
    raw: bool,
    restored: bool,
}

impl CrosstermTerminal {
    /// Enter raw mode and the alternate screen
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        out.execute(EnterAlternateScreen)?;
        debug!("terminal initialised");
        Ok(Self {
            out,
            raw: true,
            restored: false,
        })
    }

    /// Leave the alternate screen and cooked mode. Safe to call twice.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.raw = false;
        terminal::disable_raw_mode()?;
        self.out.execute(Show)?;
        self.out.execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Terminal for CrosstermTerminal {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if !self.raw {
            terminal::enable_raw_mode()?;
            self.raw = true;
        }
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        probe_size()
    }

    fn read_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(decode_key(key)),
            _ => Ok(None),
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        stdin().lock().read_line(&mut line)?;
        Ok(line)
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.out.write_all(frame)?;
        self.out.flush()
    }
}

/// Best-effort terminal restore for use outside the owning value (panic hook)
pub fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let mut out = stdout();
    let _ = out.execute(Show);
    let _ = out.execute(LeaveAlternateScreen);
}

/// Map a crossterm key event to an editor key. Non-ASCII characters,
/// Ctrl+letter chords and key releases yield `None`.
pub fn decode_key(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    let key = match event.code {
        KeyCode::Left if ctrl => Key::WordLeft,
        KeyCode::Right if ctrl => Key::WordRight,
        KeyCode::Up if ctrl => Key::ScrollUp,
        KeyCode::Down if ctrl => Key::ScrollDown,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab => Key::Char(b'\t'),
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) if c.is_ascii() => Key::Char(c as u8),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(decode_key(press(KeyCode::Char('a'), KeyModifiers::NONE)), Some(Key::Char(b'a')));
        assert_eq!(decode_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)), Some(Key::Char(b'A')));
        assert_eq!(decode_key(press(KeyCode::Tab, KeyModifiers::NONE)), Some(Key::Char(b'\t')));
        assert_eq!(decode_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Key::Enter));
        assert_eq!(decode_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Esc));
        assert_eq!(decode_key(press(KeyCode::PageDown, KeyModifiers::NONE)), Some(Key::PageDown));
    }

    #[test]
    fn test_ctrl_arrows() {
        assert_eq!(decode_key(press(KeyCode::Left, KeyModifiers::CONTROL)), Some(Key::WordLeft));
        assert_eq!(decode_key(press(KeyCode::Right, KeyModifiers::CONTROL)), Some(Key::WordRight));
        assert_eq!(decode_key(press(KeyCode::Up, KeyModifiers::CONTROL)), Some(Key::ScrollUp));
        assert_eq!(decode_key(press(KeyCode::Down, KeyModifiers::CONTROL)), Some(Key::ScrollDown));
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(decode_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), None);
        assert_eq!(decode_key(press(KeyCode::Char('é'), KeyModifiers::NONE)), None);
        assert_eq!(decode_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);

        let release = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(decode_key(release), None);
    }
}
