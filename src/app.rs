use std::time::Duration;

use tracing::info;

use crate::error::Result;
use crate::mode::Mode;
use crate::session::EditorSession;
use crate::terminal::{ResizeWatcher, Terminal};

/// How long to wait for a key before checking for a resize
const KEY_POLL: Duration = Duration::from_millis(50);

/// Drive `session` until it exits. One input is fully handled and the
/// screen redrawn before the next is read.
pub fn run<T: Terminal>(session: &mut EditorSession, terminal: &mut T, watcher: Option<&ResizeWatcher>) -> Result<()> {
    terminal.write_frame(&session.render_frame()?)?;

    while session.is_running() {
        let mut redraw = false;

        if session.mode() == Mode::Command {
            terminal.disable_raw_mode()?;
            let line = terminal.read_line()?;
            terminal.enable_raw_mode()?;
            session.execute_command(&line);
            redraw = true;
        } else if let Some(key) = terminal.read_key(KEY_POLL)? {
            session.handle_key(key);
            redraw = true;
        }

        if let Some((rows, cols)) = watcher.and_then(ResizeWatcher::take_resize) {
            session.resize(rows, cols);
            redraw = true;
        }

        if redraw && session.is_running() {
            terminal.write_frame(&session.render_frame()?)?;
        }
    }

    info!("editor exiting");
    Ok(())
}
