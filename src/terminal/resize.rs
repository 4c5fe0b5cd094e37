use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

/// Background thread that polls the terminal size and requests a redraw
/// when it changes. It never touches editor state.
pub struct ResizeWatcher {
    running: Arc<AtomicBool>,
    redraw: Arc<AtomicBool>,
    size_rx: Receiver<(u16, u16)>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ResizeWatcher {
    pub fn spawn<F>(initial: (u16, u16), interval: Duration, probe: F) -> Self
    where
        F: Fn() -> io::Result<(u16, u16)> + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let redraw = Arc::new(AtomicBool::new(false));
        let (size_tx, size_rx) = unbounded();

        let handle = {
            let running = Arc::clone(&running);
            let redraw = Arc::clone(&redraw);
            thread::spawn(move || Self::watch(initial, interval, probe, running, redraw, size_tx))
        };

        Self {
            running,
            redraw,
            size_rx,
            handle: Some(handle),
        }
    }

    fn watch<F>(
        mut last: (u16, u16),
        interval: Duration,
        probe: F,
        running: Arc<AtomicBool>,
        redraw: Arc<AtomicBool>,
        size_tx: Sender<(u16, u16)>,
    ) where
        F: Fn() -> io::Result<(u16, u16)>,
    {
        while running.load(Ordering::Acquire) {
            thread::sleep(interval);
            match probe() {
                Ok(size) if size != last => {
                    debug!(rows = size.0, cols = size.1, "terminal resized");
                    last = size;
                    if size_tx.send(size).is_err() {
                        break;
                    }
                    redraw.store(true, Ordering::Release);
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "terminal size probe failed"),
            }
        }
    }

    /// Latest size if a resize happened since the last call
    pub fn take_resize(&self) -> Option<(u16, u16)> {
        if !self.redraw.swap(false, Ordering::AcqRel) {
            return None;
        }
        self.size_rx.try_iter().last()
    }

    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
