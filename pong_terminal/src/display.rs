//! Drawing on a separate thread.
//!
//! The loop driver only publishes snapshots; a display thread picks up the
//! newest one and draws it, so a slow terminal write never delays a tick.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use game_core::driver::Renderer;
use game_core::{Snapshot, SnapshotBuffer};
use tracing::debug;

pub struct DisplayThread {
    buffer: SnapshotBuffer,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<io::Result<()>>>,
}

impl DisplayThread {
    /// Start drawing with `renderer`, checking for new snapshots every `idle`
    pub fn spawn<R>(mut renderer: R, idle: Duration) -> Self
    where
        R: Renderer + Send + 'static,
    {
        let buffer = SnapshotBuffer::new();
        let stop = Arc::new(AtomicBool::new(false));

        let reader = buffer.clone();
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut seen = 0;
            while !stop_flag.load(Ordering::Acquire) {
                match reader.newer_than(seen) {
                    Some((generation, snapshot)) => {
                        renderer.render(&snapshot)?;
                        seen = generation;
                    }
                    None => thread::sleep(idle),
                }
            }
            debug!(frames = seen, "display thread stopped");
            Ok(())
        });

        Self {
            buffer,
            stop,
            handle: Some(handle),
        }
    }

    /// Stop drawing and report how the display thread ended
    pub fn join(mut self) -> io::Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.stop.store(true, Ordering::Release);
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                Err(io::Error::new(
                    io::ErrorKind::Other,
                    "display thread panicked",
                ))
            }),
            None => Ok(()),
        }
    }
}

impl Renderer for DisplayThread {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        // A failed draw ends the thread; surface that to the driver
        if self.handle.as_ref().map_or(true, JoinHandle::is_finished) {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "display thread stopped",
            ));
        }
        self.buffer.publish(*snapshot);
        Ok(())
    }
}

impl Drop for DisplayThread {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
