#![forbid(unsafe_code)]

//! Self-pipe signal bridge (spec §4.5, §5, §9 "signal safety").
//!
//! Signal handlers must never perform I/O directly. This bridge runs
//! `signal_hook`'s dedicated signal-handling thread, which does nothing but
//! translate `SIGWINCH`/`SIGCONT`/`SIGINT`/`SIGTERM` deliveries into
//! `ShellSignal` values pushed onto an `mpsc` channel — the idiomatic Rust
//! analogue of "enqueue a marker and write one byte to a self-pipe". The
//! main loop drains the receiving end opportunistically between input
//! polls; no signal handler here ever touches stdout or the document tree.

use std::io;
use std::sync::mpsc::{self, Receiver};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGCONT, SIGINT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// A signal the shell's main loop should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellSignal {
    /// `SIGWINCH`: the terminal was resized.
    Resize,
    /// `SIGCONT`: the process was resumed after suspension.
    Continue,
    /// `SIGINT`/`SIGTERM`: the process should terminate.
    Terminate,
}

/// Owns the background signal-handling thread and the receiving end of its
/// channel. Dropping it stops the thread.
pub struct SignalBridge {
    receiver: Receiver<ShellSignal>,
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SignalBridge {
    /// Install handlers for `SIGWINCH`, `SIGCONT`, `SIGINT`, and `SIGTERM`.
    ///
    /// # Errors
    /// Returns an error if the underlying signal registration fails.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        let (tx, receiver) = mpsc::channel();
        let mut signals =
            Signals::new([SIGWINCH, SIGCONT, SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                let mapped = match signal {
                    SIGWINCH => Some(ShellSignal::Resize),
                    SIGCONT => Some(ShellSignal::Continue),
                    SIGINT | SIGTERM => Some(ShellSignal::Terminate),
                    _ => None,
                };
                if let Some(mapped) = mapped {
                    // The channel is the enqueue step; a dropped receiver
                    // (shell shutting down) is not an error worth reporting.
                    let _ = tx.send(mapped);
                }
            }
        });
        Ok(Self {
            receiver,
            handle,
            thread: Some(thread),
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        let (_tx, receiver) = mpsc::channel();
        Ok(Self { receiver })
    }

    /// Drain every signal queued since the last call, in delivery order.
    pub fn drain(&self) -> Vec<ShellSignal> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(unix)]
impl Drop for SignalBridge {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
