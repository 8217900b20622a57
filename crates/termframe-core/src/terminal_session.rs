#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! Owns raw-mode entry/exit, the alternate screen, and cursor visibility
//! for the duration of the program (spec §6 "TTY attributes"). Cleanup
//! runs from [`Drop`] so it fires on panic unwinding as well as on a
//! normal return, and is idempotent — dropping twice, or dropping after a
//! manual [`TerminalSession::restore`], does nothing the second time.
//!
//! # Escape sequences
//!
//! | Feature | Enable | Disable |
//! |---|---|---|
//! | Alternate screen | `CSI ?1049 h` | `CSI ?1049 l` |
//! | Cursor | `CSI ?25 l` | `CSI ?25 h` |
//!
//! Raw mode itself (clearing `ECHO`/`ICANON`, `VMIN=1`/`VTIME=0`) is
//! delegated to `crossterm::terminal::{enable_raw_mode, disable_raw_mode}`,
//! which implements exactly that termios configuration on Unix.

use std::io::{self, Write};

/// Up to this many retries on a failing stdout write during teardown
/// before giving up silently (spec §7: "I/O: stdout writes may fail during
/// terminal teardown; up to three retries, then swallow").
const TEARDOWN_WRITE_RETRIES: u32 = 3;

const ALTERNATE_ON: &str = "\x1b[?1049h";
const ALTERNATE_OFF: &str = "\x1b[?1049l";
const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";

/// A terminal session that owns raw mode, the alternate screen, and cursor
/// visibility, restoring all three on drop.
#[derive(Debug)]
pub struct TerminalSession {
    restored: bool,
}

impl TerminalSession {
    /// Enter raw mode, the alternate screen, and hide the cursor.
    ///
    /// # Errors
    /// Returns an error if raw mode cannot be enabled.
    pub fn new() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        best_effort_write(&format!("{ALTERNATE_ON}{CURSOR_HIDE}"));
        #[cfg(feature = "tracing")]
        tracing::info!("terminal session started: raw mode + alt screen");
        Ok(Self { restored: false })
    }

    /// Restore the terminal to its pre-session state. Safe to call more
    /// than once; only the first call has an effect.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        best_effort_write(&format!("{CURSOR_SHOW}{ALTERNATE_OFF}"));
        let _ = crossterm::terminal::disable_raw_mode();
        #[cfg(feature = "tracing")]
        tracing::info!("terminal session restored");
    }

    /// Force the next frame the shell renders to be a full, non-differential
    /// redraw — used after a `SIGCONT` per spec §4.5.
    #[must_use]
    pub fn resume_after_suspend() -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        best_effort_write(&format!("{ALTERNATE_ON}{CURSOR_HIDE}"));
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Write `s` to stdout, retrying a bounded number of times on failure and
/// then swallowing the error (spec §7). Shared by terminal teardown here
/// and by the shell's per-frame flush.
pub fn best_effort_write(s: &str) {
    let mut stdout = io::stdout();
    for _ in 0..TEARDOWN_WRITE_RETRIES {
        if stdout.write_all(s.as_bytes()).and_then(|()| stdout.flush()).is_ok() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_is_idempotent_without_a_live_session() {
        // Exercise the idempotence guard directly; entering raw mode isn't
        // safe under a non-interactive test harness.
        let mut fake = TerminalSession { restored: false };
        fake.restore();
        fake.restore();
        assert!(fake.restored);
    }
}
