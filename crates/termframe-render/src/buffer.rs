#![forbid(unsafe_code)]

//! Screen buffer: a fixed-dimension grid of [`Cell`]s.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`.
//! 2. Width and height never change after construction.
//! 3. Every cell reachable through [`Screen::get`]/[`Screen::set`] is in
//!    `[0, width) x [0, height)`; out-of-range coordinates are a
//!    [`BufferError::OutOfBounds`], never a panic.

use std::fmt;

use crate::cell::Cell;

/// A write or read addressed a cell outside the buffer's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferError {
    pub x: i64,
    pub y: i64,
    pub width: u16,
    pub height: u16,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coordinates ({}, {}) out of bounds for a {}x{} buffer",
            self.x, self.y, self.width, self.height
        )
    }
}

impl std::error::Error for BufferError {}

/// A fixed-size grid of [`Cell`]s representing one terminal frame.
#[derive(Debug, Clone)]
pub struct Screen {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    /// The real terminal `(fg, bg)` mode this frame leaves the terminal in,
    /// once compiled — persisted state mirroring `_prev_modes` in the
    /// original source, not something re-derived from grid content (the
    /// bottom-right cell may never have been touched even though earlier
    /// cells in the frame changed the running mode).
    running_modes: (Option<String>, Option<String>),
}

impl Screen {
    /// Create a new screen, every cell defaulted to `(' ', None, None, -1)`.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: (0..size).map(|_| Cell::default()).collect(),
            running_modes: (None, None),
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether `(x, y)` addresses a cell inside this buffer's dimensions.
    #[must_use]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    fn index(&self, x: i64, y: i64) -> Result<usize, BufferError> {
        if self.in_bounds(x, y) {
            Ok(y as usize * self.width as usize + x as usize)
        } else {
            Err(BufferError {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read the cell at `(x, y)`.
    ///
    /// # Errors
    /// Returns [`BufferError`] if `(x, y)` is outside the grid.
    pub fn get(&self, x: i64, y: i64) -> Result<&Cell, BufferError> {
        let i = self.index(x, y)?;
        Ok(&self.cells[i])
    }

    /// Write into the cell at `(x, y)`, merging with its current contents.
    ///
    /// `z_index` is the priority of this write. If it is greater than or
    /// equal to the existing cell's `z_index`, every supplied field
    /// (`ch`/`fg`/`bg`) overwrites unconditionally. If it is lower, a
    /// supplied field only overwrites when the existing field is unset — a
    /// space for `ch`, `None` for `fg`/`bg` — so a higher-priority write
    /// already in place is never clobbered by a later, lower-priority one.
    /// After the merge, an unset `ch` becomes a space.
    ///
    /// # Errors
    /// Returns [`BufferError`] if `(x, y)` is outside the grid.
    pub fn set(
        &mut self,
        x: i64,
        y: i64,
        ch: Option<char>,
        fg: Option<String>,
        bg: Option<String>,
        z_index: i32,
    ) -> Result<(), BufferError> {
        let i = self.index(x, y)?;
        let cell = &mut self.cells[i];

        if z_index >= cell.z_index {
            if let Some(ch) = ch {
                cell.ch = ch;
            }
            if fg.is_some() {
                cell.fg = fg;
            }
            if bg.is_some() {
                cell.bg = bg;
            }
            cell.z_index = z_index;
        } else {
            if let Some(ch) = ch {
                if Cell::is_blank_char(cell.ch) {
                    cell.ch = ch;
                }
            }
            if fg.is_some() && cell.fg.is_none() {
                cell.fg = fg;
            }
            if bg.is_some() && cell.bg.is_none() {
                cell.bg = bg;
            }
        }

        Ok(())
    }

    /// Produce the minimized ANSI transform from `previous` (or a full
    /// frame if `previous` is `None` or has different dimensions). See
    /// [`crate::diff`] for the algorithm.
    ///
    /// Takes `&mut self` because compiling records the real terminal
    /// `(fg, bg)` mode this frame leaves the terminal in, for the next
    /// frame's differential compile to inherit (see [`Screen::running_modes`]).
    #[must_use]
    pub fn compile(&mut self, previous: Option<&Screen>) -> String {
        crate::diff::compile(self, previous)
    }

    /// Produce a full, non-differential frame unconditionally.
    #[must_use]
    pub fn compile_full(&mut self) -> String {
        crate::diff::compile_full(self)
    }

    /// The `(fg, bg)` mode the real terminal is left in after this frame
    /// was last compiled, or `(None, None)` if it has not been compiled
    /// yet. A differential compile against this screen as `previous`
    /// inherits this as its starting running mode, rather than re-deriving
    /// it from whatever cell happens to be read last.
    pub(crate) fn running_modes(&self) -> (Option<String>, Option<String>) {
        self.running_modes.clone()
    }

    pub(crate) fn set_running_modes(&mut self, modes: (Option<String>, Option<String>)) {
        self.running_modes = modes;
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_out_of_bounds_is_an_error() {
        let s = Screen::new(3, 3);
        assert!(s.get(3, 0).is_err());
        assert!(s.get(0, 3).is_err());
        assert!(s.get(-1, 0).is_err());
    }

    #[test]
    fn set_out_of_bounds_is_an_error() {
        let mut s = Screen::new(3, 3);
        assert!(s.set(3, 0, Some('x'), None, None, 0).is_err());
    }

    #[test]
    fn higher_z_overwrites_unconditionally() {
        let mut s = Screen::new(1, 1);
        s.set(0, 0, Some('a'), Some("fgA".into()), None, 0).unwrap();
        s.set(0, 0, Some('b'), None, None, 5).unwrap();
        let cell = s.get(0, 0).unwrap();
        assert_eq!(cell.ch, 'b');
        // fg untouched since the higher-priority write didn't supply one.
        assert_eq!(cell.fg.as_deref(), Some("fgA"));
        assert_eq!(cell.z_index, 5);
    }

    #[test]
    fn lower_z_only_fills_unset_fields() {
        let mut s = Screen::new(1, 1);
        s.set(0, 0, Some('a'), Some("fgA".into()), None, 10).unwrap();
        // Lower-priority write tries to stomp ch and fg, and set bg.
        s.set(0, 0, Some('b'), Some("fgB".into()), Some("bgB".into()), 0)
            .unwrap();
        let cell = s.get(0, 0).unwrap();
        assert_eq!(cell.ch, 'a', "existing non-blank char must survive");
        assert_eq!(cell.fg.as_deref(), Some("fgA"), "existing fg must survive");
        assert_eq!(cell.bg.as_deref(), Some("bgB"), "unset bg may be filled in");
    }

    #[test]
    fn lower_z_fills_blank_char() {
        let mut s = Screen::new(1, 1);
        // z_index 10 write only sets color, leaving ch blank.
        s.set(0, 0, None, Some("fgA".into()), None, 10).unwrap();
        s.set(0, 0, Some('x'), None, None, 0).unwrap();
        assert_eq!(s.get(0, 0).unwrap().ch, 'x');
    }

    #[test]
    fn unset_char_becomes_space() {
        let mut s = Screen::new(1, 1);
        s.set(0, 0, None, Some("fgA".into()), None, 0).unwrap();
        assert_eq!(s.get(0, 0).unwrap().ch, ' ');
    }
}
