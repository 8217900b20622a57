#![forbid(unsafe_code)]

//! Canonical input event type.
//!
//! This is the event vocabulary the core consumes from the byte-stream
//! parser (an external collaborator — see [`crate::input_parser`] for the
//! thin, spec-literal decoder bundled here for end-to-end testability).
//! `Document`'s listeners (spec §4.3) and the renderer-driving shell (spec
//! §4.5) both operate on this type.

/// One semantic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable character was typed.
    Draw(char),
    /// Linefeed (`\n` or `\r`).
    Linefeed,
    /// Horizontal tab.
    Tab,
    /// Backspace, bound to `0x7f`.
    Delete,
    /// Arrow key: up.
    CursorUp,
    /// Arrow key: down.
    CursorDown,
    /// Arrow key: left.
    CursorLeft,
    /// Arrow key: right.
    CursorRight,
    /// Cursor back (distinct from the left arrow on some terminals).
    CursorBack,
    /// Cursor forward (distinct from the right arrow on some terminals).
    CursorForward,
    /// A function key, 1-indexed. Index 15 forces a non-differential redraw.
    FunctionKey(u8),
    /// Terminal resize, new dimensions in cells.
    Resize { width: u16, height: u16 },
}

impl InputEvent {
    /// The function key index (spec §6) that forces a full, non-differential
    /// redraw regardless of what else changed.
    pub const FORCE_REDRAW_FUNCTION_KEY: u8 = 15;

    /// Whether this event, per spec §6, should force a full redraw.
    #[must_use]
    pub fn forces_full_redraw(&self) -> bool {
        matches!(self, Self::FunctionKey(Self::FORCE_REDRAW_FUNCTION_KEY))
    }
}
