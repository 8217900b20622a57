#![forbid(unsafe_code)]

//! ANSI/VT escape sequence generation.
//!
//! Pure functions producing ANSI control strings. No state, no failure
//! modes — every function here is a total function from its arguments to a
//! `String`.
//!
//! # Sequence reference
//!
//! | Function | Sequence | Description |
//! |---|---|---|
//! | [`fg`] | `CSI 30-37/90-97 m` | Set foreground color |
//! | [`bg`] | `CSI 40-47/100-107 m` | Set background color |
//! | [`reset`] | `CSI 0 m` | Reset all SGR attributes |
//! | [`fg_default`] | `CSI 39 m` | Reset foreground only |
//! | [`bg_default`] | `CSI 49 m` | Reset background only |
//! | [`move_to`] | `CSI y;x H` | Cursor position (1-indexed) |
//! | [`cursor_hide`] | `CSI ?25 l` | Hide cursor |
//! | [`cursor_show`] | `CSI ?25 h` | Show cursor |
//! | [`alternate_on`] | `CSI ?1049 h` | Enter alternate screen |
//! | [`alternate_off`] | `CSI ?1049 l` | Leave alternate screen |
//! | [`clear`] | `CSI 2 J` | Erase display |

use termframe_style::NamedColor;

const ESC: &str = "\x1b[";

/// SGR sequence selecting `color` as the foreground. `bright` selects the
/// 90-97 range instead of 30-37 (ignored for [`NamedColor::Default`], which
/// always emits `CSI 39 m`).
#[must_use]
pub fn fg(color: NamedColor, bright: bool) -> String {
    if matches!(color, NamedColor::Default) {
        return fg_default();
    }
    let base = if bright { 90 } else { 30 };
    format!("{ESC}{}m", base + color.sgr_index())
}

/// SGR sequence selecting `color` as the background. `bright` selects the
/// 100-107 range instead of 40-47.
#[must_use]
pub fn bg(color: NamedColor, bright: bool) -> String {
    if matches!(color, NamedColor::Default) {
        return bg_default();
    }
    let base = if bright { 100 } else { 40 };
    format!("{ESC}{}m", base + color.sgr_index())
}

/// `CSI 0 m` — reset every SGR attribute.
#[must_use]
pub fn reset() -> String {
    format!("{ESC}0m")
}

/// `CSI 39 m` — reset foreground to the terminal default.
#[must_use]
pub fn fg_default() -> String {
    format!("{ESC}39m")
}

/// `CSI 49 m` — reset background to the terminal default.
#[must_use]
pub fn bg_default() -> String {
    format!("{ESC}49m")
}

/// `CSI y;x H` — move the cursor to 1-based row `y`, column `x`.
#[must_use]
pub fn move_to(y: u32, x: u32) -> String {
    format!("{ESC}{y};{x}H")
}

/// `CSI ?25 l` — hide the cursor.
#[must_use]
pub fn cursor_hide() -> String {
    format!("{ESC}?25l")
}

/// `CSI ?25 h` — show the cursor.
#[must_use]
pub fn cursor_show() -> String {
    format!("{ESC}?25h")
}

/// `CSI ?1049 h` — switch to the alternate screen buffer.
#[must_use]
pub fn alternate_on() -> String {
    format!("{ESC}?1049h")
}

/// `CSI ?1049 l` — leave the alternate screen buffer.
#[must_use]
pub fn alternate_off() -> String {
    format!("{ESC}?1049l")
}

/// `CSI 2 J` — erase the entire display.
#[must_use]
pub fn clear() -> String {
    format!("{ESC}2J")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fg_default_is_csi_39() {
        assert_eq!(fg(NamedColor::Default, false), "\x1b[39m");
        assert_eq!(fg(NamedColor::Default, true), "\x1b[39m");
    }

    #[test]
    fn fg_red_dim_and_bright() {
        assert_eq!(fg(NamedColor::Red, false), "\x1b[31m");
        assert_eq!(fg(NamedColor::Red, true), "\x1b[91m");
    }

    #[test]
    fn bg_cyan_dim_and_bright() {
        assert_eq!(bg(NamedColor::Cyan, false), "\x1b[46m");
        assert_eq!(bg(NamedColor::Cyan, true), "\x1b[106m");
    }

    #[test]
    fn move_to_is_one_based() {
        assert_eq!(move_to(1, 1), "\x1b[1;1H");
        assert_eq!(move_to(5, 10), "\x1b[5;10H");
    }

    #[test]
    fn reset_and_defaults() {
        assert_eq!(reset(), "\x1b[0m");
        assert_eq!(fg_default(), "\x1b[39m");
        assert_eq!(bg_default(), "\x1b[49m");
    }
}
