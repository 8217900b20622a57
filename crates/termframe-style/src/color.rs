#![forbid(unsafe_code)]

//! Named color vocabulary.
//!
//! The engine only speaks the eight classic ANSI colors plus a `Default`
//! sentinel that means "leave the terminal's own color in place". True
//! color and the 256-color palette are out of scope for this core; widgets
//! that want richer color live above this layer.

/// One of the nine named colors the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Default,
}

impl NamedColor {
    /// Base SGR parameter for this color in the 30-37/40-47 foreground/background
    /// tables, or 9 for `Default` (which selects 39/49, the "reset to terminal
    /// default" codes).
    #[must_use]
    pub const fn sgr_index(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::Default => 9,
        }
    }

    /// All named colors other than `Default`, in SGR order. Used by tests
    /// that need to exercise every color.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Black,
            Self::Red,
            Self::Green,
            Self::Yellow,
            Self::Blue,
            Self::Magenta,
            Self::Cyan,
            Self::White,
        ]
    }
}

impl Default for NamedColor {
    fn default() -> Self {
        Self::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_maps_to_index_nine() {
        assert_eq!(NamedColor::Default.sgr_index(), 9);
    }

    #[test]
    fn named_colors_map_to_zero_through_seven() {
        for (i, c) in NamedColor::all().into_iter().enumerate() {
            assert_eq!(c.sgr_index(), i as u8);
        }
    }
}
