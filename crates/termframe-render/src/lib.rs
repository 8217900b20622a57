#![forbid(unsafe_code)]

//! Render kernel: ANSI code generation, the cell grid, and the
//! differential compiler that turns one [`buffer::Screen`] into the
//! minimal ANSI transform from another.

pub mod ansi;
pub mod buffer;
pub mod cell;
mod diff;

pub use buffer::{BufferError, Screen};
pub use cell::Cell;
