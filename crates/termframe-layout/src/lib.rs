#![forbid(unsafe_code)]

//! The renderer: a stateful walker that turns a document tree into a
//! screen buffer, then a minimized ANSI delta (spec §4.4).

mod renderer;

pub use renderer::{RenderOptions, Renderer};
