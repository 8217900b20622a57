#![forbid(unsafe_code)]

//! Named color vocabulary shared by the renderer and the document tree's
//! `Style`/`StyleOverride` nodes.

pub mod color;

pub use color::NamedColor;
