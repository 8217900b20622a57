#![forbid(unsafe_code)]

//! Public facade: re-exports the document tree, the renderer, the screen
//! buffer and its ANSI codec, and (with the default `runtime` feature) the
//! event-loop shell, as a single entry point.
//!
//! ```no_run
//! use termframe::{Document, Node};
//!
//! let document = Document::new(80, 24);
//! document.set_body(Node::block()).unwrap();
//! ```

pub use termframe_core::geometry::Rect;
pub use termframe_core::input_parser;
pub use termframe_core::InputEvent;

pub use termframe_style::NamedColor;

pub use termframe_render::ansi;
pub use termframe_render::{BufferError, Cell, Screen};

pub use termframe_document::{Attributes, Document, ListenerHandle, Node, NodeError, NodeSnapshot, StyleColors};

pub use termframe_layout::{RenderOptions, Renderer};

#[cfg(feature = "runtime")]
pub use termframe_runtime::Shell;
