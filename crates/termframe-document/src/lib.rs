#![forbid(unsafe_code)]

//! Retained-mode document tree.
//!
//! A [`Document`] owns a single `body` [`Node`]: a tree of tagged variants
//! (`Block`, `Text`, `Newline`, `Tab`, `Style`, `StyleOverride`) with a
//! strict single-parent invariant, attach/detach with batched update-hook
//! notification, and a separate input-event listener list. The renderer
//! (`termframe-layout`) walks the tree read-only via [`Node::snapshot`] and
//! [`Node::children`]; nothing here knows how to lay a node out.

mod document;
mod error;
mod node;

pub use document::{Document, ListenerHandle};
pub use error::NodeError;
pub use node::{Attributes, Node, NodeSnapshot, StyleColors};
