#![forbid(unsafe_code)]

//! Core: canonical input events, the terminal session lifecycle guard, and
//! the signal self-pipe — the collaborators the document/renderer/shell
//! core depends on but does not itself implement.

pub mod event;
pub mod geometry;
pub mod input_parser;
pub mod logging;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;

#[cfg(unix)]
pub mod signal_bridge;

pub use event::InputEvent;

#[cfg(not(target_arch = "wasm32"))]
pub use terminal_session::best_effort_write;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
