#![forbid(unsafe_code)]

//! Wires the document, renderer, and terminal session into the event loop
//! shell (spec §4.5): poll input, dispatch it to the document, drain
//! resize/suspend/terminate signals, and flush frames as the document's
//! update hook fires.

mod shell;

pub use shell::Shell;
pub use termframe_layout::RenderOptions;
