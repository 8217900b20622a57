#![forbid(unsafe_code)]

//! The event/loop shell (spec §4.5).
//!
//! Owns the document, the renderer, and the terminal session; wires the
//! document's update hook so any mutation re-renders and flushes a frame.
//! Drives the outer loop: poll stdin, drain queued signals, redraw.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use termframe_core::signal_bridge::{ShellSignal, SignalBridge};
use termframe_core::terminal_session::TerminalSession;
use termframe_core::{best_effort_write, InputEvent};
use termframe_document::Document;
use termframe_layout::{RenderOptions, Renderer};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct RenderState {
    renderer: Renderer,
    rendering: bool,
    pending: bool,
}

/// Owns a document, a renderer, a terminal session, and a signal bridge,
/// and drives frames until an interrupt signal arrives.
pub struct Shell {
    document: Document,
    state: Rc<RefCell<RenderState>>,
    session: TerminalSession,
    signals: SignalBridge,
    terminate: Cell<bool>,
}

impl Shell {
    /// Enter raw mode and the alternate screen, install the signal bridge,
    /// and create an empty document sized `width x height`.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let session = TerminalSession::new()?;
        let signals = SignalBridge::install()?;
        let document = Document::new(width, height);
        let state = Rc::new(RefCell::new(RenderState {
            renderer: Renderer::new(),
            rendering: false,
            pending: false,
        }));

        let hook_document = document.clone();
        let hook_state = state.clone();
        document.set_update_hook(move |_origin| {
            render_and_flush(&hook_document, &hook_state, RenderOptions::default());
        });

        Ok(Self {
            document,
            state,
            session,
            signals,
            terminate: Cell::new(false),
        })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Force the next frame to be a full, non-differential redraw.
    pub fn force_redraw(&self) {
        render_and_flush(
            &self.document,
            &self.state,
            RenderOptions {
                differential: false,
                ..RenderOptions::default()
            },
        );
    }

    /// Drain every signal queued since the last call, reacting per spec
    /// §4.5: resize re-dimensions and force-redraws, continue restores the
    /// terminal and force-redraws, terminate breaks the outer loop.
    fn drain_signals(&self) {
        for signal in self.signals.drain() {
            match signal {
                ShellSignal::Resize => {
                    if let Ok((width, height)) = crossterm::terminal::size() {
                        self.document.set_dimensions(width, height);
                        self.document.event(InputEvent::Resize { width, height });
                        self.force_redraw();
                    }
                }
                ShellSignal::Continue => {
                    let _ = TerminalSession::resume_after_suspend();
                    self.force_redraw();
                }
                ShellSignal::Terminate => {
                    self.terminate.set(true);
                }
            }
        }
    }

    /// Run the outer loop until a terminate signal arrives. Consumes
    /// `self` so [`TerminalSession`]'s cleanup runs on every exit path,
    /// including an early `?` return or an unwinding panic.
    pub fn run(self) -> Result<()> {
        self.force_redraw();
        loop {
            self.drain_signals();
            if self.terminate.get() {
                break;
            }
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    self.dispatch_key(key);
                }
            }
        }
        Ok(())
    }

    fn dispatch_key(&self, key: KeyEvent) {
        let Some(input_event) = map_key_event(key) else {
            return;
        };
        if input_event.forces_full_redraw() {
            self.force_redraw();
        }
        self.document.event(input_event);
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.session.restore();
    }
}

/// Map a crossterm key event onto the canonical [`InputEvent`] vocabulary.
/// This is the interactive counterpart to
/// [`termframe_core::input_parser::decode`], which operates on raw bytes;
/// crossterm hands us already-decoded key events, so there is no byte
/// stream to re-parse here.
fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    match key.code {
        KeyCode::Char(c) => Some(InputEvent::Draw(c)),
        KeyCode::Enter => Some(InputEvent::Linefeed),
        KeyCode::Tab => Some(InputEvent::Tab),
        KeyCode::Backspace => Some(InputEvent::Delete),
        KeyCode::Up => Some(InputEvent::CursorUp),
        KeyCode::Down => Some(InputEvent::CursorDown),
        KeyCode::Left => Some(InputEvent::CursorLeft),
        KeyCode::Right => Some(InputEvent::CursorRight),
        KeyCode::F(n) => Some(InputEvent::FunctionKey(n)),
        _ => None,
    }
}

/// Render and flush a frame, coalescing any mutation that happens while a
/// render is already in flight (spec §4.5: the hook must be re-entrancy
/// safe, and the previous-buffer pointer must never swap mid-render).
/// [`Renderer::render`] already builds the full next frame before handing
/// it back, so a render that runs to completion here never observes a
/// torn buffer; this loop only decides whether to run a second one.
fn render_and_flush(document: &Document, state: &Rc<RefCell<RenderState>>, options: RenderOptions) {
    {
        let mut s = state.borrow_mut();
        if s.rendering {
            s.pending = true;
            return;
        }
        s.rendering = true;
    }
    loop {
        let output = state.borrow_mut().renderer.render(document, options);
        best_effort_write(&output);
        let mut s = state.borrow_mut();
        if s.pending {
            s.pending = false;
            continue;
        }
        s.rendering = false;
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_key_event_draws_printable_characters() {
        let key = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(map_key_event(key), Some(InputEvent::Draw('q')));
    }

    #[test]
    fn map_key_event_function_fifteen_forces_redraw() {
        let key = KeyEvent::from(KeyCode::F(15));
        let event = map_key_event(key).unwrap();
        assert!(event.forces_full_redraw());
    }

    #[test]
    fn map_key_event_ignores_unmapped_keys() {
        let key = KeyEvent::from(KeyCode::Insert);
        assert_eq!(map_key_event(key), None);
    }
}
