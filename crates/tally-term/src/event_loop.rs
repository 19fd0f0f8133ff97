// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the application's single heartbeat.
//
// Stdin bytes arrive from the background reader, get parsed into
// events, the application handles them and paints a frame, and the
// differential renderer writes only what changed. Everything is
// synchronous: each event is handled to completion before the next.
//
// # The hybrid blocking model
//
// The loop blocks on the stdin channel with a ~16.7ms timeout (60 Hz),
// which gives three behaviors at once:
//
//   1. Instant response — input bytes wake the loop immediately, no
//      polling latency between keypress and rendered frame.
//   2. Zero idle CPU — with no input, `recv_timeout` parks the thread.
//   3. A steady tick — the timeout fires 60 times a second for
//      time-based state (the button press flash), but a frame is only
//      rendered when something actually changed.
//
// # Resize
//
// SIGWINCH sets an atomic flag from the signal handler; the loop checks
// it each iteration, re-queries the size, resizes the frame buffer, and
// forces a full redraw.
//
// # Escape timeout
//
// A lone ESC byte could be the Escape key or the start of a CSI
// sequence. The parser holds it as pending; when a tick fires with no
// new bytes, the loop flushes pending bytes as literal key events. The
// user sees at most one tick of lag on Escape.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::buffer::FrameBuffer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::render::Renderer;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

/// Set by the SIGWINCH handler, consumed by the loop.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install the SIGWINCH (terminal resize) handler.
///
/// The handler only stores to an atomic, which is async-signal-safe.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App trait ───────────────────────────────────────────────────────────────

/// What the application wants the loop to do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Exit the event loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// Each iteration the loop calls, in order:
///
/// 1. [`on_event`](App::on_event) — once per parsed input event
/// 2. [`on_resize`](App::on_resize) — when the terminal size changed
/// 3. [`on_tick`](App::on_tick) — every iteration, input or not
/// 4. [`paint`](App::paint) — when the frame is dirty
///
/// Only [`paint`](App::paint) is required.
pub trait App {
    /// Handle a parsed input event. Return [`Action::Quit`] to exit.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// Terminal size changed. The frame buffer has already been resized.
    fn on_resize(&mut self, _size: Size) {}

    /// Called every loop iteration, even when no input arrived.
    ///
    /// For time-based state; return `true` if a repaint is needed.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the application into the frame buffer.
    ///
    /// Called only when something changed. The buffer has been cleared
    /// before this call — paint everything that should be visible.
    fn paint(&mut self, buf: &mut FrameBuffer);
}

// ─── LoopConfig ──────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Channel `recv_timeout` in microseconds. Sets both the tick rate
    /// and the escape-sequence timeout. Default: 16667μs (60 Hz).
    pub tick_interval_us: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_us: 16_667, // 60 Hz
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// Owns the terminal, input parser, and renderer. [`run`](Self::run)
/// enters TUI mode, drives the loop until the application returns
/// [`Action::Quit`], and restores the terminal on the way out.
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: Renderer,
    config: LoopConfig,
}

impl EventLoop {
    /// Create an event loop with default timing.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// Create an event loop with custom timing.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            renderer: Renderer::new(),
            config,
        })
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run until the application quits.
    ///
    /// Enters TUI mode, installs the resize handler, spawns the stdin
    /// reader, runs the loop, and restores the terminal — also when the
    /// loop errored.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal enter/leave or rendering fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let (mut reader, rx) = StdinReader::spawn();

        let result = self.run_inner(app, &rx);

        reader.stop();
        self.terminal.leave()?;

        result
    }

    /// The loop proper, split out so cleanup in `run` always executes.
    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        let mut dirty = true; // First frame always renders.
        let timeout = Duration::from_micros(self.config.tick_interval_us);

        loop {
            match rx.recv_timeout(timeout) {
                Ok(bytes) => {
                    let events = self.parser.advance(&bytes);
                    for event in &events {
                        if app.on_event(event) == Action::Quit {
                            return Ok(());
                        }
                    }
                    if !events.is_empty() {
                        dirty = true;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    // Resolve a pending lone ESC into a real Escape key.
                    if self.parser.has_pending() {
                        let events = self.parser.flush();
                        for event in &events {
                            if app.on_event(event) == Action::Quit {
                                return Ok(());
                            }
                        }
                        if !events.is_empty() {
                            dirty = true;
                        }
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    // Reader thread exited (EOF) — leave gracefully.
                    return Ok(());
                }
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
                dirty = true;
            }

            if app.on_tick() {
                dirty = true;
            }

            if dirty {
                frame.clear();
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;
                dirty = false;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
