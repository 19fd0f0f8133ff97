// SPDX-License-Identifier: MIT
//
// Differential renderer — diff the frame, emit only what changed.
//
// Redrawing the whole screen on every keypress would be wasteful and
// flickery; on a keypad, a press usually changes one button and one
// display row. Instead the renderer keeps the previous frame and walks
// the current one against it:
//
//   1. The application paints cells into a FrameBuffer.
//   2. render() diffs it against the stored previous frame. Unchanged
//      rows are skipped with a single slice comparison; within a
//      changed row, only differing cells are emitted.
//   3. A stateful writer tracks the terminal's cursor position, colors,
//      and attributes, and skips escape sequences that would not change
//      anything (sequential cells need no cursor move, a run of cells
//      in one style needs one SGR).
//   4. Everything accumulates in an in-memory byte buffer; flush()
//      writes the frame to the terminal in one syscall, wrapped in
//      synchronized output so partial updates never show.
//
// Steady state allocates nothing: the previous-frame buffer is reused
// via copy_from, and the output buffer keeps its capacity across frames.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── FrameOutput ────────────────────────────────────────────────────────────

/// Accumulates a frame's ANSI bytes for a single terminal write.
struct FrameOutput {
    buf: Vec<u8>,
}

/// Enough for a full redraw of a small window without reallocation.
const OUTPUT_CAPACITY: usize = 8192;

impl FrameOutput {
    fn new() -> Self {
        Self {
            buf: Vec::with_capacity(OUTPUT_CAPACITY),
        }
    }

    /// Clear for reuse, keeping the allocation.
    fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write the accumulated bytes to `w` and clear the buffer.
    fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for FrameOutput {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // In-memory buffer; real flushing happens in flush_to.
        Ok(())
    }
}

// ─── CellWriter ─────────────────────────────────────────────────────────────

/// Tracks terminal state to elide redundant escape sequences.
///
/// Cursor moves are skipped when the next cell is at `(last_x + 1,
/// last_y)` — the terminal auto-advances after output. Colors are
/// re-emitted only on change. An attribute change emits SGR 0 first
/// (when there were old attributes to clear), which invalidates the
/// tracked colors and forces them to be re-emitted.
struct CellWriter {
    last_x: i32,
    last_y: i32,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
    last_attrs: Attr,
}

impl CellWriter {
    const fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::empty(),
        }
    }

    /// Forget all tracked state. Call at the start of every frame.
    fn reset(&mut self) {
        *self = Self::new();
    }

    /// Emit one cell with only the escapes it needs.
    fn render_cell(&mut self, out: &mut FrameOutput, x: u16, y: u16, cell: &Cell) {
        let xi = i32::from(x);
        let yi = i32::from(y);

        if yi != self.last_y || xi != self.last_x + 1 {
            ansi::cursor_to(out, x, y).ok();
        }

        if cell.attrs != self.last_attrs {
            if !self.last_attrs.is_empty() {
                // SGR 0 clears colors too — re-emit them below.
                ansi::reset(out).ok();
                self.last_fg = None;
                self.last_bg = None;
            }
            self.last_attrs = cell.attrs;
            if !cell.attrs.is_empty() {
                ansi::attrs(out, cell.attrs).ok();
            }
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.last_fg = Some(cell.fg);
        }

        if self.last_bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.last_bg = Some(cell.bg);
        }

        let mut enc = [0u8; 4];
        out.buf
            .extend_from_slice(cell.ch.encode_utf8(&mut enc).as_bytes());

        self.last_x = xi;
        self.last_y = yi;
    }
}

// ─── RenderStats ────────────────────────────────────────────────────────────

/// Counters from one render pass, for tests and debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells that differed from the previous frame and were emitted.
    pub cells_rendered: usize,
    /// Cells that matched the previous frame and were skipped.
    pub cells_skipped: usize,
    /// Bytes of ANSI output generated for the frame.
    pub bytes_written: usize,
}

// ─── Renderer ───────────────────────────────────────────────────────────────

/// Differential frame renderer.
///
/// Call [`render`](Self::render) with the painted frame, then
/// [`flush`](Self::flush) to write the result to stdout (or
/// [`flush_to`](Self::flush_to) for an arbitrary writer, which the
/// tests use).
pub struct Renderer {
    output: FrameOutput,
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl Renderer {
    /// A renderer with no previous frame; the first render draws everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: FrameOutput::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Diff `current` against the previous frame and build the output.
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.store_frame(current);
            return stats;
        }

        ansi::begin_sync(&mut self.output).ok();

        // Full redraw on the first frame or after a size change.
        let size_matches = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == width && prev.height() == height);
        let full_redraw = !size_matches;

        if full_redraw {
            ansi::clear_screen(&mut self.output).ok();
            ansi::cursor_to(&mut self.output, 0, 0).ok();
        }

        for y in 0..height {
            // Whole-row skip: one slice comparison per unchanged row.
            if !full_redraw {
                if let Some(prev) = &self.previous {
                    if let (Some(curr_row), Some(prev_row)) = (current.row(y), prev.row(y)) {
                        if curr_row == prev_row {
                            stats.cells_skipped += usize::from(width);
                            continue;
                        }
                    }
                }
            }

            for x in 0..width {
                // x < width and y < height, so the cell exists.
                let Some(cell) = current.get(x, y) else {
                    continue;
                };

                let changed = full_redraw
                    || self.previous.as_ref().and_then(|p| p.get(x, y)) != Some(cell);

                if changed {
                    self.writer.render_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                } else {
                    stats.cells_skipped += 1;
                }
            }
        }

        // Leave the terminal in a clean state so nothing bleeds into the
        // shell if the app exits after this frame.
        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();

        stats.bytes_written = self.output.buf.len();

        self.store_frame(current);

        stats
    }

    /// The raw ANSI bytes from the last render, for tests.
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        &self.output.buf
    }

    /// Write the accumulated frame to stdout in one syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.output.flush_to(&mut lock)
    }

    /// Write the accumulated frame to an arbitrary writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Drop the previous frame so the next render redraws everything.
    /// Called after a resize, when stale cells may survive off-grid.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    /// Keep `current` for the next diff, reusing the allocation when
    /// the dimensions match.
    fn store_frame(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev) if prev.width() == current.width() && prev.height() == current.height() => {
                prev.copy_from(current);
            }
            _ => {
                self.previous = Some(current.clone());
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
