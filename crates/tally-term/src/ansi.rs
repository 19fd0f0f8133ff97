// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No
// state, no decisions about when to emit — that's the renderer's job.
// This module just knows the byte-level encoding of every terminal
// command we need.
//
// All cursor positions are 0-indexed in our API and converted to
// 1-indexed for the terminal (ANSI uses 1-based coordinates).

use std::io::{self, Write};

use crate::cell::Attr;
use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// Clears everything: intensity, colors, inversion. A stateful renderer
/// must invalidate its tracked state after emitting this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Enter the alternate screen buffer (DEC Private Mode 1049).
///
/// The alternate screen preserves the user's shell content; exiting
/// restores it, which is what makes a TUI non-destructive.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// Begin synchronized output (DEC Private Mode 2026).
///
/// The terminal buffers everything until [`end_sync`], so partial frame
/// updates never flicker. Unsupporting terminals ignore it harmlessly.
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

/// End synchronized output — the terminal renders the buffered frame.
#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Colors and Attributes ───────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Compact SGR codes for the 16 classic colors (30–37, 90–97), the
/// 256-color extended format for palette indices 16–255, and 24-bit
/// `TrueColor` for RGB.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color. Same strategy as [`fg`] with BG codes
/// (40–47, 100–107, 48;5;N, 48;2;R;G;B).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

/// Emit SGR codes for text attributes as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;2m` for
/// bold + dim. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    w.write_all(b";")?;
                }
                w.write_all($code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, b"1");
    emit!(Attr::DIM, b"2");
    emit!(Attr::ITALIC, b"3");
    emit!(Attr::INVERSE, b"7");
    let _ = first; // Last expansion sets first; suppress dead-write warning.

    w.write_all(b"m")
}

// ─── Mouse Protocol ─────────────────────────────────────────────────────────

/// Enable SGR mouse click tracking (DEC 1000 + SGR format 1006).
///
/// SGR format supports coordinates past column 223 and distinguishes
/// press from release. Click granularity is all a button grid needs —
/// no drag or motion reporting.
pub fn enable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h")?;
    w.write_all(b"\x1b[?1006h")
}

/// Disable mouse tracking.
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1006l")?;
    w.write_all(b"\x1b[?1000l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────

    #[test]
    fn cursor_to_is_one_indexed() {
        assert_eq!(capture(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(capture(|w| cursor_to(w, 7, 4)), "\x1b[5;8H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(capture(cursor_hide), "\x1b[?25l");
        assert_eq!(capture(cursor_show), "\x1b[?25h");
    }

    // ── Foreground ──────────────────────────────────────────────

    #[test]
    fn fg_default() {
        assert_eq!(capture(|w| fg(w, CellColor::Default)), "\x1b[39m");
    }

    #[test]
    fn fg_classic_ansi() {
        assert_eq!(capture(|w| fg(w, CellColor::Ansi256(1))), "\x1b[31m");
        assert_eq!(capture(|w| fg(w, CellColor::Ansi256(9))), "\x1b[91m");
    }

    #[test]
    fn fg_extended_palette() {
        assert_eq!(capture(|w| fg(w, CellColor::Ansi256(200))), "\x1b[38;5;200m");
    }

    #[test]
    fn fg_truecolor() {
        assert_eq!(
            capture(|w| fg(w, CellColor::Rgb(255, 159, 10))),
            "\x1b[38;2;255;159;10m"
        );
    }

    // ── Background ──────────────────────────────────────────────

    #[test]
    fn bg_default() {
        assert_eq!(capture(|w| bg(w, CellColor::Default)), "\x1b[49m");
    }

    #[test]
    fn bg_classic_ansi() {
        assert_eq!(capture(|w| bg(w, CellColor::Ansi256(4))), "\x1b[44m");
        assert_eq!(capture(|w| bg(w, CellColor::Ansi256(12))), "\x1b[104m");
    }

    #[test]
    fn bg_truecolor() {
        assert_eq!(capture(|w| bg(w, CellColor::Rgb(51, 51, 51))), "\x1b[48;2;51;51;51m");
    }

    // ── Attributes ──────────────────────────────────────────────

    #[test]
    fn attrs_empty_emits_nothing() {
        assert_eq!(capture(|w| attrs(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_single() {
        assert_eq!(capture(|w| attrs(w, Attr::BOLD)), "\x1b[1m");
    }

    #[test]
    fn attrs_combined() {
        assert_eq!(capture(|w| attrs(w, Attr::BOLD | Attr::DIM)), "\x1b[1;2m");
        assert_eq!(
            capture(|w| attrs(w, Attr::BOLD | Attr::ITALIC | Attr::INVERSE)),
            "\x1b[1;3;7m"
        );
    }

    // ── Modes ───────────────────────────────────────────────────

    #[test]
    fn alt_screen_sequences() {
        assert_eq!(capture(enter_alt_screen), "\x1b[?1049h");
        assert_eq!(capture(exit_alt_screen), "\x1b[?1049l");
    }

    #[test]
    fn sync_sequences() {
        assert_eq!(capture(begin_sync), "\x1b[?2026h");
        assert_eq!(capture(end_sync), "\x1b[?2026l");
    }

    #[test]
    fn mouse_sequences() {
        assert_eq!(capture(enable_mouse), "\x1b[?1000h\x1b[?1006h");
        assert_eq!(capture(disable_mouse), "\x1b[?1006l\x1b[?1000l");
    }

    #[test]
    fn screen_sequences() {
        assert_eq!(capture(clear_screen), "\x1b[2J");
        assert_eq!(capture(reset), "\x1b[0m");
    }
}
