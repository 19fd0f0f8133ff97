// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into structured events: key presses and mouse
// clicks. Handles the protocols we enable in `terminal.rs`:
//
// - Plain bytes: ASCII printables, control characters, UTF-8 multi-byte
// - Legacy CSI sequences (arrows, Home/End, Delete)
// - SGR mouse protocol (press / release with coordinates)
// - Alt+key (ESC followed by a printable character)
//
// # Design
//
// Escape sequences can span multiple `read()` calls, so the parser
// keeps a small internal byte buffer. Feed bytes with
// [`Parser::advance`]; after a timeout with no new bytes, call
// [`Parser::flush`] to emit a pending lone ESC as a real Escape
// keypress — a bare ESC byte is otherwise indistinguishable from the
// start of a sequence.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse button event with position.
    Mouse(MouseEvent),
}

/// A keyboard event with key identity and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

/// Identity of a key. Printable characters use [`Char`](KeyCode::Char).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags! {
    /// Keyboard modifier flags (xterm CSI encoding: `param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

/// A mouse button event with position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Press or release.
    pub kind: MouseEventKind,
    /// 0-indexed column.
    pub x: u16,
    /// 0-indexed row.
    pub y: u16,
}

/// Mouse event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed.
    Press(MouseButton),
    /// Button released.
    Release(MouseButton),
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Terminal input parser.
///
/// Feed raw bytes via [`advance`](Parser::advance) and collect
/// structured [`Event`]s. Incomplete sequences are buffered internally
/// and resume when more bytes arrive.
pub struct Parser {
    /// Accumulated raw bytes waiting to be parsed.
    buf: Vec<u8>,
}

impl Parser {
    /// Create a parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw bytes from stdin and return all events that can be parsed.
    ///
    /// Bytes forming an incomplete sequence stay in the internal buffer
    /// for the next call. Call [`flush`](Parser::flush) after a timeout
    /// to resolve a pending lone ESC.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match try_parse(&self.buf[pos..]) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n.max(1),
            }
        }

        // Compact: remove consumed bytes, keep the unconsumed remainder.
        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Are there unconsumed bytes that might complete with more data?
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush pending bytes as literal key events.
    ///
    /// Called after a timeout (one loop tick) to resolve the ESC
    /// ambiguity: a lone ESC byte becomes an Escape key event, and any
    /// other leftover printable bytes become `Char` events.
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        for &byte in &self.buf {
            let (code, modifiers) = match byte {
                0x1B => (KeyCode::Escape, Modifiers::empty()),
                b @ 0x01..=0x1A => (KeyCode::Char((b + b'a' - 1) as char), Modifiers::CTRL),
                0x7F => (KeyCode::Backspace, Modifiers::empty()),
                b @ 0x20..=0x7E => (KeyCode::Char(b as char), Modifiers::empty()),
                _ => continue,
            };
            events.push(Event::Key(KeyEvent { code, modifiers }));
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing Functions ────────────────────────────────────────────
//
// All parse functions are pure — they read from the slice and return
// what they found plus how many bytes to consume.

/// Result of trying to parse one event from the buffer.
enum Parsed {
    /// Successfully parsed an event, consuming `usize` bytes.
    Event(Event, usize),
    /// Sequence is incomplete — need more bytes.
    Incomplete,
    /// Unrecognized byte(s), skip `usize` bytes.
    Skip(usize),
}

/// Try to parse a single event starting at `buf[0]`.
fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        // ESC — could be an escape sequence or a standalone Escape key.
        0x1B => parse_escape(buf),
        // Control characters → Ctrl+letter.
        b @ (0x01..=0x07 | 0x0B..=0x0C | 0x0E..=0x1A) => {
            Parsed::Event(ctrl_key(KeyCode::Char((b + b'a' - 1) as char)), 1)
        }
        0x08 | 0x7F => Parsed::Event(press(KeyCode::Backspace), 1),
        0x09 => Parsed::Event(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Parsed::Event(press(KeyCode::Enter), 1),
        // ASCII printable.
        b @ 0x20..=0x7E => Parsed::Event(press(KeyCode::Char(b as char)), 1),
        // UTF-8 multi-byte.
        0xC0..=0xFF => parse_utf8(buf),
        // NUL and bare continuation bytes — invalid here, skip.
        _ => Parsed::Skip(1),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> Parsed {
    debug_assert_eq!(buf[0], 0x1B);

    if buf.len() < 2 {
        return Parsed::Incomplete;
    }

    match buf[1] {
        // CSI: ESC [
        b'[' => parse_csi(buf),
        // Alt+ESC.
        0x1B => Parsed::Event(
            Event::Key(KeyEvent {
                code: KeyCode::Escape,
                modifiers: Modifiers::ALT,
            }),
            2,
        ),
        // Alt+printable character.
        b @ 0x20..=0x7E => Parsed::Event(
            Event::Key(KeyEvent {
                code: KeyCode::Char(b as char),
                modifiers: Modifiers::ALT,
            }),
            2,
        ),
        // Unknown byte after ESC — emit standalone Escape.
        _ => Parsed::Event(press(KeyCode::Escape), 1),
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

fn parse_csi(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'[');

    if buf.len() < 3 {
        return Parsed::Incomplete;
    }

    // SGR mouse: ESC [ <
    if buf[2] == b'<' {
        return parse_sgr_mouse(buf);
    }

    // Scan for the final byte (0x40..=0x7E); parameter bytes are
    // 0x30..=0x3F, intermediate bytes 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_csi_params(&buf[2..end]);
    let consumed = end + 1;

    // Tilde-terminated editing keys: `CSI n ~`.
    if final_byte == b'~' {
        let first = params.first().copied().unwrap_or(0);
        let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));
        return match first {
            1 | 7 => Parsed::Event(key_with(KeyCode::Home, modifiers), consumed),
            3 => Parsed::Event(key_with(KeyCode::Delete, modifiers), consumed),
            4 | 8 => Parsed::Event(key_with(KeyCode::End, modifiers), consumed),
            _ => Parsed::Skip(consumed),
        };
    }

    // Letter-terminated sequences.
    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));
    let event = match final_byte {
        b'A' => key_with(KeyCode::Up, modifiers),
        b'B' => key_with(KeyCode::Down, modifiers),
        b'C' => key_with(KeyCode::Right, modifiers),
        b'D' => key_with(KeyCode::Left, modifiers),
        b'H' => key_with(KeyCode::Home, modifiers),
        b'F' => key_with(KeyCode::End, modifiers),
        _ => return Parsed::Skip(consumed),
    };

    Parsed::Event(event, consumed)
}

// ── SGR Mouse Protocol ─────────────────────────────────────────────────────

fn parse_sgr_mouse(buf: &[u8]) -> Parsed {
    // Format: ESC [ < Pb ; Px ; Py M    (press)
    //         ESC [ < Pb ; Px ; Py m    (release)
    debug_assert!(buf.len() >= 3 && buf[2] == b'<');

    let start = 3;
    let mut end = start;
    while end < buf.len() {
        if buf[end] == b'M' || buf[end] == b'm' {
            break;
        }
        if !buf[end].is_ascii_digit() && buf[end] != b';' {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let is_release = buf[end] == b'm';
    let consumed = end + 1;

    // Three semicolon-separated numbers: button_flags ; x ; y
    let params = &buf[start..end];
    let (cb, rest) = parse_u16(params);
    let rest = skip_byte(rest, b';');
    let (raw_x, rest) = parse_u16(rest);
    let rest = skip_byte(rest, b';');
    let (raw_y, _) = parse_u16(rest);

    // Scroll (bit 6) and motion (bit 5) events are not tracked in click
    // mode on most terminals, but some send them anyway — drop them.
    if cb & 64 != 0 || cb & 32 != 0 {
        return Parsed::Skip(consumed);
    }

    let button = match cb & 3 {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        // Button 3 is "release" in the legacy protocol; SGR encodes
        // release via the final byte, so treat it as left.
        _ => MouseButton::Left,
    };

    let kind = if is_release {
        MouseEventKind::Release(button)
    } else {
        MouseEventKind::Press(button)
    };

    // SGR coordinates are 1-indexed; we use 0-indexed.
    Parsed::Event(
        Event::Mouse(MouseEvent {
            kind,
            x: raw_x.saturating_sub(1),
            y: raw_y.saturating_sub(1),
        }),
        consumed,
    )
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };

    if buf.len() < expected {
        return Parsed::Incomplete;
    }

    // Continuation bytes must be 0b10xxxxxx.
    for &b in &buf[1..expected] {
        if b & 0xC0 != 0x80 {
            return Parsed::Skip(1);
        }
    }

    std::str::from_utf8(&buf[..expected]).map_or(Parsed::Skip(1), |s| {
        s.chars().next().map_or(Parsed::Skip(expected), |ch| {
            Parsed::Event(press(KeyCode::Char(ch)), expected)
        })
    })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Create a simple key press event with no modifiers.
const fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::empty(),
    })
}

/// Create a Ctrl+key press event.
const fn ctrl_key(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::CTRL,
    })
}

/// Create a key press event with specific modifiers.
const fn key_with(code: KeyCode, modifiers: Modifiers) -> Event {
    Event::Key(KeyEvent { code, modifiers })
}

/// Decode an xterm modifier parameter (`param = 1 + bitmask`).
fn decode_modifiers(param: u16) -> Modifiers {
    let mask = param.saturating_sub(1);
    let mut m = Modifiers::empty();
    if mask & 1 != 0 {
        m |= Modifiers::SHIFT;
    }
    if mask & 2 != 0 {
        m |= Modifiers::ALT;
    }
    if mask & 4 != 0 {
        m |= Modifiers::CTRL;
    }
    m
}

/// Parse semicolon-separated CSI parameters. Empty params decode as 0.
fn parse_csi_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|chunk| {
            chunk
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// Parse a u16 prefix from bytes. Returns `(value, remainder)`.
fn parse_u16(buf: &[u8]) -> (u16, &[u8]) {
    let mut val: u16 = 0;
    let mut pos = 0;
    while pos < buf.len() && buf[pos].is_ascii_digit() {
        val = val.saturating_mul(10).saturating_add(u16::from(buf[pos] - b'0'));
        pos += 1;
    }
    (val, &buf[pos..])
}

/// Skip one expected byte, if present.
fn skip_byte(buf: &[u8], expected: u8) -> &[u8] {
    if buf.first() == Some(&expected) {
        &buf[1..]
    } else {
        buf
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
