// SPDX-License-Identifier: MIT
//
// tally — a keypad calculator for the terminal.
//
// This is the binary that wires the crates together:
//
//   tally-term   → terminal control, rendering, input parsing, event loop
//   tally-engine → buttons, arithmetic state machine, display formatting
//   tally-theme  → button category → style lookup
//
// The Keypad struct implements tally-term's App trait. Each keypress or
// mouse click flows through:
//
//   stdin → parser → on_event → button mapping → CalcState::press
//   paint → layout → framebuffer → diff renderer → terminal
//
// Layout (centered in the window):
//
//   ┌──────────────────────────────┐
//   │                      1 234.5 │  ← display readout, right-aligned
//   │  ┌────┐ ┌────┐ ┌────┐ ┌────┐ │
//   │  │ AC │ │ ±  │ │ %  │ │ ÷  │ │
//   │  └────┘ └────┘ └────┘ └────┘ │  ← 5 rows of buttons,
//   │    ...    ...    ...    ...  │    double-width zero
//   ├──────────────────────────────┤
//   │ key hint                     │  ← bottom row
//   └──────────────────────────────┘

use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tally_engine::{Button, CalcState};
use tally_term::buffer::{string_width, FrameBuffer};
use tally_term::event_loop::{Action, App, EventLoop};
use tally_term::input::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use tally_term::terminal::Size;
use tally_theme::builtin::{builtin_names, builtin_theme};
use tally_theme::Theme;

// ─── Grid geometry ──────────────────────────────────────────────────────────

/// Button rows, top to bottom. The zero button is double width, which
/// is why the last row has three entries instead of four.
const GRID: [&[Button]; 5] = [
    &[Button::Clear, Button::Negate, Button::Percent, Button::Divide],
    &[Button::Digit(7), Button::Digit(8), Button::Digit(9), Button::Multiply],
    &[Button::Digit(4), Button::Digit(5), Button::Digit(6), Button::Subtract],
    &[Button::Digit(1), Button::Digit(2), Button::Digit(3), Button::Add],
    &[Button::Digit(0), Button::Decimal, Button::Equals],
];

const BUTTON_W: u16 = 7;
const BUTTON_H: u16 = 3;
const GAP: u16 = 1;
const GRID_COLS: u16 = 4;

/// Keypad width: four button columns and the gaps between them.
const PAD_W: u16 = GRID_COLS * BUTTON_W + (GRID_COLS - 1) * GAP;
/// Keypad height: display row, blank row, five button rows with gaps.
const PAD_H: u16 = 2 + 5 * BUTTON_H + 4 * GAP;

/// How long a pressed button stays lit.
const FLASH_DURATION: Duration = Duration::from_millis(120);

const HINT: &str = "0-9 . + - × ÷ =  ⏎ equals  c clear  q quit";

// ─── Layout ─────────────────────────────────────────────────────────────────

/// A screen-space rectangle, used for button placement and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Rect {
    const fn contains(self, px: u16, py: u16) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// Where everything lands for a given terminal size.
///
/// Recomputed on resize; both `paint` and the mouse handler read the
/// same rectangles, so a click always hits what the user sees.
#[derive(Debug)]
struct Layout {
    /// Left edge of the pad.
    origin_x: u16,
    /// Row of the display readout.
    display_y: u16,
    /// Every button with its rectangle, in grid order.
    buttons: Vec<(Button, Rect)>,
    /// Row of the key hint.
    hint_y: u16,
}

impl Layout {
    /// Center the pad in the window, reserving the bottom row for the
    /// hint. On a window smaller than the pad, the origin clamps to the
    /// top-left and painting clips at the edges.
    fn compute(size: Size) -> Self {
        let origin_x = size.cols.saturating_sub(PAD_W) / 2;
        let usable_rows = size.rows.saturating_sub(1);
        let origin_y = usable_rows.saturating_sub(PAD_H) / 2;

        let grid_top = origin_y + 2;
        let mut buttons = Vec::with_capacity(19);
        for (row_idx, row) in GRID.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // 5 rows.
            let y = grid_top + row_idx as u16 * (BUTTON_H + GAP);
            let mut x = origin_x;
            for &button in *row {
                let w = if button == Button::Digit(0) {
                    BUTTON_W * 2 + GAP
                } else {
                    BUTTON_W
                };
                buttons.push((button, Rect { x, y, w, h: BUTTON_H }));
                x += w + GAP;
            }
        }

        Self {
            origin_x,
            display_y: origin_y,
            buttons,
            hint_y: size.rows.saturating_sub(1),
        }
    }

    /// The button under a screen position, if any.
    fn hit(&self, x: u16, y: u16) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|&(button, _)| button)
    }
}

// ─── Key mapping ────────────────────────────────────────────────────────────

/// Map a key event to the button it presses, if any.
fn button_for_key(key: &KeyEvent) -> Option<Button> {
    match key.code {
        KeyCode::Char(ch) => match ch {
            '0'..='9' => Some(Button::Digit(ch as u8 - b'0')),
            '.' => Some(Button::Decimal),
            '+' => Some(Button::Add),
            '-' => Some(Button::Subtract),
            '*' | 'x' | 'X' | '×' => Some(Button::Multiply),
            '/' | '÷' => Some(Button::Divide),
            '=' => Some(Button::Equals),
            'c' | 'C' => Some(Button::Clear),
            '%' => Some(Button::Percent),
            'n' | 'N' => Some(Button::Negate),
            _ => None,
        },
        KeyCode::Enter => Some(Button::Equals),
        KeyCode::Backspace | KeyCode::Delete => Some(Button::Clear),
        _ => None,
    }
}

/// True if this key quits the application.
fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(Modifiers::CTRL),
        _ => false,
    }
}

// ─── Keypad application ─────────────────────────────────────────────────────

/// The calculator application: engine state plus view state.
struct Keypad {
    state: CalcState,
    theme: Theme,
    layout: Layout,
    /// The button currently lit by a press flash and when it was lit.
    flash: Option<(Button, Instant)>,
}

impl Keypad {
    fn new(theme: Theme, size: Size) -> Self {
        Self {
            state: CalcState::new(),
            theme,
            layout: Layout::compute(size),
            flash: None,
        }
    }

    /// Route a press into the engine and light the button.
    fn press_button(&mut self, button: Button) {
        self.state.press(button);
        self.flash = Some((button, Instant::now()));
        debug!(button = %button, display = %self.state.display(), "pressed");
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Action {
        if is_quit_key(key) {
            info!("quit");
            return Action::Quit;
        }
        if let Some(button) = button_for_key(key) {
            self.press_button(button);
        }
        Action::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Action {
        if mouse.kind == MouseEventKind::Press(MouseButton::Left) {
            if let Some(button) = self.layout.hit(mouse.x, mouse.y) {
                self.press_button(button);
            }
        }
        Action::Continue
    }

    /// Paint the display readout, right-aligned to the pad's right
    /// edge. When the number is wider than the window, the tail is
    /// kept — the least significant digits are the freshest input.
    fn paint_display(&self, frame: &mut FrameBuffer) {
        let text = self.state.display();
        let right = (self.layout.origin_x + PAD_W).min(frame.width());

        let shown = tail_columns(&text, usize::from(right));
        #[allow(clippy::cast_possible_truncation)] // bounded by right ≤ u16.
        let x = right.saturating_sub(string_width(shown) as u16);
        let style = self.theme.display;
        frame.paint_text(x, self.layout.display_y, shown, style.fg, style.bg, style.attrs);
    }

    fn paint_buttons(&self, frame: &mut FrameBuffer) {
        for &(button, rect) in &self.layout.buttons {
            let pressed = self.flash.is_some_and(|(b, _)| b == button);
            let style = self.theme.button_style(button.kind(), pressed);

            frame.fill_rect(rect.x, rect.y, rect.w, rect.h, style.bg);

            let label = button.label();
            #[allow(clippy::cast_possible_truncation)] // labels are ≤ 2 cols.
            let label_w = string_width(label) as u16;
            let x = rect.x + (rect.w.saturating_sub(label_w)) / 2;
            let y = rect.y + rect.h / 2;
            frame.paint_text(x, y, label, style.fg, style.bg, style.attrs);
        }
    }

    fn paint_hint(&self, frame: &mut FrameBuffer) {
        let style = self.theme.hint;
        #[allow(clippy::cast_possible_truncation)]
        let w = string_width(HINT) as u16;
        let x = frame.width().saturating_sub(w) / 2;
        frame.paint_text(x, self.layout.hint_y, HINT, style.fg, style.bg, style.attrs);
    }
}

impl App for Keypad {
    fn on_event(&mut self, event: &Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    fn on_resize(&mut self, size: Size) {
        self.layout = Layout::compute(size);
    }

    fn on_tick(&mut self) -> bool {
        // The only time-based state is the press flash; repaint once
        // when it expires.
        if let Some((_, lit_at)) = self.flash {
            if lit_at.elapsed() >= FLASH_DURATION {
                self.flash = None;
                return true;
            }
        }
        false
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        frame.fill_rect(0, 0, frame.width(), frame.height(), self.theme.backdrop.bg);
        self.paint_display(frame);
        self.paint_buttons(frame);
        self.paint_hint(frame);
    }
}

/// The longest suffix of `s` that fits in `max` columns.
///
/// Display strings are single-column characters (digits, signs, spaces),
/// so a char count is a column count here.
fn tail_columns(s: &str, max: usize) -> &str {
    let count = s.chars().count();
    if count <= max {
        return s;
    }
    let skip = count - max;
    match s.char_indices().nth(skip) {
        Some((byte_idx, _)) => &s[byte_idx..],
        None => "",
    }
}

// ─── CLI and logging ────────────────────────────────────────────────────────

#[derive(Debug, ClapParser)]
#[command(name = "tally")]
#[command(version, about = "A keypad calculator for the terminal")]
struct Cli {
    /// Color theme.
    #[arg(long, default_value = "keypad-dark")]
    theme: String,

    /// List available themes and exit.
    #[arg(long)]
    list_themes: bool,

    /// Append debug logs to this file.
    ///
    /// Logging goes to a file rather than stderr so it never writes
    /// into the raw-mode screen. Filter with RUST_LOG as usual.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in builtin_names() {
            println!("{name}");
        }
        return;
    }

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("tally: cannot open log file {}: {e}", path.display());
            process::exit(1);
        }
    }

    let Some(theme) = builtin_theme(&cli.theme) else {
        eprintln!(
            "tally: unknown theme '{}' (available: {})",
            cli.theme,
            builtin_names().join(", ")
        );
        process::exit(2);
    };

    let mut event_loop = EventLoop::new().unwrap_or_else(|e| {
        eprintln!("tally: failed to initialize terminal: {e}");
        process::exit(1);
    });

    let mut app = Keypad::new(theme, event_loop.size());

    info!(version = env!("CARGO_PKG_VERSION"), theme = %app.theme.name, "starting");

    if let Err(e) = event_loop.run(&mut app) {
        eprintln!("tally: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Helpers ─────────────────────────────────────────────────

    const TEST_SIZE: Size = Size { cols: 80, rows: 24 };

    fn keypad() -> Keypad {
        Keypad::new(builtin_theme("keypad-dark").unwrap(), TEST_SIZE)
    }

    fn key(ch: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::empty(),
        })
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        })
    }

    fn type_keys(app: &mut Keypad, input: &str) {
        for ch in input.chars() {
            assert_eq!(app.on_event(&key(ch)), Action::Continue);
        }
    }

    fn click(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Press(MouseButton::Left),
            x,
            y,
        })
    }

    // ── Key mapping ─────────────────────────────────────────────

    #[test]
    fn digits_map_to_digit_buttons() {
        for (ch, d) in ('0'..='9').zip(0u8..) {
            let event = KeyEvent {
                code: KeyCode::Char(ch),
                modifiers: Modifiers::empty(),
            };
            assert_eq!(button_for_key(&event), Some(Button::Digit(d)));
        }
    }

    #[test]
    fn operator_keys_map() {
        let cases = [
            ('+', Button::Add),
            ('-', Button::Subtract),
            ('*', Button::Multiply),
            ('x', Button::Multiply),
            ('×', Button::Multiply),
            ('/', Button::Divide),
            ('÷', Button::Divide),
            ('=', Button::Equals),
            ('.', Button::Decimal),
            ('%', Button::Percent),
            ('n', Button::Negate),
            ('c', Button::Clear),
        ];
        for (ch, expected) in cases {
            let event = KeyEvent {
                code: KeyCode::Char(ch),
                modifiers: Modifiers::empty(),
            };
            assert_eq!(button_for_key(&event), Some(expected), "{ch}");
        }
    }

    #[test]
    fn enter_is_equals_backspace_is_clear() {
        let enter = KeyEvent {
            code: KeyCode::Enter,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(button_for_key(&enter), Some(Button::Equals));

        let backspace = KeyEvent {
            code: KeyCode::Backspace,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(button_for_key(&backspace), Some(Button::Clear));
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        let event = KeyEvent {
            code: KeyCode::Char('z'),
            modifiers: Modifiers::empty(),
        };
        assert_eq!(button_for_key(&event), None);
    }

    #[test]
    fn quit_keys() {
        let q = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: Modifiers::empty(),
        };
        assert!(is_quit_key(&q));

        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: Modifiers::CTRL,
        };
        assert!(is_quit_key(&ctrl_c));

        // Plain c is clear, not quit.
        let c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: Modifiers::empty(),
        };
        assert!(!is_quit_key(&c));
    }

    // ── Layout ──────────────────────────────────────────────────

    #[test]
    fn layout_places_all_buttons() {
        let layout = Layout::compute(TEST_SIZE);
        assert_eq!(layout.buttons.len(), 19);
    }

    #[test]
    fn zero_is_double_width() {
        let layout = Layout::compute(TEST_SIZE);
        let (_, zero) = layout
            .buttons
            .iter()
            .find(|(b, _)| *b == Button::Digit(0))
            .unwrap();
        let (_, one) = layout
            .buttons
            .iter()
            .find(|(b, _)| *b == Button::Digit(1))
            .unwrap();
        assert_eq!(zero.w, one.w * 2 + GAP);
    }

    #[test]
    fn rows_span_the_pad_width() {
        let layout = Layout::compute(TEST_SIZE);
        // Every row's rightmost button ends at origin_x + PAD_W.
        for row in GRID {
            let last = row.last().unwrap();
            let (_, rect) = layout.buttons.iter().find(|(b, _)| b == last).unwrap();
            assert_eq!(rect.x + rect.w, layout.origin_x + PAD_W);
        }
    }

    #[test]
    fn buttons_do_not_overlap() {
        let layout = Layout::compute(TEST_SIZE);
        for (i, (_, a)) in layout.buttons.iter().enumerate() {
            for (_, b) in &layout.buttons[i + 1..] {
                let disjoint = a.x + a.w <= b.x
                    || b.x + b.w <= a.x
                    || a.y + a.h <= b.y
                    || b.y + b.h <= a.y;
                assert!(disjoint, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn hit_test_finds_button_centers() {
        let layout = Layout::compute(TEST_SIZE);
        for &(button, rect) in &layout.buttons {
            let cx = rect.x + rect.w / 2;
            let cy = rect.y + rect.h / 2;
            assert_eq!(layout.hit(cx, cy), Some(button));
        }
    }

    #[test]
    fn hit_test_misses_gaps_and_outside() {
        let layout = Layout::compute(TEST_SIZE);
        assert_eq!(layout.hit(0, 0), None);
        // The gap column between the first two buttons of the top row.
        let (_, first) = layout.buttons[0];
        assert_eq!(layout.hit(first.x + first.w, first.y), None);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let layout = Layout::compute(Size { cols: 5, rows: 3 });
        assert_eq!(layout.buttons.len(), 19);
        let mut frame = FrameBuffer::new(5, 3);
        let mut app = keypad();
        app.layout = layout;
        app.paint(&mut frame);
    }

    // ── Event flow ──────────────────────────────────────────────

    #[test]
    fn typing_a_sum_computes_it() {
        let mut app = keypad();
        type_keys(&mut app, "7+3=");
        assert_eq!(app.state.display(), "10");
    }

    #[test]
    fn division_by_zero_shows_error() {
        let mut app = keypad();
        type_keys(&mut app, "8/0=");
        assert_eq!(app.state.display(), "Error");
    }

    #[test]
    fn decimal_entry() {
        let mut app = keypad();
        type_keys(&mut app, "1.5");
        assert_eq!(app.state.display(), "1.5");
    }

    #[test]
    fn clear_key_resets() {
        let mut app = keypad();
        type_keys(&mut app, "9c");
        assert_eq!(app.state.display(), "0");
    }

    #[test]
    fn enter_acts_as_equals() {
        let mut app = keypad();
        type_keys(&mut app, "6x7");
        assert_eq!(
            app.on_event(&Event::Key(KeyEvent {
                code: KeyCode::Enter,
                modifiers: Modifiers::empty(),
            })),
            Action::Continue
        );
        assert_eq!(app.state.display(), "42");
    }

    #[test]
    fn q_quits() {
        let mut app = keypad();
        assert_eq!(app.on_event(&key('q')), Action::Quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = keypad();
        assert_eq!(app.on_event(&ctrl('c')), Action::Quit);
    }

    #[test]
    fn unmapped_key_leaves_state_alone() {
        let mut app = keypad();
        type_keys(&mut app, "5z");
        assert_eq!(app.state.display(), "5");
    }

    // ── Mouse ───────────────────────────────────────────────────

    #[test]
    fn clicking_a_digit_presses_it() {
        let mut app = keypad();
        let (_, rect) = *app
            .layout
            .buttons
            .iter()
            .find(|(b, _)| *b == Button::Digit(5))
            .unwrap();
        app.on_event(&click(rect.x + rect.w / 2, rect.y + rect.h / 2));
        assert_eq!(app.state.display(), "5");
    }

    #[test]
    fn click_outside_buttons_is_ignored() {
        let mut app = keypad();
        app.on_event(&click(0, 0));
        assert_eq!(app.state.display(), "0");
    }

    #[test]
    fn release_does_not_press() {
        let mut app = keypad();
        let (_, rect) = *app
            .layout
            .buttons
            .iter()
            .find(|(b, _)| *b == Button::Digit(5))
            .unwrap();
        app.on_event(&Event::Mouse(MouseEvent {
            kind: MouseEventKind::Release(MouseButton::Left),
            x: rect.x,
            y: rect.y,
        }));
        assert_eq!(app.state.display(), "0");
    }

    // ── Press flash ─────────────────────────────────────────────

    #[test]
    fn press_lights_the_button() {
        let mut app = keypad();
        assert!(app.flash.is_none());
        app.on_event(&key('7'));
        assert!(matches!(app.flash, Some((Button::Digit(7), _))));
    }

    #[test]
    fn flash_expires_on_tick() {
        let mut app = keypad();
        app.on_event(&key('7'));
        // Still lit immediately: no repaint requested.
        assert!(!app.on_tick());
        std::thread::sleep(FLASH_DURATION + Duration::from_millis(30));
        assert!(app.on_tick());
        assert!(app.flash.is_none());
        // And quiescent afterwards.
        assert!(!app.on_tick());
    }

    // ── Painting ────────────────────────────────────────────────

    /// The characters of one frame row as a string.
    fn row_text(frame: &FrameBuffer, y: u16) -> String {
        frame.row(y).unwrap().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn paint_shows_the_display_value() {
        let mut app = keypad();
        type_keys(&mut app, "7+3=");
        let mut frame = FrameBuffer::new(TEST_SIZE.cols, TEST_SIZE.rows);
        app.paint(&mut frame);

        let row = row_text(&frame, app.layout.display_y);
        assert!(row.contains("10"), "display row: {row:?}");
        // Right-aligned: the value ends at the pad's right edge.
        let right = usize::from(app.layout.origin_x + PAD_W);
        assert_eq!(&row[right - 2..right], "10");
    }

    #[test]
    fn paint_shows_all_labels() {
        let mut app = keypad();
        let mut frame = FrameBuffer::new(TEST_SIZE.cols, TEST_SIZE.rows);
        app.paint(&mut frame);

        let screen: Vec<String> = (0..frame.height()).map(|y| row_text(&frame, y)).collect();
        for button in tally_engine::button::ALL_BUTTONS {
            assert!(
                screen.iter().any(|row| row.contains(button.label())),
                "label {:?} not painted",
                button.label()
            );
        }
    }

    #[test]
    fn paint_uses_theme_button_background() {
        let mut app = keypad();
        let mut frame = FrameBuffer::new(TEST_SIZE.cols, TEST_SIZE.rows);
        app.paint(&mut frame);

        let (_, rect) = *app
            .layout
            .buttons
            .iter()
            .find(|(b, _)| *b == Button::Divide)
            .unwrap();
        let cell = frame.get(rect.x, rect.y).unwrap();
        let expected = app.theme.button_style(Button::Divide.kind(), false);
        assert_eq!(cell.bg, expected.bg);
    }

    #[test]
    fn pressed_button_paints_with_flash_style() {
        let mut app = keypad();
        app.on_event(&key('7'));
        let mut frame = FrameBuffer::new(TEST_SIZE.cols, TEST_SIZE.rows);
        app.paint(&mut frame);

        let (_, rect) = *app
            .layout
            .buttons
            .iter()
            .find(|(b, _)| *b == Button::Digit(7))
            .unwrap();
        let cell = frame.get(rect.x, rect.y).unwrap();
        let expected = app.theme.button_style(Button::Digit(7).kind(), true);
        assert_eq!(cell.bg, expected.bg);
    }

    #[test]
    fn paint_shows_hint_on_bottom_row() {
        let mut app = keypad();
        let mut frame = FrameBuffer::new(TEST_SIZE.cols, TEST_SIZE.rows);
        app.paint(&mut frame);
        let row = row_text(&frame, app.layout.hint_y);
        assert!(row.contains("q quit"));
    }

    // ── Display truncation ──────────────────────────────────────

    #[test]
    fn tail_columns_keeps_the_tail() {
        assert_eq!(tail_columns("123456", 4), "3456");
        assert_eq!(tail_columns("123", 4), "123");
        assert_eq!(tail_columns("123", 0), "");
    }

    #[test]
    fn long_display_keeps_least_significant_digits() {
        let mut app = keypad();
        // A window too narrow for "123 456 789" (11 columns).
        let size = Size { cols: 8, rows: 24 };
        app.on_resize(size);
        type_keys(&mut app, "123456789");
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        app.paint(&mut frame);
        let row = row_text(&frame, app.layout.display_y);
        // The tail survives: the freshest digits stay visible.
        assert_eq!(row, " 456 789");
    }

    // ── Resize ──────────────────────────────────────────────────

    #[test]
    fn resize_recenters_the_pad() {
        let mut app = keypad();
        let wide = app.layout.origin_x;
        app.on_resize(Size { cols: 160, rows: 48 });
        assert!(app.layout.origin_x > wide);
    }
}
