//! Named preset themes.
//!
//! `keypad-dark` is the default: orange operators, light-gray controls
//! with dark text, dark-gray digits on a black backdrop. `keypad-light`
//! inverts the chrome for light terminals. `terminal` uses only the
//! terminal's default colors and inverse video, for users who want the
//! pad to blend in with whatever their emulator is configured to show.

use tally_term::cell::Attr;
use tally_term::color::CellColor;

use crate::style::Style;
use crate::theme::{ButtonStyle, Theme};

/// How far pressed faces are lightened from idle on the RGB themes.
const FLASH: f32 = 0.30;

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    match name {
        "default" | "keypad-dark" => Some(keypad_dark()),
        "keypad-light" => Some(keypad_light()),
        "terminal" => Some(terminal()),
        _ => None,
    }
}

/// All builtin theme names, for `--list-themes` and error messages.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["keypad-dark", "keypad-light", "terminal"]
}

fn keypad_dark() -> Theme {
    let white = CellColor::rgb(255, 255, 255);
    let black = CellColor::rgb(0, 0, 0);

    Theme {
        name: "keypad-dark".to_owned(),
        backdrop: Style::fg_bg(white, black),
        display: Style::fg_bg(white, black).with_attrs(Attr::BOLD),
        hint: Style::fg_bg(CellColor::rgb(128, 128, 128), black),
        digit: ButtonStyle::flash_lighter(
            Style::fg_bg(white, CellColor::rgb(55, 55, 55)),
            FLASH,
        ),
        operator: ButtonStyle::flash_lighter(
            Style::fg_bg(white, CellColor::rgb(255, 159, 10)),
            FLASH,
        ),
        control: ButtonStyle::flash_lighter(
            Style::fg_bg(black, CellColor::rgb(211, 211, 211)),
            FLASH,
        ),
    }
}

fn keypad_light() -> Theme {
    let black = CellColor::rgb(20, 20, 20);
    let paper = CellColor::rgb(238, 238, 238);

    Theme {
        name: "keypad-light".to_owned(),
        backdrop: Style::fg_bg(black, paper),
        display: Style::fg_bg(black, paper).with_attrs(Attr::BOLD),
        hint: Style::fg_bg(CellColor::rgb(120, 120, 120), paper),
        digit: ButtonStyle::flash_lighter(
            Style::fg_bg(black, CellColor::rgb(210, 210, 210)),
            FLASH,
        ),
        operator: ButtonStyle::flash_lighter(
            Style::fg_bg(CellColor::rgb(255, 255, 255), CellColor::rgb(255, 159, 10)),
            FLASH,
        ),
        control: ButtonStyle::flash_lighter(
            Style::fg_bg(black, CellColor::rgb(170, 170, 170)),
            FLASH,
        ),
    }
}

/// Default colors only. Buttons are inverse video so they read as keys
/// on any terminal palette; the press flash adds bold, since there is
/// no portable way to brighten an unknown color.
fn terminal() -> Theme {
    let plain = Style::default();
    let key = plain.with_attrs(Attr::INVERSE);
    let key_pressed = plain.with_attrs(Attr::INVERSE.union(Attr::BOLD));
    let pair = ButtonStyle {
        idle: key,
        pressed: key_pressed,
    };

    Theme {
        name: "terminal".to_owned(),
        backdrop: plain,
        display: plain.with_attrs(Attr::BOLD),
        hint: plain.with_attrs(Attr::DIM),
        digit: pair,
        operator: pair,
        control: pair,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
