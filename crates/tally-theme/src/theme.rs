//! Theme assembly — the category → style lookup.
//!
//! A `Theme` holds one [`ButtonStyle`] per [`ButtonKind`] plus the
//! styles for the chrome around the pad (backdrop, display readout,
//! hint line). Button identity stays semantic; everything visual is
//! looked up here, which is what lets one keypad carry dark, light,
//! and plain-terminal renditions without touching the grid code.

use tally_engine::ButtonKind;

use crate::style::Style;

// ---------------------------------------------------------------------------
// ButtonStyle
// ---------------------------------------------------------------------------

/// The two faces of a button: at rest and during the press flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub idle: Style,
    pub pressed: Style,
}

impl ButtonStyle {
    /// A pair whose pressed face is the idle face with a lightened
    /// background.
    #[must_use]
    pub fn flash_lighter(idle: Style, amount: f32) -> Self {
        Self {
            idle,
            pressed: idle.lightened(amount),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A complete keypad theme, pre-resolved to terminal-ready styles.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Preset name (e.g. "keypad-dark").
    pub name: String,

    /// The area behind everything.
    pub backdrop: Style,
    /// The readout row showing the formatted number.
    pub display: Style,
    /// The one-line key hint at the bottom.
    pub hint: Style,

    /// Digits and the decimal point.
    pub digit: ButtonStyle,
    /// The four operators and equals.
    pub operator: ButtonStyle,
    /// Clear, sign toggle, percent.
    pub control: ButtonStyle,
}

impl Theme {
    /// The style for a button of the given category.
    #[must_use]
    pub const fn button_style(&self, kind: ButtonKind, pressed: bool) -> Style {
        let pair = match kind {
            ButtonKind::Digit => &self.digit,
            ButtonKind::Operator => &self.operator,
            ButtonKind::Control => &self.control,
        };
        if pressed {
            pair.pressed
        } else {
            pair.idle
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
