//! Keypad buttons.
//!
//! A [`Button`] is the semantic identity of one key on the pad — what
//! it *means*, not what it looks like. How a button is colored is a
//! presentation concern and lives in a separate lookup keyed by
//! [`ButtonKind`], so the same identity can be styled by any theme.

use std::fmt;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// One button on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// A digit key, `0..=9`.
    Digit(u8),
    /// The decimal point.
    Decimal,
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    /// All-clear: reset to the initial state.
    Clear,
    /// Sign toggle. Accepted but currently inert.
    Negate,
    /// Percent. Accepted but currently inert.
    Percent,
}

/// Every button on the pad, in layout order. Used by the grid and by
/// tests that need to cover the full set.
pub const ALL_BUTTONS: [Button; 19] = [
    Button::Clear,
    Button::Negate,
    Button::Percent,
    Button::Divide,
    Button::Digit(7),
    Button::Digit(8),
    Button::Digit(9),
    Button::Multiply,
    Button::Digit(4),
    Button::Digit(5),
    Button::Digit(6),
    Button::Subtract,
    Button::Digit(1),
    Button::Digit(2),
    Button::Digit(3),
    Button::Add,
    Button::Digit(0),
    Button::Decimal,
    Button::Equals,
];

impl Button {
    /// The label shown on the button face.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Digit(0) => "0",
            Self::Digit(1) => "1",
            Self::Digit(2) => "2",
            Self::Digit(3) => "3",
            Self::Digit(4) => "4",
            Self::Digit(5) => "5",
            Self::Digit(6) => "6",
            Self::Digit(7) => "7",
            Self::Digit(8) => "8",
            Self::Digit(9) => "9",
            Self::Digit(_) => "?",
            Self::Decimal => ".",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Equals => "=",
            Self::Clear => "AC",
            Self::Negate => "±",
            Self::Percent => "%",
        }
    }

    /// The button's semantic category, the key into a theme's style
    /// lookup.
    #[must_use]
    pub const fn kind(self) -> ButtonKind {
        match self {
            Self::Digit(_) | Self::Decimal => ButtonKind::Digit,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Equals => {
                ButtonKind::Operator
            }
            Self::Clear | Self::Negate | Self::Percent => ButtonKind::Control,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ButtonKind
// ---------------------------------------------------------------------------

/// Semantic category of a button, independent of styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Digits and the decimal point.
    Digit,
    /// The four arithmetic operators and equals.
    Operator,
    /// Clear, sign toggle, percent.
    Control,
}

impl ButtonKind {
    /// All categories, for exhaustive lookups and tests.
    pub const ALL: [Self; 3] = [Self::Digit, Self::Operator, Self::Control];
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
