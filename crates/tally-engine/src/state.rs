//! The input/display state machine.
//!
//! [`CalcState`] turns a sequence of button presses into the numeral
//! buffer shown on the display. Four fields carry everything: the
//! buffer being typed, the operand stored when an operator was pressed,
//! the pending operation, and a flag saying whether the last press was
//! a digit (append to the current number vs start a new one).
//!
//! Two behaviors are deliberate quirks inherited from the device this
//! models, not bugs to fix:
//!
//! - The decimal point is staged through the *same* pending slot as the
//!   operators, so pressing `.` while an operator is staged silently
//!   discards that operator. Pressing `.` with no digit after it leaves
//!   the stage set until a digit or clear arrives.
//! - Equals leaves both the pending operation and the stored operand in
//!   place, so a second equals recomputes against the old operand.

use tracing::debug;

use crate::button::Button;
use crate::eval;
use crate::format::{self, ERROR_TEXT};

// ---------------------------------------------------------------------------
// PendingOp
// ---------------------------------------------------------------------------

/// What is staged to happen when equals arrives.
///
/// `Decimal` rides in the same slot as the operators: it means the next
/// digit press appends a decimal point first. Staging it overwrites any
/// staged operator, and vice versa.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingOp {
    /// Nothing staged.
    #[default]
    None,
    Add,
    Subtract,
    Multiply,
    Divide,
    /// The next digit press appends `.` before the digit.
    Decimal,
}

// ---------------------------------------------------------------------------
// CalcState
// ---------------------------------------------------------------------------

/// The calculator's complete state.
///
/// Owned by the application; one instance per session. [`press`](Self::press)
/// is the only mutator besides construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcState {
    /// The number being entered or displayed, or the error sentinel.
    buffer: String,
    /// Left-hand operand, captured when an operator is pressed.
    stored: f64,
    /// The staged operation.
    pending: PendingOp,
    /// True when the most recent press was a digit.
    last_was_digit: bool,
}

impl CalcState {
    /// A fresh calculator: `"0"` on the display, nothing staged.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: "0".to_owned(),
            stored: 0.0,
            pending: PendingOp::None,
            last_was_digit: false,
        }
    }

    /// The raw numeral buffer (unformatted).
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The stored left-hand operand.
    #[must_use]
    pub const fn stored(&self) -> f64 {
        self.stored
    }

    /// The staged operation.
    #[must_use]
    pub const fn pending(&self) -> PendingOp {
        self.pending
    }

    /// Whether the most recent press was a digit.
    #[must_use]
    pub const fn last_was_digit(&self) -> bool {
        self.last_was_digit
    }

    /// The formatted display string for the current buffer.
    #[must_use]
    pub fn display(&self) -> String {
        format::display(&self.buffer)
    }

    /// Feed one button press through the machine.
    pub fn press(&mut self, button: Button) {
        debug!(button = %button, buffer = %self.buffer, pending = ?self.pending, "press");

        match button {
            Button::Digit(d) => {
                self.press_digit(d);
                // Digits are the one path that leaves the flag set.
                self.last_was_digit = true;
                return;
            }
            Button::Decimal => {
                self.pending = PendingOp::Decimal;
            }
            Button::Add => self.stage_operator(PendingOp::Add),
            Button::Subtract => self.stage_operator(PendingOp::Subtract),
            Button::Multiply => self.stage_operator(PendingOp::Multiply),
            Button::Divide => self.stage_operator(PendingOp::Divide),
            Button::Equals => self.compute(),
            Button::Clear => {
                *self = Self::new();
                return;
            }
            // Inert placeholders: accepted, no state change at all.
            Button::Negate | Button::Percent => return,
        }

        self.last_was_digit = false;
    }

    /// Digit entry. A pending decimal appends `.` first; otherwise the
    /// digit either continues the current number or starts a new one —
    /// which is also how the display recovers after an error.
    fn press_digit(&mut self, d: u8) {
        if self.pending == PendingOp::Decimal {
            self.buffer.push('.');
            self.buffer.push_str(Button::Digit(d).label());
            self.pending = PendingOp::None;
        } else if self.last_was_digit {
            self.buffer.push_str(Button::Digit(d).label());
        } else {
            self.buffer = Button::Digit(d).label().to_owned();
        }
    }

    /// Capture the left operand and stage the operator. No computation
    /// happens here; a later operator simply overwrites an earlier one.
    fn stage_operator(&mut self, op: PendingOp) {
        self.stored = self.buffer.parse().unwrap_or(0.0);
        self.pending = op;
    }

    /// Equals: apply the staged operation to (stored, current buffer).
    ///
    /// The result replaces the buffer. The pending operation and the
    /// stored operand are left untouched. Nothing staged (or a pending
    /// decimal) makes equals a no-op.
    fn compute(&mut self) {
        let current: f64 = self.buffer.parse().unwrap_or(0.0);

        let result = match self.pending {
            PendingOp::Add => eval::add(self.stored, current),
            PendingOp::Subtract => eval::subtract(self.stored, current),
            PendingOp::Multiply => eval::multiply(self.stored, current),
            PendingOp::Divide => match eval::divide(self.stored, current) {
                Ok(quotient) => quotient,
                Err(err) => {
                    debug!(%err, "compute failed");
                    self.buffer = ERROR_TEXT.to_owned();
                    return;
                }
            },
            PendingOp::None | PendingOp::Decimal => return,
        };

        debug!(stored = self.stored, current, result, "computed");
        self.buffer = result.to_string();
    }
}

impl Default for CalcState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
