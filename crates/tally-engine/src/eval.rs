//! Arithmetic over operand pairs.
//!
//! Plain IEEE double-precision semantics, so results carry ordinary
//! floating-point rounding (`0.1 + 0.2` is not exactly `0.3`). The one
//! place this module deviates from raw IEEE is division: a zero divisor
//! is reported as an error instead of producing ±inf or NaN, because a
//! calculator display has no honest way to show those.

use thiserror::Error;

/// An operation that has no representable numeric result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The divisor was exactly zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// `lhs + rhs`.
#[inline]
#[must_use]
pub fn add(lhs: f64, rhs: f64) -> f64 {
    lhs + rhs
}

/// `lhs - rhs`.
#[inline]
#[must_use]
pub fn subtract(lhs: f64, rhs: f64) -> f64 {
    lhs - rhs
}

/// `lhs * rhs`.
#[inline]
#[must_use]
pub fn multiply(lhs: f64, rhs: f64) -> f64 {
    lhs * rhs
}

/// `lhs / rhs`, unless `rhs` is exactly zero.
///
/// # Errors
///
/// Returns [`EvalError::DivisionByZero`] when `rhs == 0.0` (including
/// negative zero, which compares equal).
pub fn divide(lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    if rhs == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(lhs / rhs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
