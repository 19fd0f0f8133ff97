// SPDX-License-Identifier: MIT
//
// Terminal colors.
//
// A cell carries fully resolved colors — whatever the theme wanted to
// compute (blending, brightness shifts) happens before the value lands
// here. The renderer only needs to know how to encode each variant as
// an SGR sequence, which `ansi.rs` handles.

use std::fmt;

/// A terminal-ready color for one cell.
///
/// `Default` means "whatever the terminal's configured default is" —
/// themes that want to blend in with the user's terminal use it for
/// both foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellColor {
    /// The terminal's default foreground/background.
    #[default]
    Default,
    /// An indexed color from the 256-color palette.
    ///
    /// Indices 0–7 and 8–15 are the classic ANSI colors and map to the
    /// compact SGR 30–37 / 90–97 encodings.
    Ansi256(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

impl CellColor {
    /// Shorthand constructor for an RGB color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Whether this is the terminal default.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// Scale an RGB color toward white by `amount` in `0.0..=1.0`.
    ///
    /// Used by themes to derive pressed-button variants from the idle
    /// color. `Default` and `Ansi256` pass through unchanged — there is
    /// no portable way to brighten an unknown terminal color.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        match self {
            Self::Rgb(r, g, b) => {
                let t = amount.clamp(0.0, 1.0);
                let lift = |c: u8| -> u8 {
                    let f = f32::from(c) + (255.0 - f32::from(c)) * t;
                    // f is clamped to 0.0..=255.0 by construction.
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    {
                        f.round() as u8
                    }
                };
                Self::Rgb(lift(r), lift(g), lift(b))
            }
            other => other,
        }
    }

    /// Scale an RGB color toward black by `amount` in `0.0..=1.0`.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        match self {
            Self::Rgb(r, g, b) => {
                let t = 1.0 - amount.clamp(0.0, 1.0);
                let drop = |c: u8| -> u8 {
                    let f = f32::from(c) * t;
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    {
                        f.round() as u8
                    }
                };
                Self::Rgb(drop(r), drop(g), drop(b))
            }
            other => other,
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_default() {
        assert!(CellColor::default().is_default());
        assert!(!CellColor::Rgb(0, 0, 0).is_default());
        assert!(!CellColor::Ansi256(1).is_default());
    }

    #[test]
    fn lighten_moves_toward_white() {
        let c = CellColor::Rgb(100, 100, 100).lighten(1.0);
        assert_eq!(c, CellColor::Rgb(255, 255, 255));
    }

    #[test]
    fn lighten_zero_is_identity() {
        let c = CellColor::Rgb(10, 20, 30);
        assert_eq!(c.lighten(0.0), c);
    }

    #[test]
    fn lighten_partial() {
        // 0 + (255 - 0) * 0.5 = 127.5 → rounds to 128.
        assert_eq!(CellColor::Rgb(0, 0, 0).lighten(0.5), CellColor::Rgb(128, 128, 128));
    }

    #[test]
    fn darken_moves_toward_black() {
        assert_eq!(CellColor::Rgb(100, 200, 50).darken(1.0), CellColor::Rgb(0, 0, 0));
    }

    #[test]
    fn darken_zero_is_identity() {
        let c = CellColor::Rgb(10, 20, 30);
        assert_eq!(c.darken(0.0), c);
    }

    #[test]
    fn lighten_leaves_default_alone() {
        assert_eq!(CellColor::Default.lighten(0.5), CellColor::Default);
        assert_eq!(CellColor::Ansi256(3).lighten(0.5), CellColor::Ansi256(3));
    }

    #[test]
    fn lighten_clamps_amount() {
        assert_eq!(CellColor::Rgb(0, 0, 0).lighten(2.0), CellColor::Rgb(255, 255, 255));
        let c = CellColor::Rgb(10, 20, 30);
        assert_eq!(c.lighten(-1.0), c);
    }

    #[test]
    fn display_formats() {
        assert_eq!(CellColor::Default.to_string(), "default");
        assert_eq!(CellColor::Ansi256(7).to_string(), "ansi(7)");
        assert_eq!(CellColor::Rgb(255, 159, 10).to_string(), "#ff9f0a");
    }
}
