//! Resolved styles.
//!
//! A `Style` is one terminal-ready fg/bg/attrs triple. Whatever a theme
//! wanted to compute (brightness shifts for pressed buttons, contrast
//! picks) happens when the theme is built; by the time a `Style` exists
//! it is just three fields to copy into cells.

use tally_term::cell::Attr;
use tally_term::color::CellColor;

/// A resolved style for one UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Style {
    /// Foreground only, default background, no attributes.
    #[must_use]
    pub const fn fg_only(fg: CellColor) -> Self {
        Self {
            fg,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }

    /// Foreground and background, no attributes.
    #[must_use]
    pub const fn fg_bg(fg: CellColor, bg: CellColor) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::empty(),
        }
    }

    /// A copy of this style with the given attributes.
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    /// A copy with the background lightened toward white.
    ///
    /// How pressed variants are derived from idle ones on RGB themes.
    #[must_use]
    pub fn lightened(mut self, amount: f32) -> Self {
        self.bg = self.bg.lighten(amount);
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: CellColor::Default,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
