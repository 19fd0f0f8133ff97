// SPDX-License-Identifier: MIT
//
// Cell — the atomic unit of terminal rendering.
//
// Every character position on screen is a Cell: a character, foreground
// and background colors, and text attributes. The rendering pipeline's
// whole job is to produce a grid of these, diff it against the previous
// frame, and emit minimal ANSI for the changes.
//
// The keypad never paints wide (two-column) characters, so there is no
// continuation-cell machinery here: one cell, one column.

use crate::color::CellColor;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters.
    /// Combine with bitwise OR: `Attr::BOLD | Attr::DIM`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1 — increased intensity.
        const BOLD    = 1 << 0;
        /// SGR 2 — decreased intensity (faint).
        const DIM     = 1 << 1;
        /// SGR 3 — italic or oblique.
        const ITALIC  = 1 << 2;
        /// SGR 7 — swap foreground and background.
        const INVERSE = 1 << 3;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character shown at this position.
    pub ch: char,
    /// Foreground (text) color.
    pub fg: CellColor,
    /// Background color.
    pub bg: CellColor,
    /// Text attributes.
    pub attrs: Attr,
}

impl Cell {
    /// A blank cell: space, default colors, no attributes.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    /// A cell holding `ch` with default colors and no attributes.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            fg: CellColor::Default,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }

    /// A fully specified cell.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self { ch, fg, bg, attrs }
    }

    /// Whether this cell is visually blank (space on default background,
    /// no inverse attribute that would make the "blank" visible).
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.bg.is_default() && !self.attrs.contains(Attr::INVERSE)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
