//! # tally-theme — Presentation lookup tables for tally
//!
//! The keypad's semantic types (`Button`, `ButtonKind`) say what a key
//! *means*; this crate says what it *looks like*. A [`Theme`] maps each
//! button category to a resolved [`Style`] — idle and pressed variants —
//! plus the backdrop, the display readout, and the hint line. Colors
//! are terminal-ready `CellColor` values resolved at construction, so
//! the paint path does no color math.
//!
//! - **[`style`]** — `Style`, one resolved fg/bg/attrs triple
//! - **[`theme`]** — `Theme`, the category → style lookup
//! - **[`builtin`]** — named presets (`keypad-dark`, `keypad-light`,
//!   `terminal`)

pub mod builtin;
pub mod style;
pub mod theme;

pub use style::Style;
pub use theme::{ButtonStyle, Theme};
