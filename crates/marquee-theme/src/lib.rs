//! Tile color derivation and accent theming for marquee
//!
//! Each tile gets a muted background computed from its icon: downscale,
//! average the opaque-ish pixels, then darken. The per-tile colors are also
//! pooled so the status bar can pick one and boost it into an accent.

mod accent;
mod color;

pub use accent::*;
pub use color::*;
