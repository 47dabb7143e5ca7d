//! Core logic for the marquee launcher
//!
//! This crate owns the parts with real state-machine and algorithmic
//! content: the per-entry launch session lifecycle, the grid placement
//! math, and the search-visibility predicate. It is UI-free; the GTK
//! front end consumes it.

mod engine;
mod events;
mod filter;
mod layout;
mod session;

pub use engine::*;
pub use events::*;
pub use filter::*;
pub use layout::*;
pub use session::*;
