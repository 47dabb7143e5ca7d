//! Shared utilities for the marquee launcher
//!
//! This crate provides:
//! - ID types (EntryId, SessionId)
//! - Error types

mod error;
mod ids;

pub use error::*;
pub use ids::*;
