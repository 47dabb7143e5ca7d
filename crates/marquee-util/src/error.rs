//! Error types shared across the marquee crates
//!
//! Layer-specific failures stay in their own crates (`ConfigError`,
//! `CatalogError`, `HostError`); this crate only carries errors that
//! cross those boundaries.

use thiserror::Error;

use crate::EntryId;

#[derive(Debug, Error)]
pub enum MarqueeError {
    /// A launch was requested for an entry the catalog does not contain
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),
}

pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_not_found_names_the_entry() {
        let err = MarqueeError::EntryNotFound(EntryId::new("missing.desktop"));
        assert_eq!(err.to_string(), "Entry not found: missing.desktop");
    }
}
