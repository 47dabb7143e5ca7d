//! Catalog loading for marquee
//!
//! The catalog is a UTF-8 delimited text file mapping program identifiers
//! to executable commands and icon references:
//!
//! ```text
//! "desktop_file","exec","icon"
//! "supertux.desktop","supertux2 --fullscreen","supertux"
//! ```
//!
//! The first line is a header and is discarded. Fields are separated by the
//! literal sequence `","` with one leading and one trailing quote per row;
//! embedded quotes and commas are not supported. Rows that do not yield
//! three fields are skipped, not fatal. A built-in deny list of identifiers
//! is always excluded.

mod entry;
mod names;
mod parse;

pub use entry::*;
pub use names::*;
pub use parse::*;

use thiserror::Error;

/// Identifiers excluded from the catalog regardless of file content
pub const BUILTIN_DENY_LIST: &[&str] = &["asciijump.desktop", "blastem.desktop"];

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
