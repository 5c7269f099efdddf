//! The on-disk representations loctable converts between.
//!
//! This module re-exports the table format and provides the
//! [`FormatType`] enum for generic format handling across the crate.

pub mod table;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the format for easier access
pub use table::Format as TableFormat;

use crate::Error;

/// Represents the two supported representations of a localization
/// dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Nested JSON document keyed by locale tag.
    Document,
    /// Delimiter-separated table with one row per dotted key path.
    Table,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use loctable::formats::FormatType;
/// assert_eq!(FormatType::Document.to_string(), "json");
/// assert_eq!(FormatType::Table.to_string(), "csv");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Document => write!(f, "json"),
            FormatType::Table => write!(f, "csv"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts the following case-insensitive strings:
/// - `"json"`, `"document"` → `FormatType::Document`
/// - `"csv"`, `"table"` → `FormatType::Table`
///
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" | "document" => Ok(FormatType::Document),
            "csv" | "table" => Ok(FormatType::Table),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Document => "json",
            FormatType::Table => "csv",
        }
    }

    /// Infers the format from a file path's extension, if recognized.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FormatType> {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("json") => Some(FormatType::Document),
            Some("csv") => Some(FormatType::Table),
            _ => None,
        }
    }
}
