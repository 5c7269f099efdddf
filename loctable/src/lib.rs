#![forbid(unsafe_code)]
//! Convert nested locale documents to and from translation tables.
//!
//! A localization dataset keyed by locale tag (`en`, `fi`, ...) with arbitrarily
//! nested message keys is flattened into dot-delimited paths and laid out as a
//! CSV-style table with one column per locale, and back again. All conversion
//! happens through the tagged [`LocaleTree`] model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use loctable::convert_auto;
//!
//! // en/fi JSON document -> translation table, and back
//! convert_auto("messages.json", "messages.csv")?;
//! convert_auto("messages.csv", "roundtrip.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Or drive the codec directly on in-memory data:
//!
//! ```rust
//! use loctable::{LocaleDocument, Parser, TableCodec};
//!
//! let document = LocaleDocument::from_str(r#"{"en": {"a": {"b": "hi"}}, "fi": {}}"#)?;
//! let table = TableCodec::new().encode(&document)?;
//! assert_eq!(table, "KEY,EN,FI\n\"a.b\",\"hi\",\"\"\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Representations
//!
//! - **Document**: a JSON object with one arbitrarily nested branch per locale;
//!   terminal values are scalars, stringified on parse.
//! - **Table**: line-oriented text with a `KEY,EN,FI`-style header and one
//!   double-quoted row per dotted key path.
//!
//! The table is inherently stringly-typed: converting a document to a table and
//! back yields string leaves everywhere, and does not restore numeric or
//! boolean typing.

pub mod codec;
pub mod error;
pub mod formats;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{TableCodec, convert_auto},
    error::Error,
    formats::FormatType,
    traits::Parser,
    types::{FlatMap, LocaleDocument, LocaleTree},
};
