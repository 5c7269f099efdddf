//! This module provides the `TableCodec` struct and associated
//! functionality for converting a localization dataset between its two
//! representations: the nested JSON document keyed by locale tag, and the
//! flat delimiter-separated table with one column per locale.
//!
//! `TableCodec` holds the configured locale order (`en`, `fi` by
//! default), drives flattening and key-union computation on the way to a
//! table, and tree reconstruction on the way back. The module also
//! provides file-to-file conversion helpers with format inference from
//! file extensions.

use std::collections::HashSet;
use std::path::Path;

use unic_langid::LanguageIdentifier;

use crate::formats::table;
use crate::{
    error::Error,
    formats::FormatType,
    traits::Parser,
    types::{FlatMap, LocaleDocument, LocaleTree},
};

/// Locale order used when none is configured.
const DEFAULT_LOCALES: [&str; 2] = ["en", "fi"];

/// Header label of the key path column.
const KEY_LABEL: &str = "KEY";

/// Converts localization data between the document and table
/// representations for a fixed, ordered set of locale tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCodec {
    /// The locale tags, in column order.
    locales: Vec<String>,
}

impl TableCodec {
    /// Creates a codec for the default `en`/`fi` locale pair.
    pub fn new() -> Self {
        TableCodec {
            locales: DEFAULT_LOCALES.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    /// Creates a codec for an explicit, ordered set of locale tags.
    ///
    /// # Parameters
    /// - `locales`: the tags, primary locale first; this is both the
    ///   table's column order and the key-union scan order.
    ///
    /// # Returns
    ///
    /// The codec, or `Error::InvalidLocale` if a tag is not a valid
    /// language identifier, or `Error::DataMismatch` if no tags are
    /// given.
    pub fn with_locales<I, S>(locales: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        if locales.is_empty() {
            return Err(Error::data_mismatch("at least one locale tag is required"));
        }
        for tag in &locales {
            if tag.parse::<LanguageIdentifier>().is_err() {
                return Err(Error::InvalidLocale(tag.clone()));
            }
        }
        Ok(TableCodec { locales })
    }

    /// The configured locale tags, in column order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Encodes a document as table text.
    ///
    /// Each configured locale's tree is flattened (a locale missing from
    /// the document contributes nothing), the dotted paths are unioned in
    /// first-appearance order scanning locales in configured order, and
    /// one row is emitted per path. A locale with no value for a path
    /// gets the empty string, never a hole.
    ///
    /// # Returns
    ///
    /// The table text: a `KEY,EN,FI`-style header line followed by one
    /// newline-terminated row per path, all data fields double-quoted
    /// with embedded quotes doubled.
    pub fn encode(&self, document: &LocaleDocument) -> Result<String, Error> {
        let flattened: Vec<FlatMap> = self
            .locales
            .iter()
            .map(|tag| document.get(tag).map(LocaleTree::flatten).unwrap_or_default())
            .collect();

        let mut format = table::Format::with_labels(self.labels());
        for path in key_union(&flattened) {
            let values = flattened
                .iter()
                .map(|map| map.get(&path).unwrap_or("").to_string())
                .collect();
            format.add_row(table::Row { key: path, values });
        }
        format.to_text()
    }

    /// Decodes table text back into a document with one tree per
    /// configured locale.
    ///
    /// The first line is discarded as the header; each remaining row's
    /// key path is inserted into every locale's tree with that locale's
    /// column value. Missing trailing columns decode as empty strings and
    /// columns beyond the configured locales are ignored. Empty or
    /// whitespace-only text yields a document of empty trees.
    pub fn decode(&self, text: &str) -> Result<LocaleDocument, Error> {
        let mut trees: Vec<LocaleTree> = self.locales.iter().map(|_| LocaleTree::branch()).collect();

        if !text.trim().is_empty() {
            let format = table::Format::from_str(text)?;
            for row in &format.rows {
                for (index, tree) in trees.iter_mut().enumerate() {
                    let value = row.values.get(index).map(String::as_str).unwrap_or("");
                    tree.insert(&row.key, value);
                }
            }
        }

        let mut document = LocaleDocument::new();
        for (tag, tree) in self.locales.iter().zip(trees) {
            document.insert(tag.clone(), tree);
        }
        Ok(document)
    }

    /// Converts one file into another with explicit formats.
    ///
    /// # Parameters
    /// - `input`: path of the file to read.
    /// - `input_format`: representation of the input file.
    /// - `output`: path of the file to write.
    /// - `output_format`: representation to write.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success. An empty or whitespace-only table input file
    /// fails with `Error::EmptyInput` rather than producing an empty
    /// document.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        input_format: FormatType,
        output: Q,
        output_format: FormatType,
    ) -> Result<(), Error> {
        let document = match input_format {
            FormatType::Document => LocaleDocument::read_from(input)?,
            FormatType::Table => {
                let text = std::fs::read_to_string(input)?;
                if text.trim().is_empty() {
                    return Err(Error::EmptyInput);
                }
                self.decode(&text)?
            }
        };

        match output_format {
            FormatType::Document => document.write_to(output),
            FormatType::Table => {
                let text = self.encode(&document)?;
                std::fs::write(output, text).map_err(Error::Io)
            }
        }
    }

    /// Converts one file into another, inferring both formats from the
    /// file extensions (`.json` for documents, `.csv` for tables).
    pub fn convert_auto<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<(), Error> {
        let input_format = FormatType::from_path(&input).ok_or_else(|| {
            Error::UnknownFormat(format!(
                "Cannot infer input format from extension: {:?}",
                input.as_ref().extension()
            ))
        })?;
        let output_format = FormatType::from_path(&output).ok_or_else(|| {
            Error::UnknownFormat(format!(
                "Cannot infer output format from extension: {:?}",
                output.as_ref().extension()
            ))
        })?;
        self.convert(input, input_format, output, output_format)
    }

    /// Column labels for the header line: `KEY`, then one uppercased
    /// label per locale tag.
    fn labels(&self) -> Vec<String> {
        std::iter::once(KEY_LABEL.to_string())
            .chain(self.locales.iter().map(|tag| tag.to_uppercase()))
            .collect()
    }
}

impl Default for TableCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts one file into another with the default `en`/`fi` locale
/// pair, inferring both formats from the file extensions.
pub fn convert_auto<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<(), Error> {
    TableCodec::new().convert_auto(input, output)
}

/// Ordered union of every dotted path across the flattened locales,
/// first appearance wins.
fn key_union(flattened: &[FlatMap]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut union = Vec::new();
    for map in flattened {
        for (path, _) in map.iter() {
            if seen.insert(path) {
                union.push(path.to_string());
            }
        }
    }
    union
}
