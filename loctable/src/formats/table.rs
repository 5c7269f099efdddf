//! Support for the delimiter-separated table representation.
//!
//! The first line is a header (`KEY` plus one column label per locale);
//! every following line carries one dotted key path and its translations.
//! Serialization wraps every field in double quotes with embedded quotes
//! doubled; parsing accepts quoted and unquoted fields alike. Newlines
//! inside fields are not supported, since input is split by line.

use std::io::BufRead;

use crate::{error::Error, traits::Parser};

/// One table line: a dotted key path plus its translations in column
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub values: Vec<String>,
}

/// A parsed translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Column labels from the header line, `KEY` first. Carried through
    /// for serialization; decoding maps value columns by position, never
    /// by label.
    pub labels: Vec<String>,
    /// All data rows, in input order.
    pub rows: Vec<Row>,
}

impl Format {
    /// Creates an empty table with the given header labels.
    pub fn with_labels(labels: Vec<String>) -> Self {
        Format {
            labels,
            rows: Vec::new(),
        }
    }

    /// Adds a row to the table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

impl Parser for Format {
    /// Parse from any reader.
    ///
    /// The first line is always treated as the header; its content is
    /// recorded in `labels` but not validated. Blank lines and rows with
    /// an empty key column are skipped.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut format = Format::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if index == 0 {
                format.labels = tokenize_row(&line);
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = tokenize_row(&line).into_iter();
            let key = fields.next().unwrap_or_default();
            if key.is_empty() {
                continue;
            }
            format.rows.push(Row {
                key,
                values: fields.collect(),
            });
        }
        Ok(format)
    }

    /// Write to any writer (file, memory, etc.).
    ///
    /// The header line is written as-is; every data field is quoted.
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writeln!(writer, "{}", self.labels.join(","))?;
        for row in &self.rows {
            let mut fields = Vec::with_capacity(row.values.len() + 1);
            fields.push(quote_field(&row.key));
            fields.extend(row.values.iter().map(|value| quote_field(value)));
            writeln!(writer, "{}", fields.join(","))?;
        }
        Ok(())
    }
}

/// Splits one table line into its fields.
///
/// A two-state scan: a `"` toggles quoting, a doubled `""` inside a
/// quoted run emits one literal quote, and a `,` terminates the current
/// field only while unquoted. Fields are trimmed of surrounding
/// whitespace when flushed, and the final field is flushed even if empty.
pub fn tokenize_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !quoted => quoted = true,
            '"' => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            ',' if !quoted => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }

    fields.push(field.trim().to_string());
    fields
}

/// Wraps a field in double quotes, doubling any quotes it contains.
fn quote_field(field: &str) -> String {
    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for c in field.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
