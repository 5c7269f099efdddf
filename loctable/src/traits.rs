//! Traits for representation-agnostic reading and writing in loctable.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one representation of a localization
/// dataset from/to one file.
///
/// Implementors only provide [`Parser::from_reader`] and
/// [`Parser::to_writer`]; the path and string helpers are derived, so the
/// conversion core itself never touches the filesystem.
///
/// # Example
///
/// ```rust,no_run
/// use loctable::traits::Parser;
/// let table = loctable::formats::table::Format::read_from("messages.csv")?;
/// table.write_to("messages_copy.csv")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Serialize to an in-memory string.
    fn to_text(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::DataMismatch(format!("serialized output is not UTF-8: {e}")))
    }
}
