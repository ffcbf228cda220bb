//! Data access layer for the delimited tables.
//!
//! Repositories read the letter table and read/write the semicolon-delimited
//! UTF-8 triple and degree tables. Services never touch the filesystem for
//! tables directly.

mod degree;
mod letter;
mod triple;

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppError;

pub use degree::DegreeRepository;
pub use letter::LetterRepository;
pub use triple::TripleRepository;

/// Delimiter of every table this crate writes.
pub const OUTPUT_DELIMITER: u8 = b';';

/// Make a value safe to use as one file-name component.
pub fn sanitize_file_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

/// Write rows with a header line to `path`.
fn write_rows<'a, T, I>(path: &Path, rows: I) -> Result<(), AppError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(OUTPUT_DELIMITER)
        .from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read every row of a table with a header line.
fn read_rows<T, R>(reader: R, delimiter: u8) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned,
    R: std::io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(AppError::from)
}
