//! Letter repository for reading the correspondence table.

use std::fs::File;
use std::path::Path;

use crate::context::Context;
use crate::error::AppError;
use crate::models::Letter;

use super::read_rows;

/// Reads letters from a delimited table with a header line.
///
/// Required columns: subject_name, object_name, illocution, letter_date,
/// dispatch, receipt. A missing column fails the whole read.
#[derive(Clone)]
pub struct LetterRepository {
    delimiter: u8,
}

impl LetterRepository {
    /// Repository using the configured input delimiter.
    pub fn new(ctx: &Context) -> Result<Self, AppError> {
        Ok(Self::with_delimiter(ctx.config.input_delimiter()?))
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load every letter from `path`.
    pub fn load(&self, path: &Path) -> Result<Vec<Letter>, AppError> {
        let letters = self.read(File::open(path)?)?;
        tracing::info!("Loaded {} letters from {}", letters.len(), path.display());
        Ok(letters)
    }

    /// Read letters from any reader.
    pub fn read<R: std::io::Read>(&self, reader: R) -> Result<Vec<Letter>, AppError> {
        read_rows(reader, self.delimiter)
    }
}
