//! CSV file extraction

use crate::error::EtlError;
use crate::etl::Extractor;
use crate::record::{Record, infer_value};

use eyre::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Read a headed CSV file into records
///
/// Column names and order come from the header row. Every data row becomes
/// one [`Record`].
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all data rows
    ///
    /// # Errors
    /// [`EtlError::SourceNotFound`] when the file is absent, [`EtlError::Csv`]
    /// when it cannot be parsed.
    pub fn read(&self) -> Result<Vec<Record>, EtlError> {
        self.read_with_columns().map(|(_, records)| records)
    }

    /// Read the header names and all data rows
    ///
    /// The header is returned even when the file has no data rows.
    pub fn read_with_columns(&self) -> Result<(Vec<String>, Vec<Record>), EtlError> {
        if !self.path.is_file() {
            return Err(EtlError::SourceNotFound {
                path: self.path.clone(),
            });
        }

        let csv_error = |source| EtlError::Csv {
            path: self.path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(csv_error)?;

        let headers = reader.headers().map_err(csv_error)?.clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();

        let records = reader
            .records()
            .map(|row| -> Result<Record, EtlError> {
                let row = row.map_err(csv_error)?;
                Ok(headers
                    .iter()
                    .zip(row.iter())
                    .map(|(column, cell)| (column.to_string(), infer_value(cell)))
                    .collect())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((columns, records))
    }
}

impl Extractor for CsvReader {
    type Item = Record;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        log::info!("Step 1: Extracting data from CSV...");
        let (columns, records) = self.read_with_columns()?;
        log::info!(
            "Extraction successful. Shape: ({}, {}) from {}",
            records.len(),
            columns.len(),
            self.path().display().bright_black()
        );
        Ok(records)
    }
}
