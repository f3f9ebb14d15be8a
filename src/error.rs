//! Error taxonomy for the people loader
//!
//! Every variant is terminal for a run. The binary maps each one to a
//! process exit status with [`EtlError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    /// One or more required settings were absent or invalid
    #[error("Missing required environment variables: {}", missing.join(", "))]
    Configuration { missing: Vec<String> },

    /// The input file does not exist
    #[error("The file {} was not found", path.display())]
    SourceNotFound { path: PathBuf },

    /// The input file exists but is not well-formed CSV
    #[error("Failed to parse CSV file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A date of birth could not be turned into a calendar date
    #[error("Unparseable date_of_birth {value:?}")]
    DateParse { value: String },

    /// A column every row needs is absent after normalization
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// A transformed row does not fit the destination schema
    #[error("Row does not fit the destination table: {reason}")]
    InvalidRow { reason: String },

    /// Connectivity or execution failure talking to PostgreSQL
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EtlError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::SourceNotFound { .. } | Self::Csv { .. } => 3,
            Self::DateParse { .. } | Self::MissingColumn { .. } | Self::InvalidRow { .. } => 4,
            Self::Database(_) => 5,
        }
    }

    /// Exit status for an arbitrary report; anything that is not an
    /// [`EtlError`] exits with 1.
    pub fn exit_code_for(report: &eyre::Report) -> i32 {
        report
            .chain()
            .find_map(|cause| cause.downcast_ref::<EtlError>())
            .map_or(1, EtlError::exit_code)
    }
}
