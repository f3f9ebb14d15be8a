//! People ETL
//!
//! Reads a people CSV export, normalizes it and appends it to the
//! `people_data` table in PostgreSQL.

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod postgres;
pub mod record;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use config::{Config, DatabaseConfig};
pub use error::EtlError;
pub use etl::{Chain, Extractor, IdentityTransformer, Loader, Pipeline, Transformer};
pub use postgres::{Person, PostgresLoader};
pub use record::Record;
pub use storage::CsvReader;
pub use transform::PeopleTransformer;
