//! File system storage operations
//!
//! Reading the tabular people export from disk.

mod csv_file;

pub use csv_file::CsvReader;
