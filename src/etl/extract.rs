//! Extractor trait for reading rows from a source

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to read items from sources like:
/// - CSV files
/// - Databases
/// - In-memory fixtures
///
/// # Example
/// ```no_run
/// use people_etl::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for LineExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         let content = std::fs::read_to_string(&self.path)?;
///         Ok(content.lines().map(str::to_string).collect())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source, preserving source order
    ///
    /// # Errors
    /// Returns an error if extraction fails (missing file, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
