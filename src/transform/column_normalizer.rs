//! Column name normalizer

use crate::etl::Transformer;
use crate::record::Record;
use eyre::Result;

/// Lowercase a column name and turn spaces, periods and hyphens into underscores
///
/// # Example
/// ```
/// use people_etl::transform::normalize_column;
///
/// assert_eq!(normalize_column("User Id"), "user_id");
/// assert_eq!(normalize_column("Date-of.Birth"), "date_of_birth");
/// ```
pub fn normalize_column(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '.' | '-' => '_',
            other => other,
        })
        .collect()
}

/// Transformer that normalizes every column name of a record
///
/// Column order is kept. When two source columns normalize to the same name
/// the later one wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for ColumnNormalizer {
    type Input = Record;
    type Output = Record;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(input
            .into_iter()
            .map(|(column, value)| (normalize_column(&column), value))
            .collect())
    }
}
