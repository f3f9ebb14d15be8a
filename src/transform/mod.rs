//! Transform implementations for people rows
//!
//! Each step is a standalone [`Transformer`](crate::etl::Transformer) over
//! [`Record`](crate::record::Record)s. [`PeopleTransformer`] chains them in
//! the order the loader expects.

mod age_calculator;
mod column_normalizer;
mod column_renamer;
mod people;
mod phone_normalizer;

pub use age_calculator::{AgeCalculator, completed_years, parse_birth_date};
pub use column_normalizer::{ColumnNormalizer, normalize_column};
pub use column_renamer::ColumnRenamer;
pub use people::PeopleTransformer;
pub use phone_normalizer::{PhoneNormalizer, normalize_phone};
