//! Full normalization for people rows

use super::{AgeCalculator, ColumnNormalizer, ColumnRenamer, PhoneNormalizer};
use crate::etl::{Chain, Transformer};
use crate::record::Record;
use chrono::NaiveDate;
use eyre::Result;

type Steps = Chain<Chain<Chain<ColumnNormalizer, ColumnRenamer>, AgeCalculator>, PhoneNormalizer>;

/// Transformer applying every people normalization step
///
/// Pipeline: ColumnNormalizer → ColumnRenamer(sex → gender) → AgeCalculator → PhoneNormalizer
///
/// Deterministic for a fixed `today`; pass the current local date in production.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use people_etl::etl::Transformer;
/// use people_etl::transform::PeopleTransformer;
/// use serde_json::json;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let row = json!({
///     "Index": 1,
///     "Sex": "Female",
///     "Phone": "(555)123-4567",
///     "Date of birth": "1990-06-15"
/// });
///
/// let out = PeopleTransformer::new(today)
///     .transform(row.as_object().unwrap().clone())
///     .unwrap();
/// assert_eq!(out["gender"], "Female");
/// assert_eq!(out["phone"], "1234567");
/// assert_eq!(out["age"], 33);
/// ```
pub struct PeopleTransformer {
    steps: Steps,
}

impl PeopleTransformer {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            steps: ColumnNormalizer::new()
                .then(ColumnRenamer::sex_to_gender())
                .then(AgeCalculator::new(today))
                .then(PhoneNormalizer::new()),
        }
    }
}

impl Transformer for PeopleTransformer {
    type Input = Record;
    type Output = Record;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        self.steps.transform(input)
    }

    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        log::info!("Step 2: Transforming data...");
        let outputs = self.steps.transform_many(inputs)?;
        log::info!("Transformation successful.");
        Ok(outputs)
    }
}
