//! Birth date parsing and age derivation

use crate::error::EtlError;
use crate::etl::Transformer;
use crate::record::{Record, value_as_text};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use eyre::Result;
use serde_json::Value;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a date of birth in any of the accepted layouts
///
/// Accepts plain dates (`1990-06-15`, `1990/06/15`, `06/15/1990`,
/// `June 15, 1990`, `15 June 1990`), naive datetimes and RFC 3339
/// timestamps. Time components are dropped.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Number of birthdays completed between `birth` and `today`
///
/// One less than the difference in years while `today`'s (month, day)
/// is still before the birthday.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use people_etl::transform::completed_years;
///
/// let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
/// let eve = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(completed_years(birth, eve), 33);
/// assert_eq!(completed_years(birth, birthday), 34);
/// ```
pub fn completed_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(before_birthday)
}

/// Transformer that rewrites `date_of_birth` as an ISO date and appends `age`
///
/// Any row whose date of birth is missing, unparseable or after `today`
/// fails the transform.
#[derive(Debug, Clone, Copy)]
pub struct AgeCalculator {
    today: NaiveDate,
}

impl AgeCalculator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Transformer for AgeCalculator {
    type Input = Record;
    type Output = Record;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let raw = input
            .get("date_of_birth")
            .ok_or_else(|| EtlError::MissingColumn {
                column: "date_of_birth".to_string(),
            })
            .map(value_as_text)?;

        let birth = parse_birth_date(&raw)
            .filter(|birth| *birth <= self.today)
            .ok_or(EtlError::DateParse { value: raw })?;

        input.insert(
            "date_of_birth".to_string(),
            Value::String(birth.format("%Y-%m-%d").to_string()),
        );
        input.insert(
            "age".to_string(),
            Value::from(completed_years(birth, self.today)),
        );
        Ok(input)
    }
}
