//! Phone number cleanup

use crate::etl::Transformer;
use crate::record::{Record, value_as_text};
use eyre::Result;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()x.\-]").unwrap());
static LEADING_PLUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+").unwrap());
static COUNTRY_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}").unwrap());

/// Clean a phone number
///
/// Removes every `(`, `)`, `x`, `.` and `-`, then one leading `+`, then the
/// first three digits if the text starts with three digits. The last step
/// treats those digits as a country code and is lossy for numbers without one.
///
/// # Example
/// ```
/// use people_etl::transform::normalize_phone;
///
/// assert_eq!(normalize_phone("(555)123-4567"), "1234567");
/// assert_eq!(normalize_phone("+1-234-567-8901x1234"), "45678901234");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let stripped = PUNCTUATION.replace_all(raw, "");
    let stripped = LEADING_PLUS.replace(&stripped, "");
    COUNTRY_CODE.replace(&stripped, "").into_owned()
}

/// Transformer that rewrites the `phone` column with [`normalize_phone`]
///
/// Values are coerced to text first: numbers use their decimal form and a
/// null or absent phone becomes empty text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneNormalizer;

impl PhoneNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for PhoneNormalizer {
    type Input = Record;
    type Output = Record;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let raw = input.get("phone").map(value_as_text).unwrap_or_default();
        input.insert("phone".to_string(), Value::String(normalize_phone(&raw)));
        Ok(input)
    }
}
