//! Typed people row

use crate::error::EtlError;
use crate::record::{Record, value_as_text};
use chrono::NaiveDate;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// One row of `people_data`, in table column order
///
/// Built from a transformed [`Record`]. Text columns accept any JSON scalar
/// and store its text form; `null` or an absent column becomes SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    #[serde(deserialize_with = "integer")]
    pub index: i32,
    #[serde(default, alias = "userid", deserialize_with = "text")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    #[serde(default, deserialize_with = "text")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "integer")]
    pub age: i32,
}

impl Person {
    /// Convert a transformed record, ignoring columns the table does not have
    pub fn from_record(record: Record) -> Result<Self, EtlError> {
        serde_json::from_value(Value::Object(record)).map_err(|e| EtlError::InvalidRow {
            reason: e.to_string(),
        })
    }
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_as_text(&other)),
    })
}

fn integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let wide = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    wide.and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("expected a 32-bit integer, found {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    fn transformed() -> Value {
        json!({
            "index": 7,
            "user_id": "88F7B33d2bFf08d",
            "first_name": "Shelby",
            "last_name": "Terrell",
            "gender": "Male",
            "email": "elijah57@example.net",
            "phone": "1234567",
            "date_of_birth": "1945-10-26",
            "job_title": "Games developer",
            "age": 78
        })
    }

    #[test]
    fn test_from_transformed_record() {
        let person = Person::from_record(record(transformed())).unwrap();
        assert_eq!(person.index, 7);
        assert_eq!(person.user_id.as_deref(), Some("88F7B33d2bFf08d"));
        assert_eq!(person.gender.as_deref(), Some("Male"));
        assert_eq!(
            person.date_of_birth,
            NaiveDate::from_ymd_opt(1945, 10, 26).unwrap()
        );
        assert_eq!(person.age, 78);
    }

    #[test]
    fn test_userid_alias_and_numeric_text() {
        let mut value = transformed();
        let obj = value.as_object_mut().unwrap();
        let id = obj.remove("user_id").unwrap();
        obj.insert("userid".to_string(), id);
        obj.insert("first_name".to_string(), json!(42));
        obj.insert("index".to_string(), json!("8"));

        let person = Person::from_record(record(value)).unwrap();
        assert_eq!(person.user_id.as_deref(), Some("88F7B33d2bFf08d"));
        assert_eq!(person.first_name.as_deref(), Some("42"));
        assert_eq!(person.index, 8);
    }

    #[test]
    fn test_null_and_missing_text_become_none() {
        let mut value = transformed();
        let obj = value.as_object_mut().unwrap();
        obj.insert("email".to_string(), Value::Null);
        obj.remove("job_title");

        let person = Person::from_record(record(value)).unwrap();
        assert_eq!(person.email, None);
        assert_eq!(person.job_title, None);
    }

    #[test]
    fn test_untransformed_record_is_invalid() {
        let mut value = transformed();
        value.as_object_mut().unwrap().remove("age");
        let err = Person::from_record(record(value)).unwrap_err();
        assert!(matches!(err, EtlError::InvalidRow { .. }));
    }

    #[test]
    fn test_out_of_range_index_is_invalid() {
        let mut value = transformed();
        value["index"] = json!(10_000_000_000_i64);
        assert!(Person::from_record(record(value)).is_err());
    }
}
