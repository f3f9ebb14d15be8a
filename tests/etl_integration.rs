//! Integration tests for the people ETL without a database
//!
//! Runs the CSV reader and people transformer against real files and
//! collects the output with an in-memory loader.

use chrono::NaiveDate;
use eyre::Result;
use people_etl::etl::{Extractor, Loader, Pipeline, Transformer};
use people_etl::{CsvReader, EtlError, PeopleTransformer, Person, Record};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const HEADER: &str = "Index,User Id,First Name,Last Name,Sex,Email,Phone,Date of birth,Job Title";

/// Loader that keeps everything it receives
#[derive(Clone, Default)]
struct MemoryLoader {
    rows: Arc<Mutex<Vec<Person>>>,
}

impl Loader for MemoryLoader {
    type Item = Record;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        let people = items
            .into_iter()
            .map(Person::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        let count = people.len();
        self.rows.lock().unwrap().extend(people);
        Ok(count)
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

fn write_people_csv(dir: &Path, rows: usize) -> std::path::PathBuf {
    let mut content = format!("{}\n", HEADER);
    for i in 1..=rows {
        content.push_str(&format!(
            "{i},U{i:05},First{i},Last{i},{sex},person{i}@example.com,(555)123-{phone:04},{year}-06-15,Engineer\n",
            sex = if i % 2 == 0 { "Female" } else { "Male" },
            phone = i,
            year = 1950 + (i % 50),
        ));
    }
    let path = dir.join("people-100.csv");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_hundred_rows_through_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_people_csv(temp_dir.path(), 100);
    let loader = MemoryLoader::default();

    let pipeline = Pipeline::new(
        CsvReader::new(&path),
        PeopleTransformer::new(today()),
        loader.clone(),
    );
    let count = pipeline.run().await?;

    assert_eq!(count, 100);
    let rows = loader.rows.lock().unwrap();
    assert_eq!(rows.len(), 100);

    let first = &rows[0];
    assert_eq!(first.index, 1);
    assert_eq!(first.gender.as_deref(), Some("Male"));
    assert_eq!(first.phone.as_deref(), Some("1230001"));
    assert_eq!(first.date_of_birth, NaiveDate::from_ymd_opt(1951, 6, 15).unwrap());
    // 2024-06-14 is the day before the birthday
    assert_eq!(first.age, 72);

    for person in rows.iter() {
        let phone = person.phone.as_deref().unwrap();
        assert!(phone.chars().all(|c| c.is_ascii_digit()), "{phone}");
    }
    Ok(())
}

#[tokio::test]
async fn test_header_only_file_loads_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_people_csv(temp_dir.path(), 0);
    let loader = MemoryLoader::default();

    let pipeline = Pipeline::new(
        CsvReader::new(&path),
        PeopleTransformer::new(today()),
        loader.clone(),
    );

    assert_eq!(pipeline.run().await?, 0);
    assert!(loader.rows.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_source_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let loader = MemoryLoader::default();

    let pipeline = Pipeline::new(
        CsvReader::new(temp_dir.path().join("absent.csv")),
        PeopleTransformer::new(today()),
        loader.clone(),
    );

    let err = pipeline.run().await.unwrap_err();
    assert_eq!(EtlError::exit_code_for(&err), 3);
    assert!(loader.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_date_loads_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("people.csv");
    std::fs::write(
        &path,
        format!(
            "{}\n1,a1,Ada,Lovelace,Female,ada@example.com,555-000-1111,1815-12-10,Analyst\n\
             2,a2,Alan,Turing,Male,alan@example.com,555-000-2222,sometime,Mathematician\n",
            HEADER
        ),
    )?;
    let loader = MemoryLoader::default();

    let pipeline = Pipeline::new(
        CsvReader::new(&path),
        PeopleTransformer::new(today()),
        loader.clone(),
    );

    let err = pipeline.run().await.unwrap_err();
    assert_eq!(EtlError::exit_code_for(&err), 4);
    assert!(loader.rows.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_transformed_columns_are_normalized() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_people_csv(temp_dir.path(), 3);

    let records = CsvReader::new(&path).extract().await?;
    let transformed = PeopleTransformer::new(today()).transform_many(records)?;

    for record in &transformed {
        for column in record.keys() {
            assert!(
                !column.chars().any(|c| c.is_uppercase() || " .-".contains(c)),
                "column {column:?} is not normalized"
            );
        }
        assert!(record.contains_key("gender"));
        assert!(!record.contains_key("sex"));
        assert!(record.contains_key("age"));
    }

    // A second pass over already transformed rows still succeeds
    let again = PeopleTransformer::new(today()).transform_many(transformed)?;
    assert_eq!(again.len(), 3);
    Ok(())
}
