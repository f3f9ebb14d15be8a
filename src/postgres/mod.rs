//! PostgreSQL destination for people rows
//!
//! [`Person`] is the typed form of a transformed row and [`PostgresLoader`]
//! writes those rows into the `people_data` table.

mod loader;
mod person;

pub use loader::{CREATE_TABLE_SQL, MAX_ROWS_PER_INSERT, PEOPLE_TABLE, PostgresLoader};
pub use person::Person;
