//! PostgreSQL loader for the `people_data` table

use super::Person;
use crate::config::DatabaseConfig;
use crate::error::EtlError;
use crate::etl::Loader;
use crate::record::Record;

use eyre::{Result, WrapErr};
use owo_colors::OwoColorize;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, QueryBuilder};

/// Destination table name
pub const PEOPLE_TABLE: &str = "people_data";

/// Schema of the destination table, created when absent
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS people_data (
    index INT,
    user_id VARCHAR(255),
    first_name VARCHAR(255),
    last_name VARCHAR(255),
    gender VARCHAR(50),
    email VARCHAR(255),
    phone VARCHAR(255),
    date_of_birth DATE,
    job_title VARCHAR(255),
    age INT
)";

const INSERT_PREFIX: &str = "INSERT INTO people_data (index, user_id, first_name, last_name, gender, email, phone, date_of_birth, job_title, age) ";

/// Rows per INSERT statement; 10 binds per row keeps this under the
/// 65535 bind-parameter limit of the Postgres protocol.
pub const MAX_ROWS_PER_INSERT: usize = 1000;

/// Loader that appends people rows to `people_data`
///
/// Each load:
/// 1. converts every record into a [`Person`] (before touching the database)
/// 2. opens one connection
/// 3. creates the table if absent, committed on its own
/// 4. inserts all rows in multi-row batches inside a single transaction
/// 5. commits, then reads back the table's total row count
///
/// The connection is closed on every exit path. If any batch fails the
/// transaction is rolled back and no row from this load is kept. Rows are
/// never deduplicated, so loading the same file twice stores it twice.
///
/// # Example
/// ```no_run
/// use people_etl::config::Config;
/// use people_etl::etl::Loader;
/// use people_etl::postgres::PostgresLoader;
///
/// # async fn example(records: Vec<people_etl::record::Record>) -> eyre::Result<()> {
/// let config = Config::from_env()?;
/// let loader = PostgresLoader::from_config(&config.database);
/// let inserted = loader.load(records).await?;
/// # Ok(())
/// # }
/// ```
pub struct PostgresLoader {
    options: PgConnectOptions,
    batch_size: usize,
}

impl PostgresLoader {
    /// Create a loader for the given connection options
    pub fn new(options: PgConnectOptions) -> Self {
        Self {
            options,
            batch_size: MAX_ROWS_PER_INSERT,
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.connect_options())
    }

    /// Set rows per INSERT statement, clamped to `1..=MAX_ROWS_PER_INSERT`
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_ROWS_PER_INSERT);
        self
    }

    /// Open a dedicated connection
    pub async fn connect(&self) -> Result<PgConnection, EtlError> {
        Ok(PgConnection::connect_with(&self.options).await?)
    }

    /// Create `people_data` if it does not exist yet
    pub async fn ensure_table(conn: &mut PgConnection) -> Result<(), EtlError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&mut *conn).await?;
        log::debug!("Ensured table {} exists", PEOPLE_TABLE);
        Ok(())
    }

    /// Total rows currently stored in `people_data`
    pub async fn count_rows(conn: &mut PgConnection) -> Result<i64, EtlError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people_data")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    /// Insert all people in one transaction
    ///
    /// Returns the number of rows inserted. On error the transaction is
    /// dropped uncommitted, which rolls it back.
    pub async fn insert_all(
        &self,
        conn: &mut PgConnection,
        people: &[Person],
    ) -> Result<u64, EtlError> {
        let mut tx = conn.begin().await?;
        let mut inserted = 0;

        for batch in people.chunks(self.batch_size) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(INSERT_PREFIX);
            builder.push_values(batch, |mut row, person| {
                row.push_bind(person.index)
                    .push_bind(person.user_id.clone())
                    .push_bind(person.first_name.clone())
                    .push_bind(person.last_name.clone())
                    .push_bind(person.gender.clone())
                    .push_bind(person.email.clone())
                    .push_bind(person.phone.clone())
                    .push_bind(person.date_of_birth)
                    .push_bind(person.job_title.clone())
                    .push_bind(person.age);
            });

            let result = builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected();
            log::debug!("Inserted batch of {} rows", batch.len());
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn write(
        &self,
        conn: &mut PgConnection,
        people: &[Person],
    ) -> Result<(u64, i64), EtlError> {
        Self::ensure_table(conn).await?;
        let inserted = self.insert_all(conn, people).await?;
        let total = Self::count_rows(conn).await?;
        Ok((inserted, total))
    }
}

impl Loader for PostgresLoader {
    type Item = Record;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        log::info!("Step 3: Loading data into PostgreSQL...");

        let people = items
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                Person::from_record(record)
                    .wrap_err_with(|| format!("Failed to load row {}", i + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.connect().await?;
        let outcome = self.write(&mut conn, &people).await;

        if let Err(e) = conn.close().await {
            log::warn!("Failed to close database connection: {}", e);
        }

        let (inserted, total) = outcome?;
        log::info!(
            "Loading successful. Data inserted into '{}' table.",
            PEOPLE_TABLE.cyan()
        );
        log::info!("Total rows in table: {}", total);

        Ok(inserted as usize)
    }
}
