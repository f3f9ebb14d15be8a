//! Entry points used by the binary

use crate::{
    config::Config,
    etl::Pipeline,
    postgres::PostgresLoader,
    storage::CsvReader,
    transform::PeopleTransformer,
};
use chrono::NaiveDate;
use eyre::Result;
use owo_colors::OwoColorize;

/// Run the people ETL once
///
/// Pipeline: CsvReader → PeopleTransformer → PostgresLoader
///
/// Transform and load are skipped when the file has no data rows. Ages are
/// computed relative to `today`.
///
/// Returns the number of rows inserted by this run.
pub async fn run_people_etl(config: &Config, today: NaiveDate) -> Result<usize> {
    log::debug!(
        "Loading {} into {}@{}:{}/{}",
        config.data_path.display().bright_black(),
        config.database.user,
        config.database.host,
        config.database.port,
        config.database.name
    );

    let pipeline = Pipeline::new(
        CsvReader::new(&config.data_path),
        PeopleTransformer::new(today),
        PostgresLoader::from_config(&config.database),
    );

    pipeline.run().await
}
