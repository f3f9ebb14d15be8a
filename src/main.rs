use eyre::Result;
use people_etl::{Config, EtlError, cli::run_people_etl, config::load_dotenv};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Source .env before the logger so LOG_LEVEL can come from it
    let dotenv = load_dotenv();

    let env = env_logger::Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let result = match dotenv {
        Ok(loaded) => {
            if let Some(path) = loaded {
                log::debug!("Loaded environment from {}", path.display());
            }
            run().await
        }
        Err(e) => Err(e),
    };

    if let Err(report) = result {
        log::error!("{:#}", report);
        std::process::exit(EtlError::exit_code_for(&report));
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let today = chrono::Local::now().date_naive();
    run_people_etl(&config, today).await?;

    log::info!("ETL pipeline finished.");
    Ok(())
}
