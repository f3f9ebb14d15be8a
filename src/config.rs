//! Runtime configuration
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file. Validation happens once, before any step of the run starts,
//! and reports every missing variable in a single error.

use crate::error::EtlError;
use sqlx::postgres::PgConnectOptions;
use std::path::{Path, PathBuf};

/// Path of the people export inside the container image
pub const DEFAULT_DATA_PATH: &str = "/app/data/people-100.csv";

/// PostgreSQL's standard port
pub const DEFAULT_DB_PORT: u16 = 5432;

const REQUIRED_VARS: [&str; 4] = ["DB_HOST", "DB_NAME", "DB_USER", "DB_PASSWORD"];

/// Connection settings for the destination database
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Build sqlx connection options from these settings
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Everything a run needs to know up front
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub data_path: PathBuf,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, EtlError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EtlError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EtlError::Configuration { missing });
        }

        let port = match get("DB_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| EtlError::Configuration {
                missing: vec![format!("DB_PORT (invalid port {:?})", raw)],
            })?,
            None => DEFAULT_DB_PORT,
        };

        let required = |key: &str| get(key).unwrap_or_default();
        Ok(Self {
            database: DatabaseConfig {
                host: required("DB_HOST"),
                port,
                name: required("DB_NAME"),
                user: required("DB_USER"),
                password: required("DB_PASSWORD"),
            },
            data_path: get("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
        })
    }
}

/// Source a `.env` file from the working directory (or a parent) if one exists
///
/// Returns the path that was loaded. Variables already present in the
/// environment are left untouched.
pub fn load_dotenv() -> eyre::Result<Option<PathBuf>> {
    dotenv_outcome(dotenvy::dotenv())
}

/// Source a specific env file if it exists
pub fn load_dotenv_file(path: impl AsRef<Path>) -> eyre::Result<Option<PathBuf>> {
    let path = path.as_ref();
    dotenv_outcome(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn dotenv_outcome(result: dotenvy::Result<PathBuf>) -> eyre::Result<Option<PathBuf>> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(eyre::eyre!("Failed to read .env file: {}", e)),
    }
}
