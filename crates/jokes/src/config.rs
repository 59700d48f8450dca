use crate::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Public JokeAPI v2 endpoint
pub const DEFAULT_API_URL: &str = "https://v2.jokeapi.dev";

/// File name of the favorites database inside the data directory
const DATABASE_FILE: &str = "favorites.db";

/// Runtime configuration resolved from CLI flags and environment variables
#[derive(Debug, Clone)]
pub struct JokesConfig {
    pub api_url: String,
    pub database: PathBuf,
    pub timeout: Duration,
    pub verbose: bool,
}

impl JokesConfig {
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let database = match &global.database {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };

        Self::new(global.api_url.clone(), database, global.timeout, global.verbose)
    }

    pub fn new(api_url: String, database: PathBuf, timeout_secs: u64, verbose: bool) -> Result<Self> {
        let api_url = api_url.trim_end_matches('/').to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(Error::Config(format!("API URL must be http(s): {api_url}")).into());
        }
        if timeout_secs == 0 {
            return Err(Error::Config("timeout must be at least one second".to_string()).into());
        }

        Ok(Self {
            api_url,
            database,
            timeout: Duration::from_secs(timeout_secs),
            verbose,
        })
    }
}

/// Default favorites location under the platform data directory
fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs_next::data_dir()
        .ok_or_else(|| eyre!("Unable to determine data directory"))?
        .join("jokes");

    fs::create_dir_all(&data_dir).map_err(|e| eyre!("Failed to create data directory: {}", e))?;

    Ok(data_dir.join(DATABASE_FILE))
}
