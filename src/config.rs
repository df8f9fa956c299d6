use anyhow::{Context, Result};
use std::{env, path::PathBuf};

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Google service account key JSON.
    pub service_account_key: PathBuf,
    /// Drive folder the pipeline lists from and uploads back into.
    pub folder_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let service_account_key: PathBuf = env::var("MAPLINKS_SERVICE_ACCOUNT_KEY")
            .context("MAPLINKS_SERVICE_ACCOUNT_KEY is not set")?
            .into();
        let folder_id =
            env::var("MAPLINKS_FOLDER_ID").context("MAPLINKS_FOLDER_ID is not set")?;
        Ok(Self {
            service_account_key,
            folder_id,
        })
    }
}
