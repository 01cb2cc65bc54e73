use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BUCKET: &str = "autoeditor";
pub const DEFAULT_MARGIN: &str = "0.04sec";
pub const DEFAULT_WORK_ROOT: &str = "/app";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing configuration: environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Everything the run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub margin: String,
    pub work_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // Lookup is injected so tests never mutate process-wide environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = require(&lookup, "MINIO_URL")?;
        let port = require(&lookup, "MINIO_PORT")?;
        let access_key = require(&lookup, "MINIO_ROOT_USER")?;
        let secret_key = require(&lookup, "MINIO_ROOT_PASSWORD")?;

        // The storage server is reached without TLS.
        let endpoint = format!("http://{}:{}", url, port);

        Ok(Self {
            endpoint,
            access_key,
            secret_key,
            bucket: DEFAULT_BUCKET.to_string(),
            margin: lookup("AUTO_EDITOR_MARGIN").unwrap_or_else(|| DEFAULT_MARGIN.to_string()),
            work_root: lookup("WORK_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORK_ROOT)),
        })
    }
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or(ConfigError::MissingVar(name))
}
