use std::path::PathBuf;

use thiserror::Error;

/// Failures while wiring the process: reading inputs, reaching Postgres,
/// installing telemetry.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to read import file `{}`: {source}", path.display())]
    ImportFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("postgres store unavailable: {0}")]
    Database(#[from] sqlx::Error),
    #[error(
        "store backend `postgres` needs a connection url; set `store.url`, RECIPES__STORE__URL or --store-url"
    )]
    MissingStoreUrl,
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn import_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ImportFile {
            path: path.into(),
            source,
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
