use thiserror::Error;

/// Errors produced while resolving sources and assembling an index.
///
/// Every variant is fatal for the run: a partially assembled index that
/// silently omits a platform would break downstream multi-arch pulls, so the
/// pipeline never skips a bad source and continues.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to fetch manifest {reference}: {reason}")]
    Fetch { reference: String, reason: String },

    #[error("manifest file not found: {0}")]
    NotFound(String),

    #[error("failed to read manifest file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode manifest from {origin}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("source {0} has no declared platform")]
    MissingPlatform(String),

    #[error("invalid platform {0}, expected os/architecture")]
    InvalidPlatform(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
