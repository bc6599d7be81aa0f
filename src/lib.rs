use std::num::ParseIntError;
use std::path::PathBuf;

pub mod audio;
pub mod util;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fingerprint too short: need at least 2 samples after trimming, got {len}")]
    FingerprintTooShort { len: usize },
    #[error("fingerprint length mismatch: first={first} second={second}")]
    LengthMismatch { first: usize, second: usize },
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid fingerprint token {token:?} in {path:?}: {source}")]
    FingerprintParse {
        path: PathBuf,
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("fingerprint file is empty: {0:?}")]
    EmptyFingerprint(PathBuf),
    #[error("comparator requires at least 2 fingerprints, found {found}")]
    ComparatorMinimumPaths { found: usize },
    #[error("search was cancelled")]
    Cancelled,
    #[error("serde_json error: {0}")]
    SerdeJSONError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
