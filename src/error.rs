// Error taxonomy for the backup run. Fetch-stage errors end the run,
// selection and upload errors are recorded per photo and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading credentials and endpoints at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read credential file {path}: {source}")]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credential file {0} is empty")]
    EmptyCredential(PathBuf),
}

/// Failures of the photo listing call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("VK API error: {message}")]
    RemoteApi { message: String },
    #[error("no photos to upload")]
    NoPhotos,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// Every variant is 0x0 and none is tagged "x".
    #[error("photo has no usable size variant")]
    NoSizeVariant,
    #[error("likes count and upload date repeat an earlier photo")]
    DuplicateName,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("disk token is not a valid header value")]
    InvalidToken,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot write manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Reasons a run ends in the `Aborted` state.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("fetching photos failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("no photos selected for upload")]
    NoPhotos,
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
