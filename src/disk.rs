// Yandex Disk client: creates the destination folder and asks the service
// to pull each photo from its source URL.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::UploadError;

/// Result of the folder creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOutcome {
    Created,
    AlreadyExists,
    UnknownError(u16),
}

/// Result of an upload-by-URL request. `Accepted` only means the service
/// queued the download; it may still fail on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted,
    UnknownError(u16),
}

#[derive(Clone)]
pub struct DiskClient {
    client: Client,
    base_url: String,
    auth: HeaderValue,
}

impl DiskClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, UploadError> {
        let client = Client::builder().build()?;
        let mut auth = HeaderValue::from_str(&format!("OAuth {}", token))
            .map_err(|_| UploadError::InvalidToken)?;
        auth.set_sensitive(true);
        Ok(DiskClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }

    fn resources_url(&self) -> String {
        format!("{}/v1/disk/resources/", self.base_url)
    }

    /// Create `directory`. An existing folder is a normal outcome.
    pub fn ensure_directory(&self, directory: &str) -> Result<DirOutcome, UploadError> {
        let res = self
            .client
            .put(self.resources_url())
            .headers(self.auth_headers())
            .query(&[("path", directory)])
            .send()?;
        let outcome = match res.status() {
            StatusCode::CREATED => DirOutcome::Created,
            StatusCode::CONFLICT => DirOutcome::AlreadyExists,
            other => DirOutcome::UnknownError(other.as_u16()),
        };
        debug!(directory, ?outcome, "ensure directory");
        Ok(outcome)
    }

    /// Ask the service to download `source_url` into `destination`. Returns
    /// as soon as the job is acknowledged.
    pub fn upload_by_url(
        &self,
        destination: &str,
        source_url: &str,
    ) -> Result<UploadOutcome, UploadError> {
        let url = format!("{}upload", self.resources_url());
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .query(&[("path", destination), ("url", source_url)])
            .send()?;
        let outcome = match res.status() {
            StatusCode::ACCEPTED => UploadOutcome::Accepted,
            other => UploadOutcome::UnknownError(other.as_u16()),
        };
        debug!(destination, ?outcome, "upload by url");
        Ok(outcome)
    }
}

/// Remote path of `filename` inside `directory`.
pub fn destination_path(directory: &str, filename: &str) -> String {
    format!("/{}/{}", directory.trim_matches('/'), filename)
}
