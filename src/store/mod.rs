pub mod drive;

pub use drive::DriveClient;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_MIME: &str = "text/csv";

/// Metadata for one remote file, as returned by a folder listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("token refresh failed: {0}")]
    Token(#[from] yup_oauth2::Error),

    #[error("could not serialize workbook: {0}")]
    Serialize(String),

    #[error("{0}")]
    Other(String),
}

/// The remote file store the pipeline talks to. Exactly three operations:
/// enumerate candidate files in a folder, fetch one file's bytes, and
/// persist a new file.
#[async_trait]
pub trait RemoteStore {
    /// Enumerate spreadsheet and delimited-text files in `folder`.
    async fn list(&self, folder: &str) -> Result<Vec<RemoteFile>, StoreError>;

    /// Fetch the raw bytes of the file with the given identifier.
    async fn get(&self, id: &str) -> Result<Vec<u8>, StoreError>;

    /// Persist `bytes` under `name` in `folder`, returning the new file's
    /// identifier.
    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        mime_type: &str,
        folder: &str,
    ) -> Result<String, StoreError>;
}
