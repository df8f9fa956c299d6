use thiserror::Error;

use crate::store::StoreError;

/// Failures surfaced by a single pipeline invocation. Nothing here is
/// retried; the caller reports the message and waits for a fresh attempt.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// File suffix is neither `.csv` nor `.xlsx`. Raised before any store
    /// read beyond the listing.
    #[error("unsupported file format: {0:?} (expected .csv or .xlsx)")]
    UnsupportedFormat(String),

    /// Downloaded bytes did not conform to the declared format.
    #[error("could not parse {name}: {reason}")]
    Parse { name: String, reason: String },

    /// Required input column is absent. The table is left untouched and no
    /// upload is attempted.
    #[error("file must contain a {0:?} column")]
    MissingColumn(String),

    /// Selected display name is not in the current folder listing.
    #[error("no file named {0:?} in the current listing")]
    UnknownSelection(String),

    /// Listing or download against the remote store failed.
    #[error("remote store request failed")]
    Store(#[source] StoreError),

    /// The store rejected the write, or the workbook could not be
    /// serialized for it.
    #[error("upload rejected by remote store")]
    Upload(#[source] StoreError),
}

/// Credential or client construction failure. Fatal at startup: no pipeline
/// step can run without an authenticated store handle.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("could not read service account key")]
    Key(#[source] std::io::Error),

    #[error("could not build service account authenticator")]
    Authenticator(#[source] std::io::Error),

    #[error("token exchange failed")]
    Token(#[from] yup_oauth2::Error),

    #[error("authenticator returned an empty access token")]
    EmptyToken,
}
