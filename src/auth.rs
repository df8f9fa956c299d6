use std::path::Path;
use tracing::info;
use yup_oauth2::authenticator::{Authenticator, DefaultHyperClient, HyperClientBuilder};
use yup_oauth2::ServiceAccountAuthenticator;

use crate::error::AuthError;

/// Read/write access to the file store; rotation and narrower scopes are
/// out of scope here.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

type DefaultConnector = <DefaultHyperClient as HyperClientBuilder>::Connector;

/// Token source handed to the Drive client.
pub type DriveAuthenticator = Authenticator<DefaultConnector>;

/// Build an authenticated token source from a service account key file and
/// prove it works with a single token fetch. Any failure here aborts
/// startup: no pipeline step can proceed without a store handle.
pub async fn service_account(key_path: &Path) -> Result<DriveAuthenticator, AuthError> {
    let key = yup_oauth2::read_service_account_key(key_path)
        .await
        .map_err(AuthError::Key)?;
    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(AuthError::Authenticator)?;

    let token = auth.token(&[DRIVE_SCOPE]).await?;
    if token.token().is_none() {
        return Err(AuthError::EmptyToken);
    }
    info!("service account authenticated");

    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn missing_key_file_is_a_key_error() {
        // `expect_err` needs `Debug` on the Ok type, which `Authenticator`
        // does not implement; unwrap the error by hand instead.
        let err = match service_account(Path::new("/nonexistent/key.json")).await {
            Ok(_) => panic!("missing file should not authenticate"),
            Err(err) => err,
        };
        assert!(matches!(err, AuthError::Key(_)));
    }

    #[tokio::test]
    async fn malformed_key_file_is_a_key_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not a service account key").unwrap();

        let err = match service_account(file.path()).await {
            Ok(_) => panic!("garbage key should not authenticate"),
            Err(err) => err,
        };
        assert!(matches!(err, AuthError::Key(_)));
    }
}
