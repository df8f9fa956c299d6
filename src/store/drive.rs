use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use url::Url;

use super::{RemoteFile, RemoteStore, StoreError, CSV_MIME, XLSX_MIME};
use crate::auth::{DriveAuthenticator, DRIVE_SCOPE};

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";

/// Google Drive v3 client. Tokens come from the authenticator on demand;
/// it refreshes and caches them internally.
pub struct DriveClient {
    http: Client,
    auth: DriveAuthenticator,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteFile>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct CreatedFile {
    id: String,
}

impl DriveClient {
    pub fn new(http: Client, auth: DriveAuthenticator) -> Self {
        Self { http, auth }
    }

    async fn bearer(&self) -> Result<String, StoreError> {
        let token = self.auth.token(&[DRIVE_SCOPE]).await?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| StoreError::Other("authenticator returned an empty access token".into()))
    }
}

/// Turn non-success statuses into [`StoreError::Rejected`] with the
/// response body attached, so quota and permission messages survive.
async fn check(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Rejected { status, body })
}

#[async_trait]
impl RemoteStore for DriveClient {
    async fn list(&self, folder: &str) -> Result<Vec<RemoteFile>, StoreError> {
        let token = self.bearer().await?;
        let query =
            format!("'{folder}' in parents and (mimeType='{XLSX_MIME}' or mimeType='{CSV_MIME}')");

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut url = Url::parse_with_params(
                FILES_URL,
                &[
                    ("q", query.as_str()),
                    ("spaces", "drive"),
                    ("fields", "nextPageToken,files(id,name,mimeType)"),
                ],
            )
            .map_err(|e| StoreError::Other(e.to_string()))?;
            if let Some(t) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", t);
            }

            let resp = self.http.get(url).bearer_auth(&token).send().await?;
            let page: FileList = check(resp).await?.json().await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(t) => page_token = Some(t),
                None => break,
            }
        }

        debug!(folder, count = files.len(), "listed folder");
        Ok(files)
    }

    async fn get(&self, id: &str) -> Result<Vec<u8>, StoreError> {
        let token = self.bearer().await?;
        let url = format!("{FILES_URL}/{id}?alt=media");
        let resp = self.http.get(&url).bearer_auth(&token).send().await?;
        let bytes = check(resp).await?.bytes().await?;
        debug!(id, bytes = bytes.len(), "downloaded file");
        Ok(bytes.to_vec())
    }

    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        mime_type: &str,
        folder: &str,
    ) -> Result<String, StoreError> {
        let token = self.bearer().await?;
        let metadata = serde_json::json!({ "name": name, "parents": [folder] });

        // multipart/related per the Drive upload protocol; reqwest's
        // multipart support only does form-data, so the body is assembled
        // by hand.
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let boundary = format!("maplinks-{nonce}");

        let mut body = Vec::with_capacity(bytes.len() + 512);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(&bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let url = format!("{UPLOAD_URL}?uploadType=multipart&fields=id");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;
        let created: CreatedFile = check(resp).await?.json().await?;

        info!(id = %created.id, name, "uploaded file");
        Ok(created.id)
    }
}
