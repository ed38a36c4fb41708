//! Drive v3 `files` listing client and response decoding.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::common::config::DriveSettings;
use crate::drive::error::DriveError;
use crate::drive::source::FileSource;
use crate::drive::types::{DriveFile, FilePage};

// Projection keeps list responses small; everything the browser renders.
const LIST_FIELDS: &str = "nextPageToken,files(id,name,size,mimeType,iconLink)";
const LIST_ORDER: &str = "folder,name";

pub struct DriveClient {
    http: Client,
    base_url: String,
    access_token: String,
    page_size: u32,
}

impl DriveClient {
    pub fn new(settings: &DriveSettings, access_token: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_token,
            page_size: settings.page_size,
        })
    }
}

#[async_trait::async_trait]
impl FileSource for DriveClient {
    async fn list(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<FilePage, DriveError> {
        let url = format!("{}/files", self.base_url);
        let page_size = self.page_size.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("q", query),
            ("pageSize", page_size.as_str()),
            ("fields", LIST_FIELDS),
            ("orderBy", LIST_ORDER),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        debug!("Listing files (query: '{}', cursor: {:?})", query, page_token);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&params)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Drive listing failed with status {}", status);
            return Err(remote_error(status, &body));
        }

        let body: ListFilesResponse = response
            .json()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        Ok(body.into_page())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListFilesResponse {
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    files: Vec<FileDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDto {
    id: String,
    name: String,
    mime_type: String,
    // Drive serializes int64 fields as decimal strings
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    icon_link: Option<String>,
}

impl ListFilesResponse {
    fn into_page(self) -> FilePage {
        FilePage {
            files: self.files.into_iter().map(FileDto::into_file).collect(),
            next_page_token: self.next_page_token,
        }
    }
}

impl FileDto {
    fn into_file(self) -> DriveFile {
        // Unparsable sizes are treated as absent rather than failing the page
        let size = self.size.as_deref().and_then(|s| s.parse::<u64>().ok());
        DriveFile {
            id: self.id,
            name: self.name,
            mime_type: self.mime_type,
            size,
            icon_link: self.icon_link,
        }
    }
}

fn remote_error(status: StatusCode, body: &str) -> DriveError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => DriveError::remote(parsed.error.message),
        Err(_) => DriveError::remote(format!("Drive request failed: {}", status)),
    }
}
