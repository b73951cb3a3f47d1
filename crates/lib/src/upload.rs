//! # Upload Client
//!
//! Sends the artifact and its metadata as one multipart POST and decodes
//! the resulting remote file identifier.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::errors::PublishError;
use crate::metadata::ResolvedMetadata;

/// The remote file identifier returned by a successful upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadResult {
    pub file_id: u64,
}

#[derive(Deserialize)]
struct UploadResponse {
    id: Option<u64>,
}

/// A client for the project upload endpoint.
pub struct UploadClient {
    client: Client,
    base_url: String,
    token: String,
    debug_mode: bool,
}

impl UploadClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        debug_mode: bool,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
            debug_mode,
        }
    }

    /// Issues the single upload POST for the given project.
    ///
    /// The body carries exactly two parts: `file`, streaming the artifact's
    /// bytes so large files never sit in memory in full, and `metadata`,
    /// the JSON-serialized payload. The file handle is owned by the request
    /// body and closed on every exit path.
    pub async fn upload(
        &self,
        project_id: &str,
        artifact_path: &Path,
        metadata: &ResolvedMetadata,
    ) -> Result<UploadResult, PublishError> {
        let metadata_json =
            serde_json::to_string(metadata).map_err(PublishError::EncodeMetadata)?;
        debug!("resolved metadata: {metadata_json}");

        let file = tokio::fs::File::open(artifact_path).await?;
        let length = file.metadata().await?.len();
        let file_name = artifact_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string());

        let form = Form::new()
            .part(
                "file",
                Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
                    .file_name(file_name),
            )
            .part("metadata", Part::text(metadata_json));

        let url = format!("{}/projects/{}/upload-file", self.base_url, project_id);
        debug!("uploading artifact to {url}");

        let response = self
            .client
            .post(&url)
            .header("X-Api-Token", &self.token)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PublishError::from_rejection(response, self.debug_mode).await);
        }

        let decoded: UploadResponse = response.json().await?;
        decoded
            .id
            .map(|id| UploadResult { file_id: id })
            .ok_or(PublishError::MissingFileId)
    }
}
