//! # dbo-upload
//!
//! One-shot artifact publisher for the dev.bukkit.org hosting API. Given a
//! local build artifact and release metadata, it resolves human-readable
//! game-version names into the numeric IDs the API requires, assembles a
//! validated metadata payload, and performs a single multipart upload,
//! returning the remote file identifier.

pub mod catalog;
pub mod errors;
pub mod inputs;
pub mod metadata;
pub mod upload;

pub use catalog::{VersionCatalog, VersionEntry};
pub use errors::PublishError;
pub use inputs::RawInputs;
pub use metadata::{build_metadata, ProjectRelation, Relations, ResolvedMetadata};
pub use upload::{UploadClient, UploadResult};

use std::path::Path;

use tracing::info;

/// Default base URL of the hosting API.
pub const DEFAULT_API_BASE: &str = "https://dev.bukkit.org/api";

/// The identifying client tag sent as the `User-Agent` of every request.
pub const USER_AGENT: &str = concat!("dbo-upload/", env!("CARGO_PKG_VERSION"));

/// Runs the full publish flow: build the metadata record, then upload.
///
/// The two network calls are strictly sequential: the upload is never
/// issued before version resolution completes. Every error is terminal;
/// the caller reports it and exits. Note that a transport failure during
/// the upload itself is ambiguous: the remote side may have accepted the
/// file even though no response was read, so callers must not treat it as
/// proof of failure.
pub async fn publish(inputs: &RawInputs) -> Result<UploadResult, PublishError> {
    info!(
        "uploading {} to project {}",
        inputs.file_path, inputs.project_id
    );

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(PublishError::ClientBuild)?;

    let catalog = VersionCatalog::new(
        client.clone(),
        &inputs.api_base,
        &inputs.api_token,
        inputs.debug,
    );
    let metadata = build_metadata(inputs, &catalog).await?;

    let uploader = UploadClient::new(client, &inputs.api_base, &inputs.api_token, inputs.debug);
    let result = uploader
        .upload(&inputs.project_id, Path::new(&inputs.file_path), &metadata)
        .await?;

    info!("uploaded file id {}", result.file_id);
    Ok(result)
}
