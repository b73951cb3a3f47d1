use thiserror::Error;
use tracing::debug;

/// Error taxonomy for the publish flow.
///
/// Every variant is terminal: there is no retry, fallback, or partial
/// recovery path. The binary reports the message and exits non-zero. The
/// only policy the `debug` flag controls is how much diagnostic detail is
/// captured, never whether to continue.
#[derive(Error, Debug)]
pub enum PublishError {
    /// Neither a parent file nor a game-version list was supplied.
    #[error("you must specify either parent_file_id or game_versions")]
    MissingVersionSelector,

    /// Both selectors were supplied; the upstream API treats them as
    /// mutually exclusive.
    #[error("you cannot specify both parent_file_id and game_versions")]
    AmbiguousVersionSelector,

    /// A requested version name is absent from the catalog snapshot.
    /// Fatal by design: silently dropping a requested version would be a
    /// correctness hazard for release metadata.
    #[error("unknown game version '{0}'")]
    UnknownVersionName(String),

    /// The caller-supplied relations input was not a well-formed JSON
    /// array of project relations.
    #[error("malformed project_relations JSON: {0}")]
    MalformedRelations(#[source] serde_json::Error),

    /// A non-success HTTP status from either endpoint. The body is only
    /// captured in debug mode and is surfaced verbatim; upstream error
    /// bodies are not contractually structured, so they are never parsed.
    #[error("request failed with status code {status}")]
    RemoteRejection { status: u16, body: Option<String> },

    /// The upload returned a success status but no file identifier, an
    /// upstream contract breach distinct from outright rejection.
    #[error("upload succeeded but the response did not contain a file id")]
    MissingFileId,

    /// A connection-level failure with no response at all. For the upload
    /// request this is ambiguous: the remote side may have accepted the
    /// file even though the response was lost.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to read artifact: {0}")]
    Artifact(#[from] std::io::Error),

    #[error("failed to encode metadata: {0}")]
    EncodeMetadata(#[source] serde_json::Error),
}

impl PublishError {
    /// Converts a non-success response into the canonical rejection error.
    /// The status code is always surfaced; the raw body is captured (and
    /// echoed to the debug log) only when debug diagnostics are enabled.
    pub(crate) async fn from_rejection(response: reqwest::Response, debug_mode: bool) -> Self {
        let status = response.status().as_u16();
        let body = if debug_mode {
            let text = response.text().await.unwrap_or_default();
            debug!("error response body: {text}");
            Some(text)
        } else {
            None
        };
        PublishError::RemoteRejection { status, body }
    }
}
