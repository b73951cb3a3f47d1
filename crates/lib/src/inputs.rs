//! Caller-supplied configuration.

use clap::Parser;

use crate::DEFAULT_API_BASE;

/// The raw inputs supplied by the invoking environment.
///
/// Read once at process start and immutable thereafter; the core logic
/// never performs ambient environment lookups of its own. Every field maps
/// to a GitHub-Actions style `INPUT_*` environment variable so the binary
/// runs unchanged inside a workflow step, while the long flags keep it
/// usable from a plain shell.
#[derive(Parser, Clone, Debug)]
#[command(name = "dbo-upload", version)]
#[command(about = "Upload a build artifact to the dev.bukkit.org hosting API")]
pub struct RawInputs {
    /// API token sent with every request
    #[arg(long, env = "INPUT_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Project identifier embedded in the upload URL
    #[arg(long, env = "INPUT_PROJECT_ID")]
    pub project_id: String,

    /// Release notes body
    #[arg(long, env = "INPUT_CHANGELOG")]
    pub changelog: String,

    /// Markup format of the changelog, e.g. markdown or html
    #[arg(long, env = "INPUT_CHANGELOG_TYPE", default_value = "")]
    pub changelog_type: String,

    /// Human-readable label for the uploaded file
    #[arg(long, env = "INPUT_DISPLAY_NAME", default_value = "")]
    pub display_name: String,

    /// Existing file to attach this upload to (exclusive with --game-versions)
    #[arg(long, env = "INPUT_PARENT_FILE_ID", default_value = "")]
    pub parent_file_id: String,

    /// Comma- or space-separated named game versions (exclusive with --parent-file-id)
    #[arg(long, env = "INPUT_GAME_VERSIONS", default_value = "")]
    pub game_versions: String,

    /// Release channel, e.g. release, beta or alpha
    #[arg(long, env = "INPUT_RELEASE_TYPE", default_value = "")]
    pub release_type: String,

    /// JSON array of related-project declarations, e.g. [{"id":1,"slug":"dep"}]
    #[arg(long, env = "INPUT_PROJECT_RELATIONS", default_value = "[]")]
    pub project_relations: String,

    /// Path of the artifact to upload
    #[arg(long, env = "INPUT_FILE_PATH")]
    pub file_path: String,

    /// Echo requests and responses for troubleshooting
    #[arg(long, env = "INPUT_DEBUG")]
    pub debug: bool,

    /// Base URL of the hosting API
    #[arg(long, env = "DBO_API_BASE", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,
}
