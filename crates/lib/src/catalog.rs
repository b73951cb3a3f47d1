//! # Version Catalog
//!
//! Fetches the remote service's authoritative list of named versions and
//! builds the name → numeric ID mapping used to resolve the caller's
//! human-readable version list. The catalog is fetched once per invocation
//! and never cached across runs.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::PublishError;

/// The `versionTypeID` of the game-version classification axis. Entries
/// with other type IDs (loaders, platforms, ...) must not leak into name
/// resolution.
const GAME_VERSION_TYPE_ID: u64 = 1;

/// One entry in the remote version catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct VersionEntry {
    pub id: u64,
    pub name: String,
    #[serde(rename = "versionTypeID")]
    pub version_type_id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default, rename = "apiVersion")]
    pub api_version: Option<String>,
}

/// A client for the version-listing endpoint.
pub struct VersionCatalog {
    client: Client,
    base_url: String,
    token: String,
    debug_mode: bool,
}

impl VersionCatalog {
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

    /// Issues the single authenticated read against the version-listing
    /// endpoint. Any non-success status is fatal; there is no retry.
    pub async fn fetch_named_versions(&self) -> Result<Vec<VersionEntry>, PublishError> {
        let url = format!("{}/game/versions", self.base_url);
        debug!("fetching version catalog from {url}");

        let response = self
            .client
            .get(&url)
            .header("X-Api-Token", &self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PublishError::from_rejection(response, self.debug_mode).await);
        }

        Ok(response.json().await?)
    }

    /// Fetches the catalog and returns the name → ID lookup table.
    pub async fn name_index(&self) -> Result<HashMap<String, u64>, PublishError> {
        Ok(build_name_index(self.fetch_named_versions().await?))
    }
}

/// Indexes catalog entries by name, keeping only the game-version axis.
/// If two entries share a name the later one in response order wins;
/// upstream duplicates are not defended against.
fn build_name_index(versions: Vec<VersionEntry>) -> HashMap<String, u64> {
    let mut index = HashMap::with_capacity(versions.len());
    for entry in versions {
        if entry.version_type_id == GAME_VERSION_TYPE_ID {
            index.insert(entry.name, entry.id);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, name: &str, version_type_id: u64) -> VersionEntry {
        VersionEntry {
            id,
            name: name.to_string(),
            version_type_id,
            slug: String::new(),
            api_version: None,
        }
    }

    #[test]
    fn index_excludes_other_classification_axes() {
        let index = build_name_index(vec![
            entry(1, "1.20", 1),
            entry(2, "1.21", 1),
            entry(3, "Forge", 5),
        ]);
        assert_eq!(index.get("1.20"), Some(&1));
        assert_eq!(index.get("1.21"), Some(&2));
        assert_eq!(index.get("Forge"), None);
    }

    #[test]
    fn index_duplicate_names_last_wins() {
        let index = build_name_index(vec![entry(1, "1.20", 1), entry(9, "1.20", 1)]);
        assert_eq!(index.get("1.20"), Some(&9));
    }

    #[test]
    fn entry_deserializes_wire_field_names() {
        let json = r#"{"id":7,"name":"1.20","versionTypeID":1,"slug":"1-20","apiVersion":null}"#;
        let entry: VersionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.version_type_id, 1);
        assert_eq!(entry.api_version, None);
    }
}
