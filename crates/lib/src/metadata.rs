//! # Metadata Builder
//!
//! Validates the raw inputs and produces the normalized metadata record
//! sent alongside the artifact. Pure apart from the single catalog fetch
//! needed to resolve named versions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::VersionCatalog;
use crate::errors::PublishError;
use crate::inputs::RawInputs;

/// A declared dependency/association to another hosted project, passed
/// through verbatim from the caller-supplied JSON.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProjectRelation {
    pub id: u64,
    pub slug: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Relations {
    pub projects: Vec<ProjectRelation>,
}

/// The normalized payload sent upstream.
///
/// Exactly one of `parent_file_id` / `game_versions` serializes, never
/// both and never neither. Text fields whose raw input was the empty string
/// are omitted entirely; falsy-but-meaningful values (numeric zero, empty
/// relation arrays) are kept.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "parentFileID", skip_serializing_if = "Option::is_none")]
    pub parent_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_versions: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,
    pub relations: Relations,
}

/// Builds the normalized metadata record from the raw inputs.
///
/// Fail-fast: the first violation wins. The selector checks run before any
/// network I/O; the catalog is only fetched when a version list is present.
pub async fn build_metadata(
    raw: &RawInputs,
    catalog: &VersionCatalog,
) -> Result<ResolvedMetadata, PublishError> {
    // Presence is decided once, on the trimmed parent and the tokenized
    // version list, and that decision also drives serialization below. A
    // whitespace-only parent or a delimiter-only list counts as unset, so
    // the exactly-one-selector invariant holds for degenerate inputs too.
    let parent = raw.parent_file_id.trim();
    let version_names = split_version_names(&raw.game_versions);
    let has_parent = !parent.is_empty();
    let has_versions = !version_names.is_empty();
    if !has_parent && !has_versions {
        return Err(PublishError::MissingVersionSelector);
    }
    if has_parent && has_versions {
        return Err(PublishError::AmbiguousVersionSelector);
    }

    let game_versions = if has_versions {
        let index = catalog.name_index().await?;
        Some(resolve_version_names(&version_names, &index)?)
    } else {
        None
    };

    let relations = parse_relations(&raw.project_relations)?;

    // The upstream enums are closed and lower-case; normalizing the casing
    // here is a courtesy, not a validation point. Unrecognized values are
    // passed through and rejected by the remote service.
    Ok(ResolvedMetadata {
        changelog: non_empty(&raw.changelog),
        changelog_type: non_empty(&raw.changelog_type).map(|s| s.to_lowercase()),
        display_name: non_empty(&raw.display_name),
        parent_file_id: non_empty(parent),
        game_versions,
        release_type: non_empty(&raw.release_type).map(|s| s.to_lowercase()),
        relations: Relations {
            projects: relations,
        },
    })
}

/// Splits a comma- or space-separated version list into trimmed,
/// non-empty name tokens.
fn split_version_names(list: &str) -> Vec<&str> {
    list.split([',', ' '])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Resolves version names against the catalog index. An unresolvable name
/// is fatal, never skipped.
fn resolve_version_names(
    names: &[&str],
    index: &HashMap<String, u64>,
) -> Result<Vec<u64>, PublishError> {
    let mut ids = Vec::new();
    for name in names {
        match index.get(*name) {
            Some(id) => ids.push(*id),
            None => return Err(PublishError::UnknownVersionName(name.to_string())),
        }
    }
    Ok(ids)
}

/// Relations are structurally unvalidated beyond being a well-formed
/// array; an unset input (empty string) means no relations.
fn parse_relations(raw: &str) -> Result<Vec<ProjectRelation>, PublishError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(PublishError::MalformedRelations)
}

/// Treats the empty-string sentinel used by unset text inputs as absent.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(name, id)| (name.to_string(), *id))
            .collect()
    }

    #[test]
    fn splits_comma_and_space_separated_names() {
        assert_eq!(split_version_names("1.20, 1.21"), ["1.20", "1.21"]);
        assert_eq!(split_version_names("1.20 1.21"), ["1.20", "1.21"]);
        assert_eq!(split_version_names(" 1.21 ,"), ["1.21"]);
    }

    #[test]
    fn delimiter_only_list_yields_no_names() {
        assert!(split_version_names(",").is_empty());
        assert!(split_version_names("  , ,  ").is_empty());
        assert!(split_version_names("").is_empty());
    }

    #[test]
    fn resolves_names_against_the_index() {
        let index = index(&[("1.20", 1), ("1.21", 2)]);
        assert_eq!(
            resolve_version_names(&["1.20", "1.21"], &index).unwrap(),
            [1, 2]
        );
    }

    #[test]
    fn unknown_version_name_is_fatal() {
        let index = index(&[("1.20", 1)]);
        let err = resolve_version_names(&["1.20", "Forge"], &index).unwrap_err();
        assert!(matches!(err, PublishError::UnknownVersionName(name) if name == "Forge"));
    }

    #[test]
    fn relations_parse_and_default() {
        assert_eq!(parse_relations("").unwrap(), []);
        assert_eq!(parse_relations("[]").unwrap(), []);

        let parsed = parse_relations(r#"[{"id":42,"slug":"worldedit"}]"#).unwrap();
        assert_eq!(
            parsed,
            [ProjectRelation {
                id: 42,
                slug: "worldedit".to_string()
            }]
        );

        let err = parse_relations("{not json").unwrap_err();
        assert!(matches!(err, PublishError::MalformedRelations(_)));
    }

    #[test]
    fn serialization_omits_empty_fields_but_keeps_falsy_values() {
        let metadata = ResolvedMetadata {
            changelog: Some("fixed bug".to_string()),
            changelog_type: None,
            display_name: None,
            parent_file_id: None,
            game_versions: Some(vec![0]),
            release_type: Some("release".to_string()),
            relations: Relations::default(),
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            value,
            json!({
                "changelog": "fixed bug",
                "releaseType": "release",
                "gameVersions": [0],
                "relations": {"projects": []},
            })
        );
        // Unset text fields must be absent, not null or empty.
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("displayName"));
        assert!(!object.contains_key("parentFileID"));
        assert!(!object.contains_key("changelogType"));
    }

    #[test]
    fn serialization_uses_upstream_key_casing() {
        let metadata = ResolvedMetadata {
            changelog: None,
            changelog_type: Some("markdown".to_string()),
            display_name: Some("MyPlugin 1.0".to_string()),
            parent_file_id: Some("123".to_string()),
            game_versions: None,
            release_type: None,
            relations: Relations::default(),
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["changelogType"], "markdown");
        assert_eq!(value["displayName"], "MyPlugin 1.0");
        assert_eq!(value["parentFileID"], "123");
    }
}
