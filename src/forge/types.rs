// file: src/forge/types.rs
// description: GitHub REST response models
// reference: https://docs.github.com/en/rest

use crate::search::ContentEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// `owner/name`
    pub full_name: String,
}

/// The contents endpoint answers with an array for directories and a single
/// object for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitResources {
    pub core: RateLimitWindow,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitWindow {
    pub limit: u64,
    pub remaining: u64,
    pub reset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u64,
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

impl RateLimitStatus {
    pub fn used(&self) -> u64 {
        self.limit.saturating_sub(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::EntryKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repo_ref_ignores_unknown_fields() {
        let json = r#"{"id": 1, "name": "api", "full_name": "org/api", "archived": true, "owner": {"login": "org"}}"#;
        let repo: RepoRef = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "org/api");
    }

    #[test]
    fn test_contents_response_shapes() {
        let listing: ContentsResponse =
            serde_json::from_str(r#"[{"name": "data", "path": "resources/data", "type": "dir"}]"#)
                .unwrap();
        assert!(matches!(listing, ContentsResponse::Listing(ref entries) if entries.len() == 1));

        let single: ContentsResponse = serde_json::from_str(
            r#"{"name": "pack.mcmeta", "path": "pack.mcmeta", "type": "file", "content": "e30="}"#,
        )
        .unwrap();
        match single {
            ContentsResponse::Single(entry) => assert_eq!(entry.kind, EntryKind::File),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_response() {
        let json = r#"{
            "resources": {"core": {"limit": 5000, "remaining": 4990, "reset": 1700000000, "used": 10}},
            "rate": {"limit": 5000, "remaining": 4990, "reset": 1700000000}
        }"#;
        let response: RateLimitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.resources.core.limit, 5000);
        assert_eq!(response.resources.core.remaining, 4990);
        assert_eq!(response.resources.core.reset, 1_700_000_000);
    }
}
