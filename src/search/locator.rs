// file: src/search/locator.rs
// description: recursive search for a consecutive folder sequence in a remote tree
// reference: strict chain follower + global hunter over lazy directory listings

use crate::error::ScanError;
use crate::search::lister::DirectoryLister;
use crate::search::types::ContentEntry;
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, trace};

/// Finds the first place in the repository where `segments` occur as directly
/// nested directories, searching from the repository root.
///
/// Returns the full path of the last segment, or `None` when the sequence does
/// not occur (or could not be checked).
pub async fn locate_sequence<L: DirectoryLister>(lister: &L, segments: &[String]) -> Option<String> {
    hunt(lister, segments, "").await
}

/// Walks `remaining` one directory at a time starting at `start`.
///
/// Every segment must be a direct sub-directory of the previous one; the first
/// entry with a matching name wins. An empty `remaining` yields `start`.
pub async fn follow_chain<L: DirectoryLister>(
    lister: &L,
    start: &str,
    remaining: &[String],
) -> Option<String> {
    let mut current = start.to_string();

    for segment in remaining {
        let entries = list_or_absent(lister, &current).await?;

        match entries.into_iter().find(|entry| entry.is_dir_named(segment)) {
            Some(entry) => current = entry.path,
            None => {
                trace!("'{}' has no directory named '{}'", current, segment);
                return None;
            }
        }
    }

    Some(current)
}

/// Searches the tree below `root` for the full `segments` sequence.
///
/// Direct children named `segments[0]` are tried first, each one followed
/// strictly through the rest of the sequence. Only when none of them completes
/// does the search descend into every child directory, restarting the whole
/// sequence there. Children are visited in listing order and the first
/// complete match is returned.
pub fn hunt<'a, L: DirectoryLister>(
    lister: &'a L,
    segments: &'a [String],
    root: &'a str,
) -> BoxFuture<'a, Option<String>> {
    async move {
        let (first, rest) = segments.split_first()?;
        let entries = list_or_absent(lister, root).await?;

        for entry in entries.iter().filter(|entry| entry.is_dir_named(first)) {
            if rest.is_empty() {
                return Some(entry.path.clone());
            }

            if let Some(found) = follow_chain(lister, &entry.path, rest).await {
                return Some(found);
            }

            debug!(
                "'{}' does not continue with '{}', trying further",
                entry.path,
                rest.join("/")
            );
        }

        for entry in entries.iter().filter(|entry| entry.is_dir()) {
            if let Some(found) = hunt(lister, segments, &entry.path).await {
                return Some(found);
            }
        }

        None
    }
    .boxed()
}

/// Lists `path`, folding every failure into an absent result.
///
/// A missing path and a transient fault (rate limit, access denial, network)
/// are indistinguishable to the caller; only the log records which it was.
async fn list_or_absent<L: DirectoryLister>(lister: &L, path: &str) -> Option<Vec<ContentEntry>> {
    match lister.list_directory(path).await {
        Ok(entries) => Some(entries),
        Err(ScanError::NotFound { .. }) => {
            trace!("Path '{}' does not exist", display_path(path));
            None
        }
        Err(e) => {
            debug!(
                "Listing '{}' failed, treating as not found: {}",
                display_path(path),
                e
            );
            None
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::memory::MemoryLister;
    use pretty_assertions::assert_eq;

    fn seq(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[tokio::test]
    async fn test_locates_nested_sequence() {
        let lister = MemoryLister::new()
            .with_dir("lib/resources/data/textures")
            .with_dir("lib/resources/data/sounds")
            .with_file("lib/resources/readme.txt");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("lib/resources/data"));
    }

    #[tokio::test]
    async fn test_sequence_at_root() {
        let lister = MemoryLister::new().with_dir("resources/data");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("resources/data"));
    }

    #[tokio::test]
    async fn test_absent_first_segment() {
        let lister = MemoryLister::new()
            .with_dir("src/main/java")
            .with_dir("docs/data");

        assert_eq!(locate_sequence(&lister, &seq(&["resources", "data"])).await, None);
    }

    #[tokio::test]
    async fn test_broken_chain_is_not_found() {
        let lister = MemoryLister::new().with_dir("x/a/notb");

        assert_eq!(locate_sequence(&lister, &seq(&["a", "b"])).await, None);
    }

    #[tokio::test]
    async fn test_second_segment_must_be_direct_child() {
        let lister = MemoryLister::new().with_dir("resources/extra/data");

        assert_eq!(locate_sequence(&lister, &seq(&["resources", "data"])).await, None);
    }

    #[tokio::test]
    async fn test_file_named_like_segment_is_ignored() {
        let lister = MemoryLister::new()
            .with_file("resources/data")
            .with_dir("deep/resources/data");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("deep/resources/data"));
    }

    #[tokio::test]
    async fn test_single_segment_returns_first_match() {
        let lister = MemoryLister::new()
            .with_dir("one/two/a")
            .with_file("one/two/a/file.txt");

        let found = locate_sequence(&lister, &seq(&["a"])).await;
        assert_eq!(found.as_deref(), Some("one/two/a"));
    }

    #[tokio::test]
    async fn test_shallower_match_wins_in_same_branch() {
        let lister = MemoryLister::new()
            .with_dir("lib/resources/data/resources/data")
            .with_dir("lib/resources/data/x");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("lib/resources/data"));
    }

    #[tokio::test]
    async fn test_listing_order_decides_between_branches() {
        let lister = MemoryLister::new()
            .with_dir("b/resources/data")
            .with_dir("a/resources/data");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("b/resources/data"));
    }

    #[tokio::test]
    async fn test_same_named_siblings_all_tried_before_descending() {
        let lister = MemoryLister::new()
            .with_entry("", ContentEntry::directory("resources", "dead/resources"))
            .with_entry("", ContentEntry::directory("resources", "live/resources"))
            .with_dir("live/resources/data")
            .with_dir("aaa/resources/data");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("live/resources/data"));
    }

    #[tokio::test]
    async fn test_dead_end_falls_through_to_descent() {
        let lister = MemoryLister::new()
            .with_dir("resources/other")
            .with_dir("mods/resources/data");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("mods/resources/data"));
    }

    #[tokio::test]
    async fn test_sequence_restarts_inside_partial_match() {
        // resources/resources/data: the outer resources is a dead end, the
        // inner one completes once the search restarts below it
        let lister = MemoryLister::new().with_dir("resources/resources/data");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("resources/resources/data"));
    }

    #[tokio::test]
    async fn test_transient_fault_is_absorbed() {
        let lister = MemoryLister::new()
            .with_dir("broken/resources/data")
            .with_dir("ok/resources/data")
            .fail_path("broken", "403 rate limit exceeded");

        let found = locate_sequence(&lister, &seq(&["resources", "data"])).await;
        assert_eq!(found.as_deref(), Some("ok/resources/data"));
    }

    #[tokio::test]
    async fn test_fault_at_root_is_not_found() {
        let lister = MemoryLister::new()
            .with_dir("resources/data")
            .fail_path("", "connection reset");

        assert_eq!(locate_sequence(&lister, &seq(&["resources", "data"])).await, None);
    }

    #[tokio::test]
    async fn test_fault_inside_chain_is_not_found() {
        let lister = MemoryLister::new()
            .with_dir("resources/data")
            .fail_path("resources", "502 bad gateway");

        assert_eq!(locate_sequence(&lister, &seq(&["resources", "data"])).await, None);
    }

    #[tokio::test]
    async fn test_empty_sequence_is_not_found() {
        let lister = MemoryLister::new().with_dir("resources/data");

        assert_eq!(locate_sequence(&lister, &[]).await, None);
        assert_eq!(lister.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_repeated_search_is_stable() {
        let lister = MemoryLister::new()
            .with_dir("x/y/resources/data")
            .with_dir("z/resources/data");
        let segments = seq(&["resources", "data"]);

        let first = locate_sequence(&lister, &segments).await;
        let second = locate_sequence(&lister, &segments).await;
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("x/y/resources/data"));
    }

    #[tokio::test]
    async fn test_follow_chain_empty_remaining_returns_start() {
        let lister = MemoryLister::new();

        let found = follow_chain(&lister, "does/not/exist", &[]).await;
        assert_eq!(found.as_deref(), Some("does/not/exist"));
        assert_eq!(lister.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_follow_chain_missing_start() {
        let lister = MemoryLister::new().with_dir("a/b");

        assert_eq!(follow_chain(&lister, "nope", &seq(&["b"])).await, None);
    }

    #[tokio::test]
    async fn test_follow_chain_walks_every_segment() {
        let lister = MemoryLister::new().with_dir("root/a/b/c");

        let found = follow_chain(&lister, "root", &seq(&["a", "b", "c"])).await;
        assert_eq!(found.as_deref(), Some("root/a/b/c"));
        assert_eq!(lister.list_calls(), 3);
    }

    #[tokio::test]
    async fn test_follow_chain_uses_listed_path() {
        let lister = MemoryLister::new()
            .with_entry("start", ContentEntry::directory("next", "elsewhere/next"))
            .with_dir("elsewhere/next/leaf");

        let found = follow_chain(&lister, "start", &seq(&["next", "leaf"])).await;
        assert_eq!(found.as_deref(), Some("elsewhere/next/leaf"));
    }

    #[tokio::test]
    async fn test_hunt_from_subtree_root() {
        let lister = MemoryLister::new()
            .with_dir("a/resources/data")
            .with_dir("b/nested/resources/data");

        let found = hunt(&lister, &seq(&["resources", "data"]), "b").await;
        assert_eq!(found.as_deref(), Some("b/nested/resources/data"));
    }
}
