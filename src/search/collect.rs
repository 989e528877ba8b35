// file: src/search/collect.rs
// description: sub-folder name collection below a located sequence
// reference: directory names only, uniqueness by name

use crate::error::Result;
use crate::search::lister::DirectoryLister;
use std::collections::BTreeSet;
use tracing::debug;

/// Returns the names of the directories directly inside `path`.
///
/// Unlike the search functions this surfaces listing errors, so the caller can
/// tell an empty folder apart from one that could not be read.
pub async fn collect_subfolder_names<L: DirectoryLister>(
    lister: &L,
    path: &str,
) -> Result<BTreeSet<String>> {
    let entries = lister.list_directory(path).await?;

    let names: BTreeSet<String> = entries
        .into_iter()
        .filter(|entry| entry.is_dir())
        .map(|entry| entry.name)
        .collect();

    debug!("Collected {} sub-folders from '{}'", names.len(), path);
    Ok(names)
}
