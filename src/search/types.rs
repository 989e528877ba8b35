// file: src/search/types.rs
// description: directory entry model shared by the locator and the forge client
// reference: https://docs.github.com/en/rest/repos/contents

use serde::{Deserialize, Serialize};

/// Kind of a listed entry. Anything the forge does not report as `dir`
/// (files, symlinks, submodules) is treated as a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "dir")]
    Directory,
    #[serde(rename = "file")]
    #[serde(other)]
    File,
}

/// One entry directly inside a listed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,

    /// Full slash-delimited path from the repository root
    pub path: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl ContentEntry {
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True when this entry is a directory called `name`.
    pub fn is_dir_named(&self, name: &str) -> bool {
        self.is_dir() && self.name == name
    }
}

/// Joins a parent search path and a child name; the empty string is the root.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_forge_entries() {
        let json = r#"[
            {"name": "resources", "path": "src/resources", "type": "dir", "sha": "abc"},
            {"name": "README.md", "path": "README.md", "type": "file", "size": 10},
            {"name": "vendor", "path": "vendor", "type": "submodule"},
            {"name": "link", "path": "link", "type": "symlink"}
        ]"#;

        let entries: Vec<ContentEntry> = serde_json::from_str(json).unwrap();
        let kinds: Vec<EntryKind> = entries.iter().map(|e| e.kind).collect();

        assert_eq!(
            kinds,
            vec![
                EntryKind::Directory,
                EntryKind::File,
                EntryKind::File,
                EntryKind::File
            ]
        );
        assert_eq!(entries[0].path, "src/resources");
    }

    #[test]
    fn test_is_dir_named() {
        assert!(ContentEntry::directory("data", "a/data").is_dir_named("data"));
        assert!(!ContentEntry::file("data", "a/data").is_dir_named("data"));
        assert!(!ContentEntry::directory("Data", "a/Data").is_dir_named("data"));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "lib"), "lib");
        assert_eq!(join_path("lib", "resources"), "lib/resources");
        assert_eq!(join_path("lib/", "resources"), "lib/resources");
    }
}
