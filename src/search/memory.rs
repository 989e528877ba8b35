// file: src/search/memory.rs
// description: in-memory directory tree implementing the listing capability
// reference: used by locator tests and offline dry runs

use crate::error::{Result, ScanError};
use crate::search::lister::DirectoryLister;
use crate::search::types::{ContentEntry, join_path};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A repository tree held in memory.
///
/// Directories list their children in insertion order, which lets callers
/// reproduce the exact ordering a forge would return. Paths registered with
/// [`MemoryLister::fail_path`] produce a transient fault instead of a listing.
#[derive(Debug)]
pub struct MemoryLister {
    directories: HashMap<String, Vec<ContentEntry>>,
    faults: HashMap<String, String>,
    list_calls: AtomicUsize,
}

impl MemoryLister {
    pub fn new() -> Self {
        let mut directories = HashMap::new();
        directories.insert(String::new(), Vec::new());

        Self {
            directories,
            faults: HashMap::new(),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Adds a directory and every missing ancestor, e.g. `lib/resources/data`.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.ensure_dir(path);
        self
    }

    /// Adds a file, creating any missing ancestor directories.
    pub fn with_file(mut self, path: &str) -> Self {
        let (parent, name) = split_parent(path);
        self.ensure_dir(parent);
        self.push_child(parent, ContentEntry::file(name, join_path(parent, name)));
        self
    }

    /// Appends a raw entry under `parent` without deriving its path from its name.
    pub fn with_entry(mut self, parent: &str, entry: ContentEntry) -> Self {
        self.ensure_dir(parent);
        if entry.is_dir() {
            self.directories.entry(entry.path.clone()).or_default();
        }
        self.push_child(parent, entry);
        self
    }

    /// Makes every listing of `path` fail with a transient fault.
    pub fn fail_path(mut self, path: &str, message: &str) -> Self {
        self.faults.insert(normalize(path), message.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn ensure_dir(&mut self, path: &str) {
        let path = normalize(path);
        if path.is_empty() || self.directories.contains_key(&path) {
            return;
        }

        let (parent, name) = split_parent(&path);
        let parent = parent.to_string();
        let name = name.to_string();
        self.ensure_dir(&parent);
        self.directories.insert(path.clone(), Vec::new());
        self.push_child(&parent, ContentEntry::directory(name, path));
    }

    fn push_child(&mut self, parent: &str, entry: ContentEntry) {
        let children = self.directories.entry(normalize(parent)).or_default();
        if !children.contains(&entry) {
            children.push(entry);
        }
    }
}

impl Default for MemoryLister {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryLister for MemoryLister {
    async fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let path = normalize(path);

        if let Some(message) = self.faults.get(&path) {
            return Err(ScanError::Forge(message.clone()));
        }

        self.directories
            .get(&path)
            .cloned()
            .ok_or_else(|| ScanError::not_found(path))
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn split_parent(path: &str) -> (&str, &str) {
    let path = path.trim_matches('/');
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", path),
    }
}
