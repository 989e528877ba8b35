// file: src/search/lister.rs
// description: narrow listing capability consumed by the sequence locator
// reference: forge-agnostic directory listing

use crate::error::Result;
use crate::search::types::ContentEntry;
use std::future::Future;

/// Lists the entries directly inside a path of one repository.
///
/// Implementations return `ScanError::NotFound` when the path does not exist
/// (or is not a directory). Every other error is a transient fault such as an
/// access denial, a rate limit or a network failure.
pub trait DirectoryLister: Send + Sync {
    fn list_directory(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Vec<ContentEntry>>> + Send;
}

impl<T: DirectoryLister> DirectoryLister for &T {
    fn list_directory(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Vec<ContentEntry>>> + Send {
        (**self).list_directory(path)
    }
}
