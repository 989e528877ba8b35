// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod forge;
pub mod scan;
pub mod search;
pub mod utils;

pub use config::{Config, ForgeConfig, SearchConfig};
pub use error::{Result, ScanError};
pub use forge::{Credential, GitHubClient, RateLimitStatus, RepoRef, RepositoryContents};
pub use scan::{RepoOutcome, RepoScan, ScanOrchestrator, ScanProgress, ScanReport, ScanStats};
pub use search::{
    ContentEntry, DirectoryLister, EntryKind, MemoryLister, collect_subfolder_names,
    follow_chain, hunt, locate_sequence,
};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _orchestrator = ScanOrchestrator::new(config.search.segments).unwrap();
        let _lister = MemoryLister::new();
    }
}
