// file: src/scan/mod.rs
// description: repository scan orchestration exports
// reference: internal module structure

mod orchestrator;
mod progress;

pub use orchestrator::{RepoOutcome, RepoScan, ScanOrchestrator, ScanReport};
pub use progress::{ScanProgress, ScanStats};
