// file: src/search/mod.rs
// description: sequence locator module exports
// reference: internal module structure

pub mod collect;
pub mod lister;
pub mod locator;
pub mod memory;
pub mod types;

pub use collect::collect_subfolder_names;
pub use lister::DirectoryLister;
pub use locator::{follow_chain, hunt, locate_sequence};
pub use memory::MemoryLister;
pub use types::{ContentEntry, EntryKind};
