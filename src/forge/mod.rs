// file: src/forge/mod.rs
// description: GitHub forge access module exports
// reference: internal module structure

pub mod client;
pub mod credentials;
pub mod types;

pub use client::{GitHubClient, RepositoryContents, qualify_repository_name};
pub use credentials::{Credential, CredentialSource, load_token};
pub use types::{RateLimitStatus, RepoRef};
