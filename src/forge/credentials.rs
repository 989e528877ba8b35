// file: src/forge/credentials.rs
// description: GitHub token loading from a token file or an environment variable
// reference: https://docs.github.com/en/authentication

use crate::config::ForgeConfig;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    File(PathBuf),
    Environment(String),
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::File(path) => write!(f, "token file {}", path.display()),
            CredentialSource::Environment(var) => write!(f, "environment variable {}", var),
        }
    }
}

#[derive(Clone)]
pub struct Credential {
    pub token: String,
    pub source: CredentialSource,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Looks for a token in the configured file first, then in the configured
/// environment variable. `None` means anonymous access.
pub fn load_token(config: &ForgeConfig) -> Option<Credential> {
    let env_value = std::env::var(&config.token_env).ok();
    resolve_token(&config.token_file, &config.token_env, env_value)
}

fn resolve_token(
    token_file: &Path,
    env_name: &str,
    env_value: Option<String>,
) -> Option<Credential> {
    if let Some(token) = read_token_file(token_file) {
        info!("Using GitHub token from file: {}", token_file.display());
        return Some(Credential {
            token,
            source: CredentialSource::File(token_file.to_path_buf()),
        });
    }

    match env_value.map(|v| v.trim().to_string()) {
        Some(token) if !token.is_empty() => {
            info!("Using GitHub token from {} environment variable", env_name);
            Some(Credential {
                token,
                source: CredentialSource::Environment(env_name.to_string()),
            })
        }
        _ => {
            info!("No GitHub token found in file or environment variable");
            None
        }
    }
}

fn read_token_file(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => {
            let token = content.lines().next().unwrap_or("").trim().to_string();
            if token.is_empty() {
                warn!("Token file '{}' found but is empty", path.display());
                None
            } else {
                Some(token)
            }
        }
        Err(e) => {
            warn!("Error reading token file '{}': {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_file_takes_precedence() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("token");
        fs::write(&path, "ghp_fromfile\nsecond line ignored\n").unwrap();

        let credential =
            resolve_token(&path, "GITHUB_PAT", Some("ghp_fromenv".to_string())).unwrap();
        assert_eq!(credential.token, "ghp_fromfile");
        assert_eq!(credential.source, CredentialSource::File(path));
    }

    #[test]
    fn test_empty_file_falls_back_to_environment() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("token");
        fs::write(&path, "   \n").unwrap();

        let credential =
            resolve_token(&path, "GITHUB_PAT", Some(" ghp_fromenv ".to_string())).unwrap();
        assert_eq!(credential.token, "ghp_fromenv");
        assert_eq!(
            credential.source,
            CredentialSource::Environment("GITHUB_PAT".to_string())
        );
    }

    #[test]
    fn test_no_token_anywhere() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing");

        assert!(resolve_token(&path, "GITHUB_PAT", None).is_none());
        assert!(resolve_token(&path, "GITHUB_PAT", Some(String::new())).is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = Credential {
            token: "ghp_secret".to_string(),
            source: CredentialSource::Environment("GITHUB_PAT".to_string()),
        };
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("redacted"));
    }
}
