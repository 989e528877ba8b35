// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, ScanError};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub forge: ForgeConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForgeConfig {
    pub api_url: String,
    pub organization: String,
    pub token_file: PathBuf,
    pub token_env: String,
    pub user_agent: String,
    pub per_page: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Folder names that must be nested directly inside one another, outermost first.
    pub segments: Vec<String>,
}

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

impl Config {
    /// Layers built-in defaults, the config file and `SEQSCAN__*` variables.
    ///
    /// An explicit `path` must exist; the default `config/default.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        match path {
            Some(path) => Self::load_layers(path, true, Self::environment()),
            None => Self::load_layers(Path::new(DEFAULT_CONFIG_PATH), false, Self::environment()),
        }
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("SEQSCAN")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("search.segments")
            .try_parsing(true)
    }

    fn load_layers(path: &Path, required: bool, environment: config::Environment) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| ScanError::Config(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(required))
            .add_source(environment)
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            forge: ForgeConfig {
                api_url: "https://api.github.com".to_string(),
                organization: "YUNG-GANG".to_string(),
                token_file: PathBuf::from("token"),
                token_env: "GITHUB_PAT".to_string(),
                user_agent: concat!("seqscan/", env!("CARGO_PKG_VERSION")).to_string(),
                per_page: 100,
            },
            search: SearchConfig {
                segments: vec!["resources".to_string(), "data".to_string()],
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.forge.per_page == 0 || self.forge.per_page > 100 {
            return Err(ScanError::Config(
                "per_page must be between 1 and 100".to_string(),
            ));
        }

        if self.forge.api_url.trim().is_empty() {
            return Err(ScanError::Config("api_url must not be empty".to_string()));
        }

        Validator::validate_organization(&self.forge.organization)
            .map_err(|e| ScanError::Config(e.to_string()))?;
        Validator::validate_segments(&self.search.segments)
            .map_err(|e| ScanError::Config(e.to_string()))?;

        Ok(())
    }
}
