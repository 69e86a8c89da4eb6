//! fsadmin configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sandbox::{AdministeredRoot, RootError};

/// Environment variable naming the administered root
pub const ROOT_ENV: &str = "FILESYSTEM_ADMIN_ROOT";

/// Environment variable overriding the completion endpoint
pub const BASE_URL_ENV: &str = "OLLAMA_BASE_URL";

/// Main fsadmin configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Administered root, lowest priority after `--root` and `FILESYSTEM_ADMIN_ROOT`
    pub root: Option<PathBuf>,

    /// Completion service configuration
    pub llm: LlmConfig,

    /// Orchestrator configuration
    pub agent: AgentConfig,
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.llm.apply_env();
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .fsadmin.yml
        let local_config = PathBuf::from(".fsadmin.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/fsadmin/fsadmin.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("fsadmin").join("fsadmin.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Establish the administered root from `--root`, the environment, then the config file
    pub fn administered_root(&self, cli_root: Option<&Path>) -> Result<AdministeredRoot, RootError> {
        let env_root = std::env::var(ROOT_ENV).ok();
        resolve_root(cli_root, env_root.as_deref(), self.root.as_deref())
    }
}

/// Pick the first configured root source and validate it
///
/// Empty values count as unset.
pub fn resolve_root(
    cli_root: Option<&Path>,
    env_root: Option<&str>,
    config_root: Option<&Path>,
) -> Result<AdministeredRoot, RootError> {
    let chosen = cli_root
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| env_root.map(str::trim).filter(|s| !s.is_empty()).map(Path::new))
        .or_else(|| config_root.filter(|p| !p.as_os_str().is_empty()));

    match chosen {
        Some(path) => {
            debug!(?path, "resolve_root: using configured root");
            AdministeredRoot::new(path)
        }
        None => Err(RootError::NotConfigured),
    }
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible endpoint
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Environment variable holding a bearer token; unset means no auth header
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:latest".to_string(),
            api_key_env: None,
            max_tokens: 4096,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Apply `OLLAMA_BASE_URL` if set
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            debug!(%url, "LlmConfig::apply_env: base url from environment");
            self.base_url = url.trim().to_string();
        }
    }

    /// Bearer token from the configured environment variable, if any
    pub fn api_key(&self) -> Option<String> {
        let var = self.api_key_env.as_deref()?;
        std::env::var(var).ok().filter(|k| !k.is_empty())
    }
}

/// Orchestrator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Replacement for the built-in system instruction (handlebars template)
    #[serde(rename = "system-prompt")]
    pub system_prompt: Option<String>,
}
