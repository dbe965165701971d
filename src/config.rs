use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access: AccessConfig,
    pub sheets: SheetsConfig,
    pub llm: LlmConfig,
    pub team: TeamConfig,
    pub generation: GenerationConfig,
}

/// Access-gate secret. Only the environment variable name lives in the
/// config file; the secret itself never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub password_env: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            password_env: "COACHGEN_PASSWORD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Environment variable holding a bearer access token with spreadsheet
    /// read scope. Minting the token from service-account key material is
    /// the environment's job.
    pub token_env: String,
    pub base_url: Option<String>,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            token_env: "SHEETS_ACCESS_TOKEN".to_string(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Explicit model identifier. When unset, the active model is discovered
    /// via the ListModels probe.
    pub model: Option<String>,
    pub api_key_env: String,
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: None,
            api_key_env: "GEMINI_KEY".to_string(),
            base_url: None,
        }
    }
}

/// The roster: agents the operator normally coaches, in display-name form
/// matching the sheet's agent column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Most recent data rows per agent considered when building the prompt.
    pub lookback: usize,
    pub template_path: String,
    pub output_dir: String,
    /// Request timeout for all external HTTP calls.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            lookback: 5,
            template_path: "template.docx".to_string(),
            output_dir: ".".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Load config from repo root or user config directory
    #[allow(dead_code)]
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        // If explicit path provided, use it
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path);
        }

        // Try repo root first (per-directory config)
        if let Ok(config) = Self::load_from_path("coachgen.toml") {
            debug!("Loaded config from ./coachgen.toml");
            return Ok(config);
        }

        // Try user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("coachgen").join("config.toml");
            if let Ok(config) = Self::load_from_path(&config_path) {
                debug!("Loaded config from {:?}", config_path);
                return Ok(config);
            }
        }

        // Return defaults
        debug!("Using default config");
        Ok(Self::default())
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Configured access secret, or None when the environment variable is
    /// not set (which the gate treats as fatal).
    pub fn access_secret(&self) -> Option<String> {
        env::var(&self.access.password_env).ok()
    }

    /// Bearer token for the spreadsheet service.
    pub fn sheets_token(&self) -> Result<String> {
        env::var(&self.sheets.token_env).map_err(|_| {
            anyhow::anyhow!(
                "Sheets access token not found in environment variable: {}",
                self.sheets.token_env
            )
        })
    }

    /// API key for the generative-model service.
    pub fn llm_api_key(&self) -> Result<String> {
        env::var(&self.llm.api_key_env).map_err(|_| {
            anyhow::anyhow!(
                "API key not found in environment variable: {}",
                self.llm.api_key_env
            )
        })
    }

    /// Roster in display order: sorted, as the original team list is.
    pub fn roster(&self) -> Vec<String> {
        let mut agents = self.team.agents.clone();
        agents.sort();
        agents
    }
}
