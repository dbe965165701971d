//! Model discovery against the Gemini ListModels endpoint.
//!
//! The deployed model list shifts over time, so the active identifier is
//! probed once per process: filter to models that support content generation
//! and carry the family marker, prefer the fast variant, and degrade to a
//! fixed default on any failure. Best-effort on purpose — a probe failure is
//! not a reported error.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::client_impl::GEMINI_BASE_URL;
use crate::util::SecretString;

/// Used when discovery fails or returns nothing usable.
pub const DEFAULT_MODEL: &str = "models/gemini-1.5-flash";

const FAMILY_MARKER: &str = "gemini";
const FAST_MARKER: &str = "flash";
const GENERATE_METHOD: &str = "generateContent";

pub struct ModelFinder {
    client: Client,
    api_key: SecretString,
    base_url: String,
    cached: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}

impl ModelFinder {
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(api_key, GEMINI_BASE_URL.to_string(), timeout_secs)
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context("failed to build HTTP client")?,
            api_key: api_key.into(),
            base_url,
            cached: OnceCell::new(),
        })
    }

    /// The active model identifier, memoized for the life of this finder
    /// (one finder per process). Never fails: any listing problem falls back
    /// to [`DEFAULT_MODEL`].
    pub async fn resolve(&self) -> &str {
        self.cached
            .get_or_init(|| async {
                match self.pick_model().await {
                    Ok(name) => name,
                    Err(e) => {
                        warn!("Model discovery failed ({}), using {}", e, DEFAULT_MODEL);
                        DEFAULT_MODEL.to_string()
                    }
                }
            })
            .await
    }

    async fn pick_model(&self) -> Result<String> {
        let url = format!(
            "{}/v1beta/models?key={}",
            self.base_url,
            self.api_key.expose()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to list models")?;

        if !response.status().is_success() {
            bail!("ListModels error {}", response.status());
        }

        let list: ModelList = response
            .json()
            .await
            .context("Failed to parse model list")?;

        let family: Vec<String> = list
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == GENERATE_METHOD)
            })
            .map(|m| m.name)
            .filter(|name| name.contains(FAMILY_MARKER))
            .collect();

        if family.is_empty() {
            bail!("no usable models in listing");
        }

        let picked = family
            .iter()
            .find(|name| name.contains(FAST_MARKER))
            .unwrap_or(&family[0])
            .clone();

        debug!("Model discovery picked {}", picked);
        Ok(picked)
    }
}
