use anyhow::Result;

use super::client::LlmClient;
use super::client::MockLlmClient;
use super::client_impl::GeminiClient;
use crate::config::Config;

/// Create an LLM client for the resolved model identifier.
pub fn create_client(config: &Config, model: &str, dry_run: bool) -> Result<Box<dyn LlmClient>> {
    if dry_run {
        return Ok(Box::new(MockLlmClient::new()));
    }

    let api_key = config.llm_api_key()?;
    let timeout = config.generation.timeout_secs;

    let client = match &config.llm.base_url {
        Some(base_url) => {
            GeminiClient::with_base_url(api_key, model.to_string(), base_url.clone(), timeout)?
        }
        None => GeminiClient::new(api_key, model.to_string(), timeout)?,
    };

    Ok(Box::new(client))
}
