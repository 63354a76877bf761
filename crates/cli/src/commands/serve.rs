//! `askbot serve` — start the HTTP gateway.

use askbot_answer::{AnswerService, ensure_loaded};
use askbot_config::AppConfig;
use askbot_providers::GeminiProvider;
use askbot_store::SqliteFaqStore;
use std::sync::Arc;
use tracing::warn;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    if config.gemini_api_key.is_none() {
        warn!("no Gemini API key configured; /ask will fail until one is set");
    }

    let store = SqliteFaqStore::new(&config.db_path);
    let fetcher = super::fetcher_from(&config);
    let knowledge = ensure_loaded(&store, fetcher.as_ref()).await?;

    if knowledge.is_empty() {
        warn!("starting with an empty knowledge base; /ask will return 503");
    }

    let provider = Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone().unwrap_or_default(),
    ));
    let service = Arc::new(AnswerService::new(provider, &config.model, knowledge));

    askbot_gateway::start(&config.gateway.host, config.gateway.port, service).await
}
