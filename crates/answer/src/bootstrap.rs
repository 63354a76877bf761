//! Knowledge bootstrap: load the cache, scraping first if it is empty.
//!
//! This runs once at process start. There is no periodic refresh and no
//! cache expiry — a new scrape means running `askbot scrape` (or clearing
//! the database file) and restarting.

use askbot_core::error::StoreError;
use askbot_core::faq::KnowledgeBase;
use askbot_scrape::SourceFetcher;
use askbot_store::SqliteFaqStore;
use tracing::{error, info, warn};

/// Ensure the knowledge base is loaded.
///
/// Initializes the store and loads the cached pairs. When the cache is
/// empty and a fetcher is available, scrapes once and reloads; a scrape
/// failure is logged and whatever the reload yields (possibly still
/// nothing) is returned, so the assistant keeps running with zero
/// grounding context. The only error surfaced here is a store failure —
/// not being able to open the database is fatal to startup.
pub async fn ensure_loaded(
    store: &SqliteFaqStore,
    fetcher: Option<&SourceFetcher>,
) -> Result<KnowledgeBase, StoreError> {
    store.initialize().await?;

    let pairs = store.load_all().await?;
    if !pairs.is_empty() {
        info!(count = pairs.len(), "knowledge base loaded from cache");
        return Ok(KnowledgeBase::new(pairs));
    }

    let Some(fetcher) = fetcher else {
        warn!("cache is empty and no scraper credential is configured");
        return Ok(KnowledgeBase::default());
    };

    info!("cache is empty, scraping the FAQ page");
    if let Err(e) = fetcher.fetch_and_store(store).await {
        error!(error = %e, "scraping failed");
    }

    let pairs = store.load_all().await?;
    if pairs.is_empty() {
        warn!("knowledge base is still empty after scraping");
    } else {
        info!(count = pairs.len(), "knowledge base loaded after scraping");
    }
    Ok(KnowledgeBase::new(pairs))
}
