//! `askbot scrape` — refresh the FAQ cache from the source page.

use askbot_config::AppConfig;
use askbot_store::SqliteFaqStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let Some(fetcher) = super::fetcher_from(&config) else {
        return Err("SCRAPER_API_KEY is not configured".into());
    };

    let store = SqliteFaqStore::new(&config.db_path);
    store.initialize().await?;

    let count = fetcher.fetch_and_store(&store).await?;
    if count > 0 {
        println!("{count} dúvidas salvas em '{}'.", config.db_path);
    } else {
        println!("Nenhuma dúvida foi encontrada na página.");
    }

    Ok(())
}
