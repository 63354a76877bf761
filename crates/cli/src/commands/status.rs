//! `askbot status` — show configuration and cache state.

use askbot_config::AppConfig;
use askbot_store::SqliteFaqStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let store = SqliteFaqStore::new(&config.db_path);
    store.initialize().await?;
    let count = store.count().await?;

    let configured = |key: &Option<String>| if key.is_some() { "configured" } else { "missing" };

    println!("ASKBOT status");
    println!(
        "  Config file:   {}",
        AppConfig::config_dir().join("config.toml").display()
    );
    println!("  Database:      {}", config.db_path);
    println!("  Cached pairs:  {count}");
    println!("  Model:         {}", config.model);
    println!("  FAQ page:      {}", config.faq_url);
    println!("  Gemini key:    {}", configured(&config.gemini_api_key));
    println!("  Scraper key:   {}", configured(&config.scraper_api_key));
    println!(
        "  Gateway:       {}:{}",
        config.gateway.host, config.gateway.port
    );

    Ok(())
}
