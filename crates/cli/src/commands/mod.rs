pub mod chat;
pub mod scrape;
pub mod serve;
pub mod status;

use askbot_config::AppConfig;
use askbot_scrape::SourceFetcher;

/// Build the fetcher when a scraper credential is configured.
pub(crate) fn fetcher_from(config: &AppConfig) -> Option<SourceFetcher> {
    config.scraper_api_key.as_ref().map(|key| {
        SourceFetcher::new(key, &config.faq_url).with_proxy_url(&config.proxy_url)
    })
}
