use crate::core::html::{self, ListingSelectors};
use crate::core::reshape::Reshaper;
use crate::core::{export, ConfigProvider, Pipeline, ScrapeHarvest, Storage, TransformResult};
use crate::utils::error::Result;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Rotating pool of desktop browser user agents.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SearchScrapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    selectors: ListingSelectors,
    reshaper: Reshaper,
}

impl<S: Storage, C: ConfigProvider> SearchScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let selectors =
            ListingSelectors::new(config.listing_selector(), config.short_name_selector())?;
        let client = Client::builder()
            .user_agent(random_user_agent())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            storage,
            config,
            client,
            selectors,
            reshaper: Reshaper::new()?,
        })
    }

    /// Local-results URL for one page, with a zero-based result offset.
    fn page_url(&self, page: u32) -> Result<Url> {
        let num = self.config.page_size().to_string();
        // Widened so oversized page sizes cannot overflow the offset.
        let start = (self.config.page_size() as u64 * (page as u64 - 1)).to_string();
        let url = Url::parse_with_params(
            self.config.search_url(),
            [
                ("tbm", "lcl"),
                ("tbs", "lf:1,lf_ui:2"),
                ("q", self.config.query()),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ],
        )?;
        Ok(url)
    }

    /// Output file name from the configured stem, format, and the
    /// optional UTC timestamp.
    fn output_file_name(&self, extension: &str) -> String {
        if self.config.timestamp() {
            format!(
                "{}-{}.{}",
                self.config.file_stem(),
                chrono::Utc::now().format("%Y%m%d-%H%M%S"),
                extension
            )
        } else {
            format!("{}.{}", self.config.file_stem(), extension)
        }
    }
}

fn random_user_agent() -> &'static str {
    let mut rng = rand::rng();
    USER_AGENTS[rng.random_range(0..USER_AGENTS.len())]
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SearchScrapePipeline<S, C> {
    async fn extract(&self) -> Result<ScrapeHarvest> {
        let mut harvest = ScrapeHarvest::default();
        let pages = self.config.pages();

        for page in 1..=pages {
            let url = self.page_url(page)?;
            tracing::debug!("Fetching page {}/{}: {}", page, pages, url);

            let response = self
                .client
                .get(url)
                .header("Accept-Language", ACCEPT_LANGUAGE)
                .send()
                .await?;

            if response.status().is_success() {
                let body = response.text().await?;
                let page_harvest = html::parse_listing_page(&body, &self.selectors);
                tracing::debug!(
                    "Page {} yielded {} listings",
                    page,
                    page_harvest.listings.len()
                );
                harvest.listings.extend(page_harvest.listings);
                harvest.short_names.extend(page_harvest.short_names);
            } else {
                tracing::warn!(
                    "Page {} returned status {}, skipping",
                    page,
                    response.status()
                );
            }

            // Fixed delay between pages to avoid being blocked.
            if page < pages {
                tokio::time::sleep(self.config.delay()).await;
            }
        }

        Ok(harvest)
    }

    async fn transform(&self, harvest: ScrapeHarvest) -> Result<TransformResult> {
        let mut rows = Vec::new();
        let mut dropped = 0;

        for listing in &harvest.listings {
            match self.reshaper.reshape(listing, &harvest.short_names) {
                Some(row) => rows.push(row),
                None => dropped += 1,
            }
        }

        Ok(TransformResult {
            rows,
            dropped,
            raw_listings: harvest.listings,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let (file_name, bytes) = match self.config.format() {
            "csv" => (self.output_file_name("csv"), export::to_csv(&result.rows)?),
            _ => (self.output_file_name("xlsx"), export::to_xlsx(&result.rows)?),
        };

        tracing::debug!("Writing {} bytes to {}", bytes.len(), file_name);
        self.storage.write_file(&file_name, &bytes).await?;

        if self.config.keep_raw() {
            let raw_name = format!("{}-raw.json", self.config.file_stem());
            let raw = serde_json::to_vec_pretty(&result.raw_listings)?;
            self.storage.write_file(&raw_name, &raw).await?;
        }

        Ok(format!("{}/{}", self.config.output_path(), file_name))
    }
}
