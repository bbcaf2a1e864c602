pub mod storage;
pub mod toml_config;

pub use storage::LocalStorage;
pub use toml_config::FileConfig;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
pub const DEFAULT_PAGES: u32 = 12;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_DELAY_SECS: u64 = 5;
pub const DEFAULT_LISTING_SELECTOR: &str = "div.VkpGBb";
pub const DEFAULT_SHORT_NAME_SELECTOR: &str = "div.dbg0pd";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_FILE_STEM: &str = "leads";
pub const DEFAULT_FORMAT: &str = "xlsx";

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lead-scrape")]
#[command(about = "Scrape local-business search results into a spreadsheet")]
pub struct CliConfig {
    /// Search query, e.g. "real estate agent in Jasola"
    #[arg(long, default_value = "")]
    pub query: String,

    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    #[arg(long, default_value_t = DEFAULT_PAGES)]
    pub pages: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Fixed delay between page fetches
    #[arg(long, default_value_t = DEFAULT_DELAY_SECS)]
    pub delay_secs: u64,

    #[arg(long, default_value = DEFAULT_LISTING_SELECTOR)]
    pub listing_selector: String,

    #[arg(long, default_value = DEFAULT_SHORT_NAME_SELECTOR)]
    pub short_name_selector: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_FILE_STEM)]
    pub file_stem: String,

    /// Output format: xlsx or csv
    #[arg(long, default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Insert a UTC timestamp into the output file name
    #[arg(long)]
    pub timestamp: bool,

    /// Also write the raw scraped listings as JSON
    #[arg(long)]
    pub keep_raw: bool,

    /// Load settings from a TOML file instead of flags
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn query(&self) -> &str {
        &self.query
    }

    fn search_url(&self) -> &str {
        &self.search_url
    }

    fn pages(&self) -> u32 {
        self.pages
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    fn listing_selector(&self) -> &str {
        &self.listing_selector
    }

    fn short_name_selector(&self) -> &str {
        &self.short_name_selector
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_stem(&self) -> &str {
        &self.file_stem
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn timestamp(&self) -> bool {
        self.timestamp
    }

    fn keep_raw(&self) -> bool {
        self.keep_raw
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::*;

        validate_non_empty("query", &self.query)?;
        validate_url("search_url", &self.search_url)?;
        validate_positive_number("pages", self.pages as u64, 1)?;
        validate_positive_number("page_size", self.page_size as u64, 1)?;
        validate_non_empty("listing_selector", &self.listing_selector)?;
        validate_non_empty("short_name_selector", &self.short_name_selector)?;
        validate_non_empty("output_path", &self.output_path)?;
        validate_non_empty("file_stem", &self.file_stem)?;
        validate_export_format("format", &self.format)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    fn base_config() -> CliConfig {
        CliConfig {
            query: "coffee shops in Delhi".to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            pages: DEFAULT_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            delay_secs: DEFAULT_DELAY_SECS,
            listing_selector: DEFAULT_LISTING_SELECTOR.to_string(),
            short_name_selector: DEFAULT_SHORT_NAME_SELECTOR.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            timestamp: false,
            keep_raw: false,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let mut config = base_config();
        config.query = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_pages_is_rejected() {
        let mut config = base_config();
        config.pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let mut config = base_config();
        config.format = "pdf".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_delay_converts_to_duration() {
        let mut config = base_config();
        config.delay_secs = 5;
        assert_eq!(config.delay(), Duration::from_secs(5));
    }
}
