//! TOML file configuration, an alternative to CLI flags.
//!
//! ```toml
//! [search]
//! query = "real estate agent in Jasola"
//!
//! [fetch]
//! pages = 12
//! delay_secs = 5
//!
//! [load]
//! output_path = "./output"
//! format = "xlsx"
//! ```

use crate::config::{
    DEFAULT_DELAY_SECS, DEFAULT_FILE_STEM, DEFAULT_FORMAT, DEFAULT_LISTING_SELECTOR,
    DEFAULT_OUTPUT_PATH, DEFAULT_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_URL,
    DEFAULT_SHORT_NAME_SELECTOR,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_export_format, validate_non_empty, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub search: SearchConfig,
    pub fetch: Option<FetchConfig>,
    pub load: Option<LoadConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub query: String,
    pub url: Option<String>,
    pub listing_selector: Option<String>,
    pub short_name_selector: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub pages: Option<u32>,
    pub page_size: Option<u32>,
    pub delay_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub file_stem: Option<String>,
    pub format: Option<String>,
    pub timestamp: Option<bool>,
    pub keep_raw: Option<bool>,
}

impl FileConfig {
    pub fn from_path(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl FileConfig {
    /// Layer flags the user actually passed over the file values.
    /// Defaulted flags leave the file values alone.
    pub fn apply_cli_overrides(
        &mut self,
        cli: &crate::config::CliConfig,
        matches: &clap::ArgMatches,
    ) {
        use clap::parser::ValueSource;

        let set = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        if set("query") {
            self.search.query = cli.query.clone();
        }
        if set("search_url") {
            self.search.url = Some(cli.search_url.clone());
        }
        if set("listing_selector") {
            self.search.listing_selector = Some(cli.listing_selector.clone());
        }
        if set("short_name_selector") {
            self.search.short_name_selector = Some(cli.short_name_selector.clone());
        }

        if set("pages") || set("page_size") || set("delay_secs") {
            let fetch = self.fetch.get_or_insert_with(FetchConfig::default);
            if set("pages") {
                fetch.pages = Some(cli.pages);
            }
            if set("page_size") {
                fetch.page_size = Some(cli.page_size);
            }
            if set("delay_secs") {
                fetch.delay_secs = Some(cli.delay_secs);
            }
        }

        if set("output_path")
            || set("file_stem")
            || set("format")
            || set("timestamp")
            || set("keep_raw")
        {
            let load = self.load.get_or_insert_with(LoadConfig::default);
            if set("output_path") {
                load.output_path = Some(cli.output_path.clone());
            }
            if set("file_stem") {
                load.file_stem = Some(cli.file_stem.clone());
            }
            if set("format") {
                load.format = Some(cli.format.clone());
            }
            if set("timestamp") {
                load.timestamp = Some(cli.timestamp);
            }
            if set("keep_raw") {
                load.keep_raw = Some(cli.keep_raw);
            }
        }
    }
}

impl ConfigProvider for FileConfig {
    fn query(&self) -> &str {
        &self.search.query
    }

    fn search_url(&self) -> &str {
        self.search.url.as_deref().unwrap_or(DEFAULT_SEARCH_URL)
    }

    fn pages(&self) -> u32 {
        self.fetch
            .as_ref()
            .and_then(|f| f.pages)
            .unwrap_or(DEFAULT_PAGES)
    }

    fn page_size(&self) -> u32 {
        self.fetch
            .as_ref()
            .and_then(|f| f.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn delay(&self) -> Duration {
        Duration::from_secs(
            self.fetch
                .as_ref()
                .and_then(|f| f.delay_secs)
                .unwrap_or(DEFAULT_DELAY_SECS),
        )
    }

    fn listing_selector(&self) -> &str {
        self.search
            .listing_selector
            .as_deref()
            .unwrap_or(DEFAULT_LISTING_SELECTOR)
    }

    fn short_name_selector(&self) -> &str {
        self.search
            .short_name_selector
            .as_deref()
            .unwrap_or(DEFAULT_SHORT_NAME_SELECTOR)
    }

    fn output_path(&self) -> &str {
        self.load
            .as_ref()
            .and_then(|l| l.output_path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn file_stem(&self) -> &str {
        self.load
            .as_ref()
            .and_then(|l| l.file_stem.as_deref())
            .unwrap_or(DEFAULT_FILE_STEM)
    }

    fn format(&self) -> &str {
        self.load
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or(DEFAULT_FORMAT)
    }

    fn timestamp(&self) -> bool {
        self.load
            .as_ref()
            .and_then(|l| l.timestamp)
            .unwrap_or(false)
    }

    fn keep_raw(&self) -> bool {
        self.load.as_ref().and_then(|l| l.keep_raw).unwrap_or(false)
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty("search.query", &self.search.query)?;
        validate_url("search.url", self.search_url())?;
        validate_positive_number("fetch.pages", self.pages() as u64, 1)?;
        validate_positive_number("fetch.page_size", self.page_size() as u64, 1)?;
        validate_export_format("load.format", self.format())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [search]
            query = "coffee shops in Delhi"
            "#,
        )
        .unwrap();

        assert_eq!(config.query(), "coffee shops in Delhi");
        assert_eq!(config.search_url(), DEFAULT_SEARCH_URL);
        assert_eq!(config.pages(), DEFAULT_PAGES);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.delay(), Duration::from_secs(DEFAULT_DELAY_SECS));
        assert_eq!(config.listing_selector(), DEFAULT_LISTING_SELECTOR);
        assert_eq!(config.format(), "xlsx");
        assert!(!config.timestamp());
        assert!(!config.keep_raw());
    }

    #[test]
    fn test_full_config_overrides_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [search]
            query = "bakeries in Pune"
            url = "http://localhost:8080/search"
            listing_selector = "div.listing"
            short_name_selector = "div.short"

            [fetch]
            pages = 3
            page_size = 10
            delay_secs = 0

            [load]
            output_path = "/tmp/out"
            file_stem = "bakeries"
            format = "csv"
            timestamp = true
            keep_raw = true
            "#,
        )
        .unwrap();

        assert_eq!(config.pages(), 3);
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.delay(), Duration::ZERO);
        assert_eq!(config.listing_selector(), "div.listing");
        assert_eq!(config.output_path(), "/tmp/out");
        assert_eq!(config.file_stem(), "bakeries");
        assert_eq!(config.format(), "csv");
        assert!(config.timestamp());
        assert!(config.keep_raw());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_query_fails_validation() {
        let config: FileConfig = toml::from_str(
            r#"
            [search]
            query = ""
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_path_reads_and_validates() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[search]\nquery = \"gyms in Mumbai\"").unwrap();

        let config = FileConfig::from_path(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.query(), "gyms in Mumbai");
    }

    #[test]
    fn test_from_path_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();

        assert!(FileConfig::from_path(file.path().to_str().unwrap()).is_err());
    }

    #[cfg(feature = "cli")]
    mod cli_overrides {
        use super::*;
        use crate::config::CliConfig;
        use clap::{CommandFactory, FromArgMatches};

        fn parse_cli(args: &[&str]) -> (CliConfig, clap::ArgMatches) {
            let matches = CliConfig::command().get_matches_from(args);
            let cli = CliConfig::from_arg_matches(&matches).unwrap();
            (cli, matches)
        }

        fn file_config() -> FileConfig {
            toml::from_str(
                r#"
                [search]
                query = "bakeries in Pune"

                [fetch]
                pages = 7
                delay_secs = 9
                "#,
            )
            .unwrap()
        }

        #[test]
        fn test_passed_flags_win_over_file_values() {
            let (cli, matches) = parse_cli(&[
                "lead-scrape",
                "--config",
                "c.toml",
                "--pages",
                "3",
                "--format",
                "csv",
                "--keep-raw",
            ]);

            let mut config = file_config();
            config.apply_cli_overrides(&cli, &matches);

            assert_eq!(config.pages(), 3);
            assert_eq!(config.format(), "csv");
            assert!(config.keep_raw());
            // Untouched file values survive.
            assert_eq!(config.query(), "bakeries in Pune");
            assert_eq!(config.delay(), Duration::from_secs(9));
        }

        #[test]
        fn test_defaulted_flags_do_not_override_file() {
            let (cli, matches) = parse_cli(&["lead-scrape", "--config", "c.toml"]);

            let mut config = file_config();
            config.apply_cli_overrides(&cli, &matches);

            assert_eq!(config.pages(), 7);
            assert_eq!(config.delay(), Duration::from_secs(9));
            assert_eq!(config.query(), "bakeries in Pune");
            assert_eq!(config.format(), "xlsx");
        }

        #[test]
        fn test_query_flag_overrides_file_query() {
            let (cli, matches) = parse_cli(&[
                "lead-scrape",
                "--config",
                "c.toml",
                "--query",
                "gyms in Mumbai",
            ]);

            let mut config = file_config();
            config.apply_cli_overrides(&cli, &matches);

            assert_eq!(config.query(), "gyms in Mumbai");
        }
    }
}
