pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{FileConfig, LocalStorage};
pub use core::{engine::ScrapeEngine, pipeline::SearchScrapePipeline};
pub use utils::error::{Result, ScrapeError};
