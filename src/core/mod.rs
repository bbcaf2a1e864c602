pub mod engine;
pub mod export;
pub mod html;
pub mod pipeline;
pub mod reshape;

pub use crate::domain::model::{ExportRow, RawListing, ScrapeHarvest, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
