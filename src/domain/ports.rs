use crate::domain::model::{ScrapeHarvest, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn query(&self) -> &str;
    fn search_url(&self) -> &str;
    fn pages(&self) -> u32;
    fn page_size(&self) -> u32;
    fn delay(&self) -> Duration;
    fn listing_selector(&self) -> &str;
    fn short_name_selector(&self) -> &str;
    fn output_path(&self) -> &str;
    fn file_stem(&self) -> &str;
    fn format(&self) -> &str;
    fn timestamp(&self) -> bool;
    fn keep_raw(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ScrapeHarvest>;
    async fn transform(&self, harvest: ScrapeHarvest) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
