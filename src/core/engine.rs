use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting scrape run");

        tracing::info!("Fetching result pages...");
        let harvest = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} listings and {} short names",
            harvest.listings.len(),
            harvest.short_names.len()
        );

        tracing::info!("Reshaping listings...");
        let result = self.pipeline.transform(harvest).await?;
        tracing::info!(
            "Kept {} rows, dropped {} without contact digits",
            result.rows.len(),
            result.dropped
        );

        tracing::info!("Exporting...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
