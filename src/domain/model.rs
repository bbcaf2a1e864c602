use serde::Serialize;

/// One listing block as scraped from a result page.
#[derive(Debug, Clone, Serialize)]
pub struct RawListing {
    /// Full trimmed text of the block, `·`-delimited.
    pub blob: String,
    /// First href inside the block, if any.
    pub link: Option<String>,
}

/// Everything collected across the paginated fetch loop.
#[derive(Debug, Clone, Default)]
pub struct ScrapeHarvest {
    pub listings: Vec<RawListing>,
    pub short_names: Vec<String>,
}

/// One spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub link: Option<String>,
    /// Short name matched against the blob, empty when nothing matched.
    pub name: String,
    /// First `·`-separated field of the blob.
    pub name_review: String,
    /// Combined contact digit runs.
    pub contact: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<ExportRow>,
    /// Listings rejected for lacking a plausible contact number.
    pub dropped: usize,
    pub raw_listings: Vec<RawListing>,
}
