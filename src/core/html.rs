//! Class-selector extraction of listing blocks from a result page.

use crate::domain::model::{RawListing, ScrapeHarvest};
use crate::utils::error::{Result, ScrapeError};
use scraper::{Html, Selector};

pub struct ListingSelectors {
    listing: Selector,
    short_name: Selector,
    link: Selector,
}

impl ListingSelectors {
    pub fn new(listing: &str, short_name: &str) -> Result<Self> {
        Ok(Self {
            listing: parse_selector(listing)?,
            short_name: parse_selector(short_name)?,
            link: parse_selector("a[href]")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Pull listing blobs, their first link, and the secondary short names
/// out of one page of HTML.
pub fn parse_listing_page(html: &str, selectors: &ListingSelectors) -> ScrapeHarvest {
    let document = Html::parse_document(html);
    let mut harvest = ScrapeHarvest::default();

    for block in document.select(&selectors.listing) {
        let blob = block.text().collect::<String>().trim().to_string();
        let link = block
            .select(&selectors.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);
        harvest.listings.push(RawListing { blob, link });
    }

    for element in document.select(&selectors.short_name) {
        let text = element.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            harvest.short_names.push(text);
        }
    }

    harvest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> ListingSelectors {
        ListingSelectors::new("div.VkpGBb", "div.dbg0pd").unwrap()
    }

    #[test]
    fn test_parse_empty_document() {
        let harvest = parse_listing_page("<html><body></body></html>", &selectors());
        assert!(harvest.listings.is_empty());
        assert!(harvest.short_names.is_empty());
    }

    #[test]
    fn test_parse_listing_with_link() {
        let html = r#"
        <html><body>
            <div class="VkpGBb">
                <a href="https://example.com/alpha">Alpha Realty</a> · 4.8(52) · Agency · 098 765 4321
            </div>
            <div class="dbg0pd">Alpha Realty</div>
        </body></html>
        "#;

        let harvest = parse_listing_page(html, &selectors());
        assert_eq!(harvest.listings.len(), 1);
        assert_eq!(
            harvest.listings[0].link.as_deref(),
            Some("https://example.com/alpha")
        );
        assert!(harvest.listings[0].blob.starts_with("Alpha Realty"));
        assert!(harvest.listings[0].blob.contains("098 765 4321"));
        assert_eq!(harvest.short_names, vec!["Alpha Realty"]);
    }

    #[test]
    fn test_parse_listing_without_link() {
        let html = r#"<div class="VkpGBb">Beta Bakery · 4.1(10) · Bakery</div>"#;

        let harvest = parse_listing_page(html, &selectors());
        assert_eq!(harvest.listings.len(), 1);
        assert!(harvest.listings[0].link.is_none());
        assert_eq!(harvest.listings[0].blob, "Beta Bakery · 4.1(10) · Bakery");
    }

    #[test]
    fn test_parse_multiple_blocks_in_order() {
        let html = r#"
        <div class="VkpGBb"><a href="/first">First</a></div>
        <div class="VkpGBb"><a href="/second">Second</a></div>
        <div class="dbg0pd">First</div>
        <div class="dbg0pd">Second</div>
        "#;

        let harvest = parse_listing_page(html, &selectors());
        assert_eq!(harvest.listings.len(), 2);
        assert_eq!(harvest.listings[0].link.as_deref(), Some("/first"));
        assert_eq!(harvest.listings[1].link.as_deref(), Some("/second"));
        assert_eq!(harvest.short_names, vec!["First", "Second"]);
    }

    #[test]
    fn test_empty_short_names_are_skipped() {
        let html = r#"<div class="dbg0pd">   </div><div class="dbg0pd">Gamma Gym</div>"#;

        let harvest = parse_listing_page(html, &selectors());
        assert_eq!(harvest.short_names, vec!["Gamma Gym"]);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let result = ListingSelectors::new("div[", "div.dbg0pd");
        assert!(matches!(result, Err(ScrapeError::Selector { .. })));
    }
}
