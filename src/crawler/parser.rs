//! HTML extraction for directory category pages
//!
//! This module handles parsing category pages to extract:
//! - Listed sites (name, link target) from "site title" blocks
//! - Subcategory hrefs from "leaf-node category list" containers
//!
//! All lookups are scoped to the page's primary content container, whose
//! presence is also what makes a fetched page usable.

use crate::category::CategoryPath;
use crate::config::{parse_selector, PageConfig};
use crate::output::SiteEntry;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// A parsed category page known to contain the primary container
#[derive(Debug)]
pub struct PageContent {
    document: Html,
}

/// Compiled selectors for the directory's page layout
#[derive(Debug, Clone)]
pub struct PageExtractor {
    container: Selector,
    site_title: Selector,
    site_link: Selector,
    category_list: Selector,
    category_item: Selector,
    category_link: Selector,
}

impl PageExtractor {
    /// Compiles the selectors from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSelector` for the first selector that
    /// does not parse.
    pub fn new(config: &PageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            container: parse_selector(&config.container)?,
            site_title: parse_selector(&config.site_title)?,
            site_link: parse_selector(&config.site_link)?,
            category_list: parse_selector(&config.category_list)?,
            category_item: parse_selector(&config.category_item)?,
            category_link: parse_selector(&config.category_link)?,
        })
    }

    /// Parses a page body
    ///
    /// Returns `None` when the primary content container is absent, which
    /// callers treat as an unusable fetch.
    ///
    /// # Example
    ///
    /// ```
    /// use canopy_crawler::config::PageConfig;
    /// use canopy_crawler::crawler::PageExtractor;
    ///
    /// let extractor = PageExtractor::new(&PageConfig::default()).unwrap();
    /// assert!(extractor.parse("<html><body><div></div></body></html>").is_some());
    /// assert!(extractor.parse("<html><body>Too many requests</body></html>").is_none());
    /// ```
    pub fn parse(&self, body: &str) -> Option<PageContent> {
        let document = Html::parse_document(body);
        if document.select(&self.container).next().is_none() {
            return None;
        }
        Some(PageContent { document })
    }

    fn container<'a>(&self, page: &'a PageContent) -> Option<ElementRef<'a>> {
        page.document.select(&self.container).next()
    }

    /// Extracts the sites listed on a page, in document order
    ///
    /// Each site-title block contributes one entry built from its anchor's
    /// text and href. Blocks without an anchor, or whose anchor has no
    /// text, are skipped. A missing href yields an empty URL.
    ///
    /// # Arguments
    ///
    /// * `page` - The parsed page
    /// * `category` - The category the page was fetched for
    pub fn extract_entries(&self, page: &PageContent, category: &CategoryPath) -> Vec<SiteEntry> {
        let Some(container) = self.container(page) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        let mut selected = HashSet::new();

        for block in container.select(&self.site_title) {
            if !selected.insert(block.id()) {
                continue;
            }

            let Some(anchor) = block.select(&self.site_link).next() else {
                tracing::trace!("Site block without link under {}", category);
                continue;
            };

            let name: String = anchor.text().collect();
            if name.trim().is_empty() {
                tracing::trace!("Site link without text under {}", category);
                continue;
            }

            entries.push(SiteEntry {
                name,
                url: anchor.value().attr("href").unwrap_or_default().to_string(),
                category: category.to_string(),
            });
        }

        entries
    }

    /// Extracts subcategory hrefs from every category list on a page
    ///
    /// Hrefs are returned flattened across lists in document order.
    /// Duplicates are kept; the frontier's visited set handles them.
    pub fn extract_subcategories(&self, page: &PageContent) -> Vec<String> {
        let Some(container) = self.container(page) else {
            return Vec::new();
        };

        let mut subcategories = Vec::new();

        for list in container.select(&self.category_list) {
            for item in list.select(&self.category_item) {
                match item
                    .select(&self.category_link)
                    .next()
                    .and_then(|anchor| anchor.value().attr("href"))
                {
                    Some(href) => subcategories.push(href.to_string()),
                    None => tracing::trace!("Category item without href"),
                }
            }
        }

        subcategories
    }
}
