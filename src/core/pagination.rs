use crate::adapters::HttpFetcher;
use crate::domain::model::CatalogItem;
use crate::extract::parse_catalog_page;
use crate::utils::error::Result;
use std::collections::HashSet;
use url::Url;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 相對的 "next" 連結一律以此為基底
    pub base_url: Url,
    /// `None` 表示不限頁數
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndOfCatalog,
    TransportFailure { url: String, reason: String },
    PageLimit,
}

#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub items: Vec<CatalogItem>,
    pub pages_fetched: usize,
    pub stop: StopReason,
}

/// Follows "next" links from `start_url` until a page has none.
///
/// A transport failure ends the crawl with whatever was collected so far.
/// Markup faults on required fields propagate.
pub async fn crawl_catalog(
    fetcher: &HttpFetcher,
    start_url: &str,
    options: &CrawlOptions,
) -> Result<CrawlOutcome> {
    let mut items = Vec::new();
    let mut visited = HashSet::new();
    let mut pages_fetched = 0;
    let mut url = start_url.to_string();

    let stop = loop {
        if options.max_pages.is_some_and(|max| pages_fetched >= max) {
            tracing::info!("⏹️ Reached page limit of {} pages", pages_fetched);
            break StopReason::PageLimit;
        }

        if !visited.insert(url.clone()) {
            tracing::warn!("🔁 Revisiting {}, the catalogue links back on itself", url);
        }

        let html = match fetcher.fetch_html(&url).await {
            Ok(html) => html,
            Err(e) if e.is_transport() => {
                tracing::error!("❌ Failed to retrieve the webpage {}: {}", url, e);
                break StopReason::TransportFailure {
                    url,
                    reason: e.to_string(),
                };
            }
            Err(e) => return Err(e),
        };
        pages_fetched += 1;

        let page = parse_catalog_page(&html)?;
        tracing::info!(
            "📄 Page {}: {} items from {}",
            pages_fetched,
            page.items.len(),
            url
        );
        items.extend(page.items);

        match page.next {
            Some(href) => {
                url = options.base_url.join(&href)?.to_string();
                tracing::debug!("Next page: {}", url);
            }
            None => break StopReason::EndOfCatalog,
        }
    };

    Ok(CrawlOutcome {
        items,
        pages_fetched,
        stop,
    })
}
