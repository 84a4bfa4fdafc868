//! Listing-page parsing for the book catalogue.
//!
//! Title and price are required; a page without them is treated as a layout
//! change and fails the run. Availability and rating degrade to empty values.

use crate::domain::model::{CatalogItem, CatalogPage, Rating};
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

const CONTAINER: &str = "article.product_pod";
const TITLE: &str = "h3 a";
const PRICE: &str = "p.price_color";
const AVAILABILITY: &str = "p.instock.availability";
const RATING: &str = "p.star-rating";
const NEXT: &str = "li.next";
const LINK: &str = "a";

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::ConfigError {
        message: format!("invalid CSS selector '{}': {}", css, e),
    })
}

struct CatalogSelectors {
    container: Selector,
    title: Selector,
    price: Selector,
    availability: Selector,
    rating: Selector,
    next: Selector,
    link: Selector,
}

impl CatalogSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            container: selector(CONTAINER)?,
            title: selector(TITLE)?,
            price: selector(PRICE)?,
            availability: selector(AVAILABILITY)?,
            rating: selector(RATING)?,
            next: selector(NEXT)?,
            link: selector(LINK)?,
        })
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 解析一個列表頁：所有書目（依文件順序）以及下一頁的相對連結
pub fn parse_catalog_page(html: &str) -> Result<CatalogPage> {
    let selectors = CatalogSelectors::new()?;
    let document = Html::parse_document(html);

    let items = document
        .select(&selectors.container)
        .map(|container| extract_item(container, &selectors))
        .collect::<Result<Vec<_>>>()?;

    let next = match document.select(&selectors.next).next() {
        Some(indicator) => {
            let href = indicator
                .select(&selectors.link)
                .next()
                .and_then(|link| link.value().attr("href"))
                .ok_or_else(|| {
                    ScrapeError::markup("next", "next-page indicator has no link")
                })?;
            Some(href.to_string())
        }
        None => None,
    };

    Ok(CatalogPage { items, next })
}

fn extract_item(container: ElementRef<'_>, selectors: &CatalogSelectors) -> Result<CatalogItem> {
    let title = container
        .select(&selectors.title)
        .next()
        .and_then(|link| link.value().attr("title"))
        .ok_or_else(|| ScrapeError::markup("title", "item has no 'h3 a[title]'"))?
        .to_string();

    let price = container
        .select(&selectors.price)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::markup("price", format!("'{}' has no price element", title)))?;

    let availability = match container.select(&selectors.availability).next() {
        Some(element) => element_text(element),
        None => {
            tracing::debug!("No availability element for '{}'", title);
            String::new()
        }
    };

    let rating = container
        .select(&selectors.rating)
        .next()
        .and_then(|element| rating_from_class(element.value().attr("class"), &title));

    Ok(CatalogItem {
        title,
        price,
        availability,
        rating,
    })
}

/// 星等寫在 class 的第二個 token，例如 `star-rating Three`
fn rating_from_class(class_attr: Option<&str>, title: &str) -> Option<Rating> {
    let token = class_attr?.split_whitespace().nth(1);
    match token.map(|t| t.to_lowercase().parse::<Rating>()) {
        Some(Ok(rating)) => Some(rating),
        Some(Err(reason)) => {
            tracing::debug!("Ignoring rating for '{}': {}", title, reason);
            None
        }
        None => {
            tracing::debug!("Rating indicator for '{}' has no rating token", title);
            None
        }
    }
}
