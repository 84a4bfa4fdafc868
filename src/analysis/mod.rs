//! Read-back and statistics for the catalog table.

pub mod report;
pub mod stats;

use crate::domain::model::Rating;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScrapeError};
use serde::Deserialize;

/// 清理後的一筆書目：價格為數值、星等為有序列舉
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub price: f64,
    pub availability: String,
    pub rating: Option<Rating>,
}

#[derive(Debug, Deserialize)]
struct RawBookRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Availability", default)]
    availability: String,
    #[serde(rename = "Rating", default)]
    rating: String,
}

/// Strips every occurrence of `currency_symbol` and parses the rest.
pub fn parse_price(text: &str, currency_symbol: &str) -> Result<f64> {
    let cleaned = text.replace(currency_symbol, "");
    cleaned.trim().parse::<f64>().map_err(|e| {
        ScrapeError::processing(format!("could not parse price {:?}: {}", text, e))
    })
}

fn parse_rating(text: &str) -> Option<Rating> {
    if text.trim().is_empty() {
        return None;
    }
    match text.parse::<Rating>() {
        Ok(rating) => Some(rating),
        Err(reason) => {
            tracing::debug!("Treating rating as missing: {}", reason);
            None
        }
    }
}

/// 解析 CSV 內容並清理價格與星等欄位
pub fn parse_books(data: &[u8], currency_symbol: &str) -> Result<Vec<BookRecord>> {
    let mut reader = csv::ReaderBuilder::new().from_reader(data);
    let mut records = Vec::new();

    for row in reader.deserialize::<RawBookRow>() {
        let row = row?;
        records.push(BookRecord {
            price: parse_price(&row.price, currency_symbol)?,
            rating: parse_rating(&row.rating),
            title: row.title,
            availability: row.availability,
        });
    }

    Ok(records)
}

/// Loads and cleans the catalog table. A missing file is logged and yields
/// `Ok(None)`.
pub async fn load_books<S: Storage>(
    storage: &S,
    path: &str,
    currency_symbol: &str,
) -> Result<Option<Vec<BookRecord>>> {
    let data = match storage.read_file(path).await {
        Ok(data) => data,
        Err(ScrapeError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!("❌ File not found at {}", path);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let records = parse_books(&data, currency_symbol)?;
    tracing::info!("📊 Loaded {} books from {}", records.len(), path);
    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_parse_price_strips_currency() {
        assert_eq!(parse_price("£51.77", "£").unwrap(), 51.77);
        assert_eq!(parse_price(" £ 9.5 ", "£").unwrap(), 9.5);
        assert!(parse_price("free", "£").is_err());
    }

    #[test]
    fn test_parse_books_cleans_columns() {
        let csv = "Title,Price,Availability,Rating\n\
                   A Light in the Attic,£51.77,In stock,three\n\
                   Mystery,£10.00,In stock,\n";

        let books = parse_books(csv.as_bytes(), "£").unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].price, 51.77);
        assert_eq!(books[0].rating, Some(Rating::Three));
        assert_eq!(books[1].rating, None);
    }

    #[test]
    fn test_bad_price_is_processing_error() {
        let csv = "Title,Price,Availability,Rating\nBroken,N/A,In stock,one\n";
        assert!(matches!(
            parse_books(csv.as_bytes(), "£"),
            Err(ScrapeError::Processing { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_yields_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let result = load_books(&storage, "books.csv", "£").await.unwrap();
        assert!(result.is_none());
    }
}
