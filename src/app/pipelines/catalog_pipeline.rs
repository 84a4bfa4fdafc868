use crate::adapters::HttpFetcher;
use crate::app::pipelines::write_outputs;
use crate::config::CatalogSettings;
use crate::core::pagination::{crawl_catalog, CrawlOptions, StopReason};
use crate::core::{CatalogItem, OutputFile, Pipeline, Storage, TransformResult};
use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub const CATALOG_HEADERS: [&str; 4] = ["Title", "Price", "Availability", "Rating"];

/// 書目爬蟲：分頁抓取 → 表格 → 檔案
pub struct CatalogPipeline<S: Storage> {
    storage: S,
    settings: CatalogSettings,
    fetcher: HttpFetcher,
}

impl<S: Storage> CatalogPipeline<S> {
    pub fn new(storage: S, settings: CatalogSettings) -> Result<Self> {
        let fetcher = HttpFetcher::new(&settings.http)?;
        Ok(Self {
            storage,
            settings,
            fetcher,
        })
    }
}

/// 以指定分隔符輸出書目表格，價格保留原始文字
pub fn catalog_table(items: &[CatalogItem], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(CATALOG_HEADERS)?;
    for item in items {
        writer.write_record([
            item.title.as_str(),
            item.price.as_str(),
            item.availability.as_str(),
            item.rating.map(|r| r.as_str()).unwrap_or(""),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for CatalogPipeline<S> {
    type Extracted = Vec<CatalogItem>;

    async fn extract(&self) -> Result<Vec<CatalogItem>> {
        tracing::info!("🚀 Starting catalog crawl from: {}", self.settings.start_url);

        let options = CrawlOptions {
            base_url: Url::parse(&self.settings.base_url)?,
            max_pages: self.settings.max_pages,
        };
        let outcome = crawl_catalog(&self.fetcher, &self.settings.start_url, &options).await?;

        match &outcome.stop {
            StopReason::EndOfCatalog => tracing::info!(
                "✅ Reached the last page after {} pages",
                outcome.pages_fetched
            ),
            StopReason::PageLimit => tracing::warn!(
                "⚠️ Stopped at the configured limit of {} pages",
                outcome.pages_fetched
            ),
            StopReason::TransportFailure { url, .. } => tracing::warn!(
                "⚠️ Keeping {} items collected before {} failed",
                outcome.items.len(),
                url
            ),
        }

        Ok(outcome.items)
    }

    async fn transform(&self, data: Vec<CatalogItem>) -> Result<TransformResult> {
        let mut outputs = Vec::with_capacity(self.settings.output_formats.len());

        for format in &self.settings.output_formats {
            let bytes = match format.as_str() {
                "csv" => catalog_table(&data, b',')?,
                "tsv" => catalog_table(&data, b'\t')?,
                "json" => serde_json::to_vec_pretty(&data)?,
                other => {
                    return Err(ScrapeError::InvalidConfigValueError {
                        field: "catalog.output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };
            outputs.push(OutputFile {
                file_name: self.settings.file_name(format),
                bytes,
            });
        }

        Ok(TransformResult {
            record_count: data.len(),
            outputs,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        write_outputs(&self.storage, &self.settings.output_path, result.outputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Rating;
    use crate::extract::catalog::tests::{book_article, listing_page};
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScrapeError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn item(title: &str, price: &str, rating: Option<Rating>) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            price: price.to_string(),
            availability: "In stock".to_string(),
            rating,
        }
    }

    #[test]
    fn test_catalog_table_layout() {
        let table = catalog_table(
            &[
                item("A Light in the Attic", "£51.77", Some(Rating::Three)),
                item("Unrated, with comma", "£9.00", None),
            ],
            b',',
        )
        .unwrap();

        let text = String::from_utf8(table).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title,Price,Availability,Rating");
        assert_eq!(lines[1], "A Light in the Attic,£51.77,In stock,three");
        assert_eq!(lines[2], "\"Unrated, with comma\",£9.00,In stock,");
    }

    #[test]
    fn test_catalog_table_empty_has_header_only() {
        let text = String::from_utf8(catalog_table(&[], b',').unwrap()).unwrap();
        assert_eq!(text, "Title,Price,Availability,Rating\n");
    }

    #[tokio::test]
    async fn test_transform_emits_each_format() {
        let settings = CatalogSettings {
            output_formats: vec!["csv".to_string(), "tsv".to_string(), "json".to_string()],
            ..CatalogSettings::default()
        };
        let pipeline = CatalogPipeline::new(MockStorage::new(), settings).unwrap();

        let result = pipeline
            .transform(vec![item("Sharp Objects", "£47.82", Some(Rating::Four))])
            .await
            .unwrap();

        assert_eq!(result.record_count, 1);
        let names: Vec<&str> = result.outputs.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, vec!["books.csv", "books.tsv", "books.json"]);

        let tsv = String::from_utf8(result.outputs[1].bytes.clone()).unwrap();
        assert!(tsv.starts_with("Title\tPrice\tAvailability\tRating\n"));

        let json: serde_json::Value = serde_json::from_slice(&result.outputs[2].bytes).unwrap();
        assert_eq!(json[0]["rating"], "four");
        assert_eq!(json[0]["price"], "£47.82");
    }

    #[tokio::test]
    async fn test_pipeline_extract_and_load() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/catalogue/index.html");
            then.status(200).body(listing_page(
                &[
                    book_article("Soumission", "£50.10", Some("One")),
                    book_article("Sapiens", "£54.23", Some("Five")),
                ],
                None,
            ));
        });

        let settings = CatalogSettings {
            start_url: server.url("/catalogue/index.html"),
            base_url: server.url("/catalogue/"),
            output_path: "out".to_string(),
            ..CatalogSettings::default()
        };
        let storage = MockStorage::new();
        let pipeline = CatalogPipeline::new(storage.clone(), settings).unwrap();

        let items = pipeline.extract().await.unwrap();
        assert_eq!(items.len(), 2);

        let result = pipeline.transform(items).await.unwrap();
        let path = pipeline.load(result).await.unwrap();
        assert!(path.ends_with("books.csv"));

        let csv = String::from_utf8(storage.get_file("books.csv").await.unwrap()).unwrap();
        assert!(csv.contains("Soumission,£50.10,In stock,one"));
        assert!(csv.contains("Sapiens,£54.23,In stock,five"));
    }
}
