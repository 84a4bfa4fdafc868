use crate::adapters::HttpFetcher;
use crate::app::pipelines::write_outputs;
use crate::config::MenuSettings;
use crate::core::{FragmentClassifier, Menu, OutputFile, Pipeline, Storage, TransformResult};
use crate::extract::{build_menu, collect_fragments, StyleTokenClassifier};
use crate::utils::error::{Result, ScrapeError};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

pub const MENU_HEADERS: [&str; 3] = ["Name", "Price", "Category"];

/// 菜單爬蟲：單頁抓取 → 片段分類 → 試算表
pub struct MenuPipeline<S: Storage> {
    storage: S,
    settings: MenuSettings,
    fetcher: HttpFetcher,
    classifier: Box<dyn FragmentClassifier>,
}

impl<S: Storage> MenuPipeline<S> {
    pub fn new(storage: S, settings: MenuSettings) -> Result<Self> {
        let fetcher = HttpFetcher::new(&settings.http)?;
        let classifier = Box::new(StyleTokenClassifier::new(
            &settings.heading_token,
            &settings.body_token,
        ));
        Ok(Self {
            storage,
            settings,
            fetcher,
            classifier,
        })
    }

    /// Replaces the inline-style classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn FragmentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }
}

/// Category rows are bold with a left-aligned name and no price; item rows
/// follow their category.
pub fn menu_workbook(menu: &Menu) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let category_format = Format::new().set_bold();
    let category_name_format = Format::new().set_bold().set_align(FormatAlign::Left);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    for (col, header) in MENU_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let mut row: u32 = 1;
    for category in menu.categories() {
        worksheet.write_string_with_format(row, 0, &category.name, &category_name_format)?;
        worksheet.write_blank(row, 1, &category_format)?;
        worksheet.write_string_with_format(row, 2, "Category", &category_format)?;
        row += 1;

        for item in &category.items {
            worksheet.write_string(row, 0, &item.name)?;
            if !item.price.is_empty() {
                worksheet.write_string(row, 1, &item.price)?;
            }
            worksheet.write_string(row, 2, "Item")?;
            row += 1;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for MenuPipeline<S> {
    type Extracted = Menu;

    async fn extract(&self) -> Result<Menu> {
        tracing::info!("🚀 Fetching menu from: {}", self.settings.url);

        let html = self.fetcher.fetch_html(&self.settings.url).await.map_err(|e| {
            tracing::error!("❌ Error fetching the webpage: {}", e);
            e
        })?;

        let fragments = collect_fragments(&html, &self.settings.fragment_selector)?;
        tracing::debug!("Found {} styled fragments", fragments.len());

        let menu = build_menu(
            &fragments,
            self.classifier.as_ref(),
            &self.settings.currency_marker,
        );
        if menu.is_empty() {
            return Err(ScrapeError::EmptyMenu {
                url: self.settings.url.clone(),
            });
        }

        tracing::info!(
            "✅ Parsed {} categories with {} items",
            menu.len(),
            menu.item_count()
        );
        Ok(menu)
    }

    async fn transform(&self, data: Menu) -> Result<TransformResult> {
        let mut outputs = Vec::with_capacity(self.settings.output_formats.len());

        for format in &self.settings.output_formats {
            let bytes = match format.as_str() {
                "xlsx" => menu_workbook(&data)?,
                "json" => serde_json::to_vec_pretty(&data)?,
                other => {
                    return Err(ScrapeError::InvalidConfigValueError {
                        field: "menu.output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };
            outputs.push(OutputFile {
                file_name: self.settings.file_name_for(format),
                bytes,
            });
        }

        Ok(TransformResult {
            record_count: data.len() + data.item_count(),
            outputs,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        write_outputs(&self.storage, &self.settings.output_path, result.outputs).await
    }
}
