#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_base_url, validate_non_empty_string, validate_output_formats, validate_path,
    validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CATALOG_START_URL: &str =
    "https://books.toscrape.com/catalogue/category/books/fiction_10/index.html";
pub const DEFAULT_CATALOG_BASE_URL: &str = "http://books.toscrape.com/catalogue/";
pub const DEFAULT_MENU_URL: &str = "https://www.monkeytribe.com/cafevagamon";

pub const CATALOG_FORMATS: [&str; 3] = ["csv", "tsv", "json"];
pub const MENU_FORMATS: [&str; 2] = ["xlsx", "json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// `None` 或 0 表示不設逾時
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: Some(30),
            user_agent: concat!("scrape-etl/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Validate for HttpSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("http.user_agent", &self.user_agent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    pub start_url: String,
    pub base_url: String,
    pub output_path: String,
    pub file_stem: String,
    pub output_formats: Vec<String>,
    pub max_pages: Option<usize>,
    pub http: HttpSettings,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_CATALOG_START_URL.to_string(),
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            output_path: ".".to_string(),
            file_stem: "books".to_string(),
            output_formats: vec!["csv".to_string()],
            max_pages: None,
            http: HttpSettings::default(),
        }
    }
}

impl CatalogSettings {
    pub fn file_name(&self, format: &str) -> String {
        format!("{}.{}", self.file_stem, format)
    }
}

impl Validate for CatalogSettings {
    fn validate(&self) -> Result<()> {
        validate_url("catalog.start_url", &self.start_url)?;
        validate_base_url("catalog.base_url", &self.base_url)?;
        validate_path("catalog.output_path", &self.output_path)?;
        validate_non_empty_string("catalog.file_stem", &self.file_stem)?;
        validate_output_formats("catalog.output_formats", &self.output_formats, &CATALOG_FORMATS)?;
        if let Some(max_pages) = self.max_pages {
            validate_positive_number("catalog.max_pages", max_pages, 1)?;
        }
        self.http.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSettings {
    pub url: String,
    pub fragment_selector: String,
    pub heading_token: String,
    pub body_token: String,
    pub currency_marker: String,
    pub output_path: String,
    pub file_name: String,
    pub output_formats: Vec<String>,
    pub http: HttpSettings,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_MENU_URL.to_string(),
            fragment_selector: "span.wixui-rich-text__text".to_string(),
            heading_token: "trend-sans-w00-four".to_string(),
            body_token: "cinzel".to_string(),
            currency_marker: "₹".to_string(),
            output_path: ".".to_string(),
            file_name: "menu.xlsx".to_string(),
            output_formats: vec!["xlsx".to_string()],
            http: HttpSettings::default(),
        }
    }
}

impl MenuSettings {
    /// `xlsx` 使用設定的檔名，其他格式沿用同一個檔名主幹
    pub fn file_name_for(&self, format: &str) -> String {
        if format == "xlsx" {
            return self.file_name.clone();
        }
        let stem = self
            .file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name);
        format!("{}.{}", stem, format)
    }
}

impl Validate for MenuSettings {
    fn validate(&self) -> Result<()> {
        validate_url("menu.url", &self.url)?;
        validate_non_empty_string("menu.fragment_selector", &self.fragment_selector)?;
        validate_non_empty_string("menu.heading_token", &self.heading_token)?;
        validate_non_empty_string("menu.body_token", &self.body_token)?;
        validate_non_empty_string("menu.currency_marker", &self.currency_marker)?;
        validate_path("menu.output_path", &self.output_path)?;
        validate_path("menu.file_name", &self.file_name)?;
        validate_output_formats("menu.output_formats", &self.output_formats, &MENU_FORMATS)?;
        self.http.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub input_path: String,
    pub currency_symbol: String,
    pub top_n: usize,
    pub top_words: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            input_path: "books.csv".to_string(),
            currency_symbol: "£".to_string(),
            top_n: 5,
            top_words: 20,
        }
    }
}

impl Validate for AnalysisSettings {
    fn validate(&self) -> Result<()> {
        validate_path("analysis.input_path", &self.input_path)?;
        validate_positive_number("analysis.top_n", self.top_n, 1)?;
        validate_positive_number("analysis.top_words", self.top_words, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CatalogSettings::default().validate().is_ok());
        assert!(MenuSettings::default().validate().is_ok());
        assert!(AnalysisSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let http = HttpSettings {
            timeout_seconds: Some(0),
            ..HttpSettings::default()
        };
        assert_eq!(http.timeout(), None);
        assert_eq!(HttpSettings::default().timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_menu_file_names_share_stem() {
        let settings = MenuSettings::default();
        assert_eq!(settings.file_name_for("xlsx"), "menu.xlsx");
        assert_eq!(settings.file_name_for("json"), "menu.json");
    }

    #[test]
    fn test_catalog_rejects_zero_max_pages() {
        let settings = CatalogSettings {
            max_pages: Some(0),
            ..CatalogSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
