use crate::config::toml_config::TomlConfig;
use crate::config::{AnalysisSettings, CatalogSettings, HttpSettings, MenuSettings};
use crate::utils::error::Result;
use clap::Parser;

fn load_toml(path: Option<&str>) -> Result<TomlConfig> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)
        }
        None => Ok(TomlConfig::default()),
    }
}

fn apply_timeout(http: &mut HttpSettings, timeout_seconds: Option<u64>) {
    if let Some(timeout) = timeout_seconds {
        http.timeout_seconds = Some(timeout);
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "scrape-etl")]
#[command(about = "Scrape a paginated book catalogue into a CSV table")]
pub struct CatalogArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// First listing page
    #[arg(long)]
    pub start_url: Option<String>,

    /// Base URL that relative "next" links are resolved against
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output directory
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Output formats: csv, tsv, json")]
    pub output_formats: Vec<String>,

    /// Stop after this many pages (unbounded by default)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CatalogArgs {
    /// 命令列 > 設定檔 > 內建預設值
    pub fn resolve(&self) -> Result<CatalogSettings> {
        let mut settings = load_toml(self.config.as_deref())?.catalog_settings();

        if let Some(start_url) = &self.start_url {
            settings.start_url = start_url.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }
        if !self.output_formats.is_empty() {
            settings.output_formats = self.output_formats.clone();
        }
        if self.max_pages.is_some() {
            settings.max_pages = self.max_pages;
        }
        apply_timeout(&mut settings.http, self.timeout_seconds);

        Ok(settings)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "menu_etl")]
#[command(about = "Scrape a styled-span menu page into a spreadsheet")]
pub struct MenuArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Menu page URL
    #[arg(long)]
    pub url: Option<String>,

    /// Output directory
    #[arg(long)]
    pub output_path: Option<String>,

    /// Spreadsheet file name
    #[arg(long)]
    pub file_name: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Output formats: xlsx, json")]
    pub output_formats: Vec<String>,

    /// Font-family token marking category headings
    #[arg(long)]
    pub heading_token: Option<String>,

    /// Font-family token marking item names and prices
    #[arg(long)]
    pub body_token: Option<String>,

    /// Symbol that distinguishes a price line from an item name
    #[arg(long)]
    pub currency_marker: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl MenuArgs {
    pub fn resolve(&self) -> Result<MenuSettings> {
        let mut settings = load_toml(self.config.as_deref())?.menu_settings();

        if let Some(url) = &self.url {
            settings.url = url.clone();
        }
        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }
        if let Some(file_name) = &self.file_name {
            settings.file_name = file_name.clone();
        }
        if !self.output_formats.is_empty() {
            settings.output_formats = self.output_formats.clone();
        }
        if let Some(token) = &self.heading_token {
            settings.heading_token = token.clone();
        }
        if let Some(token) = &self.body_token {
            settings.body_token = token.clone();
        }
        if let Some(marker) = &self.currency_marker {
            settings.currency_marker = marker.clone();
        }
        apply_timeout(&mut settings.http, self.timeout_seconds);

        Ok(settings)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "analyze_books")]
#[command(about = "Print statistics and charts for a scraped book table")]
pub struct AnalyzeArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV produced by the catalog scraper
    #[arg(short, long)]
    pub input: Option<String>,

    /// Currency symbol stripped from the price column
    #[arg(long)]
    pub currency_symbol: Option<String>,

    /// Number of books listed as most expensive / cheapest
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Number of title words shown in the word chart
    #[arg(long)]
    pub top_words: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl AnalyzeArgs {
    pub fn resolve(&self) -> Result<AnalysisSettings> {
        let mut settings = load_toml(self.config.as_deref())?.analysis_settings();

        if let Some(input) = &self.input {
            settings.input_path = input.clone();
        }
        if let Some(symbol) = &self.currency_symbol {
            settings.currency_symbol = symbol.clone();
        }
        if let Some(top_n) = self.top_n {
            settings.top_n = top_n;
        }
        if let Some(top_words) = self.top_words {
            settings.top_words = top_words;
        }

        Ok(settings)
    }
}
