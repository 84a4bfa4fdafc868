use crate::config::{AnalysisSettings, CatalogSettings, HttpSettings, MenuSettings};
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔；所有欄位皆可省略，省略時使用內建預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub http: HttpSection,
    pub catalog: CatalogSection,
    pub menu: MenuSection,
    pub analysis: AnalysisSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub start_url: Option<String>,
    pub base_url: Option<String>,
    pub output_path: Option<String>,
    pub file_stem: Option<String>,
    pub output_formats: Option<Vec<String>>,
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSection {
    pub url: Option<String>,
    pub fragment_selector: Option<String>,
    pub heading_token: Option<String>,
    pub body_token: Option<String>,
    pub currency_marker: Option<String>,
    pub output_path: Option<String>,
    pub file_name: Option<String>,
    pub output_formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub input_path: Option<String>,
    pub currency_symbol: Option<String>,
    pub top_n: Option<usize>,
    pub top_words: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MENU_URL})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn http_settings(&self) -> HttpSettings {
        let defaults = HttpSettings::default();
        HttpSettings {
            timeout_seconds: self.http.timeout_seconds.or(defaults.timeout_seconds),
            user_agent: self.http.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        let defaults = CatalogSettings::default();
        let section = &self.catalog;
        CatalogSettings {
            start_url: section.start_url.clone().unwrap_or(defaults.start_url),
            base_url: section.base_url.clone().unwrap_or(defaults.base_url),
            output_path: section.output_path.clone().unwrap_or(defaults.output_path),
            file_stem: section.file_stem.clone().unwrap_or(defaults.file_stem),
            output_formats: section
                .output_formats
                .clone()
                .unwrap_or(defaults.output_formats),
            max_pages: section.max_pages.or(defaults.max_pages),
            http: self.http_settings(),
        }
    }

    pub fn menu_settings(&self) -> MenuSettings {
        let defaults = MenuSettings::default();
        let section = &self.menu;
        MenuSettings {
            url: section.url.clone().unwrap_or(defaults.url),
            fragment_selector: section
                .fragment_selector
                .clone()
                .unwrap_or(defaults.fragment_selector),
            heading_token: section.heading_token.clone().unwrap_or(defaults.heading_token),
            body_token: section.body_token.clone().unwrap_or(defaults.body_token),
            currency_marker: section
                .currency_marker
                .clone()
                .unwrap_or(defaults.currency_marker),
            output_path: section.output_path.clone().unwrap_or(defaults.output_path),
            file_name: section.file_name.clone().unwrap_or(defaults.file_name),
            output_formats: section
                .output_formats
                .clone()
                .unwrap_or(defaults.output_formats),
            http: self.http_settings(),
        }
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        let defaults = AnalysisSettings::default();
        let section = &self.analysis;
        AnalysisSettings {
            input_path: section.input_path.clone().unwrap_or(defaults.input_path),
            currency_symbol: section
                .currency_symbol
                .clone()
                .unwrap_or(defaults.currency_symbol),
            top_n: section.top_n.unwrap_or(defaults.top_n),
            top_words: section.top_words.unwrap_or(defaults.top_words),
        }
    }
}
