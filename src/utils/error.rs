use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unexpected markup for '{field}': {message}")]
    Markup { field: String, message: String },

    #[error("No menu categories found at {url}")]
    EmptyMenu { url: String },

    #[error("Data processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Markup,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn markup(field: &str, message: impl Into<String>) -> Self {
        Self::Markup {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    /// 是否為傳輸層錯誤（連線失敗、非 2xx 狀態碼）
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Fetch { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Fetch { .. } => ErrorCategory::Network,
            Self::Markup { .. } | Self::EmptyMenu { .. } => ErrorCategory::Markup,
            Self::Csv(_) | Self::Serialization(_) | Self::Processing { .. } => ErrorCategory::Data,
            Self::Io(_) | Self::Xlsx(_) => ErrorCategory::Storage,
            Self::Url(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Markup | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::Fetch { .. } => {
                "Check the network connection and that the target URL is reachable"
            }
            Self::Markup { .. } => {
                "The page layout has probably changed; update the selectors for this site"
            }
            Self::EmptyMenu { .. } => {
                "Check the heading/body style tokens against the page's inline styles"
            }
            Self::Csv(_) | Self::Processing { .. } => {
                "Re-run the catalog scraper to regenerate the input table"
            }
            Self::Serialization(_) | Self::Xlsx(_) | Self::Io(_) => {
                "Check that the output directory exists and is writable"
            }
            Self::Url(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the configuration file and CLI flags",
        }
    }

    /// 依嚴重程度決定結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download the page: {}", self),
            ErrorCategory::Markup => format!("Could not understand the page: {}", self),
            ErrorCategory::Data => format!("Could not process the data: {}", self),
            ErrorCategory::Storage => format!("Could not write the output: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
