use crate::utils::error::{Result, ScrapeError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 基底網址必須以 `/` 結尾，否則 `Url::join` 會丟掉最後一段路徑
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_url(field_name, url_str)?;
    if !url_str.ends_with('/') {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "Base URL must end with '/'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_output_formats(
    field_name: &str,
    formats: &[String],
    allowed_formats: &[&str],
) -> Result<()> {
    if formats.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    let allowed_set: HashSet<&str> = allowed_formats.iter().copied().collect();
    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(ScrapeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    allowed_formats.join(", ")
                ),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog.start_url", "https://example.com").is_ok());
        assert!(validate_url("catalog.start_url", "http://example.com").is_ok());
        assert!(validate_url("catalog.start_url", "").is_err());
        assert!(validate_url("catalog.start_url", "invalid-url").is_err());
        assert!(validate_url("catalog.start_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_base_url_requires_trailing_slash() {
        assert!(validate_base_url("catalog.base_url", "http://books.toscrape.com/catalogue/").is_ok());
        assert!(validate_base_url("catalog.base_url", "http://books.toscrape.com/catalogue").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("catalog.max_pages", 5, 1).is_ok());
        assert!(validate_positive_number("catalog.max_pages", 0, 1).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_output_formats("catalog.output_formats", &formats, &["csv", "tsv", "json"]).is_ok());

        let invalid = vec!["parquet".to_string()];
        assert!(validate_output_formats("catalog.output_formats", &invalid, &["csv", "tsv", "json"]).is_err());
        assert!(validate_output_formats("catalog.output_formats", &[], &["csv"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("menu.currency_marker", "₹").is_ok());
        assert!(validate_non_empty_string("menu.currency_marker", "  ").is_err());
    }
}
