use crate::utils::error::{Result, StorefrontError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StorefrontError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(StorefrontError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(StorefrontError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StorefrontError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StorefrontError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(StorefrontError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

// Form helpers. These report the user-facing message directly so callers can
// surface it as a warning without reformatting.

pub fn require_field(field_name: &str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StorefrontError::validation(field_name, message));
    }
    Ok(())
}

pub fn require_min_length(field_name: &str, value: &str, min_chars: usize, message: &str) -> Result<()> {
    if value.chars().count() < min_chars {
        return Err(StorefrontError::validation(field_name, message));
    }
    Ok(())
}

pub fn validate_product_id(product_id: &str) -> Result<()> {
    require_field("product_id", product_id, "Product id is required")
}

/// Adding needs at least one unit; updates may send 0 to remove the line.
pub fn validate_quantity(quantity: u32, adding: bool) -> Result<()> {
    if adding && quantity == 0 {
        return Err(StorefrontError::validation(
            "quantity",
            "Quantity must be at least 1 when adding to cart",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.endpoint", "https://example.com/api/v1").is_ok());
        assert!(validate_url("api.endpoint", "http://localhost:8082/api/v1").is_ok());
        assert!(validate_url("api.endpoint", "").is_err());
        assert!(validate_url("api.endpoint", "invalid-url").is_err());
        assert!(validate_url("api.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("search.debounce_ms", 500, 1).is_ok());
        assert!(validate_positive_number("search.debounce_ms", 0, 1).is_err());
    }

    #[test]
    fn test_require_field_rejects_whitespace() {
        let err = require_field("username", "   ", "Username is a required field").unwrap_err();
        assert_eq!(err.to_string(), "Username is a required field");
        assert!(require_field("username", "crio.do", "unused").is_ok());
    }

    #[test]
    fn test_require_min_length_counts_chars() {
        assert!(require_min_length("username", "abcde", 6, "too short").is_err());
        assert!(require_min_length("username", "abcdef", 6, "too short").is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0, true).is_err());
        assert!(validate_quantity(0, false).is_ok());
        assert!(validate_quantity(3, true).is_ok());
    }
}
