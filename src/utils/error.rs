use thiserror::Error;

/// Fallback shown when the backend gave no usable message.
pub const BACKEND_UNREACHABLE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Please login to add to cart")]
    Unauthenticated,

    #[error("Item already in cart. Use the cart sidebar to update quantity or remove item.")]
    DuplicateItem { product_id: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(#[from] reqwest::Error),

    #[error("Cart update failed: {message}")]
    MutationFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StorefrontError {
    pub fn validation(field: &str, message: &str) -> Self {
        StorefrontError::ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Message the backend attached to a failed response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            StorefrontError::NotFound { message }
            | StorefrontError::Rejected { message, .. }
            | StorefrontError::ServerError { message, .. }
            | StorefrontError::MutationFailed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Precondition failures are resolved locally and never reach the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            StorefrontError::ValidationError { .. }
                | StorefrontError::Unauthenticated
                | StorefrontError::DuplicateItem { .. }
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StorefrontError::ValidationError { .. }
            | StorefrontError::Unauthenticated
            | StorefrontError::DuplicateItem { .. }
            | StorefrontError::NotFound { .. } => ErrorSeverity::Low,
            StorefrontError::Rejected { .. }
            | StorefrontError::ServerError { .. }
            | StorefrontError::NetworkUnavailable(_)
            | StorefrontError::MutationFailed { .. } => ErrorSeverity::Medium,
            StorefrontError::ConfigError { .. }
            | StorefrontError::InvalidConfigValueError { .. }
            | StorefrontError::MissingConfigError { .. }
            | StorefrontError::SerializationError(_) => ErrorSeverity::High,
            StorefrontError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StorefrontError::NetworkUnavailable(_) => BACKEND_UNREACHABLE.to_string(),
            StorefrontError::ServerError { message, .. }
            | StorefrontError::Rejected { message, .. }
            | StorefrontError::NotFound { message }
            | StorefrontError::MutationFailed { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StorefrontError::ValidationError { .. } => "Correct the highlighted input and try again",
            StorefrontError::Unauthenticated => "Run `qkart login` first",
            StorefrontError::DuplicateItem { .. } => "Use `qkart update` to change the quantity",
            StorefrontError::NotFound { .. } => "Try a different search term or product id",
            StorefrontError::Rejected { .. } => "Check the request arguments and your session",
            StorefrontError::ServerError { .. } | StorefrontError::MutationFailed { .. } => {
                "Retry later; the backend reported a failure"
            }
            StorefrontError::NetworkUnavailable(_) => "Check the API endpoint and that the backend is running",
            StorefrontError::ConfigError { .. }
            | StorefrontError::InvalidConfigValueError { .. }
            | StorefrontError::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
            StorefrontError::IoError(_) | StorefrontError::SerializationError(_) => {
                "Check the session file location and permissions"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
