use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("Missing required field: {field}")]
    InputMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("A ranking holds at most {limit} products")]
    CapacityExceeded { limit: usize },

    #[error("Reorder rejected: {reason}")]
    ReorderRejected { reason: String },

    #[error("Product lookup failed: {message}")]
    LookupFailed { message: String },

    #[error("Catalog request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Ranking store lock poisoned")]
    StorePoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller sent an incomplete or malformed request.
    Client,
    /// The referenced ranking or product does not exist.
    Missing,
    /// The request is well formed but conflicts with a ranking limit.
    Limit,
    /// Configuration or startup problem.
    Configuration,
    /// Anything the caller cannot fix.
    Internal,
}

impl RankingError {
    pub fn input_missing(field: &str) -> Self {
        Self::InputMissing {
            field: field.to_string(),
        }
    }

    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn ranking_not_found(id: &str) -> Self {
        Self::NotFound {
            resource: "Ranking",
            id: id.to_string(),
        }
    }

    pub fn product_not_found(id: &str) -> Self {
        Self::NotFound {
            resource: "Product",
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputMissing { .. } | Self::InvalidInput { .. } | Self::PayloadTooLarge { .. } => {
                ErrorCategory::Client
            }
            Self::NotFound { .. } => ErrorCategory::Missing,
            Self::CapacityExceeded { .. } => ErrorCategory::Limit,
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            Self::ReorderRejected { .. }
            | Self::LookupFailed { .. }
            | Self::HttpError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::StorePoisoned => ErrorCategory::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if let Self::PayloadTooLarge { .. } = self {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        match self.category() {
            ErrorCategory::Client => StatusCode::BAD_REQUEST,
            ErrorCategory::Missing => StatusCode::NOT_FOUND,
            ErrorCategory::Limit => StatusCode::CONFLICT,
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand back to an HTTP caller. Internal details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ReorderRejected { .. } => "Failed to reorder products".to_string(),
            Self::LookupFailed { .. } | Self::HttpError(_) => {
                "Failed to fetch product information".to_string()
            }
            Self::IoError(_) | Self::SerializationError(_) | Self::StorePoisoned => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputMissing { .. } | Self::InvalidInput { .. } => {
                "Check the request fields and try again"
            }
            Self::PayloadTooLarge { .. } => "Send a smaller request body",
            Self::NotFound { .. } => "Check the ranking link; the ranking may have been deleted",
            Self::CapacityExceeded { .. } => "Remove a product before adding another one",
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                "Fix the configuration file or command line flags"
            }
            Self::HttpError(_) | Self::LookupFailed { .. } => {
                "Check that the catalog endpoint is reachable or switch lookup.mode to \"stub\""
            }
            _ => "Retry the request; restart the server if the problem persists",
        }
    }
}

pub type Result<T> = std::result::Result<T, RankingError>;
