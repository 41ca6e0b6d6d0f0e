//! Error types for Onix Mapper

use thiserror::Error;

/// Stable numeric error codes exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NoSuchProduct = 2,
    AmbiguousProduct = 3,
    UnmappedValue = 4,
    BadValue = 5,
    BackendFailure = 6,
    KeywordSearchFailure = 7,
    TokenFailure = 8,
    ConfigFailure = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous result: {count} products match {number}")]
    AmbiguousResult { number: String, count: usize },

    #[error("Unmapped value for {field}: {value}")]
    UnmappedValue { field: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Keyword search error: {0}")]
    KeywordSearch(String),

    #[error("Token cache error: {0}")]
    TokenCache(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Shorthand for an upstream value that has no mapping
    pub fn unmapped(field: &'static str, value: impl Into<String>) -> Self {
        AppError::UnmappedValue {
            field,
            value: value.into(),
        }
    }

    /// Numeric code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchProduct,
            AppError::AmbiguousResult { .. } => ErrorCode::AmbiguousProduct,
            AppError::UnmappedValue { .. } => ErrorCode::UnmappedValue,
            AppError::Validation(_) | AppError::Json(_) => ErrorCode::BadValue,
            AppError::Backend(_) | AppError::Http(_) => ErrorCode::BackendFailure,
            AppError::KeywordSearch(_) => ErrorCode::KeywordSearchFailure,
            AppError::TokenCache(_) | AppError::Redis(_) => ErrorCode::TokenFailure,
            AppError::Config(_) => ErrorCode::ConfigFailure,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
