//! Error types for the shopify-transactions library.
//!
//! This module defines all error types that can occur while talking to the
//! Shopify Admin REST API.

use thiserror::Error;

/// Main error type for Shopify API operations.
#[derive(Error, Debug)]
pub enum ShopifyError {
    /// Error while sending the request or reading the response
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The API answered with a non-success status code
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code returned by Shopify
        status: u16,
        /// The `errors` field of the response, or the sanitized body
        message: String,
    },

    /// The API answered with 429 Too Many Requests
    #[error("Rate limited by the Shopify API")]
    RateLimited {
        /// Value of the `Retry-After` header, when it was a number of seconds
        retry_after: Option<u64>,
    },

    /// A response header could not be decoded (e.g. a malformed `Link` header)
    #[error("Response decoding error: {0}")]
    ResponseDecodingError(String),

    /// Error parsing URL
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ShopifyError {
    /// Returns `true` if the error comes from decoding a response body or header.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ShopifyError::JsonError(_) | ShopifyError::ResponseDecodingError(_)
        )
    }
}

/// Result type alias for Shopify API operations.
pub type Result<T> = std::result::Result<T, ShopifyError>;
