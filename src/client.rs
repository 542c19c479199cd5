//! HTTP client for the Shopify Admin REST API.
//!
//! This module provides the configuration and the shared [`Client`] that all
//! resource services delegate network I/O to. The client builds URLs relative
//! to the shop's versioned admin API root, authenticates with an access token,
//! maps non-success statuses to [`ShopifyError`] and decodes JSON bodies.
//! It performs exactly one attempt per call: no retries, no throttling.

use crate::errors::{Result, ShopifyError};
use crate::resources::{PaymentTransactionService, RefundService, TenderTransactionService};
use crate::types::CountResponse;
use crate::utils::{normalize_shop_domain, sanitize_for_log};
use reqwest::header::{HeaderMap, ACCEPT, RETRY_AFTER, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Admin API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for a Shopify API client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Shop name or domain (e.g. `my-shop` or `my-shop.myshopify.com`)
    pub shop: String,

    /// Admin API access token
    pub access_token: String,

    /// Admin API version (e.g. `2024-01`)
    pub api_version: String,

    /// Overrides the computed `https://{shop}/admin/api/{version}/` root
    pub base_url: Option<String>,

    /// HTTP client to use for requests
    pub http_client: reqwest::Client,
}

impl ClientConfig {
    /// Creates a new client configuration.
    ///
    /// # Arguments
    ///
    /// * `shop` - Shop name or full domain
    /// * `access_token` - Admin API access token
    ///
    /// # Examples
    ///
    /// ```
    /// use shopify_transactions::client::ClientConfig;
    ///
    /// let config = ClientConfig::new("my-shop", "shpat_example")
    ///     .with_api_version("2023-10");
    /// assert_eq!(config.api_version, "2023-10");
    /// ```
    pub fn new(shop: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: None,
            http_client: reqwest::Client::new(),
        }
    }

    /// Builds a configuration from `SHOPIFY_SHOP`, `SHOPIFY_ACCESS_TOKEN`
    /// and the optional `SHOPIFY_API_VERSION` environment variables.
    pub fn from_env() -> Result<Self> {
        let shop = required_env("SHOPIFY_SHOP")?;
        let access_token = required_env("SHOPIFY_ACCESS_TOKEN")?;

        let mut config = Self::new(shop, access_token);
        if let Ok(version) = std::env::var("SHOPIFY_API_VERSION") {
            if !version.trim().is_empty() {
                config.api_version = version.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Sets the Admin API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets an explicit API root, bypassing the shop/version URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    /// Resolves the API root URL this configuration points at.
    pub fn api_root(&self) -> Result<Url> {
        let root = match &self.base_url {
            Some(base_url) => base_url.clone(),
            None => format!(
                "https://{}/admin/api/{}/",
                normalize_shop_domain(&self.shop)?,
                self.api_version
            ),
        };

        // Url::join drops the last segment unless the root ends with a slash
        let root = if root.ends_with('/') {
            root
        } else {
            format!("{}/", root)
        };

        Ok(Url::parse(&root)?)
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ShopifyError::ConfigError(format!("{} is not set", name))),
    }
}

/// Shared client for the Shopify Admin REST API.
///
/// Cheap to clone; resource services borrow it immutably, so one client can
/// serve concurrent callers.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl Client {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::ConfigError`] when the access token or shop is
    /// empty, and [`ShopifyError::UrlParseError`] when the API root is not a
    /// valid URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use shopify_transactions::client::{Client, ClientConfig};
    ///
    /// let client = Client::new(ClientConfig::new("my-shop", "shpat_example")).unwrap();
    /// assert_eq!(
    ///     client.base_url().as_str(),
    ///     "https://my-shop.myshopify.com/admin/api/2024-01/"
    /// );
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(ShopifyError::ConfigError(
                "access token is empty".to_string(),
            ));
        }

        let base_url = config.api_root()?;

        Ok(Self {
            http: config.http_client,
            base_url,
            access_token: config.access_token,
        })
    }

    /// Returns the API root all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a resource path (e.g. `tender_transactions.json`) to a full URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Payment transactions (Shopify Payments balance transactions).
    pub fn payment_transactions(&self) -> PaymentTransactionService<'_> {
        PaymentTransactionService::new(self)
    }

    /// Tender transactions.
    pub fn tender_transactions(&self) -> TenderTransactionService<'_> {
        TenderTransactionService::new(self)
    }

    /// Order refunds.
    pub fn refunds(&self) -> RefundService<'_> {
        RefundService::new(self)
    }

    /// Makes a GET request and decodes the JSON body into `T`.
    ///
    /// `options`, when given, is serialized into the query string.
    pub async fn get<T, O>(&self, path: &str, options: Option<&O>) -> Result<T>
    where
        T: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        let (value, _) = self.get_with_headers(path, options).await?;
        Ok(value)
    }

    /// Makes a GET request and returns the decoded body along with the
    /// response headers.
    pub async fn get_with_headers<T, O>(
        &self,
        path: &str,
        options: Option<&O>,
    ) -> Result<(T, HeaderMap)>
    where
        T: DeserializeOwned,
        O: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(options) = options {
            request = request.query(options);
        }

        let (headers, body) = self.send(request).await?;
        let value = serde_json::from_str(&body)?;

        Ok((value, headers))
    }

    /// Makes a POST request with a JSON body and decodes the JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!("POST {}", url);

        let request = self.http.post(url).json(body);
        let (_, response_body) = self.send(request).await?;

        Ok(serde_json::from_str(&response_body)?)
    }

    /// Makes a GET request to a `count.json` endpoint and returns the count.
    pub async fn count<O>(&self, path: &str, options: Option<&O>) -> Result<u64>
    where
        O: Serialize + ?Sized,
    {
        let response: CountResponse = self.get(path, options).await?;
        Ok(response.count)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(HeaderMap, String)> {
        let response = request
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(&headers);
            tracing::warn!("Rate limited, retry after {:?}s", retry_after);
            return Err(ShopifyError::RateLimited { retry_after });
        }

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ShopifyError::ApiError {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok((headers, body))
    }
}

/// Shopify sends `Retry-After` as a (possibly fractional) number of seconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.ceil() as u64)
}

/// Builds a readable message from an error body, preferring its `errors` field.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("errors").or_else(|| value.get("error")) {
            Some(Value::String(message)) => return message.clone(),
            Some(errors) => return errors.to_string(),
            None => {}
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        sanitize_for_log(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_client_config_creation() {
        let config = ClientConfig::new("my-shop", "token");
        assert_eq!(config.shop, "my-shop");
        assert_eq!(config.access_token, "token");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("my-shop", "token")
            .with_api_version("2023-07")
            .with_base_url("http://localhost:8080/admin/api/2023-07");

        let root = config.api_root().unwrap();
        assert_eq!(root.as_str(), "http://localhost:8080/admin/api/2023-07/");
    }

    #[test]
    fn test_api_root_from_shop() {
        let config = ClientConfig::new("my-shop.myshopify.com", "token").with_api_version("2024-04");
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "https://my-shop.myshopify.com/admin/api/2024-04/"
        );
    }

    #[test]
    fn test_client_rejects_empty_token() {
        let err = Client::new(ClientConfig::new("my-shop", "")).err().unwrap();
        assert!(matches!(err, ShopifyError::ConfigError(_)));
    }

    #[test]
    fn test_url_resolution() {
        let client = Client::new(ClientConfig::new("my-shop", "token")).unwrap();
        assert_eq!(
            client.url("/orders/1/refunds.json").unwrap().as_str(),
            "https://my-shop.myshopify.com/admin/api/2024-01/orders/1/refunds.json"
        );
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("2.0"));
        assert_eq!(parse_retry_after(&headers), Some(2));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"errors":"Not Found"}"#),
            "Not Found"
        );
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"errors":{"amount":["is invalid"]}}"#),
            r#"{"amount":["is invalid"]}"#
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::BAD_REQUEST, "oops"), "oops");
    }
}
