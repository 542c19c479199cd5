//! Utility functions for Shopify API operations.
//!
//! This module provides helpers for decoding the `Link` pagination header,
//! normalising shop domains and preparing response bodies for logging.

use crate::errors::{Result, ShopifyError};
use crate::types::{ListOptions, Pagination};
use reqwest::header::{HeaderMap, LINK};
use url::Url;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

const LINK_HEADER_ERROR: &str = "could not extract pagination link header";

/// Extracts previous/next page cursors from a `Link` response header.
///
/// The header is a comma-separated list of entries of the form
/// `<URL>; rel="next"` or `<URL>; rel="previous"`. An empty header means
/// there are no other pages and yields an empty [`Pagination`].
///
/// # Arguments
///
/// * `link_header` - Raw value of the `Link` header (empty when absent)
///
/// # Errors
///
/// Returns [`ShopifyError::ResponseDecodingError`] if an entry does not match
/// the expected shape, carries no `page_info`, or has a non-numeric `limit`.
///
/// # Examples
///
/// ```
/// use shopify_transactions::utils::extract_pagination;
///
/// let pagination = extract_pagination(
///     r#"<https://shop.myshopify.com/admin/api/2024-01/tender_transactions.json?page_info=abc>; rel="next""#,
/// ).unwrap();
/// assert_eq!(pagination.next_cursor(), Some("abc"));
/// assert!(pagination.previous_page_options.is_none());
///
/// let empty = extract_pagination("").unwrap();
/// assert!(empty.next_page_options.is_none());
/// ```
pub fn extract_pagination(link_header: &str) -> Result<Pagination> {
    let mut pagination = Pagination::default();

    if link_header.trim().is_empty() {
        return Ok(pagination);
    }

    for link in link_header.split(',') {
        let (target, rel) = split_link(link)?;
        let options = page_options_from_url(target)?;

        match rel {
            Rel::Next => pagination.next_page_options = Some(options),
            Rel::Previous => pagination.previous_page_options = Some(options),
        }
    }

    Ok(pagination)
}

/// Reads the `Link` header of a list response and extracts its cursors.
///
/// A missing header yields an empty [`Pagination`]; a header that is not
/// valid visible ASCII is a decoding error.
pub fn pagination_from_headers(headers: &HeaderMap) -> Result<Pagination> {
    match headers.get(LINK) {
        Some(value) => {
            let link = value.to_str().map_err(|e| {
                ShopifyError::ResponseDecodingError(format!("invalid Link header: {}", e))
            })?;
            extract_pagination(link)
        }
        None => Ok(Pagination::default()),
    }
}

enum Rel {
    Next,
    Previous,
}

/// Splits one `<URL>; rel="..."` entry into its target and relation.
fn split_link(link: &str) -> Result<(&str, Rel)> {
    let malformed = || ShopifyError::ResponseDecodingError(LINK_HEADER_ERROR.to_string());

    let link = link.trim_matches(' ');
    let rest = link.strip_prefix('<').ok_or_else(malformed)?;
    let (target, params) = rest.split_once('>').ok_or_else(malformed)?;

    if target.is_empty() {
        return Err(malformed());
    }

    let rel = match params {
        r#"; rel="next""# => Rel::Next,
        r#"; rel="previous""# => Rel::Previous,
        _ => return Err(malformed()),
    };

    Ok((target, rel))
}

fn page_options_from_url(target: &str) -> Result<ListOptions> {
    // Relative links are resolved against a placeholder origin; only the query matters.
    let url = match Url::parse(target) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")?.join(target),
        other => other,
    }
    .map_err(|e| ShopifyError::ResponseDecodingError(format!("invalid pagination link: {}", e)))?;

    let mut options = ListOptions::default();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "page_info" if !value.is_empty() => options.page_info = Some(value.into_owned()),
            "limit" if !value.is_empty() => {
                let limit = value.parse::<u32>().map_err(|e| {
                    ShopifyError::ResponseDecodingError(format!("invalid limit '{}': {}", value, e))
                })?;
                options.limit = Some(limit);
            }
            _ => {}
        }
    }

    if options.page_info.is_none() {
        return Err(ShopifyError::ResponseDecodingError(
            "page_info is missing".to_string(),
        ));
    }

    Ok(options)
}

/// Normalises a shop name into a full `*.myshopify.com` host.
///
/// Accepts a bare shop name (`my-shop`), a full domain, or a URL with a
/// scheme and trailing slash.
///
/// # Examples
///
/// ```
/// use shopify_transactions::utils::normalize_shop_domain;
///
/// assert_eq!(normalize_shop_domain("my-shop").unwrap(), "my-shop.myshopify.com");
/// assert_eq!(
///     normalize_shop_domain("https://my-shop.myshopify.com/").unwrap(),
///     "my-shop.myshopify.com"
/// );
/// ```
pub fn normalize_shop_domain(shop: &str) -> Result<String> {
    let shop = shop.trim();
    let shop = shop
        .strip_prefix("https://")
        .or_else(|| shop.strip_prefix("http://"))
        .unwrap_or(shop)
        .trim_end_matches('/');

    if shop.is_empty() {
        return Err(ShopifyError::ConfigError("shop name is empty".to_string()));
    }

    if shop.contains('.') {
        Ok(shop.to_string())
    } else {
        Ok(format!("{}.myshopify.com", shop))
    }
}

/// Truncates a response body and strips control characters before logging.
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_next_only() {
        let pagination =
            extract_pagination(r#"<https://x/y?page_info=abc>; rel="next""#).unwrap();

        assert_eq!(pagination.next_cursor(), Some("abc"));
        assert_eq!(pagination.previous_page_options, None);
    }

    #[test]
    fn test_extract_previous_and_next_with_limit() {
        let header = concat!(
            r#"<https://shop.myshopify.com/admin/api/2024-01/tender_transactions.json?limit=2&page_info=prev123>; rel="previous", "#,
            r#"<https://shop.myshopify.com/admin/api/2024-01/tender_transactions.json?limit=2&page_info=next456>; rel="next""#,
        );

        let pagination = extract_pagination(header).unwrap();

        let next = pagination.next_page_options.unwrap();
        assert_eq!(next.page_info.as_deref(), Some("next456"));
        assert_eq!(next.limit, Some(2));

        let previous = pagination.previous_page_options.unwrap();
        assert_eq!(previous.page_info.as_deref(), Some("prev123"));
        assert_eq!(previous.limit, Some(2));
    }

    #[test]
    fn test_extract_empty_header() {
        assert_eq!(extract_pagination("").unwrap(), Pagination::default());
        assert_eq!(extract_pagination("   ").unwrap(), Pagination::default());
    }

    #[test]
    fn test_extract_relative_link() {
        let pagination =
            extract_pagination(r#"</admin/api/2024-01/orders.json?page_info=rel>; rel="previous""#)
                .unwrap();
        assert_eq!(pagination.previous_cursor(), Some("rel"));
    }

    #[test]
    fn test_extract_malformed_header() {
        let cases = [
            "invalid link",
            r#"<https://x/y?page_info=abc>; rel="last""#,
            r#"https://x/y?page_info=abc; rel="next""#,
            r#"<>; rel="next""#,
        ];

        for header in cases {
            let err = extract_pagination(header).unwrap_err();
            assert!(
                matches!(err, ShopifyError::ResponseDecodingError(_)),
                "header {:?} gave {:?}",
                header,
                err
            );
        }
    }

    #[test]
    fn test_extract_missing_page_info() {
        let err = extract_pagination(r#"<https://x/y?limit=5>; rel="next""#).unwrap_err();
        assert_eq!(err.to_string(), "Response decoding error: page_info is missing");
    }

    #[test]
    fn test_extract_invalid_limit() {
        let err =
            extract_pagination(r#"<https://x/y?page_info=abc&limit=many>; rel="next""#).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_pagination_from_headers() {
        use reqwest::header::HeaderValue;

        let mut headers = HeaderMap::new();
        assert_eq!(pagination_from_headers(&headers).unwrap(), Pagination::default());

        headers.insert(
            LINK,
            HeaderValue::from_static(r#"<https://x/y?page_info=abc>; rel="next""#),
        );
        assert_eq!(
            pagination_from_headers(&headers).unwrap().next_cursor(),
            Some("abc")
        );
    }

    #[test]
    fn test_normalize_shop_domain() {
        assert_eq!(normalize_shop_domain("shop").unwrap(), "shop.myshopify.com");
        assert_eq!(
            normalize_shop_domain("shop.myshopify.com").unwrap(),
            "shop.myshopify.com"
        );
        assert_eq!(
            normalize_shop_domain("http://shop.example.com/").unwrap(),
            "shop.example.com"
        );
        assert!(normalize_shop_domain("  ").is_err());
    }

    #[test]
    fn test_sanitize_for_log() {
        assert_eq!(sanitize_for_log("ok\n"), "ok");

        let long = "a".repeat(300);
        let sanitized = sanitize_for_log(&long);
        assert!(sanitized.starts_with(&"a".repeat(200)));
        assert!(sanitized.ends_with("[truncated, 300 bytes total]"));
    }
}
