//! Shared type definitions for the Shopify REST resources.
//!
//! This module contains the option structs that map to query-string
//! parameters and the cursor pagination value returned by list endpoints.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize, Serializer};

/// Standard list parameters understood by most Shopify list endpoints.
///
/// Every field is optional; unset fields are not sent and the server
/// default applies.
///
/// # Examples
///
/// ```
/// use shopify_transactions::types::ListOptions;
///
/// let options = ListOptions {
///     limit: Some(50),
///     since_id: Some(1000),
///     ..Default::default()
/// };
/// assert_eq!(options.limit, Some(50));
/// ```
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Opaque cursor taken from a `Link` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,

    /// Page number (legacy page-based pagination)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Maximum number of results per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Restrict results to after the specified ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,

    /// Show records created at or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<FixedOffset>>,

    /// Show records created at or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<FixedOffset>>,

    /// Show records last updated at or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<FixedOffset>>,

    /// Show records last updated at or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<FixedOffset>>,

    /// Sort order, e.g. `"processed_at DESC"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    /// Comma-separated list of fields to include in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    /// Restrict results to these IDs (sent comma-separated)
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_ids"
    )]
    pub ids: Option<Vec<i64>>,
}

/// Parameters for `count.json` endpoints.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CountOptions {
    /// Count records created at or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<FixedOffset>>,

    /// Count records created at or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<FixedOffset>>,

    /// Count records last updated at or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<FixedOffset>>,

    /// Count records last updated at or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<FixedOffset>>,
}

/// Parameters for fetching a single resource.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Comma-separated list of fields to include in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

/// Cursors for the pages around a list response.
///
/// Both sides are `None` when the response carried no `Link` header. Each
/// side holds the `page_info` (and `limit`, when the link had one) ready to
/// be passed back into a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Options that fetch the next page
    pub next_page_options: Option<ListOptions>,

    /// Options that fetch the previous page
    pub previous_page_options: Option<ListOptions>,
}

impl Pagination {
    /// Returns the `page_info` cursor of the next page, if any.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page_options
            .as_ref()
            .and_then(|o| o.page_info.as_deref())
    }

    /// Returns the `page_info` cursor of the previous page, if any.
    pub fn previous_cursor(&self) -> Option<&str> {
        self.previous_page_options
            .as_ref()
            .and_then(|o| o.page_info.as_deref())
    }
}

/// Body returned by every `count.json` endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResponse {
    /// Number of matching records
    pub count: u64,
}

fn serialize_ids<S: Serializer>(ids: &Option<Vec<i64>>, serializer: S) -> Result<S::Ok, S::Error> {
    match ids {
        Some(ids) => {
            let joined = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            serializer.serialize_str(&joined)
        }
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_options_skip_unset_fields() {
        let options = ListOptions {
            limit: Some(10),
            ..Default::default()
        };

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value, json!({"limit": 10}));
    }

    #[test]
    fn test_list_options_ids_comma_separated() {
        let options = ListOptions {
            ids: Some(vec![1, 2, 3]),
            order: Some("processed_at ASC".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["ids"], "1,2,3");
        assert_eq!(value["order"], "processed_at ASC");
    }

    #[test]
    fn test_pagination_cursors() {
        let pagination = Pagination {
            next_page_options: Some(ListOptions {
                page_info: Some("abc".to_string()),
                ..Default::default()
            }),
            previous_page_options: None,
        };

        assert_eq!(pagination.next_cursor(), Some("abc"));
        assert_eq!(pagination.previous_cursor(), None);
        assert_eq!(Pagination::default().next_cursor(), None);
    }

    #[test]
    fn test_count_response() {
        let count: CountResponse = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(count.count, 7);
    }
}
