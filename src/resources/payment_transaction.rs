//! Shopify Payments balance transactions.
//!
//! Endpoints live under `shopify_payments/balance/transactions` and are
//! paginated with `Link` header cursors.

use crate::client::Client;
use crate::errors::Result;
use crate::types::{GetOptions, ListOptions, Pagination};
use crate::utils::pagination_from_headers;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const PAYMENT_TRANSACTION_BASE_PATH: &str = "shopify_payments/balance/transactions";

/// A movement of money on the Shopify Payments balance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaymentTransaction {
    /// Transaction ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Transaction type (`charge`, `refund`, `dispute`, `adjustment`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Whether this is a test transaction
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub test: bool,

    /// Payout the transaction was paid out in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_id: Option<i64>,

    /// Status of that payout (`scheduled`, `in_transit`, `paid`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_status: Option<String>,

    /// ISO 4217 currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Gross amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    /// Fees charged on the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,

    /// Amount after fees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<Decimal>,

    /// ID of the object that caused the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,

    /// Type of that object (`charge`, `refund`, `dispute`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Order the transaction belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_order_id: Option<i64>,

    /// Order transaction the transaction belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_order_transaction_id: Option<i64>,

    /// When the transaction was processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<FixedOffset>>,
}

/// Filters for listing payment transactions.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentTransactionListOptions {
    /// Standard list and pagination parameters
    #[serde(flatten)]
    pub list: ListOptions,

    /// Return transactions before this ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_id: Option<i64>,

    /// Only return test transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,

    /// Only return transactions of this payout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_id: Option<i64>,

    /// Only return transactions whose payout has this status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_status: Option<String>,
}

impl From<ListOptions> for PaymentTransactionListOptions {
    fn from(list: ListOptions) -> Self {
        Self {
            list,
            ..Default::default()
        }
    }
}

/// Plural envelope returned by `transactions.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentTransactionsResource {
    /// The page of transactions, in server order
    pub transactions: Vec<PaymentTransaction>,
}

/// Singular envelope returned by `transactions/{id}.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentTransactionResource {
    /// The transaction
    pub transaction: PaymentTransaction,
}

/// Operations on payment transactions.
#[derive(Clone, Copy)]
pub struct PaymentTransactionService<'a> {
    client: &'a Client,
}

impl<'a> PaymentTransactionService<'a> {
    /// Creates a service bound to `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists one page of payment transactions.
    pub async fn list(
        &self,
        options: Option<&PaymentTransactionListOptions>,
    ) -> Result<Vec<PaymentTransaction>> {
        let (transactions, _) = self.list_with_pagination(options).await?;
        Ok(transactions)
    }

    /// Lists one page of payment transactions together with the cursors for
    /// the neighbouring pages.
    ///
    /// # Errors
    ///
    /// Fails if the request fails, the body is not a `transactions` envelope,
    /// or the `Link` header is malformed.
    pub async fn list_with_pagination(
        &self,
        options: Option<&PaymentTransactionListOptions>,
    ) -> Result<(Vec<PaymentTransaction>, Pagination)> {
        let path = format!("{}.json", PAYMENT_TRANSACTION_BASE_PATH);
        let (resource, headers): (PaymentTransactionsResource, _) =
            self.client.get_with_headers(&path, options).await?;
        let pagination = pagination_from_headers(&headers)?;

        Ok((resource.transactions, pagination))
    }

    /// Follows `next` cursors until exhausted and returns every transaction.
    ///
    /// Later pages are requested with only the cursor and `limit` taken from
    /// the `Link` header; the API rejects filters alongside `page_info`.
    pub async fn list_all(
        &self,
        options: Option<&PaymentTransactionListOptions>,
    ) -> Result<Vec<PaymentTransaction>> {
        let mut all = Vec::new();
        let (page, mut pagination) = self.list_with_pagination(options).await?;
        all.extend(page);

        while let Some(next) = pagination.next_page_options.take() {
            tracing::debug!("fetching next payment transaction page");
            let next = PaymentTransactionListOptions::from(next);
            let (page, next_pagination) = self.list_with_pagination(Some(&next)).await?;
            all.extend(page);
            pagination = next_pagination;
        }

        Ok(all)
    }

    /// Fetches a single payment transaction.
    pub async fn get(
        &self,
        transaction_id: i64,
        options: Option<&GetOptions>,
    ) -> Result<PaymentTransaction> {
        let path = format!("{}/{}.json", PAYMENT_TRANSACTION_BASE_PATH, transaction_id);
        let resource: PaymentTransactionResource = self.client.get(&path, options).await?;
        Ok(resource.transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_transaction_deserialization() {
        let body = json!({
            "transaction": {
                "id": 699519475,
                "type": "debit",
                "test": false,
                "payout_id": 623721858,
                "payout_status": "paid",
                "currency": "USD",
                "amount": "-50.00",
                "fee": "0.00",
                "net": "-50.00",
                "source_id": 460709370,
                "source_type": "adjustment",
                "source_order_id": null,
                "source_order_transaction_id": null,
                "processed_at": "2024-01-10T13:52:14-05:00"
            }
        });

        let resource: PaymentTransactionResource = serde_json::from_value(body).unwrap();
        let tx = resource.transaction;

        assert_eq!(tx.id, Some(699519475));
        assert_eq!(tx.kind.as_deref(), Some("debit"));
        assert_eq!(tx.amount, Some("-50.00".parse().unwrap()));
        assert_eq!(tx.source_order_id, None);
        assert_eq!(
            tx.processed_at.unwrap().to_rfc3339(),
            "2024-01-10T13:52:14-05:00"
        );
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let tx = PaymentTransaction {
            id: Some(1),
            amount: Some("12.50".parse().unwrap()),
            ..Default::default()
        };

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value, json!({"id": 1, "amount": "12.50"}));
        assert!(value.get("source_order_id").is_none());
        assert!(value.get("test").is_none());
    }

    #[test]
    fn test_list_options_flatten() {
        let options = PaymentTransactionListOptions {
            list: ListOptions {
                limit: Some(25),
                ..Default::default()
            },
            payout_status: Some("paid".to_string()),
            test: Some(true),
            ..Default::default()
        };

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value, json!({"limit": 25, "payout_status": "paid", "test": true}));
    }

    #[test]
    fn test_missing_envelope_is_an_error() {
        let result = serde_json::from_value::<PaymentTransactionsResource>(json!({"orders": []}));
        assert!(result.is_err());
    }
}
