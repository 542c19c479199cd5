//! Tender transactions.
//!
//! A tender transaction records money changing hands on an order, whatever
//! the gateway. Listed from `tender_transactions.json` with cursor pagination.

use crate::client::Client;
use crate::errors::Result;
use crate::types::{GetOptions, ListOptions, Pagination};
use crate::utils::pagination_from_headers;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

const TENDER_TRANSACTION_BASE_PATH: &str = "tender_transactions";

/// A tender transaction.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderTransaction {
    /// Tender transaction ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Order the transaction belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,

    /// Amount in minor currency units; always sent
    #[serde(default)]
    pub amount: i64,

    /// ISO 4217 currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Staff member who processed the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Whether this is a test transaction
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub test: bool,

    /// When the transaction was processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<FixedOffset>>,

    /// Reference assigned by the payment provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_reference: Option<String>,

    /// Card details, for card payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<TenderTransactionPaymentDetails>,

    /// Payment method (`credit_card`, `cash`, `gift_card`, ...); always sent
    #[serde(default)]
    pub payment_method: String,
}

/// Card information attached to a tender transaction.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderTransactionPaymentDetails {
    /// Masked card number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_number: Option<String>,

    /// Card brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_company: Option<String>,
}

/// Filters for listing tender transactions.
///
/// `since_id`, `limit`, `order` and `page_info` come from the flattened
/// [`ListOptions`].
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderTransactionListOptions {
    /// Standard list and pagination parameters
    #[serde(flatten)]
    pub list: ListOptions,

    /// Show tender transactions processed at or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at_min: Option<DateTime<FixedOffset>>,

    /// Show tender transactions processed at or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at_max: Option<DateTime<FixedOffset>>,

    /// Show tender transactions processed at this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<FixedOffset>>,
}

impl From<ListOptions> for TenderTransactionListOptions {
    fn from(list: ListOptions) -> Self {
        Self {
            list,
            ..Default::default()
        }
    }
}

/// Plural envelope returned by `tender_transactions.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TenderTransactionsResource {
    /// The page of tender transactions, in server order
    pub tender_transactions: Vec<TenderTransaction>,
}

/// Singular envelope returned by `tender_transactions/{id}.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TenderTransactionResource {
    /// The tender transaction
    pub tender_transaction: TenderTransaction,
}

/// Operations on tender transactions.
#[derive(Clone, Copy)]
pub struct TenderTransactionService<'a> {
    client: &'a Client,
}

impl<'a> TenderTransactionService<'a> {
    /// Creates a service bound to `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists one page of tender transactions.
    pub async fn list(
        &self,
        options: Option<&TenderTransactionListOptions>,
    ) -> Result<Vec<TenderTransaction>> {
        let (transactions, _) = self.list_with_pagination(options).await?;
        Ok(transactions)
    }

    /// Lists one page of tender transactions and the neighbouring page cursors.
    pub async fn list_with_pagination(
        &self,
        options: Option<&TenderTransactionListOptions>,
    ) -> Result<(Vec<TenderTransaction>, Pagination)> {
        let path = format!("{}.json", TENDER_TRANSACTION_BASE_PATH);
        let (resource, headers): (TenderTransactionsResource, _) =
            self.client.get_with_headers(&path, options).await?;
        let pagination = pagination_from_headers(&headers)?;

        Ok((resource.tender_transactions, pagination))
    }

    /// Follows `next` cursors until exhausted and returns every tender transaction.
    pub async fn list_all(
        &self,
        options: Option<&TenderTransactionListOptions>,
    ) -> Result<Vec<TenderTransaction>> {
        let mut all = Vec::new();
        let (page, mut pagination) = self.list_with_pagination(options).await?;
        all.extend(page);

        while let Some(next) = pagination.next_page_options.take() {
            tracing::debug!("fetching next tender transaction page");
            let next = TenderTransactionListOptions::from(next);
            let (page, next_pagination) = self.list_with_pagination(Some(&next)).await?;
            all.extend(page);
            pagination = next_pagination;
        }

        Ok(all)
    }

    /// Fetches a single tender transaction.
    pub async fn get(
        &self,
        transaction_id: i64,
        options: Option<&GetOptions>,
    ) -> Result<TenderTransaction> {
        let path = format!("{}/{}.json", TENDER_TRANSACTION_BASE_PATH, transaction_id);
        let resource: TenderTransactionResource = self.client.get(&path, options).await?;
        Ok(resource.tender_transaction)
    }
}
