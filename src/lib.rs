//! # shopify-transactions
//!
//! Typed Rust bindings for the Shopify Admin REST API payment transaction,
//! tender transaction and refund resources.
//!
//! Every binding follows the same shape: build a path relative to the shop's
//! versioned admin API root, call the shared [`Client`], decode the JSON
//! envelope (`{"refund": {...}}`, `{"refunds": [...]}`) into typed structs
//! and, for cursor-paginated lists, parse the `Link` response header into a
//! [`Pagination`] that can be fed back into the next call.
//!
//! ## Features
//!
//! - **Payment transactions**: Shopify Payments balance transactions (`list`,
//!   `list_with_pagination`, `list_all`, `get`)
//! - **Tender transactions**: `list`, `list_with_pagination`, `list_all`, `get`
//! - **Refunds**: per order `list`, `count`, `get`, `create`
//! - **Typed errors**: transport, API status, rate limiting and decoding
//!   failures are distinct [`ShopifyError`] variants
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopify_transactions::{Client, ClientConfig};
//! use shopify_transactions::resources::TenderTransactionListOptions;
//! use shopify_transactions::types::ListOptions;
//!
//! # async fn example() -> shopify_transactions::Result<()> {
//! let client = Client::new(ClientConfig::new("my-shop", "shpat_xxx"))?;
//!
//! let options = TenderTransactionListOptions {
//!     list: ListOptions { limit: Some(50), ..Default::default() },
//!     ..Default::default()
//! };
//! let (page, pagination) = client
//!     .tender_transactions()
//!     .list_with_pagination(Some(&options))
//!     .await?;
//! println!("{} tender transactions", page.len());
//!
//! if let Some(next) = pagination.next_page_options {
//!     let next = TenderTransactionListOptions::from(next);
//!     let more = client.tender_transactions().list(Some(&next)).await?;
//!     println!("{} more", more.len());
//! }
//!
//! let refunds = client.refunds().count(450789469, None).await?;
//! println!("order has {} refunds", refunds);
//! # Ok(())
//! # }
//! ```
//!
//! ## Behaviour
//!
//! - Calls are single-attempt: no retries, caching or throttling. A 429 is
//!   returned as [`ShopifyError::RateLimited`].
//! - Option structs serialize into the query string; `None` means the server
//!   default applies.
//! - Unset optional fields are omitted from request bodies.
//! - A body missing its envelope key is a decoding error, never an empty value.
//!
//! ## References
//!
//! - [Shopify Admin REST API](https://shopify.dev/docs/api/admin-rest)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod errors;
pub mod resources;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use client::{Client, ClientConfig, DEFAULT_API_VERSION};
pub use errors::{Result, ShopifyError};
pub use types::{CountOptions, CountResponse, GetOptions, ListOptions, Pagination};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_version() {
        assert_eq!(DEFAULT_API_VERSION, "2024-01");
    }

    #[test]
    fn test_module_accessibility() {
        let client = Client::new(ClientConfig::new("my-shop", "token")).unwrap();
        let _ = client.payment_transactions();
        let _ = client.tender_transactions();
        let _ = client.refunds();
        let _ = utils::extract_pagination("").unwrap();
    }
}
