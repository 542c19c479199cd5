//! Example: list recent transactions and refunds of a shop.
//!
//! Run with:
//! ```bash
//! cargo run --example list_transactions
//! ```
//!
//! Environment variables (a `.env` file is read if present):
//! - SHOPIFY_SHOP: shop name or domain
//! - SHOPIFY_ACCESS_TOKEN: Admin API access token
//! - SHOPIFY_API_VERSION: optional API version
//! - ORDER_ID: optional order whose refunds are listed

use anyhow::Context;
use shopify_transactions::resources::{PaymentTransactionListOptions, TenderTransactionListOptions};
use shopify_transactions::types::ListOptions;
use shopify_transactions::{Client, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env().context("missing Shopify configuration")?;
    let client = Client::new(config)?;
    tracing::info!("using {}", client.base_url());

    let first_page = ListOptions {
        limit: Some(10),
        ..Default::default()
    };

    let (tenders, pagination) = client
        .tender_transactions()
        .list_with_pagination(Some(&TenderTransactionListOptions::from(first_page.clone())))
        .await?;

    println!("Tender transactions ({}):", tenders.len());
    for tx in &tenders {
        println!(
            "  #{:<12} order {:<12} {:>10} {} via {}",
            tx.id.unwrap_or_default(),
            tx.order_id.unwrap_or_default(),
            tx.amount,
            tx.currency.as_deref().unwrap_or("-"),
            tx.payment_method
        );
    }
    if let Some(cursor) = pagination.next_cursor() {
        println!("  next page: {}", cursor);
    }

    match client
        .payment_transactions()
        .list(Some(&PaymentTransactionListOptions::from(first_page)))
        .await
    {
        Ok(transactions) => {
            println!("\nShopify Payments transactions ({}):", transactions.len());
            for tx in &transactions {
                println!(
                    "  #{:<12} {:<12} amount {:>10} net {:>10}",
                    tx.id.unwrap_or_default(),
                    tx.kind.as_deref().unwrap_or("-"),
                    tx.amount.map(|a| a.to_string()).unwrap_or_default(),
                    tx.net.map(|n| n.to_string()).unwrap_or_default()
                );
            }
        }
        // Shops without Shopify Payments answer 404 here.
        Err(e) => tracing::warn!("could not list payment transactions: {}", e),
    }

    if let Ok(order_id) = std::env::var("ORDER_ID") {
        let order_id: i64 = order_id.parse().context("ORDER_ID must be a number")?;
        let count = client.refunds().count(order_id, None).await?;
        let refunds = client.refunds().list(order_id, None).await?;

        println!("\nOrder {} has {} refunds:", order_id, count);
        for refund in &refunds {
            println!(
                "  #{} {}",
                refund.id.unwrap_or_default(),
                refund.note.as_deref().unwrap_or("")
            );
        }
    }

    Ok(())
}
