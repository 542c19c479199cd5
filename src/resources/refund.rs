//! Order refunds.
//!
//! Refunds are nested under orders: `orders/{order_id}/refunds/{id}.json`.

use crate::client::Client;
use crate::errors::Result;
use crate::types::{CountOptions, GetOptions, ListOptions};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ORDERS_BASE_PATH: &str = "orders";

/// A refund on an order.
///
/// # Examples
///
/// ```
/// use shopify_transactions::resources::Refund;
///
/// let refund = Refund {
///     note: Some("wrong size".to_string()),
///     restock: true,
///     ..Default::default()
/// };
/// let json = serde_json::to_value(&refund).unwrap();
/// assert_eq!(json["note"], "wrong size");
/// assert!(json.get("id").is_none());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Refund {
    /// Refund ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Order the refund belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,

    /// When the refund was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,

    /// When the refund was imported or processed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<FixedOffset>>,

    /// Note attached to the refund
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Whether refunded items are returned to stock
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub restock: bool,

    /// Staff member who created the refund
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Line items being refunded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refund_line_items: Vec<RefundLineItem>,

    /// Transactions that move the money back
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<RefundTransaction>,
}

/// A refunded quantity of an order line item.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RefundLineItem {
    /// Refund line item ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Order line item being refunded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<i64>,

    /// Quantity refunded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// `no_restock`, `cancel`, `return` or `legacy_restock`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restock_type: Option<String>,

    /// Subtotal of the refunded quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,

    /// Tax on the refunded quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<Decimal>,
}

/// An order transaction created by a refund.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RefundTransaction {
    /// Transaction ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Order the transaction belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,

    /// Usually `refund`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Payment gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// `pending`, `success`, `failure` or `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Amount refunded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    /// ISO 4217 currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Transaction being refunded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Singular envelope for `refunds/{id}.json` and refund creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefundResource {
    /// The refund
    pub refund: Refund,
}

/// Plural envelope returned by `refunds.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefundsResource {
    /// Refunds of the order, in server order
    pub refunds: Vec<Refund>,
}

/// Operations on order refunds.
#[derive(Clone, Copy)]
pub struct RefundService<'a> {
    client: &'a Client,
}

impl<'a> RefundService<'a> {
    /// Creates a service bound to `client`.
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the refunds of an order.
    pub async fn list(&self, order_id: i64, options: Option<&ListOptions>) -> Result<Vec<Refund>> {
        let path = format!("{}/{}/refunds.json", ORDERS_BASE_PATH, order_id);
        let resource: RefundsResource = self.client.get(&path, options).await?;
        Ok(resource.refunds)
    }

    /// Counts the refunds of an order.
    pub async fn count(&self, order_id: i64, options: Option<&CountOptions>) -> Result<u64> {
        let path = format!("{}/{}/refunds/count.json", ORDERS_BASE_PATH, order_id);
        self.client.count(&path, options).await
    }

    /// Fetches a single refund of an order.
    pub async fn get(
        &self,
        order_id: i64,
        refund_id: i64,
        options: Option<&GetOptions>,
    ) -> Result<Refund> {
        let path = format!(
            "{}/{}/refunds/{}.json",
            ORDERS_BASE_PATH, order_id, refund_id
        );
        let resource: RefundResource = self.client.get(&path, options).await?;
        Ok(resource.refund)
    }

    /// Creates a refund on an order.
    ///
    /// The refund is sent wrapped as `{"refund": ...}` and the created refund
    /// is decoded from the same envelope.
    pub async fn create(&self, order_id: i64, refund: Refund) -> Result<Refund> {
        let path = format!("{}/{}/refunds.json", ORDERS_BASE_PATH, order_id);
        let body = RefundResource { refund };
        let resource: RefundResource = self.client.post(&path, &body).await?;
        Ok(resource.refund)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_refund_deserialization() {
        let body = json!({
            "refund": {
                "id": 509562969,
                "order_id": 450789469,
                "created_at": "2024-03-05T12:00:00-05:00",
                "note": "it broke during shipping",
                "restock": true,
                "user_id": 548380009,
                "refund_line_items": [
                    {
                        "id": 104689539,
                        "line_item_id": 703073504,
                        "quantity": 1,
                        "restock_type": "legacy_restock",
                        "subtotal": "195.66",
                        "total_tax": "3.98"
                    }
                ],
                "transactions": [
                    {
                        "id": 179259969,
                        "order_id": 450789469,
                        "kind": "refund",
                        "gateway": "bogus",
                        "status": "success",
                        "amount": "209.00",
                        "currency": "USD",
                        "parent_id": 801038806
                    }
                ]
            }
        });

        let refund = serde_json::from_value::<RefundResource>(body).unwrap().refund;

        assert_eq!(refund.id, Some(509562969));
        assert_eq!(refund.order_id, Some(450789469));
        assert!(refund.restock);
        assert_eq!(refund.refund_line_items[0].quantity, Some(1));
        assert_eq!(
            refund.refund_line_items[0].subtotal,
            Some("195.66".parse().unwrap())
        );
        assert_eq!(refund.transactions[0].parent_id, Some(801038806));
    }

    #[test]
    fn test_create_envelope() {
        let body = RefundResource {
            refund: Refund {
                note: Some("damaged".to_string()),
                transactions: vec![RefundTransaction {
                    parent_id: Some(1),
                    amount: Some("10.00".parse().unwrap()),
                    kind: Some("refund".to_string()),
                    gateway: Some("bogus".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "refund": {
                    "note": "damaged",
                    "transactions": [
                        {"kind": "refund", "gateway": "bogus", "amount": "10.00", "parent_id": 1}
                    ]
                }
            })
        );
    }
}
