use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

pub const ORDER_NUMBER_MAX_LEN: usize = 50;
pub const PRODUCT_NAME_MAX_LEN: usize = 200;
pub const PRODUCT_SKU_MAX_LEN: usize = 100;

/// Lifecycle status of an order, stored as its lowercase name.
///
/// This layer only stores the value; which transitions are allowed is up to
/// the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown order status '{}'", s)))
    }
}

/// Monetary adjustments applied on top of the item subtotal.
#[derive(Debug, Clone, Default)]
pub struct OrderAmounts {
    pub tax_amount: BigDecimal,
    pub shipping_amount: BigDecimal,
    pub discount_amount: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct NewOrderItemInput {
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: u32,
    pub unit_price: BigDecimal,
}

/// What a caller supplies at checkout. Totals are derived, never supplied.
#[derive(Debug, Clone)]
pub struct NewOrderInput {
    pub customer_id: i64,
    /// Generated when absent.
    pub order_number: Option<String>,
    /// Left to the column default (`pending`) when absent.
    pub status: Option<OrderStatus>,
    pub amounts: OrderAmounts,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
    pub items: Vec<NewOrderItemInput>,
}

/// A fully priced item, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total_price: BigDecimal,
}

/// A fully priced order, ready to be written.
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub customer_id: i64,
    pub order_number: String,
    pub status: Option<OrderStatus>,
    pub subtotal: BigDecimal,
    pub tax_amount: BigDecimal,
    pub shipping_amount: BigDecimal,
    pub discount_amount: BigDecimal,
    pub total: BigDecimal,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
    pub items: Vec<PricedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: i64,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub order_number: String,
    pub customer_id: i64,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub subtotal: BigDecimal,
    pub tax_amount: BigDecimal,
    pub shipping_amount: BigDecimal,
    pub discount_amount: BigDecimal,
    pub total: BigDecimal,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn status_parses_every_stored_name() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_and_wrong_case() {
        assert!(matches!(
            "lost".parse::<OrderStatus>(),
            Err(DomainError::InvalidInput(_))
        ));
        assert!("Pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_names_fit_the_column() {
        assert!(OrderStatus::ALL.iter().all(|s| s.as_str().len() <= 20));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Refunded).unwrap();
        assert_eq!(json, "\"refunded\"");
        let back: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(back, OrderStatus::Shipped);
    }

    #[test]
    fn status_display_matches_stored_name() {
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }
}
