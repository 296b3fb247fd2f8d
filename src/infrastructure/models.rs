use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::{orders_order, orders_orderitem};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders_order)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub order_number: String,
    pub status: String,
    pub order_date: DateTime<Utc>,
    pub subtotal: BigDecimal,
    pub tax_amount: BigDecimal,
    pub shipping_amount: BigDecimal,
    pub discount_amount: BigDecimal,
    pub total: BigDecimal,
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_id: Option<i32>,
    pub customer_id: i64,
    pub updated_by_id: Option<i32>,
}

/// Columns left as `None` fall back to their database defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = orders_order)]
pub struct NewOrderRow<'a> {
    pub order_number: &'a str,
    pub status: Option<&'a str>,
    pub subtotal: &'a BigDecimal,
    pub tax_amount: &'a BigDecimal,
    pub shipping_amount: &'a BigDecimal,
    pub discount_amount: &'a BigDecimal,
    pub total: &'a BigDecimal,
    pub shipping_address: Option<&'a str>,
    pub billing_address: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_by_id: Option<i32>,
    pub customer_id: i64,
}

/// Status update; `order_number` and the creation timestamps are never part
/// of a changeset. A `None` user leaves `updated_by_id` as it was.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders_order)]
pub struct OrderStatusChange<'a> {
    pub status: &'a str,
    pub updated_by_id: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = orders_orderitem)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: i64,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub order_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders_orderitem)]
pub struct NewOrderItemRow<'a> {
    pub product_name: &'a str,
    pub product_sku: Option<&'a str>,
    pub quantity: i32,
    pub unit_price: &'a BigDecimal,
    pub total_price: &'a BigDecimal,
    pub order_id: i64,
}
