use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, OrderItemView, OrderStatus, OrderView, PricedOrder};
use crate::domain::ports::OrderRepository;
use crate::schema::{orders_order, orders_orderitem};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow, OrderStatusChange};

const ORDER_NUMBER_CONSTRAINT: &str = "orders_order_order_number_key";

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => DomainError::NotFound,
            diesel::result::Error::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation
                        if info.constraint_name() == Some(ORDER_NUMBER_CONSTRAINT) =>
                    {
                        DomainError::DuplicateOrderNumber(message)
                    }
                    DatabaseErrorKind::ForeignKeyViolation => DomainError::MissingReference(message),
                    DatabaseErrorKind::UniqueViolation
                    | DatabaseErrorKind::CheckViolation
                    | DatabaseErrorKind::NotNullViolation => DomainError::ConstraintViolation(message),
                    _ => DomainError::Internal(message),
                }
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Row → view mapping ───────────────────────────────────────────────────────

fn item_view(row: OrderItemRow) -> OrderItemView {
    OrderItemView {
        id: row.id,
        product_name: row.product_name,
        product_sku: row.product_sku,
        quantity: row.quantity,
        unit_price: row.unit_price,
        total_price: row.total_price,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn order_view(row: OrderRow, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
    let status = row.status.parse::<OrderStatus>().map_err(|_| {
        DomainError::Internal(format!("order {} has unknown status '{}'", row.id, row.status))
    })?;
    Ok(OrderView {
        id: row.id,
        order_number: row.order_number,
        customer_id: row.customer_id,
        status,
        order_date: row.order_date,
        subtotal: row.subtotal,
        tax_amount: row.tax_amount,
        shipping_amount: row.shipping_amount,
        discount_amount: row.discount_amount,
        total: row.total,
        shipping_address: row.shipping_address,
        billing_address: row.billing_address,
        notes: row.notes,
        created_by: row.created_by_id,
        updated_by: row.updated_by_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        items: items.into_iter().map(item_view).collect(),
    })
}

fn load_items(conn: &mut PgConnection, order: &OrderRow) -> QueryResult<Vec<OrderItemRow>> {
    OrderItemRow::belonging_to(order)
        .select(OrderItemRow::as_select())
        .order(orders_orderitem::id.asc())
        .load(conn)
}

/// Attaches items to a page of orders with one extra query.
fn with_items(conn: &mut PgConnection, rows: Vec<OrderRow>) -> Result<Vec<OrderView>, DomainError> {
    let items = OrderItemRow::belonging_to(&rows)
        .select(OrderItemRow::as_select())
        .order(orders_orderitem::id.asc())
        .load(conn)?;
    items
        .grouped_by(&rows)
        .into_iter()
        .zip(rows)
        .map(|(items, row)| order_view(row, items))
        .collect()
}

/// Row offset of a 1-based page.
fn page_offset(page: i64, limit: i64) -> Result<i64, DomainError> {
    if page < 1 || limit < 1 {
        return Err(DomainError::InvalidInput(format!(
            "page {} with limit {} is out of range",
            page, limit
        )));
    }
    (page - 1).checked_mul(limit).ok_or_else(|| {
        DomainError::InvalidInput(format!("page {} with limit {} is out of range", page, limit))
    })
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: PricedOrder) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order; omitted columns take their defaults.
            let row = diesel::insert_into(orders_order::table)
                .values(&NewOrderRow {
                    order_number: &order.order_number,
                    status: order.status.as_ref().map(OrderStatus::as_str),
                    subtotal: &order.subtotal,
                    tax_amount: &order.tax_amount,
                    shipping_amount: &order.shipping_amount,
                    discount_amount: &order.discount_amount,
                    total: &order.total,
                    shipping_address: order.shipping_address.as_deref(),
                    billing_address: order.billing_address.as_deref(),
                    notes: order.notes.as_deref(),
                    created_by_id: order.created_by,
                    customer_id: order.customer_id,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert the items as point-in-time copies.
            let new_items: Vec<NewOrderItemRow> = order
                .items
                .iter()
                .map(|item| NewOrderItemRow {
                    product_name: &item.product_name,
                    product_sku: item.product_sku.as_deref(),
                    quantity: item.quantity,
                    unit_price: &item.unit_price,
                    total_price: &item.total_price,
                    order_id: row.id,
                })
                .collect();
            let items = if new_items.is_empty() {
                vec![]
            } else {
                diesel::insert_into(orders_orderitem::table)
                    .values(&new_items)
                    .returning(OrderItemRow::as_returning())
                    .get_results(conn)?
            };

            log::info!(
                "created order {} (id {}) for customer {}",
                row.order_number,
                row.id,
                row.customer_id
            );
            order_view(row, items)
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders_order::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, &order)?;
        order_view(order, items).map(Some)
    }

    fn find_by_order_number(&self, order_number: &str) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders_order::table
            .filter(orders_order::order_number.eq(order_number))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, &order)?;
        order_view(order, items).map(Some)
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders_order::table.count().get_result(conn)?;

            let rows = orders_order::table
                .select(OrderRow::as_select())
                .order((orders_order::order_date.desc(), orders_order::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: with_items(conn, rows)?,
                total,
            })
        })
    }

    fn list_for_customer(
        &self,
        customer_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders_order::table
                .filter(orders_order::customer_id.eq(customer_id))
                .count()
                .get_result(conn)?;

            let rows = orders_order::table
                .filter(orders_order::customer_id.eq(customer_id))
                .select(OrderRow::as_select())
                .order((orders_order::order_date.desc(), orders_order::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: with_items(conn, rows)?,
                total,
            })
        })
    }

    fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        updated_by: Option<i32>,
    ) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::update(orders_order::table.find(id))
                .set(&OrderStatusChange {
                    status: status.as_str(),
                    updated_by_id: updated_by,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            let items = load_items(conn, &row)?;
            order_view(row, items)
        })
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(orders_order::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        log::info!("deleted order {}", id);
        Ok(())
    }
}
