use super::errors::DomainError;
use super::order::{ListResult, OrderStatus, OrderView, PricedOrder};

/// Persistence port for orders and their items. Listings are newest first.
pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, order: PricedOrder) -> Result<OrderView, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<OrderView>, DomainError>;
    fn find_by_order_number(&self, order_number: &str) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError>;
    fn list_for_customer(
        &self,
        customer_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError>;
    fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        updated_by: Option<i32>,
    ) -> Result<OrderView, DomainError>;
    /// Removes the order; its items go with it.
    fn delete(&self, id: i64) -> Result<(), DomainError>;
}
