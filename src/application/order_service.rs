use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::money;
use crate::domain::order::{
    ListResult, NewOrderInput, NewOrderItemInput, OrderStatus, OrderView, PricedItem, PricedOrder,
    ORDER_NUMBER_MAX_LEN, PRODUCT_NAME_MAX_LEN, PRODUCT_SKU_MAX_LEN,
};
use crate::domain::ports::OrderRepository;

pub const MAX_PAGE_LIMIT: i64 = 100;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Prices every item, derives subtotal and total, and writes the order.
    pub fn place_order(&self, input: NewOrderInput) -> Result<OrderView, DomainError> {
        let order = price_order(input)?;
        log::debug!(
            "placing order {} for customer {} with {} item(s)",
            order.order_number,
            order.customer_id,
            order.items.len()
        );
        self.repo.create(order)
    }

    pub fn get_order(&self, id: i64) -> Result<OrderView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    pub fn get_by_order_number(&self, order_number: &str) -> Result<OrderView, DomainError> {
        self.repo
            .find_by_order_number(order_number)?
            .ok_or(DomainError::NotFound)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let (page, limit) = clamp_page(page, limit);
        self.repo.list(page, limit)
    }

    pub fn list_customer_orders(
        &self,
        customer_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        let (page, limit) = clamp_page(page, limit);
        self.repo.list_for_customer(customer_id, page, limit)
    }

    pub fn change_status(
        &self,
        id: i64,
        status: OrderStatus,
        updated_by: Option<i32>,
    ) -> Result<OrderView, DomainError> {
        log::info!("order {} -> {}", id, status);
        self.repo.update_status(id, status, updated_by)
    }

    pub fn delete_order(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}

fn clamp_page(page: i64, limit: i64) -> (i64, i64) {
    (page.max(1), limit.clamp(1, MAX_PAGE_LIMIT))
}

/// `ORD-` followed by twelve uppercase hex digits.
pub fn generate_order_number() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("ORD-{}", &id[..12])
}

fn price_item(item: NewOrderItemInput) -> Result<PricedItem, DomainError> {
    let name = item.product_name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("product_name must not be empty".into()));
    }
    if name.chars().count() > PRODUCT_NAME_MAX_LEN {
        return Err(DomainError::InvalidInput(format!(
            "product_name is longer than {} characters",
            PRODUCT_NAME_MAX_LEN
        )));
    }
    let sku = item
        .product_sku
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(sku) = &sku {
        if sku.chars().count() > PRODUCT_SKU_MAX_LEN {
            return Err(DomainError::InvalidInput(format!(
                "product_sku is longer than {} characters",
                PRODUCT_SKU_MAX_LEN
            )));
        }
    }
    let quantity = i32::try_from(item.quantity)
        .map_err(|_| DomainError::InvalidInput(format!("quantity {} is too large", item.quantity)))?;
    let unit_price = money::ensure_non_negative("unit_price", &item.unit_price)?;
    let total_price = money::line_total(item.quantity, &unit_price)?;

    Ok(PricedItem {
        product_name: name.to_string(),
        product_sku: sku,
        quantity,
        unit_price,
        total_price,
    })
}

/// Validates the input and computes every derived amount.
pub fn price_order(input: NewOrderInput) -> Result<PricedOrder, DomainError> {
    let order_number = match input.order_number {
        Some(number) => {
            let number = number.trim().to_string();
            if number.is_empty() || number.chars().count() > ORDER_NUMBER_MAX_LEN {
                return Err(DomainError::InvalidInput(format!(
                    "order_number must be 1 to {} characters",
                    ORDER_NUMBER_MAX_LEN
                )));
            }
            number
        }
        None => generate_order_number(),
    };

    let items = input
        .items
        .into_iter()
        .map(price_item)
        .collect::<Result<Vec<_>, _>>()?;

    let subtotal = items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + &item.total_price);
    let subtotal = money::ensure_fits("subtotal", &subtotal)?;
    let tax_amount = money::ensure_non_negative("tax_amount", &input.amounts.tax_amount)?;
    let shipping_amount =
        money::ensure_non_negative("shipping_amount", &input.amounts.shipping_amount)?;
    let discount_amount =
        money::ensure_non_negative("discount_amount", &input.amounts.discount_amount)?;
    let total = money::order_total(&subtotal, &tax_amount, &shipping_amount, &discount_amount)?;

    Ok(PricedOrder {
        customer_id: input.customer_id,
        order_number,
        status: input.status,
        subtotal,
        tax_amount,
        shipping_amount,
        discount_amount,
        total,
        shipping_address: input.shipping_address,
        billing_address: input.billing_address,
        notes: input.notes,
        created_by: input.created_by,
        items,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::domain::order::{OrderAmounts, OrderItemView};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn item(name: &str, quantity: u32, price: &str) -> NewOrderItemInput {
        NewOrderItemInput {
            product_name: name.to_string(),
            product_sku: Some(format!("SKU-{}", name)),
            quantity,
            unit_price: dec(price),
        }
    }

    fn input(items: Vec<NewOrderItemInput>) -> NewOrderInput {
        NewOrderInput {
            customer_id: 7,
            order_number: None,
            status: None,
            amounts: OrderAmounts::default(),
            shipping_address: None,
            billing_address: None,
            notes: None,
            created_by: None,
            items,
        }
    }

    /// Records what the service hands to the store.
    #[derive(Default)]
    struct RecordingRepo {
        created: Mutex<Vec<PricedOrder>>,
        last_page: Mutex<Option<(i64, i64)>>,
    }

    fn view_of(order: &PricedOrder) -> OrderView {
        let now = Utc::now();
        OrderView {
            id: 1,
            order_number: order.order_number.clone(),
            customer_id: order.customer_id,
            status: order.status.unwrap_or_default(),
            order_date: now,
            subtotal: order.subtotal.clone(),
            tax_amount: order.tax_amount.clone(),
            shipping_amount: order.shipping_amount.clone(),
            discount_amount: order.discount_amount.clone(),
            total: order.total.clone(),
            shipping_address: order.shipping_address.clone(),
            billing_address: order.billing_address.clone(),
            notes: order.notes.clone(),
            created_by: order.created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
            items: order
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| OrderItemView {
                    id: i as i64 + 1,
                    product_name: item.product_name.clone(),
                    product_sku: item.product_sku.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price.clone(),
                    total_price: item.total_price.clone(),
                    created_at: now,
                    updated_at: now,
                })
                .collect(),
        }
    }

    impl OrderRepository for RecordingRepo {
        fn create(&self, order: PricedOrder) -> Result<OrderView, DomainError> {
            let view = view_of(&order);
            self.created.lock().unwrap().push(order);
            Ok(view)
        }

        fn find_by_id(&self, id: i64) -> Result<Option<OrderView>, DomainError> {
            let created = self.created.lock().unwrap();
            Ok(created.first().filter(|_| id == 1).map(view_of))
        }

        fn find_by_order_number(&self, order_number: &str) -> Result<Option<OrderView>, DomainError> {
            let created = self.created.lock().unwrap();
            Ok(created
                .iter()
                .find(|o| o.order_number == order_number)
                .map(view_of))
        }

        fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
            *self.last_page.lock().unwrap() = Some((page, limit));
            Ok(ListResult {
                items: vec![],
                total: 0,
            })
        }

        fn list_for_customer(
            &self,
            _customer_id: i64,
            page: i64,
            limit: i64,
        ) -> Result<ListResult, DomainError> {
            self.list(page, limit)
        }

        fn update_status(
            &self,
            _id: i64,
            _status: OrderStatus,
            _updated_by: Option<i32>,
        ) -> Result<OrderView, DomainError> {
            Err(DomainError::NotFound)
        }

        fn delete(&self, _id: i64) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[test]
    fn prices_items_and_totals() {
        let mut order = input(vec![item("mug", 2, "12.50"), item("tea", 3, "4.99")]);
        order.amounts = OrderAmounts {
            tax_amount: dec("3.10"),
            shipping_amount: dec("5"),
            discount_amount: dec("2.00"),
        };

        let priced = price_order(order).unwrap();

        assert_eq!(priced.items[0].total_price, dec("25.00"));
        assert_eq!(priced.items[1].total_price, dec("14.97"));
        assert_eq!(priced.subtotal, dec("39.97"));
        assert_eq!(priced.total, dec("46.07"));
    }

    #[test]
    fn order_without_items_has_zero_subtotal() {
        let priced = price_order(input(vec![])).unwrap();
        assert_eq!(priced.subtotal, dec("0"));
        assert_eq!(priced.total, dec("0"));
    }

    #[test]
    fn generates_order_number_when_absent() {
        let priced = price_order(input(vec![])).unwrap();
        assert!(priced.order_number.starts_with("ORD-"));
        assert_eq!(priced.order_number.len(), 16);
        assert_ne!(priced.order_number, generate_order_number());
    }

    #[test]
    fn keeps_caller_order_number() {
        let mut order = input(vec![]);
        order.order_number = Some("  WEB-1001 ".into());
        assert_eq!(price_order(order).unwrap().order_number, "WEB-1001");
    }

    #[test]
    fn rejects_overlong_order_number() {
        let mut order = input(vec![]);
        order.order_number = Some("N".repeat(ORDER_NUMBER_MAX_LEN + 1));
        assert!(matches!(price_order(order), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn rejects_blank_or_overlong_product_name() {
        assert!(price_order(input(vec![item("  ", 1, "1.00")])).is_err());
        let long = "p".repeat(PRODUCT_NAME_MAX_LEN + 1);
        assert!(price_order(input(vec![item(&long, 1, "1.00")])).is_err());
    }

    #[test]
    fn blank_sku_is_stored_as_none() {
        let mut line = item("mug", 1, "1.00");
        line.product_sku = Some("   ".into());
        let priced = price_order(input(vec![line])).unwrap();
        assert_eq!(priced.items[0].product_sku, None);
    }

    #[test]
    fn rejects_negative_unit_price_and_discount() {
        assert!(price_order(input(vec![item("mug", 1, "-1.00")])).is_err());

        let mut order = input(vec![]);
        order.amounts.discount_amount = dec("-5");
        assert!(price_order(order).is_err());
    }

    #[test]
    fn rejects_subtotal_beyond_column_range() {
        let order = input(vec![item("yacht", 2, "60000000.00")]);
        assert!(matches!(price_order(order), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn service_hands_priced_order_to_repository() {
        let service = OrderService::new(RecordingRepo::default());

        let view = service
            .place_order(input(vec![item("mug", 4, "2.25")]))
            .unwrap();

        assert_eq!(view.status, OrderStatus::Pending);
        assert_eq!(view.total, dec("9.00"));
        let found = service.get_by_order_number(&view.order_number).unwrap();
        assert_eq!(found.items.len(), 1);
    }

    #[test]
    fn service_maps_missing_order_to_not_found() {
        let service = OrderService::new(RecordingRepo::default());
        assert!(matches!(service.get_order(42), Err(DomainError::NotFound)));
        assert!(matches!(
            service.get_by_order_number("ORD-NOPE"),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn service_clamps_pagination() {
        let repo = RecordingRepo::default();
        let service = OrderService::new(repo);

        service.list_orders(0, 1000).unwrap();
        assert_eq!(*service.repo.last_page.lock().unwrap(), Some((1, MAX_PAGE_LIMIT)));

        service.list_customer_orders(7, 3, 0).unwrap();
        assert_eq!(*service.repo.last_page.lock().unwrap(), Some((3, 1)));
    }
}
