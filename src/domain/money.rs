//! Currency arithmetic for `numeric(10, 2)` columns.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::errors::DomainError;

pub const MONEY_SCALE: i64 = 2;
pub const MONEY_PRECISION: u32 = 10;

/// Round half-up to two fraction digits.
pub fn round_money(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

/// Rounds `amount` and checks that it fits ten digits with two after the point.
pub fn ensure_fits(field: &str, amount: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let rounded = round_money(amount);
    let limit = BigDecimal::from(10i64.pow(MONEY_PRECISION - MONEY_SCALE as u32));
    if rounded.abs() >= limit {
        return Err(DomainError::InvalidInput(format!(
            "{} {} exceeds numeric({}, {})",
            field, rounded, MONEY_PRECISION, MONEY_SCALE
        )));
    }
    Ok(rounded)
}

pub fn ensure_non_negative(field: &str, amount: &BigDecimal) -> Result<BigDecimal, DomainError> {
    let rounded = ensure_fits(field, amount)?;
    if rounded < BigDecimal::zero() {
        return Err(DomainError::InvalidInput(format!(
            "{} must not be negative, got {}",
            field, rounded
        )));
    }
    Ok(rounded)
}

/// `quantity * unit_price`, rounded.
pub fn line_total(quantity: u32, unit_price: &BigDecimal) -> Result<BigDecimal, DomainError> {
    ensure_fits("total_price", &(unit_price * BigDecimal::from(quantity)))
}

/// `subtotal + tax + shipping - discount`, rounded.
pub fn order_total(
    subtotal: &BigDecimal,
    tax: &BigDecimal,
    shipping: &BigDecimal,
    discount: &BigDecimal,
) -> Result<BigDecimal, DomainError> {
    ensure_fits("total", &(subtotal + tax + shipping - discount))
}
