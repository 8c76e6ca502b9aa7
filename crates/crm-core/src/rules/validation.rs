//! Field constraints enforced before anything reaches storage
//!
//! The limits mirror the CHECK constraints of the SQLite schema.

use crate::errors::{CrmError, Result};
use crate::model::{Customer, Location, Order};

pub const NAME_MAX_LEN: usize = 50;
pub const STREET_MAX_LEN: usize = 100;
pub const REGION_MAX_LEN: usize = 50;

/// Validate a customer, its address and every order it owns
///
/// # Errors
///
/// `ValidationFailure` naming the first offending field.
pub fn validate_customer(customer: &Customer) -> Result<()> {
    check_name("first_name", &customer.first_name)?;
    check_name("last_name", &customer.last_name)?;
    check_location("address", &customer.address)?;
    for order in customer.orders() {
        validate_order(order)?;
    }
    Ok(())
}

/// # Errors
///
/// `ValidationFailure` if the ship-to address exceeds a length limit or the
/// order claims to have shipped before it was placed.
pub fn validate_order(order: &Order) -> Result<()> {
    check_location("ship_to", &order.ship_to)?;
    if let Some(shipped_at) = order.shipped_at {
        if shipped_at < order.order_at {
            return Err(CrmError::validation(
                "shipped_at",
                "cannot be earlier than order_at",
            ));
        }
    }
    Ok(())
}

fn check_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CrmError::validation(field, "cannot be empty"));
    }
    check_len(field, value, NAME_MAX_LEN)
}

fn check_location(prefix: &str, location: &Location) -> Result<()> {
    check_len(&format!("{}.street", prefix), &location.street, STREET_MAX_LEN)?;
    check_len(&format!("{}.city", prefix), &location.city, REGION_MAX_LEN)?;
    check_len(
        &format!("{}.province", prefix),
        &location.province,
        REGION_MAX_LEN,
    )?;
    check_len(
        &format!("{}.country", prefix),
        &location.country,
        REGION_MAX_LEN,
    )
}

// Characters, not bytes: SQLite's length() counts characters for TEXT.
fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(CrmError::validation(
            field,
            format!("length {} exceeds maximum of {}", len, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_valid_customer_passes() {
        let c = Customer::new("c-1".to_string(), "John3", "Doe3");
        assert!(validate_customer(&c).is_ok());
    }

    #[test]
    fn test_overlong_last_name_fails() {
        let c = Customer::new("c-1".to_string(), "John", "D".repeat(100));
        let err = validate_customer(&c).unwrap_err();
        assert!(matches!(
            err,
            CrmError::ValidationFailure { ref field, .. } if field == "last_name"
        ));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let c = Customer::new("c-1".to_string(), "J".repeat(NAME_MAX_LEN), "Doe");
        assert!(validate_customer(&c).is_ok());
    }

    #[test]
    fn test_multibyte_names_count_characters() {
        let c = Customer::new("c-1".to_string(), "é".repeat(NAME_MAX_LEN), "Doe");
        assert!(validate_customer(&c).is_ok());
    }

    #[test]
    fn test_blank_first_name_fails() {
        let c = Customer::new("c-1".to_string(), "   ", "Doe");
        assert!(matches!(
            validate_customer(&c),
            Err(CrmError::ValidationFailure { ref field, .. }) if field == "first_name"
        ));
    }

    #[test]
    fn test_order_address_is_checked_through_customer() {
        let mut c = Customer::new("c-1".to_string(), "John", "Doe");
        let mut ship_to = Location::default();
        ship_to.city = "M".repeat(REGION_MAX_LEN + 1);
        c.attach_order(Order::new("o-1".to_string(), Utc::now(), ship_to))
            .unwrap();

        assert!(matches!(
            validate_customer(&c),
            Err(CrmError::ValidationFailure { ref field, .. }) if field == "ship_to.city"
        ));
    }

    #[test]
    fn test_shipping_before_ordering_fails() {
        let now = Utc::now();
        let order = Order::new("o-1".to_string(), now, Location::default())
            .with_shipped_at(now - Duration::days(1));
        assert!(matches!(
            validate_order(&order),
            Err(CrmError::ValidationFailure { ref field, .. }) if field == "shipped_at"
        ));
    }

    #[test]
    fn test_shipping_at_order_time_is_valid() {
        let now = Utc::now();
        let order = Order::new("o-1".to_string(), now, Location::default()).with_shipped_at(now);
        assert!(validate_order(&order).is_ok());
    }
}
