use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::credit_rating::CreditRating;
use super::location::Location;
use super::order::Order;
use crate::errors::{CrmError, Result};

/// A customer and the set of orders it owns
///
/// Orders are unique by id. Every order in the set carries this customer's
/// id as its back-reference; `attach_order` and `detach_order` are the only
/// way to change membership and they update both sides together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    id: String,
    pub first_name: String,
    pub last_name: String,
    pub points: i32,
    pub has_gold_status: bool,
    pub member_since: Option<DateTime<Utc>>,
    pub credit_rating: CreditRating,
    pub address: Location,
    orders: BTreeMap<String, Order>,
}

impl Customer {
    /// Create a customer with no orders, zero points and a neutral rating
    pub fn new(id: String, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            points: 0,
            has_gold_status: false,
            member_since: None,
            credit_rating: CreditRating::default(),
            address: Location::default(),
            orders: BTreeMap::new(),
        }
    }

    /// Same as `new` with a fresh UUID v7 id
    pub fn create(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::new(Uuid::now_v7().to_string(), first_name, last_name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Take ownership of `order`, setting its back-reference to this customer
    ///
    /// An order already in the set under the same id is replaced.
    ///
    /// # Errors
    ///
    /// `OrderAlreadyAttached` if the order belongs to a different customer.
    pub fn attach_order(&mut self, mut order: Order) -> Result<()> {
        if let Some(owner) = order.customer_id() {
            if owner != self.id {
                return Err(CrmError::OrderAlreadyAttached {
                    order_id: order.id().to_string(),
                    customer_id: owner.to_string(),
                });
            }
        }

        order.set_owner(Some(self.id.clone()));
        self.orders.insert(order.id().to_string(), order);
        Ok(())
    }

    /// Release an order, clearing its back-reference
    ///
    /// # Errors
    ///
    /// `OrderNotAttached` if no order with this id is in the set.
    pub fn detach_order(&mut self, order_id: &str) -> Result<Order> {
        let mut order = self
            .orders
            .remove(order_id)
            .ok_or_else(|| CrmError::OrderNotAttached {
                order_id: order_id.to_string(),
                customer_id: self.id.clone(),
            })?;
        order.set_owner(None);
        Ok(order)
    }

    /// Orders in id order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Mutable access to an owned order's fields; ownership cannot be changed through it
    pub fn order_mut(&mut self, order_id: &str) -> Option<&mut Order> {
        self.orders.get_mut(order_id)
    }

    pub fn has_order(&self, order_id: &str) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str) -> Order {
        Order::new(id.to_string(), Utc::now(), Location::default())
    }

    #[test]
    fn test_new_customer_defaults() {
        let c = Customer::new("c-1".to_string(), "John", "Doe");
        assert_eq!(c.id(), "c-1");
        assert_eq!(c.full_name(), "John Doe");
        assert_eq!(c.points, 0);
        assert!(!c.has_gold_status);
        assert_eq!(c.credit_rating, CreditRating::Neutral);
        assert_eq!(c.order_count(), 0);
    }

    #[test]
    fn test_attach_sets_back_reference() {
        let mut c = Customer::new("c-1".to_string(), "John", "Doe");
        c.attach_order(order("o-1")).unwrap();

        let attached = c.order("o-1").unwrap();
        assert_eq!(attached.customer_id(), Some("c-1"));
    }

    #[test]
    fn test_detach_clears_back_reference() {
        let mut c = Customer::new("c-1".to_string(), "John", "Doe");
        c.attach_order(order("o-1")).unwrap();

        let detached = c.detach_order("o-1").unwrap();
        assert_eq!(detached.customer_id(), None);
        assert!(!c.has_order("o-1"));
    }

    #[test]
    fn test_orders_are_unique_by_id() {
        let mut c = Customer::new("c-1".to_string(), "John", "Doe");
        c.attach_order(order("o-1")).unwrap();
        c.attach_order(order("o-1")).unwrap();
        assert_eq!(c.order_count(), 1);
    }

    #[test]
    fn test_cannot_steal_another_customers_order() {
        let mut alice = Customer::new("c-a".to_string(), "Alice", "A");
        let mut bob = Customer::new("c-b".to_string(), "Bob", "B");
        alice.attach_order(order("o-1")).unwrap();

        let owned = alice.order("o-1").cloned().unwrap();
        let err = bob.attach_order(owned).unwrap_err();
        assert_eq!(
            err,
            CrmError::OrderAlreadyAttached {
                order_id: "o-1".to_string(),
                customer_id: "c-a".to_string(),
            }
        );
        assert_eq!(bob.order_count(), 0);
    }

    #[test]
    fn test_detached_order_can_move() {
        let mut alice = Customer::new("c-a".to_string(), "Alice", "A");
        let mut bob = Customer::new("c-b".to_string(), "Bob", "B");
        alice.attach_order(order("o-1")).unwrap();

        let moved = alice.detach_order("o-1").unwrap();
        bob.attach_order(moved).unwrap();
        assert_eq!(bob.order("o-1").unwrap().customer_id(), Some("c-b"));
    }

    #[test]
    fn test_detach_unknown_order_fails() {
        let mut c = Customer::new("c-1".to_string(), "John", "Doe");
        assert!(matches!(
            c.detach_order("missing"),
            Err(CrmError::OrderNotAttached { .. })
        ));
    }
}
