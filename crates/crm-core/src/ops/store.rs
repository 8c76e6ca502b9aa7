use std::collections::HashMap;

use crate::errors::{CrmError, Result};
use crate::model::{Customer, EntityRef, Order};

/// In-memory customer store
///
/// Holds customers (and through them their orders) by id. Used as the
/// hydration target for persisted data and as the evaluation target of
/// in-memory queries. Not thread-safe; single-threaded use only.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) customers: HashMap<String, Customer>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// `EntityNotFound` if no customer has this id.
    pub fn get_customer(&self, id: &str) -> Result<&Customer> {
        self.customers
            .get(id)
            .ok_or_else(|| CrmError::not_found("Customer", id))
    }

    /// # Errors
    ///
    /// `EntityNotFound` if no customer has this id.
    pub fn get_customer_mut(&mut self, id: &str) -> Result<&mut Customer> {
        self.customers
            .get_mut(id)
            .ok_or_else(|| CrmError::not_found("Customer", id))
    }

    /// All customers, ordered by id
    pub fn list_customers(&self) -> Vec<&Customer> {
        let mut customers: Vec<&Customer> = self.customers.values().collect();
        customers.sort_by(|a, b| a.id().cmp(b.id()));
        customers
    }

    /// Insert or replace a customer (no validation; used by hydration and tests)
    pub fn insert_customer(&mut self, customer: Customer) {
        self.customers.insert(customer.id().to_string(), customer);
    }

    pub(crate) fn remove_customer(&mut self, id: &str) -> Option<Customer> {
        self.customers.remove(id)
    }

    pub fn contains_customer(&self, id: &str) -> bool {
        self.customers.contains_key(id)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Total number of orders reachable through any customer
    pub fn order_count(&self) -> usize {
        self.customers.values().map(Customer::order_count).sum()
    }

    /// Find an order by id together with its owner
    pub fn find_order(&self, order_id: &str) -> Option<(&Customer, &Order)> {
        self.customers
            .values()
            .find_map(|c| c.order(order_id).map(|o| (c, o)))
    }

    /// Resolve a deferred customer reference against this store
    ///
    /// # Errors
    ///
    /// `EntityNotFound` if the reference is unresolved and no customer has its id.
    pub fn resolve(&self, customer: EntityRef<Customer>) -> Result<Customer> {
        customer.resolve_with(|id| Ok(self.customers.get(id).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use chrono::Utc;

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert_eq!(store.customer_count(), 0);
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_get_missing_customer() {
        let store = Store::new();
        assert_eq!(
            store.get_customer("nope").unwrap_err(),
            CrmError::not_found("Customer", "nope")
        );
    }

    #[test]
    fn test_list_is_sorted_by_id() {
        let mut store = Store::new();
        store.insert_customer(Customer::new("c-2".to_string(), "B", "B"));
        store.insert_customer(Customer::new("c-1".to_string(), "A", "A"));

        let ids: Vec<&str> = store.list_customers().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["c-1", "c-2"]);
    }

    #[test]
    fn test_find_order_returns_owner() {
        let mut store = Store::new();
        let mut c = Customer::new("c-1".to_string(), "A", "A");
        c.attach_order(Order::new("o-1".to_string(), Utc::now(), Location::default()))
            .unwrap();
        store.insert_customer(c);

        let (owner, order) = store.find_order("o-1").unwrap();
        assert_eq!(owner.id(), "c-1");
        assert_eq!(order.customer_id(), Some("c-1"));
        assert!(store.find_order("o-2").is_none());
    }

    #[test]
    fn test_resolve_unresolved_reference() {
        let mut store = Store::new();
        store.insert_customer(Customer::new("c-1".to_string(), "A", "A"));

        let found = store.resolve(EntityRef::unresolved("c-1")).unwrap();
        assert_eq!(found.id(), "c-1");

        let missing = store.resolve(EntityRef::unresolved("c-9")).unwrap_err();
        assert_eq!(missing, CrmError::not_found("Customer", "c-9"));
    }
}
