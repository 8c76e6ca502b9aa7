use super::store::Store;
use crate::errors::{CrmError, Result};
use crate::model::{CreditRating, Customer, Order};
use crate::rules::validation;

/// Add a new customer (with any orders it already owns) to the store
///
/// # Errors
/// * `ValidationFailure` - a field violates its constraint
/// * `CustomerAlreadyExists` - the id is taken
/// * `OrderAlreadyAttached` - one of its orders belongs to a stored customer
pub fn create_customer(store: &mut Store, customer: Customer) -> Result<String> {
    validation::validate_customer(&customer)?;

    if store.contains_customer(customer.id()) {
        return Err(CrmError::CustomerAlreadyExists {
            customer_id: customer.id().to_string(),
        });
    }

    for order in customer.orders() {
        if let Some((owner, _)) = store.find_order(order.id()) {
            return Err(CrmError::OrderAlreadyAttached {
                order_id: order.id().to_string(),
                customer_id: owner.id().to_string(),
            });
        }
    }

    let id = customer.id().to_string();
    store.insert_customer(customer);
    Ok(id)
}

/// # Errors
/// * `EntityNotFound` - no customer has this id
pub fn read_customer<'a>(store: &'a Store, id: &str) -> Result<&'a Customer> {
    store.get_customer(id)
}

/// Partial update of a customer's scalar attributes
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub points: Option<i32>,
    pub has_gold_status: Option<bool>,
    pub credit_rating: Option<CreditRating>,
}

/// Apply a partial update; the stored customer is untouched if validation fails
///
/// # Errors
/// * `EntityNotFound` - no customer has this id
/// * `ValidationFailure` - the updated customer violates a constraint
pub fn update_customer(store: &mut Store, id: &str, update: CustomerUpdate) -> Result<()> {
    let mut updated = store.get_customer(id)?.clone();

    if let Some(first_name) = update.first_name {
        updated.first_name = first_name;
    }
    if let Some(last_name) = update.last_name {
        updated.last_name = last_name;
    }
    if let Some(points) = update.points {
        updated.points = points;
    }
    if let Some(gold) = update.has_gold_status {
        updated.has_gold_status = gold;
    }
    if let Some(rating) = update.credit_rating {
        updated.credit_rating = rating;
    }

    validation::validate_customer(&updated)?;
    store.insert_customer(updated);
    Ok(())
}

/// Delete a customer and, with it, every order it owns
///
/// Returns the removed customer so callers can report what went away.
///
/// # Errors
/// * `EntityNotFound` - no customer has this id
pub fn delete_customer(store: &mut Store, id: &str) -> Result<Customer> {
    let removed = store
        .remove_customer(id)
        .ok_or_else(|| CrmError::not_found("Customer", id))?;
    tracing::debug!(
        customer_id = id,
        orders_removed = removed.order_count(),
        "customer deleted with its orders"
    );
    Ok(removed)
}

/// Attach a new order to an existing customer
///
/// # Errors
/// * `EntityNotFound` - no customer has this id
/// * `ValidationFailure` - the order violates a constraint
/// * `OrderAlreadyAttached` - the order belongs to another customer
pub fn add_order(store: &mut Store, customer_id: &str, order: Order) -> Result<()> {
    validation::validate_order(&order)?;
    if let Some((owner, _)) = store.find_order(order.id()) {
        if owner.id() != customer_id {
            return Err(CrmError::OrderAlreadyAttached {
                order_id: order.id().to_string(),
                customer_id: owner.id().to_string(),
            });
        }
    }
    store.get_customer_mut(customer_id)?.attach_order(order)
}

/// Detach an order from its customer and hand it back
///
/// # Errors
/// * `EntityNotFound` - no customer has this id
/// * `OrderNotAttached` - the customer does not own this order
pub fn remove_order(store: &mut Store, customer_id: &str, order_id: &str) -> Result<Order> {
    store.get_customer_mut(customer_id)?.detach_order(order_id)
}
