use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::location::Location;

/// An order placed by a customer
///
/// Created on its own and then attached to exactly one `Customer` via
/// `Customer::attach_order`. The owning-customer back-reference is private:
/// only the owning side of the relation can set or clear it, so the two
/// sides cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: String,

    /// When the order was placed
    pub order_at: DateTime<Utc>,

    /// When the order left the warehouse (`None` while unshipped)
    pub shipped_at: Option<DateTime<Utc>>,

    /// Delivery address
    pub ship_to: Location,

    customer_id: Option<String>,
}

impl Order {
    /// Create a detached order with an explicit id
    pub fn new(id: String, order_at: DateTime<Utc>, ship_to: Location) -> Self {
        Self {
            id,
            order_at,
            shipped_at: None,
            ship_to,
            customer_id: None,
        }
    }

    /// Create a detached order with a fresh UUID v7 id
    pub fn create(order_at: DateTime<Utc>, ship_to: Location) -> Self {
        Self::new(Uuid::now_v7().to_string(), order_at, ship_to)
    }

    pub fn with_shipped_at(mut self, shipped_at: DateTime<Utc>) -> Self {
        self.shipped_at = Some(shipped_at);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the owning customer, `None` while detached
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        self.customer_id.is_some()
    }

    pub fn is_shipped(&self) -> bool {
        self.shipped_at.is_some()
    }

    pub(crate) fn set_owner(&mut self, customer_id: Option<String>) {
        self.customer_id = customer_id;
    }
}
