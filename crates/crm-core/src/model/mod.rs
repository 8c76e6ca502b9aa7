pub mod credit_rating;
pub mod customer;
pub mod entity_ref;
pub mod location;
pub mod order;

pub use credit_rating::CreditRating;
pub use customer::Customer;
pub use entity_ref::{Entity, EntityRef};
pub use location::Location;
pub use order::Order;
