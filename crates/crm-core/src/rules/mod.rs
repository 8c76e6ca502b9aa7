pub mod validation;

pub use validation::{validate_customer, validate_order};
