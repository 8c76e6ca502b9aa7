//! CRM Core - customer/order domain model
//!
//! - `Customer`, `Order`, `Location` and `CreditRating` with the
//!   customer-owns-orders invariant kept by `attach_order`/`detach_order`
//! - deferred references (`EntityRef`) with explicit resolution
//! - field validation mirroring the storage constraints
//! - criteria queries and their in-memory evaluation over a `Store`
//! - text rendering for diagnostics
//! - the structured error and logging facilities shared by every crate

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod render;
pub mod rules;

pub use errors::{CrmError, ExError, ExErrorKind, Result};
pub use model::{CreditRating, Customer, Entity, EntityRef, Location, Order};
pub use ops::Store;
pub use queries::{CustomerQuery, CustomerSummary, Restriction, SortDirection, SortField};
