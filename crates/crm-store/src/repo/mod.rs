//! Repository layer mapping customers and orders to SQLite rows

pub mod hydration;
pub mod query;
pub mod rows;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;

/// How a customer's orders are fetched alongside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Join orders in the customer statement; one batched order statement for lists
    #[default]
    Join,
    /// One order statement per customer
    Select,
}
