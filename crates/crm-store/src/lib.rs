//! CRM Store - SQLite persistence for customers and their orders
//!
//! Provides:
//! - connection setup and embedded, checksummed schema migrations
//! - a repository mapping `Customer`/`Order` to rows and back
//! - store-side execution of `CustomerQuery`
//! - `Session`, the unit of work every caller goes through

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod session;

pub use errors::Result;
pub use repo::FetchMode;
pub use session::{with_session, Session};
