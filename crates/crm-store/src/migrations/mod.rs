//! Migration framework
//!
//! - embedded SQL migrations applied in order
//! - idempotent application recorded in `schema_version`
//! - SHA-256 checksums; an edited, already applied migration is rejected

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
