//! Criteria-style customer queries
//!
//! A `CustomerQuery` is a plain description (restrictions, sort keys,
//! limit). This module evaluates it against an in-memory `Store`; the
//! persistence crate translates the same description into SQL. Both
//! executors produce the same rows in the same order.

pub mod customer_query;
pub mod like;

pub use customer_query::{
    CustomerQuery, CustomerSummary, Restriction, SortDirection, SortField, SortKey,
};
pub use like::like_matches;
