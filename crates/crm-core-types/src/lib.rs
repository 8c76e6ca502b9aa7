//! Types shared by the CRM error and logging facilities
//!
//! - **Correlation**: `RequestId`, `TraceId` and the `RequestContext` a
//!   session carries for its whole unit of work
//! - **Schema**: canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
