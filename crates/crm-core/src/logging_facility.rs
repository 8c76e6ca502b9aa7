//! Structured logging facility
//!
//! - one initialization point, `init(profile)`
//! - operation macros `log_op_start!`, `log_op_end!`, `log_op_error!` that
//!   emit the canonical `component` / `op` / `event` fields
//! - an in-memory capture layer for asserting on events in tests
//!
//! ```rust
//! use crm_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
