//! Operation logging macros
//!
//! Every session operation brackets its work with these: one `start` event,
//! then either `end` or `end_error`, all keyed by the names in
//! `crm_core_types::schema`. Callers must depend on `crm-core-types`.
//!
//! ```
//! use crm_core::errors::{CrmError, ExError};
//! use crm_core::{log_op_end, log_op_error, log_op_start, Customer};
//!
//! fn rename(customer: &mut Customer, last_name: &str) -> Result<(), ExError> {
//!     log_op_start!("customer_rename", customer_id = customer.id());
//!     if last_name.trim().is_empty() {
//!         let err = CrmError::ValidationFailure {
//!             field: "last_name".to_string(),
//!             reason: "must not be blank".to_string(),
//!         };
//!         log_op_error!("customer_rename", err.clone(), duration_ms = 0);
//!         return Err(err.into());
//!     }
//!     customer.last_name = last_name.to_string();
//!     log_op_end!("customer_rename", duration_ms = 0, customer_id = customer.id());
//!     Ok(())
//! }
//!
//! let mut customer = Customer::create("John3", "Doe3");
//! assert!(rename(&mut customer, "Smith").is_ok());
//! assert!(rename(&mut customer, " ").is_err());
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr, $($field:tt)*) => {
        tracing::$level!(
            { crm_core_types::schema::FIELD_COMPONENT } = module_path!(),
            { crm_core_types::schema::FIELD_OP } = $op,
            { crm_core_types::schema::FIELD_EVENT } = $event,
            $($field)*
        )
    };
}

/// `start` event for `op`, with optional extra fields
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            crm_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// `end` event for `op`; `duration_ms` is required
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            crm_core_types::schema::EVENT_END,
            { crm_core_types::schema::FIELD_DURATION_MS } = $duration,
            $($($field)*)?
        )
    };
}

/// `end_error` event carrying the error's kind and stable code
///
/// `$err` may be a `CrmError` or an `ExError`; it is converted first.
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            crm_core_types::schema::EVENT_END_ERROR,
            { crm_core_types::schema::FIELD_DURATION_MS } = $duration,
            { crm_core_types::schema::FIELD_ERR_KIND } = ?ex_err.kind(),
            { crm_core_types::schema::FIELD_ERR_CODE } = ex_err.code(),
            $($($field)*)?
        )
    }};
}
