use crm_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using CrmError
pub type Result<T> = std::result::Result<T, CrmError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure that crosses a crate boundary is classified into one of
/// these kinds. Each kind maps to a stable `ERR_*` code suitable for tests,
/// CLI exit messages and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input / domain
    InvalidInput,
    EntityNotFound,
    ValidationFailure,
    AlreadyExists,
    OwnershipConflict,

    // Storage
    ConstraintViolation,
    Persistence,
    Serialization,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::EntityNotFound => "ERR_ENTITY_NOT_FOUND",
            ExErrorKind::ValidationFailure => "ERR_VALIDATION_FAILURE",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::OwnershipConflict => "ERR_OWNERSHIP_CONFLICT",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context for
/// diagnostics. Built with the `with_*` methods:
///
/// ```
/// use crm_core::errors::{ExError, ExErrorKind};
///
/// let err = ExError::new(ExErrorKind::EntityNotFound)
///     .with_op("session_resolve")
///     .with_entity_id("c-1")
///     .with_message("Customer not found");
/// assert_eq!(err.code(), "ERR_ENTITY_NOT_FOUND");
/// ```
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            field: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add the offending field (validation failures)
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Wrap a lower-level error as the cause of this one
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for customer/order operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrmError {
    /// No row/entry exists for the given identity (e.g. resolving a deferred reference)
    #[error("{entity} not found: {id}")]
    EntityNotFound { entity: String, id: String },

    /// A field violates a storage-defined constraint
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailure { field: String, reason: String },

    /// A customer with this id is already present
    #[error("Customer already exists: {customer_id}")]
    CustomerAlreadyExists { customer_id: String },

    /// The order is owned by another customer and must be detached first
    #[error("Order {order_id} already belongs to customer {customer_id}")]
    OrderAlreadyAttached {
        order_id: String,
        customer_id: String,
    },

    /// The order is not part of this customer's order set
    #[error("Order {order_id} is not attached to customer {customer_id}")]
    OrderNotAttached {
        order_id: String,
        customer_id: String,
    },

    /// A stored or user-provided credit rating name is not a known symbol
    #[error("Unknown credit rating: {value}")]
    InvalidCreditRating { value: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CrmError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        CrmError::EntityNotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CrmError::ValidationFailure {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<CrmError> for ExError {
    fn from(err: CrmError) -> Self {
        let message = err.to_string();
        match err {
            CrmError::EntityNotFound { entity, id } => ExError::new(ExErrorKind::EntityNotFound)
                .with_entity_id(id)
                .with_message(format!("{} not found", entity)),

            CrmError::ValidationFailure { field, reason } => {
                ExError::new(ExErrorKind::ValidationFailure)
                    .with_field(field)
                    .with_message(reason)
            }

            CrmError::CustomerAlreadyExists { customer_id } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_entity_id(customer_id)
                    .with_message(message)
            }

            CrmError::OrderAlreadyAttached { order_id, .. } => {
                ExError::new(ExErrorKind::OwnershipConflict)
                    .with_entity_id(order_id)
                    .with_message(message)
            }

            CrmError::OrderNotAttached { order_id, .. } => {
                ExError::new(ExErrorKind::EntityNotFound)
                    .with_entity_id(order_id)
                    .with_message(message)
            }

            CrmError::InvalidCreditRating { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_field("credit_rating")
                .with_message(message),

            CrmError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            CrmError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for CrmError {
    fn from(err: serde_json::Error) -> Self {
        CrmError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_failure_kinds_have_stable_codes() {
        assert_eq!(ExErrorKind::EntityNotFound.code(), "ERR_ENTITY_NOT_FOUND");
        assert_eq!(
            ExErrorKind::ValidationFailure.code(),
            "ERR_VALIDATION_FAILURE"
        );
    }

    #[test]
    fn test_validation_failure_keeps_field() {
        let ex: ExError = CrmError::validation("last_name", "too long").into();
        assert_eq!(ex.kind(), ExErrorKind::ValidationFailure);
        assert_eq!(ex.field(), Some("last_name"));
        assert_eq!(ex.message(), "too long");
    }

    #[test]
    fn test_display_includes_code_and_op() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("sqlite")
            .with_message("disk I/O error");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_PERSISTENCE]"));
        assert!(text.contains("in operation 'sqlite'"));
        assert!(text.contains("disk I/O error"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error;

        let inner = ExError::new(ExErrorKind::ConstraintViolation).with_message("CHECK failed");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);
        let source = outer.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("ERR_CONSTRAINT_VIOLATION"));
    }
}
