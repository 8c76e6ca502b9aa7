//! Deferred entity references
//!
//! A reference either already holds the entity or only knows its id. An
//! unresolved reference is cheap to create (nothing is read) and is
//! resolved explicitly; resolving fails with `EntityNotFound` when nothing
//! backs the id.

use crate::errors::CrmError;
use crate::model::{Customer, Order};

/// An entity with a stable identity
pub trait Entity {
    /// Name used in error messages ("Customer", "Order")
    const KIND: &'static str;

    fn entity_id(&self) -> &str;
}

impl Entity for Customer {
    const KIND: &'static str = "Customer";

    fn entity_id(&self) -> &str {
        self.id()
    }
}

impl Entity for Order {
    const KIND: &'static str = "Order";

    fn entity_id(&self) -> &str {
        self.id()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityRef<T> {
    Resolved(T),
    Unresolved(String),
}

impl<T: Entity> EntityRef<T> {
    pub fn unresolved(id: impl Into<String>) -> Self {
        EntityRef::Unresolved(id.into())
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRef::Resolved(entity) => entity.entity_id(),
            EntityRef::Unresolved(id) => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, EntityRef::Resolved(_))
    }

    /// The entity, if it has already been fetched
    pub fn get(&self) -> Option<&T> {
        match self {
            EntityRef::Resolved(entity) => Some(entity),
            EntityRef::Unresolved(_) => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            EntityRef::Resolved(entity) => Some(entity),
            EntityRef::Unresolved(_) => None,
        }
    }

    /// Produce the entity, calling `fetch` only for an unresolved reference
    ///
    /// # Errors
    ///
    /// `EntityNotFound` (converted into `E`) if `fetch` finds nothing, or
    /// whatever error `fetch` itself returns.
    pub fn resolve_with<E, F>(self, fetch: F) -> Result<T, E>
    where
        F: FnOnce(&str) -> Result<Option<T>, E>,
        E: From<CrmError>,
    {
        match self {
            EntityRef::Resolved(entity) => Ok(entity),
            EntityRef::Unresolved(id) => match fetch(&id)? {
                Some(entity) => Ok(entity),
                None => Err(CrmError::not_found(T::KIND, id).into()),
            },
        }
    }
}

impl<T> From<T> for EntityRef<T> {
    fn from(entity: T) -> Self {
        EntityRef::Resolved(entity)
    }
}
