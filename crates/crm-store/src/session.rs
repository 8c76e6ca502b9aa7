//! Unit of work over one SQLite transaction
//!
//! A `Session` owns a transaction for its whole lifetime. `commit` makes its
//! writes durable; `rollback`, or dropping the session without committing,
//! discards them. `with_session` wraps the common case: commit on `Ok`,
//! roll back on `Err` or panic.
//!
//! ```
//! use crm_core::Customer;
//! use crm_store::{db, with_session};
//!
//! let mut conn = db::open_store_in_memory().unwrap();
//! let id = with_session(&mut conn, |session| {
//!     let customer = Customer::create("John3", "Doe3");
//!     session.save(&customer)?;
//!     Ok(customer.id().to_string())
//! })
//! .unwrap();
//!
//! let reloaded = with_session(&mut conn, |session| session.get(&id)).unwrap();
//! assert_eq!(reloaded.map(|c| c.full_name()), Some("John3 Doe3".to_string()));
//! ```

use std::time::Instant;

use crate::errors::{from_rusqlite, Result};
use crate::repo::hydration;
use crate::repo::{FetchMode, SqliteRepo};
use crm_core::errors::{CrmError, ExError};
use crm_core::queries::{CustomerQuery, CustomerSummary};
use crm_core::rules::{validate_customer, validate_order};
use crm_core::{log_op_end, log_op_error, log_op_start};
use crm_core::{Customer, EntityRef, Order, Store};
use crm_core_types::schema::FIELD_REQUEST_ID;
use crm_core_types::RequestContext;
use rusqlite::{Connection, Transaction};

pub struct Session<'conn> {
    tx: Transaction<'conn>,
    context: RequestContext,
    fetch_mode: FetchMode,
}

impl<'conn> Session<'conn> {
    /// Begin a transaction on `conn`
    pub fn begin(conn: &'conn mut Connection) -> Result<Self> {
        let context = RequestContext::new();
        let tx = conn.transaction().map_err(from_rusqlite)?;
        tracing::debug!(request_id = context.request_id.as_str(), "session begun");
        Ok(Self {
            tx,
            context,
            fetch_mode: FetchMode::default(),
        })
    }

    /// Replace the generated correlation context (e.g. one received from a caller)
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_fetch_mode(mut self, fetch_mode: FetchMode) -> Self {
        self.fetch_mode = fetch_mode;
        self
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }

    pub fn commit(self) -> Result<()> {
        let Session { tx, context, .. } = self;
        finish("session_commit", &context, || tx.commit())
    }

    pub fn rollback(self) -> Result<()> {
        let Session { tx, context, .. } = self;
        finish("session_rollback", &context, || tx.rollback())
    }

    /// Eager fetch: the customer with all of its orders, `None` if absent
    pub fn get(&self, customer_id: &str) -> Result<Option<Customer>> {
        self.run("session_get", |conn| {
            hydration::fetch_customer(conn, customer_id, self.fetch_mode)
        })
    }

    /// Deferred fetch: a reference that reads nothing until resolved
    pub fn load(&self, customer_id: &str) -> EntityRef<Customer> {
        tracing::debug!(customer_id, "deferred customer reference");
        EntityRef::unresolved(customer_id)
    }

    /// Produce the customer behind a reference
    ///
    /// # Errors
    ///
    /// `EntityNotFound` if the reference is unresolved and no row exists.
    pub fn resolve(&self, customer: EntityRef<Customer>) -> Result<Customer> {
        self.run("session_resolve", |conn| {
            customer.resolve_with(|id| hydration::fetch_customer(conn, id, self.fetch_mode))
        })
    }

    /// Persist a customer and its whole order set
    ///
    /// Orders in the set are inserted or updated; persisted orders that are
    /// no longer in the set are deleted.
    ///
    /// # Errors
    ///
    /// * `ValidationFailure` - a field violates its constraint
    /// * `OwnershipConflict` - an order id is persisted under another customer
    pub fn save(&self, customer: &Customer) -> Result<()> {
        self.run("session_save", |conn| {
            validate_customer(customer)?;
            SqliteRepo::persist_customer(conn, customer)?;
            for order in customer.orders() {
                SqliteRepo::persist_order(conn, customer.id(), order)?;
            }
            let orphans = SqliteRepo::remove_orphan_orders(conn, customer)?;
            tracing::debug!(
                customer_id = customer.id(),
                order_count = customer.order_count(),
                orphans_removed = orphans,
                "customer saved"
            );
            Ok(())
        })
    }

    /// Persist one order under the referenced customer, using only its id
    ///
    /// A resolved owner also takes the order into its in-memory set, with the
    /// back-reference set. An unresolved owner stays unresolved; the order is
    /// only in storage and comes back with the next `get` or `resolve`.
    ///
    /// # Errors
    ///
    /// * `EntityNotFound` - no customer has the referenced id
    /// * `OwnershipConflict` - the order belongs to another customer
    pub fn save_order(&self, owner: &mut EntityRef<Customer>, order: Order) -> Result<()> {
        self.run("session_save_order", |conn| {
            let owner_id = owner.id();
            if let Some(current) = order.customer_id() {
                if current != owner_id {
                    return Err(CrmError::OrderAlreadyAttached {
                        order_id: order.id().to_string(),
                        customer_id: current.to_string(),
                    }
                    .into());
                }
            }
            validate_order(&order)?;
            if !SqliteRepo::customer_exists(conn, owner_id)? {
                return Err(CrmError::not_found("Customer", owner_id).into());
            }
            SqliteRepo::persist_order(conn, owner_id, &order)?;
            if let Some(customer) = owner.get_mut() {
                customer.attach_order(order)?;
            }
            Ok(())
        })
    }

    /// Delete a customer and every order it owns
    ///
    /// Returns the number of orders removed, `None` if there was no such customer.
    pub fn delete(&self, customer_id: &str) -> Result<Option<usize>> {
        self.run("session_delete", |conn| {
            SqliteRepo::delete_customer(conn, customer_id)
        })
    }

    /// Customers matching `query`, hydrated with their orders
    pub fn query(&self, query: &CustomerQuery) -> Result<Vec<Customer>> {
        self.run("session_query", |conn| {
            hydration::fetch_matching(conn, query, self.fetch_mode)
        })
    }

    pub fn first(&self, query: &CustomerQuery) -> Result<Option<Customer>> {
        let query = query.clone().limit(1);
        self.run("session_first", |conn| {
            hydration::fetch_matching(conn, &query, self.fetch_mode)
                .map(|customers| customers.into_iter().next())
        })
    }

    pub fn project(&self, query: &CustomerQuery) -> Result<Vec<CustomerSummary>> {
        self.run("session_project", |conn| {
            SqliteRepo::project_customers(conn, query)
        })
    }

    /// Every customer, ordered by id
    pub fn list_all(&self) -> Result<Vec<Customer>> {
        self.run("session_list_all", |conn| {
            hydration::fetch_matching(conn, &CustomerQuery::new(), self.fetch_mode)
        })
    }

    /// Snapshot the whole database into an in-memory `Store`
    pub fn load_store(&self) -> Result<Store> {
        self.run("session_load_store", hydration::load_store)
    }

    fn run<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let request_id = self.context.request_id.as_str();
        log_op_start!(op, { FIELD_REQUEST_ID } = request_id);
        let start = Instant::now();

        let value = f(&*self.tx).map_err(|e| {
            let e = self.annotate(op, e);
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                { FIELD_REQUEST_ID } = request_id
            );
            e
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            { FIELD_REQUEST_ID } = request_id
        );
        Ok(value)
    }

    fn annotate(&self, op: &str, err: ExError) -> ExError {
        annotate(&self.context, op, err)
    }
}

/// Run `f` in a session; commit on `Ok`, roll back on `Err`
pub fn with_session<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Session<'_>) -> Result<T>,
{
    let session = Session::begin(conn)?;
    match f(&session) {
        Ok(value) => {
            session.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = session.rollback() {
                tracing::warn!(error = %rollback_err, "rollback after failed unit of work failed");
            }
            Err(err)
        }
    }
}

fn annotate(context: &RequestContext, op: &str, err: ExError) -> ExError {
    let err = match err.op() {
        Some(_) => err,
        None => err.with_op(op),
    };
    let err = err.with_request_id(context.request_id.clone());
    match &context.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

/// End a transaction, logging like any other session operation
fn finish<F>(op: &'static str, context: &RequestContext, end: F) -> Result<()>
where
    F: FnOnce() -> rusqlite::Result<()>,
{
    let request_id = context.request_id.as_str();
    log_op_start!(op, { FIELD_REQUEST_ID } = request_id);
    let start = Instant::now();

    end().map_err(|e| {
        let e = annotate(context, op, from_rusqlite(e));
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            { FIELD_REQUEST_ID } = request_id
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        { FIELD_REQUEST_ID } = request_id
    );
    Ok(())
}
