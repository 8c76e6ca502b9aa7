//! Hydration - rebuilds customers (with their orders) from rows

use std::collections::HashMap;

use crate::errors::Result;
use crate::repo::rows::{CustomerRecord, OrderRecord};
use crate::repo::{FetchMode, SqliteRepo};
use crm_core::queries::CustomerQuery;
use crm_core::{Customer, Store};
use rusqlite::Connection;

/// Build a customer and attach its orders, restoring every back-reference
pub fn assemble(record: CustomerRecord, orders: Vec<OrderRecord>) -> Result<Customer> {
    let mut customer = record.into_customer()?;
    for order in orders {
        customer.attach_order(order.into_order()?)?;
    }
    Ok(customer)
}

/// Load one customer with all of its orders
pub fn fetch_customer(
    conn: &Connection,
    customer_id: &str,
    mode: FetchMode,
) -> Result<Option<Customer>> {
    match mode {
        FetchMode::Join => SqliteRepo::get_customer_joined(conn, customer_id)?
            .map(|(record, orders)| assemble(record, orders))
            .transpose(),
        FetchMode::Select => match SqliteRepo::get_customer_record(conn, customer_id)? {
            Some(record) => {
                let orders = SqliteRepo::list_orders(conn, customer_id)?;
                assemble(record, orders).map(Some)
            }
            None => Ok(None),
        },
    }
}

/// Attach orders to already fetched customer rows, keeping their order
pub fn fetch_orders_for(
    conn: &Connection,
    records: Vec<CustomerRecord>,
    mode: FetchMode,
) -> Result<Vec<Customer>> {
    match mode {
        FetchMode::Join => {
            let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
            let mut by_customer: HashMap<String, Vec<OrderRecord>> = HashMap::new();
            for order in SqliteRepo::list_orders_for(conn, &ids)? {
                by_customer
                    .entry(order.customer_id.clone())
                    .or_default()
                    .push(order);
            }
            records
                .into_iter()
                .map(|record| {
                    let orders = by_customer.remove(&record.id).unwrap_or_default();
                    assemble(record, orders)
                })
                .collect()
        }
        FetchMode::Select => records
            .into_iter()
            .map(|record| {
                let orders = SqliteRepo::list_orders(conn, &record.id)?;
                assemble(record, orders)
            })
            .collect(),
    }
}

/// Customers matching `query`, fully hydrated
pub fn fetch_matching(
    conn: &Connection,
    query: &CustomerQuery,
    mode: FetchMode,
) -> Result<Vec<Customer>> {
    let records = SqliteRepo::query_customers(conn, query)?;
    fetch_orders_for(conn, records, mode)
}

/// Load every customer into an in-memory `Store`
pub fn load_store(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();
    for customer in fetch_matching(conn, &CustomerQuery::new(), FetchMode::Join)? {
        store.insert_customer(customer);
    }
    Ok(store)
}
