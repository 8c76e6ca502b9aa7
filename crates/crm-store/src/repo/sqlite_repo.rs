//! SQLite repository for customers and orders
//!
//! Every function takes a `&Connection`; pass a `Transaction` (it derefs to
//! one) to run inside a unit of work.

use crate::errors::{from_rusqlite, Result};
use crate::repo::query::{compile, ORDER_COUNT_EXPR};
use crate::repo::rows::{
    CustomerRecord, OrderRecord, CUSTOMER_COLUMNS, CUSTOMER_COLUMN_COUNT, ORDER_COLUMNS,
};
use crm_core::errors::CrmError;
use crm_core::queries::{CustomerQuery, CustomerSummary};
use crm_core::{Customer, Order};
use rusqlite::{Connection, OptionalExtension};

/// Largest id list bound into one `IN (...)` clause
const IN_CLAUSE_CHUNK: usize = 500;

pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert or update the customer row (orders untouched)
    pub fn persist_customer(conn: &Connection, customer: &Customer) -> Result<()> {
        let r = CustomerRecord::from_customer(customer);
        conn.execute(
            "INSERT INTO customers (id, first_name, last_name, points, has_gold_status, member_since,
                                    credit_rating, street, city, province, country)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                points = excluded.points,
                has_gold_status = excluded.has_gold_status,
                member_since = excluded.member_since,
                credit_rating = excluded.credit_rating,
                street = excluded.street,
                city = excluded.city,
                province = excluded.province,
                country = excluded.country",
            rusqlite::params![
                r.id,
                r.first_name,
                r.last_name,
                r.points,
                r.has_gold_status,
                r.member_since,
                r.credit_rating,
                r.street,
                r.city,
                r.province,
                r.country,
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Insert or update an order owned by `customer_id`
    ///
    /// An existing row owned by a different customer is left alone and
    /// reported as `OrderAlreadyAttached`.
    pub fn persist_order(conn: &Connection, customer_id: &str, order: &Order) -> Result<()> {
        let r = OrderRecord::from_order(customer_id, order);
        let changed = conn
            .execute(
                "INSERT INTO orders (id, customer_id, order_at, shipped_at,
                                     ship_street, ship_city, ship_province, ship_country)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    order_at = excluded.order_at,
                    shipped_at = excluded.shipped_at,
                    ship_street = excluded.ship_street,
                    ship_city = excluded.ship_city,
                    ship_province = excluded.ship_province,
                    ship_country = excluded.ship_country
                 WHERE orders.customer_id = excluded.customer_id",
                rusqlite::params![
                    r.id,
                    r.customer_id,
                    r.order_at,
                    r.shipped_at,
                    r.ship_street,
                    r.ship_city,
                    r.ship_province,
                    r.ship_country,
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            let owner = Self::order_owner(conn, order.id())?.unwrap_or_default();
            return Err(CrmError::OrderAlreadyAttached {
                order_id: order.id().to_string(),
                customer_id: owner,
            }
            .into());
        }
        Ok(())
    }

    /// Delete persisted orders of `customer` that are no longer in its set
    ///
    /// Returns the number of rows removed.
    pub fn remove_orphan_orders(conn: &Connection, customer: &Customer) -> Result<usize> {
        let persisted = Self::order_ids(conn, customer.id())?;
        let mut removed = 0;
        for order_id in persisted.iter().filter(|id| !customer.has_order(id)) {
            removed += conn
                .execute("DELETE FROM orders WHERE id = ?1", [order_id])
                .map_err(from_rusqlite)?;
        }
        Ok(removed)
    }

    pub fn customer_exists(conn: &Connection, customer_id: &str) -> Result<bool> {
        conn.query_row(
            "SELECT 1 FROM customers WHERE id = ?1",
            [customer_id],
            |_| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
        .map_err(from_rusqlite)
    }

    /// Id of the customer owning `order_id`, if the order is persisted
    pub fn order_owner(conn: &Connection, order_id: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT customer_id FROM orders WHERE id = ?1",
            [order_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn get_customer_record(
        conn: &Connection,
        customer_id: &str,
    ) -> Result<Option<CustomerRecord>> {
        conn.query_row(
            &format!("SELECT {} FROM customers c WHERE c.id = ?1", CUSTOMER_COLUMNS),
            [customer_id],
            |row| CustomerRecord::from_row(row, 0),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// Customer row and its order rows in a single outer-join statement
    pub fn get_customer_joined(
        conn: &Connection,
        customer_id: &str,
    ) -> Result<Option<(CustomerRecord, Vec<OrderRecord>)>> {
        let sql = format!(
            "SELECT {}, {} FROM customers c
             LEFT JOIN orders o ON o.customer_id = c.id
             WHERE c.id = ?1
             ORDER BY o.id",
            CUSTOMER_COLUMNS, ORDER_COLUMNS
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let mut rows = stmt.query([customer_id]).map_err(from_rusqlite)?;

        let mut customer = None;
        let mut orders = Vec::new();
        while let Some(row) = rows.next().map_err(from_rusqlite)? {
            if customer.is_none() {
                customer = Some(CustomerRecord::from_row(row, 0).map_err(from_rusqlite)?);
            }
            if let Some(order) =
                OrderRecord::from_joined_row(row, CUSTOMER_COLUMN_COUNT).map_err(from_rusqlite)?
            {
                orders.push(order);
            }
        }
        Ok(customer.map(|c| (c, orders)))
    }

    /// Orders of one customer, ordered by id
    pub fn list_orders(conn: &Connection, customer_id: &str) -> Result<Vec<OrderRecord>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM orders o WHERE o.customer_id = ?1 ORDER BY o.id",
                ORDER_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let orders = stmt
            .query_map([customer_id], |row| OrderRecord::from_row(row, 0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(orders)
    }

    /// Orders of many customers, batched into `IN (...)` statements
    pub fn list_orders_for(conn: &Connection, customer_ids: &[String]) -> Result<Vec<OrderRecord>> {
        let mut orders = Vec::new();
        for chunk in customer_ids.chunks(IN_CLAUSE_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM orders o WHERE o.customer_id IN ({}) ORDER BY o.customer_id, o.id",
                    ORDER_COLUMNS, placeholders
                ))
                .map_err(from_rusqlite)?;
            let batch = stmt
                .query_map(rusqlite::params_from_iter(chunk.iter()), |row| {
                    OrderRecord::from_row(row, 0)
                })
                .map_err(from_rusqlite)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(from_rusqlite)?;
            orders.extend(batch);
        }
        Ok(orders)
    }

    fn order_ids(conn: &Connection, customer_id: &str) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT id FROM orders WHERE customer_id = ?1 ORDER BY id")
            .map_err(from_rusqlite)?;
        let ids = stmt
            .query_map([customer_id], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(ids)
    }

    /// Delete a customer and its orders
    ///
    /// Returns the number of orders removed, `None` if the customer does not exist.
    pub fn delete_customer(conn: &Connection, customer_id: &str) -> Result<Option<usize>> {
        if !Self::customer_exists(conn, customer_id)? {
            return Ok(None);
        }
        let orders_removed = conn
            .execute("DELETE FROM orders WHERE customer_id = ?1", [customer_id])
            .map_err(from_rusqlite)?;
        conn.execute("DELETE FROM customers WHERE id = ?1", [customer_id])
            .map_err(from_rusqlite)?;
        Ok(Some(orders_removed))
    }

    /// Customer rows matching `query`, in query order
    pub fn query_customers(conn: &Connection, query: &CustomerQuery) -> Result<Vec<CustomerRecord>> {
        let compiled = compile(query);
        let mut stmt = conn
            .prepare(&compiled.select_sql(CUSTOMER_COLUMNS))
            .map_err(from_rusqlite)?;
        let records = stmt
            .query_map(rusqlite::params_from_iter(compiled.params.iter()), |row| {
                CustomerRecord::from_row(row, 0)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(records)
    }

    /// Summary rows matching `query`; orders are counted, never loaded
    pub fn project_customers(
        conn: &Connection,
        query: &CustomerQuery,
    ) -> Result<Vec<CustomerSummary>> {
        let compiled = compile(query);
        let columns = format!("c.id, c.first_name, c.last_name, {}", ORDER_COUNT_EXPR);
        let mut stmt = conn
            .prepare(&compiled.select_sql(&columns))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(compiled.params.iter()), |row| {
                let order_count: i64 = row.get(3)?;
                Ok(CustomerSummary {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    order_count: usize::try_from(order_count).unwrap_or_default(),
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }
}
