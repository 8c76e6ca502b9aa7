//! Row records and column codecs
//!
//! Timestamps are RFC 3339 UTC text with nanosecond precision: values
//! round-trip exactly and compare chronologically as strings.

use chrono::{DateTime, SecondsFormat, Utc};
use crm_core::{CreditRating, Customer, Location, Order};
use rusqlite::Row;

use crate::errors::{invalid_stored_value, Result};

pub const CUSTOMER_COLUMNS: &str = "c.id, c.first_name, c.last_name, c.points, c.has_gold_status, \
     c.member_since, c.credit_rating, c.street, c.city, c.province, c.country";

/// Number of columns in `CUSTOMER_COLUMNS`
pub const CUSTOMER_COLUMN_COUNT: usize = 11;

pub const ORDER_COLUMNS: &str = "o.id, o.customer_id, o.order_at, o.shipped_at, \
     o.ship_street, o.ship_city, o.ship_province, o.ship_country";

pub fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| invalid_stored_value(column, value, &e.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub points: i32,
    pub has_gold_status: bool,
    pub member_since: Option<String>,
    pub credit_rating: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
}

impl CustomerRecord {
    /// Read `CUSTOMER_COLUMNS` starting at column `offset`
    pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            first_name: row.get(offset + 1)?,
            last_name: row.get(offset + 2)?,
            points: row.get(offset + 3)?,
            has_gold_status: row.get(offset + 4)?,
            member_since: row.get(offset + 5)?,
            credit_rating: row.get(offset + 6)?,
            street: row.get(offset + 7)?,
            city: row.get(offset + 8)?,
            province: row.get(offset + 9)?,
            country: row.get(offset + 10)?,
        })
    }

    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            points: customer.points,
            has_gold_status: customer.has_gold_status,
            member_since: customer.member_since.as_ref().map(encode_timestamp),
            credit_rating: customer.credit_rating.as_str().to_string(),
            street: customer.address.street.clone(),
            city: customer.address.city.clone(),
            province: customer.address.province.clone(),
            country: customer.address.country.clone(),
        }
    }

    /// Build a customer without orders
    pub fn into_customer(self) -> Result<Customer> {
        let credit_rating: CreditRating = self.credit_rating.parse()?;
        let member_since = self
            .member_since
            .as_deref()
            .map(|ts| decode_timestamp("member_since", ts))
            .transpose()?;

        let mut customer = Customer::new(self.id, self.first_name, self.last_name);
        customer.points = self.points;
        customer.has_gold_status = self.has_gold_status;
        customer.member_since = member_since;
        customer.credit_rating = credit_rating;
        customer.address = Location {
            street: self.street,
            city: self.city,
            province: self.province,
            country: self.country,
        };
        Ok(customer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: String,
    pub customer_id: String,
    pub order_at: String,
    pub shipped_at: Option<String>,
    pub ship_street: String,
    pub ship_city: String,
    pub ship_province: String,
    pub ship_country: String,
}

impl OrderRecord {
    /// Read `ORDER_COLUMNS` starting at column `offset`
    pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            customer_id: row.get(offset + 1)?,
            order_at: row.get(offset + 2)?,
            shipped_at: row.get(offset + 3)?,
            ship_street: row.get(offset + 4)?,
            ship_city: row.get(offset + 5)?,
            ship_province: row.get(offset + 6)?,
            ship_country: row.get(offset + 7)?,
        })
    }

    /// Same as `from_row`, `None` when the outer join found no order
    pub fn from_joined_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<Self>> {
        let id: Option<String> = row.get(offset)?;
        match id {
            Some(_) => Self::from_row(row, offset).map(Some),
            None => Ok(None),
        }
    }

    pub fn from_order(customer_id: &str, order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer_id: customer_id.to_string(),
            order_at: encode_timestamp(&order.order_at),
            shipped_at: order.shipped_at.as_ref().map(encode_timestamp),
            ship_street: order.ship_to.street.clone(),
            ship_city: order.ship_to.city.clone(),
            ship_province: order.ship_to.province.clone(),
            ship_country: order.ship_to.country.clone(),
        }
    }

    /// Build a detached order; the caller attaches it to its customer
    pub fn into_order(self) -> Result<Order> {
        let order_at = decode_timestamp("order_at", &self.order_at)?;
        let shipped_at = self
            .shipped_at
            .as_deref()
            .map(|ts| decode_timestamp("shipped_at", ts))
            .transpose()?;

        let mut order = Order::new(
            self.id,
            order_at,
            Location {
                street: self.ship_street,
                city: self.ship_city,
                province: self.ship_province,
                country: self.ship_country,
            },
        );
        order.shipped_at = shipped_at;
        Ok(order)
    }
}
