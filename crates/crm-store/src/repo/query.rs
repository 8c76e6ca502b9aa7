//! Translate a `CustomerQuery` into one SQL statement
//!
//! Every restriction, sort key and the limit are evaluated by SQLite; the
//! result order equals what `CustomerQuery::apply` produces in memory.

use crm_core::queries::{CustomerQuery, Restriction, SortDirection, SortField};
use rusqlite::types::Value;

/// Correlated order count of customer `c`
pub const ORDER_COUNT_EXPR: &str = "(SELECT COUNT(*) FROM orders o WHERE o.customer_id = c.id)";

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub where_clause: String,
    pub order_by: String,
    pub limit: Option<i64>,
    pub params: Vec<Value>,
}

impl CompiledQuery {
    /// Full statement selecting `columns` from `customers c`
    pub fn select_sql(&self, columns: &str) -> String {
        let mut sql = format!("SELECT {} FROM customers c", columns);
        if !self.where_clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clause);
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(&self.order_by);
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}

pub fn compile(query: &CustomerQuery) -> CompiledQuery {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    for restriction in query.restrictions() {
        let (condition, value) = match restriction {
            Restriction::IdEq(id) => ("c.id = ?".to_string(), Value::Text(id.clone())),
            Restriction::FirstNameEq(name) => {
                ("c.first_name = ?".to_string(), Value::Text(name.clone()))
            }
            Restriction::FirstNameLike(pattern) => (
                "c.first_name LIKE ?".to_string(),
                Value::Text(pattern.clone()),
            ),
            Restriction::LastNameEq(name) => {
                ("c.last_name = ?".to_string(), Value::Text(name.clone()))
            }
            Restriction::LastNameLike(pattern) => (
                "c.last_name LIKE ?".to_string(),
                Value::Text(pattern.clone()),
            ),
            Restriction::LastNameLongerThan(n) => {
                ("length(c.last_name) > ?".to_string(), count_value(*n))
            }
            Restriction::PointsAtLeast(points) => (
                "c.points >= ?".to_string(),
                Value::Integer(i64::from(*points)),
            ),
            Restriction::HasGoldStatus(gold) => (
                "c.has_gold_status = ?".to_string(),
                Value::Integer(i64::from(*gold)),
            ),
            Restriction::CreditRatingIs(rating) => (
                "c.credit_rating = ?".to_string(),
                Value::Text(rating.as_str().to_string()),
            ),
            Restriction::OrderCountGreaterThan(n) => {
                (format!("{} > ?", ORDER_COUNT_EXPR), count_value(*n))
            }
        };
        conditions.push(condition);
        params.push(value);
    }

    let mut order_terms: Vec<String> = query
        .sort_keys()
        .iter()
        .map(|key| {
            let column = match key.field {
                SortField::FirstName => "c.first_name",
                SortField::LastName => "c.last_name",
                SortField::Points => "c.points",
                SortField::MemberSince => "c.member_since",
                SortField::OrderCount => ORDER_COUNT_EXPR,
            };
            let direction = match key.direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            format!("{} {}", column, direction)
        })
        .collect();
    order_terms.push("c.id ASC".to_string());

    CompiledQuery {
        where_clause: conditions.join(" AND "),
        order_by: order_terms.join(", "),
        limit: query.limit_value().map(to_i64),
        params,
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn count_value(n: usize) -> Value {
    Value::Integer(to_i64(n))
}
