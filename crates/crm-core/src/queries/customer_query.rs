use std::cmp::Ordering;

use serde::Serialize;

use super::like::like_matches;
use crate::model::{CreditRating, Customer};
use crate::ops::Store;

/// A single filter condition; all restrictions of a query are AND-combined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    IdEq(String),
    FirstNameEq(String),
    FirstNameLike(String),
    LastNameEq(String),
    LastNameLike(String),
    /// Last name has strictly more than N characters
    LastNameLongerThan(usize),
    PointsAtLeast(i32),
    HasGoldStatus(bool),
    CreditRatingIs(CreditRating),
    /// Customer owns strictly more than N orders
    OrderCountGreaterThan(usize),
}

impl Restriction {
    pub fn matches(&self, customer: &Customer) -> bool {
        match self {
            Restriction::IdEq(id) => customer.id() == id,
            Restriction::FirstNameEq(name) => customer.first_name == *name,
            Restriction::FirstNameLike(pattern) => like_matches(pattern, &customer.first_name),
            Restriction::LastNameEq(name) => customer.last_name == *name,
            Restriction::LastNameLike(pattern) => like_matches(pattern, &customer.last_name),
            Restriction::LastNameLongerThan(n) => customer.last_name.chars().count() > *n,
            Restriction::PointsAtLeast(points) => customer.points >= *points,
            Restriction::HasGoldStatus(gold) => customer.has_gold_status == *gold,
            Restriction::CreditRatingIs(rating) => customer.credit_rating == *rating,
            Restriction::OrderCountGreaterThan(n) => customer.order_count() > *n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FirstName,
    LastName,
    Points,
    MemberSince,
    OrderCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    fn compare(&self, a: &Customer, b: &Customer) -> Ordering {
        let ordering = match self.field {
            SortField::FirstName => a.first_name.cmp(&b.first_name),
            SortField::LastName => a.last_name.cmp(&b.last_name),
            SortField::Points => a.points.cmp(&b.points),
            // None sorts first ascending, last descending (SQLite NULL placement)
            SortField::MemberSince => a.member_since.cmp(&b.member_since),
            SortField::OrderCount => a.order_count().cmp(&b.order_count()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Projection row: names and order count without materializing orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub order_count: usize,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            order_count: customer.order_count(),
        }
    }
}

/// Criteria query over customers
///
/// Built incrementally, so restrictions can be added based on runtime
/// input before the query is executed:
///
/// ```
/// use crm_core::queries::{CustomerQuery, Restriction, SortField};
///
/// let mut query = CustomerQuery::new()
///     .filter(Restriction::FirstNameLike("J%".to_string()))
///     .asc(SortField::FirstName)
///     .asc(SortField::LastName);
///
/// let only_doe = true;
/// if only_doe {
///     query = query.filter(Restriction::LastNameEq("Doe3".to_string()));
/// }
/// assert_eq!(query.restrictions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    restrictions: Vec<Restriction>,
    sort_keys: Vec<SortKey>,
    limit: Option<usize>,
}

impl CustomerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, restriction: Restriction) -> Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn order_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_keys.push(SortKey { field, direction });
        self
    }

    pub fn asc(self, field: SortField) -> Self {
        self.order_by(field, SortDirection::Asc)
    }

    pub fn desc(self, field: SortField) -> Self {
        self.order_by(field, SortDirection::Desc)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        self.restrictions.iter().all(|r| r.matches(customer))
    }

    /// Total order used by both executors: sort keys, then id ascending
    pub fn compare(&self, a: &Customer, b: &Customer) -> Ordering {
        self.sort_keys
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id().cmp(b.id()))
    }

    /// Filter, sort and limit any collection of customers
    pub fn apply<'a, I>(&self, customers: I) -> Vec<&'a Customer>
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        let mut selected: Vec<&'a Customer> =
            customers.into_iter().filter(|c| self.matches(c)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }

    /// Evaluate against an in-memory store
    pub fn run<'a>(&self, store: &'a Store) -> Vec<&'a Customer> {
        self.apply(store.customers.values())
    }

    /// First match in query order
    pub fn first<'a>(&self, store: &'a Store) -> Option<&'a Customer> {
        self.clone().limit(1).run(store).into_iter().next()
    }

    pub fn project(&self, store: &Store) -> Vec<CustomerSummary> {
        self.run(store).into_iter().map(CustomerSummary::from).collect()
    }
}
