use chrono::{Duration, Utc};
use crm_core::{CreditRating, Customer, Location, Order};
use rusqlite::Connection;

pub fn setup_test_db() -> Connection {
    crm_store::db::open_store_in_memory().expect("Failed to create in-memory store")
}

#[allow(dead_code)]
pub fn sample_address() -> Location {
    Location::new("Freedom avenue , 3th ", "Mons", "Wallonia", "Belgium")
}

/// "John3 Doe3": 100 points, gold, rated Good, member for a year, two orders
#[allow(dead_code)]
pub fn sample_customer() -> Customer {
    let now = Utc::now();
    let mut customer = Customer::create("John3", "Doe3");
    customer.points = 100;
    customer.has_gold_status = true;
    customer.member_since = Some(now - Duration::days(365));
    customer.credit_rating = CreditRating::Good;
    customer.address = sample_address();

    customer
        .attach_order(Order::create(now, sample_address()).with_shipped_at(now + Duration::days(2)))
        .unwrap();
    customer
        .attach_order(Order::create(now - Duration::hours(5), sample_address()))
        .unwrap();
    customer
}

#[allow(dead_code)]
pub fn customer_with_orders(first: &str, last: &str, orders: usize) -> Customer {
    let mut customer = Customer::create(first, last);
    for _ in 0..orders {
        customer
            .attach_order(Order::create(Utc::now(), Location::default()))
            .unwrap();
    }
    customer
}

#[allow(dead_code)]
pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}
