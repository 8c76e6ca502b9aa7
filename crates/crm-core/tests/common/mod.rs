use chrono::{Duration, Utc};
use crm_core::{CreditRating, Customer, Location, Order};

/// The address every sample entity ships to
#[allow(dead_code)]
pub fn sample_address() -> Location {
    Location::new("Freedom avenue , 3th ", "Mons", "Wallonia", "Belgium")
}

/// "John3 Doe3": 100 points, gold, rated Good, two orders
#[allow(dead_code)]
pub fn sample_customer() -> Customer {
    let now = Utc::now();
    let mut customer = Customer::create("John3", "Doe3");
    customer.points = 100;
    customer.has_gold_status = true;
    customer.credit_rating = CreditRating::Good;
    customer.address = sample_address();

    customer
        .attach_order(Order::create(now, sample_address()).with_shipped_at(now + Duration::days(2)))
        .unwrap();
    customer
        .attach_order(
            Order::create(now - Duration::days(1), sample_address())
                .with_shipped_at(now + Duration::days(1)),
        )
        .unwrap();
    customer
}

/// Customer with `orders` unshipped orders and no other attributes set
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
