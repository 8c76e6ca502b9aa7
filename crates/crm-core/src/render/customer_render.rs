use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::{Customer, Order};

/// Multi-line diagnostic description of a customer and all of its orders
///
/// Orders are listed in id order, so two renders of equal customers are
/// byte-for-byte identical.
pub fn render_customer(customer: &Customer) -> String {
    let mut output = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(output, "Customer {}", customer.id());
    let _ = writeln!(output, "  Name: {}", customer.full_name());
    let _ = writeln!(output, "  Points: {}", customer.points);
    let _ = writeln!(
        output,
        "  Gold status: {}",
        if customer.has_gold_status { "yes" } else { "no" }
    );
    let _ = writeln!(
        output,
        "  Member since: {}",
        customer
            .member_since
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(output, "  Credit rating: {}", customer.credit_rating);
    if !customer.address.is_empty() {
        let _ = writeln!(output, "  Address: {}", customer.address);
    }
    let _ = writeln!(output, "  Orders ({}):", customer.order_count());
    for order in customer.orders() {
        let _ = writeln!(output, "    - {}", render_order(order));
    }

    output
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_customer(self))
    }
}

/// One-line description of an order
pub fn render_order(order: &Order) -> String {
    let shipped = order
        .shipped_at
        .map(format_timestamp)
        .unwrap_or_else(|| "pending".to_string());
    let mut line = format!(
        "Order {}: ordered {}, shipped {}",
        order.id(),
        format_timestamp(order.order_at),
        shipped
    );
    if !order.ship_to.is_empty() {
        let _ = write!(line, ", ship to {}", order.ship_to);
    }
    line
}

/// "First Last (N points, M orders)"
pub fn render_short(customer: &Customer) -> String {
    format!(
        "{} ({} points, {} orders)",
        customer.full_name(),
        customer.points,
        customer.order_count()
    )
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreditRating, Location};
    use chrono::TimeZone;

    fn sample() -> Customer {
        let mut c = Customer::new("c-1".to_string(), "John3", "Doe3");
        c.points = 100;
        c.has_gold_status = true;
        c.credit_rating = CreditRating::Good;
        let address = Location::new("Freedom avenue , 3th ", "Mons", "Wallonia", "Belgium");
        c.address = address.clone();
        let placed = Utc.with_ymd_and_hms(2016, 1, 1, 10, 0, 0).unwrap();
        c.attach_order(Order::new("o-1".to_string(), placed, address))
            .unwrap();
        c
    }

    #[test]
    fn test_render_customer_lists_everything() {
        let text = render_customer(&sample());
        assert!(text.starts_with("Customer c-1\n"));
        assert!(text.contains("  Name: John3 Doe3\n"));
        assert!(text.contains("  Points: 100\n"));
        assert!(text.contains("  Gold status: yes\n"));
        assert!(text.contains("  Member since: -\n"));
        assert!(text.contains("  Credit rating: Good\n"));
        assert!(text.contains("  Address: Freedom avenue , 3th, Mons, Wallonia, Belgium\n"));
        assert!(text.contains("  Orders (1):\n"));
        assert!(text.contains(
            "    - Order o-1: ordered 2016-01-01T10:00:00Z, shipped pending, ship to Freedom avenue , 3th, Mons, Wallonia, Belgium\n"
        ));
    }

    #[test]
    fn test_display_matches_render() {
        let c = sample();
        assert_eq!(c.to_string(), render_customer(&c));
    }

    #[test]
    fn test_render_short() {
        assert_eq!(render_short(&sample()), "John3 Doe3 (100 points, 1 orders)");
    }
}
