//! Seed command
//!
//! Usage: crm-cli seed

use chrono::{Duration, Utc};
use clap::Args;
use crm_core::{CreditRating, Customer, Location, Order};
use std::path::Path;

use super::{open_db, CmdResult};

#[derive(Debug, Args)]
pub struct SeedArgs {}

/// "John3 Doe3", a gold customer with 100 points and two orders
pub fn sample_customer() -> crm_core::Result<Customer> {
    let now = Utc::now();
    let address = Location::new("Freedom avenue , 3th ", "Mons", "Wallonia", "Belgium");

    let mut customer = Customer::create("John3", "Doe3");
    customer.points = 100;
    customer.has_gold_status = true;
    customer.member_since = Some(now);
    customer.credit_rating = CreditRating::Good;
    customer.address = address.clone();

    customer.attach_order(
        Order::create(now, address.clone()).with_shipped_at(now + Duration::days(2)),
    )?;
    customer.attach_order(Order::create(now, address))?;
    Ok(customer)
}

pub fn execute(db: &Path, _args: SeedArgs) -> CmdResult {
    let mut conn = open_db(db)?;
    let customer = sample_customer()?;
    crm_store::with_session(&mut conn, |session| session.save(&customer))?;

    println!(
        "Seeded customer {} ({}, {} orders)",
        customer.id(),
        customer.full_name(),
        customer.order_count()
    );
    Ok(())
}
