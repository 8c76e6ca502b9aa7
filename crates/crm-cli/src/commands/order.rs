//! Order commands
//!
//! Usage: crm-cli order add <CUSTOMER_ID> [--shipped] [--street ...]

use chrono::Utc;
use clap::{Args, Subcommand};
use crm_core::Order;
use crm_store::with_session;
use std::path::Path;

use super::{open_db, AddressArgs, CmdResult};

#[derive(Debug, Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Place an order for an existing customer
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub customer_id: String,
    /// Mark the order as shipped now
    #[arg(long)]
    pub shipped: bool,
    #[command(flatten)]
    pub ship_to: AddressArgs,
}

pub fn execute(db: &Path, args: OrderArgs) -> CmdResult {
    match args.command {
        OrderCommand::Add(a) => execute_add(db, a),
    }
}

/// The customer is referenced by id only; it is never loaded
fn execute_add(db: &Path, args: AddArgs) -> CmdResult {
    let now = Utc::now();
    let mut order = Order::create(now, args.ship_to.into());
    if args.shipped {
        order = order.with_shipped_at(now);
    }

    let order_id = order.id().to_string();
    let mut conn = open_db(db)?;
    with_session(&mut conn, |session| {
        let mut owner = session.load(&args.customer_id);
        session.save_order(&mut owner, order)
    })?;

    println!("{order_id}");
    Ok(())
}
