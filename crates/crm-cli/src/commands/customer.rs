//! Customer commands
//!
//! Usage:
//!   crm-cli customer create --first-name <F> --last-name <L> [...]
//!   crm-cli customer show <ID> [--lazy] [--json] [--fetch join|select]
//!   crm-cli customer list [--json]
//!   crm-cli customer delete <ID>
//!   crm-cli customer rename <ID> [--first-name <F>] [--last-name <L>]

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use crm_core::errors::CrmError;
use crm_core::render::{render_customer, render_short};
use crm_core::{CreditRating, Customer};
use crm_store::{with_session, Session};
use std::path::Path;

use super::{open_db, AddressArgs, CmdResult, FetchArg};

#[derive(Debug, Args)]
pub struct CustomerArgs {
    #[command(subcommand)]
    pub command: CustomerCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    /// Create a customer without orders
    Create(CreateArgs),
    /// Show one customer with its orders
    Show(ShowArgs),
    /// One line per customer, ordered by id
    List(ListArgs),
    /// Delete a customer and all of its orders
    Delete(DeleteArgs),
    /// Change a customer's names
    Rename(RenameArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long, default_value_t = 0)]
    pub points: i32,
    #[arg(long)]
    pub gold: bool,
    /// Credit rating by name (Excellent, VeryVeryGood, ..., Bad)
    #[arg(long, default_value = "Neutral")]
    pub rating: CreditRating,
    /// RFC 3339 timestamp
    #[arg(long)]
    pub member_since: Option<DateTime<Utc>>,
    #[command(flatten)]
    pub address: AddressArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
    /// Take a deferred reference first and resolve it explicitly
    #[arg(long)]
    pub lazy: bool,
    #[arg(long)]
    pub json: bool,
    #[arg(long, value_enum, default_value = "join")]
    pub fetch: FetchArg,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub id: String,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
}

pub fn execute(db: &Path, args: CustomerArgs) -> CmdResult {
    match args.command {
        CustomerCommand::Create(a) => execute_create(db, a),
        CustomerCommand::Show(a) => execute_show(db, a),
        CustomerCommand::List(a) => execute_list(db, a),
        CustomerCommand::Delete(a) => execute_delete(db, a),
        CustomerCommand::Rename(a) => execute_rename(db, a),
    }
}

fn execute_create(db: &Path, args: CreateArgs) -> CmdResult {
    let mut customer = Customer::create(args.first_name, args.last_name);
    customer.points = args.points;
    customer.has_gold_status = args.gold;
    customer.credit_rating = args.rating;
    customer.member_since = args.member_since;
    customer.address = args.address.into();

    let mut conn = open_db(db)?;
    with_session(&mut conn, |session| session.save(&customer))?;
    println!("{}", customer.id());
    Ok(())
}

fn execute_show(db: &Path, args: ShowArgs) -> CmdResult {
    let mut conn = open_db(db)?;
    let session = Session::begin(&mut conn)?.with_fetch_mode(args.fetch.into());

    let customer = if args.lazy {
        let reference = session.load(&args.id);
        eprintln!("Deferred reference to customer {}", reference.id());
        session.resolve(reference)?
    } else {
        session
            .get(&args.id)?
            .ok_or_else(|| CrmError::not_found("Customer", args.id.as_str()))?
    };
    session.commit()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&customer)?);
    } else {
        print!("{}", render_customer(&customer));
    }
    Ok(())
}

fn execute_list(db: &Path, args: ListArgs) -> CmdResult {
    let mut conn = open_db(db)?;
    let customers = with_session(&mut conn, |session| session.list_all())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&customers)?);
    } else {
        for customer in &customers {
            println!("{}  {}", customer.id(), render_short(customer));
        }
    }
    Ok(())
}

fn execute_delete(db: &Path, args: DeleteArgs) -> CmdResult {
    let mut conn = open_db(db)?;
    let removed = with_session(&mut conn, |session| session.delete(&args.id))?;

    match removed {
        Some(orders) => {
            println!("Deleted customer {} and {} orders", args.id, orders);
            Ok(())
        }
        None => Err(CrmError::not_found("Customer", args.id).into()),
    }
}

fn execute_rename(db: &Path, args: RenameArgs) -> CmdResult {
    let mut conn = open_db(db)?;
    let customer = with_session(&mut conn, |session| {
        let mut customer = session.resolve(session.load(&args.id))?;
        if let Some(first_name) = args.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = args.last_name {
            customer.last_name = last_name;
        }
        session.save(&customer)?;
        Ok(customer)
    })?;

    println!("{}", render_short(&customer));
    Ok(())
}
