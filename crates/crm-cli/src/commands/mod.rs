pub mod customer;
pub mod order;
pub mod query;
pub mod seed;

use clap::{Args, ValueEnum};
use crm_core::Location;
use crm_store::FetchMode;
use rusqlite::Connection;
use std::path::Path;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database, creating and migrating it when needed
pub fn open_db(path: &Path) -> Result<Connection, Box<dyn std::error::Error>> {
    Ok(crm_store::db::open_store(path)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchArg {
    /// Orders joined into the customer statement
    Join,
    /// One order statement per customer
    Select,
}

impl From<FetchArg> for FetchMode {
    fn from(arg: FetchArg) -> Self {
        match arg {
            FetchArg::Join => FetchMode::Join,
            FetchArg::Select => FetchMode::Select,
        }
    }
}

/// Address flags shared by customer and order commands
#[derive(Debug, Clone, Default, Args)]
pub struct AddressArgs {
    #[arg(long, default_value = "")]
    pub street: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub province: String,
    #[arg(long, default_value = "")]
    pub country: String,
}

impl From<AddressArgs> for Location {
    fn from(args: AddressArgs) -> Self {
        Location::new(args.street, args.city, args.province, args.country)
    }
}
