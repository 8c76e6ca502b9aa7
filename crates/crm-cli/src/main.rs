//! CRM CLI
//!
//! Command-line interface over the customer/order store

use clap::{Parser, Subcommand};
use crm_core::logging_facility::{init, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "crm-cli")]
#[command(about = "Customers and their orders, persisted in SQLite", long_about = None)]
struct Cli {
    /// SQLite database file (created on first use)
    #[arg(long, global = true, default_value = ".crm/store.db")]
    db: PathBuf,

    /// Log as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Save the sample customer "John3 Doe3" with two orders
    Seed(commands::seed::SeedArgs),
    /// Customer operations
    Customer(commands::customer::CustomerArgs),
    /// Order operations
    Order(commands::order::OrderArgs),
    /// Filter, sort and project customers
    Query(commands::query::QueryArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(&cli.db, args),
        Commands::Customer(args) => commands::customer::execute(&cli.db, args),
        Commands::Order(args) => commands::order::execute(&cli.db, args),
        Commands::Query(args) => commands::query::execute(&cli.db, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
