//! Query command
//!
//! Usage: crm-cli query [--first-name-like P] [--last-name-like P] [--min-orders N]
//!                      [--order-by FIELD]... [--desc] [--limit N] [--project]
//!                      [--in-memory] [--json]

use clap::{Args, ValueEnum};
use crm_core::render::render_short;
use crm_core::{Customer, CustomerQuery, CustomerSummary, Restriction, SortDirection, SortField};
use crm_store::{with_session, Session};
use std::path::Path;

use super::{open_db, CmdResult, FetchArg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderByArg {
    FirstName,
    LastName,
    Points,
    MemberSince,
    OrderCount,
}

impl From<OrderByArg> for SortField {
    fn from(arg: OrderByArg) -> Self {
        match arg {
            OrderByArg::FirstName => SortField::FirstName,
            OrderByArg::LastName => SortField::LastName,
            OrderByArg::Points => SortField::Points,
            OrderByArg::MemberSince => SortField::MemberSince,
            OrderByArg::OrderCount => SortField::OrderCount,
        }
    }
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// LIKE pattern on the first name (`%` any run, `_` one character)
    #[arg(long)]
    pub first_name_like: Option<String>,
    #[arg(long)]
    pub last_name_like: Option<String>,
    /// Keep customers with strictly more orders than this
    #[arg(long)]
    pub min_orders: Option<usize>,
    /// Sort keys, applied in the order given
    #[arg(long, value_enum)]
    pub order_by: Vec<OrderByArg>,
    /// Sort every key descending
    #[arg(long)]
    pub desc: bool,
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print id, names and order count only
    #[arg(long)]
    pub project: bool,
    /// Load everything, then evaluate the query in memory
    #[arg(long)]
    pub in_memory: bool,
    #[arg(long)]
    pub json: bool,
    #[arg(long, value_enum, default_value = "join")]
    pub fetch: FetchArg,
}

impl QueryArgs {
    fn to_query(&self) -> CustomerQuery {
        let mut query = CustomerQuery::new();
        if let Some(pattern) = &self.first_name_like {
            query = query.filter(Restriction::FirstNameLike(pattern.clone()));
        }
        if let Some(pattern) = &self.last_name_like {
            query = query.filter(Restriction::LastNameLike(pattern.clone()));
        }
        if let Some(n) = self.min_orders {
            query = query.filter(Restriction::OrderCountGreaterThan(n));
        }
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        for field in &self.order_by {
            query = query.order_by((*field).into(), direction);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}

enum Rows {
    Customers(Vec<Customer>),
    Summaries(Vec<CustomerSummary>),
}

pub fn execute(db: &Path, args: QueryArgs) -> CmdResult {
    let query = args.to_query();
    let mut conn = open_db(db)?;

    let rows = if args.in_memory {
        let store = with_session(&mut conn, |session| session.load_store())?;
        if args.project {
            Rows::Summaries(query.project(&store))
        } else {
            Rows::Customers(query.run(&store).into_iter().cloned().collect())
        }
    } else {
        let session = Session::begin(&mut conn)?.with_fetch_mode(args.fetch.into());
        let rows = if args.project {
            Rows::Summaries(session.project(&query)?)
        } else {
            Rows::Customers(session.query(&query)?)
        };
        session.commit()?;
        rows
    };

    match rows {
        Rows::Summaries(summaries) if args.json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?)
        }
        Rows::Summaries(summaries) => {
            for s in &summaries {
                println!(
                    "{}  {} {} ({} orders)",
                    s.id, s.first_name, s.last_name, s.order_count
                );
            }
        }
        Rows::Customers(customers) if args.json => {
            println!("{}", serde_json::to_string_pretty(&customers)?)
        }
        Rows::Customers(customers) => {
            for customer in &customers {
                println!("{}  {}", customer.id(), render_short(customer));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: QueryArgs,
    }

    #[test]
    fn test_flags_build_query() {
        let harness = Harness::parse_from([
            "query",
            "--first-name-like",
            "J%",
            "--min-orders",
            "1",
            "--order-by",
            "order-count",
            "--order-by",
            "last-name",
            "--desc",
            "--limit",
            "3",
        ]);
        let expected = CustomerQuery::new()
            .filter(Restriction::FirstNameLike("J%".to_string()))
            .filter(Restriction::OrderCountGreaterThan(1))
            .desc(SortField::OrderCount)
            .desc(SortField::LastName)
            .limit(3);
        assert_eq!(harness.args.to_query(), expected);
    }
}
