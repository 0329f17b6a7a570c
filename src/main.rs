//! # Visitors CLI
//!
//! Runs individual visitor operations against the configured store.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin visitors -- init
//! cargo run --bin visitors -- add "John Doe" 30 04/12/2024 10:30 "Jane Smith" --comments "Docker talk"
//! cargo run --bin visitors -- list
//! cargo run --bin visitors -- update 1 time_of_visit '"11:15"'
//! cargo run --bin visitors -- delete-all
//! ```
//!
//! The memory backend starts empty on every invocation, so the CLI is mostly
//! useful with `database.backend = "postgres"`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use visitor_registry::logging::init_tracing;
use visitor_registry::{store, Config, NewVisitor, Row, VisitorService};

#[derive(Debug, Parser)]
#[command(name = "visitors", version, about = "Manage the visitor log")]
struct Cli {
    /// Configuration file (defaults to config.toml + config.local.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the visitors table if it does not exist
    Init,
    /// Record a new visitor
    Add {
        full_name: String,
        visitor_age: i64,
        date_of_visit: String,
        time_of_visit: String,
        assistant_name: String,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// List id and name of every visitor
    List,
    /// Show one visitor
    View { id: i64 },
    /// Change one column; the value is JSON (quote strings)
    Update {
        id: i64,
        column: String,
        value: String,
    },
    /// Delete one visitor
    Delete { id: i64 },
    /// Delete every visitor
    DeleteAll,
    /// Print the id of the most recent visitor
    Last,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {path}"))?,
        None => Config::load().context("loading config.toml / config.local.toml")?,
    };
    init_tracing(&config.logging);

    let executor = store::connect(&config.database)
        .await
        .context("connecting to the visitor store")?;
    let service = VisitorService::new(executor);

    if config.database.create_table_on_start && !matches!(cli.command, Command::Init) {
        service.create_table().await?;
    }

    match cli.command {
        Command::Init => println!("{}", service.create_table().await?),
        Command::Add {
            full_name,
            visitor_age,
            date_of_visit,
            time_of_visit,
            assistant_name,
            comments,
        } => {
            let visitor = NewVisitor {
                full_name,
                visitor_age,
                date_of_visit,
                time_of_visit,
                assistant_name,
                comments,
            };
            println!("{}", service.add_visitor(&visitor).await?);
        }
        Command::List => print_rows(&service.list_visitors().await?)?,
        Command::View { id } => print_rows(&service.view_visitor(id).await?)?,
        Command::Update { id, column, value } => {
            // Bare words are taken as strings so `update 1 full_name "Ann Lee"` works.
            let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            println!("{}", service.update_visitor(id, &column, &value).await?);
        }
        Command::Delete { id } => println!("{}", service.delete_visitor(id).await?),
        Command::DeleteAll => println!("{}", service.delete_all_visitors().await?),
        Command::Last => println!("{}", service.view_last_visitor().await?),
    }

    Ok(())
}

fn print_rows(rows: &[Row]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}
