use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use stockroom_core::{ItemId, Money};
use stockroom_inventory::{Category, Subcategory};

#[derive(Debug, Parser)]
#[command(name = "stockroom")]
#[command(about = "Office warehouse: receipts, issues and department reports")]
pub struct Cli {
    /// Shared passphrase; every command is gated on it.
    #[arg(long, global = true, default_value = "")]
    pub passphrase: String,
    /// Snapshot directory (overrides STOCKROOM_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Print results as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the passphrase only.
    Login,
    /// List catalog items.
    Items {
        /// Only items with stock on hand.
        #[arg(long, default_value_t = false)]
        available: bool,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Receive a new item.
    Receive(ReceiveArgs),
    /// Replace fields of an existing item.
    Edit(EditArgs),
    Delete {
        id: ItemId,
    },
    /// Issue stock to an employee.
    Issue(IssueArgs),
    /// List issue records in ledger order.
    History,
    Departments {
        #[command(subcommand)]
        command: DepartmentCommand,
    },
    /// Department usage for one month (defaults to the current one).
    Report {
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        /// Drill down into a single department.
        #[arg(long)]
        department: Option<String>,
    },
    /// Write a JSON export of everything into a directory.
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete every item and record and restore default departments.
    Clear {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ReceiveArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub subcategory: Subcategory,
    #[arg(long)]
    pub quantity: u32,
    /// Unit price, e.g. `2500` or `12.50`.
    #[arg(long)]
    pub price: Money,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: ItemId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub subcategory: Option<Subcategory>,
    #[arg(long)]
    pub quantity: Option<u32>,
    #[arg(long)]
    pub price: Option<Money>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct IssueArgs {
    #[arg(long)]
    pub item: ItemId,
    #[arg(long)]
    pub quantity: u32,
    #[arg(long)]
    pub recipient: String,
    #[arg(long)]
    pub department: String,
    /// Issue date (defaults to today).
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    List,
    Add { name: String },
    Remove { name: String },
}
