//! Inventory domain module.
//!
//! This crate contains the warehouse business rules as plain in-memory state
//! (no IO, no storage): the item catalog, the append-only issue ledger, the
//! department registry and the report projection over the ledger.

pub mod catalog;
pub mod departments;
pub mod item;
pub mod ledger;
pub mod report;
pub mod seed;

pub use catalog::Catalog;
pub use departments::DepartmentRegistry;
pub use item::{Category, Item, ItemDraft, ItemPatch, StockLevel, Subcategory};
pub use ledger::{IssueRecord, IssueRequest, Ledger};
pub use report::{
    build_report, department_report, DepartmentReport, PeriodReport, ReportPeriod, ReportSummary,
};
pub use seed::{default_catalog, default_departments, DEFAULT_DEPARTMENTS};
