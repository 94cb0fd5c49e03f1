//! Snapshot persistence: JSON blobs stored by key.
//!
//! Durability is advisory. The in-memory state owned by
//! [`crate::warehouse::Warehouse`] stays authoritative for the session; a
//! failed write is logged, never rolled back.

pub mod file;
pub mod store;

pub use file::FileSnapshotStore;
pub use store::{InMemorySnapshotStore, PersistenceError, SnapshotStore};

/// Key of the catalog item list.
pub const CATALOG_KEY: &str = "stockroom.catalog";
/// Key of the issue record list.
pub const LEDGER_KEY: &str = "stockroom.ledger";
/// Key of the department name list.
pub const DEPARTMENTS_KEY: &str = "stockroom.departments";
