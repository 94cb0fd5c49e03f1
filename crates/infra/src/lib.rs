//! Infrastructure layer: snapshot persistence, the warehouse application
//! root, export, and configuration.

pub mod clock;
pub mod config;
pub mod export;
pub mod snapshot;
pub mod warehouse;

mod integration_tests;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::StockroomConfig;
pub use export::ExportDocument;
pub use snapshot::{FileSnapshotStore, InMemorySnapshotStore, PersistenceError, SnapshotStore};
pub use warehouse::Warehouse;
