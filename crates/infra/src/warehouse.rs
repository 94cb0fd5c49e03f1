//! Application root: owns the inventory state and snapshots it after every
//! mutation.

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockroom_core::{DomainResult, Entity, ItemId};
use stockroom_inventory::{
    build_report, default_catalog, default_departments, department_report, Catalog,
    DepartmentRegistry, DepartmentReport, IssueRecord, IssueRequest, Item, ItemDraft, ItemPatch,
    Ledger, PeriodReport, ReportPeriod,
};

use crate::clock::{Clock, LocalClock};
use crate::export::ExportDocument;
use crate::snapshot::{SnapshotStore, CATALOG_KEY, DEPARTMENTS_KEY, LEDGER_KEY};

/// Catalog, ledger and department registry for one session, plus the store
/// their snapshots go to.
#[derive(Debug)]
pub struct Warehouse<S, C = LocalClock> {
    catalog: Catalog,
    ledger: Ledger,
    departments: DepartmentRegistry,
    store: S,
    clock: C,
}

impl<S: SnapshotStore> Warehouse<S> {
    /// Restore state from `store`. Missing or unreadable snapshots fall back
    /// to the built-in defaults (empty ledger).
    pub fn open(store: S) -> Self {
        Self::open_with_clock(store, LocalClock)
    }
}

impl<S: SnapshotStore, C: Clock> Warehouse<S, C> {
    pub fn open_with_clock(store: S, clock: C) -> Self {
        let catalog = load_list::<Item, _>(&store, CATALOG_KEY)
            .and_then(|items| {
                Catalog::from_items(items)
                    .inspect_err(|err| tracing::warn!(key = CATALOG_KEY, %err, "snapshot rejected"))
                    .ok()
            })
            .unwrap_or_else(default_catalog);

        let ledger = load_list::<IssueRecord, _>(&store, LEDGER_KEY)
            .and_then(|records| {
                Ledger::from_records(records)
                    .inspect_err(|err| tracing::warn!(key = LEDGER_KEY, %err, "snapshot rejected"))
                    .ok()
            })
            .unwrap_or_default();

        let departments = load_list::<String, _>(&store, DEPARTMENTS_KEY)
            .and_then(|names| {
                DepartmentRegistry::new(names)
                    .inspect_err(|err| tracing::warn!(key = DEPARTMENTS_KEY, %err, "snapshot rejected"))
                    .ok()
            })
            .unwrap_or_else(default_departments);

        tracing::info!(
            items = catalog.len(),
            records = ledger.len(),
            departments = departments.len(),
            "warehouse opened"
        );

        Self {
            catalog,
            ledger,
            departments,
            store,
            clock,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn departments(&self) -> &DepartmentRegistry {
        &self.departments
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Local calendar date according to the warehouse clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Receipt: add a new item to the catalog.
    pub fn add_item(&mut self, draft: ItemDraft) -> DomainResult<Item> {
        let item = self.catalog.add_item(draft)?.clone();
        tracing::info!(item_id = %item.id(), item_name = item.name(), quantity = item.quantity(), "item received");
        self.persist_catalog();
        Ok(item)
    }

    pub fn edit_item(&mut self, id: &ItemId, patch: ItemPatch) -> DomainResult<Item> {
        let item = self.catalog.edit_item(id, patch)?.clone();
        tracing::info!(item_id = %id, "item edited");
        self.persist_catalog();
        Ok(item)
    }

    /// Remove an item. An unknown id is reported back and logged as skipped.
    pub fn delete_item(&mut self, id: &ItemId) -> DomainResult<Item> {
        match self.catalog.delete_item(id) {
            Ok(item) => {
                tracing::info!(item_id = %id, "item deleted");
                self.persist_catalog();
                Ok(item)
            }
            Err(err) => {
                tracing::info!(item_id = %id, "delete skipped: item not found");
                Err(err)
            }
        }
    }

    /// Issue stock, stamped with the clock's local date.
    pub fn issue(&mut self, request: IssueRequest) -> DomainResult<IssueRecord> {
        self.issue_on(request, self.clock.today())
    }

    pub fn issue_on(&mut self, request: IssueRequest, issued_on: NaiveDate) -> DomainResult<IssueRecord> {
        let record = self
            .ledger
            .record_issue(&mut self.catalog, &self.departments, request, issued_on)?
            .clone();
        tracing::info!(
            issue_id = %record.id(),
            item_id = %record.item_id(),
            quantity = record.quantity(),
            department = record.department(),
            "stock issued"
        );
        self.persist_catalog();
        self.persist_ledger();
        Ok(record)
    }

    pub fn add_department(&mut self, name: &str) -> DomainResult<String> {
        let added = self.departments.add(name)?.to_string();
        tracing::info!(department = %added, "department added");
        self.persist_departments();
        Ok(added)
    }

    /// Historical records keep the removed name.
    pub fn remove_department(&mut self, name: &str) -> DomainResult<String> {
        let removed = self.departments.remove(name)?;
        tracing::info!(department = %removed, "department removed");
        self.persist_departments();
        Ok(removed)
    }

    pub fn report(&self, period: ReportPeriod) -> PeriodReport {
        build_report(self.ledger.records(), period)
    }

    pub fn department_report(&self, period: ReportPeriod, department: &str) -> DepartmentReport {
        department_report(self.ledger.records(), period, department)
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            catalog: self.catalog.items().to_vec(),
            ledger: self.ledger.records().cloned().collect(),
            departments: self.departments.names().to_vec(),
            exported_at: self.clock.now_utc(),
        }
    }

    /// Drop every item and record and restore the default departments. The
    /// cleared state is saved, so it survives a reopen.
    pub fn clear(&mut self) {
        self.catalog = Catalog::new();
        self.ledger = Ledger::new();
        self.departments = default_departments();
        tracing::warn!("warehouse cleared");
        self.persist_catalog();
        self.persist_ledger();
        self.persist_departments();
    }

    fn persist_catalog(&self) {
        self.persist(CATALOG_KEY, self.catalog.items());
    }

    fn persist_ledger(&self) {
        let records: Vec<&IssueRecord> = self.ledger.records().collect();
        self.persist(LEDGER_KEY, &records);
    }

    fn persist_departments(&self) {
        self.persist(DEPARTMENTS_KEY, self.departments.names());
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let blob = match serde_json::to_string(value) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::error!(key, %err, "failed to serialize snapshot");
                return;
            }
        };
        if let Err(err) = self.store.save_snapshot(key, &blob) {
            tracing::error!(key, %err, "failed to save snapshot; in-memory state kept");
        }
    }
}

/// `None` when the key is absent, unreadable or malformed (with a warning for
/// the latter two).
fn load_list<T, S>(store: &S, key: &str) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    S: SnapshotStore,
{
    let blob = match store.load_snapshot(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, %err, "failed to load snapshot; using defaults");
            return None;
        }
    };

    match serde_json::from_str(&blob) {
        Ok(list) => Some(list),
        Err(err) => {
            tracing::warn!(key, %err, "malformed snapshot; using defaults");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::InMemorySnapshotStore;
    use stockroom_core::{DomainError, Money};
    use stockroom_inventory::Subcategory;

    fn request(item: &str, quantity: u32, department: &str) -> IssueRequest {
        IssueRequest {
            item_id: item.parse().unwrap(),
            quantity,
            recipient: "Сидоров".to_string(),
            department: department.to_string(),
        }
    }

    #[test]
    fn opens_with_defaults_when_store_is_empty() {
        let warehouse = Warehouse::open(InMemorySnapshotStore::new());
        assert_eq!(warehouse.catalog().len(), 5);
        assert!(warehouse.ledger().is_empty());
        assert!(warehouse.departments().contains("IT отдел"));
        assert!(warehouse.store().keys().is_empty());
    }

    #[test]
    fn malformed_blob_falls_back_to_defaults() {
        let store = InMemorySnapshotStore::new()
            .with_blob(CATALOG_KEY, "{not json")
            .with_blob(DEPARTMENTS_KEY, "[]")
            .with_blob(LEDGER_KEY, "[{\"id\": 1}]");
        let warehouse = Warehouse::open(store);

        assert_eq!(warehouse.catalog(), &default_catalog());
        assert_eq!(warehouse.departments(), &default_departments());
        assert!(warehouse.ledger().is_empty());
    }

    #[test]
    fn failed_issue_writes_nothing() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        let err = warehouse.issue(request("2", 13, "IT отдел")).unwrap_err();

        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert!(warehouse.store().keys().is_empty());
    }

    #[test]
    fn successful_mutations_snapshot_their_lists() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        warehouse.issue(request("2", 5, "IT отдел")).unwrap();
        assert_eq!(
            warehouse.store().keys(),
            vec![CATALOG_KEY.to_string(), LEDGER_KEY.to_string()]
        );

        warehouse.add_department("Logistics").unwrap();
        assert_eq!(warehouse.store().keys().len(), 3);
    }

    #[test]
    fn add_item_then_delete_twice() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        let item = warehouse
            .add_item(ItemDraft {
                name: "Набор отверток".to_string(),
                subcategory: Some(Subcategory::Tools),
                quantity: 4,
                unit_price: Money::from_major(1200),
                description: Some("  ".to_string()),
            })
            .unwrap();
        assert_eq!(item.description(), None);

        assert!(warehouse.delete_item(item.id()).is_ok());
        assert!(matches!(warehouse.delete_item(item.id()), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn clear_empties_catalog_and_ledger() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        warehouse.add_department("Logistics").unwrap();
        warehouse.issue(request("3", 10, "Logistics")).unwrap();

        warehouse.clear();
        assert!(warehouse.catalog().is_empty());
        assert!(warehouse.ledger().is_empty());
        assert!(!warehouse.departments().contains("Logistics"));

        let Warehouse { store, .. } = warehouse;
        let reopened = Warehouse::open(store);
        assert!(reopened.catalog().is_empty());
        assert_eq!(reopened.departments(), &default_departments());
    }
}
