//! Integration tests for the full warehouse pipeline.
//!
//! Tests: user action → Warehouse → Catalog/Ledger/Registry → snapshot store
//! → reopen, and the report projection on top.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, NaiveDate};

    use stockroom_core::{DomainError, Entity, ItemId, Money};
    use stockroom_inventory::{
        IssueRecord, IssueRequest, ItemDraft, ItemPatch, ReportPeriod, Subcategory,
    };

    use crate::snapshot::{
        FileSnapshotStore, InMemorySnapshotStore, PersistenceError, SnapshotStore,
    };
    use crate::clock::{Clock, FixedClock};
    use crate::warehouse::Warehouse;

    /// Store whose writes always fail; counts attempts.
    #[derive(Default)]
    struct BrokenStore {
        attempts: AtomicUsize,
    }

    impl SnapshotStore for BrokenStore {
        fn load_snapshot(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Ok(None)
        }

        fn save_snapshot(&self, key: &str, _blob: &str) -> Result<(), PersistenceError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(PersistenceError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn issue(item_id: &ItemId, quantity: u32, department: &str) -> IssueRequest {
        IssueRequest {
            item_id: item_id.clone(),
            quantity,
            recipient: "Иванов И.И.".to_string(),
            department: department.to_string(),
        }
    }

    fn receive_cartridges<S: SnapshotStore, C: Clock>(warehouse: &mut Warehouse<S, C>) -> ItemId {
        warehouse
            .add_item(ItemDraft {
                name: "Картридж A".to_string(),
                subcategory: Some(Subcategory::Printing),
                quantity: 12,
                unit_price: Money::from_major(2500),
                description: None,
            })
            .unwrap()
            .id()
            .clone()
    }

    #[test]
    fn issue_and_overdraw_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut warehouse = Warehouse::open(FileSnapshotStore::new(dir.path()));
        let a = receive_cartridges(&mut warehouse);

        let record = warehouse.issue_on(issue(&a, 5, "IT отдел"), date(2025, 3, 4)).unwrap();
        assert_eq!(record.total_price(), Money::from_major(12_500));

        let err = warehouse.issue_on(issue(&a, 10, "IT отдел"), date(2025, 3, 5)).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert_eq!(warehouse.catalog().get(&a).unwrap().quantity(), 7);
        assert_eq!(warehouse.ledger().len(), 1);

        let reopened = Warehouse::open(FileSnapshotStore::new(dir.path()));
        assert_eq!(reopened.catalog(), warehouse.catalog());
        assert_eq!(reopened.ledger(), warehouse.ledger());
        assert_eq!(reopened.departments(), warehouse.departments());
    }

    #[test]
    fn removed_department_stays_in_history() {
        let store = Arc::new(InMemorySnapshotStore::new());
        let mut warehouse = Warehouse::open(store.clone());
        let a = receive_cartridges(&mut warehouse);

        warehouse.add_department("Logistics").unwrap();
        warehouse.issue_on(issue(&a, 1, "Logistics"), date(2025, 8, 1)).unwrap();
        warehouse.remove_department("Logistics").unwrap();

        assert!(!warehouse.departments().contains("Logistics"));
        let err = warehouse.issue_on(issue(&a, 1, "Logistics"), date(2025, 8, 2)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let reopened = Warehouse::open(store);
        let record: &IssueRecord = reopened.ledger().records().next().unwrap();
        assert_eq!(record.department(), "Logistics");
        let report = reopened.report(ReportPeriod::new(8, 2025).unwrap());
        assert!(report.department("Logistics").is_some());
    }

    #[test]
    fn last_department_cannot_be_removed() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        let names = warehouse.departments().names().to_vec();
        let (last, rest) = names.split_last().unwrap();
        for name in rest {
            warehouse.remove_department(name).unwrap();
        }

        let err = warehouse.remove_department(last).unwrap_err();
        assert!(matches!(err, DomainError::LastDepartment(_)));
        assert_eq!(warehouse.departments().len(), 1);
    }

    #[test]
    fn month_reports_are_disjoint() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        let a = receive_cartridges(&mut warehouse);
        let paper: ItemId = "3".parse().unwrap();

        warehouse.issue_on(issue(&a, 1, "IT отдел"), date(2025, 10, 3)).unwrap();
        warehouse.issue_on(issue(&paper, 20, "Бухгалтерия"), date(2025, 10, 20)).unwrap();
        warehouse.issue_on(issue(&a, 2, "IT отдел"), date(2025, 11, 1)).unwrap();

        let october = warehouse.report(ReportPeriod::new(10, 2025).unwrap());
        let november = warehouse.report(ReportPeriod::new(11, 2025).unwrap());

        assert_eq!(october.summary.operation_count, 2);
        assert_eq!(october.summary.department_count, 2);
        assert_eq!(october.summary.total_value, Money::from_major(2500 + 20 * 350));
        assert_eq!(november.summary.operation_count, 1);
        assert_eq!(november.summary.total_value, Money::from_major(5000));
        assert_eq!(warehouse.report(october.period), october);

        let drill = warehouse.department_report(october.period, "IT отдел");
        assert_eq!(drill.total_units, 1);
    }

    #[test]
    fn edit_after_issue_keeps_historical_totals() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        let a = receive_cartridges(&mut warehouse);
        let record = warehouse.issue_on(issue(&a, 4, "IT отдел"), date(2025, 1, 9)).unwrap();

        let mut patch = ItemPatch::from_item(warehouse.catalog().get(&a).unwrap());
        patch.unit_price = Money::from_major(1);
        patch.quantity = 100;
        warehouse.edit_item(&a, patch).unwrap();

        let stored = warehouse.ledger().get(record.id()).unwrap();
        assert_eq!(stored.total_price(), Money::from_major(10_000));
        assert_eq!(warehouse.catalog().get(&a).unwrap().quantity(), 100);
    }

    #[test]
    fn failed_snapshot_writes_keep_in_memory_state() {
        let store = Arc::new(BrokenStore::default());
        let mut warehouse = Warehouse::open(store.clone());
        let a = receive_cartridges(&mut warehouse);

        warehouse.issue_on(issue(&a, 2, "IT отдел"), date(2025, 2, 2)).unwrap();
        warehouse.add_department("Logistics").unwrap();

        assert_eq!(warehouse.catalog().get(&a).unwrap().quantity(), 10);
        assert_eq!(warehouse.ledger().len(), 1);
        assert!(warehouse.departments().contains("Logistics"));
        // receipt: 1 write, issue: 2 writes, department: 1 write
        assert_eq!(store.attempts.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn export_reflects_current_state() {
        let mut warehouse = Warehouse::open(InMemorySnapshotStore::new());
        warehouse.issue_on(issue(&"1".parse().unwrap(), 1, "IT отдел"), date(2025, 5, 5)).unwrap();

        let doc = warehouse.export();
        assert_eq!(doc.catalog.len(), 5);
        assert_eq!(doc.ledger.len(), 1);
        assert_eq!(doc.departments, warehouse.departments().names());
        assert!(doc.file_name().starts_with("stockroom-export-"));
    }

    #[test]
    fn issue_after_local_midnight_lands_in_the_new_month() {
        let clock = FixedClock(DateTime::parse_from_rfc3339("2025-11-01T01:00:00+03:00").unwrap());
        let mut warehouse = Warehouse::open_with_clock(InMemorySnapshotStore::new(), clock);
        let a = receive_cartridges(&mut warehouse);

        let record = warehouse.issue(issue(&a, 1, "IT отдел")).unwrap();
        assert_eq!(record.issued_on(), date(2025, 11, 1));
        assert_eq!(warehouse.today(), date(2025, 11, 1));

        let november = warehouse.report(ReportPeriod::new(11, 2025).unwrap());
        let october = warehouse.report(ReportPeriod::new(10, 2025).unwrap());
        assert_eq!(november.summary.operation_count, 1);
        assert_eq!(october.summary.operation_count, 0);
        assert_eq!(warehouse.export().exported_at.to_rfc3339(), "2025-10-31T22:00:00+00:00");
    }
}
