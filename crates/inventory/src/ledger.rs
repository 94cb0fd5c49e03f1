//! Append-only record of stock issued to employees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockroom_core::entity::{ids_unique, position_of};
use stockroom_core::{DomainError, DomainResult, Entity, IssueId, ItemId, Money};

use crate::catalog::Catalog;
use crate::departments::DepartmentRegistry;
use crate::item::Subcategory;

/// One withdrawal from the warehouse (immutable).
///
/// Item name, subcategory and unit price are copied at issue time so later
/// catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    id: IssueId,
    item_id: ItemId,
    item_name: String,
    subcategory: Subcategory,
    unit_price: Money,
    quantity: u32,
    total_price: Money,
    recipient: String,
    department: String,
    issued_on: NaiveDate,
}

impl IssueRecord {
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn subcategory(&self) -> Subcategory {
        self.subcategory
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }
}

impl Entity for IssueRecord {
    type Id = IssueId;

    fn id(&self) -> &IssueId {
        &self.id
    }
}

/// Issue form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub item_id: ItemId,
    pub quantity: u32,
    pub recipient: String,
    pub department: String,
}

/// Append-only list of issue records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<IssueRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a restored list (insertion order preserved).
    pub fn from_records(records: Vec<IssueRecord>) -> DomainResult<Self> {
        if !ids_unique(&records) {
            return Err(DomainError::validation("duplicate issue id in ledger"));
        }
        Ok(Self { records })
    }

    /// Records in insertion order. The iterator is `Clone`, so a consumer can
    /// restart it without touching the ledger again.
    pub fn records(&self) -> core::slice::Iter<'_, IssueRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &IssueId) -> Option<&IssueRecord> {
        position_of(&self.records, id).map(|i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Issue stock to a recipient.
    ///
    /// Either the catalog is decremented and a record is appended, or neither
    /// happens.
    pub fn record_issue(
        &mut self,
        catalog: &mut Catalog,
        departments: &DepartmentRegistry,
        request: IssueRequest,
        issued_on: NaiveDate,
    ) -> DomainResult<&IssueRecord> {
        if request.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let recipient = request.recipient.trim();
        if recipient.is_empty() {
            return Err(DomainError::validation("recipient cannot be empty"));
        }
        let department = request.department.trim();
        if department.is_empty() {
            return Err(DomainError::validation("department cannot be empty"));
        }
        if !departments.contains(department) {
            return Err(DomainError::not_found(format!("department {department}")));
        }

        let item = catalog
            .get(&request.item_id)
            .ok_or_else(|| DomainError::not_found(format!("item {}", request.item_id)))?;
        let total_price = item.unit_price().times(request.quantity)?;

        let record = IssueRecord {
            id: IssueId::generate(),
            item_id: request.item_id.clone(),
            item_name: item.name().to_string(),
            subcategory: item.subcategory(),
            unit_price: item.unit_price(),
            quantity: request.quantity,
            total_price,
            recipient: recipient.to_string(),
            department: department.to_string(),
            issued_on,
        };

        catalog.decrement_quantity(&request.item_id, request.quantity)?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }
}
