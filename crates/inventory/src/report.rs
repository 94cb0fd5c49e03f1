//! Department usage reports.
//!
//! A pure projection over ledger records: nothing here is stored, every report
//! is recomputed from the records passed in.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Money};

use crate::item::Subcategory;
use crate::ledger::IssueRecord;

/// Calendar month used to filter records by issue date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    month: u32,
    year: i32,
}

impl ReportPeriod {
    pub fn new(month: u32, year: i32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!("month out of range: {month}")));
        }
        Ok(Self { month, year })
    }

    /// Period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl core::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Usage of one department within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentReport {
    pub department: String,
    pub total_value: Money,
    pub total_units: u64,
    /// Distinct subcategories, in order of first appearance.
    pub subcategories: Vec<Subcategory>,
    /// Contributing records in ledger order (drill-down).
    pub records: Vec<IssueRecord>,
}

impl DepartmentReport {
    fn new(department: &str) -> Self {
        Self {
            department: department.to_string(),
            total_value: Money::ZERO,
            total_units: 0,
            subcategories: Vec::new(),
            records: Vec::new(),
        }
    }

    fn push(&mut self, record: &IssueRecord) {
        self.total_value = self.total_value.saturating_add(record.total_price());
        self.total_units += u64::from(record.quantity());
        if !self.subcategories.contains(&record.subcategory()) {
            self.subcategories.push(record.subcategory());
        }
        self.records.push(record.clone());
    }

    pub fn operation_count(&self) -> usize {
        self.records.len()
    }
}

/// Totals over every record in the period, regardless of department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_value: Money,
    pub operation_count: usize,
    pub department_count: usize,
    pub total_units: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub period: ReportPeriod,
    /// Groups in order of first appearance in the ledger.
    pub departments: Vec<DepartmentReport>,
    pub summary: ReportSummary,
}

impl PeriodReport {
    pub fn department(&self, name: &str) -> Option<&DepartmentReport> {
        self.departments.iter().find(|d| d.department == name)
    }
}

/// Build the report for `period` from ledger records (in ledger order).
pub fn build_report<'a, I>(records: I, period: ReportPeriod) -> PeriodReport
where
    I: IntoIterator<Item = &'a IssueRecord>,
{
    let mut departments: Vec<DepartmentReport> = Vec::new();
    let mut summary = ReportSummary::default();

    for record in records.into_iter().filter(|r| period.contains(r.issued_on())) {
        summary.total_value = summary.total_value.saturating_add(record.total_price());
        summary.operation_count += 1;
        summary.total_units += u64::from(record.quantity());

        match departments
            .iter_mut()
            .find(|d| d.department == record.department())
        {
            Some(group) => group.push(record),
            None => {
                let mut group = DepartmentReport::new(record.department());
                group.push(record);
                departments.push(group);
            }
        }
    }
    summary.department_count = departments.len();

    PeriodReport {
        period,
        departments,
        summary,
    }
}

/// Drill-down for a single department; an empty group when it had no issues.
pub fn department_report<'a, I>(records: I, period: ReportPeriod, department: &str) -> DepartmentReport
where
    I: IntoIterator<Item = &'a IssueRecord>,
{
    let mut group = DepartmentReport::new(department);
    records
        .into_iter()
        .filter(|r| r.department() == department && period.contains(r.issued_on()))
        .for_each(|r| group.push(r));
    group
}
