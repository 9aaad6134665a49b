//! Stress catalog built from Sheet1
//!
//! Two views over the same rows:
//! - [`stress_names`]: distinct, non-blank Stress values, sorted
//! - [`StressIndex`]: rows grouped by their exact Stress value
//!
//! Blankness is tested on the trimmed value, but names and grouping keys stay
//! untrimmed, so `" Thermal "` and `"Thermal"` are two different stresses.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::workbook::{CellValue, SheetTable, WorkbookError, WorkbookRow};

pub const STRESS_COLUMN: &str = "Stress";
pub const TYPE_COLUMN: &str = "Type";
pub const OPERATION_COLUMN: &str = "Operation";
pub const CONDITION_COLUMN: &str = "Condition";

/// Columns a catalog sheet must carry
pub const CATALOG_COLUMNS: [&str; 4] =
    [STRESS_COLUMN, TYPE_COLUMN, OPERATION_COLUMN, CONDITION_COLUMN];

/// A catalog row projected onto the four catalog columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressRecord {
    #[serde(rename = "Stress")]
    pub stress: CellValue,
    #[serde(rename = "Type")]
    pub kind: CellValue,
    #[serde(rename = "Operation")]
    pub operation: CellValue,
    #[serde(rename = "Condition")]
    pub condition: CellValue,
}

impl From<&WorkbookRow> for StressRecord {
    fn from(row: &WorkbookRow) -> Self {
        Self {
            stress: row.get(STRESS_COLUMN),
            kind: row.get(TYPE_COLUMN),
            operation: row.get(OPERATION_COLUMN),
            condition: row.get(CONDITION_COLUMN),
        }
    }
}

fn stress_key(row: &WorkbookRow) -> String {
    row.get(STRESS_COLUMN).as_text()
}

/// Distinct Stress values that are not blank after trimming, in code point order
pub fn stress_names(rows: &[WorkbookRow]) -> Vec<String> {
    rows.iter()
        .map(stress_key)
        .filter(|name| !name.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Catalog rows grouped by exact Stress value
#[derive(Debug, Clone, Default)]
pub struct StressIndex {
    names: Vec<String>,
    buckets: HashMap<String, Vec<StressRecord>>,
}

impl StressIndex {
    /// Index `rows`; keys are exactly the values [`stress_names`] returns
    pub fn build(rows: &[WorkbookRow]) -> Self {
        let names = stress_names(rows);
        let mut buckets: HashMap<String, Vec<StressRecord>> =
            names.iter().map(|n| (n.clone(), Vec::new())).collect();

        for row in rows {
            if let Some(bucket) = buckets.get_mut(&stress_key(row)) {
                bucket.push(StressRecord::from(row));
            }
        }

        Self { names, buckets }
    }

    /// Index a catalog sheet, checking the catalog columns are present
    pub fn from_sheet(sheet: &SheetTable) -> Result<Self, WorkbookError> {
        sheet.require_columns(&CATALOG_COLUMNS)?;
        Ok(Self::build(&sheet.rows))
    }

    /// Sorted stress names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Rows for `name`; empty when the name is unknown
    pub fn lookup(&self, name: &str) -> &[StressRecord] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
