//! Sheet2 column classification
//!
//! Sheet2 mixes a fixed set of record-identity columns with free-form data
//! columns. The identity set is static; the data columns are whatever else the
//! sheet carries.

use serde::Serialize;

/// Record-identity columns, in display order
pub const HEADER_FIELDS: [&str; 6] = [
    "id",
    "Status_Up date_Time",
    "Project Family",
    "Product",
    "Version",
    "QR",
];

pub fn is_header_field(column: &str) -> bool {
    HEADER_FIELDS.contains(&column)
}

/// Sheet2 columns split into header and other fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPartition {
    /// Always the full [`HEADER_FIELDS`] list, present in the sheet or not
    pub header_fields: Vec<String>,
    /// Non-header columns in sheet order
    pub other_fields: Vec<String>,
    /// Every column in sheet order
    pub all_fields: Vec<String>,
}

impl ColumnPartition {
    pub fn from_columns(columns: &[String]) -> Self {
        Self {
            header_fields: HEADER_FIELDS.iter().map(|f| f.to_string()).collect(),
            other_fields: columns
                .iter()
                .filter(|c| !is_header_field(c))
                .cloned()
                .collect(),
            all_fields: columns.to_vec(),
        }
    }

    /// Declared header fields the sheet does not actually contain
    pub fn missing_header_fields(&self) -> Vec<&str> {
        self.header_fields
            .iter()
            .filter(|f| !self.all_fields.contains(f))
            .map(String::as_str)
            .collect()
    }
}
