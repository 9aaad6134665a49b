//! Catalog views derived from the workbook sheets

pub mod fields;
pub mod service;
pub mod stress;

pub use fields::{ColumnPartition, HEADER_FIELDS};
pub use service::{CatalogService, MetaDocument, StressDocument};
pub use stress::{CATALOG_COLUMNS, StressIndex, StressRecord, stress_names};
