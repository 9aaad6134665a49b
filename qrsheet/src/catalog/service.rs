//! Documents served by the API, built fresh from the workbook on each call

use serde::Serialize;

use crate::config::SheetNames;
use crate::workbook::{WorkbookError, WorkbookSource};

use super::fields::ColumnPartition;
use super::stress::{StressIndex, StressRecord};

/// Body of `GET /api/meta`
#[derive(Debug, Clone, Serialize)]
pub struct MetaDocument {
    pub stresses: Vec<String>,
    pub sheet2: ColumnPartition,
}

/// Body of `GET /api/stress/{name}`
#[derive(Debug, Clone, Serialize)]
pub struct StressDocument {
    pub stress: String,
    pub sheet1_rows: Vec<StressRecord>,
}

/// Reads the catalog and field sheets on demand; holds no workbook data
#[derive(Debug, Clone)]
pub struct CatalogService {
    source: WorkbookSource,
    sheets: SheetNames,
}

impl CatalogService {
    pub fn new(source: WorkbookSource, sheets: SheetNames) -> Self {
        Self { source, sheets }
    }

    pub fn source(&self) -> &WorkbookSource {
        &self.source
    }

    pub fn stress_index(&self) -> Result<StressIndex, WorkbookError> {
        let sheet = self.source.read_sheet(&self.sheets.catalog)?;
        StressIndex::from_sheet(&sheet)
    }

    pub fn column_partition(&self) -> Result<ColumnPartition, WorkbookError> {
        let sheet = self.source.read_sheet(&self.sheets.fields)?;
        Ok(ColumnPartition::from_columns(&sheet.columns))
    }

    pub fn meta(&self) -> Result<MetaDocument, WorkbookError> {
        let index = self.stress_index()?;
        let sheet2 = self.column_partition()?;
        Ok(MetaDocument {
            stresses: index.names().to_vec(),
            sheet2,
        })
    }

    /// Rows for `name`, matched exactly; unknown names give no rows
    pub fn stress(&self, name: &str) -> Result<StressDocument, WorkbookError> {
        let index = self.stress_index()?;
        Ok(StressDocument {
            stress: name.to_string(),
            sheet1_rows: index.lookup(name).to_vec(),
        })
    }
}
