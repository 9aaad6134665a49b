//! Read named sheets from the workbook into header-keyed rows
//!
//! The first row of a sheet names the columns. Every other non-blank row
//! becomes a [`WorkbookRow`]. The file is opened and parsed on every call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};

use super::cell::CellValue;
use super::error::WorkbookError;

/// One data row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookRow {
    cells: HashMap<String, CellValue>,
}

impl WorkbookRow {
    /// Cell for `column`, or the empty sentinel if the row has none
    pub fn get(&self, column: &str) -> CellValue {
        self.cells.get(column).cloned().unwrap_or_default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for WorkbookRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A parsed sheet: column names in sheet order plus the data rows
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<WorkbookRow>,
}

impl SheetTable {
    /// Fail with `MissingColumn` unless every name in `required` is a column
    pub fn require_columns(&self, required: &[&str]) -> Result<(), WorkbookError> {
        for column in required {
            if !self.columns.iter().any(|c| c == column) {
                return Err(WorkbookError::MissingColumn {
                    sheet: self.name.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Handle on the workbook file; holds only the path
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the workbook and parse `sheet`
    pub fn read_sheet(&self, sheet: &str) -> Result<SheetTable, WorkbookError> {
        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| WorkbookError::FileAccess {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let available = workbook.sheet_names();
        if !available.iter().any(|name| name == sheet) {
            return Err(WorkbookError::SheetNotFound {
                path: self.path.clone(),
                sheet: sheet.to_string(),
                available,
            });
        }

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| WorkbookError::FileAccess {
                path: self.path.clone(),
                reason: format!("failed to read sheet '{}': {}", sheet, e),
            })?;

        // The range starts at the first used cell; leading blank columns still count
        let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
        let rows: Vec<&[Data]> = range.rows().collect();
        let table = table_from_rows(sheet, &rows, col_offset);
        log::debug!(
            "Read sheet '{}' from {}: {} columns, {} rows",
            sheet,
            self.path.display(),
            table.columns.len(),
            table.rows.len()
        );
        Ok(table)
    }
}

/// Build a table from raw rows, treating the first row as the header
///
/// `col_offset` is the sheet column of the first cell in each row. The columns
/// before it are blank and named like any other blank header cell.
fn table_from_rows(sheet: &str, rows: &[&[Data]], col_offset: usize) -> SheetTable {
    let Some((header, body)) = rows.split_first() else {
        return SheetTable {
            name: sheet.to_string(),
            ..Default::default()
        };
    };

    let header: Vec<Data> = std::iter::repeat(Data::Empty)
        .take(col_offset)
        .chain(header.iter().cloned())
        .collect();
    let columns = column_names(&header);

    let rows = body
        .iter()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let value = idx
                        .checked_sub(col_offset)
                        .and_then(|idx| row.get(idx))
                        .map(CellValue::from)
                        .unwrap_or_default();
                    (column.clone(), value)
                })
                .collect::<WorkbookRow>()
        })
        .collect();

    SheetTable {
        name: sheet.to_string(),
        columns,
        rows,
    }
}

/// Name header cells: blanks become `Unnamed: <idx>`, repeats get `.1`, `.2`, ...
fn column_names(header: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, cell) in header.iter().enumerate() {
        let raw = CellValue::from(cell).as_text();
        let base = if raw.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw
        };

        let mut name = base.clone();
        while names.contains(&name) {
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_column_names_fill_blanks_and_dedupe() {
        let header = vec![
            text("id"),
            Data::Empty,
            text("QR"),
            text("QR"),
            text("QR"),
            Data::Float(7.0),
        ];
        assert_eq!(
            column_names(&header),
            vec!["id", "Unnamed: 1", "QR", "QR.1", "QR.2", "7"]
        );
    }

    #[test]
    fn test_table_fills_missing_cells_and_skips_blank_rows() {
        let header = vec![text("Stress"), text("Type"), text("Condition")];
        let first = vec![text("Thermal"), Data::Empty, Data::Float(85.0)];
        let blank = vec![Data::Empty, Data::Empty, Data::Empty];
        let short = vec![text("Humidity")];
        let rows: Vec<&[Data]> = vec![
            header.as_slice(),
            first.as_slice(),
            blank.as_slice(),
            short.as_slice(),
        ];

        let table = table_from_rows("Sheet1", &rows, 0);
        assert_eq!(table.columns, vec!["Stress", "Type", "Condition"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Type"), CellValue::empty());
        assert_eq!(table.rows[0].get("Condition"), CellValue::Int(85));
        assert_eq!(table.rows[1].get("Condition"), CellValue::empty());
        assert_eq!(table.rows[1].get("NoSuchColumn"), CellValue::empty());
    }

    #[test]
    fn test_leading_blank_columns_are_unnamed() {
        let header = vec![text("id"), text("QR")];
        let first = vec![Data::Float(1.0), text("QR-1")];
        let rows: Vec<&[Data]> = vec![header.as_slice(), first.as_slice()];

        let table = table_from_rows("Sheet2", &rows, 2);
        assert_eq!(table.columns, vec!["Unnamed: 0", "Unnamed: 1", "id", "QR"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].len(), 4);
        assert_eq!(table.rows[0].get("Unnamed: 0"), CellValue::empty());
        assert_eq!(table.rows[0].get("id"), CellValue::Int(1));
        assert_eq!(table.rows[0].get("QR"), CellValue::Text("QR-1".into()));
    }

    #[test]
    fn test_empty_sheet_has_no_columns() {
        let table = table_from_rows("Sheet2", &[], 0);
        assert_eq!(table.name, "Sheet2");
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_require_columns() {
        let table = SheetTable {
            name: "Sheet1".into(),
            columns: vec!["Stress".into(), "Type".into()],
            rows: Vec::new(),
        };
        assert!(table.require_columns(&["Stress"]).is_ok());
        let err = table.require_columns(&["Stress", "Operation"]).unwrap_err();
        assert!(matches!(
            err,
            WorkbookError::MissingColumn { ref column, .. } if column == "Operation"
        ));
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let source = WorkbookSource::new("/definitely/not/here/QR_V2.xlsx");
        let err = source.read_sheet("Sheet1").unwrap_err();
        assert_eq!(err.code(), "workbook_unavailable");
    }
}
