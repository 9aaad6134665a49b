//! Errors raised while reading the workbook

use std::path::PathBuf;

/// Failure to produce a sheet table from the workbook on disk
#[derive(Debug)]
pub enum WorkbookError {
    /// The file is missing, unreadable, or not a spreadsheet calamine understands
    FileAccess { path: PathBuf, reason: String },
    /// The workbook opened but has no sheet with this name
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },
    /// A sheet lacks a column the caller depends on
    MissingColumn { sheet: String, column: String },
}

impl WorkbookError {
    /// Stable machine-readable code, used in API error payloads
    pub fn code(&self) -> &'static str {
        match self {
            WorkbookError::FileAccess { .. } => "workbook_unavailable",
            WorkbookError::SheetNotFound { .. } => "sheet_not_found",
            WorkbookError::MissingColumn { .. } => "missing_column",
        }
    }
}

impl std::fmt::Display for WorkbookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkbookError::FileAccess { path, reason } => {
                write!(f, "Failed to open workbook {}: {}", path.display(), reason)
            }
            WorkbookError::SheetNotFound {
                path,
                sheet,
                available,
            } => {
                write!(
                    f,
                    "Sheet '{}' not found in {} (available: {})",
                    sheet,
                    path.display(),
                    available.join(", ")
                )
            }
            WorkbookError::MissingColumn { sheet, column } => {
                write!(f, "Sheet '{}' has no '{}' column", sheet, column)
            }
        }
    }
}

impl std::error::Error for WorkbookError {}
