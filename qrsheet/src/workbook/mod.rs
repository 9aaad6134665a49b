//! Workbook access: open the spreadsheet and turn sheets into rows

pub mod cell;
pub mod error;
pub mod reader;

pub use cell::CellValue;
pub use error::WorkbookError;
pub use reader::{SheetTable, WorkbookRow, WorkbookSource};
