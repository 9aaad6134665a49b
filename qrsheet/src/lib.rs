//! Read/write API over the QR stress catalog workbook
//!
//! Sheet1 holds the stress catalog, Sheet2 the per-record header and data
//! columns. The workbook is re-read on every request.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod workbook;

pub use api::{AppState, build_router, serve};
pub use config::Config;
