//! File-backed adapters: spreadsheet workbooks in, CSV result log out.

mod result_log;
mod workbook;

pub use result_log::CsvResultLog;
pub use workbook::WorkbookSource;
