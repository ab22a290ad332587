// ==========================================
// Logistica ASN - export layer
// ==========================================
// Output workbooks (.xlsx) for carriers and client import templates
// ==========================================

pub mod error;
pub mod sheets;
pub mod xlsx_writer;

pub use error::{ExportError, ExportResult};
pub use xlsx_writer::{read_template_headers, write_with_template, write_workbook, CellValue, SheetTable};
