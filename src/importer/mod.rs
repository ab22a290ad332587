// ==========================================
// Logistica ASN - import layer
// ==========================================
// Responsibility: WMS / order extracts into typed rows
// Supported: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod text_cleaner;
pub mod wms_mapper;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawTable, UniversalFileParser};
pub use wms_mapper::{lines_per_lpn, map_wms_lines, WMS_REQUIRED_COLUMNS};
