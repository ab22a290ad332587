// ==========================================
// Logistica ASN - file parser implementations
// ==========================================
// Supported: Excel (.xlsx/.xls, first sheet) / CSV (.csv, UTF-8 or Latin-1)
// Output: header row + one map per non-blank data row
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::text_cleaner::decode_text;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

// ==========================================
// RawTable - parsed sheet
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// First required column that is missing, if any.
    pub fn first_missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required.iter().copied().find(|c| !self.has_column(c))
    }

    pub fn require_columns(&self, required: &[&str]) -> ImportResult<()> {
        match self.first_missing(required) {
            Some(col) => Err(ImportError::MissingColumn(col.to_string())),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// FileParser trait
// ==========================================
pub trait FileParser {
    /// Parses the file into a header row and raw row maps.
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn push_row(records: &mut Vec<HashMap<String, String>>, headers: &[String], values: Vec<String>) {
    let mut row_map = HashMap::new();
    for (col_idx, value) in values.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            if header.is_empty() {
                continue;
            }
            row_map.insert(header.clone(), value.trim().to_string());
        }
    }

    // skip fully blank rows
    if row_map.values().all(|v| v.is_empty()) {
        return;
    }
    records.push(row_map);
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    #[instrument(skip(self), fields(path = %file_path.display()))]
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let bytes = fs::read(file_path)?;
        let text = decode_text(&bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            push_row(
                &mut rows,
                &headers,
                record.iter().map(str::to_string).collect(),
            );
        }

        debug!(rows = rows.len(), columns = headers.len(), "CSV parsed");
        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel parser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    #[instrument(skip(self), fields(path = %file_path.display()))]
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        check_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Err(ImportError::ExcelParseError(
                "Excel sin hojas de cálculo".to_string(),
            ));
        };
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut raw_rows = range.rows();
        let header_row = raw_rows
            .next()
            .ok_or_else(|| ImportError::EmptyFile(file_path.display().to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in raw_rows {
            push_row(
                &mut rows,
                &headers,
                data_row.iter().map(|cell| cell.to_string()).collect(),
            );
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "Excel parsed");
        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Universal parser (by extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
