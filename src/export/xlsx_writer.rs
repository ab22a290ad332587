// ==========================================
// Logistica ASN - xlsx writer
// ==========================================
// Sheet tables (header row + typed cells) -> .xlsx
// Template mode: keep the existing header order, replace data rows
// ==========================================

use crate::export::error::{ExportError, ExportResult};
use calamine::{open_workbook_auto, Reader};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

// ==========================================
// CellValue / SheetTable
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Text cell, or an empty cell for `None`.
    pub fn opt_text(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Empty)
    }

    /// Number cell, or an empty cell for `None`.
    pub fn opt_number(value: Option<f64>) -> Self {
        value.map(CellValue::Number).unwrap_or(CellValue::Empty)
    }

    /// Number when the text parses as one, text otherwise.
    pub fn infer(value: &str) -> Self {
        if value.is_empty() {
            return CellValue::Empty;
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn new<S: Into<String>>(name: S, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Same data re-laid under `headers`: matching columns are copied,
    /// columns unknown to this table stay empty, extra columns are dropped.
    pub fn reorder(&self, name: &str, headers: &[String]) -> SheetTable {
        let mapping: Vec<Option<usize>> = headers.iter().map(|h| self.column_index(h)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                mapping
                    .iter()
                    .map(|src| {
                        src.and_then(|i| row.get(i).cloned())
                            .unwrap_or(CellValue::Empty)
                    })
                    .collect()
            })
            .collect();
        SheetTable {
            name: name.to_string(),
            headers: headers.to_vec(),
            rows,
        }
    }
}

fn write_error(path: &Path, err: XlsxError) -> ExportError {
    ExportError::XlsxWrite {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Writes the sheets, in order, to a new workbook at `path`.
///
/// Parent directories are created. An existing file is overwritten.
#[instrument(skip(sheets), fields(path = %path.display(), sheets = sheets.len()))]
pub fn write_workbook(path: &Path, sheets: &[SheetTable]) -> ExportResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).map_err(|e| write_error(path, e))?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, header)
                .map_err(|e| write_error(path, e))?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let row_num = (r + 1) as u32;
            for (c, cell) in row.iter().enumerate() {
                let col = c as u16;
                let written = match cell {
                    CellValue::Text(s) => worksheet.write_string(row_num, col, s).map(|_| ()),
                    CellValue::Number(n) => worksheet.write_number(row_num, col, *n).map(|_| ()),
                    CellValue::Integer(n) => worksheet.write_number(row_num, col, *n as f64).map(|_| ()),
                    CellValue::Empty => Ok(()),
                };
                written.map_err(|e| write_error(path, e))?;
            }
        }
        debug!(sheet = %sheet.name, rows = sheet.len(), "sheet written");
    }

    workbook.save(path).map_err(|e| write_error(path, e))
}

/// Sheet name and header row of the first sheet of an existing workbook.
pub fn read_template_headers(path: &Path) -> ExportResult<(String, Vec<String>)> {
    let template_error = |message: String| ExportError::Template {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| template_error(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| template_error("sin hojas".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| template_error(e.to_string()))?;

    let headers: Vec<String> = range
        .rows()
        .next()
        .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(template_error("fila de encabezados vacía".to_string()));
    }
    Ok((sheet_name, headers))
}

/// Writes `table` into the workbook at `path`, using it as a template.
///
/// The template's first sheet name and header order are kept and its data
/// rows replaced. Cell formatting of the template is not preserved.
#[instrument(skip(table), fields(path = %path.display(), rows = table.len()))]
pub fn write_with_template(path: &Path, table: &SheetTable) -> ExportResult<()> {
    let (sheet_name, headers) = read_template_headers(path)?;
    let laid_out = table.reorder(&sheet_name, &headers);
    write_workbook(path, &[laid_out])
}
