// ==========================================
// Logistica ASN - WMS extract mapping
// ==========================================
// Raw rows -> WmsLine (LPN, CodItem, NomItem, Unidades)
// A missing column aborts the run; bad numbers report the sheet row
// ==========================================

use crate::domain::order::WmsLine;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use crate::importer::text_cleaner::{code_key, normalize_null, parse_integer};
use tracing::{debug, instrument};

pub const COL_LPN: &str = "LPN";
pub const COL_COD_ITEM: &str = "CodItem";
pub const COL_NOM_ITEM: &str = "NomItem";
pub const COL_UNITS: &str = "Unidades";

/// Columns the packing processes read from the WMS extract.
pub const WMS_REQUIRED_COLUMNS: [&str; 4] = [COL_LPN, COL_COD_ITEM, COL_NOM_ITEM, COL_UNITS];

/// Maps every row of the extract to a `WmsLine`.
///
/// Row numbers in errors are sheet rows (header = row 1).
#[instrument(skip(table), fields(rows = table.len()))]
pub fn map_wms_lines(table: &RawTable) -> ImportResult<Vec<WmsLine>> {
    table.require_columns(&WMS_REQUIRED_COLUMNS)?;

    let mut lines = Vec::with_capacity(table.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let sheet_row = idx + 2;
        let get = |col: &str| row.get(col).map(String::as_str);

        let lpn = normalize_null(get(COL_LPN)).ok_or_else(|| ImportError::TypeConversionError {
            row: sheet_row,
            field: COL_LPN.to_string(),
            message: "LPN vacío".to_string(),
        })?;
        let cod_item = normalize_null(get(COL_COD_ITEM))
            .map(|c| code_key(&c))
            .ok_or_else(|| ImportError::TypeConversionError {
                row: sheet_row,
                field: COL_COD_ITEM.to_string(),
                message: "CodItem vacío".to_string(),
            })?;
        let raw_units = get(COL_UNITS).unwrap_or("");
        let units = parse_integer(raw_units).ok_or_else(|| ImportError::TypeConversionError {
            row: sheet_row,
            field: COL_UNITS.to_string(),
            message: format!("'{}' no es un entero", raw_units),
        })?;

        lines.push(WmsLine {
            lpn,
            cod_item,
            nom_item: normalize_null(get(COL_NOM_ITEM)).unwrap_or_default(),
            units,
        });
    }

    debug!(lines = lines.len(), "WMS lines mapped");
    Ok(lines)
}

/// Number of lines per LPN, in first-seen LPN order.
pub fn lines_per_lpn(lines: &[WmsLine]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for line in lines {
        match counts.iter_mut().find(|(lpn, _)| *lpn == line.lpn) {
            Some((_, n)) => *n += 1,
            None => counts.push((line.lpn.clone(), 1)),
        }
    }
    counts
}
