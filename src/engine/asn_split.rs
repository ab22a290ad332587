// ==========================================
// Logistica ASN - ASN unit splitting
// ==========================================
// Rows of SKUs with a logistic unit limit are split into
// rows of `limit` units plus one remainder row
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use crate::importer::text_cleaner::parse_number;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

pub const COL_SKU: &str = "SKU";
pub const COL_UNITS_TO_SHIP: &str = "Unidades a despachar";
pub const COL_REQUESTED: &str = "CantidadSolicitada";
pub const COL_LOGISTIC_UNITS: &str = "Unidades dimensión logística";
pub const COL_BULTOS: &str = "Bultos";

/// Upper bound on the rows a single ASN row may be split into.
pub const MAX_SPLIT_ROWS: i64 = 10_000;

/// SKU -> maximum units per ASN row.
pub type SplitRules = BTreeMap<String, i64>;

/// Rules applied when nothing is configured.
pub fn default_split_rules() -> SplitRules {
    let mut rules = SplitRules::new();
    rules.insert("3650138".to_string(), 2);
    rules.insert("7641117".to_string(), 8);
    rules
}

/// Splits a quantity into chunks of `limit` plus a remainder.
///
/// Quantities up to the limit, and non-positive limits, stay as one chunk.
/// Returns `None` when the split would exceed `MAX_SPLIT_ROWS` chunks.
pub fn split_units(quantity: i64, limit: i64) -> Option<Vec<i64>> {
    if limit <= 0 || quantity <= limit {
        return Some(vec![quantity]);
    }
    let full = quantity / limit;
    let remainder = quantity % limit;
    if full + i64::from(remainder > 0) > MAX_SPLIT_ROWS {
        return None;
    }
    let mut chunks = vec![limit; full as usize];
    if remainder > 0 {
        chunks.push(remainder);
    }
    Some(chunks)
}

/// Limit configured for a SKU cell value ("3650138", "3650138.0", ...).
pub fn limit_for(rules: &SplitRules, sku: &str) -> Option<i64> {
    let key = sku.trim();
    let key = key.strip_suffix(".0").unwrap_or(key);
    rules.get(key).copied()
}

/// Splits the rows of an ASN sheet according to `rules`.
///
/// Rows whose SKU has a limit and whose `Unidades a despachar` exceeds it are
/// replaced by copies carrying `limit` units plus one remainder copy. Other rows
/// pass through. When the sheet has `CantidadSolicitada` and
/// `Unidades dimensión logística`, a `Bultos` column with their ratio is added.
///
/// A quantity outside the integer range, or one that would produce more than
/// `MAX_SPLIT_ROWS` rows, fails with the sheet row number.
#[instrument(skip(table, rules), fields(rows = table.len(), rules = rules.len()))]
pub fn split_asn_rows(table: &RawTable, rules: &SplitRules) -> ImportResult<RawTable> {
    table.require_columns(&[COL_SKU, COL_UNITS_TO_SHIP])?;

    let mut out = RawTable {
        headers: table.headers.clone(),
        rows: Vec::with_capacity(table.len()),
    };

    for (idx, row) in table.rows.iter().enumerate() {
        let sku = row.get(COL_SKU).map(String::as_str).unwrap_or("");
        let Some(limit) = limit_for(rules, sku) else {
            out.rows.push(row.clone());
            continue;
        };
        let raw_units = row.get(COL_UNITS_TO_SHIP).map(String::as_str).unwrap_or("");
        let sheet_row = idx + 2;
        let Some(units) = parse_number(raw_units).filter(|u| u.fract() == 0.0) else {
            warn!(row = sheet_row, value = %raw_units, "units to ship not a whole number, row kept");
            out.rows.push(row.clone());
            continue;
        };

        if units < i64::MIN as f64 || units >= i64::MAX as f64 {
            return Err(ImportError::TypeConversionError {
                row: sheet_row,
                field: COL_UNITS_TO_SHIP.to_string(),
                message: format!("'{}' fuera de rango", raw_units),
            });
        }
        let chunks = split_units(units as i64, limit).ok_or_else(|| {
            ImportError::TypeConversionError {
                row: sheet_row,
                field: COL_UNITS_TO_SHIP.to_string(),
                message: format!(
                    "'{}' con límite {} supera {} filas",
                    raw_units, limit, MAX_SPLIT_ROWS
                ),
            }
        })?;
        for chunk in chunks {
            let mut copy = row.clone();
            copy.insert(COL_UNITS_TO_SHIP.to_string(), chunk.to_string());
            out.rows.push(copy);
        }
    }

    if out.has_column(COL_REQUESTED) && out.has_column(COL_LOGISTIC_UNITS) {
        if !out.has_column(COL_BULTOS) {
            out.headers.push(COL_BULTOS.to_string());
        }
        for row in &mut out.rows {
            let requested = row.get(COL_REQUESTED).and_then(|v| parse_number(v));
            let per_package = row.get(COL_LOGISTIC_UNITS).and_then(|v| parse_number(v));
            let bultos = match (requested, per_package) {
                (Some(r), Some(p)) if p != 0.0 => (r / p).to_string(),
                _ => String::new(),
            };
            row.insert(COL_BULTOS.to_string(), bultos);
        }
    }

    info!(rows_in = table.len(), rows_out = out.len(), "ASN rows split");
    Ok(out)
}
