// ==========================================
// Logistica ASN - retail order import rows
// ==========================================
// Sodimac / Tottus purchase-order extract -> 26-column import rows
// Client data comes from client_db.json, NroOrdenSalida from the operator
// ==========================================

use crate::domain::catalog::ClientRecord;
use crate::domain::order::RetailOrderRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use crate::importer::text_cleaner::{
    code_key, normalize_null, parse_date_day_first, parse_number, repair_mojibake,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

pub const COL_ORDER_NUMBER: &str = "Número OC";
pub const COL_TAX_ID: &str = "Tax id proveedor";
pub const COL_BUSINESS_NAME: &str = "Razón social";
pub const COL_ISSUE_DATE: &str = "Fecha de emisión";
pub const COL_RECEPTION_END: &str = "Fecha fin recepción";
pub const COL_SKU: &str = "SKU";
pub const COL_UNITS_BOUGHT: &str = "Unidades compradas";

/// Optional column with the units per logistic package.
pub const COL_LOGISTIC_UNITS: &str = "Unidades dimensión logística";
pub const COL_BULTOS: &str = "Bultos";

pub const RETAIL_REQUIRED_COLUMNS: [&str; 7] = [
    COL_ORDER_NUMBER,
    COL_TAX_ID,
    COL_BUSINESS_NAME,
    COL_ISSUE_DATE,
    COL_RECEPTION_END,
    COL_SKU,
    COL_UNITS_BOUGHT,
];

/// Import sheet columns, in output order.
pub const RETAIL_OUTPUT_COLUMNS: [&str; 26] = [
    "NroReferencia",
    "NroOrdenCliente",
    "CodCliente",
    "Nombre Cliente",
    "CodSucursal",
    "NomSucursal",
    "FechaEmision",
    "FechaCompromiso",
    "Direccion",
    "Comuna",
    "Ciudad",
    "Region",
    "Pais",
    "Observacion",
    "Telefono",
    "Email",
    "TipoDespacho",
    "CodTipoFolio",
    "SKU Item",
    "CantidadSolicitada",
    "Umedida",
    "CrossDocking",
    "NroCrossDocking",
    "MontoTotal",
    "NumeroLote",
    "NroOrdenSalida",
];

// ==========================================
// DateStyle - how dates are written
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Writing into an existing import template: `YYYYMMDD`
    Template,
    /// Fresh workbook: `YYYY-MM-DD 00:00:00`
    Plain,
}

impl DateStyle {
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateStyle::Template => date.format("%Y%m%d").to_string(),
            DateStyle::Plain => date.format("%Y-%m-%d 00:00:00").to_string(),
        }
    }
}

// ==========================================
// RetailOrder - mapped rows + optional bultos data
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RetailOrder {
    pub rows: Vec<RetailOrderRow>,
    pub has_logistic_units: bool,
}

/// Total packages and units of an order with logistic units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetailTotals {
    pub bultos: f64,
    pub units: f64,
}

impl RetailOrder {
    /// Output columns: the fixed 26 plus the logistic-unit pair when present.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = RETAIL_OUTPUT_COLUMNS.to_vec();
        if self.has_logistic_units {
            columns.push(COL_LOGISTIC_UNITS);
            columns.push(COL_BULTOS);
        }
        columns
    }

    /// Bultos / units totals, `None` when the extract had no logistic units.
    pub fn totals(&self) -> Option<RetailTotals> {
        if !self.has_logistic_units {
            return None;
        }
        Some(RetailTotals {
            bultos: self.rows.iter().filter_map(|r| r.bultos).sum(),
            units: self.rows.iter().map(|r| r.cantidad_solicitada).sum(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn text(row: &HashMap<String, String>, col: &str) -> String {
    normalize_null(row.get(col).map(String::as_str))
        .map(|v| repair_mojibake(&v))
        .unwrap_or_default()
}

fn date(row: &HashMap<String, String>, col: &str) -> Option<NaiveDate> {
    row.get(col).and_then(|v| parse_date_day_first(v))
}

/// Maps a purchase-order extract to import rows for one client.
///
/// # Arguments
/// * `table` - parsed extract (first sheet / CSV)
/// * `client` - client_db.json record of the retailer
/// * `nro_orden_salida` - dispatch order number entered by the operator
///
/// # Returns
/// The rows in extract order; a missing required column aborts the mapping.
#[instrument(skip(table, client), fields(rows = table.len(), client = %client.nom_cliente))]
pub fn build_retail_order(
    table: &RawTable,
    client: &ClientRecord,
    nro_orden_salida: &str,
) -> ImportResult<RetailOrder> {
    table.require_columns(&RETAIL_REQUIRED_COLUMNS)?;

    let nro_referencia = table
        .rows
        .iter()
        .map(|row| text(row, COL_ORDER_NUMBER))
        .find(|v| !v.is_empty())
        .unwrap_or_default();
    let has_logistic_units = table.has_column(COL_LOGISTIC_UNITS);

    let mut rows = Vec::with_capacity(table.len());
    for (idx, raw) in table.rows.iter().enumerate() {
        let raw_units = raw.get(COL_UNITS_BOUGHT).map(String::as_str).unwrap_or("");
        let cantidad = parse_number(raw_units).ok_or_else(|| ImportError::TypeConversionError {
            row: idx + 2,
            field: COL_UNITS_BOUGHT.to_string(),
            message: format!("'{}' no es numérico", raw_units),
        })?;

        let logistic_units = if has_logistic_units {
            raw.get(COL_LOGISTIC_UNITS).and_then(|v| parse_number(v))
        } else {
            None
        };
        let bultos = logistic_units.filter(|u| *u != 0.0).map(|u| cantidad / u);

        rows.push(RetailOrderRow {
            nro_referencia: nro_referencia.clone(),
            nro_orden_cliente: text(raw, COL_ORDER_NUMBER),
            cod_cliente: client.cod_cliente.clone(),
            nombre_cliente: client.nom_cliente.clone(),
            cod_sucursal: client.cod_sucursal.clone(),
            nom_sucursal: client.nom_sucursal.clone(),
            fecha_emision: date(raw, COL_ISSUE_DATE),
            fecha_compromiso: date(raw, COL_RECEPTION_END),
            sku_item: code_key(&text(raw, COL_SKU)),
            cantidad_solicitada: cantidad,
            nro_orden_salida: nro_orden_salida.to_string(),
            unidades_dimension_logistica: logistic_units,
            bultos,
        });
    }

    let missing_dates = rows
        .iter()
        .filter(|r| r.fecha_emision.is_none() || r.fecha_compromiso.is_none())
        .count();
    if missing_dates > 0 {
        warn!(rows = missing_dates, "unparseable order dates left blank");
    }
    info!(rows = rows.len(), nro_referencia = %nro_referencia, "retail order mapped");

    Ok(RetailOrder {
        rows,
        has_logistic_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ClientRecord {
        ClientRecord {
            cod_cliente: "96792430".to_string(),
            nom_cliente: "SODIMAC S.A.".to_string(),
            cod_sucursal: "01".to_string(),
            nom_sucursal: "CD LO ESPEJO".to_string(),
        }
    }

    fn table(with_logistic: bool, rows: &[[&str; 8]]) -> RawTable {
        let mut headers: Vec<String> = RETAIL_REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        if with_logistic {
            headers.push(COL_LOGISTIC_UNITS.to_string());
        }
        let rows = rows
            .iter()
            .map(|r| {
                headers
                    .iter()
                    .zip(r.iter())
                    .map(|(h, v)| (h.clone(), v.to_string()))
                    .collect()
            })
            .collect();
        RawTable { headers, rows }
    }

    #[test]
    fn test_build_retail_order_maps_client_and_reference() {
        let t = table(
            false,
            &[
                ["", "1", "X", "05-03-2024", "10/03/2024", "3650138.0", "4", ""],
                ["OC-77", "1", "X", "05-03-2024", "basura", "7641117", "16", ""],
            ],
        );
        let order = build_retail_order(&t, &client(), "SAL-9").unwrap();

        assert_eq!(order.len(), 2);
        assert_eq!(order.rows[0].nro_referencia, "OC-77");
        assert_eq!(order.rows[0].nro_orden_cliente, "");
        assert_eq!(order.rows[0].cod_cliente, "96792430");
        assert_eq!(order.rows[0].sku_item, "3650138");
        assert_eq!(order.rows[1].fecha_compromiso, None);
        assert_eq!(order.rows[1].nro_orden_salida, "SAL-9");
        assert_eq!(order.columns().len(), 26);
        assert!(order.totals().is_none());
    }

    #[test]
    fn test_build_retail_order_bultos() {
        let t = table(
            true,
            &[
                ["OC", "1", "X", "05-03-2024", "05-03-2024", "1", "12", "6"],
                ["OC", "1", "X", "05-03-2024", "05-03-2024", "2", "8", "4"],
            ],
        );
        let order = build_retail_order(&t, &client(), "S").unwrap();
        assert_eq!(order.rows[0].bultos, Some(2.0));
        assert_eq!(order.columns().last(), Some(&COL_BULTOS));
        let totals = order.totals().unwrap();
        assert_eq!(totals.bultos, 4.0);
        assert_eq!(totals.units, 20.0);
    }

    #[test]
    fn test_build_retail_order_missing_column() {
        let t = RawTable {
            headers: vec![COL_ORDER_NUMBER.to_string(), COL_SKU.to_string()],
            rows: vec![],
        };
        let err = build_retail_order(&t, &client(), "S").unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == COL_TAX_ID));
    }

    #[test]
    fn test_date_style() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(DateStyle::Template.format(d), "20240305");
        assert_eq!(DateStyle::Plain.format(d), "2024-03-05 00:00:00");
    }

    #[test]
    fn test_text_columns_repaired() {
        let t = table(false, &[["NÃºmero 1", "1", "X", "", "", "9", "1", ""]]);
        let order = build_retail_order(&t, &client(), "S").unwrap();
        assert_eq!(order.rows[0].nro_orden_cliente, "Número 1");
        assert_eq!(order.rows[0].fecha_emision, None);
    }
}
