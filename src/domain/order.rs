// ==========================================
// Logistica ASN - order / output row models
// ==========================================
// Input: WMS extract lines
// Output: positions, bulto rows, labels, retail import rows
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WmsLine - one WMS extract row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsLine {
    pub lpn: String,
    pub cod_item: String, // textual CodItem
    pub nom_item: String,
    pub units: i64,
}

// ==========================================
// Position - Codelco "posiciones" row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub pos: String,
    pub material: String,
    pub quantity: i64,
    pub unit: String, // always "UN"
    pub bulto: usize, // 1-based bulto / pallet number
}

/// Unit of measure written on every position.
pub const POSITION_UNIT: &str = "UN";

// ==========================================
// BultoRow - Codelco "bultos" row
// ==========================================
// Weights in kg, dimensions already converted to metres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BultoRow {
    pub bulto: usize,
    pub weight_kg: f64,
    pub height_m: f64,
    pub length_m: f64,
    pub width_m: f64,
}

// ==========================================
// ItemUnits - units summed per (CodItem, NomItem)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUnits {
    pub cod_item: String,
    pub nom_item: String,
    pub units: i64,
}

// ==========================================
// Collahuasi labels
// ==========================================

/// Small label row (Zebra Designer import).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallLabel {
    pub order_ref: String,      // N° OC
    pub n_item: Option<i64>,    // N° ITEM
    pub cod_item: String,       // CÓDIGO CLIENTE
    pub nro_parte: String,      // N° DE PARTE
    pub quantity: i64,          // CANTIDAD
    pub lpn: String,
}

/// Large label row: one per box or pallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeLabel {
    pub client: String,
    pub destination: String,
    pub supplier: String,
    pub order_ref: String,
    pub guide_number: String,
    pub asn: String,
    pub package_count: String, // "01 DE 05"
    pub weight_kg: f64,
    pub lpn: String,
    pub kind: String, // BULTO / PALLET
}

/// Fixed header data printed on every large label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelParty {
    pub client: String,
    pub destination: String,
    pub supplier: String,
}

// ==========================================
// RetailOrderRow - Sodimac / Tottus import row
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetailOrderRow {
    pub nro_referencia: String,
    pub nro_orden_cliente: String,
    pub cod_cliente: String,
    pub nombre_cliente: String,
    pub cod_sucursal: String,
    pub nom_sucursal: String,
    pub fecha_emision: Option<NaiveDate>,    // unparseable -> None (blank cell)
    pub fecha_compromiso: Option<NaiveDate>,
    pub sku_item: String,
    pub cantidad_solicitada: f64,
    pub nro_orden_salida: String,
    pub unidades_dimension_logistica: Option<f64>,
    pub bultos: Option<f64>,
}
