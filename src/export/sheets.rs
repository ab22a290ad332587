// ==========================================
// Logistica ASN - output sheet layouts
// ==========================================
// Column names here are the ones the carrier / client
// import templates expect; do not translate them
// ==========================================

use crate::domain::order::{BultoRow, LargeLabel, Position, SmallLabel, WmsLine};
use crate::domain::unit::{EquivalenceClass, PackedUnit, Pallet};
use crate::engine::retail_order::{DateStyle, RetailOrder};
use crate::export::xlsx_writer::{CellValue, SheetTable};
use crate::importer::file_parser::RawTable;

/// Default sheet name of a single-sheet workbook.
pub const DEFAULT_SHEET: &str = "Sheet1";

pub const SHEET_PALLETS: &str = "Pallets";
pub const SHEET_BOXES: &str = "Cajas";
pub const SHEET_ASN: &str = "ASN";
pub const SHEET_DETAIL: &str = "detalle";
pub const SHEET_SMALL_LABELS: &str = "etiqueta_peq";
pub const SHEET_LARGE_LABELS: &str = "etiqueta_grande";

// ==========================================
// Codelco (agunsa)
// ==========================================

pub fn bultos_sheet(rows: &[BultoRow]) -> SheetTable {
    let mut table = SheetTable::new(
        DEFAULT_SHEET,
        &[
            "Bulto", "Peso", "Unidad", "Altura", "Unidad_1", "Longitud", "Unidad_2", "Ancho",
            "Unidad_3",
        ],
    );
    for r in rows {
        table.push_row(vec![
            CellValue::Integer(r.bulto as i64),
            CellValue::Number(r.weight_kg),
            CellValue::text("KG"),
            CellValue::Number(r.height_m),
            CellValue::text("M"),
            CellValue::Number(r.length_m),
            CellValue::text("M"),
            CellValue::Number(r.width_m),
            CellValue::text("M"),
        ]);
    }
    table
}

pub fn positions_sheet(positions: &[Position]) -> SheetTable {
    let mut table = SheetTable::new(DEFAULT_SHEET, &["Pos", "Material", "Cantidad", "Unidad", "Bulto"]);
    for p in positions {
        table.push_row(vec![
            CellValue::text(&p.pos),
            CellValue::text(&p.material),
            CellValue::Integer(p.quantity),
            CellValue::text(&p.unit),
            CellValue::Integer(p.bulto as i64),
        ]);
    }
    table
}

// ==========================================
// Collahuasi
// ==========================================

/// One row per (pallet, LPN).
pub fn pallets_sheet(pallets: &[Pallet]) -> SheetTable {
    let mut table = SheetTable::new(
        SHEET_PALLETS,
        &["Pallet", "LPN", "Peso (kg)", "Alto (cm)", "Largo (cm)", "Ancho (cm)"],
    );
    for p in pallets {
        for lpn in &p.lpns {
            table.push_row(vec![
                CellValue::text(&p.id),
                CellValue::text(lpn),
                CellValue::Number(p.weight_kg),
                CellValue::Number(p.height_cm),
                CellValue::Number(p.length_cm),
                CellValue::Number(p.width_cm),
            ]);
        }
    }
    table
}

pub fn boxes_sheet(units: &[PackedUnit]) -> SheetTable {
    let mut table = SheetTable::new(
        SHEET_BOXES,
        &["LPN", "Peso (kg)", "TipoCaja", "Alto (cm)", "Largo (cm)", "Ancho (cm)"],
    );
    for u in units {
        table.push_row(vec![
            CellValue::text(&u.id),
            CellValue::Number(u.weight_kg),
            CellValue::text(&u.box_type),
            CellValue::Number(u.height_cm),
            CellValue::Number(u.length_cm),
            CellValue::Number(u.width_cm),
        ]);
    }
    table
}

pub fn asn_sheet(classes: &[EquivalenceClass]) -> SheetTable {
    let mut table = SheetTable::new(
        SHEET_ASN,
        &["Tipo", "Unidades", "Peso(kg/unid)", "Alto(cm/unid)", "Ancho(cm/unid)", "Largo(cm/unid)"],
    );
    for c in classes {
        table.push_row(vec![
            CellValue::text(&c.box_type),
            CellValue::Integer(c.count as i64),
            CellValue::Number(c.average_weight_kg),
            CellValue::Number(c.height_cm),
            CellValue::Number(c.width_cm),
            CellValue::Number(c.length_cm),
        ]);
    }
    table
}

pub fn detail_sheet(lines: &[WmsLine]) -> SheetTable {
    let mut table = SheetTable::new(SHEET_DETAIL, &["LPN", "CodItem", "NomItem", "Unidades"]);
    for l in lines {
        table.push_row(vec![
            CellValue::text(&l.lpn),
            CellValue::infer(&l.cod_item),
            CellValue::text(&l.nom_item),
            CellValue::Integer(l.units),
        ]);
    }
    table
}

pub fn small_labels_sheet(labels: &[SmallLabel]) -> SheetTable {
    let mut table = SheetTable::new(
        SHEET_SMALL_LABELS,
        &["N° OC", "N° ITEM", "CÓDIGO CLIENTE", "N° DE PARTE", "CANTIDAD", "LPN"],
    );
    for l in labels {
        table.push_row(vec![
            CellValue::text(&l.order_ref),
            l.n_item.map(CellValue::Integer).unwrap_or(CellValue::Empty),
            CellValue::text(&l.cod_item),
            CellValue::text(&l.nro_parte),
            CellValue::Integer(l.quantity),
            CellValue::text(&l.lpn),
        ]);
    }
    table
}

pub fn large_labels_sheet(labels: &[LargeLabel]) -> SheetTable {
    let mut table = SheetTable::new(
        SHEET_LARGE_LABELS,
        &[
            "CLIENTE", "DESTINO", "PROVEEDOR", "OC", "NRO. DE GUIA", "ASN", "CANT BULTOS", "PESO",
            "LPN", "TIPO",
        ],
    );
    for l in labels {
        table.push_row(vec![
            CellValue::text(&l.client),
            CellValue::text(&l.destination),
            CellValue::text(&l.supplier),
            CellValue::text(&l.order_ref),
            CellValue::text(&l.guide_number),
            CellValue::text(&l.asn),
            CellValue::text(&l.package_count),
            CellValue::Number(l.weight_kg),
            CellValue::text(&l.lpn),
            CellValue::text(&l.kind),
        ]);
    }
    table
}

// ==========================================
// Sodimac / Tottus
// ==========================================

/// Retail import sheet; dates follow `style`.
pub fn retail_sheet(order: &RetailOrder, style: DateStyle) -> SheetTable {
    let columns = order.columns();
    let mut table = SheetTable::new(DEFAULT_SHEET, &columns);
    let date = |d: Option<chrono::NaiveDate>| CellValue::opt_text(d.map(|d| style.format(d)));

    for r in &order.rows {
        let row = columns
            .iter()
            .map(|col| match *col {
                "NroReferencia" => CellValue::text(&r.nro_referencia),
                "NroOrdenCliente" => CellValue::text(&r.nro_orden_cliente),
                "CodCliente" => CellValue::text(&r.cod_cliente),
                "Nombre Cliente" => CellValue::text(&r.nombre_cliente),
                "CodSucursal" => CellValue::text(&r.cod_sucursal),
                "NomSucursal" => CellValue::text(&r.nom_sucursal),
                "FechaEmision" => date(r.fecha_emision),
                "FechaCompromiso" => date(r.fecha_compromiso),
                "SKU Item" => CellValue::text(&r.sku_item),
                "CantidadSolicitada" => CellValue::Number(r.cantidad_solicitada),
                "NroOrdenSalida" => CellValue::text(&r.nro_orden_salida),
                "Unidades dimensión logística" => CellValue::opt_number(r.unidades_dimension_logistica),
                "Bultos" => CellValue::opt_number(r.bultos),
                _ => CellValue::Empty,
            })
            .collect();
        table.push_row(row);
    }
    table
}

// ==========================================
// ASN split
// ==========================================

/// Raw rows back to a sheet; numeric-looking text becomes numbers.
pub fn raw_sheet(raw: &RawTable) -> SheetTable {
    let mut table = SheetTable {
        name: DEFAULT_SHEET.to_string(),
        headers: raw.headers.clone(),
        rows: Vec::with_capacity(raw.len()),
    };
    for row in &raw.rows {
        table.push_row(
            raw.headers
                .iter()
                .map(|h| CellValue::infer(row.get(h).map(String::as_str).unwrap_or("")))
                .collect(),
        );
    }
    table
}
