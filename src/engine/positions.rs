// ==========================================
// Logistica ASN - positions & bultos engine
// ==========================================
// Codelco "posiciones" / "bultos" tables
// Units summed per CodItem (guides)
// ==========================================

use crate::domain::order::{BultoRow, ItemUnits, Position, WmsLine, POSITION_UNIT};
use std::collections::HashMap;

/// Position number and material assigned to one CodItem.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAssignment {
    pub pos: String,
    pub material: String,
}

/// CodItem -> (Pos, Material)
pub type AssignmentMap = HashMap<String, ItemAssignment>;

/// Positions of every WMS line of `lpn`, all tagged with `bulto`.
///
/// CodItems without an assignment fall back to Pos "" and Material = CodItem.
pub fn positions_for_lpn(
    lines: &[WmsLine],
    lpn: &str,
    assignments: &AssignmentMap,
    bulto: usize,
) -> Vec<Position> {
    lines
        .iter()
        .filter(|l| l.lpn == lpn)
        .map(|line| {
            let (pos, material) = match assignments.get(&line.cod_item) {
                Some(a) => (a.pos.clone(), a.material.clone()),
                None => (String::new(), line.cod_item.clone()),
            };
            Position {
                pos,
                material,
                quantity: line.units,
                unit: POSITION_UNIT.to_string(),
                bulto,
            }
        })
        .collect()
}

/// Sums quantities by (Pos, Material, Unidad) and re-tags the result with `bulto`.
///
/// First-appearance order is kept.
pub fn aggregate_positions(positions: &[Position], bulto: usize) -> Vec<Position> {
    let mut out: Vec<Position> = Vec::new();
    for p in positions {
        match out
            .iter_mut()
            .find(|o| o.pos == p.pos && o.material == p.material && o.unit == p.unit)
        {
            Some(existing) => existing.quantity += p.quantity,
            None => out.push(Position {
                bulto,
                ..p.clone()
            }),
        }
    }
    out
}

/// Converts weight/dimensions in cm into a bulto row in metres.
pub fn bulto_row(bulto: usize, weight_kg: f64, height_cm: f64, length_cm: f64, width_cm: f64) -> BultoRow {
    BultoRow {
        bulto,
        weight_kg,
        height_m: height_cm / 100.0,
        length_m: length_cm / 100.0,
        width_m: width_cm / 100.0,
    }
}

/// Units summed by (CodItem, NomItem), first-appearance order.
pub fn units_by_item<'a, I>(lines: I) -> Vec<ItemUnits>
where
    I: IntoIterator<Item = &'a WmsLine>,
{
    let mut out: Vec<ItemUnits> = Vec::new();
    for line in lines {
        match out
            .iter_mut()
            .find(|u| u.cod_item == line.cod_item && u.nom_item == line.nom_item)
        {
            Some(existing) => existing.units += line.units,
            None => out.push(ItemUnits {
                cod_item: line.cod_item.clone(),
                nom_item: line.nom_item.clone(),
                units: line.units,
            }),
        }
    }
    out
}

/// Lines whose LPN is in `lpns`.
pub fn lines_for_lpns<'a>(lines: &'a [WmsLine], lpns: &[String]) -> Vec<&'a WmsLine> {
    lines.iter().filter(|l| lpns.contains(&l.lpn)).collect()
}
