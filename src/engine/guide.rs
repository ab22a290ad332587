// ==========================================
// Logistica ASN - dispatch guide engine
// ==========================================
// Summaries the operator copies into the dispatch guide (guía de despacho)
// Codelco: quantity per Material + cleaned LPN list
// Collahuasi: units per CodItem + NroParte list
// ==========================================

use crate::domain::catalog::ItemCatalog;
use crate::domain::order::{ItemUnits, Position, WmsLine};
use crate::engine::positions::units_by_item;
use std::collections::BTreeSet;

// ==========================================
// MaterialGuide (Codelco)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGuideLine {
    pub material: String,
    pub nom_item: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGuide {
    pub title: String,
    pub lines: Vec<MaterialGuideLine>,
    pub lpns: Vec<String>, // sorted, cleaned
}

/// Builds the Codelco guide for one shipment kind.
pub fn material_guide(
    title: &str,
    positions: &[Position],
    lpns: &[String],
    catalog: &ItemCatalog,
) -> MaterialGuide {
    let mut lines: Vec<MaterialGuideLine> = Vec::new();
    for p in positions {
        match lines.iter_mut().find(|l| l.material == p.material) {
            Some(existing) => existing.quantity += p.quantity,
            None => lines.push(MaterialGuideLine {
                material: p.material.clone(),
                nom_item: catalog
                    .nom_item_for_material(&p.material)
                    .unwrap_or_default()
                    .to_string(),
                quantity: p.quantity,
            }),
        }
    }

    let mut sorted: Vec<&String> = lpns.iter().collect();
    sorted.sort();

    MaterialGuide {
        title: title.to_string(),
        lines,
        lpns: sorted.into_iter().map(|l| clean_lpn(l)).collect(),
    }
}

impl MaterialGuide {
    /// Console rendering, one string per line.
    pub fn render(&self) -> Vec<String> {
        let mut out = vec![
            String::new(),
            format!("Guía de {}:", self.title),
            format!("{:<12} {:<50} {:>8} {:>6}", "CodItem", "NomItem", "Cantidad", "Unidad"),
            "-".repeat(80),
        ];
        for line in &self.lines {
            out.push(format!(
                "{:<12} {:<50} {:>8} UN",
                line.material, line.nom_item, line.quantity
            ));
        }
        out.push(String::new());
        out.push("LPNs en la guía:".to_string());
        out.push(self.lpns.join(" "));
        out
    }
}

// ==========================================
// ItemGuide (Collahuasi)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGuide {
    pub title: String,
    pub items: Vec<ItemUnits>,
    pub nro_partes: Vec<String>, // sorted, unique
}

/// Builds the Collahuasi guide for a set of lines (one pallet or all loose boxes).
pub fn item_guide<'a, I>(title: &str, lines: I, catalog: &ItemCatalog) -> ItemGuide
where
    I: IntoIterator<Item = &'a WmsLine>,
{
    let items = units_by_item(lines);
    let nro_partes: BTreeSet<String> = items
        .iter()
        .filter_map(|i| catalog.nro_parte(&i.cod_item))
        .map(str::to_string)
        .collect();

    ItemGuide {
        title: title.to_string(),
        items,
        nro_partes: nro_partes.into_iter().collect(),
    }
}

impl ItemGuide {
    pub fn render(&self) -> Vec<String> {
        let mut out = vec![
            String::new(),
            format!("{}:", self.title),
            format!("{:<10} {:<30} {:>8}", "CodItem", "NomItem", "Unidades"),
            "-".repeat(50),
        ];
        for item in &self.items {
            out.push(format!(
                "{:<10} {:<30} {:>8}",
                item.cod_item, item.nom_item, item.units
            ));
        }
        if self.nro_partes.is_empty() {
            out.push("No se encontraron Nro Parte para los CodItem en la guía.".to_string());
        } else {
            out.push(format!("Nro Parte en la guía: {}", self.nro_partes.join(" ")));
        }
        out
    }
}

/// Strips the zero padding of "SAL" LPNs: "SAL000123" -> "SAL123".
///
/// Case-insensitive on the prefix; anything after the digit run is dropped.
/// LPNs that do not start with SAL + digits are returned unchanged.
pub fn clean_lpn(lpn: &str) -> String {
    let upper = lpn.to_uppercase();
    let Some(rest) = upper.strip_prefix("SAL") else {
        return lpn.to_string();
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return lpn.to_string();
    }
    let trimmed = digits.trim_start_matches('0');
    let number = if trimmed.is_empty() { "0" } else { trimmed };
    format!("SAL{}", number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ItemRecord;

    #[test]
    fn test_clean_lpn() {
        assert_eq!(clean_lpn("SAL0000123"), "SAL123");
        assert_eq!(clean_lpn("sal0042"), "SAL42");
        assert_eq!(clean_lpn("SAL000"), "SAL0");
        assert_eq!(clean_lpn("SAL12-A"), "SAL12");
        assert_eq!(clean_lpn("SALIDA"), "SALIDA");
        assert_eq!(clean_lpn("LPN0001"), "LPN0001");
    }

    #[test]
    fn test_material_guide_sums_and_sorts() {
        let mut catalog = ItemCatalog::new();
        catalog.upsert(
            "100",
            ItemRecord {
                nom_item: "PERNO".to_string(),
                material: Some("M100".to_string()),
                ..Default::default()
            },
        );
        let positions = vec![
            Position { pos: "1".into(), material: "M100".into(), quantity: 2, unit: "UN".into(), bulto: 1 },
            Position { pos: "2".into(), material: "M200".into(), quantity: 1, unit: "UN".into(), bulto: 1 },
            Position { pos: "1".into(), material: "M100".into(), quantity: 3, unit: "UN".into(), bulto: 2 },
        ];
        let lpns = vec!["SAL0009".to_string(), "SAL0002".to_string()];
        let guide = material_guide("Bultos", &positions, &lpns, &catalog);

        assert_eq!(guide.lines.len(), 2);
        assert_eq!(guide.lines[0].quantity, 5);
        assert_eq!(guide.lines[0].nom_item, "PERNO");
        assert_eq!(guide.lines[1].nom_item, "");
        assert_eq!(guide.lpns, vec!["SAL2".to_string(), "SAL9".to_string()]);
        assert!(guide.render().iter().any(|l| l == "SAL2 SAL9"));
    }

    #[test]
    fn test_item_guide_collects_nro_parte() {
        let mut catalog = ItemCatalog::new();
        catalog.upsert(
            "100",
            ItemRecord {
                nom_item: "PERNO".to_string(),
                nro_parte: Some("NP-2".to_string()),
                ..Default::default()
            },
        );
        let lines = vec![
            WmsLine { lpn: "L1".into(), cod_item: "100".into(), nom_item: "PERNO".into(), units: 4 },
            WmsLine { lpn: "L2".into(), cod_item: "200".into(), nom_item: "TUERCA".into(), units: 1 },
        ];
        let guide = item_guide("Guía Bultos", &lines, &catalog);
        assert_eq!(guide.items.len(), 2);
        assert_eq!(guide.nro_partes, vec!["NP-2".to_string()]);
    }
}
