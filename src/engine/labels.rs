// ==========================================
// Logistica ASN - Collahuasi dispatch labels
// ==========================================
// Small labels: per LPN / item (Zebra Designer import)
// Large labels: one per box and one per pallet
// ==========================================

use crate::domain::catalog::ItemCatalog;
use crate::domain::order::{LabelParty, LargeLabel, SmallLabel, WmsLine};
use crate::domain::types::ShipmentKind;
use crate::domain::unit::{PackedUnit, Pallet};
use std::collections::BTreeSet;

/// Copies of the "total quantity" label per item and LPN.
const TOTAL_LABEL_COPIES: usize = 2;

/// Lines summed by (LPN, CodItem, NomItem), first-appearance order.
fn lines_by_lpn_item(lines: &[WmsLine]) -> Vec<WmsLine> {
    let mut out: Vec<WmsLine> = Vec::new();
    for line in lines {
        match out.iter_mut().find(|o| {
            o.lpn == line.lpn && o.cod_item == line.cod_item && o.nom_item == line.nom_item
        }) {
            Some(existing) => existing.units += line.units,
            None => out.push(line.clone()),
        }
    }
    out
}

/// Builds small labels for every LPN of pallets and loose boxes.
///
/// LPNs are visited in sorted order. An LPN with one item gets two labels with
/// the total. With several items, every item gets two total labels and then one
/// label per unit with quantity 1.
pub fn small_labels(
    lines: &[WmsLine],
    loose_lpns: &[String],
    pallets: &[Pallet],
    catalog: &ItemCatalog,
    order_ref: &str,
) -> Vec<SmallLabel> {
    let all: BTreeSet<&str> = pallets
        .iter()
        .flat_map(|p| p.lpns.iter().map(String::as_str))
        .chain(loose_lpns.iter().map(String::as_str))
        .collect();
    let grouped = lines_by_lpn_item(lines);

    let make = |line: &WmsLine, quantity: i64| {
        let record = catalog.get(&line.cod_item);
        SmallLabel {
            order_ref: order_ref.to_string(),
            n_item: record.and_then(|r| r.n_item),
            cod_item: line.cod_item.clone(),
            nro_parte: record
                .and_then(|r| r.nro_parte.clone())
                .unwrap_or_default(),
            quantity,
            lpn: line.lpn.clone(),
        }
    };

    let mut labels = Vec::new();
    for lpn in all {
        let items: Vec<&WmsLine> = grouped.iter().filter(|l| l.lpn == lpn).collect();

        for item in &items {
            for _ in 0..TOTAL_LABEL_COPIES {
                labels.push(make(*item, item.units));
            }
        }

        if items.len() > 1 {
            for item in &items {
                for _ in 0..item.units.max(0) {
                    labels.push(make(*item, 1));
                }
            }
        }
    }
    labels
}

/// Builds large labels: loose boxes first ("NN DE MM"), then one per pallet.
pub fn large_labels(
    boxes: &[PackedUnit],
    pallets: &[Pallet],
    party: &LabelParty,
    order_ref: &str,
    guide_number: &str,
    asn: &str,
) -> Vec<LargeLabel> {
    let make = |package_count: String, weight_kg: f64, lpn: &str, kind: ShipmentKind| LargeLabel {
        client: party.client.clone(),
        destination: party.destination.clone(),
        supplier: party.supplier.clone(),
        order_ref: order_ref.to_string(),
        guide_number: guide_number.to_string(),
        asn: asn.to_string(),
        package_count,
        weight_kg,
        lpn: lpn.to_string(),
        kind: kind.to_string(),
    };

    let total = boxes.len();
    let mut labels: Vec<LargeLabel> = boxes
        .iter()
        .enumerate()
        .map(|(idx, unit)| {
            make(
                format!("{:02} DE {:02}", idx + 1, total),
                unit.weight_kg,
                &unit.id,
                ShipmentKind::Bulto,
            )
        })
        .collect();

    let mut seen = BTreeSet::new();
    for pallet in pallets {
        if seen.insert(pallet.id.as_str()) {
            labels.push(make(
                "01 DE 01".to_string(),
                pallet.weight_kg,
                &pallet.id,
                ShipmentKind::Pallet,
            ));
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ItemRecord;

    fn line(lpn: &str, cod: &str, units: i64) -> WmsLine {
        WmsLine {
            lpn: lpn.to_string(),
            cod_item: cod.to_string(),
            nom_item: format!("N{}", cod),
            units,
        }
    }

    fn catalog() -> ItemCatalog {
        let mut c = ItemCatalog::new();
        c.upsert(
            "100",
            ItemRecord {
                nom_item: "N100".into(),
                n_item: Some(10),
                nro_parte: Some("NP100".into()),
                ..Default::default()
            },
        );
        c
    }

    #[test]
    fn test_single_item_lpn_gets_two_labels() {
        let lines = vec![line("L1", "100", 2), line("L1", "100", 3)];
        let labels = small_labels(&lines, &["L1".to_string()], &[], &catalog(), "OC-1");
        assert_eq!(labels.len(), 2);
        assert!(labels.iter().all(|l| l.quantity == 5));
        assert_eq!(labels[0].n_item, Some(10));
        assert_eq!(labels[0].nro_parte, "NP100");
    }

    #[test]
    fn test_multi_item_lpn_adds_unit_labels() {
        let lines = vec![line("L1", "100", 2), line("L1", "200", 1)];
        let labels = small_labels(&lines, &["L1".to_string()], &[], &catalog(), "OC-1");
        // 2 + 2 total labels, then 2 + 1 unit labels
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[4].quantity, 1);
        assert_eq!(labels[6].cod_item, "200");
        assert_eq!(labels[6].nro_parte, "");
    }

    #[test]
    fn test_large_labels_numbering() {
        let boxes = vec![
            PackedUnit::new("L1", 5.0, "Chica", 1.0, 1.0, 1.0),
            PackedUnit::new("L2", 6.0, "Chica", 1.0, 1.0, 1.0),
        ];
        let pallets = vec![Pallet {
            id: "Pallet1".into(),
            lpns: vec!["L3".into()],
            weight_kg: 80.0,
            height_cm: 100.0,
            length_cm: 120.0,
            width_cm: 100.0,
        }];
        let party = LabelParty {
            client: "C".into(),
            destination: "D".into(),
            supplier: "P".into(),
        };
        let labels = large_labels(&boxes, &pallets, &party, "OC", "G1", "ASN1");
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].package_count, "01 DE 02");
        assert_eq!(labels[1].package_count, "02 DE 02");
        assert_eq!(labels[2].package_count, "01 DE 01");
        assert_eq!(labels[2].kind, "PALLET");
        assert_eq!(labels[2].lpn, "Pallet1");
    }
}
