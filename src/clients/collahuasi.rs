// ==========================================
// Logistica ASN - Collahuasi process
// ==========================================
// 1. Pallet declaration (Sí / No / Salir), then weight + box per loose LPN
//    LPNs with several lines first; "Volver" in a box menu restarts
// 2. output/bultos_pedido_collahuasi.xlsx: Pallets? / Cajas / ASN / detalle
// 3. Optional guides: NItem / NroParte validated and saved first
// 4. Optional labels: output/etiquetas_peq.xlsx
// ==========================================

use crate::clients::common::{
    asn_classes, consolidator, declare_pallet, loose_unit, pick_box, require_boxes,
    select_pallet_lpns, show_lines, Step,
};
use crate::clients::{ClientContext, ClientInput, ClientProcess, ProcessResult};
use crate::domain::catalog::{BoxType, ItemCatalog};
use crate::domain::order::WmsLine;
use crate::domain::types::Answer;
use crate::domain::unit::{PackedUnit, Pallet};
use crate::engine::guide::item_guide;
use crate::engine::labels::{large_labels, small_labels};
use crate::engine::partition::{owner_of, partition_lpns, unique_lpns};
use crate::export::sheets::{
    asn_sheet, boxes_sheet, detail_sheet, large_labels_sheet, pallets_sheet, small_labels_sheet,
};
use crate::export::xlsx_writer::write_workbook;
use crate::i18n::{t, t_with_args};
use crate::importer::wms_mapper::{lines_per_lpn, map_wms_lines};
use crate::prompt::{PromptError, PromptResult, Prompter};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

pub const SUMMARY_FILE: &str = "bultos_pedido_collahuasi.xlsx";
pub const LABELS_FILE: &str = "etiquetas_peq.xlsx";

pub struct CollahuasiProcess;

/// Pallets and loose boxes registered by the operator.
struct Packing {
    pallets: Vec<Pallet>,
    boxes: Vec<PackedUnit>,
}

impl ClientProcess for CollahuasiProcess {
    fn name(&self) -> &str {
        "Collahuasi"
    }

    #[instrument(skip_all, name = "collahuasi")]
    fn run(
        &self,
        ctx: &ClientContext<'_>,
        input: &ClientInput,
        prompter: &mut dyn Prompter,
    ) -> ProcessResult<Vec<PathBuf>> {
        let box_types = require_boxes(&input.boxes)?;
        let lines = map_wms_lines(&input.wms)?;
        let all_lpns = unique_lpns(lines.iter().map(|l| l.lpn.as_str()));

        let packing = loop {
            let pallets = declare_pallets(prompter, &all_lpns)?;
            let loose = partition_lpns(&all_lpns, &pallets).loose;
            match register_boxes(prompter, &lines, &loose, &box_types)? {
                Step::Done(boxes) => break Packing { pallets, boxes },
                Step::Back => {
                    debug!("box registration restarted");
                    continue;
                }
            }
        };

        let consolidator = consolidator(ctx.settings)?;
        let mut sheets = Vec::new();
        if !packing.pallets.is_empty() {
            sheets.push(pallets_sheet(&packing.pallets));
        }
        sheets.push(boxes_sheet(&packing.boxes));
        sheets.push(asn_sheet(&asn_classes(&consolidator, &packing.boxes, &packing.pallets)));
        sheets.push(detail_sheet(&lines));

        let summary_path = ctx.output_dir.join(SUMMARY_FILE);
        write_workbook(&summary_path, &sheets)?;
        prompter.show(&t_with_args(
            "output.file_written",
            &[("path", &summary_path.display().to_string())],
        ));
        info!(
            pallets = packing.pallets.len(),
            boxes = packing.boxes.len(),
            "collahuasi summary written"
        );
        let mut outputs = vec![summary_path];

        if prompter.prompt_option(&t("guide.ask"))? != Answer::Yes {
            prompter.show(&t("guide.skipped"));
            return Ok(outputs);
        }

        let mut catalog = ctx.items.load()?;
        validate_item_numbers(prompter, &mut catalog, &lines)?;
        ctx.items.save(&catalog)?;
        print_guides(prompter, &catalog, &lines, &packing);

        if prompter.prompt_option(&t("labels.ask"))? != Answer::Yes {
            prompter.show(&t("labels.skipped"));
            return Ok(outputs);
        }

        let order_ref = prompter.prompt_no_spaces(&t("labels.order_ref"))?;
        let loose_lpns: Vec<String> = packing.boxes.iter().map(|b| b.id.clone()).collect();
        let small = small_labels(&lines, &loose_lpns, &packing.pallets, &catalog, &order_ref);

        let guide_number = prompter.prompt_no_spaces(&t("labels.guide_number"))?;
        let asn = prompter.prompt_no_spaces(&t("labels.asn"))?;
        let party = ctx.settings.label_party()?;
        let large = large_labels(&packing.boxes, &packing.pallets, &party, &order_ref, &guide_number, &asn);

        let labels_path = ctx.output_dir.join(LABELS_FILE);
        write_workbook(
            &labels_path,
            &[small_labels_sheet(&small), large_labels_sheet(&large)],
        )?;
        prompter.show(&t_with_args(
            "output.file_written",
            &[("path", &labels_path.display().to_string())],
        ));
        info!(small = small.len(), large = large.len(), "collahuasi labels written");
        outputs.push(labels_path);

        Ok(outputs)
    }
}

/// Pallet questions. "Volver" in the LPN menu asks again whether the order
/// carries pallets; any answer other than "Sí" stops declaring.
fn declare_pallets(prompter: &mut dyn Prompter, all_lpns: &[String]) -> PromptResult<Vec<Pallet>> {
    let mut pallets = Vec::new();
    match prompter.prompt_option(&t("collahuasi.has_pallets"))? {
        Answer::Yes => {}
        Answer::No => return Ok(pallets),
        Answer::Exit => return Err(PromptError::Cancelled),
    }

    let mut remaining: Vec<String> = all_lpns.to_vec();
    while !remaining.is_empty() {
        let number = pallets.len() + 1;
        let lpns = match select_pallet_lpns(prompter, number, &remaining)? {
            Step::Done(lpns) => lpns,
            Step::Back => match prompter.prompt_option(&t("collahuasi.has_pallets"))? {
                Answer::Yes => continue,
                Answer::No => break,
                Answer::Exit => return Err(PromptError::Cancelled),
            },
        };
        remaining.retain(|l| !lpns.contains(l));
        pallets.push(declare_pallet(prompter, number, lpns)?);

        if remaining.is_empty() {
            break;
        }
        match prompter.prompt_option(&t("pallet.more"))? {
            Answer::Yes => {}
            Answer::No => break,
            Answer::Exit => return Err(PromptError::Cancelled),
        }
    }
    Ok(pallets)
}

/// Weight and box of each loose LPN: LPNs with several lines first, then the rest.
fn register_boxes(
    prompter: &mut dyn Prompter,
    lines: &[WmsLine],
    loose: &[String],
    box_types: &[BoxType],
) -> PromptResult<Step<Vec<PackedUnit>>> {
    let counts: Vec<(String, usize)> = lines_per_lpn(lines)
        .into_iter()
        .filter(|(lpn, _)| loose.contains(lpn))
        .collect();
    let ordered = counts
        .iter()
        .filter(|(_, n)| *n > 1)
        .chain(counts.iter().filter(|(_, n)| *n == 1));

    prompter.show(&t("box.registration"));
    let mut boxes = Vec::with_capacity(counts.len());
    for (lpn, n) in ordered {
        let items: Vec<&WmsLine> = lines.iter().filter(|l| &l.lpn == lpn).collect();
        if *n > 1 {
            let cods: Vec<&str> = items.iter().map(|l| l.cod_item.as_str()).collect();
            prompter.show(&t_with_args(
                "box.repeated_lpn",
                &[("lpn", lpn), ("n", &n.to_string()), ("cods", &cods.join(", "))],
            ));
        } else if let Some(line) = items.first() {
            prompter.show(&t_with_args(
                "box.single_lpn",
                &[("lpn", lpn), ("cod", &line.cod_item), ("units", &line.units.to_string())],
            ));
        }

        let weight_kg = prompter.prompt_number(&t_with_args("box.weight", &[("lpn", lpn)]))?;
        match pick_box(prompter, box_types, lpn)? {
            Step::Done(box_type) => boxes.push(loose_unit(lpn, weight_kg, &box_type)),
            Step::Back => return Ok(Step::Back),
        }
    }
    Ok(Step::Done(boxes))
}

/// NItem (POS/Item) and NroParte for every distinct (CodItem, NomItem).
fn validate_item_numbers(
    prompter: &mut dyn Prompter,
    catalog: &mut ItemCatalog,
    lines: &[WmsLine],
) -> PromptResult<()> {
    let mut seen: Vec<(&str, &str)> = Vec::new();
    for line in lines {
        let key = (line.cod_item.as_str(), line.nom_item.as_str());
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        catalog.refresh_nom_item(&line.cod_item, &line.nom_item);
        prompter.show(&t_with_args(
            "item.header",
            &[("cod", &line.cod_item), ("nom", &line.nom_item)],
        ));

        let stored = catalog
            .get(&line.cod_item)
            .and_then(|r| Some((r.n_item?, r.nro_parte.clone()?)));
        if let Some((n_item, nro_parte)) = stored {
            prompter.show(&t_with_args("item.n_item_current", &[("n", &n_item.to_string())]));
            prompter.show(&t_with_args("item.nro_parte_current", &[("parte", &nro_parte)]));
            if prompter.prompt_option(&t("item.numbers_correct"))? == Answer::Yes {
                continue;
            }
        }

        let n_item = prompter.prompt_integer(&t("item.n_item_input"))?;
        let nro_parte = prompter.prompt_no_spaces(&t("item.nro_parte_input"))?;
        let record = catalog.entry(&line.cod_item);
        record.n_item = Some(n_item);
        record.nro_parte = Some(nro_parte);
    }
    Ok(())
}

/// One guide per pallet (LPNs it owns) and one for all loose boxes.
fn print_guides(
    prompter: &mut dyn Prompter,
    catalog: &ItemCatalog,
    lines: &[WmsLine],
    packing: &Packing,
) {
    for pallet in &packing.pallets {
        let owned = lines.iter().filter(|l| {
            owner_of(&l.lpn, &packing.pallets)
                .map(|p| p.id == pallet.id)
                .unwrap_or(false)
        });
        let guide = item_guide(&format!("Guía {}", pallet.id), owned, catalog);
        show_lines(prompter, &guide.render());
    }

    if !packing.boxes.is_empty() {
        let loose = lines
            .iter()
            .filter(|l| packing.boxes.iter().any(|b| b.id == l.lpn));
        let guide = item_guide("Guía Bultos", loose, catalog);
        show_lines(prompter, &guide.render());
    }

    if packing.pallets.is_empty() && packing.boxes.is_empty() {
        prompter.show(&t("guide.nothing"));
    }
}
