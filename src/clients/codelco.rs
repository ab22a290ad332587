// ==========================================
// Logistica ASN - Codelco process
// ==========================================
// 1. CodItem -> (Material, Pos), validated against the item catalog
// 2. Pallet declaration, then weight + box of every loose LPN
// 3. output/agunsa: pallet_bultos / pallet_posiciones / bultos_bultos / bultos_posiciones
// 4. Optional material guides for Pallets and Bultos
// ==========================================

use crate::clients::common::{
    declare_pallet, loose_unit, pick_box, require_boxes, select_pallet_lpns, show_lines,
    validate_or_update_material, Step,
};
use crate::clients::{ClientContext, ClientInput, ClientProcess, ProcessResult};
use crate::domain::catalog::{BoxType, ItemCatalog};
use crate::domain::order::{BultoRow, Position, WmsLine};
use crate::domain::types::ShipmentKind;
use crate::domain::unit::Pallet;
use crate::engine::guide::material_guide;
use crate::engine::partition::{owner_of, partition_lpns, unique_lpns};
use crate::engine::positions::{
    aggregate_positions, bulto_row, positions_for_lpn, AssignmentMap, ItemAssignment,
};
use crate::export::sheets::{bultos_sheet, positions_sheet};
use crate::export::xlsx_writer::write_workbook;
use crate::i18n::{t, t_with_args};
use crate::importer::wms_mapper::{lines_per_lpn, map_wms_lines};
use crate::prompt::{PromptResult, Prompter};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

pub const OUTPUT_SUBDIR: &str = "agunsa";
pub const PALLET_BULTOS_FILE: &str = "pallet_bultos.xlsx";
pub const PALLET_POSITIONS_FILE: &str = "pallet_posiciones.xlsx";
pub const BULTOS_BULTOS_FILE: &str = "bultos_bultos.xlsx";
pub const BULTOS_POSITIONS_FILE: &str = "bultos_posiciones.xlsx";

pub struct CodelcoProcess;

impl ClientProcess for CodelcoProcess {
    fn name(&self) -> &str {
        "Codelco"
    }

    #[instrument(skip_all, name = "codelco")]
    fn run(
        &self,
        ctx: &ClientContext<'_>,
        input: &ClientInput,
        prompter: &mut dyn Prompter,
    ) -> ProcessResult<Vec<PathBuf>> {
        let boxes = require_boxes(&input.boxes)?;
        let lines = map_wms_lines(&input.wms)?;

        let mut catalog = ctx.items.load()?;
        let added = catalog.merge_new_items(&lines);
        if !added.is_empty() {
            info!(added = added.len(), "new CodItems added to item catalog");
            prompter.show(&t_with_args("catalog.items_added", &[("n", &added.len().to_string())]));
        }

        let assignments = assign_items(prompter, &mut catalog, &lines)?;
        ctx.items.save(&catalog)?;

        let all_lpns = unique_lpns(lines.iter().map(|l| l.lpn.as_str()));
        let pallets = if prompter.prompt_yes_no(&t("codelco.has_pallets"))? {
            declare_pallets(prompter, &all_lpns)?
        } else {
            Vec::new()
        };
        let partition = partition_lpns(&all_lpns, &pallets);

        // pallets: one bulto per pallet, positions of the LPNs it owns
        let mut pallet_rows: Vec<BultoRow> = Vec::new();
        let mut pallet_positions: Vec<Position> = Vec::new();
        for (idx, pallet) in pallets.iter().enumerate() {
            let number = idx + 1;
            let owned: Vec<Position> = partition
                .palletized
                .iter()
                .filter(|lpn| owner_of(lpn, &pallets).map(|p| p.id == pallet.id).unwrap_or(false))
                .flat_map(|lpn| positions_for_lpn(&lines, lpn, &assignments, number))
                .collect();
            pallet_positions.extend(aggregate_positions(&owned, number));
            pallet_rows.push(bulto_row(
                number,
                pallet.weight_kg,
                pallet.height_cm,
                pallet.length_cm,
                pallet.width_cm,
            ));
        }

        let (loose_rows, loose_positions) =
            register_loose_lpns(prompter, &lines, &partition.loose, &assignments, &boxes)?;

        let out_dir = ctx.output_dir.join(OUTPUT_SUBDIR);
        let outputs = vec![
            out_dir.join(PALLET_BULTOS_FILE),
            out_dir.join(PALLET_POSITIONS_FILE),
            out_dir.join(BULTOS_BULTOS_FILE),
            out_dir.join(BULTOS_POSITIONS_FILE),
        ];
        write_workbook(&outputs[0], &[bultos_sheet(&pallet_rows)])?;
        write_workbook(&outputs[1], &[positions_sheet(&pallet_positions)])?;
        write_workbook(&outputs[2], &[bultos_sheet(&loose_rows)])?;
        write_workbook(&outputs[3], &[positions_sheet(&loose_positions)])?;

        prompter.show(&t_with_args(
            "output.files_written",
            &[("dir", &out_dir.display().to_string())],
        ));
        for path in &outputs {
            prompter.show(&format!(" - {}", path.display()));
        }
        info!(
            pallets = pallets.len(),
            loose = partition.loose.len(),
            positions = pallet_positions.len() + loose_positions.len(),
            "codelco files written"
        );

        if prompter.prompt_yes_no(&t("guide.ask"))? {
            print_guides(
                prompter,
                &catalog,
                (pallet_positions.as_slice(), partition.palletized.as_slice()),
                (loose_positions.as_slice(), partition.loose.as_slice()),
            );
        }

        Ok(outputs)
    }
}

/// Material and Pos for every CodItem of the extract, in first-seen order.
fn assign_items(
    prompter: &mut dyn Prompter,
    catalog: &mut ItemCatalog,
    lines: &[WmsLine],
) -> PromptResult<AssignmentMap> {
    let mut assignments = AssignmentMap::new();
    for line in lines {
        if assignments.contains_key(&line.cod_item) {
            continue;
        }
        prompter.clear();
        prompter.show(&t_with_args(
            "item.header",
            &[("cod", &line.cod_item), ("nom", &line.nom_item)],
        ));
        let material = validate_or_update_material(prompter, catalog, &line.cod_item, &line.nom_item)?;
        let pos = prompter.prompt_text(&t_with_args("item.pos", &[("cod", &line.cod_item)]))?;
        assignments.insert(line.cod_item.clone(), ItemAssignment { pos, material });
    }
    Ok(assignments)
}

/// Pallet loop: LPNs, weight and dimensions until "no more pallets".
///
/// "Volver" in the LPN menu stops declaring pallets.
fn declare_pallets(prompter: &mut dyn Prompter, all_lpns: &[String]) -> PromptResult<Vec<Pallet>> {
    let mut pallets = Vec::new();
    let mut remaining: Vec<String> = all_lpns.to_vec();
    while !remaining.is_empty() {
        let number = pallets.len() + 1;
        let lpns = match select_pallet_lpns(prompter, number, &remaining)? {
            Step::Done(lpns) => lpns,
            Step::Back => break,
        };
        remaining.retain(|l| !lpns.contains(l));
        pallets.push(declare_pallet(prompter, number, lpns)?);

        if remaining.is_empty() || !prompter.prompt_yes_no(&t("pallet.more"))? {
            break;
        }
    }
    Ok(pallets)
}

/// Weight and box of each loose LPN; bultos numbered 1..n in order.
///
/// "Volver" in the box menu asks the weight of the same LPN again.
fn register_loose_lpns(
    prompter: &mut dyn Prompter,
    lines: &[WmsLine],
    loose: &[String],
    assignments: &AssignmentMap,
    boxes: &[BoxType],
) -> PromptResult<(Vec<BultoRow>, Vec<Position>)> {
    let counts = lines_per_lpn(lines);
    let mut rows = Vec::with_capacity(loose.len());
    let mut positions = Vec::new();

    for (idx, lpn) in loose.iter().enumerate() {
        let number = idx + 1;
        let n_lines = counts
            .iter()
            .find(|(l, _)| l == lpn)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        prompter.clear();
        prompter.show(&t_with_args(
            "box.processing",
            &[("lpn", lpn), ("n", &n_lines.to_string())],
        ));

        let (weight_kg, box_type) = loop {
            let weight = prompter.prompt_number(&t_with_args("box.weight", &[("lpn", lpn)]))?;
            match pick_box(prompter, boxes, lpn)? {
                Step::Done(b) => break (weight, b),
                Step::Back => continue,
            }
        };

        let unit = loose_unit(lpn, weight_kg, &box_type);
        rows.push(bulto_row(number, unit.weight_kg, unit.height_cm, unit.length_cm, unit.width_cm));
        positions.extend(positions_for_lpn(lines, lpn, assignments, number));
    }

    if loose.is_empty() {
        warn!("every LPN is palletized, bultos files will be empty");
    }
    Ok((rows, positions))
}

fn print_guides(
    prompter: &mut dyn Prompter,
    catalog: &ItemCatalog,
    pallets: (&[Position], &[String]),
    loose: (&[Position], &[String]),
) {
    let mut printed = false;
    for (kind, (positions, lpns)) in [(ShipmentKind::Pallet, pallets), (ShipmentKind::Bulto, loose)] {
        if positions.is_empty() {
            continue;
        }
        let guide = material_guide(kind.guide_title(), positions, lpns, catalog);
        show_lines(prompter, &guide.render());
        printed = true;
    }
    if !printed {
        prompter.show(&t("guide.nothing"));
    }
}
