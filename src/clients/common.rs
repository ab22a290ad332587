// ==========================================
// Logistica ASN - steps shared by the packing processes
// ==========================================
// Pallet declaration, box selection, material validation
// ==========================================

use crate::clients::{ProcessError, ProcessResult};
use crate::config::settings_reader::SettingsReader;
use crate::domain::catalog::{BoxCatalog, BoxType, ItemCatalog};
use crate::domain::unit::{EquivalenceClass, PackedUnit, Pallet};
use crate::engine::consolidation::{dedup_by_id, UnitConsolidator};
use crate::i18n::{t, t_with_args};
use crate::prompt::{MultiSelection, PromptError, PromptResult, Prompter, Selection};
use tracing::{debug, warn};

/// Outcome of a menu that offers "Volver".
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    Done(T),
    Back,
}

/// Fails with a readable message when no box type is registered.
pub fn require_boxes(boxes: &BoxCatalog) -> ProcessResult<Vec<BoxType>> {
    if boxes.is_empty() {
        return Err(ProcessError::MissingData(t("error.no_boxes")));
    }
    Ok(boxes.sorted_by_code())
}

/// Consolidator configured with the stored weight tolerance.
pub fn consolidator(settings: &dyn SettingsReader) -> ProcessResult<UnitConsolidator> {
    Ok(UnitConsolidator::new(settings.weight_tolerance_kg()?))
}

/// ASN lines: deduplicated loose boxes first, then the pallets.
pub fn asn_classes(
    consolidator: &UnitConsolidator,
    boxes: &[PackedUnit],
    pallets: &[Pallet],
) -> Vec<EquivalenceClass> {
    let mut classes = consolidator.group(&dedup_by_id(boxes));
    let pallet_units: Vec<PackedUnit> = pallets.iter().map(Pallet::as_unit).collect();
    classes.extend(consolidator.group(&pallet_units));
    classes
}

/// Multi-select of the LPNs for pallet `number`.
///
/// "Salir" cancels the run.
pub fn select_pallet_lpns(
    prompter: &mut dyn Prompter,
    number: usize,
    remaining: &[String],
) -> PromptResult<Step<Vec<String>>> {
    prompter.clear();
    prompter.show(&t_with_args("pallet.header", &[("n", &number.to_string())]));
    match prompter.prompt_multi_choice(&t("pallet.select_lpns"), remaining)? {
        MultiSelection::Items(indices) => Ok(Step::Done(
            indices.into_iter().map(|i| remaining[i].clone()).collect(),
        )),
        MultiSelection::Back => Ok(Step::Back),
        MultiSelection::Exit => Err(PromptError::Cancelled),
    }
}

/// Asks weight and dimensions of pallet `number`.
pub fn declare_pallet(
    prompter: &mut dyn Prompter,
    number: usize,
    lpns: Vec<String>,
) -> PromptResult<Pallet> {
    let n = number.to_string();
    let weight_kg = prompter.prompt_number(&t_with_args("pallet.weight", &[("n", &n)]))?;
    let height_cm = prompter.prompt_number(&t_with_args("pallet.height", &[("n", &n)]))?;
    let length_cm = prompter.prompt_number(&t_with_args("pallet.length", &[("n", &n)]))?;
    let width_cm = prompter.prompt_number(&t_with_args("pallet.width", &[("n", &n)]))?;

    let pallet = Pallet {
        id: Pallet::id_for(number),
        lpns,
        weight_kg,
        height_cm,
        length_cm,
        width_cm,
    };
    debug!(pallet = %pallet.id, lpns = pallet.lpns.len(), weight_kg, "pallet declared");
    Ok(pallet)
}

/// Box type menu for one LPN. "Salir" cancels the run.
pub fn pick_box(
    prompter: &mut dyn Prompter,
    boxes: &[BoxType],
    lpn: &str,
) -> PromptResult<Step<BoxType>> {
    let labels: Vec<String> = boxes.iter().map(BoxType::menu_label).collect();
    match prompter.prompt_choice(&t_with_args("box.select", &[("lpn", lpn)]), &labels)? {
        Selection::Item(i) => Ok(Step::Done(boxes[i].clone())),
        Selection::Back => Ok(Step::Back),
        Selection::Exit => Err(PromptError::Cancelled),
    }
}

/// Loose box registered for an LPN with the chosen box type.
pub fn loose_unit(lpn: &str, weight_kg: f64, box_type: &BoxType) -> PackedUnit {
    PackedUnit::new(
        lpn,
        weight_kg,
        box_type.name.clone(),
        box_type.height_cm,
        box_type.length_cm,
        box_type.width_cm,
    )
}

/// Material for a CodItem, asked until the operator confirms it.
///
/// A blank answer means "same as CodItem".
pub fn ask_material(prompter: &mut dyn Prompter, cod_item: &str) -> PromptResult<String> {
    loop {
        let typed = prompter.prompt_text(&t_with_args("material.input", &[("cod", cod_item)]))?;
        let material = if typed.is_empty() {
            cod_item.to_string()
        } else {
            typed
        };
        if prompter.prompt_yes_no(&t_with_args("material.confirm", &[("material", &material)]))? {
            return Ok(material);
        }
    }
}

/// Confirms the stored material of a CodItem, or asks a new one.
///
/// The catalog record is created when missing, its NomItem refreshed from the
/// extract, and the confirmed material stored.
pub fn validate_or_update_material(
    prompter: &mut dyn Prompter,
    catalog: &mut ItemCatalog,
    cod_item: &str,
    nom_item: &str,
) -> PromptResult<String> {
    if catalog.refresh_nom_item(cod_item, nom_item) {
        debug!(cod_item, "NomItem refreshed from WMS extract");
    }

    let stored = catalog
        .get(cod_item)
        .and_then(|r| r.material.clone())
        .filter(|m| !m.is_empty());

    let material = match stored {
        Some(material) => {
            prompter.show(&t_with_args("material.found", &[("material", &material)]));
            if prompter.prompt_yes_no(&t("material.is_correct"))? {
                material
            } else {
                let replaced = ask_material(prompter, cod_item)?;
                warn!(cod_item, old = %material, new = %replaced, "material replaced by operator");
                replaced
            }
        }
        None => ask_material(prompter, cod_item)?,
    };

    catalog.entry(cod_item).material = Some(material.clone());
    Ok(material)
}

/// Shows each line of a rendered guide.
pub fn show_lines(prompter: &mut dyn Prompter, lines: &[String]) {
    for line in lines {
        prompter.show(line);
    }
}
