// ==========================================
// Logistica ASN - box catalog menu
// ==========================================
// List / add / edit / delete box types in data/cajas.txt
// Edit: a blank answer keeps the current value
// ==========================================

use crate::app::AppResult;
use crate::domain::catalog::{BoxCatalog, BoxChanges, BoxType};
use crate::i18n::{t, t_with_args};
use crate::importer::text_cleaner::parse_number;
use crate::prompt::{PromptResult, Prompter, Selection};
use crate::repository::box_catalog_repo::BoxCatalogRepository;
use tracing::info;

/// Box menu loop; returns on "Volver" or "Salir".
pub fn run_box_menu(repo: &dyn BoxCatalogRepository, prompter: &mut dyn Prompter) -> AppResult<()> {
    let options = vec![
        t("boxes.list"),
        t("boxes.add"),
        t("boxes.edit"),
        t("boxes.delete"),
    ];
    loop {
        let mut catalog = repo.load()?;
        let changed = match prompter.prompt_choice(&t("boxes.title"), &options)? {
            Selection::Item(0) => {
                list_boxes(prompter, &catalog);
                false
            }
            Selection::Item(1) => add_box(prompter, &mut catalog)?,
            Selection::Item(2) => edit_box(prompter, &mut catalog)?,
            Selection::Item(_) => delete_box(prompter, &mut catalog)?,
            Selection::Back | Selection::Exit => return Ok(()),
        };
        if changed {
            repo.save(&catalog)?;
            info!(boxes = catalog.len(), "box catalog saved");
            prompter.show(&t("boxes.saved"));
        }
    }
}

fn list_boxes(prompter: &mut dyn Prompter, catalog: &BoxCatalog) {
    if catalog.is_empty() {
        prompter.show(&t("boxes.empty"));
        return;
    }
    for b in catalog.sorted_by_code() {
        prompter.show(&format!("{} | {}", b.code, b.menu_label()));
    }
}

fn add_box(prompter: &mut dyn Prompter, catalog: &mut BoxCatalog) -> PromptResult<bool> {
    let code = prompter.prompt_no_spaces(&t("boxes.code"))?;
    if catalog.find(&code).is_some() {
        prompter.show(&t_with_args("boxes.duplicate", &[("code", &code)]));
        return Ok(false);
    }
    let name = loop {
        let name = prompter.prompt_text(&t("boxes.name"))?;
        if !name.is_empty() {
            break name;
        }
        prompter.show(&t("prompt.no_spaces"));
    };
    let height_cm = prompter.prompt_number(&t("boxes.height"))?;
    let length_cm = prompter.prompt_number(&t("boxes.length"))?;
    let width_cm = prompter.prompt_number(&t("boxes.width"))?;

    catalog.add(BoxType {
        code,
        name,
        height_cm,
        length_cm,
        width_cm,
    });
    Ok(true)
}

/// Box picked from the sorted list, `None` on "Volver" / "Salir".
fn choose_box(prompter: &mut dyn Prompter, catalog: &BoxCatalog) -> PromptResult<Option<BoxType>> {
    if catalog.is_empty() {
        prompter.show(&t("boxes.empty"));
        return Ok(None);
    }
    let sorted = catalog.sorted_by_code();
    let labels: Vec<String> = sorted
        .iter()
        .map(|b| format!("{} | {}", b.code, b.menu_label()))
        .collect();
    Ok(match prompter.prompt_choice(&t("boxes.choose"), &labels)? {
        Selection::Item(i) => Some(sorted[i].clone()),
        Selection::Back | Selection::Exit => None,
    })
}

/// Blank keeps the value; otherwise retried until numeric.
fn optional_number(prompter: &mut dyn Prompter, message: &str) -> PromptResult<Option<f64>> {
    loop {
        let value = prompter.prompt_text(message)?;
        if value.is_empty() {
            return Ok(None);
        }
        match parse_number(&value) {
            Some(n) => return Ok(Some(n)),
            None => prompter.show(&t("prompt.invalid_number")),
        }
    }
}

fn edit_box(prompter: &mut dyn Prompter, catalog: &mut BoxCatalog) -> PromptResult<bool> {
    let Some(current) = choose_box(prompter, catalog)? else {
        return Ok(false);
    };
    let keep = |v: String| format!("{} [{}]: ", v, t("boxes.keep"));

    let name = prompter.prompt_text(&keep(t_with_args("boxes.name_current", &[("v", &current.name)])))?;
    let changes = BoxChanges {
        name: Some(name).filter(|n| !n.is_empty()),
        height_cm: optional_number(
            prompter,
            &keep(t_with_args("boxes.height_current", &[("v", &current.height_cm.to_string())])),
        )?,
        length_cm: optional_number(
            prompter,
            &keep(t_with_args("boxes.length_current", &[("v", &current.length_cm.to_string())])),
        )?,
        width_cm: optional_number(
            prompter,
            &keep(t_with_args("boxes.width_current", &[("v", &current.width_cm.to_string())])),
        )?,
    };

    if changes.is_empty() {
        prompter.show(&t("boxes.unchanged"));
        return Ok(false);
    }
    Ok(catalog.edit(&current.code, &changes))
}

fn delete_box(prompter: &mut dyn Prompter, catalog: &mut BoxCatalog) -> PromptResult<bool> {
    let Some(target) = choose_box(prompter, catalog)? else {
        return Ok(false);
    };
    if !prompter.prompt_yes_no(&t_with_args("boxes.confirm_delete", &[("code", &target.code)]))? {
        return Ok(false);
    }
    Ok(catalog.remove(&target.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use crate::repository::box_catalog_repo::PipeFileBoxCatalogRepository;
    use tempfile::TempDir;

    #[test]
    fn test_add_edit_delete_box() {
        let dir = TempDir::new().unwrap();
        let repo = PipeFileBoxCatalogRepository::new(dir.path().join("cajas.txt"));

        // add C2, edit its height only, add C1, delete C2, back
        let mut p = ScriptedPrompter::new([
            "2", "C2", "CAJA GRANDE", "40", "60", "50",
            "3", "1", "", "45", "", "",
            "2", "C1", "CAJA CHICA", "10", "20", "15",
            "4", "2", "s",
            "v",
        ]);
        run_box_menu(&repo, &mut p).unwrap();

        let catalog = repo.load().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("C2").is_none());
        assert_eq!(catalog.find("C1").unwrap().width_cm, 15.0);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let dir = TempDir::new().unwrap();
        let repo = PipeFileBoxCatalogRepository::new(dir.path().join("cajas.txt"));
        let mut p = ScriptedPrompter::new(["2", "C2", "CAJA", "40", "60", "50", "3", "1", "", "45", "", "", "x"]);
        run_box_menu(&repo, &mut p).unwrap();

        let b = repo.load().unwrap().find("C2").cloned().unwrap();
        assert_eq!(b.name, "CAJA");
        assert_eq!(b.height_cm, 45.0);
        assert_eq!(b.length_cm, 60.0);
    }
}
