// ==========================================
// Logistica ASN - owner / client menu
// ==========================================
// Owner -> client -> WMS file -> registered client process
// ==========================================

use crate::app::state::AppState;
use crate::app::AppResult;
use crate::clients::{process_for, run_client, ClientContext, ClientInput, ProcessOutcome};
use crate::i18n::{t, t_with_args};
use crate::importer::file_parser::UniversalFileParser;
use crate::prompt::{Prompter, Selection};
use crate::repository::box_catalog_repo::BoxCatalogRepository;
use crate::repository::client_repo::ClientRepository;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Runs one client process chosen through the owner directory.
///
/// # Arguments
/// * `wms_file` - WMS extract given on the command line; asked when `None`
pub fn run_client_menu(
    state: &AppState,
    prompter: &mut dyn Prompter,
    wms_file: Option<&Path>,
) -> AppResult<()> {
    let owners = state.client_repo.load_owners()?;
    if owners.is_empty() {
        prompter.show(&t("clients.no_owners"));
        return Ok(());
    }

    let owner_names = owners.owner_names();
    let owner = match prompter.prompt_choice(&t("clients.choose_owner"), &owner_names)? {
        Selection::Item(i) => &owner_names[i],
        Selection::Back | Selection::Exit => return Ok(()),
    };
    let clients = owners.clients_of(owner).to_vec();
    if clients.is_empty() {
        prompter.show(&t_with_args("clients.no_clients", &[("owner", owner)]));
        return Ok(());
    }
    let client = match prompter.prompt_choice(&t("clients.choose_client"), &clients)? {
        Selection::Item(i) => clients[i].clone(),
        Selection::Back | Selection::Exit => return Ok(()),
    };

    let Some(process) = process_for(&client) else {
        prompter.show(&t_with_args("clients.no_process", &[("client", &client)]));
        return Ok(());
    };

    let wms_path = match wms_file {
        Some(path) => path.to_path_buf(),
        None => ask_path(prompter, &t("clients.wms_path"))?,
    };
    info!(owner = %owner, client = %client, wms = %wms_path.display(), "client selected");

    let wms = UniversalFileParser.parse(&wms_path)?;
    let boxes = state.box_repo.load()?;
    let ctx = ClientContext::new(
        state.paths.output_dir.clone(),
        &state.config,
        state.item_repo.as_ref(),
        &state.client_repo,
    );
    let input = ClientInput { wms, boxes };

    match run_client(process.as_ref(), &ctx, &input, prompter) {
        Ok(ProcessOutcome::Completed { outputs }) => {
            prompter.show(&t_with_args(
                "clients.completed",
                &[("client", &client), ("n", &outputs.len().to_string())],
            ));
        }
        Ok(ProcessOutcome::Cancelled) => prompter.show(&t("clients.cancelled")),
        Err(e) => {
            error!(client = %client, error = %e, "client process failed");
            prompter.show(&t_with_args("clients.failed", &[("error", &e.to_string())]));
        }
    }
    Ok(())
}

/// Typed path without surrounding quotes (drag and drop); `None` when blank.
pub fn clean_path(raw: &str) -> Option<PathBuf> {
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(PathBuf::from(cleaned))
    }
}

fn ask_path(prompter: &mut dyn Prompter, message: &str) -> crate::prompt::PromptResult<PathBuf> {
    loop {
        if let Some(path) = clean_path(&prompter.prompt_text(message)?) {
            return Ok(path);
        }
        prompter.show(&t("prompt.no_spaces"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(" '/tmp/wms.csv' "), Some(PathBuf::from("/tmp/wms.csv")));
        assert_eq!(clean_path("\"C:\\a b.xlsx\""), Some(PathBuf::from("C:\\a b.xlsx")));
        assert_eq!(clean_path("  "), None);
    }
}
