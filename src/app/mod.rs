// ==========================================
// Logistica ASN - application layer
// ==========================================
// Responsibility: terminal menus around the client processes
// ==========================================

pub mod asn_menu;
pub mod box_menu;
pub mod client_menu;
pub mod state;

use crate::clients::ProcessError;
use crate::export::error::ExportError;
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::prompt::{PromptError, Prompter, Selection};
use crate::repository::error::RepositoryError;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

pub use state::{get_default_data_dir, AppPaths, AppState};

// ==========================================
// AppError
// ==========================================
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("Error de configuración: {0}")]
    Config(String),
}

impl From<Box<dyn std::error::Error>> for AppError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Main menu loop until "Salir".
///
/// Errors of a single option are reported and the menu shown again; a closed
/// input (Ctrl-D) ends the session.
pub fn run_main_menu(
    state: &AppState,
    prompter: &mut dyn Prompter,
    wms_file: Option<&Path>,
) -> AppResult<()> {
    let options = vec![t("menu.boxes"), t("menu.client"), t("menu.asn"), t("menu.exit")];
    loop {
        prompter.show(&t("menu.title"));
        let choice = match prompter.prompt_choice(&t("menu.choose"), &options) {
            Ok(choice) => choice,
            Err(PromptError::Cancelled) => break,
            Err(e) => return Err(e.into()),
        };
        let result = match choice {
            Selection::Item(0) => box_menu::run_box_menu(&state.box_repo, prompter),
            Selection::Item(1) => client_menu::run_client_menu(state, prompter, wms_file),
            Selection::Item(2) => asn_menu::run_asn_menu(&state.config, prompter),
            Selection::Item(_) | Selection::Exit => break,
            Selection::Back => continue,
        };

        match result {
            Ok(()) => {}
            Err(AppError::Prompt(PromptError::Cancelled)) => break,
            Err(e) => {
                error!(error = %e, "menu option failed");
                prompter.show(&t_with_args("menu.failed", &[("error", &e.to_string())]));
            }
        }
    }
    info!("session finished");
    prompter.show(&t("menu.bye"));
    Ok(())
}
