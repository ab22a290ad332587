// ==========================================
// Logistica ASN - client processes
// ==========================================
// One process per client, looked up by name (case-insensitive)
// Each process: WMS extract + box catalog + operator answers -> workbooks
// ==========================================

pub mod codelco;
pub mod collahuasi;
pub mod common;
pub mod retail;

use crate::config::settings_reader::SettingsReader;
use crate::domain::catalog::BoxCatalog;
use crate::export::error::ExportError;
use crate::importer::error::ImportError;
use crate::importer::file_parser::RawTable;
use crate::prompt::{PromptError, Prompter};
use crate::repository::client_repo::ClientRepository;
use crate::repository::error::RepositoryError;
use crate::repository::item_catalog_repo::ItemCatalogRepository;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, info_span, warn};
use uuid::Uuid;

pub use codelco::CodelcoProcess;
pub use collahuasi::CollahuasiProcess;
pub use retail::RetailProcess;

// ==========================================
// ProcessError / ProcessOutcome
// ==========================================
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("{0}")]
    MissingData(String),
}

impl From<Box<dyn std::error::Error>> for ProcessError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        ProcessError::Config(err.to_string())
    }
}

/// Result alias
pub type ProcessResult<T> = Result<T, ProcessError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Finished; lists the workbooks written
    Completed { outputs: Vec<PathBuf> },
    /// The operator chose "Salir"
    Cancelled,
}

// ==========================================
// ClientContext - shared dependencies of a run
// ==========================================
pub struct ClientContext<'a> {
    pub output_dir: PathBuf,
    pub settings: &'a dyn SettingsReader,
    pub items: &'a dyn ItemCatalogRepository,
    pub clients: &'a dyn ClientRepository,
    pub run_id: Uuid,
}

impl<'a> ClientContext<'a> {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        settings: &'a dyn SettingsReader,
        items: &'a dyn ItemCatalogRepository,
        clients: &'a dyn ClientRepository,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            settings,
            items,
            clients,
            run_id: Uuid::new_v4(),
        }
    }
}

/// Inputs read before a process starts.
pub struct ClientInput {
    pub wms: RawTable,
    pub boxes: BoxCatalog,
}

// ==========================================
// ClientProcess trait
// ==========================================
pub trait ClientProcess {
    /// Client name as listed in database_db.json.
    fn name(&self) -> &str;

    /// Runs the interactive process.
    ///
    /// "Salir" answers surface as `PromptError::Cancelled`; `run_client`
    /// turns them into `ProcessOutcome::Cancelled`.
    fn run(
        &self,
        ctx: &ClientContext<'_>,
        input: &ClientInput,
        prompter: &mut dyn Prompter,
    ) -> ProcessResult<Vec<PathBuf>>;
}

/// Client names with a registered process.
pub const REGISTERED_CLIENTS: [&str; 4] = ["codelco", "collahuasi", "sodimac", "tottus"];

/// Process registered for a client name (case-insensitive).
pub fn process_for(client: &str) -> Option<Box<dyn ClientProcess>> {
    match client.trim().to_lowercase().as_str() {
        "codelco" => Some(Box::new(CodelcoProcess)),
        "collahuasi" => Some(Box::new(CollahuasiProcess)),
        "sodimac" => Some(Box::new(RetailProcess::sodimac())),
        "tottus" => Some(Box::new(RetailProcess::tottus())),
        _ => None,
    }
}

/// Runs a process inside a span carrying the run id.
pub fn run_client(
    process: &dyn ClientProcess,
    ctx: &ClientContext<'_>,
    input: &ClientInput,
    prompter: &mut dyn Prompter,
) -> ProcessResult<ProcessOutcome> {
    let span = info_span!("client_run", client = process.name(), run_id = %ctx.run_id);
    let _enter = span.enter();

    info!(wms_rows = input.wms.len(), boxes = input.boxes.len(), "client process started");
    match process.run(ctx, input, prompter) {
        Ok(outputs) => {
            info!(outputs = outputs.len(), "client process completed");
            Ok(ProcessOutcome::Completed { outputs })
        }
        Err(ProcessError::Prompt(PromptError::Cancelled)) => {
            warn!("client process cancelled by operator");
            Ok(ProcessOutcome::Cancelled)
        }
        Err(e) => Err(e),
    }
}
