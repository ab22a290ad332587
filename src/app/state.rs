// ==========================================
// Logistica ASN - application state
// ==========================================
// Paths, configuration and repositories shared by the menus
// ==========================================

use crate::config::config_manager::ConfigManager;
use crate::config::settings_reader::SettingsReader;
use crate::domain::types::ItemStore;
use crate::repository::box_catalog_repo::PipeFileBoxCatalogRepository;
use crate::repository::client_repo::JsonClientRepository;
use crate::repository::item_catalog_repo::{
    ItemCatalogRepository, JsonItemCatalogRepository, SqliteItemCatalogRepository,
};
use std::path::{Path, PathBuf};

pub const BOXES_FILE: &str = "cajas.txt";
pub const ITEMS_FILE: &str = "coditem_db.json";
pub const DB_FILE: &str = "logistica.db";

/// Data and output directories of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AppPaths {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(data_dir: P, output_dir: Q) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn boxes_file(&self) -> PathBuf {
        self.data_dir.join(BOXES_FILE)
    }

    pub fn items_file(&self) -> PathBuf {
        self.data_dir.join(ITEMS_FILE)
    }

    pub fn db_file(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}

/// Default data directory.
///
/// `LOGISTICA_ASN_DATA_DIR` wins when set; otherwise `./data`.
pub fn get_default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("LOGISTICA_ASN_DATA_DIR") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from("data")
}

/// Application state
///
/// Built once at startup and borrowed by every menu.
pub struct AppState {
    pub paths: AppPaths,
    pub config: ConfigManager,
    pub box_repo: PipeFileBoxCatalogRepository,
    pub item_repo: Box<dyn ItemCatalogRepository>,
    pub client_repo: JsonClientRepository,
}

impl AppState {
    /// Opens the configuration database and the repositories.
    ///
    /// # Returns
    /// - Ok(AppState)
    /// - Err(String): initialization error
    pub fn new(paths: AppPaths) -> Result<Self, String> {
        tracing::info!(data_dir = %paths.data_dir.display(), "initializing AppState");

        std::fs::create_dir_all(&paths.data_dir)
            .map_err(|e| format!("No se pudo crear {}: {}", paths.data_dir.display(), e))?;

        let db_path = path_str(&paths.db_file())?;
        let config = ConfigManager::new(&db_path)
            .map_err(|e| format!("No se pudo abrir la configuración: {}", e))?;

        let item_repo: Box<dyn ItemCatalogRepository> = match config
            .item_store()
            .map_err(|e| format!("Configuración inválida: {}", e))?
        {
            ItemStore::Json => Box::new(JsonItemCatalogRepository::new(paths.items_file())),
            ItemStore::Sqlite => Box::new(
                SqliteItemCatalogRepository::new(&db_path)
                    .map_err(|e| format!("No se pudo abrir el catálogo SQLite: {}", e))?,
            ),
        };
        tracing::info!(store = ?config.item_store().ok(), "item catalog backend selected");

        Ok(Self {
            box_repo: PipeFileBoxCatalogRepository::new(paths.boxes_file()),
            client_repo: JsonClientRepository::in_data_dir(&paths.data_dir),
            item_repo,
            config,
            paths,
        })
    }
}

fn path_str(path: &Path) -> Result<String, String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| format!("Ruta no válida: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_state_creates_data_dir_and_db() {
        let dir = TempDir::new().unwrap();
        let paths = AppPaths::new(dir.path().join("data"), dir.path().join("output"));
        let state = AppState::new(paths.clone()).unwrap();
        assert!(paths.db_file().exists());
        assert_eq!(state.box_repo.path(), paths.boxes_file().as_path());
    }
}
