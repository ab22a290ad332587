// ==========================================
// Logistica ASN - item catalog repositories
// ==========================================
// JSON: data/coditem_db.json (pretty, non-ASCII kept)
// SQLite: item_catalog table in data/logistica.db
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::catalog::{ItemCatalog, ItemRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

// ==========================================
// ItemCatalogRepository trait
// ==========================================
pub trait ItemCatalogRepository {
    /// Loads the whole catalog. A missing store yields an empty catalog.
    fn load(&self) -> RepositoryResult<ItemCatalog>;

    /// Replaces the stored catalog.
    fn save(&self, catalog: &ItemCatalog) -> RepositoryResult<()>;
}

// ==========================================
// JsonItemCatalogRepository
// ==========================================
pub struct JsonItemCatalogRepository {
    path: PathBuf,
}

impl JsonItemCatalogRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemCatalogRepository for JsonItemCatalogRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> RepositoryResult<ItemCatalog> {
        if !self.path.exists() {
            return Ok(ItemCatalog::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| RepositoryError::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(ItemCatalog::new());
        }
        let catalog: ItemCatalog =
            serde_json::from_str(&content).map_err(|e| RepositoryError::json(&self.path, e))?;
        debug!(items = catalog.len(), "item catalog loaded");
        Ok(catalog)
    }

    #[instrument(skip(self, catalog), fields(path = %self.path.display(), items = catalog.len()))]
    fn save(&self, catalog: &ItemCatalog) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(catalog).map_err(|e| RepositoryError::json(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| RepositoryError::io(&self.path, e))
    }
}

// ==========================================
// SqliteItemCatalogRepository
// ==========================================
pub struct SqliteItemCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteItemCatalogRepository {
    /// Opens the database and creates the schema when missing.
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Builds the repository on an existing connection (schema must exist).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl ItemCatalogRepository for SqliteItemCatalogRepository {
    #[instrument(skip(self))]
    fn load(&self) -> RepositoryResult<ItemCatalog> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT coditem, nom_item, material, n_item, nro_parte FROM item_catalog ORDER BY coditem",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                ItemRecord {
                    nom_item: row.get(1)?,
                    material: row.get(2)?,
                    n_item: row.get(3)?,
                    nro_parte: row.get(4)?,
                },
            ))
        })?;

        let mut catalog = ItemCatalog::new();
        for row in rows {
            let (cod_item, record) = row?;
            catalog.upsert(cod_item, record);
        }
        debug!(items = catalog.len(), "item catalog loaded");
        Ok(catalog)
    }

    #[instrument(skip(self, catalog), fields(items = catalog.len()))]
    fn save(&self, catalog: &ItemCatalog) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM item_catalog", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO item_catalog (coditem, nom_item, material, n_item, nro_parte) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (cod_item, record) in catalog.iter() {
                stmt.execute(params![
                    cod_item,
                    record.nom_item,
                    record.material,
                    record.n_item,
                    record.nro_parte,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog.upsert(
            "1001",
            ItemRecord {
                nom_item: "VÁLVULA ÑANDÚ".to_string(),
                material: Some("M-1".to_string()),
                n_item: Some(10),
                nro_parte: Some("NP-1".to_string()),
            },
        );
        catalog.upsert(
            "1002",
            ItemRecord {
                nom_item: "TUERCA".to_string(),
                ..Default::default()
            },
        );
        catalog
    }

    #[test]
    fn test_json_repository_keeps_non_ascii() {
        let dir = TempDir::new().unwrap();
        let repo = JsonItemCatalogRepository::new(dir.path().join("coditem_db.json"));
        assert!(repo.load().unwrap().is_empty());

        repo.save(&sample()).unwrap();
        let text = fs::read_to_string(repo.path()).unwrap();
        assert!(text.contains("VÁLVULA ÑANDÚ"));
        assert!(text.contains("  \"1001\""));
        assert_eq!(repo.load().unwrap(), sample());
    }

    #[test]
    fn test_json_repository_reports_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coditem_db.json");
        fs::write(&path, "{ no es json").unwrap();
        let err = JsonItemCatalogRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, RepositoryError::Json { .. }));
    }

    #[test]
    fn test_sqlite_repository_save_replaces() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("logistica.db");
        let repo = SqliteItemCatalogRepository::new(db_path.to_str().unwrap()).unwrap();

        repo.save(&sample()).unwrap();
        assert_eq!(repo.load().unwrap(), sample());

        let mut smaller = ItemCatalog::new();
        smaller.upsert("9", ItemRecord::default());
        repo.save(&smaller).unwrap();
        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains("9"));
    }
}
