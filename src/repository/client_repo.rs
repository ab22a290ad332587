// ==========================================
// Logistica ASN - client registry repository
// ==========================================
// data/client_db.json: list of client records
// data/database_db.json: {"Owners": {"<owner>": ["<client>", ...]}}
// ==========================================

use crate::domain::catalog::{ClientRecord, OwnerDirectory};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

// ==========================================
// ClientRepository trait
// ==========================================
pub trait ClientRepository {
    /// Client records in file order.
    fn load_clients(&self) -> RepositoryResult<Vec<ClientRecord>>;

    /// Owner -> client names directory.
    fn load_owners(&self) -> RepositoryResult<OwnerDirectory>;

    /// Client record at `index` of client_db.json.
    fn client_at(&self, index: usize) -> RepositoryResult<ClientRecord> {
        self.load_clients()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "ClientRecord".to_string(),
                id: index.to_string(),
            })
    }
}

// ==========================================
// JsonClientRepository
// ==========================================
pub struct JsonClientRepository {
    clients_path: PathBuf,
    owners_path: PathBuf,
}

impl JsonClientRepository {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(clients_path: P, owners_path: Q) -> Self {
        Self {
            clients_path: clients_path.into(),
            owners_path: owners_path.into(),
        }
    }

    /// Standard file names inside the data directory.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(
            data_dir.join("client_db.json"),
            data_dir.join("database_db.json"),
        )
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, entity: &str) -> RepositoryResult<T> {
    if !path.exists() {
        return Err(RepositoryError::NotFound {
            entity: entity.to_string(),
            id: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| RepositoryError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| RepositoryError::json(path, e))
}

impl ClientRepository for JsonClientRepository {
    #[instrument(skip(self), fields(path = %self.clients_path.display()))]
    fn load_clients(&self) -> RepositoryResult<Vec<ClientRecord>> {
        read_json(&self.clients_path, "client_db.json")
    }

    #[instrument(skip(self), fields(path = %self.owners_path.display()))]
    fn load_owners(&self) -> RepositoryResult<OwnerDirectory> {
        read_json(&self.owners_path, "database_db.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_clients_and_owners() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("client_db.json"),
            r#"[{"CodCliente": "1", "NomCliente": "A"}, {"CodCliente": "2", "NomCliente": "TOTTUS", "CodSucursal": "10", "NomSucursal": "CD"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("database_db.json"),
            r#"{"Owners": {"JAL": ["Sodimac", "Tottus"], "CSI": ["Codelco"]}}"#,
        )
        .unwrap();

        let repo = JsonClientRepository::in_data_dir(dir.path());
        assert_eq!(repo.client_at(1).unwrap().nom_sucursal, "CD");
        assert!(matches!(repo.client_at(5), Err(RepositoryError::NotFound { .. })));

        let owners = repo.load_owners().unwrap();
        assert_eq!(owners.owner_names(), vec!["CSI".to_string(), "JAL".to_string()]);
        assert_eq!(owners.clients_of("JAL").len(), 2);
        assert!(owners.clients_of("NADIE").is_empty());
    }

    #[test]
    fn test_missing_owner_file() {
        let dir = TempDir::new().unwrap();
        let repo = JsonClientRepository::in_data_dir(dir.path());
        assert!(matches!(repo.load_owners(), Err(RepositoryError::NotFound { .. })));
    }
}
