// ==========================================
// Logistica ASN - configuration manager
// ==========================================
// Responsibility: load / query / override settings
// Storage: config_kv table (key-value + scope), scope 'global'
// ==========================================

use crate::config::settings_reader::SettingsReader;
use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::order::LabelParty;
use crate::domain::types::ItemStore;
use crate::engine::asn_split::{default_split_rules, SplitRules};
use crate::engine::consolidation::DEFAULT_WEIGHT_TOLERANCE_KG;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Collahuasi large label defaults.
pub const DEFAULT_LABEL_CLIENTE: &str = "COMPAÑIA MINERA DOÑA INES DE COLLAHUASI";
pub const DEFAULT_LABEL_DESTINO: &str = "BODEGA ROSARIO";
pub const DEFAULT_LABEL_PROVEEDOR: &str = "COMERCIAL, SERVICIOS E INGENIERIA CSI SPA";

pub const DEFAULT_LOCALE: &str = "es";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Opens (or creates) the settings database.
    ///
    /// # Arguments
    /// - db_path: database file path
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Builds a ConfigManager on an existing connection.
    ///
    /// The shared PRAGMAs and the schema are applied again (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("lock failed: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
            ensure_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// Settings held in memory only (nothing persisted).
    pub fn in_memory() -> Result<Self, Box<dyn Error>> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// Reads a value from config_kv (scope 'global').
    ///
    /// # Returns
    /// - Some(String): stored value
    /// - None: key not set
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Writes (upserts) a global value.
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// All global settings, for display.
    pub fn get_config_snapshot(&self) -> Result<HashMap<String, String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut config_map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }
        Ok(config_map)
    }
}

// ==========================================
// SettingsReader implementation
// ==========================================
impl SettingsReader for ConfigManager {
    fn weight_tolerance_kg(&self) -> Result<f64, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::WEIGHT_TOLERANCE_KG, "0.5")?;
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => {
                tracing::warn!(
                    config_key = config_keys::WEIGHT_TOLERANCE_KG,
                    raw_value = %value,
                    "invalid weight tolerance, using default"
                );
                Ok(DEFAULT_WEIGHT_TOLERANCE_KG)
            }
        }
    }

    fn locale(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)?;
        match value.trim() {
            "es" | "en" => Ok(value.trim().to_string()),
            _ => Ok(DEFAULT_LOCALE.to_string()),
        }
    }

    fn item_store(&self) -> Result<ItemStore, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::ITEM_STORE, "json")?;
        Ok(ItemStore::from_db_str(&value).unwrap_or(ItemStore::Json))
    }

    fn label_party(&self) -> Result<LabelParty, Box<dyn Error>> {
        Ok(LabelParty {
            client: self.get_config_or_default(config_keys::LABEL_CLIENTE, DEFAULT_LABEL_CLIENTE)?,
            destination: self.get_config_or_default(config_keys::LABEL_DESTINO, DEFAULT_LABEL_DESTINO)?,
            supplier: self
                .get_config_or_default(config_keys::LABEL_PROVEEDOR, DEFAULT_LABEL_PROVEEDOR)?,
        })
    }

    fn asn_split_rules(&self) -> Result<SplitRules, Box<dyn Error>> {
        let Some(value) = self.get_global_config_value(config_keys::ASN_SPLIT_RULES)? else {
            return Ok(default_split_rules());
        };
        let rules: SplitRules = serde_json::from_str(&value).unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::ASN_SPLIT_RULES,
                raw_value = %value,
                "invalid ASN split rules, using defaults"
            );
            default_split_rules()
        });
        Ok(rules)
    }

    fn client_index(&self, client: &str) -> Result<Option<usize>, Box<dyn Error>> {
        let (key, default) = match client.to_lowercase().as_str() {
            "sodimac" => (config_keys::CLIENT_INDEX_SODIMAC, "2"),
            "tottus" => (config_keys::CLIENT_INDEX_TOTTUS, "1"),
            _ => return Ok(None),
        };
        let value = self.get_config_or_default(key, default)?;
        Ok(value.trim().parse::<usize>().ok().or_else(|| default.parse().ok()))
    }
}

// ==========================================
// Configuration keys
// ==========================================
pub mod config_keys {
    // grouping
    pub const WEIGHT_TOLERANCE_KG: &str = "weight_tolerance_kg";

    // operator interface
    pub const LOCALE: &str = "locale";

    // storage
    pub const ITEM_STORE: &str = "item_store"; // json | sqlite

    // Collahuasi large labels
    pub const LABEL_CLIENTE: &str = "collahuasi_label_cliente";
    pub const LABEL_DESTINO: &str = "collahuasi_label_destino";
    pub const LABEL_PROVEEDOR: &str = "collahuasi_label_proveedor";

    // ASN split (JSON: {"<SKU>": <limit>})
    pub const ASN_SPLIT_RULES: &str = "asn_split_rules";

    // client_db.json index of the retail clients
    pub const CLIENT_INDEX_SODIMAC: &str = "client_index_sodimac";
    pub const CLIENT_INDEX_TOTTUS: &str = "client_index_tottus";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConfigManager::in_memory().unwrap();
        assert_eq!(config.weight_tolerance_kg().unwrap(), 0.5);
        assert_eq!(config.locale().unwrap(), "es");
        assert_eq!(config.item_store().unwrap(), ItemStore::Json);
        assert_eq!(config.label_party().unwrap().destination, "BODEGA ROSARIO");
        assert_eq!(config.asn_split_rules().unwrap(), default_split_rules());
        assert_eq!(config.client_index("Sodimac").unwrap(), Some(2));
        assert_eq!(config.client_index("TOTTUS").unwrap(), Some(1));
        assert_eq!(config.client_index("codelco").unwrap(), None);
    }

    #[test]
    fn test_overrides_persist() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("logistica.db");
        let db_path = db_path.to_str().unwrap();

        {
            let config = ConfigManager::new(db_path).unwrap();
            config.set_global_config_value(config_keys::WEIGHT_TOLERANCE_KG, "1.25").unwrap();
            config.set_global_config_value(config_keys::ITEM_STORE, "sqlite").unwrap();
            config
                .set_global_config_value(config_keys::ASN_SPLIT_RULES, r#"{"111": 3}"#)
                .unwrap();
            config.set_global_config_value(config_keys::WEIGHT_TOLERANCE_KG, "1.5").unwrap();
        }

        let config = ConfigManager::new(db_path).unwrap();
        assert_eq!(config.weight_tolerance_kg().unwrap(), 1.5);
        assert_eq!(config.item_store().unwrap(), ItemStore::Sqlite);
        assert_eq!(config.asn_split_rules().unwrap().get("111"), Some(&3));
        assert_eq!(config.get_config_snapshot().unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ConfigManager::in_memory().unwrap();
        config.set_global_config_value(config_keys::WEIGHT_TOLERANCE_KG, "-x").unwrap();
        config.set_global_config_value(config_keys::ASN_SPLIT_RULES, "[1,2").unwrap();
        config.set_global_config_value(config_keys::LOCALE, "zh").unwrap();
        assert_eq!(config.weight_tolerance_kg().unwrap(), 0.5);
        assert_eq!(config.asn_split_rules().unwrap(), default_split_rules());
        assert_eq!(config.locale().unwrap(), "es");
    }
}
