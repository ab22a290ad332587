// ==========================================
// Logistica ASN - SQLite connection setup
// ==========================================
// Every Connection::open goes through here so PRAGMAs and
// busy_timeout are applied the same way everywhere
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Tables used by the configuration manager and the SQLite item catalog.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS config_scope (
    scope_id   TEXT PRIMARY KEY,
    scope_type TEXT NOT NULL
);

INSERT OR IGNORE INTO config_scope (scope_id, scope_type) VALUES ('global', 'GLOBAL');

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id   TEXT NOT NULL REFERENCES config_scope(scope_id),
    key        TEXT NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS item_catalog (
    coditem   TEXT PRIMARY KEY,
    nom_item  TEXT NOT NULL DEFAULT '',
    material  TEXT,
    n_item    INTEGER,
    nro_parte TEXT
);
"#;

/// Applies the shared PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Opens a SQLite connection with the shared configuration.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Creates the tables when missing (idempotent).
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let scopes: i64 = conn
            .query_row("SELECT COUNT(*) FROM config_scope", [], |row| row.get(0))
            .unwrap();
        assert_eq!(scopes, 1);
    }
}
