// ==========================================
// Logistica ASN - repository error types
// ==========================================
// Tool: thiserror derive
// ==========================================

use thiserror::Error;

/// Repository error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Storage errors =====
    #[error("Error de E/S en {path}: {message}")]
    Io { path: String, message: String },

    #[error("JSON inválido en {path}: {message}")]
    Json { path: String, message: String },

    #[error("Error de base de datos: {0}")]
    DatabaseQueryError(String),

    #[error("Bloqueo de base de datos fallido: {0}")]
    LockError(String),

    #[error("Registro no encontrado: {entity} con id={id}")]
    NotFound { entity: String, id: String },

    // ===== Data quality errors =====
    #[error("Validación fallida: {0}")]
    ValidationError(String),

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        RepositoryError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn json(path: impl AsRef<std::path::Path>, err: serde_json::Error) -> Self {
        RepositoryError::Json {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
