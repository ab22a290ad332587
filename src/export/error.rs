// ==========================================
// Logistica ASN - export error types
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Error escribiendo Excel {path}: {message}")]
    XlsxWrite { path: String, message: String },

    #[error("Plantilla inválida {path}: {message}")]
    Template { path: String, message: String },

    #[error("Error de E/S: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

/// Result alias
pub type ExportResult<T> = Result<T, ExportError>;
