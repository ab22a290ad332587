// ==========================================
// Logistica ASN - importer error types
// ==========================================
// Tool: thiserror derive
// ==========================================

use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato no soportado: {0} (solo .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Error leyendo archivo: {0}")]
    FileReadError(String),

    #[error("Error leyendo Excel: {0}")]
    ExcelParseError(String),

    #[error("Error leyendo CSV: {0}")]
    CsvParseError(String),

    // ===== Mapping errors =====
    #[error("Columna '{0}' no encontrada en el archivo WMS.")]
    MissingColumn(String),

    #[error("Conversión inválida (fila {row}, columna {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("Archivo sin filas de datos: {0}")]
    EmptyFile(String),

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
