// ==========================================
// Logistica ASN - prompt error types
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptError {
    #[error("Error de entrada/salida: {0}")]
    Io(String),

    /// The operator chose "Salir" (or closed the input).
    #[error("Proceso cancelado por el usuario.")]
    Cancelled,

    /// A scripted session ran out of answers.
    #[error("Sin respuesta preparada para: {prompt}")]
    ScriptExhausted { prompt: String },
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::Io(err.to_string())
    }
}

/// Result alias
pub type PromptResult<T> = Result<T, PromptError>;
