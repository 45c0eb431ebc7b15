use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallerError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("No encontrado: {0}")]
    NotFound(String),
    #[error("Error interno: {0}")]
    Internal(String),
}
