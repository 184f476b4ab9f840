use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("a network scan is already in progress")]
    ScanInProgress,

    #[error("duplicate {collection} id {id}")]
    DuplicateId { collection: &'static str, id: u32 },

    #[error("no {collection} ids left after {last}")]
    IdsExhausted { collection: &'static str, last: u32 },

    #[error("invalid inventory document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
