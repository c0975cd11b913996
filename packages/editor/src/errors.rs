//! Error types for the editor

use portyo_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Block operation failed: {0}")]
    BlockOp(#[from] BlockOpError),

    #[error("Commit failed: {0}")]
    Persist(#[from] PersistError),

    #[error("Edit session has been torn down")]
    TornDown,

    #[error("Edit session driver stopped unexpectedly")]
    DriverGone,
}

/// Failure reported by a [`Persistence`](crate::Persistence) backend.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored bio is invalid: {0}")]
    Model(#[from] ModelError),

    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Failure producing the HTML snapshot for a commit.
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("HTML compilation failed: {0}")]
    Compile(#[from] portyo_compiler_html::CompileError),

    #[error("Serialization failed: {0}")]
    Other(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockOpError {
    #[error("Block '{0}' not found")]
    NotFound(String),

    #[error("Index {index} out of bounds for {len} blocks")]
    OutOfBounds { index: usize, len: usize },

    #[error("Block id '{0}' already exists")]
    DuplicateId(String),
}
