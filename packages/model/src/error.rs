//! Error types for the data model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Block must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Block is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Block field `{field}` must be a string, got {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },

    #[error("Bio field `blocks` must be an array")]
    BlocksNotArray,

    #[error("Block at index {index}: {source}")]
    InvalidBlock {
        index: usize,
        #[source]
        source: Box<ModelError>,
    },

    #[error("Duplicate block id `{0}`")]
    DuplicateId(String),

    #[error("Bio must be a JSON object")]
    BioNotAnObject,
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
