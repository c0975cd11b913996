use portyo_model::BlockType;
use thiserror::Error;

pub type LoadResult<T> = Result<T, LoadError>;

/// Failure to load a lazy-tier renderer module.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("'{0}' is an eager block type and has no lazy module")]
    NotLazy(BlockType),

    #[error("no module available for block type '{0}'")]
    ModuleMissing(BlockType),

    #[error("loading module for '{block_type}' failed: {message}")]
    Failed {
        block_type: BlockType,
        message: String,
    },
}

impl LoadError {
    pub fn block_type(&self) -> BlockType {
        match self {
            LoadError::NotLazy(ty) | LoadError::ModuleMissing(ty) => *ty,
            LoadError::Failed { block_type, .. } => *block_type,
        }
    }
}
