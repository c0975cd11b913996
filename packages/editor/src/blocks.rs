//! # Block-List Operations
//!
//! Structural edits to a bio's block list, plus snapshot history for
//! undo/redo.
//!
//! Every operation returns a new list and reuses the `Arc` of each block it
//! does not touch, so the render cache keeps hitting for those blocks.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = BlockHistory::new();
//! let op = BlockOp::Add { block_type: BlockType::Button, index: None };
//!
//! let next = op.apply(&blocks)?;
//! history.record(blocks, op.describe());
//! blocks = next;
//!
//! // Undo
//! if let Some(previous) = history.undo(blocks.clone()) {
//!     blocks = previous;
//! }
//! ```

use crate::errors::BlockOpError;
use portyo_model::{Block, BlockType, Fields};
use std::sync::Arc;

pub const DEFAULT_HISTORY_LEVELS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockOp {
    /// New block of `block_type` with its default fields. Appended when
    /// `index` is `None`.
    Add {
        block_type: BlockType,
        index: Option<usize>,
    },
    Insert { block: Block, index: Option<usize> },
    Remove { id: String },
    /// Merge `patch` into the block's fields.
    Update { id: String, patch: Fields },
    Move { from: usize, to: usize },
}

impl BlockOp {
    pub fn apply(&self, blocks: &[Arc<Block>]) -> Result<Vec<Arc<Block>>, BlockOpError> {
        let mut next = blocks.to_vec();

        match self {
            BlockOp::Add { block_type, index } => {
                let at = insertion_index(*index, next.len())?;
                next.insert(at, Arc::new(Block::new(*block_type)));
            }
            BlockOp::Insert { block, index } => {
                if next.iter().any(|b| b.id() == block.id()) {
                    return Err(BlockOpError::DuplicateId(block.id().to_string()));
                }
                let at = insertion_index(*index, next.len())?;
                next.insert(at, Arc::new(block.clone()));
            }
            BlockOp::Remove { id } => {
                let at = position(&next, id)?;
                next.remove(at);
            }
            BlockOp::Update { id, patch } => {
                let at = position(&next, id)?;
                next[at] = Arc::new(next[at].with_fields(patch));
            }
            BlockOp::Move { from, to } => {
                let len = next.len();
                for index in [*from, *to] {
                    if index >= len {
                        return Err(BlockOpError::OutOfBounds { index, len });
                    }
                }
                let block = next.remove(*from);
                next.insert(*to, block);
            }
        }

        Ok(next)
    }

    /// Short label for history entries and logs.
    pub fn describe(&self) -> String {
        match self {
            BlockOp::Add { block_type, .. } => format!("Add {}", block_type),
            BlockOp::Insert { block, .. } => format!("Insert {}", block.type_name()),
            BlockOp::Remove { id } => format!("Remove {}", id),
            BlockOp::Update { id, .. } => format!("Update {}", id),
            BlockOp::Move { from, to } => format!("Move {} to {}", from, to),
        }
    }
}

fn insertion_index(index: Option<usize>, len: usize) -> Result<usize, BlockOpError> {
    match index {
        None => Ok(len),
        Some(index) if index <= len => Ok(index),
        Some(index) => Err(BlockOpError::OutOfBounds { index, len }),
    }
}

fn position(blocks: &[Arc<Block>], id: &str) -> Result<usize, BlockOpError> {
    blocks
        .iter()
        .position(|b| b.id() == id)
        .ok_or_else(|| BlockOpError::NotFound(id.to_string()))
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    blocks: Vec<Arc<Block>>,
    description: Option<String>,
}

/// Undo/redo over block-list snapshots.
#[derive(Debug)]
pub struct BlockHistory {
    /// Lists before each recorded op (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Lists replaced by undo (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl BlockHistory {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the list as it was before an op.
    pub fn record(&mut self, before: Vec<Arc<Block>>, description: impl Into<String>) {
        self.undo_stack.push(HistoryEntry {
            blocks: before,
            description: Some(description.into()),
        });

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // A new op invalidates the redo branch
        self.redo_stack.clear();
    }

    /// Step back. `current` becomes the redo target.
    pub fn undo(&mut self, current: Vec<Arc<Block>>) -> Option<Vec<Arc<Block>>> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            blocks: current,
            description: entry.description.clone(),
        });
        Some(entry.blocks)
    }

    /// Step forward again. `current` becomes the undo target.
    pub fn redo(&mut self, current: Vec<Arc<Block>>) -> Option<Vec<Arc<Block>>> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            blocks: current,
            description: entry.description.clone(),
        });
        Some(entry.blocks)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for BlockHistory {
    fn default() -> Self {
        Self::new()
    }
}
