//! # Portyo Editor
//!
//! Draft/commit synchronization for bio pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditSession: field edits + block ops        │
//! │  - optimistic draft, block undo/redo        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Synchronizer: pure state machine            │
//! │  - debounce window, sequencing, stale acks  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ driver task: timer, Serializer, Persistence │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Edits land on the draft immediately and accumulate into one pending
//! payload. When the debounce window closes the payload is committed along
//! with a freshly rendered HTML snapshot. The canonical bio only moves when
//! the backend acknowledges a commit newer than the last one it
//! acknowledged.

mod blocks;
mod collaborators;
mod config;
mod errors;
mod session;
mod sync;

pub use blocks::{BlockHistory, BlockOp, DEFAULT_HISTORY_LEVELS};
pub use collaborators::{HtmlSnapshotSerializer, Persistence, Serializer};
pub use config::{DebounceClass, SyncConfig, DEFAULT_DELAY_MS, DEFAULT_RANGE_DELAY_MS};
pub use errors::{BlockOpError, EditorError, PersistError, SerializeError};
pub use session::{EditSession, EditSessionBuilder};
pub use sync::{
    CommitOutcome, CommitRequest, Effect, Phase, SyncEvent, SyncStats, SyncStatus, Synchronizer,
};
