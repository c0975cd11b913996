//! Boundaries the edit session talks to: the HTML serializer, called
//! synchronously for every commit, and the persistence backend.

use crate::errors::{PersistError, SerializeError};
use async_trait::async_trait;
use portyo_compiler_html::{compile_to_html, CompileOptions};
use portyo_model::{Bio, Block, Fields, User};
use portyo_renderer::{Pipeline, Registry, RenderMode};
use std::sync::Arc;

/// Produces the HTML artifact stored alongside each commit.
pub trait Serializer: Send + Sync {
    fn serialize(
        &self,
        blocks: &[Arc<Block>],
        user: Option<&User>,
        bio: &Bio,
    ) -> Result<String, SerializeError>;
}

/// Writes a partial bio update.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Persist `fields` for `bio_id`. Returns the stored bio when the
    /// backend echoes it back.
    async fn persist(&self, bio_id: &str, fields: Fields) -> Result<Option<Bio>, PersistError>;
}

/// Renders blocks with every module preloaded and compiles a static page.
#[derive(Debug)]
pub struct HtmlSnapshotSerializer {
    pipeline: Pipeline,
    options: CompileOptions,
}

impl HtmlSnapshotSerializer {
    pub fn new() -> Self {
        Self::with_options(CompileOptions {
            pretty: false,
            ..CompileOptions::default()
        })
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            pipeline: Pipeline::new(Arc::new(Registry::preloaded()), RenderMode::Public),
            options,
        }
    }
}

impl Default for HtmlSnapshotSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for HtmlSnapshotSerializer {
    fn serialize(
        &self,
        blocks: &[Arc<Block>],
        user: Option<&User>,
        bio: &Bio,
    ) -> Result<String, SerializeError> {
        let tree = self.pipeline.render_blocks(blocks, bio);
        Ok(compile_to_html(&tree.nodes, bio, user, self.options.clone())?)
    }
}
