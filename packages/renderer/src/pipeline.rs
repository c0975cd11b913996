//! # Render Pipeline
//!
//! Turns an ordered block list into a render tree. For each block:
//!
//! 1. resolve the renderer through the [`Registry`]
//! 2. skip unrecognized types silently
//! 3. emit a placeholder for lazy types whose module is still loading, and
//!    ask the registry to start that load
//! 4. otherwise call the renderer and wrap its body in the block wrapper,
//!    layering base layout, renderer overrides and the composed style
//!
//! Results are memoized per block id. A cached node is reused only when the
//! block is the same `Arc` and the [`BlockContext`] is unchanged, so editing
//! one block never re-renders its siblings.

use crate::blocks::BlockBody;
use crate::registry::{Registry, Resolution};
use crate::style::composed_style;
use crate::{BlockContext, RenderMode, VNode};
use portyo_model::{AnimationTrigger, Bio, Block, BlockType};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

const DEFAULT_WRAPPER_TAG: &str = "section";
const DEFAULT_BLOCK_PADDING: &str = "12px 0";
const PLACEHOLDER_MIN_HEIGHT: &str = "40px";

/// Rendered block list, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderTree {
    pub nodes: Vec<Arc<VNode>>,
    /// Lazy types that rendered as placeholders, each listed once.
    pub pending: Vec<BlockType>,
}

impl RenderTree {
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Renderer invocations.
    pub renders: u64,
    pub cache_hits: u64,
    pub placeholders: u64,
    /// Blocks skipped because their type is unknown.
    pub skipped: u64,
}

struct CacheEntry {
    block: Arc<Block>,
    context: BlockContext,
    node: Arc<VNode>,
}

#[derive(Default)]
struct PipelineState {
    cache: HashMap<String, CacheEntry>,
    stats: RenderStats,
}

enum Rendered {
    Node(Arc<VNode>),
    Placeholder(Arc<VNode>, BlockType),
    Skipped,
}

pub struct Pipeline {
    registry: Arc<Registry>,
    mode: RenderMode,
    state: Mutex<PipelineState>,
}

impl Pipeline {
    pub fn new(registry: Arc<Registry>, mode: RenderMode) -> Self {
        Self {
            registry,
            mode,
            state: Mutex::new(PipelineState::default()),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn stats(&self) -> RenderStats {
        self.lock().stats
    }

    pub fn clear_cache(&self) {
        self.lock().cache.clear();
    }

    /// Render one block. `None` for unrecognized types.
    pub fn render_block(&self, block: &Arc<Block>, ctx: &BlockContext) -> Option<Arc<VNode>> {
        match self.render_one(block, ctx) {
            Rendered::Node(node) | Rendered::Placeholder(node, _) => Some(node),
            Rendered::Skipped => None,
        }
    }

    /// Render a block list against the page defaults of `bio`.
    #[instrument(skip_all, fields(bio_id = %bio.id(), blocks = blocks.len()))]
    pub fn render_blocks(&self, blocks: &[Arc<Block>], bio: &Bio) -> RenderTree {
        let ctx = BlockContext::from_bio(bio, self.mode);
        let mut tree = RenderTree::default();

        for block in blocks {
            match self.render_one(block, &ctx) {
                Rendered::Node(node) => tree.nodes.push(node),
                Rendered::Placeholder(node, ty) => {
                    tree.nodes.push(node);
                    if !tree.pending.contains(&ty) {
                        tree.pending.push(ty);
                    }
                }
                Rendered::Skipped => {}
            }
        }

        let live: HashSet<&str> = blocks.iter().map(|b| b.id()).collect();
        self.lock().cache.retain(|id, _| live.contains(id.as_str()));

        debug!(
            nodes = tree.nodes.len(),
            pending = tree.pending.len(),
            "rendered block list"
        );
        tree
    }

    /// Render, load every pending lazy module, then render again. Types
    /// whose module fails to load stay as placeholders.
    pub async fn render_blocks_loaded(&self, blocks: &[Arc<Block>], bio: &Bio) -> RenderTree {
        let first = self.render_blocks(blocks, bio);
        if first.is_complete() {
            return first;
        }
        self.registry.load_all(first.pending).await;
        self.render_blocks(blocks, bio)
    }

    fn render_one(&self, block: &Arc<Block>, ctx: &BlockContext) -> Rendered {
        let render = match self.registry.resolve(block.kind()) {
            Resolution::Unrecognized => {
                debug!(block_id = block.id(), block_type = block.type_name(), "skipping unknown block type");
                self.lock().stats.skipped += 1;
                return Rendered::Skipped;
            }
            Resolution::Pending(ty) => {
                self.registry.request_load(ty);
                self.lock().stats.placeholders += 1;
                return Rendered::Placeholder(Arc::new(placeholder(block, ty)), ty);
            }
            Resolution::Eager(render) | Resolution::Loaded(render) => render,
        };

        if let Some(node) = self.cached(block, ctx) {
            return Rendered::Node(node);
        }

        // The renderer runs outside the lock.
        let Some(ty) = block.block_type() else {
            return Rendered::Skipped;
        };
        let node = Arc::new(wrap(block, ty, render(block, ctx)));

        let mut state = self.lock();
        state.stats.renders += 1;
        state.cache.insert(
            block.id().to_string(),
            CacheEntry {
                block: Arc::clone(block),
                context: ctx.clone(),
                node: Arc::clone(&node),
            },
        );
        Rendered::Node(node)
    }

    fn cached(&self, block: &Arc<Block>, ctx: &BlockContext) -> Option<Arc<VNode>> {
        let mut state = self.lock();
        let entry = state.cache.get(block.id())?;
        if !Arc::ptr_eq(&entry.block, block) || entry.context != *ctx {
            return None;
        }
        let node = Arc::clone(&entry.node);
        state.stats.cache_hits += 1;
        Some(node)
    }

    fn lock(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("registry", &self.registry)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Keyed stand-in for a block whose lazy module has not loaded yet.
fn placeholder(block: &Block, ty: BlockType) -> VNode {
    VNode::element("div")
        .with_key(block.id())
        .with_attr("data-block-id", block.id())
        .with_attr("data-suspended", ty.as_str())
        .with_style("min-height", PLACEHOLDER_MIN_HEIGHT)
}

/// Outer wrapper: identity attributes plus the layered inline style
/// (base layout < renderer overrides < composed style).
fn wrap(block: &Block, ty: BlockType, body: BlockBody) -> VNode {
    let style = block.style();

    let mut class = format!("bio-block bio-block--{} block-{}", ty.as_str(), block.id());
    if let Some(extra) = &body.class {
        class.push(' ');
        class.push_str(extra);
    }

    let mut styles = BTreeMap::new();
    styles.insert("text-align".to_string(), style.align().as_str().to_string());
    styles.insert("padding".to_string(), DEFAULT_BLOCK_PADDING.to_string());
    styles.extend(body.style);

    let mut composed = composed_style(block);
    let hover_animation = match style.trigger() {
        AnimationTrigger::Hover => composed.take_continuous(),
        AnimationTrigger::Loop | AnimationTrigger::Once => None,
    };
    styles.extend(composed.to_properties());

    let mut node = VNode::element(body.tag.unwrap_or(DEFAULT_WRAPPER_TAG))
        .with_key(block.id())
        .with_attr("class", class)
        .with_attr("data-block-id", block.id())
        .with_attr("data-block-type", ty.as_str())
        .with_styles(styles);
    for (key, value) in body.attributes {
        node = node.with_attr(key, value);
    }
    if let Some(animation) = hover_animation {
        node = node.with_attr("data-hover-animation", animation);
    }
    node.with_children(body.children)
}
