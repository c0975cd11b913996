//! # Block Type Registry
//!
//! Maps a block's decoded kind to its renderer. Types are split into two
//! tiers by [`BlockType::tier`]:
//!
//! - **Eager**: text, heading, button, divider, image. Always available.
//! - **Lazy**: everything else. Each type has its own slot, filled by a
//!   [`ModuleLoader`] the first time the type is requested.
//!
//! Slots are independent `OnceCell`s, so a slow or failing load for one type
//! never holds up another, and concurrent requests for the same type share
//! one load. A failed load leaves its slot empty and is retried on the next
//! request.
//!
//! The pipeline calls [`Registry::request_load`] whenever it meets a pending
//! type, so the first render that needs a module starts loading it in the
//! background and a later render picks it up.

use crate::blocks::{renderer_for, RenderFn};
use crate::error::{LoadError, LoadResult};
use async_trait::async_trait;
use futures::future::join_all;
use portyo_model::{BlockKind, BlockType, Tier};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

/// Source of lazy-tier renderer modules.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, block_type: BlockType) -> LoadResult<RenderFn>;
}

/// Loads lazy modules from the renderers compiled into this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLoader;

#[async_trait]
impl ModuleLoader for BuiltinLoader {
    async fn load(&self, block_type: BlockType) -> LoadResult<RenderFn> {
        match block_type.tier() {
            Tier::Lazy => Ok(renderer_for(block_type)),
            Tier::Eager => Err(LoadError::NotLazy(block_type)),
        }
    }
}

/// Outcome of looking up a block's renderer.
#[derive(Clone, Copy)]
pub enum Resolution {
    /// Eager tier, available synchronously.
    Eager(RenderFn),
    /// Lazy tier whose module has already loaded.
    Loaded(RenderFn),
    /// Lazy tier still waiting for its module.
    Pending(BlockType),
    /// The block's `type` is not one the engine knows.
    Unrecognized,
}

impl Resolution {
    pub fn render_fn(&self) -> Option<RenderFn> {
        match self {
            Resolution::Eager(f) | Resolution::Loaded(f) => Some(*f),
            Resolution::Pending(_) | Resolution::Unrecognized => None,
        }
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Eager(_) => write!(f, "Eager"),
            Resolution::Loaded(_) => write!(f, "Loaded"),
            Resolution::Pending(ty) => write!(f, "Pending({})", ty),
            Resolution::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

pub struct Registry {
    loader: Arc<dyn ModuleLoader>,
    slots: HashMap<BlockType, OnceCell<RenderFn>>,
    /// Types with a background load running
    loading: Mutex<HashSet<BlockType>>,
}

impl Registry {
    /// Registry backed by the builtin renderers, with every lazy slot empty.
    pub fn new() -> Self {
        Self::with_loader(Arc::new(BuiltinLoader))
    }

    pub fn with_loader(loader: Arc<dyn ModuleLoader>) -> Self {
        let slots = BlockType::lazy_types()
            .map(|ty| (ty, OnceCell::new()))
            .collect();
        Self {
            loader,
            slots,
            loading: Mutex::new(HashSet::new()),
        }
    }

    /// Registry with every lazy slot already filled from the builtin
    /// renderers. Used where nothing may suspend, such as static snapshots.
    pub fn preloaded() -> Self {
        let slots = BlockType::lazy_types()
            .map(|ty| (ty, OnceCell::new_with(Some(renderer_for(ty)))))
            .collect();
        Self {
            loader: Arc::new(BuiltinLoader),
            slots,
            loading: Mutex::new(HashSet::new()),
        }
    }

    pub fn resolve(&self, kind: &BlockKind) -> Resolution {
        match kind.block_type() {
            Some(ty) => self.resolve_type(ty),
            None => Resolution::Unrecognized,
        }
    }

    pub fn resolve_type(&self, block_type: BlockType) -> Resolution {
        match block_type.tier() {
            Tier::Eager => Resolution::Eager(renderer_for(block_type)),
            Tier::Lazy => match self.slots.get(&block_type).and_then(OnceCell::get) {
                Some(render) => Resolution::Loaded(*render),
                None => Resolution::Pending(block_type),
            },
        }
    }

    /// Whether `block_type` can render without suspending.
    pub fn is_loaded(&self, block_type: BlockType) -> bool {
        self.resolve_type(block_type).render_fn().is_some()
    }

    /// Load the module for one lazy type. Resolves immediately when the slot
    /// is already filled; joins an in-progress load otherwise.
    #[instrument(skip(self), fields(block_type = %block_type))]
    pub async fn load(&self, block_type: BlockType) -> LoadResult<RenderFn> {
        let Some(slot) = self.slots.get(&block_type) else {
            return Err(LoadError::NotLazy(block_type));
        };

        let render = slot
            .get_or_try_init(|| async {
                debug!("loading renderer module");
                self.loader.load(block_type).await
            })
            .await?;
        Ok(*render)
    }

    /// Start loading `block_type` in the background. Returns `false` when
    /// there is nothing to start: the type is eager or already loaded, a
    /// background load is already running, or there is no tokio runtime to
    /// run one (callers outside a runtime use [`Registry::load`]).
    pub fn request_load(self: &Arc<Self>, block_type: BlockType) -> bool {
        if !self.slots.contains_key(&block_type) || self.is_loaded(block_type) {
            return false;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(%block_type, "no runtime, lazy load left to the caller");
            return false;
        };
        if !self.loading().insert(block_type) {
            return false;
        }

        let registry = Arc::clone(self);
        handle.spawn(async move {
            if let Err(err) = registry.load(block_type).await {
                warn!(%block_type, error = %err, "background lazy load failed");
            }
            registry.loading().remove(&block_type);
        });
        true
    }

    fn loading(&self) -> MutexGuard<'_, HashSet<BlockType>> {
        self.loading.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load several lazy types concurrently. Returns the failures; a failed
    /// type never affects the others.
    #[instrument(skip_all)]
    pub async fn load_all(&self, types: impl IntoIterator<Item = BlockType>) -> Vec<LoadError> {
        let mut seen = HashSet::new();
        let wanted: Vec<BlockType> = types.into_iter().filter(|ty| seen.insert(*ty)).collect();

        let results = join_all(wanted.iter().map(|ty| self.load(*ty))).await;

        results
            .into_iter()
            .filter_map(Result::err)
            .inspect(|err| warn!(block_type = %err.block_type(), error = %err, "lazy load failed"))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut loaded: Vec<_> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(ty, _)| *ty)
            .collect();
        loaded.sort();
        f.debug_struct("Registry").field("loaded", &loaded).finish()
    }
}
