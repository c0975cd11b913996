//! # Portyo Renderer
//!
//! Block composition and rendering engine for bio pages.
//!
//! ```text
//!   &[Arc<Block>] + &Bio
//!          │
//!          ▼
//!   ┌──────────────┐   resolve(kind)   ┌──────────────┐
//!   │   Pipeline   │ ────────────────▶ │   Registry   │  eager: always ready
//!   │  (memo cache)│ ◀──────────────── │              │  lazy:  OnceCell per type
//!   └──────────────┘    Resolution     └──────────────┘
//!          │ renderer(block, ctx) -> BlockBody
//!          │ + composed_style(block)
//!          ▼
//!   RenderTree { nodes: Vec<Arc<VNode>>, pending }
//! ```
//!
//! Renderers never read ambient state: page-level defaults arrive through
//! [`BlockContext`], derived once per pass from the [`portyo_model::Bio`].

pub mod blocks;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod style;
pub mod vdom;

#[cfg(test)]
mod tests_pipeline;

#[cfg(test)]
mod tests_registry;

pub use blocks::{renderer_for, BlockBody, RenderFn};
pub use context::{BlockContext, RenderMode};
pub use error::{LoadError, LoadResult};
pub use pipeline::{Pipeline, RenderStats, RenderTree};
pub use registry::{BuiltinLoader, ModuleLoader, Registry, Resolution};
pub use style::{
    animation_style, composed_style, entrance_style, wrapper_style, AnimationDecl, AnimationKind,
    StyleDescriptor,
};
pub use vdom::VNode;
