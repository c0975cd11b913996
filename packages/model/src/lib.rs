//! # Portyo Model
//!
//! Data model shared by the renderer, the HTML compiler and the editor.
//!
//! ## Blocks
//!
//! A bio page is an ordered list of blocks. On the wire a block is an open
//! JSON object with an `id`, a `type` discriminator and any number of other
//! fields:
//!
//! ```json
//! { "id": "b1", "type": "button", "title": "Shop", "href": "shop.example",
//!   "blockShadow": "md", "animation": "pulse" }
//! ```
//!
//! [`Block`] keeps the raw field map as the source of truth and exposes two
//! decoded views of it:
//!
//! - [`BlockKind`]: a closed sum type with one variant per supported block
//!   type, plus [`BlockKind::Unrecognized`] for anything else
//! - [`BlockStyle`]: the common style fields every block may carry
//!
//! Decoding is lenient. A missing or wrongly-typed optional field decodes to
//! `None` and is resolved by the consumer's defaults. Unknown fields and
//! unknown block types survive a load/save round trip untouched.
//!
//! ## Bio
//!
//! [`Bio`] owns the block list as `Arc<Block>` so an edit to one block leaves
//! the identity of every other block intact.

mod bio;
mod block;
mod block_type;
mod defaults;
mod error;
mod kinds;
pub mod lenient;
mod style;

pub use bio::{Bio, BioDesign, User};
pub use block::{reconcile_blocks, Block};
pub use block_type::{BlockType, Tier};
pub use error::ModelError;
pub use kinds::*;
pub use style::{Align, AnimationTrigger, BlockStyle, ShadowPreset};

/// Raw JSON field map used on the wire.
pub type Fields = serde_json::Map<String, serde_json::Value>;
