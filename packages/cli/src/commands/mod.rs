pub mod edit;
pub mod inspect;
pub mod render;

pub use edit::{edit, EditArgs};
pub use inspect::{inspect, InspectArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use portyo_model::Bio;
use std::path::Path;

/// Read and decode a bio JSON file.
pub(crate) fn read_bio(path: &Path) -> Result<Bio> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Bio::from_value(value).with_context(|| format!("{} is not a valid bio", path.display()))
}
