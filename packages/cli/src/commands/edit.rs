use super::read_bio;
use crate::config::Config;
use crate::store::JsonFileStore;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use portyo_editor::{BlockOp, EditSession};
use portyo_model::BlockType;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Bio JSON file, rewritten in place
    pub bio: PathBuf,

    /// Set a field: `name=value`, value as JSON or a bare string
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Set a slider field (longer debounce window)
    #[arg(long = "range", value_name = "FIELD=VALUE")]
    pub range: Vec<String>,

    /// Append a block of this type with default fields
    #[arg(long = "add", value_name = "TYPE")]
    pub add: Vec<String>,

    /// Remove the block with this id
    #[arg(long = "remove", value_name = "ID")]
    pub remove: Vec<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.set.is_empty() && self.range.is_empty() && self.add.is_empty() && self.remove.is_empty()
    }
}

/// Split `name=value`. The value is parsed as JSON when possible so
/// `--set bgColor=#111` and `--set blurIntensity=8` both work.
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing field name in '{}'", raw);
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

pub fn edit(args: EditArgs, cwd: &Path) -> Result<()> {
    if args.is_empty() {
        bail!("Nothing to edit: pass --set, --range, --add or --remove");
    }

    let config = Config::load(cwd)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(args, config))
}

async fn run(args: EditArgs, config: Config) -> Result<()> {
    let bio = read_bio(&args.bio)?;
    let store = Arc::new(JsonFileStore::new(&args.bio));
    let session = EditSession::builder(bio, store).config(config.editor).spawn();

    for raw in &args.set {
        let (name, value) = parse_assignment(raw)?;
        session.update_field(&name, value)?;
    }
    for raw in &args.range {
        let (name, value) = parse_assignment(raw)?;
        session.update_range_field(&name, value)?;
    }
    for type_name in &args.add {
        let block_type: BlockType = type_name
            .parse()
            .map_err(|_| anyhow!("Unknown block type '{}'", type_name))?;
        session.apply_block_op(BlockOp::Add {
            block_type,
            index: None,
        })?;
    }
    for id in &args.remove {
        session.apply_block_op(BlockOp::Remove { id: id.clone() })?;
    }

    let seq = session.flush().await?;
    let bio = session.canonical();
    session.teardown();

    match seq {
        Some(seq) => println!(
            "{} Saved commit #{} for {} ({} blocks) → {}",
            "✓".green(),
            seq,
            bio.id(),
            bio.blocks().len(),
            args.bio.display()
        ),
        None => println!("{}", "No changes to save".dimmed()),
    }

    Ok(())
}
