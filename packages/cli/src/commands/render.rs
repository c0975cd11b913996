use super::read_bio;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use portyo_compiler_html::compile_to_html;
use portyo_model::User;
use portyo_renderer::{Pipeline, Registry, RenderMode};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Bio JSON file
    pub bio: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Profile JSON used for the page title
    #[arg(short, long)]
    pub user: Option<PathBuf>,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,

    /// Render as the editor preview (links and forms inert)
    #[arg(long)]
    pub preview: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let bio = read_bio(&args.bio)?;
    let user = match &args.user {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            Some(serde_json::from_str::<User>(&content)?)
        }
        None => None,
    };

    let mode = if args.preview {
        RenderMode::Preview
    } else {
        RenderMode::Public
    };
    let pipeline = Pipeline::new(Arc::new(Registry::preloaded()), mode);
    let tree = pipeline.render_blocks(bio.blocks(), &bio);

    let skipped = pipeline.stats().skipped;
    if skipped > 0 {
        eprintln!(
            "{} {} block(s) with unrecognized types skipped",
            "⚠️".yellow(),
            skipped
        );
    }

    let mut options = config.render.compile_options();
    if args.compact {
        options.pretty = false;
    }
    let html = compile_to_html(&tree.nodes, &bio, user.as_ref(), options)?;

    match args.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, html)?;
            eprintln!(
                "{} Rendered {} blocks → {}",
                "✓".green(),
                tree.nodes.len(),
                output.display()
            );
        }
        None => println!("{}", html),
    }

    Ok(())
}
