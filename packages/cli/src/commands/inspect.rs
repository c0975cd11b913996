use super::read_bio;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use portyo_model::{Bio, Tier};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Bio JSON file
    pub bio: PathBuf,
}

/// One row of the block listing.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRow {
    pub index: usize,
    pub id: String,
    pub type_name: String,
    /// `None` for unrecognized types
    pub tier: Option<Tier>,
}

pub fn block_rows(bio: &Bio) -> Vec<BlockRow> {
    bio.blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| BlockRow {
            index,
            id: block.id().to_string(),
            type_name: block.type_name().to_string(),
            tier: block.block_type().map(|ty| ty.tier()),
        })
        .collect()
}

pub fn inspect(args: InspectArgs, _cwd: &Path) -> Result<()> {
    let bio = read_bio(&args.bio)?;
    let rows = block_rows(&bio);

    println!("{} {}", "Bio".bright_blue().bold(), bio.id());
    println!("{} blocks", rows.len());
    println!();

    let mut unrecognized = 0;
    for row in &rows {
        let tier = match row.tier {
            Some(Tier::Eager) => "eager".green(),
            Some(Tier::Lazy) => "lazy".cyan(),
            None => {
                unrecognized += 1;
                "unrecognized".red()
            }
        };
        println!("  {:>3}  {:<38} {:<16} {}", row.index, row.id, row.type_name, tier);
    }

    if unrecognized > 0 {
        println!();
        println!(
            "{} {} block(s) will not render",
            "⚠️".yellow(),
            unrecognized
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_flag_tiers() {
        let bio = Bio::from_value(json!({
            "id": "bio-1",
            "blocks": [
                { "id": "a", "type": "text" },
                { "id": "b", "type": "whatsapp" },
                { "id": "c", "type": "hologram" }
            ]
        }))
        .unwrap();

        let rows = block_rows(&bio);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tier, Some(Tier::Eager));
        assert_eq!(rows[1].tier, Some(Tier::Lazy));
        assert_eq!(rows[2].tier, None);
        assert_eq!(rows[2].type_name, "hologram");
    }
}
