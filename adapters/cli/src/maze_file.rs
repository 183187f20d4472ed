//! Loads maze catalogs from JSON maze files.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use log::info;
use maze_chase_core::MazeDefinition;
use maze_chase_world::MazeCatalog;

/// Maze catalog shipped with the binary.
const BUNDLED_MAZES: &str = include_str!("../assets/mazes.json");

/// Loads the catalog stored at `path`, or the bundled catalog when `None`.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<MazeCatalog> {
    let catalog = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read maze file at {}", path.display()))?;
            parse_catalog(&contents)
                .with_context(|| format!("failed to load mazes from {}", path.display()))?
        }
        None => parse_catalog(BUNDLED_MAZES).context("bundled maze catalog is invalid")?,
    };

    info!("Loaded {} mazes", catalog.len());
    Ok(catalog)
}

/// Parses a JSON array of maze records into a validated catalog.
pub(crate) fn parse_catalog(contents: &str) -> Result<MazeCatalog> {
    let definitions: Vec<MazeDefinition> =
        serde_json::from_str(contents).context("failed to parse maze json contents")?;
    if definitions.is_empty() {
        bail!("maze file contains no mazes");
    }

    let catalog = MazeCatalog::from_definitions(definitions)?;
    Ok(catalog)
}
