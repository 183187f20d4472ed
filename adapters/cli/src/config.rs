//! Command-line and configuration-file settings for the CLI adapter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_core::MazeId;
use serde::Deserialize;

const DEFAULT_PLAYER: &str = "Player";
const DEFAULT_MAZE: u32 = 1;

/// Escape the maze before the monster catches you.
#[derive(Debug, Default, Parser)]
#[command(name = "maze-chase", version)]
pub(crate) struct Args {
    /// TOML file providing defaults for the remaining options.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// JSON maze catalog; the bundled mazes are used when omitted.
    #[arg(long, value_name = "PATH")]
    pub(crate) mazes: Option<PathBuf>,
    /// Identifier of the maze to play.
    #[arg(long, value_name = "ID")]
    pub(crate) maze: Option<u32>,
    /// Name recorded in the game outcome.
    #[arg(long, value_name = "NAME")]
    pub(crate) player: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    player: Option<String>,
    mazes: Option<PathBuf>,
    maze: Option<u32>,
}

/// Fully resolved settings for a play session.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) player: String,
    pub(crate) mazes: Option<PathBuf>,
    pub(crate) maze: MazeId,
}

impl Settings {
    /// Resolves settings, letting command-line flags override the config file.
    pub(crate) fn resolve(args: Args) -> Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    fn merge(args: Args, file: FileConfig) -> Self {
        Self {
            player: args
                .player
                .or(file.player)
                .unwrap_or_else(|| DEFAULT_PLAYER.to_owned()),
            mazes: args.mazes.or(file.mazes),
            maze: MazeId::new(args.maze.or(file.maze).unwrap_or(DEFAULT_MAZE)),
        }
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let mut config = parse_file_config(&contents)
        .with_context(|| format!("invalid config file at {}", path.display()))?;

    // Maze paths in the file are relative to the file itself.
    if let (Some(mazes), Some(base)) = (config.mazes.as_mut(), path.parent()) {
        if mazes.is_relative() {
            *mazes = base.join(&*mazes);
        }
    }

    Ok(config)
}

fn parse_file_config(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let settings = Settings::resolve(Args::default()).expect("defaults resolve");

        assert_eq!(
            settings,
            Settings {
                player: "Player".to_owned(),
                mazes: None,
                maze: MazeId::new(1),
            }
        );
    }

    #[test]
    fn flags_override_file_values() {
        let file = parse_file_config(
            r#"
                player = "Lajos"
                maze = 2
                mazes = "levels.json"
            "#,
        )
        .expect("config parses");
        let args = Args {
            maze: Some(3),
            ..Args::default()
        };

        let settings = Settings::merge(args, file);

        assert_eq!(settings.player, "Lajos");
        assert_eq!(settings.maze, MazeId::new(3));
        assert_eq!(settings.mazes, Some(PathBuf::from("levels.json")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_file_config("difficulty = \"hard\"").is_err());
    }

    #[test]
    fn args_parse_from_command_line() {
        let args = Args::try_parse_from(["maze-chase", "--maze", "2", "--player", "Ada"])
            .expect("flags parse");

        assert_eq!(args.maze, Some(2));
        assert_eq!(args.player.as_deref(), Some("Ada"));
        assert!(args.config.is_none());
    }
}
