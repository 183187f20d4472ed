#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Chase in the terminal.

mod config;
mod input;
mod maze_file;
mod render;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use maze_chase_core::{Command, Event, WELCOME_BANNER};
use maze_chase_world::{self as world, query, GameState};

use crate::{
    config::{Args, Settings},
    input::{parse_input, Input},
    maze_file::load_catalog,
    session::Session,
};

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::resolve(Args::parse())?;
    let catalog = load_catalog(settings.mazes.as_deref())?;
    let mut state = GameState::new(&catalog, settings.maze)
        .with_context(|| format!("cannot start maze {}", settings.maze))?;
    info!(
        "Starting maze {} ({}) for {}",
        settings.maze,
        query::maze(&state).name(),
        settings.player
    );

    let mut session = Session::new(settings.player, settings.maze);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    writeln!(output, "{WELCOME_BANNER}")?;

    let solved = play(&mut state, &mut session, stdin.lock(), &mut output)?;
    let outcome = session.outcome(solved);
    writeln!(
        output,
        "{}",
        serde_json::to_string_pretty(&outcome).context("failed to encode game outcome")?
    )?;
    Ok(())
}

/// Runs the interactive loop until the maze is solved, the player quits,
/// or the input ends. Returns whether the maze was solved.
fn play<R, W>(
    state: &mut GameState<'_>,
    session: &mut Session,
    input: R,
    output: &mut W,
) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let mut events = Vec::new();

    while !query::is_solved(state) {
        write!(output, "{}", render::render(state))?;
        let moves: Vec<_> = query::legal_moves(state)
            .iter()
            .map(|direction| direction.name())
            .collect();
        writeln!(
            output,
            "Moves: {} | Legal: {}",
            session.moves(),
            moves.join(", ")
        )?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read player input")?;

        let command = match parse_input(&line, query::player(state)) {
            Ok(Input::Move(direction)) => Command::MovePlayer { direction },
            Ok(Input::Restart) => Command::Restart,
            Ok(Input::Quit) => break,
            Err(error) => {
                writeln!(output, "{error}")?;
                continue;
            }
        };

        events.clear();
        world::apply(state, command, &mut events);
        session.record(&events);
        for event in &events {
            debug!("{event:?}");
            report(event, output)?;
        }
    }

    Ok(query::is_solved(state))
}

fn report<W: Write>(event: &Event, output: &mut W) -> Result<()> {
    match event {
        Event::MoveRejected { direction } => {
            writeln!(output, "You cannot move {direction} from here.")?;
        }
        Event::PlayerCaptured { cell } => {
            writeln!(output, "The monster caught you at {cell}. Back to the start!")?;
        }
        Event::MazeSolved => writeln!(output, "You escaped the maze!")?,
        Event::PlayerMoved { .. }
        | Event::MonsterMoved { .. }
        | Event::PositionsReset => {}
    }
    Ok(())
}
