use maze_chase_core::{Cell, CellRole, Command, Direction, Event, MazeDefinition, MazeId, Walls};
use maze_chase_world::{self as world, query, GameState, MazeCatalog};

#[test]
fn deterministic_replay_produces_identical_runs() {
    let catalog = catalog();
    let first = replay(&catalog, scripted_commands());
    let second = replay(&catalog, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::MonsterMoved { .. })));
}

#[test]
fn replay_after_restart_matches_fresh_replay() {
    let catalog = catalog();
    let mut commands = scripted_commands();
    commands.push(Command::Restart);
    commands.extend(scripted_commands());

    let doubled = replay(&catalog, commands);
    let single = replay(&catalog, scripted_commands());

    assert_eq!(doubled.final_state, single.final_state);
}

fn replay(catalog: &MazeCatalog, commands: Vec<Command>) -> ReplayOutcome {
    let mut state = GameState::new(catalog, MazeId::new(7)).expect("maze exists");
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut state, command, &mut events);
        log.extend(events);
    }

    ReplayOutcome {
        final_state: state.to_string(),
        solved: query::is_solved(&state),
        events: log,
    }
}

fn scripted_commands() -> Vec<Command> {
    [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ]
    .into_iter()
    .map(|direction| Command::MovePlayer { direction })
    .collect()
}

fn catalog() -> MazeCatalog {
    let mut cells = vec![vec![Cell::default(); 4]; 4];
    cells[3][0] = Cell::new(Walls::NONE, Some(CellRole::Start));
    cells[0][3] = Cell::new(Walls::NONE, Some(CellRole::End));
    cells[0][0] = Cell::new(Walls::NONE, Some(CellRole::Monster));
    cells[1][1] = Cell::with_walls(Walls::new(false, true, true, false));
    let maze = MazeDefinition::new(MazeId::new(7), "Replay", 4, 4, cells).expect("valid maze");
    MazeCatalog::from_definitions([maze]).expect("unique ids")
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    final_state: String,
    solved: bool,
    events: Vec<Event>,
}
