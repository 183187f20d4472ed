#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Maze Chase.

mod catalog;

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use log::{debug, info};
use maze_chase_core::{
    Actor, CatalogError, Command, Direction, Event, MazeDefinition, MazeId, Position,
};
use maze_chase_system_pursuit::Pursuit;

pub use catalog::MazeCatalog;

/// Live state of a single play-through of one maze.
///
/// The state borrows the catalog it was created from, so a single catalog can
/// back any number of concurrent sessions. Cloning produces an independent
/// value copy that can be advanced without affecting the state it was cloned from.
#[derive(Clone, Debug)]
pub struct GameState<'catalog> {
    catalog: &'catalog MazeCatalog,
    maze: &'catalog MazeDefinition,
    positions: Positions,
    pursuit: Pursuit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Positions {
    player: Position,
    monster: Option<Position>,
    goal: Position,
}

impl Positions {
    fn initial(maze: &MazeDefinition) -> Self {
        Self {
            player: maze.start(),
            monster: maze.monster_spawn(),
            goal: maze.end(),
        }
    }

    fn get(&self, actor: Actor) -> Option<Position> {
        match actor {
            Actor::Player => Some(self.player),
            Actor::Monster => self.monster,
            Actor::Goal => Some(self.goal),
        }
    }
}

impl<'catalog> GameState<'catalog> {
    /// Starts a play-through of the maze registered under `maze_id`.
    pub fn new(catalog: &'catalog MazeCatalog, maze_id: MazeId) -> Result<Self, CatalogError> {
        let maze = catalog.get(maze_id)?;
        Ok(Self {
            catalog,
            maze,
            positions: Positions::initial(maze),
            pursuit: Pursuit::default(),
        })
    }

    /// Attempts to move the player one cell in `direction`.
    ///
    /// Illegal moves and moves after the maze was solved leave the state
    /// untouched and report [`Event::MoveRejected`]. A successful move that
    /// does not reach the goal lets the monster pursue; if the monster ends on
    /// the player's cell every actor returns to its initial cell.
    pub fn make_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.is_solved() {
            debug!("Ignoring {direction}: maze {} already solved", self.maze.id());
            out_events.push(Event::MoveRejected { direction });
            return;
        }

        let from = self.positions.player;
        let Some(to) = step_target(self.maze, from, direction) else {
            debug!("Illegal move {direction} from {from}");
            out_events.push(Event::MoveRejected { direction });
            return;
        };

        self.positions.player = to;
        info!("Player moved to {to}");
        out_events.push(Event::PlayerMoved { from, to });

        if self.is_solved() {
            info!("Maze {} solved", self.maze.id());
            out_events.push(Event::MazeSolved);
            return;
        }

        self.pursue(out_events);

        if self.positions.monster == Some(self.positions.player) {
            info!("Player captured at {}", self.positions.player);
            out_events.push(Event::PlayerCaptured {
                cell: self.positions.player,
            });
            self.reset(out_events);
        }
    }

    /// Returns every actor to the maze's initial layout.
    pub fn restart(&mut self, out_events: &mut Vec<Event>) {
        info!("Restarting maze {}", self.maze.id());
        self.reset(out_events);
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.positions = Positions::initial(self.maze);
        out_events.push(Event::PositionsReset);
    }

    fn pursue(&mut self, out_events: &mut Vec<Event>) {
        let Some(monster) = self.positions.monster else {
            return;
        };

        let maze = self.maze;
        let steps = self
            .pursuit
            .plan(monster, self.positions.player, |cell, direction| {
                step_target(maze, cell, direction).is_some()
            });

        for step in steps {
            info!("Monster moved to {}", step.to);
            out_events.push(Event::MonsterMoved {
                from: step.from,
                to: step.to,
            });
            self.positions.monster = Some(step.to);
        }
    }

    fn is_solved(&self) -> bool {
        self.positions.player == self.positions.goal
    }
}

impl PartialEq for GameState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.maze.id() == other.maze.id() && self.positions == other.positions
    }
}

impl Eq for GameState<'_> {}

impl Hash for GameState<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.maze.id().hash(state);
        self.positions.hash(state);
    }
}

impl fmt::Display for GameState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.positions.player)?;
        match self.positions.monster {
            Some(monster) => write!(f, ",{monster}")?,
            None => write!(f, ",-")?,
        }
        write!(f, ",{}]", self.positions.goal)
    }
}

/// Applies the provided command to the game state.
pub fn apply(state: &mut GameState<'_>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => state.make_move(direction, out_events),
        Command::Restart => state.restart(out_events),
    }
}

/// Cell reached by stepping from `from` in `direction`, when walls allow it.
///
/// A wall declared on either side of the shared edge blocks the step, as does
/// the maze boundary.
fn step_target(maze: &MazeDefinition, from: Position, direction: Direction) -> Option<Position> {
    let cell = maze.cell(from)?;
    if cell.blocks(direction) {
        return None;
    }

    let to = from.moved(direction)?;
    let neighbor = maze.cell(to)?;
    if neighbor.blocks(direction.opposite()) {
        return None;
    }

    Some(to)
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use maze_chase_core::{Actor, Direction, LegalMoves, MazeDefinition, MazeId, Position};

    use super::{step_target, GameState, MazeCatalog};

    /// Catalog the game state was created from.
    #[must_use]
    pub fn catalog<'catalog>(state: &GameState<'catalog>) -> &'catalog MazeCatalog {
        state.catalog
    }

    /// Maze being played.
    #[must_use]
    pub fn maze<'catalog>(state: &GameState<'catalog>) -> &'catalog MazeDefinition {
        state.maze
    }

    /// Identifier of the maze being played.
    #[must_use]
    pub fn maze_id(state: &GameState<'_>) -> MazeId {
        state.maze.id()
    }

    /// Current position of the actor; `None` for an absent monster.
    #[must_use]
    pub fn position(state: &GameState<'_>, actor: Actor) -> Option<Position> {
        state.positions.get(actor)
    }

    /// Current position of the player.
    #[must_use]
    pub fn player(state: &GameState<'_>) -> Position {
        state.positions.player
    }

    /// Current position of the monster, if the maze has one.
    #[must_use]
    pub fn monster(state: &GameState<'_>) -> Option<Position> {
        state.positions.monster
    }

    /// Position of the goal.
    #[must_use]
    pub fn goal(state: &GameState<'_>) -> Position {
        state.positions.goal
    }

    /// Reports whether the player stands on the goal.
    #[must_use]
    pub fn is_solved(state: &GameState<'_>) -> bool {
        state.is_solved()
    }

    /// Reports whether `actor` may step one cell in `direction`.
    ///
    /// The step is illegal when it would leave the maze or when either the
    /// actor's cell or the neighbouring cell declares a wall on the shared
    /// edge. An actor without a position never has legal moves.
    #[must_use]
    pub fn is_legal_move(state: &GameState<'_>, direction: Direction, actor: Actor) -> bool {
        state
            .positions
            .get(actor)
            .and_then(|from| step_target(state.maze, from, direction))
            .is_some()
    }

    /// Directions in which the player may currently step.
    #[must_use]
    pub fn legal_moves(state: &GameState<'_>) -> LegalMoves {
        Direction::ALL
            .into_iter()
            .filter(|direction| is_legal_move(state, *direction, Actor::Player))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Cell, CellRole, Walls};

    fn two_by_two(walls: [[Walls; 2]; 2]) -> MazeDefinition {
        let roles = [
            [Some(CellRole::Start), None],
            [Some(CellRole::Monster), Some(CellRole::End)],
        ];
        let cells = walls
            .iter()
            .zip(roles.iter())
            .map(|(walls, roles)| {
                walls
                    .iter()
                    .zip(roles.iter())
                    .map(|(walls, role)| Cell::new(*walls, *role))
                    .collect()
            })
            .collect();
        MazeDefinition::new(MazeId::new(1), "Square", 2, 2, cells).expect("valid maze")
    }

    #[test]
    fn step_target_respects_boundaries() {
        let maze = two_by_two([[Walls::NONE; 2]; 2]);
        let corner = Position::new(0, 0);

        assert_eq!(step_target(&maze, corner, Direction::Up), None);
        assert_eq!(step_target(&maze, corner, Direction::Left), None);
        assert_eq!(
            step_target(&maze, corner, Direction::Right),
            Some(Position::new(0, 1))
        );
        assert_eq!(step_target(&maze, Position::new(1, 1), Direction::Down), None);
        assert_eq!(step_target(&maze, Position::new(1, 1), Direction::Right), None);
    }

    #[test]
    fn step_target_consults_both_sides_of_an_edge() {
        let own_side = Walls::new(false, true, false, false);
        let far_side = Walls::new(false, false, false, true);

        let blocked_here = two_by_two([[own_side, Walls::NONE], [Walls::NONE, Walls::NONE]]);
        let blocked_there = two_by_two([[Walls::NONE, far_side], [Walls::NONE, Walls::NONE]]);

        for maze in [&blocked_here, &blocked_there] {
            assert_eq!(step_target(maze, Position::new(0, 0), Direction::Right), None);
            assert_eq!(step_target(maze, Position::new(0, 1), Direction::Left), None);
            assert!(step_target(maze, Position::new(0, 0), Direction::Down).is_some());
        }
    }

    #[test]
    fn step_target_rejects_cells_outside_the_maze() {
        let maze = two_by_two([[Walls::NONE; 2]; 2]);
        assert_eq!(step_target(&maze, Position::new(5, 5), Direction::Up), None);
    }

    #[test]
    fn display_lists_player_monster_and_goal() {
        let mut catalog = MazeCatalog::new();
        catalog
            .add(two_by_two([[Walls::NONE; 2]; 2]))
            .expect("unique id");
        let state = GameState::new(&catalog, MazeId::new(1)).expect("maze exists");

        assert_eq!(state.to_string(), "[(0,0),(1,0),(1,1)]");
    }
}
