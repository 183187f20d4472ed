#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the data model and the message surface that connects
//! adapters with the authoritative game state. Adapters submit [`Command`]
//! values describing desired moves, the world executes them via its `apply`
//! entry point, and then reports [`Event`] values describing what happened.
//! Maze layouts are described by [`MazeDefinition`] values which validate
//! their shape and role markers at construction and never change afterwards.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Commands that express all permissible game state mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the player step one cell in the provided direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that every actor returns to the maze's initial layout.
    Restart,
}

/// Events reported by the game state after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: Position,
        /// Cell the player occupies after the move.
        to: Position,
    },
    /// Reports that a requested player move was not carried out.
    MoveRejected {
        /// Direction of the rejected move.
        direction: Direction,
    },
    /// Confirms that the monster advanced a single cell.
    MonsterMoved {
        /// Cell the monster occupied before stepping.
        from: Position,
        /// Cell the monster occupies after stepping.
        to: Position,
    },
    /// Announces that the player reached the goal.
    MazeSolved,
    /// Announces that the monster caught the player.
    PlayerCaptured {
        /// Cell where the capture happened.
        cell: Position,
    },
    /// Confirms that all actors were returned to their initial cells.
    PositionsReset,
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting at [`Direction::Up`].
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Change applied to the row coordinate when stepping in this direction.
    #[must_use]
    pub const fn row_change(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
            Self::Right | Self::Left => 0,
        }
    }

    /// Change applied to the column coordinate when stepping in this direction.
    #[must_use]
    pub const fn column_change(self) -> i32 {
        match self {
            Self::Right => 1,
            Self::Left => -1,
            Self::Up | Self::Down => 0,
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Resolves the direction whose coordinate changes match the provided delta.
    ///
    /// Presentation layers use this to translate a clicked cell next to the
    /// player into a move. Any delta that is not exactly one cardinal step is
    /// rejected with [`DirectionError::IllegalDirection`].
    pub fn from_delta(row_change: i32, column_change: i32) -> Result<Self, DirectionError> {
        Self::ALL
            .into_iter()
            .find(|direction| {
                direction.row_change() == row_change && direction.column_change() == column_change
            })
            .ok_or(DirectionError::IllegalDirection {
                row_change,
                column_change,
            })
    }

    /// Canonical upper-case name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Right => 0b0010,
            Self::Down => 0b0100,
            Self::Left => 0b1000,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DirectionError::UnknownDirection(trimmed.to_owned()))
    }
}

/// Errors raised while deriving a [`Direction`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DirectionError {
    /// The coordinate delta is not a single cardinal step.
    #[error("delta ({row_change},{column_change}) does not correspond to any direction")]
    IllegalDirection {
        /// Requested change in the row coordinate.
        row_change: i32,
        /// Requested change in the column coordinate.
        column_change: i32,
    },
    /// The provided text does not name a direction.
    #[error("unknown direction `{0}`")]
    UnknownDirection(String),
}

/// Set of directions, typically the moves currently available to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LegalMoves(u8);

impl LegalMoves {
    /// Set containing no directions.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set containing all four directions.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Adds the direction to the set.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Reports whether the direction is part of the set.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Number of directions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Reports whether the set contains no directions.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the contained directions in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for LegalMoves {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut moves = Self::empty();
        for direction in iter {
            moves.insert(direction);
        }
        moves
    }
}

/// Location of a single maze cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new cell position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Position reached by stepping once in the provided direction.
    ///
    /// No maze bounds are consulted here; `None` is only returned when the
    /// step would leave the non-negative coordinate space.
    #[must_use]
    pub fn moved(self, direction: Direction) -> Option<Self> {
        let row = i64::from(self.row) + i64::from(direction.row_change());
        let column = i64::from(self.column) + i64::from(direction.column_change());
        Some(Self::new(u32::try_from(row).ok()?, u32::try_from(column).ok()?))
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

/// Entities whose positions the game state tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Actor {
    /// The piece controlled by the user.
    Player,
    /// The pursuer chasing the player.
    Monster,
    /// The exit the player tries to reach.
    Goal,
}

impl Actor {
    /// Every actor in presentation order.
    pub const ALL: [Actor; 3] = [Self::Player, Self::Monster, Self::Goal];

    /// Stable presentation index of the actor (player 0, monster 1, goal 2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Player => 0,
            Self::Monster => 1,
            Self::Goal => 2,
        }
    }
}

/// Four independent wall flags surrounding a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Walls {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
}

impl Walls {
    /// Walls with no side blocked.
    pub const NONE: Walls = Walls::new(false, false, false, false);

    /// Walls with every side blocked.
    pub const ALL: Walls = Walls::new(true, true, true, true);

    /// Creates a wall descriptor listing sides in clockwise order from the top.
    #[must_use]
    pub const fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Whether the top side is walled.
    #[must_use]
    pub const fn top(&self) -> bool {
        self.top
    }

    /// Whether the right side is walled.
    #[must_use]
    pub const fn right(&self) -> bool {
        self.right
    }

    /// Whether the bottom side is walled.
    #[must_use]
    pub const fn bottom(&self) -> bool {
        self.bottom
    }

    /// Whether the left side is walled.
    #[must_use]
    pub const fn left(&self) -> bool {
        self.left
    }

    /// Whether the side facing the provided direction is walled.
    #[must_use]
    pub const fn blocks(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }
}

/// Role marker a cell may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellRole {
    /// The player's starting cell.
    Start,
    /// The goal cell.
    End,
    /// The monster's spawn cell.
    Monster,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Monster => "monster",
        };
        f.write_str(label)
    }
}

/// A single maze cell with its walls and optional role marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CellRecord", into = "CellRecord")]
pub struct Cell {
    walls: Walls,
    role: Option<CellRole>,
}

impl Cell {
    /// Creates a cell from its walls and role marker.
    #[must_use]
    pub const fn new(walls: Walls, role: Option<CellRole>) -> Self {
        Self { walls, role }
    }

    /// Creates an unmarked cell with the provided walls.
    #[must_use]
    pub const fn with_walls(walls: Walls) -> Self {
        Self::new(walls, None)
    }

    /// Creates a cell from the seven flags used by maze files.
    ///
    /// At most one of `start`, `end` and `monster` may be set.
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn from_flags(
        wall_top: bool,
        wall_right: bool,
        wall_bottom: bool,
        wall_left: bool,
        start: bool,
        end: bool,
        monster: bool,
    ) -> Result<Self, CellError> {
        let role = match (start, end, monster) {
            (false, false, false) => None,
            (true, false, false) => Some(CellRole::Start),
            (false, true, false) => Some(CellRole::End),
            (false, false, true) => Some(CellRole::Monster),
            _ => {
                return Err(CellError::ConflictingRoles {
                    start,
                    end,
                    monster,
                })
            }
        };

        Ok(Self::new(
            Walls::new(wall_top, wall_right, wall_bottom, wall_left),
            role,
        ))
    }

    /// Walls surrounding the cell.
    #[must_use]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Role marker carried by the cell, if any.
    #[must_use]
    pub const fn role(&self) -> Option<CellRole> {
        self.role
    }

    /// Whether the side facing the provided direction is walled.
    #[must_use]
    pub const fn blocks(&self, direction: Direction) -> bool {
        self.walls.blocks(direction)
    }

    /// Whether the player starts on this cell.
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.role == Some(CellRole::Start)
    }

    /// Whether this cell is the goal.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.role == Some(CellRole::End)
    }

    /// Whether the monster spawns on this cell.
    #[must_use]
    pub fn has_monster(&self) -> bool {
        self.role == Some(CellRole::Monster)
    }
}

/// Errors raised while constructing a [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CellError {
    /// More than one role marker was set on the same cell.
    #[error("a cell carries at most one role marker (start={start}, end={end}, monster={monster})")]
    ConflictingRoles {
        /// Requested start flag.
        start: bool,
        /// Requested end flag.
        end: bool,
        /// Requested monster flag.
        monster: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CellRecord {
    wall_top: bool,
    wall_right: bool,
    wall_bottom: bool,
    wall_left: bool,
    start: bool,
    end: bool,
    monster: bool,
}

impl TryFrom<CellRecord> for Cell {
    type Error = CellError;

    fn try_from(record: CellRecord) -> Result<Self, Self::Error> {
        Cell::from_flags(
            record.wall_top,
            record.wall_right,
            record.wall_bottom,
            record.wall_left,
            record.start,
            record.end,
            record.monster,
        )
    }
}

impl From<Cell> for CellRecord {
    fn from(cell: Cell) -> Self {
        let walls = cell.walls();
        Self {
            wall_top: walls.top(),
            wall_right: walls.right(),
            wall_bottom: walls.bottom(),
            wall_left: walls.left(),
            start: cell.is_start(),
            end: cell.is_end(),
            monster: cell.has_monster(),
        }
    }
}

/// Unique identifier assigned to a maze within a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MazeId(u32);

impl MazeId {
    /// Creates a new maze identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MazeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable, validated layout of a single playable maze.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MazeRecord", into = "MazeRecord")]
pub struct MazeDefinition {
    id: MazeId,
    name: String,
    rows: u32,
    columns: u32,
    cells: Vec<Vec<Cell>>,
    start: Position,
    end: Position,
    monster: Option<Position>,
}

impl MazeDefinition {
    /// Validates and constructs a maze definition.
    ///
    /// The matrix must contain exactly `rows` rows of exactly `columns` cells,
    /// with exactly one start cell, exactly one end cell and at most one
    /// monster spawn.
    pub fn new(
        id: MazeId,
        name: impl Into<String>,
        rows: u32,
        columns: u32,
        cells: Vec<Vec<Cell>>,
    ) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }

        if !length_matches(cells.len(), rows) {
            return Err(MazeError::RowCountMismatch {
                expected: rows,
                actual: cells.len(),
            });
        }

        for (row, cells_in_row) in cells.iter().enumerate() {
            if !length_matches(cells_in_row.len(), columns) {
                return Err(MazeError::ColumnCountMismatch {
                    row,
                    expected: columns,
                    actual: cells_in_row.len(),
                });
            }
        }

        let mut markers = MarkerScan::default();
        for (position, cell) in enumerate_cells(&cells) {
            if let Some(role) = cell.role() {
                markers.record(role, position)?;
            }
        }

        let start = markers.start.ok_or(MazeError::MissingMarker {
            role: CellRole::Start,
        })?;
        let end = markers.end.ok_or(MazeError::MissingMarker {
            role: CellRole::End,
        })?;

        Ok(Self {
            id,
            name: name.into(),
            rows,
            columns,
            cells,
            start,
            end,
            monster: markers.monster,
        })
    }

    /// Identifier of the maze.
    #[must_use]
    pub const fn id(&self) -> MazeId {
        self.id
    }

    /// Display name of the maze.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Row-major cell matrix.
    #[must_use]
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Cell stored at the provided position, if it lies within the maze.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        self.cells.get(row)?.get(column)
    }

    /// Reports whether the position lies within the maze bounds.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }

    /// Player starting cell.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Goal cell.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Monster spawn cell, when the maze has a monster.
    #[must_use]
    pub const fn monster_spawn(&self) -> Option<Position> {
        self.monster
    }

    /// Position of the cell carrying the provided role marker.
    #[must_use]
    pub const fn marker(&self, role: CellRole) -> Option<Position> {
        match role {
            CellRole::Start => Some(self.start),
            CellRole::End => Some(self.end),
            CellRole::Monster => self.monster,
        }
    }
}

fn length_matches(length: usize, expected: u32) -> bool {
    u32::try_from(length).map_or(false, |length| length == expected)
}

fn enumerate_cells(cells: &[Vec<Cell>]) -> impl Iterator<Item = (Position, &Cell)> {
    cells.iter().enumerate().flat_map(|(row, cells_in_row)| {
        cells_in_row
            .iter()
            .enumerate()
            .map(move |(column, cell)| (position_at(row, column), cell))
    })
}

fn position_at(row: usize, column: usize) -> Position {
    // Matrix dimensions were already checked against u32 counts.
    Position::new(
        u32::try_from(row).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}

#[derive(Default)]
struct MarkerScan {
    start: Option<Position>,
    end: Option<Position>,
    monster: Option<Position>,
}

impl MarkerScan {
    fn record(&mut self, role: CellRole, position: Position) -> Result<(), MazeError> {
        let slot = match role {
            CellRole::Start => &mut self.start,
            CellRole::End => &mut self.end,
            CellRole::Monster => &mut self.monster,
        };

        if let Some(first) = *slot {
            return Err(MazeError::DuplicateMarker {
                role,
                first,
                second: position,
            });
        }

        *slot = Some(position);
        Ok(())
    }
}

/// Errors raised while constructing a [`MazeDefinition`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Row or column count was zero.
    #[error("maze dimensions must be positive (received {rows}x{columns})")]
    InvalidDimensions {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        columns: u32,
    },
    /// The cell matrix holds a different number of rows than declared.
    #[error("maze declares {expected} rows but the cell matrix has {actual}")]
    RowCountMismatch {
        /// Declared number of rows.
        expected: u32,
        /// Rows present in the matrix.
        actual: usize,
    },
    /// A row of the cell matrix holds a different number of cells than declared.
    #[error("maze declares {expected} columns but row {row} has {actual} cells")]
    ColumnCountMismatch {
        /// Index of the offending row.
        row: usize,
        /// Declared number of columns.
        expected: u32,
        /// Cells present in the row.
        actual: usize,
    },
    /// A cell record carried invalid flags.
    #[error("cell ({row},{column}) is invalid")]
    InvalidCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Underlying cell validation failure.
        #[source]
        source: CellError,
    },
    /// No cell carries a required role marker.
    #[error("maze has no {role} cell")]
    MissingMarker {
        /// Marker that is missing.
        role: CellRole,
    },
    /// A role marker that must be unique appears on more than one cell.
    #[error("maze has more than one {role} cell: {first} and {second}")]
    DuplicateMarker {
        /// Marker that appears twice.
        role: CellRole,
        /// First cell carrying the marker.
        first: Position,
        /// Second cell carrying the marker.
        second: Position,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MazeRecord {
    id: MazeId,
    name: String,
    rows: u32,
    cols: u32,
    blocks: Vec<Vec<CellRecord>>,
}

impl TryFrom<MazeRecord> for MazeDefinition {
    type Error = MazeError;

    fn try_from(record: MazeRecord) -> Result<Self, Self::Error> {
        let mut cells = Vec::with_capacity(record.blocks.len());
        for (row, blocks) in record.blocks.into_iter().enumerate() {
            let mut cells_in_row = Vec::with_capacity(blocks.len());
            for (column, block) in blocks.into_iter().enumerate() {
                let cell = Cell::try_from(block).map_err(|source| MazeError::InvalidCell {
                    row,
                    column,
                    source,
                })?;
                cells_in_row.push(cell);
            }
            cells.push(cells_in_row);
        }

        MazeDefinition::new(record.id, record.name, record.rows, record.cols, cells)
    }
}

impl From<MazeDefinition> for MazeRecord {
    fn from(maze: MazeDefinition) -> Self {
        Self {
            id: maze.id,
            name: maze.name,
            rows: maze.rows,
            cols: maze.columns,
            blocks: maze
                .cells
                .into_iter()
                .map(|row| row.into_iter().map(CellRecord::from).collect())
                .collect(),
        }
    }
}

/// Errors raised by maze catalog lookups and mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No maze with the provided identifier exists.
    #[error("no maze found with id {0}")]
    NotFound(MazeId),
    /// A maze with the provided identifier is already registered.
    #[error("a maze with id {0} already exists")]
    AlreadyExists(MazeId),
}

/// Summary of a finished or abandoned play-through handed to result recorders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Name of the player who played the session.
    pub player: String,
    /// Maze that was played.
    pub maze: MazeId,
    /// Whether the player reached the goal.
    pub solved: bool,
    /// Number of accepted player moves since the last reset.
    pub moves: u32,
    /// Wall-clock time spent in the session.
    pub elapsed: Duration,
}
