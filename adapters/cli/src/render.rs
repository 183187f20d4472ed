//! Text rendering of the maze and its actors.

use std::fmt::Write as _;

use maze_chase_core::{Cell, MazeDefinition, Position};
use maze_chase_world::{query, GameState};

const WALL_HORIZONTAL: &str = "---";
const OPEN_HORIZONTAL: &str = "   ";

/// Draws the maze with the player (`P`), monster (`M`) and goal (`E`).
///
/// An edge is drawn as a wall when either adjacent cell declares it.
pub(crate) fn render(state: &GameState<'_>) -> String {
    let maze = query::maze(state);
    let mut out = String::new();

    for row in 0..maze.rows() {
        for column in 0..maze.columns() {
            let position = Position::new(row, column);
            let above = row
                .checked_sub(1)
                .and_then(|above| maze.cell(Position::new(above, column)));
            let walled = cell_at(maze, position).walls().top()
                || above.map_or(false, |cell| cell.walls().bottom());
            out.push('+');
            out.push_str(if walled {
                WALL_HORIZONTAL
            } else {
                OPEN_HORIZONTAL
            });
        }
        out.push_str("+\n");

        for column in 0..maze.columns() {
            let position = Position::new(row, column);
            let left = column
                .checked_sub(1)
                .and_then(|left| maze.cell(Position::new(row, left)));
            let walled = cell_at(maze, position).walls().left()
                || left.map_or(false, |cell| cell.walls().right());
            out.push(if walled { '|' } else { ' ' });
            let _ = write!(out, " {} ", glyph(state, position));
        }
        let last = cell_at(maze, Position::new(row, maze.columns() - 1));
        out.push(if last.walls().right() { '|' } else { ' ' });
        out.push('\n');
    }

    for column in 0..maze.columns() {
        let cell = cell_at(maze, Position::new(maze.rows() - 1, column));
        out.push('+');
        out.push_str(if cell.walls().bottom() {
            WALL_HORIZONTAL
        } else {
            OPEN_HORIZONTAL
        });
    }
    out.push_str("+\n");
    out
}

fn cell_at(maze: &MazeDefinition, position: Position) -> Cell {
    maze.cell(position).copied().unwrap_or_default()
}

fn glyph(state: &GameState<'_>, position: Position) -> char {
    if query::player(state) == position {
        'P'
    } else if query::monster(state) == Some(position) {
        'M'
    } else if query::goal(state) == position {
        'E'
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{CellRole, MazeId, Walls};
    use maze_chase_world::MazeCatalog;

    #[test]
    fn renders_walls_from_either_side() {
        let cells = vec![
            vec![
                Cell::new(Walls::new(true, false, false, true), Some(CellRole::Start)),
                Cell::new(Walls::new(true, true, true, false), Some(CellRole::End)),
            ],
            vec![
                Cell::new(Walls::new(false, true, true, true), Some(CellRole::Monster)),
                Cell::new(Walls::new(false, true, true, true), None),
            ],
        ];
        let maze = MazeDefinition::new(MazeId::new(1), "Box", 2, 2, cells).expect("valid maze");
        let catalog = MazeCatalog::from_definitions([maze]).expect("unique ids");
        let state = GameState::new(&catalog, MazeId::new(1)).expect("maze exists");

        let expected = concat!(
            "+---+---+\n",
            "| P   E |\n",
            "+   +---+\n",
            "| M |   |\n",
            "+---+---+\n",
        );
        assert_eq!(render(&state), expected);
    }
}
