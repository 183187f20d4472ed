//! Per-session bookkeeping owned by the adapter rather than the game state.

use std::time::Instant;

use maze_chase_core::{Event, GameOutcome, MazeId};

/// Tracks the move counter and play time of one session.
#[derive(Debug)]
pub(crate) struct Session {
    player: String,
    maze: MazeId,
    moves: u32,
    started: Instant,
}

impl Session {
    pub(crate) fn new(player: String, maze: MazeId) -> Self {
        Self {
            player,
            maze,
            moves: 0,
            started: Instant::now(),
        }
    }

    /// Updates the move counter from the events of one command.
    ///
    /// Accepted moves count; a reset (capture or restart) zeroes the counter.
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PlayerMoved { .. } => self.moves = self.moves.saturating_add(1),
                Event::PositionsReset => self.moves = 0,
                _ => {}
            }
        }
    }

    pub(crate) fn moves(&self) -> u32 {
        self.moves
    }

    pub(crate) fn outcome(&self, solved: bool) -> GameOutcome {
        GameOutcome {
            player: self.player.clone(),
            maze: self.maze,
            solved,
            moves: self.moves,
            elapsed: self.started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Direction, Position};

    fn moved(column: u32) -> Event {
        Event::PlayerMoved {
            from: Position::new(0, column),
            to: Position::new(0, column + 1),
        }
    }

    #[test]
    fn counts_accepted_moves_only() {
        let mut session = Session::new("Ada".to_owned(), MazeId::new(1));

        session.record(&[moved(0)]);
        session.record(&[Event::MoveRejected {
            direction: Direction::Up,
        }]);
        session.record(&[moved(1), Event::MazeSolved]);

        assert_eq!(session.moves(), 2);
        let outcome = session.outcome(true);
        assert_eq!(outcome.player, "Ada");
        assert_eq!(outcome.maze, MazeId::new(1));
        assert!(outcome.solved);
        assert_eq!(outcome.moves, 2);
    }

    #[test]
    fn capture_resets_the_counter() {
        let mut session = Session::new("Ada".to_owned(), MazeId::new(1));

        session.record(&[moved(0), moved(1)]);
        session.record(&[
            moved(2),
            Event::PlayerCaptured {
                cell: Position::new(0, 3),
            },
            Event::PositionsReset,
        ]);

        assert_eq!(session.moves(), 0);
    }
}
