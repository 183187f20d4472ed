#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure pursuit system that decides how the monster closes in on the player.
//!
//! The heuristic is greedy and bounded: the monster first tries to close the
//! column gap, then the row gap, then the column gap once more, never taking
//! more steps than its budget allows. Every step is checked against the
//! caller-supplied predicate from the monster's current cell, so a blocked
//! step is simply skipped without consuming budget.

use maze_chase_core::{Direction, Position};

/// Number of cells the monster may advance after each player move.
pub const DEFAULT_STEP_BUDGET: u32 = 2;

/// Single monster step chosen by the pursuit heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PursuitStep {
    /// Direction of the step.
    pub direction: Direction,
    /// Cell the monster left.
    pub from: Position,
    /// Cell the monster entered.
    pub to: Position,
}

/// Greedy pursuit planner with a fixed per-turn step budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pursuit {
    step_budget: u32,
}

impl Default for Pursuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Pursuit {
    /// Creates a planner using [`DEFAULT_STEP_BUDGET`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_step_budget(DEFAULT_STEP_BUDGET)
    }

    /// Creates a planner that takes at most `step_budget` steps per turn.
    #[must_use]
    pub const fn with_step_budget(step_budget: u32) -> Self {
        Self { step_budget }
    }

    /// Maximum number of steps taken per call to [`Pursuit::plan`].
    #[must_use]
    pub const fn step_budget(&self) -> u32 {
        self.step_budget
    }

    /// Walks the monster toward the player and returns the steps it took.
    ///
    /// `can_step` must report whether an actor standing on the given cell may
    /// move in the given direction. It is consulted for every attempted step,
    /// always from the monster's live position.
    pub fn plan<F>(&self, monster: Position, player: Position, mut can_step: F) -> Vec<PursuitStep>
    where
        F: FnMut(Position, Direction) -> bool,
    {
        let column_delta = i64::from(player.column()) - i64::from(monster.column());
        let row_delta = i64::from(player.row()) - i64::from(monster.row());

        let mut walker = Walker {
            cell: monster,
            budget: self.step_budget,
            steps: Vec::new(),
            can_step: &mut can_step,
        };

        walker.walk(column_delta, Direction::Right, Direction::Left);
        if walker.remaining() > 0 {
            walker.walk(row_delta, Direction::Down, Direction::Up);
        }
        if walker.remaining() > 0 && column_delta != 0 {
            walker.walk(column_delta, Direction::Right, Direction::Left);
        }

        walker.steps
    }
}

struct Walker<'a, F> {
    cell: Position,
    budget: u32,
    steps: Vec<PursuitStep>,
    can_step: &'a mut F,
}

impl<F> Walker<'_, F>
where
    F: FnMut(Position, Direction) -> bool,
{
    fn remaining(&self) -> u32 {
        let taken = u32::try_from(self.steps.len()).unwrap_or(u32::MAX);
        self.budget.saturating_sub(taken)
    }

    fn walk(&mut self, delta: i64, forward: Direction, backward: Direction) {
        if delta == 0 {
            return;
        }

        let direction = if delta > 0 { forward } else { backward };
        for _ in 0..delta.unsigned_abs() {
            if self.remaining() == 0 {
                break;
            }

            if !(self.can_step)(self.cell, direction) {
                continue;
            }

            let Some(next) = self.cell.moved(direction) else {
                continue;
            };

            self.steps.push(PursuitStep {
                direction,
                from: self.cell,
                to: next,
            });
            self.cell = next;
        }
    }
}
