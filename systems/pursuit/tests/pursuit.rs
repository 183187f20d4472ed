use maze_chase_core::{Direction, Position};
use maze_chase_system_pursuit::{Pursuit, PursuitStep, DEFAULT_STEP_BUDGET};

fn directions(steps: &[PursuitStep]) -> Vec<Direction> {
    steps.iter().map(|step| step.direction).collect()
}

fn open_field(_: Position, _: Direction) -> bool {
    true
}

#[test]
fn closes_horizontal_gap_first() {
    let pursuit = Pursuit::default();
    let steps = pursuit.plan(Position::new(3, 0), Position::new(0, 5), open_field);

    assert_eq!(directions(&steps), vec![Direction::Right, Direction::Right]);
    assert_eq!(steps[1].to, Position::new(3, 2));
}

#[test]
fn moves_vertically_when_columns_are_aligned() {
    let pursuit = Pursuit::default();
    let steps = pursuit.plan(Position::new(4, 2), Position::new(0, 2), open_field);

    assert_eq!(directions(&steps), vec![Direction::Up, Direction::Up]);
    assert_eq!(steps.last().map(|step| step.to), Some(Position::new(2, 2)));
}

#[test]
fn spends_leftover_budget_on_rows() {
    let pursuit = Pursuit::default();
    let steps = pursuit.plan(Position::new(0, 0), Position::new(3, 1), open_field);

    assert_eq!(directions(&steps), vec![Direction::Right, Direction::Down]);
    assert_eq!(steps[1].to, Position::new(1, 1));
}

#[test]
fn blocked_steps_do_not_consume_budget() {
    let pursuit = Pursuit::default();
    let wall = Position::new(2, 1);
    let steps = pursuit.plan(Position::new(2, 1), Position::new(0, 4), |cell, direction| {
        !(cell == wall && direction == Direction::Right)
    });

    assert_eq!(directions(&steps), vec![Direction::Up, Direction::Up]);
}

#[test]
fn retries_horizontal_after_vertical_progress() {
    let pursuit = Pursuit::default();
    let blocked = Position::new(1, 0);
    let steps = pursuit.plan(Position::new(1, 0), Position::new(0, 2), |cell, direction| {
        !(cell == blocked && direction == Direction::Right)
    });

    assert_eq!(directions(&steps), vec![Direction::Up, Direction::Right]);
    assert_eq!(steps[1].from, Position::new(0, 0));
    assert_eq!(steps[1].to, Position::new(0, 1));
}

#[test]
fn fully_blocked_monster_stays_put() {
    let pursuit = Pursuit::default();
    let steps = pursuit.plan(Position::new(2, 1), Position::new(0, 3), |_, _| false);

    assert!(steps.is_empty());
}

#[test]
fn co_located_actors_produce_no_steps() {
    let pursuit = Pursuit::default();
    let mut consulted = 0;
    let steps = pursuit.plan(Position::new(1, 1), Position::new(1, 1), |_, _| {
        consulted += 1;
        true
    });

    assert!(steps.is_empty());
    assert_eq!(consulted, 0);
}

#[test]
fn never_exceeds_step_budget() {
    for budget in 0..4 {
        let pursuit = Pursuit::with_step_budget(budget);
        let start = Position::new(5, 5);
        let steps = pursuit.plan(start, Position::new(0, 0), open_field);

        assert_eq!(steps.len(), budget as usize);
        let end = steps.last().map_or(start, |step| step.to);
        assert!(start.manhattan_distance(end) <= budget);
    }
    assert_eq!(Pursuit::new().step_budget(), DEFAULT_STEP_BUDGET);
}

#[test]
fn each_step_starts_where_the_previous_ended() {
    let pursuit = Pursuit::default();
    let monster = Position::new(0, 0);
    let steps = pursuit.plan(monster, Position::new(2, 2), open_field);

    let mut cell = monster;
    for step in &steps {
        assert_eq!(step.from, cell);
        assert_eq!(step.from.moved(step.direction), Some(step.to));
        cell = step.to;
    }
}
