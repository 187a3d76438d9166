#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic autopilot that steers the snake toward its food.

use gridsnake_core::{BodyView, CellIndex, Command, Direction, Event};

/// Pure system that reacts to world events and emits heading commands.
#[derive(Debug, Default)]
pub struct Autopilot {
    halted: bool,
}

impl Autopilot {
    /// Consumes world events and immutable views to emit heading commands.
    ///
    /// `direction` is the heading committed by the most recent step.
    pub fn handle(
        &mut self,
        events: &[Event],
        body: BodyView<'_>,
        food: Option<CellIndex>,
        direction: Direction,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::StatusChanged { status } = event {
                if status.is_terminal() {
                    self.halted = true;
                }
            }
        }

        if self.halted {
            return;
        }

        let Some(choice) = select_heading(body, food, direction) else {
            return;
        };

        if choice != direction {
            out.push(Command::ChangeDirection { direction: choice });
        }
    }

    /// Reports whether a terminal status silenced the autopilot.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

/// Picks the heading whose next cell is free and closest to the food.
///
/// The current heading wins ties, then headings in encoding order. Returns
/// `None` when every reachable neighbour is covered by the body.
#[must_use]
pub fn select_heading(
    body: BodyView<'_>,
    food: Option<CellIndex>,
    direction: Direction,
) -> Option<Direction> {
    let head = body.head()?;
    let width = body.width();
    let candidates = std::iter::once(direction).chain(
        Direction::ALL
            .into_iter()
            .filter(move |candidate| *candidate != direction),
    );

    let mut best: Option<(u32, Direction)> = None;
    for candidate in candidates {
        if body.len() > 1 && direction.is_opposite(candidate) {
            continue;
        }

        let Some(next) = width.neighbor(head, candidate) else {
            continue;
        };
        if body.contains(next) {
            continue;
        }

        let distance = food
            .and_then(|food| width.wrapped_distance(next, food))
            .unwrap_or(0);
        if best.map_or(true, |(best_distance, _)| distance < best_distance) {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, heading)| heading)
}
