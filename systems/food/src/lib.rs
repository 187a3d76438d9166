#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Food placement strategies consulted by the world whenever a meal is eaten.

use std::{collections::VecDeque, fmt};

use gridsnake_core::{BodyView, CellIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Strategy that chooses the cell holding the next piece of food.
pub trait FoodPlacement: fmt::Debug {
    /// Chooses an unoccupied cell, or `None` when the body fills the grid.
    fn place(&mut self, body: BodyView<'_>) -> Option<CellIndex>;
}

/// Enumerates every unoccupied cell in row-major order.
#[must_use]
pub fn free_cells(body: BodyView<'_>) -> Vec<CellIndex> {
    body.occupancy()
        .iter()
        .enumerate()
        .filter(|(_, occupied)| !**occupied)
        .filter_map(|(index, _)| u32::try_from(index).ok())
        .map(CellIndex::new)
        .collect()
}

/// Returns the first unoccupied cell in row-major order.
#[must_use]
pub fn first_free_cell(body: BodyView<'_>) -> Option<CellIndex> {
    body.occupancy()
        .iter()
        .position(|occupied| !*occupied)
        .and_then(|index| u32::try_from(index).ok())
        .map(CellIndex::new)
}

/// Deterministic placement on the first free cell in row-major order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFree;

impl FoodPlacement for FirstFree {
    fn place(&mut self, body: BodyView<'_>) -> Option<CellIndex> {
        first_free_cell(body)
    }
}

/// Uniform placement among free cells driven by a seeded generator.
///
/// Two strategies created from the same seed produce the same sequence of
/// cells for the same sequence of bodies.
#[derive(Clone)]
pub struct Seeded {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Seeded {
    /// Creates a new seeded strategy.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl fmt::Debug for Seeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seeded")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl FoodPlacement for Seeded {
    fn place(&mut self, body: BodyView<'_>) -> Option<CellIndex> {
        let free = free_cells(body);
        if free.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..free.len());
        free.get(index).copied()
    }
}

/// Scripted placement that replays a fixed list of cells.
///
/// Entries that are out of range or covered by the body when their turn
/// comes are skipped. Once the script runs dry placement falls back to
/// [`FirstFree`].
#[derive(Clone, Debug, Default)]
pub struct Scheduled {
    queue: VecDeque<CellIndex>,
    fallback: FirstFree,
}

impl Scheduled {
    /// Creates a strategy that hands out `cells` in order.
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = CellIndex>) -> Self {
        Self {
            queue: cells.into_iter().collect(),
            fallback: FirstFree,
        }
    }

    /// Number of scripted cells not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl FoodPlacement for Scheduled {
    fn place(&mut self, body: BodyView<'_>) -> Option<CellIndex> {
        let width = body.width();
        while let Some(cell) = self.queue.pop_front() {
            if width.contains(cell) && !body.contains(cell) {
                return Some(cell);
            }
        }
        self.fallback.place(body)
    }
}

/// Cloneable description of a placement strategy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FoodPolicy {
    /// Builds [`FirstFree`].
    #[default]
    FirstFree,
    /// Builds [`Seeded`] from the provided seed.
    Seeded(u64),
    /// Builds [`Scheduled`] from the provided script.
    Scheduled(Vec<CellIndex>),
}

impl FoodPolicy {
    /// Instantiates the strategy described by the policy.
    #[must_use]
    pub fn build(&self) -> Box<dyn FoodPlacement> {
        match self {
            Self::FirstFree => Box::new(FirstFree),
            Self::Seeded(seed) => Box::new(Seeded::new(*seed)),
            Self::Scheduled(cells) => Box::new(Scheduled::new(cells.iter().copied())),
        }
    }
}
