#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the grid snake engine.

use gridsnake_core::{
    BodyView, CellIndex, Command, Direction, Event, GridWidth, Status, MIN_GRID_WIDTH,
};
use gridsnake_system_food::{first_free_cell, FoodPlacement, FoodPolicy};
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_DIRECTION: Direction = Direction::Up;

/// Parameters required to construct a [`World`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    width: u32,
    spawn: u32,
    direction: Direction,
    food: FoodPolicy,
}

impl Config {
    /// Creates a configuration for a `width × width` grid with the snake at `spawn`.
    #[must_use]
    pub const fn new(width: u32, spawn: u32) -> Self {
        Self {
            width,
            spawn,
            direction: DEFAULT_DIRECTION,
            food: FoodPolicy::FirstFree,
        }
    }

    /// Overrides the initial heading.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Overrides the food placement policy.
    #[must_use]
    pub fn with_food(mut self, food: FoodPolicy) -> Self {
        self.food = food;
        self
    }

    /// Requested grid width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Requested spawn cell.
    #[must_use]
    pub const fn spawn(&self) -> u32 {
        self.spawn
    }

    /// Initial heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Food placement policy.
    #[must_use]
    pub fn food(&self) -> &FoodPolicy {
        &self.food
    }
}

/// Reasons a world cannot be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The grid is too narrow to hold a snake and its food.
    #[error("grid width {width} is below the minimum of {minimum}")]
    WidthTooSmall {
        /// Requested width.
        width: u32,
        /// Smallest accepted width.
        minimum: u32,
    },
    /// The grid holds more cells than a cell index can address.
    #[error("grid width {width} addresses more cells than a cell index can hold")]
    WidthTooLarge {
        /// Requested width.
        width: u32,
    },
    /// The spawn cell lies outside the grid.
    #[error("spawn index {spawn} is outside a grid of {cell_count} cells")]
    SpawnOutOfRange {
        /// Requested spawn cell.
        spawn: u32,
        /// Number of cells in the grid.
        cell_count: u32,
    },
}

/// Represents the authoritative snake world state.
#[derive(Debug)]
pub struct World {
    width: GridWidth,
    body: Vec<CellIndex>,
    direction: Direction,
    pending_direction: Direction,
    status: Status,
    food: Option<CellIndex>,
    food_placement: Box<dyn FoodPlacement>,
    tick_index: u64,
    generation: u64,
}

impl World {
    /// Creates a world on a `width × width` grid with a one-cell snake at `spawn`.
    pub fn new(width: u32, spawn: u32) -> Result<Self, WorldError> {
        Self::from_config(Config::new(width, spawn))
    }

    /// Creates a world using the food policy carried by the configuration.
    pub fn from_config(config: Config) -> Result<Self, WorldError> {
        let food_placement = config.food.build();
        Self::with_food_placement(config, food_placement)
    }

    /// Creates a world that consults a host-provided placement strategy.
    ///
    /// The food policy stored in `config` is ignored.
    pub fn with_food_placement(
        config: Config,
        food_placement: Box<dyn FoodPlacement>,
    ) -> Result<Self, WorldError> {
        if config.width < MIN_GRID_WIDTH {
            return Err(WorldError::WidthTooSmall {
                width: config.width,
                minimum: MIN_GRID_WIDTH,
            });
        }

        let width = GridWidth::new(config.width);
        let cell_count = width.cell_count().ok_or(WorldError::WidthTooLarge {
            width: config.width,
        })?;

        let spawn = CellIndex::new(config.spawn);
        if !width.contains(spawn) {
            return Err(WorldError::SpawnOutOfRange {
                spawn: config.spawn,
                cell_count,
            });
        }

        let mut world = Self {
            width,
            body: vec![spawn],
            direction: config.direction,
            pending_direction: config.direction,
            status: Status::Playing,
            food: None,
            food_placement,
            tick_index: 0,
            generation: 0,
        };
        world.food = world.choose_food();
        Ok(world)
    }

    /// Queues a heading for the next step.
    ///
    /// A request pointing straight back into the neck is dropped silently.
    pub fn change_direction(&mut self, direction: Direction) {
        let _ = self.queue_direction(direction);
    }

    /// Advances the simulation by one tick. Has no effect once the game ended.
    pub fn step(&mut self) {
        self.advance(&mut |_| {});
    }

    fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.body.len() > 1 && self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    fn advance(&mut self, emit: &mut impl FnMut(Event)) {
        if self.status.is_terminal() {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        self.direction = self.pending_direction;

        let Some(head) = self.body.first().copied() else {
            return;
        };
        let Some(next_head) = self.width.neighbor(head, self.direction) else {
            return;
        };

        if self.body.contains(&next_head) {
            self.finish(Status::Lost, emit);
            return;
        }

        if self.food == Some(next_head) {
            self.body.insert(0, next_head);
            self.generation = self.generation.wrapping_add(1);
            emit(Event::SnakeAdvanced {
                from: head,
                to: next_head,
            });
            emit(Event::FoodConsumed {
                cell: next_head,
                length: self.body.len(),
            });
            debug!(
                cell = next_head.get(),
                length = self.body.len(),
                "snake grew"
            );

            self.food = self.choose_food();
            match self.food {
                Some(cell) => {
                    debug!(cell = cell.get(), "food placed");
                    emit(Event::FoodPlaced { cell });
                }
                None => self.finish(Status::Won, emit),
            }
            return;
        }

        let _ = self.body.pop();
        self.body.insert(0, next_head);
        emit(Event::SnakeAdvanced {
            from: head,
            to: next_head,
        });
    }

    fn finish(&mut self, status: Status, emit: &mut impl FnMut(Event)) {
        self.status = status;
        info!(
            ?status,
            tick = self.tick_index,
            length = self.body.len(),
            "game finished"
        );
        emit(Event::StatusChanged { status });
    }

    fn choose_food(&mut self) -> Option<CellIndex> {
        let body = BodyView::new(&self.body, self.width);
        match self.food_placement.place(body) {
            Some(cell) if self.width.contains(cell) && !body.contains(cell) => Some(cell),
            _ => first_free_cell(body),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ChangeDirection { direction } => {
            if world.queue_direction(direction) {
                out_events.push(Event::DirectionQueued { direction });
            }
        }
        Command::Step => world.advance(&mut |event| out_events.push(event)),
    }
}

/// Query functions that provide read-only access to the world state.
///
/// Together these form the export bridge a renderer reads once per tick.
pub mod query {
    use gridsnake_core::{BodyView, CellIndex, Direction, GridWidth, Status, CELL_BYTES};

    use super::World;

    /// Number of cells along one edge of the grid.
    #[must_use]
    pub fn width(world: &World) -> u32 {
        world.width.get()
    }

    /// Typed width of the grid.
    #[must_use]
    pub fn grid_width(world: &World) -> GridWidth {
        world.width
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(world: &World) -> Status {
        world.status
    }

    /// Number of body segments.
    #[must_use]
    pub fn body_length(world: &World) -> usize {
        world.body.len()
    }

    /// Borrows the body cells, head first, without copying them.
    #[must_use]
    pub fn body(world: &World) -> BodyView<'_> {
        BodyView::new(&world.body, world.width)
    }

    /// Captures the address, length and generation of the body buffer.
    #[must_use]
    pub fn body_location(world: &World) -> BodyLocation {
        BodyLocation {
            address: world.body.as_ptr(),
            length: world.body.len(),
            generation: world.generation,
        }
    }

    /// Cell currently holding the food, absent once the grid is full.
    #[must_use]
    pub fn food(world: &World) -> Option<CellIndex> {
        world.food
    }

    /// Heading committed by the most recent step.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.direction
    }

    /// Heading the next step will commit.
    #[must_use]
    pub fn pending_direction(world: &World) -> Direction {
        world.pending_direction
    }

    /// Number of steps taken while the game was playing.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Location of the body buffer as seen by an external reader.
    ///
    /// The buffer holds `length` consecutive [`CellIndex`] values, each a
    /// 4-byte integer. A location must be fetched again after every step:
    /// growth may move the buffer, which is signalled by a new generation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BodyLocation {
        address: *const CellIndex,
        length: usize,
        generation: u64,
    }

    impl BodyLocation {
        /// Pointer to the head cell.
        #[must_use]
        pub fn as_ptr(&self) -> *const CellIndex {
            self.address
        }

        /// Numeric address of the head cell.
        #[must_use]
        pub fn address(&self) -> usize {
            self.address as usize
        }

        /// Number of cells stored at the address.
        #[must_use]
        pub const fn length(&self) -> usize {
            self.length
        }

        /// Number of bytes stored at the address.
        #[must_use]
        pub const fn byte_length(&self) -> usize {
            self.length * CELL_BYTES
        }

        /// Number of growth steps the body had taken when captured.
        #[must_use]
        pub const fn generation(&self) -> u64 {
            self.generation
        }

        /// Reports whether the location still describes the live body buffer.
        #[must_use]
        pub fn is_current(&self, world: &World) -> bool {
            *self == body_location(world)
        }
    }
}
