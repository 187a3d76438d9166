#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line host that drives a headless grid snake game.

mod frame;
mod frame_transfer;
mod script;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use gridsnake_core::{Command, Event};
use gridsnake_system_autopilot::Autopilot;
use gridsnake_system_food::FoodPolicy;
use gridsnake_world::{self as world, query, Config, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::frame_transfer::FrameSnapshot;

const DEFAULT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Runs a grid snake simulation without a graphical front end.
#[derive(Debug, Parser)]
#[command(name = "gridsnake", version)]
struct Args {
    /// Number of cells along one edge of the square grid.
    #[arg(long, default_value_t = 8)]
    width: u32,
    /// Starting cell of the snake; derived from the seed when omitted.
    #[arg(long)]
    spawn: Option<u32>,
    /// Seed for the spawn cell and seeded food placement.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 64)]
    ticks: usize,
    /// Food placement policy.
    #[arg(long, value_enum, default_value_t = FoodArg::FirstFree)]
    food: FoodArg,
    /// Heading script, one of U, D, L, R or `.` per tick.
    #[arg(long)]
    script: Option<String>,
    /// Let the autopilot steer toward the food.
    #[arg(long)]
    autopilot: bool,
    /// Print the board after every tick.
    #[arg(long)]
    frames: bool,
    /// Print an encoded frame snapshot after the run.
    #[arg(long)]
    export: bool,
    /// Decode and draw a frame snapshot instead of running a game.
    #[arg(long, value_name = "SNAPSHOT")]
    decode: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FoodArg {
    FirstFree,
    Seeded,
}

/// Entry point for the grid snake command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.decode.as_deref() {
        Some(snapshot) => draw_snapshot(snapshot),
        None => run(&args),
    }
}

fn run(args: &Args) -> Result<()> {
    let script = args
        .script
        .as_deref()
        .map(script::parse_script)
        .transpose()
        .context("invalid --script")?
        .unwrap_or_default();

    if args.frames && args.width > frame::MAX_RENDER_WIDTH {
        bail!(
            "--frames draws grids up to width {}, got {}",
            frame::MAX_RENDER_WIDTH,
            args.width
        );
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let spawn = match args.spawn {
        Some(spawn) => spawn,
        None => rng.gen_range(0..args.width.saturating_mul(args.width).max(1)),
    };
    let food = match args.food {
        FoodArg::FirstFree => FoodPolicy::FirstFree,
        FoodArg::Seeded => FoodPolicy::Seeded(rng.gen()),
    };

    let mut world = World::from_config(Config::new(args.width, spawn).with_food(food))
        .with_context(|| {
            format!(
                "cannot create a {width}x{width} world spawning at {spawn}",
                width = args.width
            )
        })?;
    info!(width = args.width, spawn, "world created");

    let mut autopilot = args.autopilot.then(Autopilot::default);
    let mut events: Vec<Event> = Vec::new();
    let mut ticks_run = 0;

    for tick in 0..args.ticks {
        let mut commands = Vec::new();
        if let Some(Some(direction)) = script.get(tick) {
            commands.push(Command::ChangeDirection {
                direction: *direction,
            });
        }
        if let Some(autopilot) = autopilot.as_mut() {
            autopilot.handle(
                &events,
                query::body(&world),
                query::food(&world),
                query::direction(&world),
                &mut commands,
            );
        }

        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        world::apply(&mut world, Command::Step, &mut events);
        ticks_run = tick + 1;

        for event in &events {
            debug!(tick = ticks_run, ?event, "world event");
        }

        if args.frames {
            println!("tick {ticks_run}");
            print!("{}", frame::render(query::body(&world), query::food(&world)));
        }

        if query::status(&world).is_terminal() {
            break;
        }
    }

    println!(
        "status: {:?}, length: {}, ticks: {ticks_run}",
        query::status(&world),
        query::body_length(&world)
    );

    if args.export {
        println!("{}", FrameSnapshot::capture(&world).encode());
    }

    Ok(())
}

fn draw_snapshot(snapshot: &str) -> Result<()> {
    let frame = FrameSnapshot::decode(snapshot).context("invalid frame snapshot")?;
    print!("{}", frame::render(frame.body(), None));
    println!(
        "status: {:?}, length: {}",
        frame.status,
        frame.cells.len()
    );
    Ok(())
}
