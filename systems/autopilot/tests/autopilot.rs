use gridsnake_core::{CellIndex, Command, Direction, Event, Status};
use gridsnake_system_autopilot::Autopilot;
use gridsnake_system_food::FoodPolicy;
use gridsnake_world::{self as world, query, Config, World};

fn drive(world: &mut World, autopilot: &mut Autopilot, ticks: usize) -> Vec<Event> {
    let mut log = Vec::new();
    let mut events = Vec::new();

    for _ in 0..ticks {
        let mut commands = Vec::new();
        autopilot.handle(
            &events,
            query::body(world),
            query::food(world),
            query::direction(world),
            &mut commands,
        );

        events.clear();
        for command in commands {
            let mut generated = Vec::new();
            world::apply(world, command, &mut generated);
            assert!(
                matches!(generated.as_slice(), [Event::DirectionQueued { .. }]),
                "autopilot proposed a rejected heading: {command:?}"
            );
            events.extend(generated);
        }
        world::apply(world, Command::Step, &mut events);
        log.extend(events.iter().copied());
    }

    log
}

#[test]
fn autopilot_reaches_food() {
    let mut world = World::new(6, 20).expect("valid world");
    let mut autopilot = Autopilot::default();

    let log = drive(&mut world, &mut autopilot, 20);

    assert!(query::body_length(&world) > 1, "snake never ate");
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::FoodConsumed { .. })));
}

#[test]
fn autopilot_goes_quiet_after_game_ends() {
    let mut world = World::from_config(
        Config::new(5, 5).with_food(FoodPolicy::Scheduled(
            [0, 1, 6, 24].into_iter().map(CellIndex::new).collect(),
        )),
    )
    .expect("valid world");

    let mut events = Vec::new();
    for direction in [None, Some(Direction::Right), Some(Direction::Down), Some(Direction::Left)] {
        if let Some(direction) = direction {
            world::apply(&mut world, Command::ChangeDirection { direction }, &mut events);
        }
        world::apply(&mut world, Command::Step, &mut events);
    }
    assert_eq!(query::status(&world), Status::Lost);

    let mut autopilot = Autopilot::default();
    let mut commands = Vec::new();
    autopilot.handle(
        &events,
        query::body(&world),
        query::food(&world),
        query::direction(&world),
        &mut commands,
    );

    assert!(autopilot.is_halted());
    assert!(commands.is_empty());
}
