use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use cavern_core::{Direction, GridSize, Projection, Tile};
use cavern_system_session::{new_session, Intent, Session, SessionSnapshot};
use cavern_world::query;

/// Fixed mix of moves and switches exercising every intent.
fn script() -> Vec<Intent> {
    let pattern = [
        Intent::Move(Direction::Right),
        Intent::Move(Direction::Right),
        Intent::Move(Direction::Up),
        Intent::SwitchProjection,
        Intent::Move(Direction::Left),
        Intent::Move(Direction::Down),
        Intent::None,
        Intent::Move(Direction::Down),
        Intent::SwitchProjection,
        Intent::Move(Direction::Right),
    ];
    pattern.iter().copied().cycle().take(60).collect()
}

/// Plays the intents, finishing every switch, and hashes everything a shell
/// could observe along the way.
fn play(session: &mut Session, intents: &[Intent]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for intent in intents {
        let report = session.tick(*intent);
        format!("{:?}", report.events).hash(&mut hasher);
        report.blocked.hash(&mut hasher);
        if let Some(mut animation) = report.transition {
            while let Some(frame) = animation.next_frame() {
                frame.grid.hash(&mut hasher);
            }
            format!("{:?}", session.finalize_switch()).hash(&mut hasher);
        }
        let status = session.status();
        (status.lives, status.charge, status.active_projection).hash(&mut hasher);
        session.projections().physical.hash(&mut hasher);
        session.projections().overlay.hash(&mut hasher);
    }
    hasher.finish()
}

#[test]
fn seed_42_starts_in_the_physical_projection_on_floor() {
    let session = new_session(42, 80, 50);
    let world = session.world();

    assert!(!query::rooms(world).is_empty());
    assert_eq!(query::observer_underlying(world), Tile::Floor);
    assert_eq!(query::active_projection(world), Projection::Physical);
    assert_eq!(session.status().lives, 5);
    assert_eq!(session.status().charge_threshold, 5);
    assert_eq!(session.welcome_banner(), cavern_core::WELCOME_BANNER);
}

#[test]
fn replaying_a_script_is_deterministic() {
    let intents = script();
    let first = play(&mut new_session(1234, 80, 50), &intents);
    let second = play(&mut new_session(1234, 80, 50), &intents);
    assert_eq!(first, second);
}

#[test]
fn companion_stays_adjacent_while_walking() {
    let mut session = new_session(42, 80, 50);
    let order = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
    let mut heading = 0;
    for _ in 0..200 {
        let Some(turn) = (0..order.len()).find(|turn| {
            session.can_move(order[(heading + turn) % order.len()])
        }) else {
            break;
        };
        heading = (heading + turn) % order.len();
        let report = session.tick(Intent::Move(order[heading]));
        assert!(!report.blocked);

        let world = session.world();
        let observer = query::observer_position(world);
        let companion = query::companion_position(world);
        assert!(
            observer.chebyshev_distance(companion) <= 1,
            "{observer:?} left {companion:?} behind"
        );
        assert_ne!(observer, companion);
    }
}

#[test]
fn switching_twice_returns_to_physical() {
    let mut session = new_session(8, 70, 45);
    for expected in [Projection::Overlay, Projection::Physical] {
        let report = session.tick(Intent::SwitchProjection);
        let mut animation = report.transition.expect("switch animation");
        while animation.next_frame().is_some() {}
        let _ = session.finalize_switch();
        assert_eq!(session.status().active_projection, expected);
    }
    assert_eq!(query::switch_count(session.world()), 2);
}

#[test]
fn restored_session_continues_identically() {
    let intents = script();
    let (before, after) = intents.split_at(25);

    let mut original = new_session(77, 80, 50);
    let _ = play(&mut original, before);

    let bytes = bincode::serialize(&original.snapshot()).expect("serialize");
    let decoded: SessionSnapshot = bincode::deserialize(&bytes).expect("deserialize");
    let mut restored = Session::restore(decoded).expect("snapshot is consistent");
    assert_eq!(restored.snapshot(), original.snapshot());

    assert_eq!(play(&mut original, after), play(&mut restored, after));
}

#[test]
fn restore_rejects_mismatched_fog() {
    let session = new_session(5, 60, 40);
    let other = Session::new(5, GridSize::new(50, 40));
    let snapshot = SessionSnapshot {
        world: session.snapshot().world,
        visibility: other.snapshot().visibility,
    };
    assert!(Session::restore(snapshot).is_err());
}
