use std::collections::HashSet;

use cavern_core::{GridSize, Point, Projection};
use cavern_system_generation::generate;
use cavern_system_transition::{compute_wave_order, DistanceField, WaveAnimation, WavePhase};
use cavern_system_visibility::VisibilityField;
use cavern_world::{query, World, WorldConfig};

fn standard_world(seed: u64) -> World {
    World::from_layout(generate(seed, GridSize::new(80, 50)), WorldConfig::default())
}

#[test]
fn batches_partition_every_reachable_tile() {
    let world = standard_world(42);
    let plan = compute_wave_order(&world);
    let field = DistanceField::relax(query::grid(&world));

    let mut seen = HashSet::new();
    for (index, batch) in plan.batches().iter().enumerate() {
        assert_eq!(batch.step as usize, index, "steps are contiguous");
        for point in &batch.points {
            assert!(seen.insert(*point), "{point:?} appears in two batches");
            assert_eq!(field.distance(*point), Some(batch.step));
        }
    }

    let reachable: HashSet<Point> = query::size(&world)
        .points()
        .filter(|point| field.distance(*point) != Some(DistanceField::UNREACHED))
        .collect();
    assert_eq!(seen, reachable);
    assert_eq!(plan.tile_count(), reachable.len());
}

#[test]
fn every_wall_opens_the_wave() {
    let world = standard_world(9);
    let plan = compute_wave_order(&world);
    let first: HashSet<Point> = plan.batches()[0].points.iter().copied().collect();

    for (point, tile) in query::grid(&world).iter() {
        assert_eq!(tile.is_wall(), first.contains(&point), "{point:?}");
    }
}

#[test]
fn finished_animation_shows_the_target_on_covered_tiles() {
    let world = standard_world(5);
    let mut field = VisibilityField::new(query::size(&world));
    let projections = field.recompute(&world);
    let physical = projections.physical.clone();
    let overlay = projections.overlay.clone();
    let plan = compute_wave_order(&world);
    let covered: HashSet<Point> = plan
        .batches()
        .iter()
        .flat_map(|batch| batch.points.iter().copied())
        .collect();

    let mut animation = WaveAnimation::new(plan, &physical, &overlay, Projection::Overlay, 77);
    let mut reveals = 0;
    while let Some(frame) = animation.next_frame() {
        if frame.phase == WavePhase::Reveal {
            reveals += 1;
        }
    }
    assert!(reveals > 0);
    assert!(animation.is_finished());
    assert!(animation.next_frame().is_none());

    for point in query::size(&world).points() {
        let expected = if covered.contains(&point) {
            overlay.get(point)
        } else {
            physical.get(point)
        };
        assert_eq!(animation.canvas().get(point), expected, "{point:?}");
    }
}
