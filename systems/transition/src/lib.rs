#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wavefront ordering and frame sequencing for projection switches.
//!
//! A switch reveals the target projection in batches of tiles that share the
//! same distance to the nearest wall, so the change ripples outward from
//! every wall at once. [`compute_wave_order`] produces the batches and
//! [`WaveAnimation`] turns them into cover and reveal frames.

mod distance;

use std::time::Duration;

use cavern_core::{Point, Projection, Tile, TileGrid, TRANSITION_SHADES};
use cavern_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use distance::DistanceField;

/// Tiles revealed together during one step of a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveBatch {
    /// Distance to the nearest wall shared by every tile in the batch.
    pub step: u32,
    /// Tiles in the batch, column by column.
    pub points: Vec<Point>,
}

/// Ordered batches covering every tile a wall reaches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WavePlan {
    batches: Vec<WaveBatch>,
}

impl WavePlan {
    /// Groups the tiles of a relaxed field by distance, nearest first.
    #[must_use]
    pub fn from_field(field: &DistanceField) -> Self {
        let Some(max_step) = field.max_step() else {
            return Self::default();
        };
        let batches = (0..=max_step)
            .map(|step| WaveBatch {
                step,
                points: field.tiles_at(step),
            })
            .collect();
        Self { batches }
    }

    /// Batches in increasing step order.
    #[must_use]
    pub fn batches(&self) -> &[WaveBatch] {
        &self.batches
    }

    /// Largest step in the plan, or `None` for an empty plan.
    #[must_use]
    pub fn max_step(&self) -> Option<u32> {
        self.batches.last().map(|batch| batch.step)
    }

    /// Reports whether the plan holds no batches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total number of tiles across all batches.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.points.len()).sum()
    }
}

/// Computes the reveal order for a projection switch of `world`.
#[must_use]
pub fn compute_wave_order(world: &World) -> WavePlan {
    WavePlan::from_field(&DistanceField::relax(query::grid(world)))
}

/// Pause held after each frame of the provided step.
#[must_use]
pub fn frame_pause(step: u32) -> Duration {
    Duration::from_millis(u64::from(step) * u64::from(step) / 3)
}

/// Which half of a step a frame shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// The batch is covered with transition tiles.
    Cover,
    /// The batch shows the target projection's content.
    Reveal,
}

/// One rendered frame of a transition.
#[derive(Clone, Copy, Debug)]
pub struct WaveFrame<'a> {
    /// Step the frame belongs to.
    pub step: u32,
    /// Half of the step the frame shows.
    pub phase: WavePhase,
    /// Full grid to display.
    pub grid: &'a TileGrid,
    /// Time to hold the frame.
    pub pause: Duration,
}

/// Frame sequencer that morphs one projection into the other.
///
/// Each step yields a cover frame followed by a reveal frame. Once the last
/// reveal frame has been produced the canvas equals the target projection on
/// every tile the plan covers.
#[derive(Clone, Debug)]
pub struct WaveAnimation {
    plan: WavePlan,
    canvas: TileGrid,
    target: TileGrid,
    destination: Projection,
    shades: ChaCha8Rng,
    cursor: usize,
}

impl WaveAnimation {
    /// Prepares an animation from the displayed grid toward `target`.
    ///
    /// `shade_seed` feeds the cover shades used when heading back to the
    /// physical projection.
    ///
    /// # Panics
    ///
    /// Panics when the two grids differ in size.
    #[must_use]
    pub fn new(
        plan: WavePlan,
        displayed: &TileGrid,
        target: &TileGrid,
        destination: Projection,
        shade_seed: u64,
    ) -> Self {
        assert_eq!(
            displayed.size(),
            target.size(),
            "transition between grids of different sizes"
        );
        Self {
            plan,
            canvas: displayed.clone(),
            target: target.clone(),
            destination,
            shades: ChaCha8Rng::seed_from_u64(shade_seed),
            cursor: 0,
        }
    }

    /// Projection the animation heads toward.
    #[must_use]
    pub fn destination(&self) -> Projection {
        self.destination
    }

    /// Reports whether every frame has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.plan.batches.len() * 2
    }

    /// Grid as of the most recent frame.
    #[must_use]
    pub fn canvas(&self) -> &TileGrid {
        &self.canvas
    }

    /// Produces the next frame, or `None` once the animation is complete.
    pub fn next_frame(&mut self) -> Option<WaveFrame<'_>> {
        let batch = self.plan.batches.get(self.cursor / 2)?;
        let phase = if self.cursor % 2 == 0 {
            WavePhase::Cover
        } else {
            WavePhase::Reveal
        };

        for point in &batch.points {
            let tile = match phase {
                WavePhase::Cover => match self.destination {
                    Projection::Overlay => Tile::ToOverlay,
                    Projection::Physical => {
                        Tile::to_physical(self.shades.gen_range(0..TRANSITION_SHADES))
                    }
                },
                WavePhase::Reveal => self.target.get(*point).unwrap_or(Tile::Void),
            };
            self.canvas.set(*point, tile);
        }

        self.cursor += 1;
        Some(WaveFrame {
            step: batch.step,
            phase,
            grid: &self.canvas,
            pause: frame_pause(batch.step),
        })
    }
}

#[cfg(test)]
mod tests {
    use cavern_core::GridSize;

    use super::*;

    fn boxed(size: GridSize) -> TileGrid {
        let mut grid = TileGrid::filled(size, Tile::Floor);
        for point in size.points() {
            if size.is_border(point) {
                grid.set(point, Tile::wall(2));
            }
        }
        grid
    }

    #[test]
    fn pause_grows_quadratically() {
        assert_eq!(frame_pause(0), Duration::ZERO);
        assert_eq!(frame_pause(1), Duration::ZERO);
        assert_eq!(frame_pause(3), Duration::from_millis(3));
        assert_eq!(frame_pause(10), Duration::from_millis(33));
    }

    #[test]
    fn plan_from_empty_field_has_no_batches() {
        let grid = TileGrid::filled(GridSize::new(4, 4), Tile::Void);
        let plan = WavePlan::from_field(&DistanceField::relax(&grid));
        assert!(plan.is_empty());
        assert_eq!(plan.max_step(), None);
    }

    #[test]
    fn animation_alternates_cover_and_reveal() {
        let size = GridSize::new(6, 6);
        let displayed = boxed(size);
        let target = TileGrid::filled(size, Tile::OverlayWall);
        let plan = WavePlan::from_field(&DistanceField::relax(&displayed));
        let batches = plan.batches().len();

        let mut animation = WaveAnimation::new(plan, &displayed, &target, Projection::Overlay, 9);
        let mut phases = Vec::new();
        while let Some(frame) = animation.next_frame() {
            if frame.phase == WavePhase::Cover && frame.step == 1 {
                assert_eq!(frame.grid.get(Point::new(1, 1)), Some(Tile::ToOverlay));
                assert_eq!(frame.grid.get(Point::new(0, 0)), Some(Tile::OverlayWall));
            }
            phases.push((frame.step, frame.phase));
        }

        assert_eq!(phases.len(), batches * 2);
        assert_eq!(phases[0], (0, WavePhase::Cover));
        assert_eq!(phases[1], (0, WavePhase::Reveal));
        assert!(animation.is_finished());
        assert_eq!(animation.canvas(), &target);
    }

    #[test]
    fn cover_tiles_depend_on_destination() {
        let size = GridSize::new(5, 5);
        let displayed = boxed(size);
        let plan = WavePlan::from_field(&DistanceField::relax(&displayed));

        let mut to_overlay =
            WaveAnimation::new(plan.clone(), &displayed, &displayed, Projection::Overlay, 1);
        let frame = to_overlay.next_frame().expect("first frame");
        assert_eq!(frame.grid.get(Point::new(0, 0)), Some(Tile::ToOverlay));

        let mut to_physical =
            WaveAnimation::new(plan, &displayed, &displayed, Projection::Physical, 1);
        let frame = to_physical.next_frame().expect("first frame");
        assert!(matches!(
            frame.grid.get(Point::new(0, 0)),
            Some(Tile::ToPhysical(_))
        ));
    }
}
