//! L-shaped corridors joining two room centers.

use cavern_core::{Corridor, Point, CORRIDOR_SHAPE_SEED};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Order in which the two straight runs of a corridor are laid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorShape {
    /// Vertical run along the first center's column, then horizontal along
    /// the second center's row.
    VerticalFirst,
    /// Horizontal run along the first center's row, then vertical along the
    /// second center's column.
    HorizontalFirst,
}

/// Builds corridors whose shape is drawn from a generator reseeded for every
/// corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorridorRouter {
    shape_seed: u64,
}

impl Default for CorridorRouter {
    fn default() -> Self {
        Self::new(CORRIDOR_SHAPE_SEED)
    }
}

impl CorridorRouter {
    /// Creates a router drawing shapes from `shape_seed`.
    #[must_use]
    pub const fn new(shape_seed: u64) -> Self {
        Self { shape_seed }
    }

    /// Shape used for the next corridor.
    ///
    /// The generator restarts from the same seed on every call, so every
    /// corridor built by one router shares a shape.
    #[must_use]
    pub fn shape(&self) -> CorridorShape {
        let mut rng = ChaCha8Rng::seed_from_u64(self.shape_seed);
        if rng.gen_bool(0.5) {
            CorridorShape::VerticalFirst
        } else {
            CorridorShape::HorizontalFirst
        }
    }

    /// Connects two centers with an L-shaped corridor.
    #[must_use]
    pub fn connect(&self, from: Point, to: Point) -> Corridor {
        route(from, to, self.shape())
    }
}

/// Lays the two straight runs joining `from` and `to` in the requested order.
#[must_use]
pub fn route(from: Point, to: Point, shape: CorridorShape) -> Corridor {
    let mut points = Vec::new();
    match shape {
        CorridorShape::VerticalFirst => {
            vertical_run(&mut points, from.x(), from.y(), to.y());
            horizontal_run(&mut points, to.y(), from.x(), to.x());
        }
        CorridorShape::HorizontalFirst => {
            horizontal_run(&mut points, from.y(), from.x(), to.x());
            vertical_run(&mut points, to.x(), from.y(), to.y());
        }
    }
    Corridor::new(points)
}

fn vertical_run(points: &mut Vec<Point>, x: i32, a: i32, b: i32) {
    points.extend((a.min(b)..=a.max(b)).map(|y| Point::new(x, y)));
}

fn horizontal_run(points: &mut Vec<Point>, y: i32, a: i32, b: i32) {
    points.extend((a.min(b)..=a.max(b)).map(|x| Point::new(x, y)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_first_turns_at_first_column() {
        let corridor = route(
            Point::new(2, 8),
            Point::new(5, 6),
            CorridorShape::VerticalFirst,
        );
        assert_eq!(
            corridor.points(),
            &[
                Point::new(2, 6),
                Point::new(2, 7),
                Point::new(2, 8),
                Point::new(2, 6),
                Point::new(3, 6),
                Point::new(4, 6),
                Point::new(5, 6),
            ]
        );
    }

    #[test]
    fn horizontal_first_turns_at_second_column() {
        let corridor = route(
            Point::new(2, 8),
            Point::new(5, 6),
            CorridorShape::HorizontalFirst,
        );
        let points = corridor.points();
        assert!(points.contains(&Point::new(2, 8)));
        assert!(points.contains(&Point::new(5, 8)));
        assert!(points.contains(&Point::new(5, 6)));
        assert!(!points.contains(&Point::new(2, 6)));
    }

    #[test]
    fn every_corridor_from_one_router_shares_a_shape() {
        let router = CorridorRouter::default();
        let first = router.shape();
        for _ in 0..8 {
            assert_eq!(router.shape(), first);
        }
    }

    #[test]
    fn corridor_covers_both_centers_and_the_corner() {
        let router = CorridorRouter::default();
        let from = Point::new(10, 3);
        let to = Point::new(4, 12);
        let corridor = router.connect(from, to);
        let points = corridor.points();

        assert!(points.contains(&from));
        assert!(points.contains(&to));
        assert_eq!(points.len(), 7 + 10);
        let corner = match router.shape() {
            CorridorShape::VerticalFirst => Point::new(10, 12),
            CorridorShape::HorizontalFirst => Point::new(4, 3),
        };
        assert!(points.contains(&corner));
    }
}
