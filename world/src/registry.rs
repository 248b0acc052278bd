//! Point registries tracking hazards and pickups.

use std::collections::BTreeSet;

use cavern_core::Point;

/// Ordered set of tiles holding one kind of item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PointRegistry {
    entries: BTreeSet<Point>,
}

impl PointRegistry {
    pub(crate) fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            entries: points.into_iter().collect(),
        }
    }

    /// Records the point, returning `false` when it was already present.
    pub(crate) fn insert(&mut self, point: Point) -> bool {
        self.entries.insert(point)
    }

    /// Forgets the point, returning whether it was present.
    pub(crate) fn remove(&mut self, point: Point) -> bool {
        self.entries.remove(&point)
    }

    pub(crate) fn contains(&self, point: Point) -> bool {
        self.entries.contains(&point)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.entries.iter().copied()
    }

    /// Empties the registry and hands back every point it held.
    pub(crate) fn drain(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_iterates_in_point_order() {
        let registry =
            PointRegistry::from_points([Point::new(3, 1), Point::new(1, 2), Point::new(1, 1)]);
        let points: Vec<Point> = registry.iter().collect();
        assert_eq!(
            points,
            vec![Point::new(1, 1), Point::new(1, 2), Point::new(3, 1)]
        );
    }

    #[test]
    fn drain_leaves_registry_empty() {
        let mut registry = PointRegistry::default();
        assert!(registry.insert(Point::new(2, 2)));
        assert!(!registry.insert(Point::new(2, 2)));

        let drained = registry.drain();
        assert_eq!(drained, vec![Point::new(2, 2)]);
        assert_eq!(registry.len(), 0);
        assert!(!registry.contains(Point::new(2, 2)));
    }
}
