//! Distance-to-wall field built by iterative relaxation.

use cavern_core::{Grid, GridSize, Point, TileGrid};

/// Per-tile distance to the nearest wall.
///
/// Walls start at zero and every other tile at [`DistanceField::UNREACHED`].
/// Full sweeps over the interior lower a tile to one more than its smallest
/// cardinal neighbour whenever it exceeds that neighbour by two or more,
/// until a sweep changes nothing. The result approximates, but does not
/// always equal, the shortest cardinal distance. Border tiles that are not
/// walls keep the sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    distances: Grid<u32>,
    sweeps: u32,
}

impl DistanceField {
    /// Sentinel for tiles no wall reaches.
    pub const UNREACHED: u32 = u32::MAX;

    /// Relaxes distances outward from every wall of `grid`.
    #[must_use]
    pub fn relax(grid: &TileGrid) -> Self {
        let size = grid.size();
        let mut distances = Grid::filled(size, Self::UNREACHED);
        for (point, tile) in grid.iter() {
            if tile.is_wall() {
                distances.set(point, 0);
            }
        }

        let width = i32::try_from(size.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(size.height()).unwrap_or(i32::MAX);
        let mut sweeps = 0;
        let mut changed = true;

        while changed {
            changed = false;
            sweeps += 1;
            for x in 1..width - 1 {
                for y in 1..height - 1 {
                    let point = Point::new(x, y);
                    let nearest = point
                        .cardinal_neighbors()
                        .iter()
                        .filter_map(|neighbor| distances.get(*neighbor))
                        .min()
                        .unwrap_or(Self::UNREACHED);
                    if nearest == Self::UNREACHED {
                        continue;
                    }
                    let current = distances.get(point).unwrap_or(Self::UNREACHED);
                    if current.saturating_sub(nearest) > 1 {
                        distances.set(point, nearest + 1);
                        changed = true;
                    }
                }
            }
        }

        Self { distances, sweeps }
    }

    /// Dimensions of the field.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.distances.size()
    }

    /// Distance recorded for the tile, if it lies inside the field.
    #[must_use]
    pub fn distance(&self, point: Point) -> Option<u32> {
        self.distances.get(point)
    }

    /// Largest finite distance, or `None` when no wall exists.
    #[must_use]
    pub fn max_step(&self) -> Option<u32> {
        self.distances
            .cells()
            .iter()
            .copied()
            .filter(|distance| *distance != Self::UNREACHED)
            .max()
    }

    /// Number of full sweeps performed, including the final quiet one.
    #[must_use]
    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    /// Tiles whose distance equals `step`, column by column.
    #[must_use]
    pub fn tiles_at(&self, step: u32) -> Vec<Point> {
        let size = self.size();
        let width = i32::try_from(size.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(size.height()).unwrap_or(i32::MAX);
        (0..width)
            .flat_map(|x| (0..height).map(move |y| Point::new(x, y)))
            .filter(|point| self.distances.get(*point) == Some(step))
            .collect()
    }
}
