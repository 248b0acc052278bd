//! Dense row-major grids addressed by [`Point`].

use serde::{Deserialize, Serialize};

use crate::{Point, Tile};

/// Dimensions of a grid measured in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles covered by the grid.
    #[must_use]
    pub fn area(&self) -> usize {
        let area = u64::from(self.width) * u64::from(self.height);
        usize::try_from(area).unwrap_or(0)
    }

    /// Reports whether the point lies inside the grid.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x() >= 0
            && point.y() >= 0
            && point.x().unsigned_abs() < self.width
            && point.y().unsigned_abs() < self.height
    }

    /// Reports whether the point lies on the outermost one-tile ring.
    #[must_use]
    pub fn is_border(&self, point: Point) -> bool {
        self.contains(point)
            && (point.x() == 0
                || point.y() == 0
                || point.x().unsigned_abs() + 1 == self.width
                || point.y().unsigned_abs() + 1 == self.height)
    }

    /// Iterates every point of the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    fn index(&self, point: Point) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        let row = usize::try_from(point.y()).ok()?;
        let column = usize::try_from(point.x()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Dense grid storing one value per tile in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    size: GridSize,
    cells: Vec<T>,
}

/// Grid of tiles describing terrain, occupants or a rendered projection.
pub type TileGrid = Grid<Tile>;

impl<T: Copy> Grid<T> {
    /// Creates a grid where every tile holds `value`.
    #[must_use]
    pub fn filled(size: GridSize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size.area()],
        }
    }

    /// Rebuilds a grid from raw row-major cells, rejecting mismatched lengths.
    #[must_use]
    pub fn from_cells(size: GridSize, cells: Vec<T>) -> Option<Self> {
        if cells.len() != size.area() {
            return None;
        }
        Some(Self { size, cells })
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Reports whether the point lies inside the grid.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.size.contains(point)
    }

    /// Value stored at the point, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<T> {
        self.size
            .index(point)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Stores `value` at the point. Points outside the grid are ignored.
    pub fn set(&mut self, point: Point, value: T) {
        if let Some(slot) = self
            .size
            .index(point)
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = value;
        }
    }

    /// Reports whether the grid holds exactly one value per tile.
    ///
    /// Always true for grids built here; deserialised grids may be short.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.len() == self.size.area()
    }

    /// Raw row-major cells.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterates every point paired with its value in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, T)> + '_ {
        self.size.points().zip(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_points_are_rejected() {
        let mut grid = Grid::filled(GridSize::new(3, 2), 0_u8);
        grid.set(Point::new(-1, 0), 9);
        grid.set(Point::new(3, 0), 9);
        grid.set(Point::new(0, 2), 9);

        assert!(grid.cells().iter().all(|value| *value == 0));
        assert_eq!(grid.get(Point::new(-1, 0)), None);
        assert_eq!(grid.get(Point::new(2, 1)), Some(0));
    }

    #[test]
    fn cells_are_row_major() {
        let mut grid = Grid::filled(GridSize::new(3, 2), 0_u8);
        grid.set(Point::new(1, 1), 7);
        assert_eq!(grid.cells()[4], 7);

        let points: Vec<Point> = grid.size().points().take(4).collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn border_detection_matches_outer_ring() {
        let size = GridSize::new(4, 3);
        assert!(size.is_border(Point::new(0, 1)));
        assert!(size.is_border(Point::new(3, 1)));
        assert!(size.is_border(Point::new(2, 2)));
        assert!(!size.is_border(Point::new(1, 1)));
        assert!(!size.is_border(Point::new(4, 1)));
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert!(Grid::from_cells(GridSize::new(2, 2), vec![0_u8; 3]).is_none());
        assert!(Grid::from_cells(GridSize::new(2, 2), vec![0_u8; 4]).is_some());
    }

    #[test]
    fn short_deserialised_grid_is_incomplete() {
        let size = GridSize::new(3, 2);
        let bytes = bincode::serialize(&(size, vec![1_u8; 4])).expect("serialize");
        let grid: Grid<u8> = bincode::deserialize(&bytes).expect("deserialize");

        assert_eq!(grid.size(), size);
        assert!(!grid.is_complete());
        assert!(Grid::filled(size, 0_u8).is_complete());
    }
}
