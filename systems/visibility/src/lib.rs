#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Line-of-sight visibility and fog memory for both world projections.
//!
//! Every recompute walks the whole grid, tests each carved tile for line of
//! sight from the observer, updates a three-level fog memory, and renders the
//! physical and overlay projections from the result.

mod line;

use cavern_core::{
    derive_stream_seed, Grid, GridSize, Point, Projection, Tile, TileGrid,
    RNG_STREAM_FLICKER, STATIC_SHADES,
};
use cavern_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub use line::rasterize;

/// Fog memory recorded for a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityLevel {
    /// Never seen.
    #[default]
    Unseen,
    /// Seen earlier but not visible now.
    Remembered,
    /// Visible from the observer this tick.
    Visible,
}

/// Borrowed view of both rendered projections.
#[derive(Clone, Copy, Debug)]
pub struct Projections<'a> {
    /// Physical projection.
    pub physical: &'a TileGrid,
    /// Overlay projection.
    pub overlay: &'a TileGrid,
}

impl<'a> Projections<'a> {
    /// Projection of the requested kind.
    #[must_use]
    pub fn get(&self, projection: Projection) -> &'a TileGrid {
        match projection {
            Projection::Physical => self.physical,
            Projection::Overlay => self.overlay,
        }
    }
}

/// Captured fog memory and rendered projections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySnapshot {
    /// Fog memory per tile.
    pub memory: Grid<VisibilityLevel>,
    /// Last physical projection.
    pub physical: TileGrid,
    /// Last overlay projection.
    pub overlay: TileGrid,
    /// Number of recomputes performed.
    pub recomputes: u64,
}

/// Fog memory plus the two projections rendered from it.
#[derive(Clone, Debug)]
pub struct VisibilityField {
    memory: Grid<VisibilityLevel>,
    physical: TileGrid,
    overlay: TileGrid,
    recomputes: u64,
}

impl VisibilityField {
    /// Creates a field where nothing has been seen yet.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            memory: Grid::filled(size, VisibilityLevel::Unseen),
            physical: TileGrid::filled(size, Tile::Void),
            overlay: TileGrid::filled(size, Tile::Void),
            recomputes: 0,
        }
    }

    /// Recomputes fog memory and both projections from the current world.
    ///
    /// # Panics
    ///
    /// Panics when the field and world disagree on grid dimensions.
    pub fn recompute(&mut self, world: &World) -> Projections<'_> {
        let grid = query::grid(world);
        assert_eq!(
            grid.size(),
            self.memory.size(),
            "visibility field sized for a different world"
        );

        let observer = query::observer_position(world);
        let mut flicker = ChaCha8Rng::seed_from_u64(derive_stream_seed(
            query::seed(world),
            RNG_STREAM_FLICKER,
            self.recomputes,
        ));
        self.recomputes = self.recomputes.saturating_add(1);

        for (point, tile) in grid.iter() {
            if tile.is_void() {
                self.physical.set(point, Tile::Void);
                self.overlay.set(point, Tile::Void);
                continue;
            }

            if is_visible(grid, observer, point) {
                self.memory.set(point, VisibilityLevel::Visible);
                self.physical.set(point, physical_visible(tile));
                self.overlay.set(point, overlay_visible(tile, &mut flicker));
                continue;
            }

            let level = match self.memory.get(point) {
                Some(VisibilityLevel::Visible | VisibilityLevel::Remembered) => {
                    VisibilityLevel::Remembered
                }
                _ => VisibilityLevel::Unseen,
            };
            self.memory.set(point, level);
            let physical = match level {
                VisibilityLevel::Remembered => physical_remembered(tile),
                _ => Tile::Void,
            };
            self.physical.set(point, physical);
            self.overlay.set(point, Tile::Void);
        }

        self.projections()
    }

    /// Most recently rendered projections.
    #[must_use]
    pub fn projections(&self) -> Projections<'_> {
        Projections {
            physical: &self.physical,
            overlay: &self.overlay,
        }
    }

    /// Fog memory recorded for the tile.
    #[must_use]
    pub fn level(&self, point: Point) -> Option<VisibilityLevel> {
        self.memory.get(point)
    }

    /// Fog memory for every tile.
    #[must_use]
    pub fn memory(&self) -> &Grid<VisibilityLevel> {
        &self.memory
    }

    /// Number of recomputes performed so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Captures the fog memory and the rendered projections.
    #[must_use]
    pub fn snapshot(&self) -> VisibilitySnapshot {
        VisibilitySnapshot {
            memory: self.memory.clone(),
            physical: self.physical.clone(),
            overlay: self.overlay.clone(),
            recomputes: self.recomputes,
        }
    }

    /// Rebuilds a field from a snapshot, rejecting mismatched or short grids.
    #[must_use]
    pub fn restore(snapshot: VisibilitySnapshot) -> Option<Self> {
        let size = snapshot.memory.size();
        if snapshot.physical.size() != size || snapshot.overlay.size() != size {
            return None;
        }
        let complete = snapshot.memory.is_complete()
            && snapshot.physical.is_complete()
            && snapshot.overlay.is_complete();
        if !complete {
            return None;
        }
        Some(Self {
            memory: snapshot.memory,
            physical: snapshot.physical,
            overlay: snapshot.overlay,
            recomputes: snapshot.recomputes,
        })
    }
}

/// Reports whether no opaque tile sits strictly between `observer` and `target`.
#[must_use]
pub fn is_visible(grid: &TileGrid, observer: Point, target: Point) -> bool {
    let line = rasterize(observer, target);
    let interior = line.len().saturating_sub(1);
    line.iter()
        .take(interior)
        .skip(1)
        .all(|point| !grid.get(*point).is_some_and(Tile::is_opaque))
}

fn physical_visible(tile: Tile) -> Tile {
    match tile {
        Tile::Pickup => Tile::Floor,
        other => other,
    }
}

fn overlay_visible(tile: Tile, flicker: &mut ChaCha8Rng) -> Tile {
    match tile {
        Tile::Floor => Tile::static_floor(flicker.gen_range(0..STATIC_SHADES)),
        Tile::Hazard => Tile::OverlayFloor,
        Tile::Pickup => Tile::Pickup,
        Tile::Observer => Tile::OverlayObserver,
        Tile::Companion => Tile::OverlayCompanion,
        _ => Tile::OverlayWall,
    }
}

fn physical_remembered(tile: Tile) -> Tile {
    match tile {
        Tile::Wall(shade) => Tile::DimWall(shade),
        _ => Tile::DimFloor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_walls_block_sight_but_endpoints_do_not() {
        let mut grid = TileGrid::filled(GridSize::new(6, 3), Tile::Floor);
        grid.set(Point::new(3, 1), Tile::wall(0));

        assert!(is_visible(&grid, Point::new(1, 1), Point::new(3, 1)));
        assert!(!is_visible(&grid, Point::new(1, 1), Point::new(5, 1)));
        assert!(is_visible(&grid, Point::new(1, 1), Point::new(1, 1)));
    }

    #[test]
    fn overlay_substitutes_every_content_kind() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            overlay_visible(Tile::Floor, &mut rng),
            Tile::Static(_)
        ));
        assert_eq!(overlay_visible(Tile::Hazard, &mut rng), Tile::OverlayFloor);
        assert_eq!(overlay_visible(Tile::Pickup, &mut rng), Tile::Pickup);
        assert_eq!(
            overlay_visible(Tile::wall(2), &mut rng),
            Tile::OverlayWall
        );
        assert_eq!(
            overlay_visible(Tile::Observer, &mut rng),
            Tile::OverlayObserver
        );
    }

    #[test]
    fn remembered_tiles_dim_and_hide_pickups() {
        assert_eq!(physical_remembered(Tile::Hazard), Tile::DimFloor);
        assert_eq!(physical_remembered(Tile::Pickup), Tile::DimFloor);
        assert_eq!(
            physical_remembered(Tile::wall(4)),
            Tile::dim_wall(4)
        );
        assert_eq!(physical_visible(Tile::Pickup), Tile::Floor);
        assert_eq!(physical_visible(Tile::Hazard), Tile::Hazard);
    }
}
