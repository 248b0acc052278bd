//! Complete capture and restoration of world state.

use cavern_core::{Point, Tile, WorldSnapshot};
use thiserror::Error;

use crate::{
    occupants::{Companion, Observer},
    registry::PointRegistry,
    World,
};

/// Reasons a snapshot cannot be turned back into a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The grid does not hold one tile per cell of its declared size.
    #[error("grid declares {expected} tiles but holds {found}")]
    GridSizeMismatch {
        /// Tile count implied by the grid dimensions.
        expected: usize,
        /// Tiles actually stored.
        found: usize,
    },
    /// An occupant lies outside the grid.
    #[error("occupant at {position:?} lies outside the grid")]
    OccupantOutOfBounds {
        /// Offending position.
        position: Point,
    },
    /// Observer and companion claim the same tile.
    #[error("observer and companion both occupy {position:?}")]
    OccupantsOverlap {
        /// Shared position.
        position: Point,
    },
    /// The grid does not show the expected occupant tile.
    #[error("expected {expected:?} at {position:?}")]
    OccupantNotStamped {
        /// Position that should hold the occupant.
        position: Point,
        /// Tile the grid should show there.
        expected: Tile,
    },
    /// A registry entry lies outside the grid.
    #[error("registry entry {point:?} lies outside the grid")]
    RegistryOutOfBounds {
        /// Offending point.
        point: Point,
    },
    /// The companion threshold is zero.
    #[error("companion charge threshold must be positive")]
    ZeroThreshold,
}

impl World {
    /// Captures every field of the world.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            seed: self.seed,
            grid: self.grid.clone(),
            rooms: self.rooms.clone(),
            corridors: self.corridors.clone(),
            walls: self.walls.clone(),
            hazards: self.hazards.iter().collect(),
            pickups: self.pickups.iter().collect(),
            observer: self.observer.snapshot(),
            companion: self.companion.snapshot(),
            active_projection: self.active,
            switch_count: self.switch_count,
        }
    }

    /// Rebuilds a world from a snapshot after checking its consistency.
    pub fn restore(snapshot: WorldSnapshot) -> Result<Self, SnapshotError> {
        if !snapshot.grid.is_complete() {
            return Err(SnapshotError::GridSizeMismatch {
                expected: snapshot.grid.size().area(),
                found: snapshot.grid.cells().len(),
            });
        }

        let observer = Observer::from_snapshot(snapshot.observer);
        let companion = Companion::from_snapshot(snapshot.companion);

        if companion.charge_threshold == 0 {
            return Err(SnapshotError::ZeroThreshold);
        }
        if observer.position == companion.position {
            return Err(SnapshotError::OccupantsOverlap {
                position: observer.position,
            });
        }
        for (position, expected) in [
            (observer.position, Tile::Observer),
            (companion.position, Tile::Companion),
        ] {
            match snapshot.grid.get(position) {
                None => return Err(SnapshotError::OccupantOutOfBounds { position }),
                Some(tile) if tile != expected => {
                    return Err(SnapshotError::OccupantNotStamped { position, expected })
                }
                Some(_) => {}
            }
        }
        if let Some(point) = snapshot
            .hazards
            .iter()
            .chain(snapshot.pickups.iter())
            .find(|point| !snapshot.grid.contains(**point))
        {
            return Err(SnapshotError::RegistryOutOfBounds { point: *point });
        }

        Ok(Self {
            seed: snapshot.seed,
            grid: snapshot.grid,
            rooms: snapshot.rooms,
            corridors: snapshot.corridors,
            walls: snapshot.walls,
            hazards: PointRegistry::from_points(snapshot.hazards),
            pickups: PointRegistry::from_points(snapshot.pickups),
            observer,
            companion,
            active: snapshot.active_projection,
            switch_count: snapshot.switch_count,
        })
    }
}
