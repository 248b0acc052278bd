#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the cavern engine.
//!
//! This crate defines the vocabulary that connects the generator, the
//! authoritative world, the pure projection systems, and adapters. Callers
//! submit [`Command`] values describing desired mutations, the world executes
//! them through its `apply` entry point, and reports what happened with
//! [`Event`] values. Systems read the world and produce projections or
//! animation plans without mutating it.

mod geometry;
mod grid;
mod rooms;
mod seed;
mod tiles;

use serde::{Deserialize, Serialize};

pub use geometry::{Direction, Point};
pub use grid::{Grid, GridSize, TileGrid};
pub use rooms::{Corridor, Room, RoomSet};
pub use seed::derive_stream_seed;
pub use tiles::{
    Shade, Tile, TileColor, TileDescriptor, STATIC_SHADES, TRANSITION_SHADES, WALL_SHADES,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the cavern.";

/// Fixed seed that every corridor's shape generator starts from.
///
/// Corridor shapes are independent of the world seed; changing this constant
/// changes the layout of every existing seed.
pub const CORRIDOR_SHAPE_SEED: u64 = 1086;

/// Stream label for overlay floor flicker.
pub const RNG_STREAM_FLICKER: &str = "flicker";

/// Stream label for transition cover shades.
pub const RNG_STREAM_TRANSITION: &str = "transition";

/// Which of the two world interpretations a projection or the observer uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// The tangible cave with hazards and remembered terrain.
    #[default]
    Physical,
    /// The virtual layer where pickups become perceptible.
    Overlay,
}

impl Projection {
    /// The other projection.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Physical => Self::Overlay,
            Self::Overlay => Self::Physical,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Moves the observer onto an adjacent walkable tile.
    ///
    /// Callers must check walkability first; an illegal destination panics.
    MoveObserver {
        /// Destination tile.
        to: Point,
    },
    /// Places a hazard onto a plain floor tile.
    AddHazard {
        /// Tile receiving the hazard.
        at: Point,
    },
    /// Places a pickup onto a plain floor tile.
    AddPickup {
        /// Tile receiving the pickup.
        at: Point,
    },
    /// Replaces every hazard with plain floor.
    ClearHazards,
    /// Replaces every pickup with plain floor.
    ClearPickups,
    /// Makes the provided projection the active one.
    SetProjection {
        /// Projection the observer now occupies.
        projection: Projection,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the observer moved between two tiles.
    ObserverMoved {
        /// Tile the observer left.
        from: Point,
        /// Tile the observer now occupies.
        to: Point,
    },
    /// Confirms that the companion followed the observer.
    CompanionMoved {
        /// Tile the companion left.
        from: Point,
        /// Tile the companion now occupies.
        to: Point,
    },
    /// Reports that the observer stepped onto a hazard.
    HazardTriggered {
        /// Tile that held the hazard.
        at: Point,
        /// Lives left after the hazard fired.
        lives_remaining: u32,
    },
    /// Reports that the observer collected a pickup in the overlay projection.
    PickupCollected {
        /// Tile that held the pickup.
        at: Point,
        /// Companion charge after collection.
        charge: u32,
    },
    /// Confirms that a hazard was placed.
    HazardPlaced {
        /// Tile now holding the hazard.
        at: Point,
    },
    /// Confirms that a pickup was placed.
    PickupPlaced {
        /// Tile now holding the pickup.
        at: Point,
    },
    /// Reports that every hazard was replaced with floor.
    HazardsCleared {
        /// Number of hazards removed.
        count: usize,
    },
    /// Reports that every pickup was replaced with floor.
    PickupsCleared {
        /// Number of pickups removed.
        count: usize,
    },
    /// Announces that the observer ran out of lives.
    ObserverExhausted,
    /// Announces that the active projection changed.
    ProjectionChanged {
        /// Projection that became active.
        projection: Projection,
    },
}

/// Generated cave before any occupant has been stamped onto the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveLayout {
    /// Seed the layout was generated from.
    pub seed: u64,
    /// Terrain including hazards and pickups.
    pub grid: TileGrid,
    /// Rooms in final chain order.
    pub rooms: RoomSet,
    /// Corridors joining consecutive rooms of the chain.
    pub corridors: Vec<Corridor>,
    /// Every wall tile produced by dilation, in placement order.
    pub walls: Vec<Point>,
    /// Hazard tiles in placement order.
    pub hazards: Vec<Point>,
    /// Pickup tiles in placement order.
    pub pickups: Vec<Point>,
    /// Starting tile for the observer.
    pub observer_start: Point,
    /// Starting tile for the companion.
    pub companion_start: Point,
}

/// Captured observer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverSnapshot {
    /// Tile the observer occupies.
    pub position: Point,
    /// Terrain hidden beneath the observer.
    pub underlying: Tile,
    /// Lives left.
    pub lives: u32,
}

/// Captured companion state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanionSnapshot {
    /// Tile the companion occupies.
    pub position: Point,
    /// Terrain hidden beneath the companion.
    pub underlying: Tile,
    /// Accumulated charge.
    pub charge: u32,
    /// Charge at which hazards are cleared.
    pub charge_threshold: u32,
}

/// Complete, order-independent capture of a world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Seed the world was generated from.
    pub seed: u64,
    /// Grid including occupant tiles.
    pub grid: TileGrid,
    /// Rooms in chain order.
    pub rooms: RoomSet,
    /// Corridors joining the rooms.
    pub corridors: Vec<Corridor>,
    /// Wall tiles in placement order.
    pub walls: Vec<Point>,
    /// Hazard tiles in ascending order.
    pub hazards: Vec<Point>,
    /// Pickup tiles in ascending order.
    pub pickups: Vec<Point>,
    /// Observer state.
    pub observer: ObserverSnapshot,
    /// Companion state.
    pub companion: CompanionSnapshot,
    /// Projection the observer occupies.
    pub active_projection: Projection,
    /// Number of finalized projection switches.
    pub switch_count: u64,
}
