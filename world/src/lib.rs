#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the cavern.
//!
//! The world owns the canonical tile grid, the observer and companion, and the
//! hazard and pickup registries. Every mutation enters through [`apply`] and is
//! reported back as [`Event`] values. Read access goes through [`query`].

mod occupants;
mod registry;
mod snapshot;

use cavern_core::{
    CaveLayout, Command, Corridor, Event, Point, Projection, RoomSet, Tile, TileGrid,
};
use tracing::debug;

use crate::{
    occupants::{follow, Companion, Observer},
    registry::PointRegistry,
};

pub use snapshot::SnapshotError;

/// Tuning knobs for the observer and companion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Lives the observer starts with.
    pub observer_lives: u32,
    /// Companion charge at which every hazard is cleared.
    pub charge_threshold: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            observer_lives: 5,
            charge_threshold: 5,
        }
    }
}

/// Represents the authoritative cavern world state.
#[derive(Clone, Debug)]
pub struct World {
    seed: u64,
    grid: TileGrid,
    rooms: RoomSet,
    corridors: Vec<Corridor>,
    walls: Vec<Point>,
    hazards: PointRegistry,
    pickups: PointRegistry,
    observer: Observer,
    companion: Companion,
    active: Projection,
    switch_count: u64,
}

impl World {
    /// Builds a world from a generated layout, stamping both occupants onto
    /// their starting tiles.
    #[must_use]
    pub fn from_layout(layout: CaveLayout, config: WorldConfig) -> Self {
        let CaveLayout {
            seed,
            grid,
            rooms,
            corridors,
            walls,
            hazards,
            pickups,
            observer_start,
            companion_start,
        } = layout;

        let mut world = Self {
            seed,
            grid,
            rooms,
            corridors,
            walls,
            hazards: PointRegistry::from_points(hazards),
            pickups: PointRegistry::from_points(pickups),
            observer: Observer {
                position: observer_start,
                underlying: Tile::Floor,
                lives: config.observer_lives,
            },
            companion: Companion {
                position: companion_start,
                underlying: Tile::Floor,
                charge: 0,
                charge_threshold: config.charge_threshold,
            },
            active: Projection::Physical,
            switch_count: 0,
        };
        world.stamp_occupants();
        world
    }

    /// Restores the terrain hidden beneath both occupants.
    fn lift_occupants(&mut self) {
        self.grid
            .set(self.companion.position, self.companion.underlying);
        self.grid.set(self.observer.position, self.observer.underlying);
    }

    /// Records the terrain beneath both occupants and draws them on top.
    fn stamp_occupants(&mut self) {
        self.observer.underlying = self.terrain_at(self.observer.position);
        self.grid.set(self.observer.position, Tile::Observer);
        self.companion.underlying = self.terrain_at(self.companion.position);
        self.grid.set(self.companion.position, Tile::Companion);
    }

    fn terrain_at(&self, point: Point) -> Tile {
        self.grid.get(point).unwrap_or(Tile::Void)
    }

    fn move_observer(&mut self, to: Point, out_events: &mut Vec<Event>) {
        assert!(
            self.grid.get(to).is_some_and(Tile::is_walkable),
            "observer cannot move onto {to:?}"
        );

        let from = self.observer.position;
        let companion_from = self.companion.position;
        self.lift_occupants();

        if self.hazards.remove(to) {
            self.grid.set(to, Tile::Floor);
            let was_alive = self.observer.lives > 0;
            self.observer.lives = self.observer.lives.saturating_sub(1);
            debug!(?to, lives = self.observer.lives, "hazard triggered");
            out_events.push(Event::HazardTriggered {
                at: to,
                lives_remaining: self.observer.lives,
            });
            if was_alive && self.observer.lives == 0 {
                self.clear_pickups(out_events);
                out_events.push(Event::ObserverExhausted);
            }
        }

        let mut collected = false;
        if self.active == Projection::Overlay && self.pickups.remove(to) {
            self.grid.set(to, Tile::Floor);
            self.companion.charge = self.companion.charge.saturating_add(1);
            collected = true;
            debug!(?to, charge = self.companion.charge, "pickup collected");
            out_events.push(Event::PickupCollected {
                at: to,
                charge: self.companion.charge,
            });
        }

        self.observer.position = to;
        out_events.push(Event::ObserverMoved { from, to });

        let companion_to = if to == companion_from {
            from
        } else {
            follow(companion_from, to)
        };
        if companion_to != companion_from {
            self.companion.position = companion_to;
            out_events.push(Event::CompanionMoved {
                from: companion_from,
                to: companion_to,
            });
        }

        if collected && self.companion.is_charged() && self.observer.lives > 0 {
            self.clear_hazards(out_events);
        }

        self.stamp_occupants();
    }

    /// Replaces every hazard with floor. Occupants must be lifted.
    fn clear_hazards(&mut self, out_events: &mut Vec<Event>) {
        let cleared = self.hazards.drain();
        for point in &cleared {
            self.grid.set(*point, Tile::Floor);
        }
        debug!(count = cleared.len(), "hazards cleared");
        out_events.push(Event::HazardsCleared {
            count: cleared.len(),
        });
    }

    /// Replaces every pickup with floor. Occupants must be lifted.
    fn clear_pickups(&mut self, out_events: &mut Vec<Event>) {
        let cleared = self.pickups.drain();
        for point in &cleared {
            self.grid.set(*point, Tile::Floor);
        }
        debug!(count = cleared.len(), "pickups cleared");
        out_events.push(Event::PickupsCleared {
            count: cleared.len(),
        });
    }

    fn place_item(&mut self, at: Point, item: Tile) -> bool {
        let occupied = at == self.observer.position || at == self.companion.position;
        if occupied || self.grid.get(at) != Some(Tile::Floor) {
            debug!(?at, ?item, "item placement ignored");
            return false;
        }

        self.grid.set(at, item);
        match item {
            Tile::Hazard => self.hazards.insert(at),
            _ => self.pickups.insert(at),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// # Panics
///
/// Panics when [`Command::MoveObserver`] names a tile the observer cannot
/// enter. Callers check [`query::can_move`] first.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveObserver { to } => world.move_observer(to, out_events),
        Command::AddHazard { at } => {
            if world.place_item(at, Tile::Hazard) {
                out_events.push(Event::HazardPlaced { at });
            }
        }
        Command::AddPickup { at } => {
            if world.place_item(at, Tile::Pickup) {
                out_events.push(Event::PickupPlaced { at });
            }
        }
        Command::ClearHazards => {
            world.lift_occupants();
            world.clear_hazards(out_events);
            world.stamp_occupants();
        }
        Command::ClearPickups => {
            world.lift_occupants();
            world.clear_pickups(out_events);
            world.stamp_occupants();
        }
        Command::SetProjection { projection } => {
            if world.active != projection {
                world.active = projection;
                world.switch_count = world.switch_count.saturating_add(1);
                debug!(?projection, switches = world.switch_count, "projection changed");
                out_events.push(Event::ProjectionChanged { projection });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use cavern_core::{Corridor, Direction, GridSize, Point, Projection, RoomSet, Tile, TileGrid};

    use super::World;

    /// Seed the world was generated from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Dimensions of the world grid.
    #[must_use]
    pub fn size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Canonical grid with both occupants drawn on top of the terrain.
    #[must_use]
    pub fn grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Tile at the provided point, if it lies inside the grid.
    #[must_use]
    pub fn tile(world: &World, point: Point) -> Option<Tile> {
        world.grid.get(point)
    }

    /// Reports whether the observer may take one step in `direction`.
    #[must_use]
    pub fn can_move(world: &World, direction: Direction) -> bool {
        let destination = world.observer.position.step(direction);
        world.grid.get(destination).is_some_and(Tile::is_walkable)
    }

    /// Rooms in chain order.
    #[must_use]
    pub fn rooms(world: &World) -> &RoomSet {
        &world.rooms
    }

    /// Corridors joining consecutive rooms.
    #[must_use]
    pub fn corridors(world: &World) -> &[Corridor] {
        &world.corridors
    }

    /// Wall tiles produced by generation.
    #[must_use]
    pub fn walls(world: &World) -> &[Point] {
        &world.walls
    }

    /// Hazard tiles in ascending order.
    pub fn hazards(world: &World) -> impl Iterator<Item = Point> + '_ {
        world.hazards.iter()
    }

    /// Number of hazards currently placed.
    #[must_use]
    pub fn hazard_count(world: &World) -> usize {
        world.hazards.len()
    }

    /// Pickup tiles in ascending order.
    pub fn pickups(world: &World) -> impl Iterator<Item = Point> + '_ {
        world.pickups.iter()
    }

    /// Number of pickups currently placed.
    #[must_use]
    pub fn pickup_count(world: &World) -> usize {
        world.pickups.len()
    }

    /// Reports whether a hazard is registered at the tile.
    #[must_use]
    pub fn has_hazard(world: &World, point: Point) -> bool {
        world.hazards.contains(point)
    }

    /// Reports whether a pickup is registered at the tile.
    #[must_use]
    pub fn has_pickup(world: &World, point: Point) -> bool {
        world.pickups.contains(point)
    }

    /// Tile the observer occupies.
    #[must_use]
    pub fn observer_position(world: &World) -> Point {
        world.observer.position
    }

    /// Terrain hidden beneath the observer.
    #[must_use]
    pub fn observer_underlying(world: &World) -> Tile {
        world.observer.underlying
    }

    /// Lives the observer has left.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.observer.lives
    }

    /// Tile the companion occupies.
    #[must_use]
    pub fn companion_position(world: &World) -> Point {
        world.companion.position
    }

    /// Charge accumulated by the companion.
    #[must_use]
    pub fn charge(world: &World) -> u32 {
        world.companion.charge
    }

    /// Charge at which the companion clears every hazard.
    #[must_use]
    pub fn charge_threshold(world: &World) -> u32 {
        world.companion.charge_threshold
    }

    /// Projection the observer currently occupies.
    #[must_use]
    pub fn active_projection(world: &World) -> Projection {
        world.active
    }

    /// Number of projection changes applied so far.
    #[must_use]
    pub fn switch_count(world: &World) -> u64 {
        world.switch_count
    }
}
