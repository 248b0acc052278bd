#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic cave generation.
//!
//! The generator rejection-samples rectangular rooms, keeps them in
//! nearest-neighbour chain order, joins consecutive rooms with L-shaped
//! corridors, dilates walls around the carved space, and scatters hazards and
//! pickups across room floors. The same seed and grid size always yield the
//! same [`CaveLayout`].

mod corridor;

use cavern_core::{
    CaveLayout, Corridor, GridSize, Point, Room, RoomSet, Tile, TileGrid, WALL_SHADES,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{info, trace};

pub use corridor::{route, CorridorRouter, CorridorShape};

/// Inclusive range of room side lengths drawn with a relative weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeBand {
    /// Smallest side length in tiles.
    pub min: u32,
    /// Largest side length in tiles.
    pub max: u32,
    /// Relative likelihood of drawing this band.
    pub weight: f64,
}

impl SizeBand {
    /// Creates a band covering `min..=max` with the provided weight.
    #[must_use]
    pub const fn new(min: u32, max: u32, weight: f64) -> Self {
        Self { min, max, weight }
    }
}

/// Tuning knobs controlling every adjustable aspect of generation.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Number of room placements attempted before generation stops.
    pub room_attempts: u32,
    /// Weighted room size classes; width and height are drawn independently
    /// from the chosen band.
    pub size_bands: Vec<SizeBand>,
    /// Chance that a room floor tile receives a hazard.
    pub hazard_probability: f64,
    /// Chance that a room floor tile receives a pickup.
    pub pickup_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            room_attempts: 2_500,
            size_bands: vec![
                SizeBand::new(4, 6, 0.6),
                SizeBand::new(6, 8, 0.2),
                SizeBand::new(7, 12, 0.2),
            ],
            hazard_probability: 0.25,
            pickup_probability: 0.01,
        }
    }
}

/// Reasons a [`GenerationConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// No size band was configured.
    #[error("at least one room size band is required")]
    NoSizeBands,
    /// A band has a zero side length or an inverted range.
    #[error("size band {index} has invalid bounds {min}..={max}")]
    InvalidBandBounds {
        /// Position of the band in the list.
        index: usize,
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
    /// A band weight is not a positive finite number.
    #[error("size band {index} has non-positive weight {weight}")]
    InvalidBandWeight {
        /// Position of the band in the list.
        index: usize,
        /// Configured weight.
        weight: f64,
    },
    /// A probability lies outside `0.0..=1.0`.
    #[error("{name} probability {value} is outside 0..=1")]
    InvalidProbability {
        /// Which probability was rejected.
        name: &'static str,
        /// Configured value.
        value: f64,
    },
}

impl GenerationConfig {
    /// Checks that every knob lies within its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_bands.is_empty() {
            return Err(ConfigError::NoSizeBands);
        }
        for (index, band) in self.size_bands.iter().enumerate() {
            if band.min == 0 || band.min > band.max {
                return Err(ConfigError::InvalidBandBounds {
                    index,
                    min: band.min,
                    max: band.max,
                });
            }
            if !band.weight.is_finite() || band.weight <= 0.0 {
                return Err(ConfigError::InvalidBandWeight {
                    index,
                    weight: band.weight,
                });
            }
        }
        for (name, value) in [
            ("hazard", self.hazard_probability),
            ("pickup", self.pickup_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }

    fn draw_band(&self, rng: &mut ChaCha8Rng) -> SizeBand {
        let total: f64 = self.size_bands.iter().map(|band| band.weight).sum();
        let mut roll = rng.gen::<f64>() * total;
        for band in &self.size_bands {
            if roll < band.weight {
                return *band;
            }
            roll -= band.weight;
        }
        self.size_bands[self.size_bands.len() - 1]
    }
}

/// Cave generator bound to a validated configuration.
#[derive(Clone, Debug)]
pub struct Generator {
    config: GenerationConfig,
    router: CorridorRouter,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            config: GenerationConfig::default(),
            router: CorridorRouter::default(),
        }
    }
}

impl Generator {
    /// Creates a generator after validating the configuration.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            router: CorridorRouter::default(),
        })
    }

    /// Configuration the generator was built with.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates the cave for `seed` on a grid of the provided size.
    ///
    /// Grids too small to hold any room produce a layout with no rooms and
    /// nothing carved.
    #[must_use]
    pub fn generate(&self, seed: u64, size: GridSize) -> CaveLayout {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = TileGrid::filled(size, Tile::Void);

        let rooms = self.place_rooms(&mut rng, &mut grid);
        let corridors = self.carve_corridors(&rooms, &mut grid);
        let walls = dilate_walls(&mut rng, &mut grid);

        let mut hazards = scatter(
            &mut rng,
            &mut grid,
            &rooms,
            self.config.hazard_probability,
            Tile::Hazard,
        );
        let mut pickups = scatter(
            &mut rng,
            &mut grid,
            &rooms,
            self.config.pickup_probability,
            Tile::Pickup,
        );

        let observer_start = rooms.first().map_or_else(
            || {
                let width = i32::try_from(size.width() / 2).unwrap_or(0);
                let height = i32::try_from(size.height() / 2).unwrap_or(0);
                Point::new(width, height)
            },
            Room::center,
        );
        let companion_start = observer_start.offset(1, 0);
        for start in [observer_start, companion_start] {
            if matches!(grid.get(start), Some(Tile::Hazard | Tile::Pickup)) {
                grid.set(start, Tile::Floor);
            }
            hazards.retain(|point| *point != start);
            pickups.retain(|point| *point != start);
        }

        info!(
            seed,
            width = size.width(),
            height = size.height(),
            rooms = rooms.len(),
            corridors = corridors.len(),
            walls = walls.len(),
            hazards = hazards.len(),
            pickups = pickups.len(),
            "generated cave"
        );

        CaveLayout {
            seed,
            grid,
            rooms,
            corridors,
            walls,
            hazards,
            pickups,
            observer_start,
            companion_start,
        }
    }

    fn place_rooms(&self, rng: &mut ChaCha8Rng, grid: &mut TileGrid) -> RoomSet {
        let mut rooms = RoomSet::new();
        let size = grid.size();

        for attempt in 0..self.config.room_attempts {
            let band = self.config.draw_band(rng);
            let width = rng.gen_range(band.min..=band.max);
            let height = rng.gen_range(band.min..=band.max);

            let (Some(x_span), Some(y_span)) = (
                size.width().checked_sub(width + 1).filter(|span| *span > 0),
                size.height().checked_sub(height + 1).filter(|span| *span > 0),
            ) else {
                continue;
            };
            let x = 1 + rng.gen_range(0..x_span);
            let y = 1 + rng.gen_range(0..y_span);
            let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
                continue;
            };

            let candidate = Room::new(Point::new(x, y), width, height);
            if !rooms.accepts(&candidate) {
                continue;
            }

            trace!(attempt, ?candidate, "room accepted");
            rooms.add(candidate);
            rooms.reorder_by_nearest_neighbor_chain();
            for tile in candidate.tiles() {
                grid.set(tile, Tile::Floor);
            }
        }

        rooms
    }

    fn carve_corridors(&self, rooms: &RoomSet, grid: &mut TileGrid) -> Vec<Corridor> {
        rooms
            .chain_links()
            .map(|(current, next)| {
                let corridor = self.router.connect(current.center(), next.center());
                for point in corridor.points() {
                    grid.set(*point, Tile::Floor);
                }
                corridor
            })
            .collect()
    }
}

/// Surrounds every carved tile with walls, returning them in placement order.
///
/// Only floor laid by rooms and corridors grows walls; walls placed earlier in
/// the same pass never spawn further walls.
fn dilate_walls(rng: &mut ChaCha8Rng, grid: &mut TileGrid) -> Vec<Point> {
    let size = grid.size();
    let width = i32::try_from(size.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(size.height()).unwrap_or(i32::MAX);
    let mut walls = Vec::new();

    for x in 1..width - 1 {
        for y in 1..height - 1 {
            if grid.get(Point::new(x, y)) != Some(Tile::Floor) {
                continue;
            }
            for neighbor in Point::new(x, y).surrounding() {
                if grid.get(neighbor) == Some(Tile::Void) {
                    grid.set(neighbor, Tile::wall(rng.gen_range(0..WALL_SHADES)));
                    walls.push(neighbor);
                }
            }
        }
    }

    walls
}

/// Places `item` on room floor tiles with independent probability.
///
/// A draw is made for every room tile; the item only lands on plain floor.
fn scatter(
    rng: &mut ChaCha8Rng,
    grid: &mut TileGrid,
    rooms: &RoomSet,
    probability: f64,
    item: Tile,
) -> Vec<Point> {
    let mut placed = Vec::new();
    for tile in rooms.floor_tiles() {
        if rng.gen::<f64>() < probability && grid.get(tile) == Some(Tile::Floor) {
            grid.set(tile, item);
            placed.push(tile);
        }
    }
    placed
}

/// Generates a cave with the default configuration.
#[must_use]
pub fn generate(seed: u64, size: GridSize) -> CaveLayout {
    Generator::default().generate(seed, size)
}
