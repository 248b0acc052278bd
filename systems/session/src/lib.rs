#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session driver gluing generation, world state, fog and transitions together.
//!
//! A [`Session`] owns exactly one world and its visibility field. Shells feed
//! it one [`Intent`] per tick and render the projections it exposes. A
//! projection switch is split in two: [`Session::tick`] hands back the wave
//! animation and [`Session::finalize_switch`] flips the active projection once
//! the shell has played it.

use cavern_core::{
    derive_stream_seed, Command, Direction, Event, GridSize, Projection, TileGrid, WorldSnapshot,
    RNG_STREAM_TRANSITION, WELCOME_BANNER,
};
use cavern_system_generation::{ConfigError, GenerationConfig, Generator};
use cavern_system_transition::{compute_wave_order, WaveAnimation, WavePlan};
use cavern_system_visibility::{Projections, VisibilityField, VisibilitySnapshot};
use cavern_world::{self as world, query, SnapshotError, World, WorldConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration for every tunable stage of a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionConfig {
    /// Cave generation knobs.
    pub generation: GenerationConfig,
    /// Observer and companion knobs.
    pub world: WorldConfig,
}

/// Errors raised while building or restoring a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The generation configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The world snapshot was inconsistent.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// The configured companion threshold is zero.
    #[error("companion charge threshold must be positive")]
    ZeroThreshold,
    /// The fog memory does not cover the world grid.
    #[error("visibility covers {visibility:?} but the world is {world:?}")]
    VisibilityMismatch {
        /// Dimensions of the world grid.
        world: GridSize,
        /// Dimensions recorded by the visibility snapshot.
        visibility: GridSize,
    },
}

/// Action requested by the shell for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intent {
    /// Step the observer one tile.
    Move(Direction),
    /// Start a projection switch.
    SwitchProjection,
    /// Do nothing this tick.
    #[default]
    None,
}

/// Counters the shell displays alongside the projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    /// Observer lives left.
    pub lives: u32,
    /// Companion charge collected.
    pub charge: u32,
    /// Charge at which hazards are cleared.
    pub charge_threshold: u32,
    /// Projection the observer currently occupies.
    pub active_projection: Projection,
}

/// Outcome of a single tick.
#[derive(Debug)]
pub struct TickReport {
    /// Events the world emitted.
    pub events: Vec<Event>,
    /// Counters after the tick.
    pub status: SessionStatus,
    /// Whether a requested move was refused because the tile is blocked.
    pub blocked: bool,
    /// Animation to play before calling [`Session::finalize_switch`].
    pub transition: Option<WaveAnimation>,
}

/// Complete capture of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// World state.
    pub world: WorldSnapshot,
    /// Fog memory and rendered projections.
    pub visibility: VisibilitySnapshot,
}

/// One running cave.
#[derive(Clone, Debug)]
pub struct Session {
    world: World,
    visibility: VisibilityField,
}

/// Creates a session with the default configuration.
#[must_use]
pub fn new_session(seed: u64, width: u32, height: u32) -> Session {
    Session::new(seed, GridSize::new(width, height))
}

impl Session {
    /// Generates a cave with the default configuration.
    #[must_use]
    pub fn new(seed: u64, size: GridSize) -> Self {
        Self::from_parts(&Generator::default(), WorldConfig::default(), seed, size)
    }

    /// Generates a cave after validating `config`.
    pub fn with_config(
        config: SessionConfig,
        seed: u64,
        size: GridSize,
    ) -> Result<Self, SessionError> {
        if config.world.charge_threshold == 0 {
            return Err(SessionError::ZeroThreshold);
        }
        let generator = Generator::new(config.generation)?;
        Ok(Self::from_parts(&generator, config.world, seed, size))
    }

    fn from_parts(generator: &Generator, config: WorldConfig, seed: u64, size: GridSize) -> Self {
        let world = World::from_layout(generator.generate(seed, size), config);
        let mut visibility = VisibilityField::new(size);
        let _ = visibility.recompute(&world);
        info!(
            seed,
            width = size.width(),
            height = size.height(),
            rooms = query::rooms(&world).len(),
            "session started"
        );
        Self { world, visibility }
    }

    /// Greeting shown when a session starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Read access to the world for [`query`] calls.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Reports whether the observer may step in `direction`.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        query::can_move(&self.world, direction)
    }

    /// Both projections as of the latest tick.
    #[must_use]
    pub fn projections(&self) -> Projections<'_> {
        self.visibility.projections()
    }

    /// Projection grid the observer currently occupies.
    #[must_use]
    pub fn active_grid(&self) -> &TileGrid {
        self.projections()
            .get(query::active_projection(&self.world))
    }

    /// Fog memory and projections.
    #[must_use]
    pub fn visibility(&self) -> &VisibilityField {
        &self.visibility
    }

    /// Counters for display.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            lives: query::lives(&self.world),
            charge: query::charge(&self.world),
            charge_threshold: query::charge_threshold(&self.world),
            active_projection: query::active_projection(&self.world),
        }
    }

    /// Advances the session by one tick.
    ///
    /// Moves into blocked tiles are refused rather than applied. A switch
    /// request leaves the world untouched and returns the animation to play.
    pub fn tick(&mut self, intent: Intent) -> TickReport {
        let mut events = Vec::new();
        let mut blocked = false;
        let mut transition = None;

        match intent {
            Intent::Move(direction) => {
                if self.can_move(direction) {
                    let to = query::observer_position(&self.world).step(direction);
                    world::apply(
                        &mut self.world,
                        Command::MoveObserver { to },
                        &mut events,
                    );
                } else {
                    debug!(?direction, "move blocked");
                    blocked = true;
                }
            }
            Intent::SwitchProjection => transition = Some(self.begin_switch()),
            Intent::None => {}
        }

        let _ = self.visibility.recompute(&self.world);
        TickReport {
            events,
            status: self.status(),
            blocked,
            transition,
        }
    }

    /// Reveal order for a switch from the current world.
    #[must_use]
    pub fn wave_plan(&self) -> WavePlan {
        compute_wave_order(&self.world)
    }

    /// Prepares the animation from the active projection to the other one.
    #[must_use]
    pub fn begin_switch(&self) -> WaveAnimation {
        let active = query::active_projection(&self.world);
        let destination = active.toggled();
        let projections = self.projections();
        let shade_seed = derive_stream_seed(
            query::seed(&self.world),
            RNG_STREAM_TRANSITION,
            query::switch_count(&self.world),
        );
        debug!(?destination, "projection switch started");
        WaveAnimation::new(
            self.wave_plan(),
            projections.get(active),
            projections.get(destination),
            destination,
            shade_seed,
        )
    }

    /// Flips the active projection after the transition has been shown.
    pub fn finalize_switch(&mut self) -> Vec<Event> {
        let projection = query::active_projection(&self.world).toggled();
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SetProjection { projection },
            &mut events,
        );
        events
    }

    /// Captures the whole session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            world: self.world.snapshot(),
            visibility: self.visibility.snapshot(),
        }
    }

    /// Rebuilds a session from a snapshot.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SessionError> {
        let world = World::restore(snapshot.world)?;
        let world_size = query::size(&world);
        let visibility_size = snapshot.visibility.memory.size();
        let visibility = VisibilityField::restore(snapshot.visibility)
            .filter(|_| visibility_size == world_size)
            .ok_or(SessionError::VisibilityMismatch {
                world: world_size,
                visibility: visibility_size,
            })?;
        Ok(Self { world, visibility })
    }
}
