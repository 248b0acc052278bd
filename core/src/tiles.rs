//! Closed tile vocabulary and the immutable palette describing every kind.

use serde::{Deserialize, Serialize};

/// Number of decorative wall shades carved during generation.
pub const WALL_SHADES: u8 = 5;

/// Number of flicker shades used for overlay floor.
pub const STATIC_SHADES: u8 = 5;

/// Number of shades used while a wave reveals the physical projection.
pub const TRANSITION_SHADES: u8 = 6;

/// Index selecting one variant of a multi-shade tile family.
///
/// Shades are built through the family constructors on [`Tile`], which reduce
/// the index modulo the family size, so equal-looking tiles compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Shade(u8);

impl Shade {
    const fn wrapped(index: u8, family: u8) -> Self {
        Self(index % family)
    }

    /// Zero-based index of the shade.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Terrain, occupant and projection-specific tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Uncarved rock outside the cave.
    Void,
    /// Plain walkable floor.
    Floor,
    /// Decorative wall bordering carved space.
    Wall(Shade),
    /// Floor carrying a hazard that costs the observer a life.
    Hazard,
    /// Floor carrying a pickup that charges the companion.
    Pickup,
    /// The moving observer.
    Observer,
    /// The observer's companion.
    Companion,
    /// Remembered floor that is not currently visible.
    DimFloor,
    /// Remembered wall that is not currently visible.
    DimWall(Shade),
    /// Flickering floor shown in the overlay projection.
    Static(Shade),
    /// Floor substitution used for hazards in the overlay projection.
    OverlayFloor,
    /// Wall as rendered in the overlay projection.
    OverlayWall,
    /// Observer as rendered in the overlay projection.
    OverlayObserver,
    /// Companion as rendered in the overlay projection.
    OverlayCompanion,
    /// Cover laid over a batch while switching into the overlay projection.
    ToOverlay,
    /// Cover laid over a batch while switching into the physical projection.
    ToPhysical(Shade),
}

impl Tile {
    /// Wall of the provided shade, wrapped into the wall family.
    #[must_use]
    pub const fn wall(shade: u8) -> Self {
        Tile::Wall(Shade::wrapped(shade, WALL_SHADES))
    }

    /// Remembered wall of the provided shade, wrapped into the wall family.
    #[must_use]
    pub const fn dim_wall(shade: u8) -> Self {
        Tile::DimWall(Shade::wrapped(shade, WALL_SHADES))
    }

    /// Overlay flicker floor of the provided shade.
    #[must_use]
    pub const fn static_floor(shade: u8) -> Self {
        Tile::Static(Shade::wrapped(shade, STATIC_SHADES))
    }

    /// Physical-bound transition cover of the provided shade.
    #[must_use]
    pub const fn to_physical(shade: u8) -> Self {
        Tile::ToPhysical(Shade::wrapped(shade, TRANSITION_SHADES))
    }

    /// Reports whether the tile is uncarved void.
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(self, Tile::Void)
    }

    /// Reports whether the tile is a carved wall.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall(_))
    }

    /// Reports whether the tile blocks line of sight.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.descriptor().opaque()
    }

    /// Reports whether the observer may step onto the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        self.descriptor().walkable()
    }

    /// Palette entry describing how the tile looks and behaves.
    #[must_use]
    pub const fn descriptor(self) -> TileDescriptor {
        const FLOOR_BG: TileColor = TileColor::from_rgb(92, 112, 103);
        const BLACK: TileColor = TileColor::from_rgb(0, 0, 0);
        const WHITE: TileColor = TileColor::from_rgb(255, 255, 255);
        const CYAN: TileColor = TileColor::from_rgb(0, 255, 255);
        const BUDDY: TileColor = TileColor::from_rgb(102, 255, 255);

        match self {
            Tile::Void => TileDescriptor::new(
                ' ',
                "empty",
                BLACK,
                TileColor::from_rgb(6, 13, 19),
                false,
                false,
            ),
            Tile::Floor => TileDescriptor::new(
                '·',
                "floor",
                TileColor::from_rgb(171, 186, 179),
                FLOOR_BG,
                true,
                false,
            ),
            Tile::Wall(shade) => {
                TileDescriptor::new('#', "wall", BLACK, wall_color(shade), false, true)
            }
            Tile::Hazard => TileDescriptor::new(
                'X',
                "hazard",
                TileColor::from_rgb(204, 255, 153),
                FLOOR_BG,
                true,
                false,
            ),
            Tile::Pickup => TileDescriptor::new(
                '≡',
                "pickup",
                TileColor::from_rgb(255, 255, 0),
                BLACK,
                true,
                false,
            ),
            Tile::Observer => TileDescriptor::new('@', "observer", WHITE, FLOOR_BG, true, false),
            Tile::Companion => TileDescriptor::new('●', "companion", BUDDY, FLOOR_BG, true, false),
            Tile::DimFloor => TileDescriptor::new(
                '·',
                "remembered floor",
                TileColor::from_rgb(51, 51, 51),
                TileColor::from_rgb(12, 26, 39),
                true,
                false,
            ),
            Tile::DimWall(shade) => TileDescriptor::new(
                '#',
                "remembered wall",
                BLACK,
                dim_wall_color(shade),
                false,
                true,
            ),
            Tile::Static(shade) => {
                let level = 10 + 7 * (shade.get() % STATIC_SHADES);
                TileDescriptor::new(
                    '·',
                    "static",
                    CYAN,
                    TileColor::from_rgb(level, level, level),
                    true,
                    false,
                )
            }
            Tile::OverlayFloor => TileDescriptor::new('·', "overlay floor", CYAN, BLACK, true, false),
            Tile::OverlayWall => TileDescriptor::new('#', "overlay wall", CYAN, BLACK, false, true),
            Tile::OverlayObserver => {
                TileDescriptor::new('@', "overlay observer", WHITE, BLACK, true, false)
            }
            Tile::OverlayCompanion => {
                TileDescriptor::new('●', "overlay companion", BUDDY, BLACK, true, false)
            }
            Tile::ToOverlay => TileDescriptor::new('▦', "to overlay", CYAN, BLACK, false, false),
            Tile::ToPhysical(shade) => TileDescriptor::new(
                '▦',
                "to physical",
                transition_color(shade),
                FLOOR_BG,
                false,
                false,
            ),
        }
    }
}

const fn wall_color(shade: Shade) -> TileColor {
    match shade.get() % WALL_SHADES {
        0 => TileColor::from_rgb(195, 127, 124),
        1 => TileColor::from_rgb(206, 138, 122),
        2 => TileColor::from_rgb(231, 168, 133),
        3 => TileColor::from_rgb(242, 202, 157),
        _ => TileColor::from_rgb(240, 226, 174),
    }
}

const fn dim_wall_color(shade: Shade) -> TileColor {
    match shade.get() % WALL_SHADES {
        0 => TileColor::from_rgb(64, 62, 66),
        1 => TileColor::from_rgb(64, 63, 64),
        2 => TileColor::from_rgb(66, 65, 61),
        3 => TileColor::from_rgb(61, 68, 60),
        _ => TileColor::from_rgb(57, 71, 61),
    }
}

const fn transition_color(shade: Shade) -> TileColor {
    match shade.get() % TRANSITION_SHADES {
        5 => TileColor::from_rgb(171, 186, 179),
        other => wall_color(Shade::wrapped(other, WALL_SHADES)),
    }
}

/// RGB colour used by the tile palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TileColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Immutable description of a tile kind: appearance plus capability flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileDescriptor {
    glyph: char,
    name: &'static str,
    foreground: TileColor,
    background: TileColor,
    walkable: bool,
    opaque: bool,
}

impl TileDescriptor {
    const fn new(
        glyph: char,
        name: &'static str,
        foreground: TileColor,
        background: TileColor,
        walkable: bool,
        opaque: bool,
    ) -> Self {
        Self {
            glyph,
            name,
            foreground,
            background,
            walkable,
            opaque,
        }
    }

    /// Character drawn for the tile.
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// Human readable name shown when hovering the tile.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Glyph colour.
    #[must_use]
    pub const fn foreground(&self) -> TileColor {
        self.foreground
    }

    /// Cell fill colour.
    #[must_use]
    pub const fn background(&self) -> TileColor {
        self.background
    }

    /// Whether the observer may stand on the tile.
    #[must_use]
    pub const fn walkable(&self) -> bool {
        self.walkable
    }

    /// Whether the tile blocks line of sight.
    #[must_use]
    pub const fn opaque(&self) -> bool {
        self.opaque
    }
}
