//! Observer and companion state tracked by the world.

use cavern_core::{CompanionSnapshot, ObserverSnapshot, Point, Tile};

/// The moving observer together with the terrain it currently hides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Observer {
    pub(crate) position: Point,
    pub(crate) underlying: Tile,
    pub(crate) lives: u32,
}

impl Observer {
    pub(crate) fn snapshot(&self) -> ObserverSnapshot {
        ObserverSnapshot {
            position: self.position,
            underlying: self.underlying,
            lives: self.lives,
        }
    }

    pub(crate) fn from_snapshot(snapshot: ObserverSnapshot) -> Self {
        Self {
            position: snapshot.position,
            underlying: snapshot.underlying,
            lives: snapshot.lives,
        }
    }
}

/// Companion trailing the observer and accumulating charge from pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Companion {
    pub(crate) position: Point,
    pub(crate) underlying: Tile,
    pub(crate) charge: u32,
    pub(crate) charge_threshold: u32,
}

impl Companion {
    pub(crate) fn snapshot(&self) -> CompanionSnapshot {
        CompanionSnapshot {
            position: self.position,
            underlying: self.underlying,
            charge: self.charge,
            charge_threshold: self.charge_threshold,
        }
    }

    pub(crate) fn from_snapshot(snapshot: CompanionSnapshot) -> Self {
        Self {
            position: snapshot.position,
            underlying: snapshot.underlying,
            charge: snapshot.charge,
            charge_threshold: snapshot.charge_threshold,
        }
    }

    pub(crate) fn is_charged(&self) -> bool {
        self.charge >= self.charge_threshold
    }
}

/// Position the companion moves to so it stays next to `leader`.
///
/// When the leader is more than one column away the companion closes half the
/// gap and adopts the leader's row offset; rows are handled symmetrically.
/// Both rules read the offsets measured before either applies.
pub(crate) fn follow(companion: Point, leader: Point) -> Point {
    let dx = leader.x() - companion.x();
    let dy = leader.y() - companion.y();
    let mut x = companion.x();
    let mut y = companion.y();

    if dx.abs() > 1 {
        if dy.abs() > 0 {
            y += dy;
        }
        x += dx / 2;
    }

    if dy.abs() > 1 {
        if dx.abs() > 0 {
            x += dx;
        }
        y += dy / 2;
    }

    Point::new(x, y)
}
