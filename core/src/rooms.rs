//! Rectangular rooms, their chain-ordered collection, and connecting corridors.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Axis-aligned rectangle of carved floor.
///
/// The room covers columns `x .. x + width` and rows `y .. y + height`.
/// Rooms are immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    origin: Point,
    width: u32,
    height: u32,
}

impl Room {
    /// Creates a room anchored at `origin` with the provided dimensions.
    #[must_use]
    pub const fn new(origin: Point, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Lower-left corner of the room.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Number of columns covered by the room.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows covered by the room.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn x2(&self) -> i32 {
        self.origin.x() + i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    fn y2(&self) -> i32 {
        self.origin.y() + i32::try_from(self.height).unwrap_or(i32::MAX)
    }

    /// Center of the room, rounded toward the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.origin.x() + self.x2()) / 2,
            (self.origin.y() + self.y2()) / 2,
        )
    }

    /// Reports whether the two rectangles overlap or touch.
    ///
    /// Intervals are closed at both ends, so rooms sharing an edge intersect.
    #[must_use]
    pub fn intersects(&self, other: &Room) -> bool {
        self.origin.x() <= other.x2()
            && self.x2() >= other.origin.x()
            && self.origin.y() <= other.y2()
            && self.y2() >= other.origin.y()
    }

    /// Reports whether the two centers share a column or a row.
    #[must_use]
    pub fn shares_center_line(&self, other: &Room) -> bool {
        let (mine, theirs) = (self.center(), other.center());
        mine.x() == theirs.x() || mine.y() == theirs.y()
    }

    /// Reports whether the point is one of the room's floor tiles.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x() >= self.origin.x()
            && point.x() < self.x2()
            && point.y() >= self.origin.y()
            && point.y() < self.y2()
    }

    /// Floor tiles covered by the room, column by column.
    pub fn tiles(&self) -> impl Iterator<Item = Point> + '_ {
        (self.origin.x()..self.x2())
            .flat_map(move |x| (self.origin.y()..self.y2()).map(move |y| Point::new(x, y)))
    }
}

/// Rooms kept in nearest-neighbour chain order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomSet {
    rooms: Vec<Room>,
}

impl RoomSet {
    /// Creates an empty room set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a set from rooms already in the desired order.
    #[must_use]
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Appends a room without reordering.
    pub fn add(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Reports whether `candidate` neither intersects nor shares a center line
    /// with any room already in the set.
    #[must_use]
    pub fn accepts(&self, candidate: &Room) -> bool {
        self.rooms
            .iter()
            .all(|room| !room.intersects(candidate) && !room.shares_center_line(candidate))
    }

    /// Reorders the set into a greedy nearest-neighbour chain.
    ///
    /// The chain starts at the current first room and repeatedly appends the
    /// remaining room whose center lies closest to the last appended one. Ties
    /// go to the room that appears first in the previous order.
    pub fn reorder_by_nearest_neighbor_chain(&mut self) {
        if self.rooms.len() < 3 {
            return;
        }

        let mut remaining = std::mem::take(&mut self.rooms);
        let first = remaining.remove(0);
        let mut chain = Vec::with_capacity(remaining.len() + 1);
        chain.push(first);

        while !remaining.is_empty() {
            let anchor = chain[chain.len() - 1].center();
            let mut nearest = 0;
            let mut nearest_distance = f64::INFINITY;
            for (index, room) in remaining.iter().enumerate() {
                let distance = room.center().distance(anchor);
                if distance < nearest_distance {
                    nearest = index;
                    nearest_distance = distance;
                }
            }
            chain.push(remaining.remove(nearest));
        }

        self.rooms = chain;
    }

    /// Number of rooms in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Reports whether the set holds no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Room at the provided chain position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    /// First room in chain order.
    #[must_use]
    pub fn first(&self) -> Option<&Room> {
        self.rooms.first()
    }

    /// Iterates rooms in chain order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter()
    }

    /// Consecutive room pairs along the chain.
    pub fn chain_links(&self) -> impl Iterator<Item = (&Room, &Room)> + '_ {
        self.rooms.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Floor tiles of every room in chain order.
    pub fn floor_tiles(&self) -> impl Iterator<Item = Point> + '_ {
        self.rooms.iter().flat_map(Room::tiles)
    }
}

/// Ordered run of floor tiles joining two room centers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    points: Vec<Point>,
}

impl Corridor {
    /// Wraps an ordered list of corridor tiles.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Tiles covered by the corridor in the order they were laid.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(x: i32, y: i32, width: u32, height: u32) -> Room {
        Room::new(Point::new(x, y), width, height)
    }

    #[test]
    fn center_rounds_toward_origin() {
        assert_eq!(room(1, 1, 5, 4).center(), Point::new(3, 3));
        assert_eq!(room(10, 2, 4, 4).center(), Point::new(12, 4));
    }

    #[test]
    fn touching_rooms_intersect() {
        let left = room(1, 1, 4, 4);
        let touching = room(5, 1, 4, 4);
        let separated = room(6, 1, 4, 4);

        assert!(left.intersects(&touching));
        assert!(touching.intersects(&left));
        assert!(!left.intersects(&separated));
    }

    #[test]
    fn tiles_cover_exclusive_extent() {
        let tiles: Vec<Point> = room(2, 3, 2, 3).tiles().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], Point::new(2, 3));
        assert_eq!(tiles[1], Point::new(2, 4));
        assert_eq!(tiles[5], Point::new(3, 5));
        assert!(tiles.iter().all(|tile| room(2, 3, 2, 3).contains(*tile)));
    }

    #[test]
    fn accepts_rejects_shared_center_lines() {
        let mut rooms = RoomSet::new();
        rooms.add(room(1, 1, 4, 4));

        assert!(!rooms.accepts(&room(1, 20, 4, 4)), "same center column");
        assert!(!rooms.accepts(&room(20, 1, 4, 4)), "same center row");
        assert!(rooms.accepts(&room(20, 20, 5, 5)));
    }

    #[test]
    fn chain_follows_nearest_neighbour() {
        let mut rooms = RoomSet::from_rooms(vec![
            room(0, 0, 2, 2),
            room(40, 40, 2, 2),
            room(10, 10, 2, 2),
            room(20, 22, 2, 2),
        ]);
        rooms.reorder_by_nearest_neighbor_chain();

        let origins: Vec<Point> = rooms.iter().map(Room::origin).collect();
        assert_eq!(
            origins,
            vec![
                Point::new(0, 0),
                Point::new(10, 10),
                Point::new(20, 22),
                Point::new(40, 40)
            ]
        );
    }

    #[test]
    fn chain_ties_prefer_earlier_rooms() {
        let mut rooms = RoomSet::from_rooms(vec![
            room(10, 10, 2, 2),
            room(20, 10, 2, 2),
            room(0, 10, 2, 2),
        ]);
        rooms.reorder_by_nearest_neighbor_chain();

        assert_eq!(rooms.get(1).map(Room::origin), Some(Point::new(20, 10)));
        assert_eq!(rooms.get(2).map(Room::origin), Some(Point::new(0, 10)));
    }
}
