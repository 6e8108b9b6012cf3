//! # Game Module
//!
//! Core dungeon model and the movement engine.
//!
//! This module contains the fundamental building blocks of Roomcrawl:
//! - Rooms and the doors that join them
//! - Items, their capabilities, and the player's inventory
//! - The dungeon graph with its movement state machine
//! - Inventory actions (eat, wear, toss)

pub mod actions;
pub mod entities;
pub mod state;
pub mod world;

pub use actions::*;
pub use entities::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a room, as authored in the rooms file.
pub type RoomId = i32;

/// Identifier of an item, as authored in the rooms file.
pub type ItemId = i32;

/// Index of a door in the dungeon's door arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(pub usize);

/// Represents a grid point inside a room.
///
/// # Examples
///
/// ```
/// use roomcrawl::Position;
///
/// let pos = Position::new(2, 3);
/// assert_eq!(pos.x, 2);
/// assert_eq!(pos.y, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A directional input from the player. There is no diagonal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomcrawl::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Down => Position::new(0, 1),
            Direction::Up => Position::new(0, -1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Delta for an optional direction; an unrecognized input does not move.
    pub fn delta_of(direction: Option<Direction>) -> Position {
        direction.map_or_else(Position::origin, Direction::to_delta)
    }
}

/// One of the four walls of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WallDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl WallDirection {
    /// Walls in the order the builder and auto-repair visit them.
    pub const ALL: [WallDirection; 4] = [
        WallDirection::North,
        WallDirection::South,
        WallDirection::East,
        WallDirection::West,
    ];

    /// The wall facing this one: N↔S, E↔W.
    pub fn opposite(self) -> Self {
        match self {
            WallDirection::North => WallDirection::South,
            WallDirection::South => WallDirection::North,
            WallDirection::East => WallDirection::West,
            WallDirection::West => WallDirection::East,
        }
    }

    /// Step that leads from this wall into the room's interior.
    pub fn inward(self) -> Position {
        match self {
            WallDirection::North => Position::new(0, 1),
            WallDirection::South => Position::new(0, -1),
            WallDirection::East => Position::new(-1, 0),
            WallDirection::West => Position::new(1, 0),
        }
    }

    /// Single-letter tag used in the data files.
    pub fn as_str(self) -> &'static str {
        match self {
            WallDirection::North => "N",
            WallDirection::South => "S",
            WallDirection::East => "E",
            WallDirection::West => "W",
        }
    }

    /// Parses a wall tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "N" => Some(WallDirection::North),
            "S" => Some(WallDirection::South),
            "E" => Some(WallDirection::East),
            "W" => Some(WallDirection::West),
            _ => None,
        }
    }
}

impl fmt::Display for WallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::Down.to_delta(), Position::new(0, 1));
        assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
        assert_eq!(Direction::Left.to_delta(), Position::new(-1, 0));
        assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    }

    #[test]
    fn test_unrecognized_input_has_no_displacement() {
        assert_eq!(Direction::delta_of(None), Position::origin());
    }

    #[test]
    fn test_wall_opposites() {
        for wall in WallDirection::ALL {
            assert_eq!(wall.opposite().opposite(), wall);
            assert_ne!(wall.opposite(), wall);
        }
        assert_eq!(WallDirection::North.opposite(), WallDirection::South);
        assert_eq!(WallDirection::East.opposite(), WallDirection::West);
    }

    #[test]
    fn test_inward_points_away_from_wall() {
        assert_eq!(WallDirection::North.inward(), Position::new(0, 1));
        assert_eq!(WallDirection::West.inward(), Position::new(1, 0));
    }

    #[test]
    fn test_wall_tag_parsing() {
        assert_eq!(WallDirection::from_tag("n"), Some(WallDirection::North));
        assert_eq!(WallDirection::from_tag(" W "), Some(WallDirection::West));
        assert_eq!(WallDirection::from_tag("X"), None);
        assert_eq!(WallDirection::East.to_string(), "E");
    }
}
