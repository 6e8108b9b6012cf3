//! # Roomcrawl
//!
//! A small turn-based dungeon crawler played one room at a time.
//!
//! ## Architecture Overview
//!
//! The dungeon is authored ahead of time as data and built once at startup:
//!
//! - **Game**: rooms, doors, items and the player, plus the movement engine
//!   that turns a single directional input into one atomic state transition
//! - **Generation**: parsed room/item/symbol records, the JSON loader and the
//!   graph builder that wires doors and validates every room
//! - **Rendering**: pure text projections of the current room and inventory
//! - **Input**: text command parsing for the terminal driver
//!
//! Rooms and doors live in arenas owned by [`Dungeon`]; the player and items
//! refer back to rooms by id, so there are no ownership cycles.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

use std::path::PathBuf;

/// Core error type for the Roomcrawl engine.
#[derive(thiserror::Error, Debug)]
pub enum CrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A source data file is missing or malformed
    #[error("Cannot use data file {}: {reason}", file.display())]
    DataFile { file: PathBuf, reason: String },

    /// An item cannot be placed where it was asked to go
    #[error("Item {item} cannot be placed at ({}, {})", position.x, position.y)]
    ImpossiblePosition { item: ItemId, position: Position },

    /// An item id is not present in the item catalog
    #[error("No such item: {item}")]
    UnknownItem { item: ItemId },

    /// A room has no doors at all
    #[error("Room {room} does not have enough doors")]
    NotEnoughDoors { room: RoomId },

    /// A room failed geometry validation
    #[error("Room {room} failed validation")]
    InvalidRoom { room: RoomId },

    /// The dungeon cannot be repaired into a usable state
    #[error("This dungeon cannot be used: {reason}")]
    Unusable { reason: String },

    /// The player tried to walk into a wall
    #[error("I can't move there!")]
    InvalidMove,

    /// An inventory command cannot be applied
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Roomcrawl codebase.
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    use crate::Position;

    /// File-locations document read when no path is given
    pub const DEFAULT_FILE_LOCATIONS: &str = "fileLocations.json";

    /// Name given to the player created in the start room
    pub const DEFAULT_PLAYER_NAME: &str = "Player";

    /// Smallest width or height that leaves a room an interior cell
    pub const MIN_ROOM_SIDE: i32 = 3;

    /// Wall offset used for doors synthesized during auto-repair
    pub const REPAIR_DOOR_OFFSET: i32 = 1;

    /// Blank columns printed to the left of the room block
    pub const RENDER_LEFT_MARGIN: usize = 15;

    /// Glyph shown when the symbol table has no entry for a name
    pub const FALLBACK_GLYPH: char = '?';

    /// Maximum number of messages kept by the display
    pub const MAX_MESSAGES: usize = 50;

    /// Where the player appears in the start room.
    pub const fn player_start() -> Position {
        Position { x: 1, y: 1 }
    }
}
