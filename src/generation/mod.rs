//! # Generation Module
//!
//! Turns authored data into a playable dungeon.
//!
//! The loader reads the rooms and symbols documents into the plain record
//! tables defined here; the builder then constructs rooms, places items,
//! wires doors and validates the whole graph once.

pub mod dungeon;
pub mod loader;

pub use dungeon::*;
pub use loader::*;

use crate::{config, ItemId, RoomId, WallDirection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A door declared on one wall of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorRecord {
    /// Offset along the wall where the opening sits
    pub wall_pos: i32,
    /// Room on the other side
    pub connects_to: RoomId,
}

/// An item placed in a room at authoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootRecord {
    pub item: ItemId,
    pub x: i32,
    pub y: i32,
}

/// One entry of the room table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: RoomId,
    pub width: i32,
    pub height: i32,
    /// Whether the player starts here
    pub start: bool,
    pub doors: BTreeMap<WallDirection, DoorRecord>,
    pub loot: Vec<LootRecord>,
}

impl RoomRecord {
    /// A room with no doors and no loot.
    pub fn new(id: RoomId, width: i32, height: i32) -> Self {
        Self {
            id,
            width,
            height,
            start: false,
            doors: BTreeMap::new(),
            loot: Vec::new(),
        }
    }

    /// Marks this room as the start room.
    pub fn starting(mut self) -> Self {
        self.start = true;
        self
    }

    /// Declares a door on `wall` at `wall_pos` leading to `connects_to`.
    pub fn with_door(mut self, wall: WallDirection, wall_pos: i32, connects_to: RoomId) -> Self {
        self.doors.insert(
            wall,
            DoorRecord {
                wall_pos,
                connects_to,
            },
        );
        self
    }

    /// Places catalog item `item` at `(x, y)`.
    pub fn with_loot(mut self, item: ItemId, x: i32, y: i32) -> Self {
        self.loot.push(LootRecord { item, x, y });
        self
    }
}

/// One entry of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
}

impl ItemRecord {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        item_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            item_type: item_type.into(),
            description: description.into(),
        }
    }
}

/// The authoritative set of item definitions, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalog {
    entries: BTreeMap<ItemId, ItemRecord>,
}

impl ItemCatalog {
    pub fn from_records(records: impl IntoIterator<Item = ItemRecord>) -> Self {
        Self {
            entries: records.into_iter().map(|record| (record.id, record)).collect(),
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemRecord> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display glyphs by semantic name, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    glyphs: HashMap<String, char>,
}

impl SymbolTable {
    pub const DOOR: &'static str = "DOOR";
    pub const NS_WALL: &'static str = "NS_WALL";
    pub const EW_WALL: &'static str = "EW_WALL";
    pub const PLAYER: &'static str = "PLAYER";
    pub const FLOOR: &'static str = "FLOOR";

    /// Names every rooms file relies on.
    pub const REQUIRED: [&'static str; 5] = [
        Self::DOOR,
        Self::NS_WALL,
        Self::EW_WALL,
        Self::PLAYER,
        Self::FLOOR,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, glyph)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, char)>) -> Self {
        let mut table = Self::new();
        for (name, glyph) in pairs {
            table.insert(name, glyph);
        }
        table
    }

    pub fn insert(&mut self, name: &str, glyph: char) {
        self.glyphs.insert(name.to_ascii_uppercase(), glyph);
    }

    pub fn get(&self, name: &str) -> Option<char> {
        self.glyphs.get(&name.to_ascii_uppercase()).copied()
    }

    /// Glyph for `name`, or the fallback glyph when it is not configured.
    pub fn glyph(&self, name: &str) -> char {
        self.get(name).unwrap_or(config::FALLBACK_GLYPH)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Structural names with no configured glyph.
    pub fn missing_required(&self) -> Vec<&'static str> {
        Self::REQUIRED
            .into_iter()
            .filter(|name| self.get(name).is_none())
            .collect()
    }
}

/// Everything the builder needs: rooms, the item catalog and the symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonData {
    pub rooms: Vec<RoomRecord>,
    pub items: Vec<ItemRecord>,
    pub symbols: SymbolTable,
}
