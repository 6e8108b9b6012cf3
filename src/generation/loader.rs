//! # Data Loading
//!
//! Reads the JSON documents that describe a dungeon.
//!
//! A file-locations document names the rooms and symbols documents:
//!
//! ```json
//! { "Rooms": "rooms.json", "Symbols": "symbols.json" }
//! ```
//!
//! Relative paths are resolved against the directory of the file-locations
//! document. Every failure is reported as [`CrawlError::DataFile`] naming
//! the offending file.

use crate::{
    config, CrawlError, CrawlResult, DoorRecord, DungeonData, ItemRecord, LootRecord, RoomId,
    RoomRecord, SymbolTable, WallDirection,
};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct FileLocations {
    #[serde(rename = "Rooms")]
    rooms: PathBuf,
    #[serde(rename = "Symbols")]
    symbols: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RoomsDocument {
    room: Vec<RawRoom>,
    #[serde(default)]
    items: Vec<ItemRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRoom {
    id: RoomId,
    #[serde(default)]
    start: StartFlag,
    width: i32,
    height: i32,
    #[serde(default)]
    doors: Vec<RawDoor>,
    #[serde(default)]
    loot: Vec<RawLoot>,
}

/// Rooms files write the start flag either as a boolean or as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StartFlag {
    Flag(bool),
    Text(String),
}

impl Default for StartFlag {
    fn default() -> Self {
        StartFlag::Flag(false)
    }
}

impl StartFlag {
    fn is_set(&self) -> bool {
        match self {
            StartFlag::Flag(flag) => *flag,
            StartFlag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDoor {
    dir: String,
    wall_pos: i32,
    con_room: RoomId,
}

#[derive(Debug, Deserialize)]
struct RawLoot {
    id: i32,
    x: i32,
    y: i32,
}

#[derive(Debug, Deserialize)]
struct SymbolsDocument {
    symbols: Vec<RawSymbol>,
}

#[derive(Debug, Deserialize)]
struct RawSymbol {
    name: String,
    symbol: String,
}

fn data_error(file: &Path, reason: impl Into<String>) -> CrawlError {
    CrawlError::DataFile {
        file: file.to_path_buf(),
        reason: reason.into(),
    }
}

fn read_json<T: DeserializeOwned>(file: &Path) -> CrawlResult<T> {
    let text = fs::read_to_string(file).map_err(|e| data_error(file, e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| data_error(file, e.to_string()))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Loads the rooms, items and symbols named by a file-locations document.
pub fn load_dungeon_data(file_locations: impl AsRef<Path>) -> CrawlResult<DungeonData> {
    let file_locations = file_locations.as_ref();
    let locations: FileLocations = read_json(file_locations)?;
    let base = file_locations.parent().unwrap_or_else(|| Path::new(""));

    let rooms_file = resolve(base, &locations.rooms);
    let symbols_file = resolve(base, &locations.symbols);
    debug!(
        "Reading rooms from {} and symbols from {}",
        rooms_file.display(),
        symbols_file.display()
    );

    let (rooms, items) = load_rooms(&rooms_file)?;
    let symbols = load_symbols(&symbols_file)?;

    info!(
        "Loaded {} rooms, {} items and {} symbols",
        rooms.len(),
        items.len(),
        symbols.len()
    );
    Ok(DungeonData {
        rooms,
        items,
        symbols,
    })
}

/// Reads a rooms document into room and item tables.
pub fn load_rooms(file: &Path) -> CrawlResult<(Vec<RoomRecord>, Vec<ItemRecord>)> {
    let document: RoomsDocument = read_json(file)?;
    convert_rooms(document, file)
}

/// Parses rooms document text; `file` is only used for error messages.
pub fn parse_rooms(text: &str, file: &Path) -> CrawlResult<(Vec<RoomRecord>, Vec<ItemRecord>)> {
    let document: RoomsDocument =
        serde_json::from_str(text).map_err(|e| data_error(file, e.to_string()))?;
    convert_rooms(document, file)
}

fn convert_rooms(
    document: RoomsDocument,
    file: &Path,
) -> CrawlResult<(Vec<RoomRecord>, Vec<ItemRecord>)> {
    let mut seen = HashSet::new();
    let mut rooms = Vec::with_capacity(document.room.len());

    for raw in document.room {
        if !seen.insert(raw.id) {
            return Err(data_error(file, format!("room {} is defined twice", raw.id)));
        }
        if raw.width < config::MIN_ROOM_SIDE || raw.height < config::MIN_ROOM_SIDE {
            return Err(data_error(
                file,
                format!(
                    "room {} is {}x{}; rooms need at least one interior cell",
                    raw.id, raw.width, raw.height
                ),
            ));
        }

        let mut doors = BTreeMap::new();
        for door in raw.doors {
            let wall = WallDirection::from_tag(&door.dir).ok_or_else(|| {
                data_error(
                    file,
                    format!("room {} has a door on unknown wall '{}'", raw.id, door.dir),
                )
            })?;
            if door.wall_pos == -1 || door.con_room == -1 {
                continue;
            }
            doors.insert(
                wall,
                DoorRecord {
                    wall_pos: door.wall_pos,
                    connects_to: door.con_room,
                },
            );
        }

        rooms.push(RoomRecord {
            id: raw.id,
            width: raw.width,
            height: raw.height,
            start: raw.start.is_set(),
            doors,
            loot: raw
                .loot
                .into_iter()
                .map(|loot| LootRecord {
                    item: loot.id,
                    x: loot.x,
                    y: loot.y,
                })
                .collect(),
        });
    }

    match rooms.iter().filter(|room| room.start).count() {
        1 => {}
        0 => return Err(data_error(file, "no room is marked as the start room")),
        n => return Err(data_error(file, format!("{} rooms are marked as the start room", n))),
    }

    Ok((rooms, document.items))
}

/// Reads a symbols document.
pub fn load_symbols(file: &Path) -> CrawlResult<SymbolTable> {
    let document: SymbolsDocument = read_json(file)?;
    convert_symbols(document, file)
}

/// Parses symbols document text; `file` is only used for error messages.
pub fn parse_symbols(text: &str, file: &Path) -> CrawlResult<SymbolTable> {
    let document: SymbolsDocument =
        serde_json::from_str(text).map_err(|e| data_error(file, e.to_string()))?;
    convert_symbols(document, file)
}

fn convert_symbols(document: SymbolsDocument, file: &Path) -> CrawlResult<SymbolTable> {
    let mut symbols = SymbolTable::new();
    for raw in document.symbols {
        let glyph = raw
            .symbol
            .chars()
            .next()
            .ok_or_else(|| data_error(file, format!("symbol '{}' is empty", raw.name)))?;
        symbols.insert(&raw.name, glyph);
    }

    let missing = symbols.missing_required();
    if !missing.is_empty() {
        return Err(data_error(
            file,
            format!("missing symbols: {}", missing.join(", ")),
        ));
    }
    Ok(symbols)
}
