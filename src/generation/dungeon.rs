//! # Dungeon Building
//!
//! Turns parsed records into a wired, validated [`Dungeon`].
//!
//! Building runs in fixed phases:
//! 1. Create every room, putting the player in the start room first
//! 2. Place each room's loot, relocating an item once if its cell is taken
//! 3. Wire doors wall by wall, completing doors the neighbour already opened
//! 4. Verify every room, repairing rooms that have no doors at all

use crate::{
    config, CrawlError, CrawlResult, Door, DoorId, Dungeon, DungeonData, Item, ItemCatalog,
    ItemId, Player, Position, RejectedItem, Room, RoomId, RoomRecord, WallDirection,
};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

/// Builds a [`Dungeon`] from loaded data.
///
/// # Examples
///
/// ```
/// use roomcrawl::{DungeonBuilder, DungeonData, RoomRecord, SymbolTable, WallDirection};
///
/// let data = DungeonData {
///     rooms: vec![
///         RoomRecord::new(1, 5, 5).starting().with_door(WallDirection::South, 2, 2),
///         RoomRecord::new(2, 5, 5).with_door(WallDirection::North, 2, 1),
///     ],
///     items: vec![],
///     symbols: SymbolTable::new(),
/// };
/// let dungeon = DungeonBuilder::new(data).with_player_name("Rogue").build().unwrap();
/// assert_eq!(dungeon.player().name, "Rogue");
/// assert_eq!(dungeon.doors().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DungeonBuilder {
    data: DungeonData,
    player_name: String,
}

/// A door opened by one room and still waiting for its far side.
#[derive(Debug, Clone, Copy)]
struct PendingDoor {
    door: DoorId,
    leads_to: RoomId,
}

impl DungeonBuilder {
    pub fn new(data: DungeonData) -> Self {
        Self {
            data,
            player_name: config::DEFAULT_PLAYER_NAME.to_string(),
        }
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Consumes the builder and produces a validated dungeon.
    pub fn build(self) -> CrawlResult<Dungeon> {
        let DungeonData {
            rooms: records,
            items,
            symbols,
        } = self.data;
        let catalog = ItemCatalog::from_records(items);

        let start = start_room(&records)?;
        let player = Player::new(self.player_name, start, config::player_start());

        let mut rooms = Vec::with_capacity(records.len());
        let mut placed = HashSet::new();
        for record in &records {
            if record.width < config::MIN_ROOM_SIDE || record.height < config::MIN_ROOM_SIDE {
                return Err(CrawlError::Unusable {
                    reason: format!(
                        "room {} is {}x{}; rooms need at least {} cells per side",
                        record.id, record.width, record.height, config::MIN_ROOM_SIDE
                    ),
                });
            }
            if rooms.iter().any(|room: &Room| room.id == record.id) {
                return Err(CrawlError::Unusable {
                    reason: format!("room {} is defined twice", record.id),
                });
            }
            let mut room = Room::new(record.id, record.width, record.height);
            if record.start {
                room.set_player(Some(player.position));
            }
            place_loot(&mut room, record, &catalog, &mut placed)?;
            rooms.push(room);
        }

        let mut doors = wire_doors(&mut rooms, &records);
        verify_rooms(&mut rooms, &mut doors)?;

        info!(
            "Built dungeon with {} rooms, {} doors and {} placed items",
            rooms.len(),
            doors.len(),
            placed.len()
        );
        Ok(Dungeon::assemble(rooms, doors, player, catalog, symbols))
    }
}

/// Builds a dungeon with the default player name.
pub fn build_dungeon(data: DungeonData) -> CrawlResult<Dungeon> {
    DungeonBuilder::new(data).build()
}

fn start_room(records: &[RoomRecord]) -> CrawlResult<RoomId> {
    let mut starts = records.iter().filter(|record| record.start);
    match (starts.next(), starts.next()) {
        (Some(record), None) => Ok(record.id),
        (None, _) => Err(CrawlError::Unusable {
            reason: "no room is marked as the start room".to_string(),
        }),
        (Some(first), Some(second)) => Err(CrawlError::Unusable {
            reason: format!(
                "rooms {} and {} are both marked as the start room",
                first.id, second.id
            ),
        }),
    }
}

fn place_loot(
    room: &mut Room,
    record: &RoomRecord,
    catalog: &ItemCatalog,
    placed: &mut HashSet<ItemId>,
) -> CrawlResult<()> {
    for loot in &record.loot {
        if placed.contains(&loot.item) {
            warn!(
                "Item {} is placed more than once; skipping the copy in room {}",
                loot.item, room.id
            );
            continue;
        }
        let position = Position::new(loot.x, loot.y);
        let item = match catalog.get(loot.item) {
            Some(entry) => Item::from_record(entry, position),
            None => Item::new(loot.item, "", "", "", position),
        };
        if place_item(room, item, catalog)? {
            placed.insert(loot.item);
        }
    }
    Ok(())
}

/// Adds one item, relocating it once on a position conflict.
///
/// Returns `false` when the item was dropped as unknown.
fn place_item(room: &mut Room, item: Item, catalog: &ItemCatalog) -> CrawlResult<bool> {
    let mut item = match room.add_item(item, catalog) {
        Ok(()) => return Ok(true),
        Err(RejectedItem {
            item,
            reason: CrawlError::ImpossiblePosition { .. },
        }) => item,
        Err(rejected) => return drop_unknown(room, rejected),
    };

    let spot = room.first_empty_tile().ok_or_else(|| {
        CrawlError::InvalidState(format!(
            "room {} has no free cell for item {}",
            room.id, item.id
        ))
    })?;
    debug!(
        "Relocating item {} in room {} from ({}, {}) to ({}, {})",
        item.id, room.id, item.position.x, item.position.y, spot.x, spot.y
    );
    item.position = spot;

    match room.add_item(item, catalog) {
        Ok(()) => Ok(true),
        Err(RejectedItem {
            item,
            reason: CrawlError::ImpossiblePosition { .. },
        }) => Err(CrawlError::InvalidState(format!(
            "item {} could not be placed in room {} after relocation",
            item.id, room.id
        ))),
        Err(rejected) => drop_unknown(room, rejected),
    }
}

fn drop_unknown(room: &Room, rejected: RejectedItem) -> CrawlResult<bool> {
    match rejected.reason {
        CrawlError::UnknownItem { item } => {
            warn!("Dropping unknown item {} from room {}", item, room.id);
            Ok(false)
        }
        other => Err(other),
    }
}

/// Creates or completes a door for every declared wall opening.
fn wire_doors(rooms: &mut [Room], records: &[RoomRecord]) -> Vec<Door> {
    let mut doors: Vec<Door> = Vec::new();
    let mut pending: HashMap<(RoomId, WallDirection), PendingDoor> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        for (wall, declared) in &record.doors {
            let neighbour = declared.connects_to;
            let reusable = pending
                .get(&(neighbour, wall.opposite()))
                .copied()
                .filter(|open| doors[open.door.0].connected_rooms() == [neighbour]);

            let id = match reusable {
                Some(open) => {
                    if open.leads_to != record.id {
                        debug!(
                            "Room {} names room {} behind wall {}, but room {} completes it",
                            neighbour,
                            open.leads_to,
                            wall.opposite(),
                            record.id
                        );
                    }
                    doors[open.door.0].connect(record.id);
                    debug!(
                        "Room {} completes door {:?} from room {}",
                        record.id, open.door, neighbour
                    );
                    open.door
                }
                None => {
                    let id = DoorId(doors.len());
                    let mut door = Door::new();
                    door.connect(record.id);
                    doors.push(door);
                    pending.insert(
                        (record.id, *wall),
                        PendingDoor {
                            door: id,
                            leads_to: neighbour,
                        },
                    );
                    id
                }
            };
            rooms[index].set_door(*wall, declared.wall_pos, id);
        }
    }

    for ((owner, wall), open) in &pending {
        if !doors[open.door.0].is_complete() {
            warn!(
                "Door on wall {} of room {} was never completed by room {}",
                wall, owner, open.leads_to
            );
        }
    }
    doors
}

/// Verifies every room, repairing rooms without doors along the way.
fn verify_rooms(rooms: &mut [Room], doors: &mut Vec<Door>) -> CrawlResult<()> {
    for index in 0..rooms.len() {
        match rooms[index].verify(doors) {
            Ok(true) => {}
            Ok(false) => {
                return Err(CrawlError::InvalidRoom {
                    room: rooms[index].id,
                })
            }
            Err(CrawlError::NotEnoughDoors { room }) => {
                warn!("Room {} has no doors; attempting repair", room);
                repair(rooms, doors, index)?;
            }
            Err(other) => return Err(other),
        }
    }
    Ok(())
}

/// Joins the room at `index` to the first other room with a free wall.
///
/// The repaired room is not verified again.
fn repair(rooms: &mut [Room], doors: &mut Vec<Door>, index: usize) -> CrawlResult<()> {
    let deficient = rooms[index].id;
    let donor = rooms
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .find_map(|(other, room)| {
            WallDirection::ALL
                .into_iter()
                .find(|wall| !room.has_door_on(*wall))
                .map(|wall| (other, wall))
        });

    let Some((donor, wall)) = donor else {
        return Err(CrawlError::Unusable {
            reason: format!("room {} has no doors and no room can donate one", deficient),
        });
    };

    let id = DoorId(doors.len());
    let mut door = Door::new();
    door.connect(rooms[donor].id);
    door.connect(deficient);
    doors.push(door);

    rooms[donor].set_door(wall, config::REPAIR_DOOR_OFFSET, id);
    rooms[index].set_door(wall.opposite(), config::REPAIR_DOOR_OFFSET, id);
    info!(
        "Repaired room {} with a door to wall {} of room {}",
        deficient, wall, rooms[donor].id
    );
    Ok(())
}
