//! # Dungeon State
//!
//! The dungeon graph (rooms, doors, placed items) together with the single
//! active player, and the movement engine that mutates them.
//!
//! Every move resolves to exactly one outcome, checked in a fixed order:
//! door transition, item pickup, plain step, or a rejected move. Each
//! outcome is applied as one in-memory update so a caller never observes a
//! half-finished transition.

use crate::{
    config, CrawlError, CrawlResult, Direction, Door, DoorId, ItemCatalog, ItemId, Player,
    Position, Room, RoomId, SymbolTable,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// What a single move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player stepped onto an empty cell (or stayed put on an
    /// unrecognized input)
    Moved,
    /// The player stepped onto an item and picked it up
    PickedUpItem { item: ItemId },
    /// The player walked through a door into another room
    Transitioned { from: RoomId, to: RoomId },
}

impl MoveOutcome {
    /// Status line shown to the player.
    pub fn message(&self) -> &'static str {
        match self {
            MoveOutcome::Moved => "Moved",
            MoveOutcome::PickedUpItem { .. } => "Got item",
            MoveOutcome::Transitioned { .. } => "Transitioned rooms",
        }
    }
}

/// The whole dungeon: rooms and doors in arenas, the item catalog, the
/// display symbols and the active player.
///
/// Built once by [`crate::DungeonBuilder`]; afterwards only the player,
/// item placement and transition bookkeeping change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub(crate) rooms: Vec<Room>,
    pub(crate) doors: Vec<Door>,
    pub(crate) player: Player,
    pub(crate) catalog: ItemCatalog,
    pub(crate) symbols: SymbolTable,
    /// One-shot flag raised by a door transition
    pub(crate) room_transition: bool,
    /// Width and height of the room left by the last transition
    pub(crate) previous_room_size: Option<(i32, i32)>,
}

impl Dungeon {
    /// Assembles a dungeon from already-wired parts.
    pub(crate) fn assemble(
        rooms: Vec<Room>,
        doors: Vec<Door>,
        player: Player,
        catalog: ItemCatalog,
        symbols: SymbolTable,
    ) -> Self {
        Self {
            rooms,
            doors,
            player,
            catalog,
            symbols,
            room_transition: false,
            previous_room_size: None,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub(crate) fn room_index(&self, id: RoomId) -> Option<usize> {
        self.rooms.iter().position(|room| room.id == id)
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player.name = name.into();
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Room the player is standing in.
    pub fn current_room(&self) -> CrawlResult<&Room> {
        self.room(self.player.room).ok_or_else(|| {
            CrawlError::InvalidState(format!("player is in unknown room {}", self.player.room))
        })
    }

    pub(crate) fn current_room_index(&self) -> CrawlResult<usize> {
        self.room_index(self.player.room).ok_or_else(|| {
            CrawlError::InvalidState(format!("player is in unknown room {}", self.player.room))
        })
    }

    /// Moves the player one cell in `direction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomcrawl::{Direction, DungeonBuilder, DungeonData, MoveOutcome, RoomRecord, SymbolTable, WallDirection};
    ///
    /// let data = DungeonData {
    ///     rooms: vec![
    ///         RoomRecord::new(1, 5, 5).starting().with_door(WallDirection::East, 2, 2),
    ///         RoomRecord::new(2, 5, 5).with_door(WallDirection::West, 2, 1),
    ///     ],
    ///     items: vec![],
    ///     symbols: SymbolTable::new(),
    /// };
    /// let mut dungeon = DungeonBuilder::new(data).build().unwrap();
    /// assert_eq!(dungeon.apply_move(Direction::Right).unwrap(), MoveOutcome::Moved);
    /// assert!(dungeon.apply_move(Direction::Up).is_err());
    /// ```
    pub fn apply_move(&mut self, direction: Direction) -> CrawlResult<MoveOutcome> {
        self.apply_input(Some(direction))
    }

    /// Resolves one input. `None` stands for an unrecognized key, which
    /// does not displace the player.
    pub fn apply_input(&mut self, direction: Option<Direction>) -> CrawlResult<MoveOutcome> {
        let room_index = self.current_room_index()?;
        let target = self.player.position + Direction::delta_of(direction);

        let room = &self.rooms[room_index];
        let door = room.door_at(target);
        let blocked = room.is_wall(target) || !room.is_in_bounds(target);
        let on_item = room.is_occupied_by_item(target);

        let outcome = if let Some(door) = door {
            self.transition(room_index, target, door)?
        } else if blocked {
            debug!("Move into wall at ({}, {}) rejected", target.x, target.y);
            return Err(CrawlError::InvalidMove);
        } else if on_item {
            self.pick_up(room_index, target)?
        } else {
            self.place_player(room_index, target);
            MoveOutcome::Moved
        };

        debug!(
            "Move resolved to {:?}; player in room {} at ({}, {})",
            outcome, self.player.room, self.player.position.x, self.player.position.y
        );
        Ok(outcome)
    }

    fn place_player(&mut self, room_index: usize, position: Position) {
        self.rooms[room_index].set_player(Some(position));
        self.player.position = position;
    }

    fn pick_up(&mut self, room_index: usize, target: Position) -> CrawlResult<MoveOutcome> {
        let item = self.rooms[room_index].take_item_at(target).ok_or_else(|| {
            CrawlError::InvalidState(format!("no item at ({}, {})", target.x, target.y))
        })?;
        let id = item.id;
        self.player.inventory.add(item);
        self.place_player(room_index, target);
        Ok(MoveOutcome::PickedUpItem { item: id })
    }

    /// Carries the player through `door` into the room on its far side.
    ///
    /// The player lands on the mirrored wall of the destination room, at the
    /// offset where that room registers the same door, then one cell inward.
    fn transition(
        &mut self,
        room_index: usize,
        target: Position,
        door: DoorId,
    ) -> CrawlResult<MoveOutcome> {
        let from = &self.rooms[room_index];
        let wall = from.wall_direction_of(target).ok_or_else(|| {
            CrawlError::InvalidState(format!("door at ({}, {}) is not on a wall", target.x, target.y))
        })?;
        let offset = Room::wall_offset(wall, target);
        let from_id = from.id;
        let from_size = (from.width, from.height);

        let to_id = self
            .door(door)
            .and_then(|d| d.other(from_id))
            .ok_or_else(|| {
                CrawlError::InvalidState(format!(
                    "door on wall {} of room {} leads nowhere",
                    wall, from_id
                ))
            })?;
        let to_index = self.room_index(to_id).ok_or_else(|| {
            CrawlError::InvalidState(format!("door leads to unknown room {}", to_id))
        })?;

        let entry_wall = wall.opposite();
        let dest = &self.rooms[to_index];
        let entry_offset = dest
            .offset_of(entry_wall, door)
            .or_else(|| dest.door_on(entry_wall).map(|(offset, _)| offset))
            .unwrap_or(offset);
        let landing = dest.point_on_wall(entry_wall, entry_offset) + entry_wall.inward();
        if !dest.is_in_bounds(landing) || dest.is_wall(landing) {
            return Err(CrawlError::InvalidMove);
        }

        self.rooms[room_index].set_player(None);
        let dest = &mut self.rooms[to_index];
        let carried = dest.take_item_at(landing);
        dest.set_player(Some(landing));
        if let Some(item) = carried {
            self.player.inventory.add(item);
        }
        self.player.room = to_id;
        self.player.position = landing;
        self.previous_room_size = Some(from_size);
        self.room_transition = true;

        Ok(MoveOutcome::Transitioned {
            from: from_id,
            to: to_id,
        })
    }

    /// Returns whether a room transition happened since the last call.
    pub fn consume_transition_flag(&mut self) -> bool {
        std::mem::take(&mut self.room_transition)
    }

    /// Width and height of the room left by the most recent transition.
    pub fn previous_room_size(&self) -> Option<(i32, i32)> {
        self.previous_room_size
    }

    /// Text rendering of the player's current room.
    pub fn render_current_room(&self) -> CrawlResult<String> {
        Ok(self.current_room()?.render(&self.symbols))
    }

    /// Every room, one after another, separated by a blank line.
    pub fn render_all(&self) -> String {
        self.rooms
            .iter()
            .map(|room| room.render(&self.symbols))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serializes the whole dungeon to a JSON snapshot.
    pub fn to_snapshot(&self) -> CrawlResult<String> {
        serde_json::to_string_pretty(self).map_err(CrawlError::from)
    }

    /// Restores a dungeon from a snapshot, rejecting one whose invariants
    /// do not hold.
    pub fn from_snapshot(snapshot: &str) -> CrawlResult<Self> {
        let dungeon: Dungeon = serde_json::from_str(snapshot)?;
        dungeon.check_invariants()?;
        Ok(dungeon)
    }

    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> CrawlResult<()> {
        fs::write(path, self.to_snapshot()?)?;
        Ok(())
    }

    pub fn load_snapshot(path: impl AsRef<Path>) -> CrawlResult<Self> {
        let snapshot = fs::read_to_string(path)?;
        Self::from_snapshot(&snapshot)
    }

    /// Checks every structural invariant of the graph and the player.
    pub fn check_invariants(&self) -> CrawlResult<()> {
        let invalid = |reason: String| Err(CrawlError::InvalidState(reason));

        let mut room_ids = HashSet::new();
        for room in &self.rooms {
            if !room_ids.insert(room.id) {
                return invalid(format!("room {} appears twice", room.id));
            }
            if room.width < config::MIN_ROOM_SIDE || room.height < config::MIN_ROOM_SIDE {
                return invalid(format!("room {} is {}x{}", room.id, room.width, room.height));
            }
            match room.verify(&self.doors) {
                Ok(true) => {}
                Ok(false) => return invalid(format!("room {} failed validation", room.id)),
                Err(e) => return invalid(format!("room {}: {}", room.id, e)),
            }
            if let Some(item) = room.items().iter().find(|item| item.room != Some(room.id)) {
                return invalid(format!("item {} in room {} belongs elsewhere", item.id, room.id));
            }
        }

        for (index, door) in self.doors.iter().enumerate() {
            if !door.is_complete() {
                return invalid(format!("door {} is not connected to two rooms", index));
            }
            for room_id in door.connected_rooms() {
                let registered = self
                    .room(*room_id)
                    .is_some_and(|room| room.door_ids().any(|id| id == DoorId(index)));
                if !registered {
                    return invalid(format!("room {} does not know door {}", room_id, index));
                }
            }
        }

        let current = self.current_room()?;
        if current.player_position() != Some(self.player.position) {
            return invalid("player position disagrees with its room".to_string());
        }
        if let Some(other) = self
            .rooms
            .iter()
            .find(|room| room.id != current.id && room.player_position().is_some())
        {
            return invalid(format!("room {} also holds the player", other.id));
        }

        let mut item_ids = HashSet::new();
        let carried = self.player.inventory.iter();
        for item in self.rooms.iter().flat_map(|room| room.items()).chain(carried) {
            if !item_ids.insert(item.id) {
                return invalid(format!("item {} exists twice", item.id));
            }
        }
        if let Some(item) = self.player.inventory.iter().find(|item| item.room.is_some()) {
            return invalid(format!("carried item {} still names a room", item.id));
        }
        if let Some(worn) = self.player.worn {
            if !self.player.inventory.contains(worn) {
                return invalid(format!("worn item {} is not carried", worn));
            }
        }
        Ok(())
    }
}
