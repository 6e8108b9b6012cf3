//! # Rooms and Doors
//!
//! A room is a bounded grid whose border rows and columns are walls. Doors
//! sit on walls at a 1-D wall offset and join exactly two rooms. Doors live
//! in the dungeon's door arena and rooms refer to them by [`DoorId`].

use crate::{
    CrawlError, CrawlResult, DoorId, Item, ItemCatalog, Position, RoomId, SymbolTable,
    WallDirection,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An edge between two rooms, addressable from either side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    connected: Vec<RoomId>,
}

impl Door {
    /// Creates a door not yet connected to anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a room. Attempts beyond two rooms are ignored.
    pub fn connect(&mut self, room: RoomId) {
        if self.connected.len() < 2 {
            self.connected.push(room);
        }
    }

    /// Returns the room on the other side of `current`.
    ///
    /// `None` when the door is incomplete or `current` is not one of its rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomcrawl::Door;
    ///
    /// let mut door = Door::new();
    /// door.connect(1);
    /// assert_eq!(door.other(1), None);
    /// door.connect(2);
    /// assert_eq!(door.other(1), Some(2));
    /// assert_eq!(door.other(2), Some(1));
    /// assert_eq!(door.other(3), None);
    /// ```
    pub fn other(&self, current: RoomId) -> Option<RoomId> {
        if !self.is_complete() {
            return None;
        }
        match self.connected.as_slice() {
            [a, b] if *a == current => Some(*b),
            [a, b] if *b == current => Some(*a),
            _ => None,
        }
    }

    pub fn connected_rooms(&self) -> &[RoomId] {
        &self.connected
    }

    /// A complete door joins exactly two distinct rooms.
    pub fn is_complete(&self) -> bool {
        matches!(self.connected.as_slice(), [a, b] if a != b)
    }

    pub fn connects(&self, room: RoomId) -> bool {
        self.connected.contains(&room)
    }
}

/// A rectangular room. Interior cells are `1..width-1 × 1..height-1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub width: i32,
    pub height: i32,
    /// Cell held by the player while the player is in this room
    player: Option<Position>,
    items: Vec<Item>,
    /// Wall → (wall offset → door)
    doors: BTreeMap<WallDirection, BTreeMap<i32, DoorId>>,
}

/// An item that a room refused, handed back together with the reason.
#[derive(Debug)]
pub struct RejectedItem {
    pub item: Item,
    pub reason: CrawlError,
}

impl Room {
    pub fn new(id: RoomId, width: i32, height: i32) -> Self {
        Self {
            id,
            width,
            height,
            player: None,
            items: Vec::new(),
            doors: BTreeMap::new(),
        }
    }

    /// True iff `p` lies on the border rows or columns.
    pub fn is_wall(&self, p: Position) -> bool {
        p.x == 0 || p.x == self.width - 1 || p.y == 0 || p.y == self.height - 1
    }

    pub fn is_in_bounds(&self, p: Position) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    pub fn is_occupied_by_item(&self, p: Position) -> bool {
        self.items.iter().any(|item| item.position == p)
    }

    pub fn is_occupied_by_player(&self, p: Position) -> bool {
        self.player == Some(p)
    }

    /// Which wall `p` lies on, or `None` for interior points.
    ///
    /// Checked in the order W, E, N, S, so corners classify as W or E.
    pub fn wall_direction_of(&self, p: Position) -> Option<WallDirection> {
        if p.x == 0 {
            Some(WallDirection::West)
        } else if p.x == self.width - 1 {
            Some(WallDirection::East)
        } else if p.y == 0 {
            Some(WallDirection::North)
        } else if p.y == self.height - 1 {
            Some(WallDirection::South)
        } else {
            None
        }
    }

    /// Coordinate of `p` along `wall`: x for N/S, y for E/W.
    pub fn wall_offset(wall: WallDirection, p: Position) -> i32 {
        match wall {
            WallDirection::North | WallDirection::South => p.x,
            WallDirection::East | WallDirection::West => p.y,
        }
    }

    /// Grid point of the door opening at `offset` on `wall`.
    pub fn point_on_wall(&self, wall: WallDirection, offset: i32) -> Position {
        match wall {
            WallDirection::North => Position::new(offset, 0),
            WallDirection::South => Position::new(offset, self.height - 1),
            WallDirection::East => Position::new(self.width - 1, offset),
            WallDirection::West => Position::new(0, offset),
        }
    }

    /// Door whose opening is exactly at `p`.
    pub fn door_at(&self, p: Position) -> Option<DoorId> {
        let wall = self.wall_direction_of(p)?;
        self.doors
            .get(&wall)?
            .get(&Self::wall_offset(wall, p))
            .copied()
    }

    pub fn is_on_door(&self, p: Position) -> bool {
        self.door_at(p).is_some()
    }

    /// First door registered on `wall`, with its offset.
    pub fn door_on(&self, wall: WallDirection) -> Option<(i32, DoorId)> {
        self.doors
            .get(&wall)?
            .iter()
            .next()
            .map(|(offset, door)| (*offset, *door))
    }

    /// Offset of `door` on `wall`, if this room registers it there.
    pub fn offset_of(&self, wall: WallDirection, door: DoorId) -> Option<i32> {
        self.doors
            .get(&wall)?
            .iter()
            .find(|(_, id)| **id == door)
            .map(|(offset, _)| *offset)
    }

    pub fn has_door_on(&self, wall: WallDirection) -> bool {
        self.doors.get(&wall).is_some_and(|doors| !doors.is_empty())
    }

    /// Registers `door` at `offset` on `wall`.
    pub fn set_door(&mut self, wall: WallDirection, offset: i32, door: DoorId) {
        self.doors.entry(wall).or_default().insert(offset, door);
    }

    /// Every door of this room, wall by wall.
    pub fn door_ids(&self) -> impl Iterator<Item = DoorId> + '_ {
        self.doors.values().flat_map(|doors| doors.values().copied())
    }

    pub fn door_count(&self) -> usize {
        self.doors.values().map(BTreeMap::len).sum()
    }

    pub fn player_position(&self) -> Option<Position> {
        self.player
    }

    pub(crate) fn set_player(&mut self, position: Option<Position>) {
        self.player = position;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_at(&self, p: Position) -> Option<&Item> {
        self.items.iter().find(|item| item.position == p)
    }

    /// Checks whether `item` could be added without changing the room.
    pub fn check_placement(&self, item: &Item, catalog: &ItemCatalog) -> CrawlResult<()> {
        let p = item.position;
        if !self.is_in_bounds(p)
            || self.is_wall(p)
            || self.is_occupied_by_item(p)
            || self.is_occupied_by_player(p)
        {
            return Err(CrawlError::ImpossiblePosition {
                item: item.id,
                position: p,
            });
        }
        if !catalog.contains(item.id) {
            return Err(CrawlError::UnknownItem { item: item.id });
        }
        Ok(())
    }

    /// Adds an item at its own position and points it back at this room.
    ///
    /// On failure the item is handed back untouched.
    pub fn add_item(&mut self, mut item: Item, catalog: &ItemCatalog) -> Result<(), RejectedItem> {
        if let Err(reason) = self.check_placement(&item, catalog) {
            return Err(RejectedItem { item, reason });
        }
        item.room = Some(self.id);
        self.items.push(item);
        Ok(())
    }

    /// Removes the item at `p`, if any.
    pub fn take_item_at(&mut self, p: Position) -> Option<Item> {
        let index = self.items.iter().position(|item| item.position == p)?;
        Some(self.items.remove(index))
    }

    /// First interior cell, row-major, holding neither an item nor the player.
    pub fn first_empty_tile(&self) -> Option<Position> {
        (1..self.height - 1)
            .flat_map(|y| (1..self.width - 1).map(move |x| Position::new(x, y)))
            .find(|p| !self.is_occupied_by_item(*p) && !self.is_occupied_by_player(*p))
    }

    /// Validates the room once its doors are wired.
    ///
    /// Fails with [`CrawlError::NotEnoughDoors`] when the room has no doors.
    /// Otherwise `Ok(false)` reports a geometry problem: an item or the player
    /// outside the interior, the two sharing a cell, or an incomplete door.
    pub fn verify(&self, doors: &[Door]) -> CrawlResult<bool> {
        if self.door_count() == 0 {
            return Err(CrawlError::NotEnoughDoors { room: self.id });
        }
        Ok(self.items_valid() && self.player_valid() && self.doors_valid(doors))
    }

    fn items_valid(&self) -> bool {
        self.items.iter().all(|item| {
            let p = item.position;
            self.is_in_bounds(p) && !self.is_wall(p) && !self.is_occupied_by_player(p)
        })
    }

    fn player_valid(&self) -> bool {
        self.player.map_or(true, |p| {
            self.is_in_bounds(p) && !self.is_wall(p) && !self.is_occupied_by_item(p)
        })
    }

    fn doors_valid(&self, doors: &[Door]) -> bool {
        self.door_ids().all(|id| {
            doors
                .get(id.0)
                .is_some_and(|door| door.is_complete() && door.connects(self.id))
        })
    }

    /// ASCII rendering of the room, one line per row.
    ///
    /// Border cells show the wall glyph or, at door offsets, the door glyph.
    /// Interior cells show the player, then any item, then floor.
    pub fn render(&self, symbols: &SymbolTable) -> String {
        let mut out =
            String::with_capacity(((self.width.max(0) + 1) * self.height.max(0)) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.glyph_at(Position::new(x, y), symbols));
            }
            out.push('\n');
        }
        out
    }

    fn glyph_at(&self, p: Position, symbols: &SymbolTable) -> char {
        let wall = if p.y == 0 {
            Some((WallDirection::North, SymbolTable::NS_WALL))
        } else if p.y == self.height - 1 {
            Some((WallDirection::South, SymbolTable::NS_WALL))
        } else if p.x == 0 {
            Some((WallDirection::West, SymbolTable::EW_WALL))
        } else if p.x == self.width - 1 {
            Some((WallDirection::East, SymbolTable::EW_WALL))
        } else {
            None
        };

        if let Some((wall, wall_symbol)) = wall {
            let opening = self
                .doors
                .get(&wall)
                .is_some_and(|doors| doors.contains_key(&Self::wall_offset(wall, p)));
            return if opening {
                symbols.glyph(SymbolTable::DOOR)
            } else {
                symbols.glyph(wall_symbol)
            };
        }

        if self.is_occupied_by_player(p) {
            symbols.glyph(SymbolTable::PLAYER)
        } else if let Some(item) = self.item_at(p) {
            item.glyph(symbols)
        } else {
            symbols.glyph(SymbolTable::FLOOR)
        }
    }
}
