//! Property tests for room geometry, door wiring and the movement engine.

use proptest::prelude::*;
use roomcrawl::{
    Direction, Dungeon, DungeonBuilder, DungeonData, ItemRecord, Position, Room, RoomRecord,
    SymbolTable, WallDirection,
};

/// A corridor of rooms joined east to west, with one food item in every
/// room after the first.
fn corridor(sizes: &[(i32, i32)], seeds: &[(u8, u8, u8, u8)]) -> DungeonData {
    let mut rooms: Vec<RoomRecord> = sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| RoomRecord::new(i as i32 + 1, *w, *h))
        .collect();
    rooms[0].start = true;

    let mut items = Vec::new();
    for i in 0..sizes.len() {
        let (east, west, x, y) = seeds[i];
        let (w, h) = sizes[i];
        if i + 1 < sizes.len() {
            let offset = 1 + east as i32 % (h - 2);
            rooms[i] = rooms[i]
                .clone()
                .with_door(WallDirection::East, offset, i as i32 + 2);
            let next_h = sizes[i + 1].1;
            let offset = 1 + west as i32 % (next_h - 2);
            rooms[i + 1] = rooms[i + 1]
                .clone()
                .with_door(WallDirection::West, offset, i as i32 + 1);
        }
        if i > 0 {
            let id = 100 + i as i32;
            rooms[i] = rooms[i]
                .clone()
                .with_loot(id, x as i32 % w, y as i32 % h);
            items.push(ItemRecord::new(id, format!("snack{}", i), "Food", "tasty"));
        }
    }

    DungeonData {
        rooms,
        items,
        symbols: SymbolTable::new(),
    }
}

fn corridor_strategy() -> impl Strategy<Value = DungeonData> {
    (
        prop::collection::vec((3..9i32, 3..9i32), 2..6),
        prop::collection::vec(any::<(u8, u8, u8, u8)>(), 6),
    )
        .prop_map(|(sizes, seeds)| corridor(&sizes, &seeds))
}

fn direction_strategy() -> impl Strategy<Value = Option<Direction>> {
    prop_oneof![
        Just(Some(Direction::Up)),
        Just(Some(Direction::Down)),
        Just(Some(Direction::Left)),
        Just(Some(Direction::Right)),
        Just(None),
    ]
}

fn assert_doors_symmetric(dungeon: &Dungeon) {
    for (index, door) in dungeon.doors().iter().enumerate() {
        assert!(door.is_complete());
        let [a, b] = door.connected_rooms() else {
            panic!("door {} does not join two rooms", index);
        };
        assert_eq!(door.other(*a), Some(*b));
        assert_eq!(door.other(*b), Some(*a));
        for room in [a, b] {
            let room = dungeon.room(*room).unwrap();
            assert!(room.door_ids().any(|id| id.0 == index));
        }
    }
}

proptest! {
    #[test]
    fn prop_wall_iff_border(
        (w, h, x, y) in (3..20i32, 3..20i32)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 0..w, 0..h))
    ) {
        let room = Room::new(1, w, h);
        let p = Position::new(x, y);
        prop_assert!(room.is_in_bounds(p));
        let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
        prop_assert_eq!(room.is_wall(p), border);
        prop_assert_eq!(room.wall_direction_of(p).is_some(), border);
    }

    #[test]
    fn prop_wall_offsets_round_trip(w in 3..20i32, h in 3..20i32, seed in any::<u16>()) {
        let room = Room::new(1, w, h);
        for wall in WallDirection::ALL {
            let length = match wall {
                WallDirection::North | WallDirection::South => w,
                WallDirection::East | WallDirection::West => h,
            };
            // Any offset strictly between the two corners.
            let k = 1 + seed as i32 % (length - 2);
            let p = room.point_on_wall(wall, k);
            prop_assert_eq!(room.wall_direction_of(p), Some(wall));
            prop_assert_eq!(Room::wall_offset(wall, p), k);
            prop_assert!(!room.is_wall(p + wall.inward()));
        }
    }

    #[test]
    fn prop_built_corridors_are_consistent(data in corridor_strategy()) {
        let rooms = data.rooms.len();
        let dungeon = DungeonBuilder::new(data).build().unwrap();
        prop_assert_eq!(dungeon.doors().len(), rooms - 1);
        assert_doors_symmetric(&dungeon);
        dungeon.check_invariants().unwrap();
    }

    #[test]
    fn prop_moves_keep_invariants_and_are_deterministic(
        data in corridor_strategy(),
        inputs in prop::collection::vec(direction_strategy(), 0..60),
    ) {
        let mut dungeon = DungeonBuilder::new(data).build().unwrap();
        let mut twin = dungeon.clone();

        for input in inputs {
            let before = dungeon.clone();
            let result = dungeon.apply_input(input);
            let twin_result = twin.apply_input(input);
            prop_assert_eq!(result.is_ok(), twin_result.is_ok());
            if result.is_err() {
                prop_assert_eq!(&dungeon, &before);
            }

            let room = dungeon.current_room().unwrap();
            let p = dungeon.player().position;
            prop_assert!(room.is_in_bounds(p));
            prop_assert!(!room.is_wall(p));
            prop_assert_eq!(room.player_position(), Some(p));
            dungeon.check_invariants().unwrap();
        }
        prop_assert_eq!(dungeon, twin);
    }
}
