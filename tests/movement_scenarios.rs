//! Movement engine scenarios played through the public API.

use roomcrawl::{
    CrawlError, Direction, Dungeon, DungeonBuilder, DungeonData, ItemRecord, MoveOutcome,
    Position, RoomRecord, SymbolTable, WallDirection,
};

fn build(rooms: Vec<RoomRecord>, items: Vec<ItemRecord>) -> Dungeon {
    DungeonBuilder::new(DungeonData {
        rooms,
        items,
        symbols: SymbolTable::new(),
    })
    .build()
    .unwrap()
}

/// A 5x5 start room with a north door at offset 2 leading to a 7x7 room.
fn north_door() -> Dungeon {
    build(
        vec![
            RoomRecord::new(1, 5, 5)
                .starting()
                .with_door(WallDirection::North, 2, 2)
                .with_loot(3, 3, 3),
            RoomRecord::new(2, 7, 7).with_door(WallDirection::South, 4, 1),
        ],
        vec![ItemRecord::new(3, "potion", "Potion", "fizzy:it shatters")],
    )
}

#[test]
fn test_two_steps_north_walk_through_the_door() {
    let mut dungeon = north_door();
    dungeon.apply_move(Direction::Right).unwrap();
    dungeon.apply_move(Direction::Down).unwrap();
    assert_eq!(dungeon.player().position, Position::new(2, 2));

    assert_eq!(dungeon.apply_move(Direction::Up).unwrap(), MoveOutcome::Moved);
    assert_eq!(dungeon.player().position, Position::new(2, 1));

    let outcome = dungeon.apply_move(Direction::Up).unwrap();
    assert_eq!(outcome, MoveOutcome::Transitioned { from: 1, to: 2 });
    assert_eq!(outcome.message(), "Transitioned rooms");
    // Room 2 registers the same door at offset 4 of its south wall.
    assert_eq!(dungeon.player().room, 2);
    assert_eq!(dungeon.player().position, Position::new(4, 5));
    assert_eq!(
        dungeon.current_room().unwrap().player_position(),
        Some(Position::new(4, 5))
    );
    assert_eq!(dungeon.room(1).unwrap().player_position(), None);
    dungeon.check_invariants().unwrap();
}

#[test]
fn test_stepping_onto_an_item_picks_it_up() {
    let mut dungeon = north_door();
    dungeon.apply_move(Direction::Down).unwrap();
    dungeon.apply_move(Direction::Down).unwrap();
    dungeon.apply_move(Direction::Right).unwrap();
    let before = dungeon.current_room().unwrap().items().len();

    let outcome = dungeon.apply_move(Direction::Right).unwrap();
    assert_eq!(outcome, MoveOutcome::PickedUpItem { item: 3 });
    assert_eq!(dungeon.current_room().unwrap().items().len(), before - 1);
    assert_eq!(dungeon.player().inventory.len(), 1);
    assert_eq!(dungeon.player().position, Position::new(3, 3));
    assert_eq!(dungeon.player().inventory.get(0).unwrap().room, None);
}

#[test]
fn test_bumping_the_corner_wall_is_rejected() {
    let mut dungeon = north_door();
    for direction in [Direction::Left, Direction::Up] {
        let err = dungeon.apply_move(direction).unwrap_err();
        assert!(matches!(err, CrawlError::InvalidMove));
        assert_eq!(err.to_string(), "I can't move there!");
        assert_eq!(dungeon.player().position, Position::new(1, 1));
    }
    assert!(!dungeon.consume_transition_flag());
}

#[test]
fn test_every_room_renders_with_walls_and_doors() {
    let dungeon = north_door();
    let rendered = dungeon.render_all();
    let mut blocks = rendered.split("\n\n");
    let first = blocks.next().unwrap();
    assert!(first.starts_with("??"));
    assert_eq!(blocks.count(), 1);
}

#[test]
fn test_round_trip_returns_to_the_same_door() {
    let mut dungeon = north_door();
    dungeon.apply_move(Direction::Right).unwrap();
    dungeon.apply_move(Direction::Up).unwrap();
    assert_eq!(dungeon.player().room, 2);
    dungeon.consume_transition_flag();

    let outcome = dungeon.apply_move(Direction::Down).unwrap();
    assert_eq!(outcome, MoveOutcome::Transitioned { from: 2, to: 1 });
    assert_eq!(dungeon.player().position, Position::new(2, 1));
    assert_eq!(dungeon.previous_room_size(), Some((7, 7)));
    assert!(dungeon.consume_transition_flag());
}

#[test]
fn test_landing_on_an_item_carries_it() {
    let mut dungeon = build(
        vec![
            RoomRecord::new(1, 5, 5)
                .starting()
                .with_door(WallDirection::East, 1, 2),
            RoomRecord::new(2, 5, 5)
                .with_door(WallDirection::West, 1, 1)
                .with_loot(4, 1, 1),
        ],
        vec![ItemRecord::new(4, "ring", "Ring", "cold")],
    );
    dungeon.apply_move(Direction::Right).unwrap();
    dungeon.apply_move(Direction::Right).unwrap();
    let outcome = dungeon.apply_move(Direction::Right).unwrap();
    assert_eq!(outcome, MoveOutcome::Transitioned { from: 1, to: 2 });
    assert_eq!(dungeon.player().position, Position::new(1, 1));
    assert!(dungeon.player().inventory.contains(4));
    assert!(dungeon.current_room().unwrap().items().is_empty());
    dungeon.check_invariants().unwrap();
}
