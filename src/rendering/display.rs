//! # Display Management
//!
//! Frame composition for a line-oriented terminal.

use crate::rendering::{indent_block, render_blank_rect};
use crate::{config, CrawlResult, Dungeon, Player};

/// Terminal display for the game.
///
/// Keeps a bounded message history and turns the dungeon into the text
/// frame printed after every command.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Blank columns in front of the room block
    pub left_margin: usize,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_messages: config::MAX_MESSAGES,
            left_margin: config::RENDER_LEFT_MARGIN,
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Most recent message, if any.
    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Full frame: message line, room block and inventory panel.
    pub fn compose_frame(&self, dungeon: &Dungeon) -> CrawlResult<String> {
        let room = dungeon.render_current_room()?;

        let mut frame = String::new();
        frame.push_str(self.last_message().unwrap_or_default());
        frame.push_str("\n\n");
        frame.push_str(&indent_block(&room, self.left_margin));
        frame.push('\n');
        frame.push_str(&inventory_panel(dungeon.player()));
        Ok(frame)
    }

    /// Consumes the transition flag and, when a transition happened,
    /// returns the blank block that erases the room just left.
    pub fn take_transition_clear(&self, dungeon: &mut Dungeon) -> Option<String> {
        if !dungeon.consume_transition_flag() {
            return None;
        }
        let (width, height) = dungeon.previous_room_size()?;
        Some(indent_block(
            &render_blank_rect(width, height),
            self.left_margin,
        ))
    }
}

/// `Inventory:` followed by one item name per line; the worn item is
/// prefixed with `W: `.
pub fn inventory_panel(player: &Player) -> String {
    let mut panel = String::from("Inventory:\n");
    for line in player.inventory_listing() {
        if line.worn {
            panel.push_str("W: ");
        }
        panel.push_str(&line.name);
        panel.push('\n');
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Direction, DungeonBuilder, DungeonData, Item, Position, RoomRecord, SymbolTable,
        WallDirection,
    };

    fn dungeon() -> Dungeon {
        let data = DungeonData {
            rooms: vec![
                RoomRecord::new(1, 4, 3)
                    .starting()
                    .with_door(WallDirection::East, 1, 2),
                RoomRecord::new(2, 3, 3).with_door(WallDirection::West, 1, 1),
            ],
            items: vec![],
            symbols: SymbolTable::from_pairs([
                ("DOOR", '+'),
                ("NS_WALL", '-'),
                ("EW_WALL", '|'),
                ("PLAYER", '@'),
                ("FLOOR", '.'),
            ]),
        };
        DungeonBuilder::new(data).build().unwrap()
    }

    #[test]
    fn test_message_history_is_bounded() {
        let mut display = TerminalDisplay::new();
        display.max_messages = 2;
        display.add_message("one");
        display.add_message("two");
        display.add_message("three");
        assert_eq!(display.messages, vec!["two", "three"]);
        assert_eq!(display.last_message(), Some("three"));
    }

    #[test]
    fn test_inventory_panel_marks_worn_item() {
        let mut player = Player::new("Hero", 1, Position::new(1, 1));
        player.inventory.add(Item::new(1, "cloak", "Clothing", "warm", Position::origin()));
        player.inventory.add(Item::new(2, "bread", "Food", "yum", Position::origin()));
        player.worn = Some(1);
        assert_eq!(inventory_panel(&player), "Inventory:\nW: cloak\nbread\n");
    }

    #[test]
    fn test_frame_layout() {
        let mut display = TerminalDisplay::new();
        display.left_margin = 2;
        display.add_message("Moved");
        let frame = display.compose_frame(&dungeon()).unwrap();
        assert_eq!(frame, "Moved\n\n  ----\n  |@.+\n  ----\n\nInventory:\n");
    }

    #[test]
    fn test_transition_clear_is_polled_once() {
        let display = TerminalDisplay::new();
        let mut dungeon = dungeon();
        dungeon.apply_move(Direction::Right).unwrap();
        assert!(display.take_transition_clear(&mut dungeon).is_none());
        dungeon.apply_move(Direction::Right).unwrap();
        let clear = display.take_transition_clear(&mut dungeon).unwrap();
        assert_eq!(clear.lines().count(), 3);
        assert!(clear.lines().all(|line| line.len() == config::RENDER_LEFT_MARGIN + 4));
        assert!(display.take_transition_clear(&mut dungeon).is_none());
    }
}
