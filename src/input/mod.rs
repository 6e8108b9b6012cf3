//! # Input Module
//!
//! Parses the text commands typed at the terminal.

pub mod commands;

pub use commands::*;

use crate::Direction;
use std::path::PathBuf;

/// Input handler for processing player commands.
///
/// Converts one line of text into a [`PlayerInput`].
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomcrawl::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.parse("k"), PlayerInput::Move(Direction::Up));
    /// assert_eq!(input_handler.parse("e 2"), PlayerInput::Eat(1));
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Parses one line of input. Anything not understood is
    /// [`PlayerInput::Unrecognized`].
    pub fn parse(&self, line: &str) -> PlayerInput {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.to_ascii_lowercase();

        if rest.is_empty() {
            if let Some(direction) = self.direction_of(&word) {
                return PlayerInput::Move(direction);
            }
        }

        match (word.as_str(), rest) {
            ("e", slot) => parse_slot(slot).map_or(PlayerInput::Unrecognized, PlayerInput::Eat),
            ("w", slot) => parse_slot(slot).map_or(PlayerInput::Unrecognized, PlayerInput::Wear),
            ("t", slot) => parse_slot(slot).map_or(PlayerInput::Unrecognized, PlayerInput::Toss),
            ("i", "") => PlayerInput::ShowInventory,
            ("?", "") => PlayerInput::Help,
            ("q", "") => PlayerInput::Quit,
            ("save", path) if !path.is_empty() => PlayerInput::Save(PathBuf::from(path)),
            ("load", path) if !path.is_empty() => PlayerInput::Load(PathBuf::from(path)),
            ("open", path) if !path.is_empty() => PlayerInput::Open(PathBuf::from(path)),
            ("name", name) if !name.is_empty() => PlayerInput::Rename(name.to_string()),
            _ => PlayerInput::Unrecognized,
        }
    }

    fn direction_of(&self, word: &str) -> Option<Direction> {
        match word {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "k" if self.vi_keys_enabled => Some(Direction::Up),
            "j" if self.vi_keys_enabled => Some(Direction::Down),
            "h" if self.vi_keys_enabled => Some(Direction::Left),
            "l" if self.vi_keys_enabled => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Converts a 1-based slot as displayed into a 0-based inventory index.
fn parse_slot(slot: &str) -> Option<usize> {
    slot.parse::<usize>().ok()?.checked_sub(1)
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move in a given direction
    Move(Direction),
    /// Eat the item at this inventory index
    Eat(usize),
    /// Wear the item at this inventory index
    Wear(usize),
    /// Toss the item at this inventory index
    Toss(usize),
    /// Show inventory
    ShowInventory,
    /// Show help information
    Help,
    /// Save a snapshot to a file
    Save(PathBuf),
    /// Load a snapshot from a file
    Load(PathBuf),
    /// Start over from another file-locations document
    Open(PathBuf),
    /// Change the player's name
    Rename(String),
    /// Quit the game
    Quit,
    /// Anything else; handled as a move that goes nowhere
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_words() {
        let input = InputHandler::new();
        assert_eq!(input.parse("j"), PlayerInput::Move(Direction::Down));
        assert_eq!(input.parse("  LEFT "), PlayerInput::Move(Direction::Left));
        assert_eq!(input.parse("l"), PlayerInput::Move(Direction::Right));
        assert_eq!(input.parse("k extra"), PlayerInput::Unrecognized);
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let input = InputHandler {
            vi_keys_enabled: false,
        };
        assert_eq!(input.parse("h"), PlayerInput::Unrecognized);
        assert_eq!(input.parse("up"), PlayerInput::Move(Direction::Up));
    }

    #[test]
    fn test_item_slots_are_one_based() {
        let input = InputHandler::new();
        assert_eq!(input.parse("e 1"), PlayerInput::Eat(0));
        assert_eq!(input.parse("w 3"), PlayerInput::Wear(2));
        assert_eq!(input.parse("t 2"), PlayerInput::Toss(1));
        assert_eq!(input.parse("e 0"), PlayerInput::Unrecognized);
        assert_eq!(input.parse("e"), PlayerInput::Unrecognized);
        assert_eq!(input.parse("t x"), PlayerInput::Unrecognized);
    }

    #[test]
    fn test_other_commands() {
        let input = InputHandler::new();
        assert_eq!(input.parse("i"), PlayerInput::ShowInventory);
        assert_eq!(input.parse("?"), PlayerInput::Help);
        assert_eq!(input.parse("q"), PlayerInput::Quit);
        assert_eq!(
            input.parse("save games/one.json"),
            PlayerInput::Save(PathBuf::from("games/one.json"))
        );
        assert_eq!(input.parse("load"), PlayerInput::Unrecognized);
        assert_eq!(input.parse("xyzzy"), PlayerInput::Unrecognized);
        assert_eq!(input.parse(""), PlayerInput::Unrecognized);
    }

    #[test]
    fn test_rename_and_open() {
        let input = InputHandler::new();
        assert_eq!(
            input.parse("name  Sir Robin "),
            PlayerInput::Rename("Sir Robin".to_string())
        );
        assert_eq!(input.parse("NAME Ada"), PlayerInput::Rename("Ada".to_string()));
        assert_eq!(input.parse("name"), PlayerInput::Unrecognized);
        assert_eq!(
            input.parse("open other/fileLocations.json"),
            PlayerInput::Open(PathBuf::from("other/fileLocations.json"))
        );
        assert_eq!(input.parse("open "), PlayerInput::Unrecognized);
    }
}
