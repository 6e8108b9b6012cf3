//! # Command Definitions
//!
//! The command vocabulary shown by the help screen.

/// One entry of the help table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// What the player types
    pub keys: &'static str,
    /// What it does
    pub summary: &'static str,
}

/// Every command the terminal driver understands, in help order.
pub const COMMANDS: [Command; 13] = [
    Command { keys: "k, up", summary: "move up" },
    Command { keys: "j, down", summary: "move down" },
    Command { keys: "h, left", summary: "move left" },
    Command { keys: "l, right", summary: "move right" },
    Command { keys: "e N", summary: "eat inventory item N" },
    Command { keys: "w N", summary: "wear inventory item N" },
    Command { keys: "t N", summary: "toss inventory item N" },
    Command { keys: "i", summary: "show inventory" },
    Command { keys: "save PATH", summary: "save the game to PATH" },
    Command { keys: "load PATH", summary: "load a saved game from PATH" },
    Command { keys: "open PATH", summary: "start a new dungeon from a file-locations document" },
    Command { keys: "name NAME", summary: "change the player's name" },
    Command { keys: "q", summary: "quit" },
];

/// Help screen text, one command per line.
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|c| c.keys.len()).max().unwrap_or(0);
    let mut text = String::from("Commands:\n");
    for command in COMMANDS {
        text.push_str(&format!(
            "  {:<width$}  {}\n",
            command.keys,
            command.summary,
            width = width
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        assert_eq!(help.lines().count(), COMMANDS.len() + 1);
        assert!(help.contains("eat inventory item N"));
        assert!(help.contains("name NAME"));
    }
}
