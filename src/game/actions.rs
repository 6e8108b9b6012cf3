//! # Inventory Actions
//!
//! Eating, wearing and tossing items the player carries. Each action either
//! applies completely or leaves the dungeon untouched.

use crate::{CrawlError, CrawlResult, Dungeon};
use log::debug;
use serde::{Deserialize, Serialize};

/// Something the player can do with a carried item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseAction {
    Eat,
    Wear,
    Toss,
}

impl UseAction {
    fn refusal(self) -> &'static str {
        match self {
            UseAction::Eat => "That item cannot be eaten!",
            UseAction::Wear => "That item cannot be worn!",
            UseAction::Toss => "That item cannot be tossed!",
        }
    }
}

impl Dungeon {
    /// Applies `action` to the inventory item at zero-based `index` and
    /// returns the message to show.
    pub fn use_item(&mut self, action: UseAction, index: usize) -> CrawlResult<String> {
        if self.player.inventory.is_empty() {
            return Err(CrawlError::InvalidAction(
                "You are not carrying anything".to_string(),
            ));
        }
        let item = self.player.inventory.get(index).ok_or_else(|| {
            CrawlError::InvalidAction(format!("There is no item in slot {}", index + 1))
        })?;

        let capabilities = item.capabilities();
        let allowed = match action {
            UseAction::Eat => capabilities.edible,
            UseAction::Wear => capabilities.wearable,
            UseAction::Toss => capabilities.throwable,
        };
        if !allowed {
            return Err(CrawlError::InvalidAction(action.refusal().to_string()));
        }

        debug!("{:?} item {} ({})", action, item.id, item.name);
        match action {
            UseAction::Eat => self.eat(index),
            UseAction::Wear => self.wear(index),
            UseAction::Toss => self.toss(index),
        }
    }

    fn eat(&mut self, index: usize) -> CrawlResult<String> {
        let item = self.take_carried(index)?;
        Ok(item.eat_message())
    }

    fn wear(&mut self, index: usize) -> CrawlResult<String> {
        let item = self
            .player
            .inventory
            .get(index)
            .ok_or_else(|| CrawlError::InvalidState(format!("inventory slot {} vanished", index)))?;
        let message = item.wear_message();
        self.player.worn = Some(item.id);
        Ok(message)
    }

    /// Drops the item onto the first free interior tile of the current room.
    fn toss(&mut self, index: usize) -> CrawlResult<String> {
        let room_index = self.current_room_index()?;
        let spot = self.rooms[room_index].first_empty_tile().ok_or_else(|| {
            CrawlError::InvalidAction("There is no room to toss anything here".to_string())
        })?;

        let mut item = self.take_carried(index)?;
        let message = item.toss_message();
        item.position = spot;
        if let Err(rejected) = self.rooms[room_index].add_item(item, &self.catalog) {
            self.player.inventory.restore_at(index, rejected.item);
            return Err(rejected.reason);
        }
        Ok(message)
    }

    /// Removes an item from the inventory, unequipping it if worn.
    fn take_carried(&mut self, index: usize) -> CrawlResult<crate::Item> {
        let item = self
            .player
            .inventory
            .remove_at(index)
            .ok_or_else(|| CrawlError::InvalidState(format!("inventory slot {} vanished", index)))?;
        if self.player.worn == Some(item.id) {
            self.player.worn = None;
        }
        Ok(item)
    }
}
