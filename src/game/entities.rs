//! # Items and the Player
//!
//! Items carry a closed type tag that decides which capabilities apply
//! (edible, wearable, throwable). The player owns an ordered inventory of
//! items and remembers at most one worn item by id.

use crate::{ItemId, ItemRecord, Position, RoomId, SymbolTable};
use serde::{Deserialize, Serialize};

/// The closed set of item types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Food,
    Clothing,
    Magic,
    Potion,
    Ring,
    SmallFood,
    /// Any tag outside the known set
    Generic,
}

/// What an item can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub edible: bool,
    pub wearable: bool,
    pub throwable: bool,
}

impl ItemKind {
    /// Dispatches a type tag to a kind, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomcrawl::ItemKind;
    ///
    /// assert_eq!(ItemKind::from_tag("smallfood"), ItemKind::SmallFood);
    /// assert_eq!(ItemKind::from_tag("Gem"), ItemKind::Generic);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "food" => ItemKind::Food,
            "clothing" => ItemKind::Clothing,
            "magic" => ItemKind::Magic,
            "potion" => ItemKind::Potion,
            "ring" => ItemKind::Ring,
            "smallfood" => ItemKind::SmallFood,
            _ => ItemKind::Generic,
        }
    }

    /// Capabilities granted by this kind.
    pub fn capabilities(self) -> Capabilities {
        match self {
            ItemKind::Food => Capabilities {
                edible: true,
                ..Capabilities::default()
            },
            ItemKind::SmallFood | ItemKind::Potion => Capabilities {
                edible: true,
                throwable: true,
                ..Capabilities::default()
            },
            ItemKind::Clothing | ItemKind::Ring => Capabilities {
                wearable: true,
                ..Capabilities::default()
            },
            ItemKind::Magic | ItemKind::Generic => Capabilities::default(),
        }
    }

    /// Whether the description is split on `:` into eat and toss texts.
    fn splits_description(self) -> bool {
        matches!(self, ItemKind::SmallFood | ItemKind::Potion)
    }
}

/// A game object that lives either in a room or in the player's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Type tag exactly as authored; used for glyph lookup
    pub type_tag: String,
    pub kind: ItemKind,
    pub description: String,
    /// Grid point inside `room`; meaningless while carried
    pub position: Position,
    /// Room holding this item, `None` while it is in an inventory
    pub room: Option<RoomId>,
}

impl Item {
    /// Creates a loose item at `position`, not yet attached to any room.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        type_tag: impl Into<String>,
        description: impl Into<String>,
        position: Position,
    ) -> Self {
        let type_tag = type_tag.into();
        Self {
            id,
            name: name.into(),
            kind: ItemKind::from_tag(&type_tag),
            type_tag,
            description: description.into(),
            position,
            room: None,
        }
    }

    /// Instantiates a catalog record at the given point.
    pub fn from_record(record: &ItemRecord, position: Position) -> Self {
        Self::new(
            record.id,
            record.name.clone(),
            record.item_type.clone(),
            record.description.clone(),
            position,
        )
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// Display glyph, looked up by uppercased type tag.
    pub fn glyph(&self, symbols: &SymbolTable) -> char {
        symbols.glyph(&self.type_tag)
    }

    /// Message produced by eating this item.
    pub fn eat_message(&self) -> String {
        if self.kind.splits_description() {
            self.description
                .split(':')
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            self.description.clone()
        }
    }

    /// Message produced by wearing this item.
    pub fn wear_message(&self) -> String {
        self.description.clone()
    }

    /// Message produced by tossing this item.
    pub fn toss_message(&self) -> String {
        if self.kind.splits_description() {
            let parts: Vec<&str> = self.description.split(':').collect();
            if let [_, thrown] = parts.as_slice() {
                return thrown.to_string();
            }
        }
        self.description.clone()
    }
}

/// Ordered collection of carried items; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item, detaching it from any room.
    pub fn add(&mut self, mut item: Item) {
        item.room = None;
        self.items.push(item);
    }

    /// Removes and returns the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Puts an item back at `index`, used to undo a failed removal.
    pub(crate) fn restore_at(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub name: String,
    pub worn: bool,
}

/// The single active player.
///
/// The player refers to its room by id; the room in turn records which
/// cell the player occupies. Both are updated together by [`crate::Dungeon`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub room: RoomId,
    pub position: Position,
    pub inventory: Inventory,
    /// Id of the worn item; always an item in `inventory`
    pub worn: Option<ItemId>,
}

impl Player {
    pub fn new(name: impl Into<String>, room: RoomId, position: Position) -> Self {
        Self {
            name: name.into(),
            room,
            position,
            inventory: Inventory::new(),
            worn: None,
        }
    }

    /// Currently worn item, if any.
    pub fn worn_item(&self) -> Option<&Item> {
        self.worn
            .and_then(|id| self.inventory.iter().find(|item| item.id == id))
    }

    /// Inventory names in order, with the worn item flagged.
    pub fn inventory_listing(&self) -> Vec<InventoryLine> {
        self.inventory
            .iter()
            .map(|item| InventoryLine {
                name: item.name.clone(),
                worn: self.worn == Some(item.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: &str, description: &str) -> Item {
        Item::new(1, "thing", kind, description, Position::new(1, 1))
    }

    #[test]
    fn test_kind_dispatch_defaults_to_generic() {
        assert_eq!(ItemKind::from_tag("FOOD"), ItemKind::Food);
        assert_eq!(ItemKind::from_tag("Ring"), ItemKind::Ring);
        assert_eq!(ItemKind::from_tag("potion"), ItemKind::Potion);
        assert_eq!(ItemKind::from_tag("scroll"), ItemKind::Generic);
    }

    #[test]
    fn test_capability_table() {
        assert!(ItemKind::Food.capabilities().edible);
        assert!(!ItemKind::Food.capabilities().throwable);
        assert!(ItemKind::SmallFood.capabilities().throwable);
        assert!(ItemKind::Clothing.capabilities().wearable);
        assert!(ItemKind::Ring.capabilities().wearable);
        assert_eq!(ItemKind::Magic.capabilities(), Capabilities::default());
        assert_eq!(ItemKind::Generic.capabilities(), Capabilities::default());
    }

    #[test]
    fn test_small_food_splits_description() {
        let crumb = item("SmallFood", "tasty:it bounces off the wall");
        assert_eq!(crumb.eat_message(), "tasty");
        assert_eq!(crumb.toss_message(), "it bounces off the wall");
    }

    #[test]
    fn test_toss_message_without_single_colon_uses_description() {
        let crumb = item("SmallFood", "no separator here");
        assert_eq!(crumb.toss_message(), "no separator here");
        let crumb = item("SmallFood", "a:b:c");
        assert_eq!(crumb.toss_message(), "a:b:c");
        assert_eq!(crumb.eat_message(), "a");
    }

    #[test]
    fn test_food_eats_whole_description() {
        let apple = item("Food", "crunchy: and sweet");
        assert_eq!(apple.eat_message(), "crunchy: and sweet");
    }

    #[test]
    fn test_inventory_listing_marks_worn_item() {
        let mut player = Player::new("Hero", 0, Position::new(1, 1));
        player.inventory.add(Item::new(3, "cloak", "Clothing", "warm", Position::origin()));
        player.inventory.add(Item::new(4, "bread", "Food", "yum", Position::origin()));
        player.worn = Some(3);

        let listing = player.inventory_listing();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name, "cloak");
        assert!(listing[0].worn);
        assert!(!listing[1].worn);
        assert_eq!(player.worn_item().map(|i| i.id), Some(3));
    }

    #[test]
    fn test_inventory_detaches_items_from_rooms() {
        let mut inventory = Inventory::new();
        let mut gem = item("Magic", "shiny");
        gem.room = Some(7);
        inventory.add(gem);
        assert_eq!(inventory.get(0).and_then(|i| i.room), None);
        assert!(inventory.remove_at(3).is_none());
        assert!(inventory.remove_at(0).is_some());
        assert!(inventory.is_empty());
    }
}
