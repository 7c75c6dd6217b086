//! Items and the player's inventory.
//!
//! Inventory bookkeeping (what equipping does to stats, how loot is rolled) is
//! owned by an [`ItemOracle`](crate::env::ItemOracle); this module only holds
//! the data it mutates.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Equipment slot an item occupies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSlot {
    Sword,
    Armor,
    Ring,
}

/// Stable identifier for an item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

/// A concrete item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub slot: ItemSlot,
    /// Attack for swords, defense for armor, max health for rings.
    pub modifier: i32,
    /// Battles the item survives while equipped.
    pub durability: u32,
}

pub type InventoryItems = ArrayVec<Item, { GameConfig::MAX_INVENTORY_SLOTS }>;

/// Carried and equipped items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub items: InventoryItems,
    pub equipped: BTreeMap<ItemSlot, Item>,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub fn equipped(&self, slot: ItemSlot) -> Option<&Item> {
        self.equipped.get(&slot)
    }

    /// Removes a carried item by id.
    pub fn take(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
