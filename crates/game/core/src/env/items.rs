//! Item oracle interface.
//!
//! The engine hands items to an [`ItemOracle`] when the player walks over
//! them and asks it for loot and equipment wear after a won battle. What an
//! item does to the player's stats is entirely up to the implementation.

use rand::RngCore;

use crate::state::{Entity, Item, ItemId, ItemSlot};

/// Inventory and loot rules.
///
/// Methods receive the player entity and mutate both its stats and its
/// inventory. Passing a non-player entity is a no-op.
pub trait ItemOracle {
    /// Puts an item into the player's inventory. Returns false when it does
    /// not fit.
    fn add_item(&mut self, player: &mut Entity, item: Item) -> bool;

    /// Moves a carried item into its slot, unequipping the previous occupant.
    fn equip_item(&mut self, player: &mut Entity, id: ItemId) -> bool;

    /// Returns the item in `slot` to the carried items.
    fn unequip_item(&mut self, player: &mut Entity, slot: ItemSlot) -> bool;

    /// Removes the item in `slot` for good, reverting its modifier.
    fn destroy_equipped_item(&mut self, player: &mut Entity, slot: ItemSlot) -> Option<Item>;

    /// Rolls a drop for a defeated enemy.
    fn roll_loot(&mut self, rng: &mut dyn RngCore) -> Option<Item>;

    /// Wears down equipped items after a won battle. Returns the items that
    /// broke.
    fn wear_equipment(&mut self, player: &mut Entity) -> Vec<Item>;
}

/// Oracle that never drops loot and keeps picked-up items unequipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLoot;

impl ItemOracle for NoLoot {
    fn add_item(&mut self, player: &mut Entity, item: Item) -> bool {
        match player.player_parts_mut() {
            Some((_, inventory)) => inventory.items.try_push(item).is_ok(),
            None => false,
        }
    }

    fn equip_item(&mut self, _player: &mut Entity, _id: ItemId) -> bool {
        false
    }

    fn unequip_item(&mut self, _player: &mut Entity, _slot: ItemSlot) -> bool {
        false
    }

    fn destroy_equipped_item(&mut self, _player: &mut Entity, _slot: ItemSlot) -> Option<Item> {
        None
    }

    fn roll_loot(&mut self, _rng: &mut dyn RngCore) -> Option<Item> {
        None
    }

    fn wear_equipment(&mut self, _player: &mut Entity) -> Vec<Item> {
        Vec::new()
    }
}
