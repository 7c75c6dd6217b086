//! Item catalog and the inventory rules built on it.

use game_core::{Entity, Item, ItemId, ItemOracle, ItemSlot};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BUILTIN_ITEMS: &str = include_str!("../data/items.ron");

/// Catalog entry; concrete [`Item`]s are minted from it with fresh ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub slot: ItemSlot,
    pub modifier: i32,
    /// Chance per kill, in `[0, 1]`.
    pub drop_chance: f64,
    pub durability: u32,
}

impl ItemDefinition {
    pub fn instantiate(&self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name.clone(),
            slot: self.slot,
            modifier: self.modifier,
            durability: self.durability,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// The seven items shipped with the crate.
    pub fn builtin() -> Result<Self, ron::error::SpannedError> {
        Self::from_ron(BUILTIN_ITEMS)
    }

    pub fn by_slot(&self, slot: ItemSlot) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter().filter(move |item| item.slot == slot)
    }
}

/// [`ItemOracle`] over an [`ItemCatalog`].
///
/// Picked-up items go straight into an empty slot when `auto_equip` is set.
/// Equipped items lose one durability per won battle and are destroyed at
/// zero.
#[derive(Clone, Debug)]
pub struct InventoryService {
    catalog: ItemCatalog,
    auto_equip: bool,
    next_id: u32,
}

impl InventoryService {
    pub fn new(catalog: ItemCatalog) -> Self {
        Self {
            catalog,
            auto_equip: true,
            next_id: 1,
        }
    }

    pub fn with_auto_equip(mut self, auto_equip: bool) -> Self {
        self.auto_equip = auto_equip;
        self
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Mints an item from the catalog entry at `index`.
    pub fn mint(&mut self, index: usize) -> Option<Item> {
        let definition = self.catalog.items.get(index)?;
        let id = ItemId(self.next_id);
        self.next_id += 1;
        Some(definition.instantiate(id))
    }
}

impl ItemOracle for InventoryService {
    fn add_item(&mut self, player: &mut Entity, item: Item) -> bool {
        let Some((_, inventory)) = player.player_parts_mut() else {
            return false;
        };
        let id = item.id;
        let slot = item.slot;
        if inventory.items.try_push(item).is_err() {
            return false;
        }

        if self.auto_equip && inventory.equipped(slot).is_none() {
            self.equip_item(player, id);
        }
        true
    }

    fn equip_item(&mut self, player: &mut Entity, id: ItemId) -> bool {
        let Some((stats, inventory)) = player.player_parts_mut() else {
            return false;
        };
        let Some(item) = inventory.take(id) else {
            return false;
        };

        if let Some(previous) = inventory.equipped.remove(&item.slot) {
            stats.revert_modifier(previous.slot, previous.modifier);
            // A slot was just freed by `take`, so this cannot overflow.
            let _ = inventory.items.try_push(previous);
        }

        stats.apply_modifier(item.slot, item.modifier);
        debug!(item = %item.name, slot = %item.slot, "item equipped");
        inventory.equipped.insert(item.slot, item);
        true
    }

    fn unequip_item(&mut self, player: &mut Entity, slot: ItemSlot) -> bool {
        let Some((stats, inventory)) = player.player_parts_mut() else {
            return false;
        };
        if inventory.is_full() {
            return false;
        }
        let Some(item) = inventory.equipped.remove(&slot) else {
            return false;
        };

        stats.revert_modifier(item.slot, item.modifier);
        inventory.items.push(item);
        true
    }

    fn destroy_equipped_item(&mut self, player: &mut Entity, slot: ItemSlot) -> Option<Item> {
        let (stats, inventory) = player.player_parts_mut()?;
        let item = inventory.equipped.remove(&slot)?;
        stats.revert_modifier(item.slot, item.modifier);
        Some(item)
    }

    fn roll_loot(&mut self, rng: &mut dyn RngCore) -> Option<Item> {
        let index = self
            .catalog
            .items
            .iter()
            .position(|definition| rng.r#gen::<f64>() < definition.drop_chance)?;
        self.mint(index)
    }

    fn wear_equipment(&mut self, player: &mut Entity) -> Vec<Item> {
        let worn_out: Vec<ItemSlot> = match player.player_parts_mut() {
            Some((_, inventory)) => inventory
                .equipped
                .values_mut()
                .filter_map(|item| {
                    item.durability = item.durability.saturating_sub(1);
                    (item.durability == 0).then_some(item.slot)
                })
                .collect(),
            None => return Vec::new(),
        };

        worn_out
            .into_iter()
            .filter_map(|slot| self.destroy_equipped_item(player, slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{EntityId, EntityKind, GameRng, GameStats, InventoryState, Position};
    use rand::SeedableRng;

    use super::*;

    fn player() -> Entity {
        Entity {
            id: EntityId::PLAYER,
            kind: EntityKind::Player {
                inventory: InventoryState::empty(),
            },
            position: Position::new(1, 1),
            stats: GameStats::new(100, 10, 5),
            name: "Hero".into(),
            symbol: '@',
        }
    }

    fn item(id: u32, slot: ItemSlot, modifier: i32, durability: u32) -> Item {
        Item {
            id: ItemId(id),
            name: format!("item-{id}"),
            slot,
            modifier,
            durability,
        }
    }

    #[test]
    fn builtin_catalog_has_seven_items() {
        let catalog = ItemCatalog::builtin().expect("builtin catalog");
        assert_eq!(catalog.items.len(), 7);
        assert_eq!(catalog.by_slot(ItemSlot::Sword).count(), 3);
        assert_eq!(catalog.by_slot(ItemSlot::Armor).count(), 2);
        assert_eq!(catalog.by_slot(ItemSlot::Ring).count(), 2);
    }

    #[test]
    fn pickup_auto_equips_into_empty_slot() {
        let mut service = InventoryService::new(ItemCatalog::default());
        let mut hero = player();

        assert!(service.add_item(&mut hero, item(1, ItemSlot::Sword, 5, 3)));
        assert!(service.add_item(&mut hero, item(2, ItemSlot::Sword, 9, 3)));

        let inventory = hero.inventory().expect("player");
        assert_eq!(inventory.equipped(ItemSlot::Sword).map(|i| i.id), Some(ItemId(1)));
        assert_eq!(inventory.items.len(), 1);
        assert_eq!(hero.stats.attack, 15);
    }

    #[test]
    fn equip_replaces_and_reverts_previous() {
        let mut service = InventoryService::new(ItemCatalog::default());
        let mut hero = player();
        service.add_item(&mut hero, item(1, ItemSlot::Armor, 5, 3));
        service.add_item(&mut hero, item(2, ItemSlot::Armor, 23, 3));

        assert!(service.equip_item(&mut hero, ItemId(2)));
        assert_eq!(hero.stats.defense, 28);
        let inventory = hero.inventory().expect("player");
        assert_eq!(inventory.items[0].id, ItemId(1));

        assert!(!service.equip_item(&mut hero, ItemId(99)));
    }

    #[test]
    fn unequip_and_destroy_revert_modifiers() {
        let mut service = InventoryService::new(ItemCatalog::default());
        let mut hero = player();
        service.add_item(&mut hero, item(1, ItemSlot::Ring, 20, 3));
        assert_eq!(hero.stats.max_health, 120);

        assert!(service.unequip_item(&mut hero, ItemSlot::Ring));
        assert_eq!(hero.stats.max_health, 100);
        assert!(!service.unequip_item(&mut hero, ItemSlot::Ring));

        assert!(service.equip_item(&mut hero, ItemId(1)));
        let destroyed = service.destroy_equipped_item(&mut hero, ItemSlot::Ring);
        assert_eq!(destroyed.map(|i| i.id), Some(ItemId(1)));
        assert_eq!(hero.stats.max_health, 100);
        assert!(hero.inventory().expect("player").items.is_empty());
    }

    #[test]
    fn wear_destroys_items_at_zero_durability() {
        let mut service = InventoryService::new(ItemCatalog::default());
        let mut hero = player();
        service.add_item(&mut hero, item(1, ItemSlot::Sword, 5, 1));
        service.add_item(&mut hero, item(2, ItemSlot::Armor, 5, 2));

        let broken = service.wear_equipment(&mut hero);
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].id, ItemId(1));
        assert_eq!(hero.stats.attack, 10);

        let inventory = hero.inventory().expect("player");
        assert_eq!(inventory.equipped(ItemSlot::Armor).map(|i| i.durability), Some(1));
    }

    #[test]
    fn full_inventory_rejects_without_change() {
        let mut service = InventoryService::new(ItemCatalog::default()).with_auto_equip(false);
        let mut hero = player();
        for id in 0..game_core::GameConfig::MAX_INVENTORY_SLOTS as u32 {
            assert!(service.add_item(&mut hero, item(id, ItemSlot::Ring, 1, 1)));
        }
        let before = hero.clone();
        assert!(!service.add_item(&mut hero, item(100, ItemSlot::Ring, 1, 1)));
        assert_eq!(hero, before);
    }

    #[test]
    fn certain_drop_mints_fresh_ids() {
        let catalog = ItemCatalog {
            items: vec![ItemDefinition {
                name: "Short Sword".into(),
                slot: ItemSlot::Sword,
                modifier: 5,
                drop_chance: 1.0,
                durability: 10,
            }],
        };
        let mut service = InventoryService::new(catalog);
        let mut rng = GameRng::seed_from_u64(3);

        let first = service.roll_loot(&mut rng).expect("certain drop");
        let second = service.roll_loot(&mut rng).expect("certain drop");
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "Short Sword");
    }

    #[test]
    fn impossible_drop_never_happens() {
        let catalog = ItemCatalog {
            items: vec![ItemDefinition {
                name: "Nothing".into(),
                slot: ItemSlot::Ring,
                modifier: 0,
                drop_chance: 0.0,
                durability: 1,
            }],
        };
        let mut service = InventoryService::new(catalog);
        let mut rng = GameRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(service.roll_loot(&mut rng).is_none());
        }
    }
}
