//! Collaborators the engine consults but does not define.
//!
//! Factories describe what entities look like and the item oracle owns the
//! inventory rules. The [`GameEnv`] aggregate bundles them so the engine can
//! access everything it needs without hard coupling to concrete
//! implementations (themed content lives in `game-content`).
mod factory;
mod items;
pub mod rng;

pub use factory::{EntityFactory, EntityTemplate, FixedFactory};
pub use items::{ItemOracle, NoLoot};
pub use rng::{GameRng, compute_seed, stream_rng};

/// Owned bundle of the engine's external collaborators.
pub struct GameEnv {
    factory: Box<dyn EntityFactory>,
    items: Box<dyn ItemOracle>,
}

impl GameEnv {
    pub fn new(factory: Box<dyn EntityFactory>, items: Box<dyn ItemOracle>) -> Self {
        Self { factory, items }
    }

    pub fn factory(&self) -> &dyn EntityFactory {
        self.factory.as_ref()
    }

    pub fn items(&mut self) -> &mut dyn ItemOracle {
        self.items.as_mut()
    }
}

impl Default for GameEnv {
    /// Fixed templates and no loot.
    fn default() -> Self {
        Self::new(Box::new(FixedFactory), Box::new(NoLoot))
    }
}

impl std::fmt::Debug for GameEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv").finish_non_exhaustive()
    }
}
