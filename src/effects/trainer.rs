//! Trainer card effects.
//!
//! Trainer rules text is not modelled by the engine itself. Instead a
//! `TrainerRegistry` maps card names to `TrainerEffect` handlers; a trainer
//! with no handler is simply discarded.

use rustc_hash::FxHashMap;

use crate::core::GameRng;
use crate::zones::Player;

/// What a trainer effect can touch while it resolves.
pub struct TrainerContext<'a> {
    /// The player who played the card.
    pub player: &'a mut Player,
    pub opponent: &'a mut Player,
    pub rng: &'a mut GameRng,
}

/// A handler for one trainer card.
pub trait TrainerEffect: Send + Sync {
    /// Apply the effect. Returns a log line describing what happened, if
    /// anything did.
    fn resolve(&self, ctx: &mut TrainerContext<'_>) -> Option<String>;
}

impl<F> TrainerEffect for F
where
    F: Fn(&mut TrainerContext<'_>) -> Option<String> + Send + Sync,
{
    fn resolve(&self, ctx: &mut TrainerContext<'_>) -> Option<String> {
        self(ctx)
    }
}

/// Heals damage from the active Pokémon.
#[derive(Clone, Copy, Debug)]
pub struct Heal {
    pub amount: u32,
}

impl TrainerEffect for Heal {
    fn resolve(&self, ctx: &mut TrainerContext<'_>) -> Option<String> {
        let active = ctx.player.active_mut()?;
        let healed = active.heal(self.amount);
        Some(format!("{} healed {} damage", active.name(), healed))
    }
}

/// Trainer handlers keyed by card name.
///
/// ```
/// use pocket_tcg::effects::TrainerRegistry;
///
/// let registry = TrainerRegistry::standard();
/// assert!(registry.contains("Potion"));
/// assert!(!registry.contains("Professor's Research"));
/// ```
#[derive(Default)]
pub struct TrainerRegistry {
    handlers: FxHashMap<String, Box<dyn TrainerEffect>>,
}

impl TrainerRegistry {
    /// A registry with no handlers; every trainer is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers for the common trainers: `Potion` heals 20.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("Potion", Heal { amount: 20 });
        registry
    }

    /// Attach a handler to a card name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, effect: impl TrainerEffect + 'static) {
        self.handlers.insert(name.into(), Box::new(effect));
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Run the handler for `name`, if there is one.
    pub fn resolve(&self, name: &str, ctx: &mut TrainerContext<'_>) -> Option<String> {
        self.handlers.get(name)?.resolve(ctx)
    }
}

impl std::fmt::Debug for TrainerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("TrainerRegistry").field("handlers", &names).finish()
    }
}
