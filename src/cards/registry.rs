//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores the card definitions supplied by an external
//! card source, keyed by card name. Definitions are validated on the way in
//! and handed out as shared `Arc`s so every instance can point at them.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, Category};
use crate::core::{BattleError, Result};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use pocket_tcg::cards::{CardDefinition, CardRegistry, EnergyType};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60))
///     .unwrap();
///
/// let found = registry.get("Pikachu").unwrap();
/// assert_eq!(found.hp, 60);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, Arc<CardDefinition>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a batch of definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = CardDefinition>) -> Result<Self> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Register a card definition.
    ///
    /// Fails if the definition is malformed or the name is taken.
    pub fn register(&mut self, card: CardDefinition) -> Result<Arc<CardDefinition>> {
        card.validate()?;
        if self.cards.contains_key(&card.name) {
            return Err(BattleError::InvalidCardData {
                name: card.name,
                reason: "already registered".to_string(),
            });
        }
        let card = Arc::new(card);
        self.cards.insert(card.name.clone(), Arc::clone(&card));
        Ok(card)
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<CardDefinition>> {
        self.cards.get(name)
    }

    /// Get a card definition by name, or `UnknownCard`.
    pub fn lookup(&self, name: &str) -> Result<Arc<CardDefinition>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| BattleError::UnknownCard(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }

    /// Find cards by category.
    pub fn find_by_category(&self, category: Category) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(move |c| c.category == category)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Arc<CardDefinition>>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}
