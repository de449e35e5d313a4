//! Deck lists.
//!
//! A `Deck` is an ordered list of card definitions. `DeckBuilder` assembles
//! one from card names and enforces the copy limit; the exact deck size is
//! checked later, when a `Player` is built from the deck.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::CardDefinition;
use super::registry::CardRegistry;
use crate::core::{BattleConfig, BattleError, Result};

/// A deck list: one entry per card slot.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Arc<CardDefinition>>,
}

impl Deck {
    /// Wrap a list of definitions without any legality checks.
    #[must_use]
    pub fn new(cards: Vec<Arc<CardDefinition>>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of Basic Pokémon in the list.
    #[must_use]
    pub fn basic_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_basic_pokemon()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.iter()
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Arc<CardDefinition>> {
        self.cards
    }
}

/// Builds a `Deck` from card names.
///
/// ```
/// use pocket_tcg::cards::{CardDefinition, CardRegistry, DeckBuilder, EnergyType};
/// use pocket_tcg::core::BattleConfig;
///
/// let registry = CardRegistry::from_definitions([
///     CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60),
/// ])
/// .unwrap();
///
/// let deck = DeckBuilder::new(&registry).add("Pikachu", 2).build().unwrap();
/// assert_eq!(deck.len(), 2);
///
/// let err = DeckBuilder::new(&registry).add("Pikachu", 3).build();
/// assert!(err.is_err());
///
/// let config = BattleConfig::default().with_max_copies(3);
/// let deck = DeckBuilder::for_config(&registry, &config).add("Pikachu", 3).build();
/// assert!(deck.is_ok());
/// ```
pub struct DeckBuilder<'a> {
    registry: &'a CardRegistry,
    max_copies: usize,
    entries: Vec<(String, usize)>,
}

impl<'a> DeckBuilder<'a> {
    /// Start an empty deck under the default `BattleConfig` copy limit.
    #[must_use]
    pub fn new(registry: &'a CardRegistry) -> Self {
        Self::for_config(registry, &BattleConfig::default())
    }

    /// Start an empty deck under `config.max_copies`.
    #[must_use]
    pub fn for_config(registry: &'a CardRegistry, config: &BattleConfig) -> Self {
        Self {
            registry,
            max_copies: config.max_copies,
            entries: Vec::new(),
        }
    }

    /// Add `count` copies of a card.
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, count: usize) -> Self {
        self.entries.push((name.into(), count));
        self
    }

    /// Resolve names and check the copy limit.
    pub fn build(self) -> Result<Deck> {
        let mut copies: FxHashMap<&str, usize> = FxHashMap::default();
        for (name, count) in &self.entries {
            *copies.entry(name.as_str()).or_insert(0) += count;
        }
        for (name, count) in copies {
            if count > self.max_copies {
                return Err(BattleError::TooManyCopies {
                    name: name.to_string(),
                    count,
                    limit: self.max_copies,
                });
            }
        }

        let mut cards = Vec::new();
        for (name, count) in &self.entries {
            let definition = self.registry.lookup(name)?;
            cards.extend(std::iter::repeat(definition).take(*count));
        }
        Ok(Deck::new(cards))
    }
}
