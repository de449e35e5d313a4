//! A player's side of the table.
//!
//! `Player` owns every zone a card can sit in: deck, hand, the active
//! slot, bench, discard pile, and prize cards. Cards only move forward:
//! deck → hand → active/bench → discard, or deck → prizes → the opponent's
//! hand.
//!
//! The deck is ordered with its top at the end of the vec, so drawing is a
//! `pop`.

use log::{debug, trace};

use super::Zone;
use crate::cards::{CardInstance, StatusCondition};
use crate::core::{BattleConfig, BattleError, EntityId, GameRng, PlayerId, Result};

/// One player's cards, split by zone.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    deck: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    active: Option<CardInstance>,
    bench: Vec<CardInstance>,
    discard: Vec<CardInstance>,
    prizes: Vec<CardInstance>,
    bench_capacity: usize,
}

impl Player {
    /// Build a player around a full deck.
    ///
    /// Fails with `InvalidDeckSize` unless the deck has exactly
    /// `config.deck_size` cards.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        deck: Vec<CardInstance>,
        config: &BattleConfig,
    ) -> Result<Self> {
        if deck.len() != config.deck_size {
            return Err(BattleError::InvalidDeckSize {
                expected: config.deck_size,
                actual: deck.len(),
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            deck,
            hand: Vec::new(),
            active: None,
            bench: Vec::new(),
            discard: Vec::new(),
            prizes: Vec::new(),
            bench_capacity: config.bench_capacity,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Deck ===

    /// Randomize deck order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.deck);
        trace!("{} shuffled {} cards", self.name, self.deck.len());
    }

    /// Move the top card of the deck into the hand.
    ///
    /// Returns `DeckEmpty` when there is nothing to draw; the battle decides
    /// what that means for the game.
    pub fn draw_card(&mut self) -> Result<&CardInstance> {
        let card = self.deck.pop().ok_or(BattleError::DeckEmpty)?;
        trace!("{} drew {}", self.name, card.name());
        self.hand.push(card);
        self.hand.last().ok_or(BattleError::DeckEmpty)
    }

    /// Set aside up to `count` prize cards from the top of the deck.
    ///
    /// Returns how many were dealt.
    pub(crate) fn deal_prizes(&mut self, count: usize) -> usize {
        let available = count.min(self.deck.len());
        let start = self.deck.len() - available;
        self.prizes.extend(self.deck.drain(start..).rev());
        available
    }

    #[must_use]
    pub fn deck(&self) -> &[CardInstance] {
        &self.deck
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    // === Hand ===

    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    /// Whether the hand holds a Basic Pokémon.
    #[must_use]
    pub fn has_basic_in_hand(&self) -> bool {
        self.hand.iter().any(|c| c.definition().is_basic_pokemon())
    }

    /// Remove a card from the hand.
    pub fn take_from_hand(&mut self, card: EntityId) -> Result<CardInstance> {
        let index = self
            .hand
            .iter()
            .position(|c| c.entity_id == card)
            .ok_or(BattleError::CardNotInHand(card))?;
        Ok(self.hand.remove(index))
    }

    pub(crate) fn add_to_hand(&mut self, cards: impl IntoIterator<Item = CardInstance>) {
        self.hand.extend(cards);
    }

    // === In play ===

    #[must_use]
    pub fn active(&self) -> Option<&CardInstance> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut CardInstance> {
        self.active.as_mut()
    }

    #[must_use]
    pub fn bench(&self) -> &[CardInstance] {
        &self.bench
    }

    #[must_use]
    pub fn bench_capacity(&self) -> usize {
        self.bench_capacity
    }

    #[must_use]
    pub fn has_pokemon_in_play(&self) -> bool {
        self.active.is_some() || !self.bench.is_empty()
    }

    /// Put a Pokémon into play: the active slot if it is empty, else the bench.
    ///
    /// A full bench hands the card back with `BenchFull`.
    pub fn place_in_play(
        &mut self,
        card: CardInstance,
    ) -> std::result::Result<Zone, (CardInstance, BattleError)> {
        if self.active.is_none() {
            self.active = Some(card);
            return Ok(Zone::Active);
        }
        if self.bench.len() >= self.bench_capacity {
            let err = BattleError::BenchFull {
                capacity: self.bench_capacity,
            };
            return Err((card, err));
        }
        self.bench.push(card);
        Ok(Zone::Bench)
    }

    /// Find one of this player's Pokémon in play.
    pub fn in_play_mut(&mut self, card: EntityId) -> Option<&mut CardInstance> {
        self.active
            .iter_mut()
            .chain(self.bench.iter_mut())
            .find(|c| c.entity_id == card)
    }

    /// Move a benched Pokémon into an empty active slot.
    pub fn promote(&mut self, bench_index: usize) -> Result<()> {
        if self.active.is_some() {
            return Err(BattleError::InvalidRetreat(
                "active slot is occupied".to_string(),
            ));
        }
        if bench_index >= self.bench.len() {
            return Err(BattleError::InvalidRetreat(format!(
                "no benched Pokémon at index {bench_index}"
            )));
        }
        let card = self.bench.remove(bench_index);
        debug!("{} promoted {} to active", self.name, card.name());
        self.active = Some(card);
        Ok(())
    }

    // === Retreat ===

    /// Whether the active Pokémon may retreat right now.
    ///
    /// Needs an active Pokémon that is not paralyzed and carries at least
    /// its retreat cost in energy.
    #[must_use]
    pub fn can_retreat(&self) -> bool {
        match &self.active {
            Some(active) => {
                !active.has_status(StatusCondition::Paralyzed)
                    && active.energy().len() >= active.definition().retreat_cost as usize
            }
            None => false,
        }
    }

    /// Pay the retreat cost and swap the active Pokémon with a benched one.
    pub fn retreat(&mut self, bench_index: usize) -> Result<()> {
        if !self.can_retreat() {
            return Err(BattleError::InvalidRetreat(
                "active Pokémon cannot retreat".to_string(),
            ));
        }
        if bench_index >= self.bench.len() {
            return Err(BattleError::InvalidRetreat(format!(
                "no benched Pokémon at index {bench_index}"
            )));
        }
        let Some(active) = self.active.as_mut() else {
            return Err(BattleError::NoActivePokemon);
        };

        let cost = active.definition().retreat_cost as usize;
        active.discard_energy(cost);
        std::mem::swap(active, &mut self.bench[bench_index]);
        debug!(
            "{} retreated {} for {}",
            self.name,
            self.bench[bench_index].name(),
            active.name()
        );
        Ok(())
    }

    // === Discard and prizes ===

    #[must_use]
    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard
    }

    /// Put a card in the discard pile, clearing its in-play state.
    pub fn discard(&mut self, mut card: CardInstance) {
        card.clear_in_play_state();
        self.discard.push(card);
    }

    /// Move the active Pokémon to the discard pile.
    ///
    /// Returns the prize value of the card that left play.
    pub(crate) fn discard_active(&mut self) -> Option<usize> {
        let card = self.active.take()?;
        let prize_value = card.definition().prize_value();
        self.discard(card);
        Some(prize_value)
    }

    #[must_use]
    pub fn prizes(&self) -> &[CardInstance] {
        &self.prizes
    }

    #[must_use]
    pub fn prize_count(&self) -> usize {
        self.prizes.len()
    }

    /// Remove up to `count` prize cards, oldest first.
    pub(crate) fn take_prizes(&mut self, count: usize) -> Vec<CardInstance> {
        let count = count.min(self.prizes.len());
        self.prizes.drain(..count).collect()
    }

    /// Where a card currently is, if this player holds it.
    #[must_use]
    pub fn locate(&self, card: EntityId) -> Option<Zone> {
        let holds = |cards: &[CardInstance]| cards.iter().any(|c| c.entity_id == card);

        if self.active.as_ref().is_some_and(|c| c.entity_id == card) {
            Some(Zone::Active)
        } else if holds(self.bench.as_slice()) {
            Some(Zone::Bench)
        } else if holds(self.hand.as_slice()) {
            Some(Zone::Hand)
        } else if holds(self.deck.as_slice()) {
            Some(Zone::Deck)
        } else if holds(self.discard.as_slice()) {
            Some(Zone::Discard)
        } else if holds(self.prizes.as_slice()) {
            Some(Zone::Prizes)
        } else {
            None
        }
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hand.len()
            + usize::from(self.active.is_some())
            + self.bench.len()
            + self.discard.len()
            + self.prizes.len()
    }
}
