//! Battle configuration.
//!
//! `BattleConfig` carries the numeric rules of the format (deck size,
//! prize count, bench capacity, status damage). Defaults match the Pocket
//! format; drivers can deserialize a config or adjust it with the `with_*`
//! builders, then call `validate()`.

use serde::{Deserialize, Serialize};

use super::error::{BattleError, Result};

/// Rules parameters for one battle.
///
/// ## Example
///
/// ```
/// use pocket_tcg::core::BattleConfig;
///
/// let config = BattleConfig::default()
///     .with_sleep_wake_chance(1.0)
///     .with_strict_turn_structure(true);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.deck_size, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Exact number of cards a deck must contain.
    pub deck_size: usize,

    /// Prize cards set aside for each player at setup.
    pub prize_count: usize,

    /// Cards drawn into the opening hand.
    pub opening_hand_size: usize,

    /// Maximum number of benched Pokémon.
    pub bench_capacity: usize,

    /// Maximum copies of one card name per deck (checked by `DeckBuilder`).
    pub max_copies: usize,

    /// Damage dealt by poison at the end of its owner's turn.
    pub poison_damage: u32,

    /// Bonus added by `BonusIfDefenderPoisoned` attacks.
    pub status_bonus_damage: u32,

    /// Damage multiplier applied when the defender is weak to the attacker.
    pub weakness_multiplier: u32,

    /// Probability that an asleep Pokémon wakes at end of turn.
    pub sleep_wake_chance: f64,

    /// The starting player does not draw on the first turn of the game.
    pub skip_first_draw: bool,

    /// Enforce one energy attachment and one attack per turn.
    pub strict_turn_structure: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            deck_size: 20,
            prize_count: 3,
            opening_hand_size: 5,
            bench_capacity: 3,
            max_copies: 2,
            poison_damage: 10,
            status_bonus_damage: 30,
            weakness_multiplier: 2,
            sleep_wake_chance: 0.5,
            skip_first_draw: true,
            strict_turn_structure: false,
        }
    }
}

impl BattleConfig {
    #[must_use]
    pub fn with_bench_capacity(mut self, capacity: usize) -> Self {
        self.bench_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_copies(mut self, limit: usize) -> Self {
        self.max_copies = limit;
        self
    }

    #[must_use]
    pub fn with_poison_damage(mut self, damage: u32) -> Self {
        self.poison_damage = damage;
        self
    }

    #[must_use]
    pub fn with_sleep_wake_chance(mut self, chance: f64) -> Self {
        self.sleep_wake_chance = chance;
        self
    }

    #[must_use]
    pub fn with_skip_first_draw(mut self, skip: bool) -> Self {
        self.skip_first_draw = skip;
        self
    }

    #[must_use]
    pub fn with_strict_turn_structure(mut self, strict: bool) -> Self {
        self.strict_turn_structure = strict;
        self
    }

    /// Check that the parameters describe a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.deck_size == 0 {
            return Err(BattleError::InvalidConfig("deck_size must be positive".into()));
        }
        if self.prize_count + self.opening_hand_size > self.deck_size {
            return Err(BattleError::InvalidConfig(format!(
                "{} prizes and {} opening cards do not fit in a {}-card deck",
                self.prize_count, self.opening_hand_size, self.deck_size
            )));
        }
        if self.bench_capacity == 0 {
            return Err(BattleError::InvalidConfig("bench_capacity must be positive".into()));
        }
        if self.max_copies == 0 {
            return Err(BattleError::InvalidConfig("max_copies must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.sleep_wake_chance) {
            return Err(BattleError::InvalidConfig(format!(
                "sleep_wake_chance {} is not a probability",
                self.sleep_wake_chance
            )));
        }
        Ok(())
    }
}
