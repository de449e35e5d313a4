//! The battle: turn sequencing and rules enforcement for one game.
//!
//! A `Battle` owns both players, the turn counter, the RNG, and the event
//! log. Drivers call its action methods in any order; the battle checks
//! each call against the rules and either applies it or returns an error
//! without changing anything.
//!
//! ## Flow
//!
//! 1. `Battle::new` builds both players from their decks.
//! 2. `setup` shuffles, deals prizes and opening hands.
//! 3. Each player plays a Basic Pokémon into the active slot. Until they
//!    have, `check_win_condition` reports the empty board, but
//!    `legal_actions` keeps offering the placements.
//! 4. Turns run until `check_win_condition` returns a `Victory`; each turn
//!    is a series of actions closed by `end_turn`.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pocket_tcg::battle::Battle;
//! use pocket_tcg::cards::{Attack, CardDefinition, Deck, EnergyCost, EnergyType};
//! use pocket_tcg::core::{BattleConfig, PlayerId};
//!
//! let pikachu = Arc::new(
//!     CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60)
//!         .with_attack(Attack::new("Gnaw", EnergyCost::parse("L"), 20)),
//! );
//! let deck = || Deck::new(vec![Arc::clone(&pikachu); 20]);
//!
//! let mut battle = Battle::new(deck(), deck(), BattleConfig::default(), 7).unwrap();
//! let setup = battle.setup();
//! assert!(!setup.player1_mulligan);
//!
//! for player in PlayerId::both() {
//!     let card = battle.player(player).hand()[0].entity_id;
//!     battle.play_card(player, card).unwrap();
//! }
//! assert!(battle.check_win_condition().is_none());
//! ```

mod actions;
mod combat;
mod log;
mod setup;
mod snapshot;
mod status;
mod victory;

#[cfg(test)]
mod scenarios;

pub use self::combat::{AttackOutcome, KnockOut};
pub use self::log::{BattleLog, LogEntry};
pub use self::setup::SetupResult;
pub use self::snapshot::{
    AttackSnapshot, BattleSnapshot, CardSnapshot, PlayerSnapshot, SnapshotRecorder, TurnObserver,
};
pub use self::status::StatusOutcome;

use ::log::info;
use im::Vector;

use crate::cards::{CardInstance, Deck};
use crate::core::{
    Action, ActionRecord, BattleConfig, EntityAllocator, GameRng, PlayerId, PlayerMap, Result,
};
use crate::effects::TrainerRegistry;
use crate::rules::Victory;
use crate::zones::Player;

/// What the current player has already done this turn.
///
/// Only consulted when `strict_turn_structure` is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TurnBudget {
    energy_attached: bool,
    attacked: bool,
}

/// One game between two players.
pub struct Battle {
    players: PlayerMap<Player>,
    current: PlayerId,
    turn: u32,
    first_turn: bool,
    /// True until both players have a Pokémon in play or the first turn ends.
    opening: bool,
    /// The last verdict written to the log.
    declared: Option<Victory>,
    config: BattleConfig,
    rng: GameRng,
    log: BattleLog,
    trainers: TrainerRegistry,
    observers: Vec<Box<dyn TurnObserver>>,
    budget: TurnBudget,
    history: Vector<ActionRecord>,
    sequence: u32,
}

impl Battle {
    /// Create a battle from two deck lists, seeding the RNG with `seed`.
    pub fn new(deck1: Deck, deck2: Deck, config: BattleConfig, seed: u64) -> Result<Self> {
        Self::with_rng(deck1, deck2, config, GameRng::new(seed))
    }

    /// Create a battle with an injected RNG.
    ///
    /// Fails if the config is invalid or either deck has the wrong size.
    pub fn with_rng(deck1: Deck, deck2: Deck, config: BattleConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;

        let mut allocator = EntityAllocator::new();
        let mut instantiate = |deck: Deck| -> Vec<CardInstance> {
            deck.into_cards()
                .into_iter()
                .map(|definition| CardInstance::new(allocator.next_id(), definition))
                .collect()
        };
        let cards1 = instantiate(deck1);
        let cards2 = instantiate(deck2);

        let player1 = Player::new(PlayerId::ONE, PlayerId::ONE.to_string(), cards1, &config)?;
        let player2 = Player::new(PlayerId::TWO, PlayerId::TWO.to_string(), cards2, &config)?;

        info!("battle created (seed {})", rng.seed());

        Ok(Self {
            players: PlayerMap::from_pair(player1, player2),
            current: PlayerId::ONE,
            turn: 0,
            first_turn: true,
            opening: true,
            declared: None,
            config,
            rng,
            log: BattleLog::new(),
            trainers: TrainerRegistry::standard(),
            observers: Vec::new(),
            budget: TurnBudget::default(),
            history: Vector::new(),
            sequence: 0,
        })
    }

    /// Replace the trainer handlers.
    #[must_use]
    pub fn with_trainers(mut self, trainers: TrainerRegistry) -> Self {
        self.trainers = trainers;
        self
    }

    /// Register an observer that receives a snapshot after every turn.
    pub fn subscribe(&mut self, observer: impl TurnObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Accessors ===

    /// Read-only view of a player's zones. A battle only changes through
    /// its action methods:
    ///
    /// ```compile_fail
    /// use std::sync::Arc;
    /// use pocket_tcg::battle::Battle;
    /// use pocket_tcg::cards::{CardDefinition, Deck, EnergyType};
    /// use pocket_tcg::core::{BattleConfig, PlayerId};
    ///
    /// let card = Arc::new(CardDefinition::pokemon("Eevee", EnergyType::Colorless, 60));
    /// let deck = || Deck::new(vec![Arc::clone(&card); 20]);
    /// let mut battle = Battle::new(deck(), deck(), BattleConfig::default(), 1).unwrap();
    /// battle.setup();
    /// battle.player_mut(PlayerId::ONE).take_prizes(3);
    /// ```
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Direct access to a player's zones, bypassing the rules.
    #[cfg(test)]
    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.current.opponent()
    }

    /// Completed turns so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// True until the first `end_turn`.
    #[must_use]
    pub fn is_first_turn(&self) -> bool {
        self.first_turn
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Every action applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Internal helpers ===

    fn record(&mut self, action: Action) {
        self.history
            .push_back(ActionRecord::new(self.current, action, self.turn, self.sequence));
        self.sequence += 1;
    }

    fn note(&mut self, message: impl Into<String>) {
        self.log.push(self.turn, message);
    }

    fn update_opening(&mut self) {
        if self.opening && self.players.iter().all(|(_, p)| p.has_pokemon_in_play()) {
            self.opening = false;
        }
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("current", &self.current)
            .field("turn", &self.turn)
            .field("first_turn", &self.first_turn)
            .field("players", &self.players)
            .field("log_entries", &self.log.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
