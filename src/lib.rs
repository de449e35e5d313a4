//! # pocket-tcg
//!
//! A rules engine for two-player Pokémon TCG Pocket style battles.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: A `Battle` is a plain value owned by its
//!    driver. There is no global game state.
//!
//! 2. **Rejected moves are values**: Illegal actions come back as `Err`
//!    and leave the battle untouched, so drivers can test legality freely.
//!
//! 3. **Deterministic**: All randomness flows through one seeded `GameRng`.
//!    The same decks, seed, and actions replay the same game.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, RNG, configuration, actions, errors
//! - `cards`: Card definitions, instances, registry, deck lists
//! - `zones`: A player's deck, hand, active slot, bench, discard, prizes
//! - `effects`: Attack damage and trainer effects
//! - `rules`: `RulesEngine` trait and victory types
//! - `battle`: Setup, turn actions, combat, status, win checks, snapshots

pub mod core;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod rules;
pub mod battle;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, BattleConfig, BattleError, EntityId, GameRng, PlayerId, PlayerMap,
    Result,
};

pub use crate::cards::{
    Attack, AttackEffect, CardDefinition, CardInstance, CardRegistry, Deck, DeckBuilder,
    EnergyCost, EnergyType, StatusCondition,
};

pub use crate::zones::{Player, Zone};

pub use crate::effects::{TrainerEffect, TrainerRegistry};

pub use crate::rules::{RulesEngine, Victory, WinReason};

pub use crate::battle::{
    AttackOutcome, Battle, BattleLog, BattleSnapshot, KnockOut, SetupResult, SnapshotRecorder,
    StatusOutcome, TurnObserver,
};
