//! Core engine types: entities, players, RNG, configuration, actions, errors.
//!
//! These are the building blocks shared by the card, zone, and battle layers.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::BattleConfig;
pub use action::{Action, ActionRecord};
pub use error::{BattleError, Result};
