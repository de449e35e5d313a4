//! Error types for the battle engine.

use thiserror::Error;

use super::entity::EntityId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Deck must contain exactly {expected} cards, found {actual}")]
    InvalidDeckSize { expected: usize, actual: usize },

    #[error("Deck has {count} copies of {name}, limit is {limit}")]
    TooManyCopies { name: String, count: usize, limit: usize },

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Invalid card data for {name}: {reason}")]
    InvalidCardData { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid retreat: {0}")]
    InvalidRetreat(String),

    #[error("Deck is empty")]
    DeckEmpty,

    #[error("Bench is full ({capacity} Pokémon)")]
    BenchFull { capacity: usize },

    #[error("Card {0} is not in hand")]
    CardNotInHand(EntityId),

    #[error("Card {0} is not in play")]
    CardNotInPlay(EntityId),

    #[error("No active Pokémon")]
    NoActivePokemon,

    #[error("Invalid attack: {0}")]
    InvalidAttack(String),

    #[error("Turn limit reached: {0}")]
    TurnLimit(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, BattleError>;
