//! Zones: where a player's cards live.
//!
//! Each player owns a fixed set of zones. Only the deck and prize pile are
//! ordered in a way the rules care about; the hand is set-like and the
//! discard pile is append-only.

pub mod player;

pub use player::Player;

use serde::{Deserialize, Serialize};

/// The zones a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Active,
    Bench,
    Discard,
    Prizes,
}

impl Zone {
    /// Active and bench.
    #[must_use]
    pub fn is_in_play(self) -> bool {
        matches!(self, Zone::Active | Zone::Bench)
    }
}
