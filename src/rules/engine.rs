//! Rules engine trait.
//!
//! A rules engine answers three questions about a game in progress:
//! - What actions are legal right now
//! - What applying one of them does
//! - Whether the game is over, and who won

use serde::{Deserialize, Serialize};

use crate::core::{Action, PlayerId, Result};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// The winner's prize pile is empty.
    AllPrizesTaken,
    /// The loser had no cards left to draw.
    DeckOut,
    /// The loser had no Pokémon in play.
    NoPokemonInPlay,
}

impl std::fmt::Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinReason::AllPrizesTaken => write!(f, "prize pile is empty"),
            WinReason::DeckOut => write!(f, "opponent decked out"),
            WinReason::NoPokemonInPlay => write!(f, "opponent has no Pokémon in play"),
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victory {
    pub winner: PlayerId,
    pub reason: WinReason,
}

impl Victory {
    #[must_use]
    pub fn new(winner: PlayerId, reason: WinReason) -> Self {
        Self { winner, reason }
    }

    #[must_use]
    pub fn loser(&self) -> PlayerId {
        self.winner.opponent()
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Empty once the game is over
/// - `apply`: Rejected actions leave the game untouched and return `Err`
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// The player whose turn it is.
    fn current_player(&self) -> PlayerId;

    /// Every action the driver may apply right now.
    fn legal_actions(&self) -> Vec<Action>;

    /// Apply one action.
    fn apply(&mut self, action: &Action) -> Result<()>;

    /// Check if the game is over.
    fn is_terminal(&self) -> Option<Victory>;

    // === Convenience Methods ===

    /// Whether `action` is among the legal actions.
    fn is_legal(&self, action: &Action) -> bool {
        self.legal_actions().contains(action)
    }

    /// Drive the game with `choose` picking from the legal actions until
    /// someone wins or `max_actions` have been applied.
    ///
    /// `choose` receives a non-empty slice and returns an index into it.
    fn play_out<F>(&mut self, mut choose: F, max_actions: usize) -> Result<Option<Victory>>
    where
        F: FnMut(&[Action]) -> usize,
    {
        for _ in 0..max_actions {
            if let Some(victory) = self.is_terminal() {
                return Ok(Some(victory));
            }
            let actions = self.legal_actions();
            if actions.is_empty() {
                break;
            }
            let index = choose(&actions).min(actions.len() - 1);
            self.apply(&actions[index])?;
        }
        Ok(self.is_terminal())
    }
}
