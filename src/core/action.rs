//! Battle actions.
//!
//! Every mutation a driver can make during a game is one `Action`. Actions
//! name cards by `EntityId` and bench slots by index, so they stay valid
//! across clones of a battle and can be recorded, replayed, or sent over a
//! channel.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::EnergyType;

/// One driver move.
///
/// ## Example
///
/// ```
/// use pocket_tcg::core::{Action, EntityId, PlayerId};
/// use pocket_tcg::cards::EnergyType;
///
/// let attach = Action::AttachEnergy {
///     player: PlayerId::ONE,
///     energy: EnergyType::Lightning,
///     target: EntityId(4),
/// };
/// assert!(!attach.ends_turn());
/// assert!(Action::EndTurn.ends_turn());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from `player`'s hand.
    PlayCard { player: PlayerId, card: EntityId },
    /// Attach one energy to one of `player`'s Pokémon in play.
    AttachEnergy {
        player: PlayerId,
        energy: EnergyType,
        target: EntityId,
    },
    /// Use the current player's active Pokémon's attack at `index`.
    Attack { index: usize },
    /// Swap the current player's active Pokémon with a benched one, paying
    /// the retreat cost.
    Retreat { bench_index: usize },
    /// Fill `player`'s empty active slot from the bench.
    Promote { player: PlayerId, bench_index: usize },
    EndTurn,
}

impl Action {
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(self, Action::EndTurn)
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "play card",
            Action::AttachEnergy { .. } => "attach energy",
            Action::Attack { .. } => "attack",
            Action::Retreat { .. } => "retreat",
            Action::Promote { .. } => "promote",
            Action::EndTurn => "end turn",
        }
    }
}

/// An applied action with the context it was applied in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player whose turn it was.
    pub player: PlayerId,

    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Position within the turn, starting at 0.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
