//! Read-only battle snapshots and turn observers.
//!
//! A `BattleSnapshot` is the public projection of a battle: what each
//! player has in play and how many cards sit in their other zones. Hands
//! and decks are reduced to counts.
//!
//! Snapshots are the only thing the battle exports. Observers registered
//! with `Battle::subscribe` receive one after every completed turn; they
//! never get a handle back into the battle.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pocket_tcg::battle::{Battle, SnapshotRecorder};
//! use pocket_tcg::cards::{CardDefinition, Deck, EnergyType};
//! use pocket_tcg::core::BattleConfig;
//!
//! let card = Arc::new(CardDefinition::pokemon("Eevee", EnergyType::Colorless, 60));
//! let deck = || Deck::new(vec![Arc::clone(&card); 20]);
//! let mut battle = Battle::new(deck(), deck(), BattleConfig::default(), 1).unwrap();
//!
//! let recorder = SnapshotRecorder::new();
//! battle.subscribe(recorder.clone());
//! battle.setup();
//! battle.end_turn();
//!
//! assert_eq!(recorder.len(), 1);
//! assert_eq!(recorder.snapshots()[0].turn, 1);
//! ```

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::{Battle, BattleLog};
use crate::cards::{AttackEffect, CardInstance, Category, EnergyCost, EnergyType, StatusCondition};
use crate::core::{BattleError, PlayerId, Result};
use crate::zones::Player;

/// One attack as shown in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSnapshot {
    pub name: String,
    pub cost: EnergyCost,
    pub damage: u32,
    pub effect: AttackEffect,
}

/// A Pokémon in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub name: String,
    pub element: EnergyType,
    pub hp: u32,
    pub damage: u32,
    pub category: Category,
    pub ex: bool,
    pub status: Option<StatusCondition>,
    pub energy: Vec<EnergyType>,
    pub attacks: Vec<AttackSnapshot>,
}

impl From<&CardInstance> for CardSnapshot {
    fn from(card: &CardInstance) -> Self {
        let def = card.definition();
        Self {
            name: def.name.clone(),
            element: def.element,
            hp: def.hp,
            damage: card.damage(),
            category: def.category,
            ex: def.ex,
            status: card.status(),
            energy: card.energy().to_vec(),
            attacks: def
                .attacks
                .iter()
                .map(|a| AttackSnapshot {
                    name: a.name.clone(),
                    cost: a.cost.clone(),
                    damage: a.damage,
                    effect: a.effect.clone(),
                })
                .collect(),
        }
    }
}

/// One player's public state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub active: Option<CardSnapshot>,
    pub bench: Vec<CardSnapshot>,
    pub deck_size: usize,
    pub hand_size: usize,
    pub prize_count: usize,
    pub discard_count: usize,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            active: player.active().map(CardSnapshot::from),
            bench: player.bench().iter().map(CardSnapshot::from).collect(),
            deck_size: player.deck_size(),
            hand_size: player.hand().len(),
            prize_count: player.prize_count(),
            discard_count: player.discard_pile().len(),
        }
    }
}

/// The whole battle at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub turn: u32,
    pub first_turn: bool,
    pub current: PlayerId,
    /// Indexed by `PlayerId::index()`.
    pub players: [PlayerSnapshot; 2],
    pub log: BattleLog,
}

impl BattleSnapshot {
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerSnapshot {
        &self.players[id.index()]
    }

    /// Compact binary form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| BattleError::Encoding(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| BattleError::Encoding(e.to_string()))
    }
}

impl Battle {
    /// Export the current public state.
    #[must_use]
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            turn: self.turn,
            first_turn: self.first_turn,
            current: self.current,
            players: [
                PlayerSnapshot::from(&self.players[PlayerId::ONE]),
                PlayerSnapshot::from(&self.players[PlayerId::TWO]),
            ],
            log: self.log.clone(),
        }
    }

    pub(super) fn notify_observers(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_turn_end(&snapshot);
        }
    }
}

/// Receives a snapshot after every completed turn.
pub trait TurnObserver: Send {
    fn on_turn_end(&mut self, snapshot: &BattleSnapshot);
}

impl<F> TurnObserver for F
where
    F: FnMut(&BattleSnapshot) + Send,
{
    fn on_turn_end(&mut self, snapshot: &BattleSnapshot) {
        self(snapshot);
    }
}

/// Forwards snapshots over a channel. A dropped receiver is ignored.
impl TurnObserver for Sender<BattleSnapshot> {
    fn on_turn_end(&mut self, snapshot: &BattleSnapshot) {
        let _ = self.send(snapshot.clone());
    }
}

/// Collects every snapshot it is sent.
///
/// Clones share the same storage, so keep one clone and subscribe another.
#[derive(Clone, Debug, Default)]
pub struct SnapshotRecorder {
    snapshots: Arc<Mutex<Vec<BattleSnapshot>>>,
}

impl SnapshotRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn snapshots(&self) -> Vec<BattleSnapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TurnObserver for SnapshotRecorder {
    fn on_turn_end(&mut self, snapshot: &BattleSnapshot) {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot.clone());
    }
}
