//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical card in a battle. It shares its
//! `CardDefinition` and tracks what changes during play: damage, the
//! current special condition, and attached energy.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Attack, CardDefinition, EnergyCost, EnergyType};
use crate::core::EntityId;

/// Special conditions. A Pokémon has at most one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Asleep,
    Paralyzed,
    Poisoned,
}

impl std::fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StatusCondition::Asleep => "Asleep",
            StatusCondition::Paralyzed => "Paralyzed",
            StatusCondition::Poisoned => "Poisoned",
        };
        f.write_str(text)
    }
}

/// A card in a battle.
///
/// ## Energy order
///
/// `energy` keeps attachment order. Paying a retreat cost removes the most
/// recently attached units first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    definition: Arc<CardDefinition>,

    /// Damage taken. Only grows while the card stays in play.
    damage: u32,

    status: Option<StatusCondition>,

    energy: SmallVec<[EnergyType; 4]>,
}

impl CardInstance {
    #[must_use]
    pub fn new(entity_id: EntityId, definition: Arc<CardDefinition>) -> Self {
        Self {
            entity_id,
            definition,
            damage: 0,
            status: None,
            energy: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn hp(&self) -> u32 {
        self.definition.hp
    }

    #[must_use]
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// HP left before a knockout. Zero once knocked out.
    #[must_use]
    pub fn remaining_hp(&self) -> u32 {
        self.hp().saturating_sub(self.damage)
    }

    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.damage >= self.hp()
    }

    /// Put damage on this card.
    pub fn add_damage(&mut self, amount: u32) {
        self.damage = self.damage.saturating_add(amount);
    }

    /// Remove up to `amount` damage. Returns how much was healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.damage);
        self.damage -= healed;
        healed
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCondition> {
        self.status
    }

    #[must_use]
    pub fn has_status(&self, status: StatusCondition) -> bool {
        self.status == Some(status)
    }

    /// Set a special condition, replacing any previous one.
    pub fn set_status(&mut self, status: StatusCondition) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Attached energy in attachment order.
    #[must_use]
    pub fn energy(&self) -> &[EnergyType] {
        &self.energy
    }

    pub fn attach_energy(&mut self, energy: EnergyType) {
        self.energy.push(energy);
    }

    /// Attached units per energy type.
    #[must_use]
    pub fn energy_counts(&self) -> FxHashMap<EnergyType, u32> {
        let mut counts = FxHashMap::default();
        for &energy in &self.energy {
            *counts.entry(energy).or_insert(0) += 1;
        }
        counts
    }

    /// Whether attached energy covers `cost`, type for type.
    #[must_use]
    pub fn can_pay(&self, cost: &EnergyCost) -> bool {
        let counts = self.energy_counts();
        cost.iter()
            .all(|(energy, needed)| counts.get(&energy).copied().unwrap_or(0) >= needed)
    }

    #[must_use]
    pub fn attack(&self, index: usize) -> Option<&Attack> {
        self.definition.attacks.get(index)
    }

    /// Whether this card can use the attack at `index` right now.
    ///
    /// Paralysis blocks attacking. Sleep does not.
    #[must_use]
    pub fn can_use_attack(&self, index: usize) -> bool {
        if self.has_status(StatusCondition::Paralyzed) {
            return false;
        }
        self.attack(index).is_some_and(|attack| self.can_pay(&attack.cost))
    }

    /// Remove `count` energy, most recently attached first.
    pub fn discard_energy(&mut self, count: usize) -> SmallVec<[EnergyType; 4]> {
        let keep = self.energy.len().saturating_sub(count);
        let mut removed: SmallVec<[EnergyType; 4]> = self.energy.drain(keep..).collect();
        removed.reverse();
        removed
    }

    /// Reset damage, status, and energy when the card leaves play.
    pub fn clear_in_play_state(&mut self) {
        self.damage = 0;
        self.status = None;
        self.energy.clear();
    }
}
