//! Attack damage calculation.
//!
//! Damage is computed in a fixed order:
//!
//! 1. Base damage from the attack.
//! 2. The attack's effect (bench multiplier or status bonus).
//! 3. Weakness, applied last to the post-effect total.

use serde::{Deserialize, Serialize};

use crate::cards::{Attack, AttackEffect, CardInstance, StatusCondition};
use crate::core::BattleConfig;

/// How a damage figure was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub base: u32,
    /// Damage after the attack effect, before weakness.
    pub after_effect: u32,
    pub weakness_applied: bool,
    pub total: u32,
}

/// Work out the damage `attack` does from `attacker` to `defender`.
///
/// `attacker_bench` is the attacking player's bench size.
#[must_use]
pub fn calculate_damage(
    attack: &Attack,
    attacker: &CardInstance,
    defender: &CardInstance,
    attacker_bench: usize,
    config: &BattleConfig,
) -> DamageBreakdown {
    let base = attack.damage;

    let after_effect = match &attack.effect {
        AttackEffect::None | AttackEffect::Unknown(_) => base,
        AttackEffect::MultiplyByBench => base.saturating_mul(attacker_bench as u32),
        AttackEffect::BonusIfDefenderPoisoned => {
            if defender.has_status(StatusCondition::Poisoned) {
                base.saturating_add(config.status_bonus_damage)
            } else {
                base
            }
        }
    };

    let weakness_applied = defender.definition().weakness == Some(attacker.definition().element);
    let total = if weakness_applied {
        after_effect.saturating_mul(config.weakness_multiplier)
    } else {
        after_effect
    };

    DamageBreakdown {
        base,
        after_effect,
        weakness_applied,
        total,
    }
}
