//! End-of-turn special conditions.
//!
//! Runs once per `end_turn`, on the active Pokémon of the player whose turn
//! is ending:
//!
//! - Asleep: wakes up with probability `sleep_wake_chance`
//! - Paralyzed: always wears off
//! - Poisoned: takes `poison_damage`, which can knock it out

use log::trace;
use serde::{Deserialize, Serialize};

use super::{Battle, KnockOut};
use crate::cards::StatusCondition;

/// What end-of-turn status resolution did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusOutcome {
    WokeUp,
    StillAsleep,
    ParalysisEnded,
    PoisonDamage {
        damage: u32,
        knocked_out: Option<KnockOut>,
    },
}

impl Battle {
    pub(super) fn resolve_status(&mut self) -> Option<StatusOutcome> {
        let owner = self.current;
        let wake_chance = self.config.sleep_wake_chance;
        let poison_damage = self.config.poison_damage;

        let active = self.players[owner].active_mut()?;
        let name = active.name().to_string();

        match active.status()? {
            StatusCondition::Asleep => {
                let woke = self.rng.gen_bool(wake_chance);
                trace!("{name} sleep check: woke = {woke}");
                if woke {
                    active.clear_status();
                    self.note(format!("{name} woke up!"));
                    Some(StatusOutcome::WokeUp)
                } else {
                    self.note(format!("{name} is still asleep."));
                    Some(StatusOutcome::StillAsleep)
                }
            }
            StatusCondition::Paralyzed => {
                active.clear_status();
                self.note(format!("{name} is no longer paralyzed!"));
                Some(StatusOutcome::ParalysisEnded)
            }
            StatusCondition::Poisoned => {
                active.add_damage(poison_damage);
                let knocked_out = active.is_knocked_out();
                self.note(format!("{name} took {poison_damage} damage from poison!"));
                let knocked_out = if knocked_out { self.knock_out(owner) } else { None };
                Some(StatusOutcome::PoisonDamage {
                    damage: poison_damage,
                    knocked_out,
                })
            }
        }
    }
}
