//! Attack resolution and knockouts.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::Battle;
use crate::cards::StatusCondition;
use crate::core::{Action, BattleError, PlayerId, Result};
use crate::effects::{calculate_damage, DamageBreakdown};

/// A Pokémon leaving play after taking lethal damage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockOut {
    /// Owner of the knocked-out Pokémon.
    pub player: PlayerId,
    pub card: String,
    /// Prize cards the opponent took for it.
    pub prizes_taken: usize,
}

/// What an attack did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: String,
    pub attack: String,
    pub damage: DamageBreakdown,
    pub knocked_out: Option<KnockOut>,
    /// Status put on the defender. Never set if the defender was knocked out.
    pub status_inflicted: Option<StatusCondition>,
}

impl Battle {
    /// Use the current player's active Pokémon's attack at `attack_index`
    /// against the opponent's active Pokémon.
    ///
    /// Fails without changing anything if either side has no active
    /// Pokémon, the attacker is paralyzed, or the attached energy does not
    /// cover the cost.
    pub fn perform_attack(&mut self, attack_index: usize) -> Result<AttackOutcome> {
        let attacking = self.current;
        let defending = attacking.opponent();

        if self.config.strict_turn_structure && self.budget.attacked {
            return Err(self.reject(BattleError::TurnLimit("already attacked this turn".into())));
        }

        let (attack, attacker_name, breakdown) = {
            let me = &self.players[attacking];
            let them = &self.players[defending];
            let attacker = me.active().ok_or(BattleError::NoActivePokemon)?;
            let defender = them.active().ok_or(BattleError::NoActivePokemon)?;

            let attack = attacker.attack(attack_index).ok_or_else(|| {
                BattleError::InvalidAttack(format!(
                    "{} has no attack at index {attack_index}",
                    attacker.name()
                ))
            })?;
            if attacker.has_status(StatusCondition::Paralyzed) {
                return Err(self.reject(BattleError::InvalidAttack(format!(
                    "{} is paralyzed",
                    attacker.name()
                ))));
            }
            if !attacker.can_pay(&attack.cost) {
                return Err(self.reject(BattleError::InvalidAttack(format!(
                    "{} needs {} for {}",
                    attacker.name(),
                    attack.cost,
                    attack.name
                ))));
            }

            let breakdown = calculate_damage(attack, attacker, defender, me.bench().len(), &self.config);
            (attack.clone(), attacker.name().to_string(), breakdown)
        };

        let defender = self.players[defending]
            .active_mut()
            .ok_or(BattleError::NoActivePokemon)?;
        defender.add_damage(breakdown.total);
        let defender_name = defender.name().to_string();
        let knocked_out = defender.is_knocked_out();

        debug!(
            "{attacker_name} used {} on {defender_name}: {} base, {} total",
            attack.name, breakdown.base, breakdown.total
        );
        self.note(format!(
            "{attacker_name} used {} for {} damage!",
            attack.name, breakdown.total
        ));

        let mut outcome = AttackOutcome {
            attacker: attacker_name,
            attack: attack.name.clone(),
            damage: breakdown,
            knocked_out: None,
            status_inflicted: None,
        };

        if knocked_out {
            outcome.knocked_out = self.knock_out(defending);
        } else if let Some(status) = attack.status_inflicted() {
            if let Some(defender) = self.players[defending].active_mut() {
                defender.set_status(status);
            }
            self.note(format!("{defender_name} is now {status}!"));
            outcome.status_inflicted = Some(status);
        }

        self.budget.attacked = true;
        self.record(Action::Attack {
            index: attack_index,
        });
        Ok(outcome)
    }

    /// Discard `victim`'s active Pokémon and move prize cards from the
    /// victim's prize pile into the opponent's hand.
    ///
    /// An ex Pokémon is worth two prizes; the payout never exceeds what is
    /// left in the pile.
    pub(super) fn knock_out(&mut self, victim: PlayerId) -> Option<KnockOut> {
        let card = self.players[victim].active()?.name().to_string();
        let prize_value = self.players[victim].discard_active()?;

        let claimant = victim.opponent();
        let prizes = self.players[victim].take_prizes(prize_value);
        let prizes_taken = prizes.len();
        self.players[claimant].add_to_hand(prizes);

        info!("{card} ({victim}) knocked out, {claimant} takes {prizes_taken} prize(s)");
        self.note(format!("{card} was knocked out!"));
        if prizes_taken > 0 {
            let message = format!(
                "{} took {prizes_taken} prize card{}",
                self.players[claimant].name(),
                if prizes_taken == 1 { "" } else { "s" }
            );
            self.note(message);
        }

        Some(KnockOut {
            player: victim,
            card,
            prizes_taken,
        })
    }

    pub(super) fn reject(&self, error: BattleError) -> BattleError {
        warn!("{} move rejected: {error}", self.current);
        error
    }
}
