//! Turn actions: playing cards, attaching energy, retreating, ending the
//! turn, plus action enumeration for generic drivers.

use log::{debug, warn};
use smallvec::SmallVec;

use super::{Battle, StatusOutcome, TurnBudget};
use crate::cards::EnergyType;
use crate::core::{Action, BattleError, EntityId, PlayerId, Result};
use crate::effects::TrainerContext;
use crate::rules::{RulesEngine, Victory};
use crate::zones::Zone;

impl Battle {
    /// Play a card from `player`'s hand.
    ///
    /// A Pokémon goes to the active slot if it is empty, else to the bench;
    /// a full bench leaves the card in hand and returns `BenchFull`. A
    /// trainer is resolved through the trainer registry and discarded.
    ///
    /// Returns the zone the card ended up in.
    pub fn play_card(&mut self, player: PlayerId, card: EntityId) -> Result<Zone> {
        let instance = self.players[player]
            .take_from_hand(card)
            .map_err(|e| self.reject(e))?;
        let name = instance.name().to_string();

        let zone = if instance.definition().is_trainer() {
            let (me, them) = self.players.pair_mut(player);
            let mut ctx = TrainerContext {
                player: me,
                opponent: them,
                rng: &mut self.rng,
            };
            let effect = self.trainers.resolve(&name, &mut ctx);
            self.players[player].discard(instance);

            let who = self.players[player].name().to_string();
            self.note(format!("{who} played {name}."));
            match effect {
                Some(line) => self.note(line),
                None => debug!("{name} has no effect handler"),
            }
            Zone::Discard
        } else {
            match self.players[player].place_in_play(instance) {
                Ok(zone) => zone,
                Err((instance, err)) => {
                    self.players[player].add_to_hand([instance]);
                    return Err(self.reject(err));
                }
            }
        };

        debug!("{player} played {name} to {zone:?}");
        self.update_opening();
        self.record(Action::PlayCard { player, card });
        Ok(zone)
    }

    /// Attach one energy to one of `player`'s Pokémon in play.
    ///
    /// Unlimited unless `strict_turn_structure` is on, in which case only
    /// the current player may attach, once per turn, and not at all on the
    /// first turn of the game.
    pub fn attach_energy(&mut self, player: PlayerId, energy: EnergyType, target: EntityId) -> Result<()> {
        if self.config.strict_turn_structure {
            let limit = if player != self.current {
                Some("energy can only be attached on your own turn")
            } else if self.first_turn {
                Some("no energy attachment on the first turn")
            } else if self.budget.energy_attached {
                Some("energy already attached this turn")
            } else {
                None
            };
            if let Some(reason) = limit {
                return Err(self.reject(BattleError::TurnLimit(reason.to_string())));
            }
        }

        let Some(pokemon) = self.players[player].in_play_mut(target) else {
            return Err(self.reject(BattleError::CardNotInPlay(target)));
        };
        pokemon.attach_energy(energy);
        debug!("{player} attached {energy} to {}", pokemon.name());

        if player == self.current {
            self.budget.energy_attached = true;
        }
        self.record(Action::AttachEnergy {
            player,
            energy,
            target,
        });
        Ok(())
    }

    /// Retreat the current player's active Pokémon to the bench, promoting
    /// the Pokémon at `bench_index`.
    pub fn retreat(&mut self, bench_index: usize) -> Result<()> {
        let player = self.current;
        let old = self.players[player].active().map(|c| c.name().to_string());

        self.players[player]
            .retreat(bench_index)
            .map_err(|e| self.reject(e))?;

        let new = self.players[player].active().map(|c| c.name().to_string());
        if let (Some(old), Some(new)) = (old, new) {
            self.note(format!("{old} retreated. {new} is now active."));
        }
        self.record(Action::Retreat { bench_index });
        Ok(())
    }

    /// Fill `player`'s empty active slot with the benched Pokémon at
    /// `bench_index`. Used after a knockout.
    pub fn promote(&mut self, player: PlayerId, bench_index: usize) -> Result<()> {
        self.players[player]
            .promote(bench_index)
            .map_err(|e| self.reject(e))?;

        if let Some(active) = self.players[player].active() {
            let message = format!("{} is now active.", active.name());
            self.note(message);
        }
        self.record(Action::Promote { player, bench_index });
        Ok(())
    }

    /// Finish the current turn.
    ///
    /// Resolves the ending player's special condition, advances the turn
    /// counter, hands the turn over, and draws for the incoming player. An
    /// empty deck is logged, not raised; `check_win_condition` reports the
    /// loss. Observers receive a snapshot of the new turn's starting state.
    pub fn end_turn(&mut self) -> Option<StatusOutcome> {
        let ending = self.current;
        let status = self.resolve_status();
        self.record(Action::EndTurn);

        self.first_turn = false;
        self.opening = false;
        self.turn += 1;
        self.current = ending.opponent();
        self.budget = TurnBudget::default();
        self.sequence = 0;
        debug!("{ending} ended turn {}", self.turn);

        let next = self.current;
        if self.players[next].draw_card().is_err() {
            warn!("{next} cannot draw: deck is empty");
            let message = format!("{} has no cards left to draw!", self.players[next].name());
            self.note(message);
        }

        self.notify_observers();
        status
    }

    /// Every action the driver may take right now.
    ///
    /// Empty once the game is decided. If a player has no active Pokémon,
    /// only moves that fill the slot are offered until it is filled.
    ///
    /// During the opening placement an empty board does not end the game
    /// here, even though `check_win_condition` already reports it.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.driver_verdict().is_some() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for (id, player) in self.players.iter() {
            if player.active().is_some() {
                continue;
            }
            if player.bench().is_empty() {
                actions.extend(
                    player
                        .hand()
                        .iter()
                        .filter(|c| c.definition().is_basic_pokemon())
                        .map(|c| Action::PlayCard {
                            player: id,
                            card: c.entity_id,
                        }),
                );
            } else {
                actions.extend((0..player.bench().len()).map(|bench_index| Action::Promote {
                    player: id,
                    bench_index,
                }));
            }
        }
        if !actions.is_empty() {
            return actions;
        }

        let id = self.current;
        let me = &self.players[id];
        let strict = self.config.strict_turn_structure;
        let bench_open = me.bench().len() < me.bench_capacity();

        for card in me.hand() {
            let def = card.definition();
            if def.is_trainer() || (def.is_basic_pokemon() && bench_open) {
                actions.push(Action::PlayCard {
                    player: id,
                    card: card.entity_id,
                });
            }
        }

        if !(strict && (self.first_turn || self.budget.energy_attached)) {
            for pokemon in me.active().into_iter().chain(me.bench()) {
                let def = pokemon.definition();
                let mut wanted: SmallVec<[EnergyType; 4]> = def
                    .attacks
                    .iter()
                    .flat_map(|a| a.cost.iter().map(|(energy, _)| energy))
                    .collect();
                if wanted.is_empty() {
                    wanted.push(def.element);
                }
                wanted.sort_unstable();
                wanted.dedup();
                actions.extend(wanted.into_iter().map(|energy| Action::AttachEnergy {
                    player: id,
                    energy,
                    target: pokemon.entity_id,
                }));
            }
        }

        let can_attack = self.players[id.opponent()].active().is_some()
            && !(strict && self.budget.attacked);
        if let (Some(active), true) = (me.active(), can_attack) {
            for index in 0..active.definition().attacks.len() {
                if active.can_use_attack(index) {
                    actions.push(Action::Attack { index });
                }
            }
        }

        if me.can_retreat() {
            actions.extend((0..me.bench().len()).map(|bench_index| Action::Retreat { bench_index }));
        }

        actions.push(Action::EndTurn);
        actions
    }

    /// Apply one action through the matching action method.
    pub fn apply(&mut self, action: &Action) -> Result<()> {
        match *action {
            Action::PlayCard { player, card } => self.play_card(player, card).map(|_| ()),
            Action::AttachEnergy {
                player,
                energy,
                target,
            } => self.attach_energy(player, energy, target),
            Action::Attack { index } => self.perform_attack(index).map(|_| ()),
            Action::Retreat { bench_index } => self.retreat(bench_index),
            Action::Promote {
                player,
                bench_index,
            } => self.promote(player, bench_index),
            Action::EndTurn => {
                self.end_turn();
                Ok(())
            }
        }
    }
}

impl RulesEngine for Battle {
    fn current_player(&self) -> PlayerId {
        self.current
    }

    fn legal_actions(&self) -> Vec<Action> {
        Battle::legal_actions(self)
    }

    fn apply(&mut self, action: &Action) -> Result<()> {
        Battle::apply(self, action)
    }

    fn is_terminal(&self) -> Option<Victory> {
        self.driver_verdict()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{Attack, CardDefinition, Deck, EnergyCost, StatusCondition};
    use crate::core::BattleConfig;

    fn pokemon() -> CardDefinition {
        CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60)
            .with_attack(Attack::new("Gnaw", EnergyCost::parse("L"), 20))
            .with_retreat_cost(1)
    }

    fn mixed_deck() -> Deck {
        let mut cards = vec![Arc::new(pokemon()); 15];
        cards.extend(vec![Arc::new(CardDefinition::trainer("Potion")); 5]);
        Deck::new(cards)
    }

    fn battle(config: BattleConfig) -> Battle {
        let mut battle = Battle::new(
            Deck::new(vec![Arc::new(pokemon()); 20]),
            Deck::new(vec![Arc::new(pokemon()); 20]),
            config,
            11,
        )
        .unwrap();
        battle.setup();
        battle
    }

    fn hand_card(battle: &Battle, id: PlayerId) -> EntityId {
        battle.player(id).hand()[0].entity_id
    }

    fn place_actives(battle: &mut Battle) {
        for id in PlayerId::both() {
            let card = hand_card(battle, id);
            battle.play_card(id, card).unwrap();
        }
    }

    #[test]
    fn test_play_card_fills_active_then_bench() {
        let mut battle = battle(BattleConfig::default());
        let first = hand_card(&battle, PlayerId::ONE);
        assert_eq!(battle.play_card(PlayerId::ONE, first).unwrap(), Zone::Active);
        let second = hand_card(&battle, PlayerId::ONE);
        assert_eq!(battle.play_card(PlayerId::ONE, second).unwrap(), Zone::Bench);
    }

    #[test]
    fn test_full_bench_keeps_card_in_hand() {
        let mut battle = battle(BattleConfig::default());
        for _ in 0..4 {
            let card = hand_card(&battle, PlayerId::ONE);
            battle.play_card(PlayerId::ONE, card).unwrap();
        }
        let extra = hand_card(&battle, PlayerId::ONE);

        let err = battle.play_card(PlayerId::ONE, extra).unwrap_err();

        assert_eq!(err, BattleError::BenchFull { capacity: 3 });
        assert_eq!(battle.player(PlayerId::ONE).hand().len(), 1);
        assert_eq!(battle.player(PlayerId::ONE).bench().len(), 3);
    }

    #[test]
    fn test_play_unknown_card() {
        let mut battle = battle(BattleConfig::default());
        let err = battle.play_card(PlayerId::ONE, EntityId(9999)).unwrap_err();
        assert_eq!(err, BattleError::CardNotInHand(EntityId(9999)));
    }

    #[test]
    fn test_potion_is_resolved_and_discarded() {
        let mut battle = Battle::new(mixed_deck(), mixed_deck(), BattleConfig::default(), 2).unwrap();
        battle.setup();
        for id in PlayerId::both() {
            let player = battle.player_mut(id);
            while player.draw_card().is_ok() {}
            let basic = player
                .hand()
                .iter()
                .find(|c| c.definition().is_basic_pokemon())
                .map(|c| c.entity_id)
                .unwrap();
            battle.play_card(id, basic).unwrap();
        }
        battle
            .player_mut(PlayerId::ONE)
            .active_mut()
            .unwrap()
            .add_damage(30);
        let potion = battle
            .player(PlayerId::ONE)
            .hand()
            .iter()
            .find(|c| c.name() == "Potion")
            .map(|c| c.entity_id)
            .unwrap();

        let zone = battle.play_card(PlayerId::ONE, potion).unwrap();

        assert_eq!(zone, Zone::Discard);
        assert_eq!(battle.player(PlayerId::ONE).active().unwrap().damage(), 10);
        assert_eq!(battle.player(PlayerId::ONE).locate(potion), Some(Zone::Discard));
        assert!(battle.log().contains("Player 1 played Potion."));
    }

    #[test]
    fn test_attach_energy_requires_card_in_play() {
        let mut battle = battle(BattleConfig::default());
        let in_hand = hand_card(&battle, PlayerId::ONE);
        let err = battle
            .attach_energy(PlayerId::ONE, EnergyType::Lightning, in_hand)
            .unwrap_err();
        assert_eq!(err, BattleError::CardNotInPlay(in_hand));
    }

    #[test]
    fn test_strict_energy_budget() {
        let mut battle = battle(BattleConfig::default().with_strict_turn_structure(true));
        place_actives(&mut battle);
        let p1 = battle.player(PlayerId::ONE).active().unwrap().entity_id;
        let p2 = battle.player(PlayerId::TWO).active().unwrap().entity_id;

        assert!(matches!(
            battle.attach_energy(PlayerId::ONE, EnergyType::Lightning, p1),
            Err(BattleError::TurnLimit(_))
        ));

        battle.end_turn();
        assert!(matches!(
            battle.attach_energy(PlayerId::ONE, EnergyType::Lightning, p1),
            Err(BattleError::TurnLimit(_))
        ));
        battle.attach_energy(PlayerId::TWO, EnergyType::Lightning, p2).unwrap();
        assert!(matches!(
            battle.attach_energy(PlayerId::TWO, EnergyType::Lightning, p2),
            Err(BattleError::TurnLimit(_))
        ));
    }

    #[test]
    fn test_unlimited_energy_by_default() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        let target = battle.player(PlayerId::ONE).active().unwrap().entity_id;
        for _ in 0..3 {
            battle.attach_energy(PlayerId::ONE, EnergyType::Lightning, target).unwrap();
        }
        assert_eq!(battle.player(PlayerId::ONE).active().unwrap().energy().len(), 3);
    }

    #[test]
    fn test_retreat_through_battle() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        let bench = hand_card(&battle, PlayerId::ONE);
        battle.play_card(PlayerId::ONE, bench).unwrap();

        assert!(matches!(battle.retreat(0), Err(BattleError::InvalidRetreat(_))));

        let active = battle.player(PlayerId::ONE).active().unwrap().entity_id;
        battle.attach_energy(PlayerId::ONE, EnergyType::Lightning, active).unwrap();
        battle.retreat(0).unwrap();

        assert_eq!(battle.player(PlayerId::ONE).active().unwrap().entity_id, bench);
        assert!(battle.player(PlayerId::ONE).bench()[0].energy().is_empty());
    }

    #[test]
    fn test_end_turn_draws_for_next_player() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        let hand = battle.player(PlayerId::TWO).hand().len();

        battle.end_turn();

        assert_eq!(battle.turn(), 1);
        assert!(!battle.is_first_turn());
        assert_eq!(battle.current_player(), PlayerId::TWO);
        assert_eq!(battle.player(PlayerId::TWO).hand().len(), hand + 1);
    }

    #[test]
    fn test_paralysis_lasts_until_end_of_turn() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        battle
            .player_mut(PlayerId::ONE)
            .active_mut()
            .unwrap()
            .set_status(StatusCondition::Paralyzed);

        assert_eq!(battle.end_turn(), Some(StatusOutcome::ParalysisEnded));
        assert_eq!(battle.player(PlayerId::ONE).active().unwrap().status(), None);
        assert!(battle.log().contains("is no longer paralyzed!"));
    }

    #[test]
    fn test_sleep_wakes_with_certain_chance() {
        let mut battle = battle(BattleConfig::default().with_sleep_wake_chance(1.0));
        place_actives(&mut battle);
        battle
            .player_mut(PlayerId::ONE)
            .active_mut()
            .unwrap()
            .set_status(StatusCondition::Asleep);

        assert_eq!(battle.end_turn(), Some(StatusOutcome::WokeUp));
        assert!(battle.log().contains("Pikachu woke up!"));
    }

    #[test]
    fn test_sleep_persists_with_zero_chance() {
        let mut battle = battle(BattleConfig::default().with_sleep_wake_chance(0.0));
        place_actives(&mut battle);
        battle
            .player_mut(PlayerId::ONE)
            .active_mut()
            .unwrap()
            .set_status(StatusCondition::Asleep);

        assert_eq!(battle.end_turn(), Some(StatusOutcome::StillAsleep));
        assert_eq!(
            battle.player(PlayerId::ONE).active().unwrap().status(),
            Some(StatusCondition::Asleep)
        );
    }

    #[test]
    fn test_opening_actions_are_placements() {
        let battle = battle(BattleConfig::default());
        let actions = battle.legal_actions();
        assert_eq!(actions.len(), 10);
        assert!(actions.iter().all(|a| matches!(a, Action::PlayCard { .. })));
    }

    #[test]
    fn test_legal_actions_after_placement() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        let actions = battle.legal_actions();

        assert_eq!(actions.last(), Some(&Action::EndTurn));
        assert!(actions.iter().any(|a| matches!(a, Action::AttachEnergy { energy: EnergyType::Lightning, .. })));
        assert!(!actions.iter().any(|a| matches!(a, Action::Attack { .. })));
        assert!(!actions.iter().any(|a| matches!(a, Action::Retreat { .. })));
    }

    #[test]
    fn test_knockout_forces_promotion() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        let bench = hand_card(&battle, PlayerId::TWO);
        battle.play_card(PlayerId::TWO, bench).unwrap();
        battle
            .player_mut(PlayerId::TWO)
            .active_mut()
            .unwrap()
            .add_damage(50);
        let attacker = battle.player(PlayerId::ONE).active().unwrap().entity_id;
        battle.attach_energy(PlayerId::ONE, EnergyType::Lightning, attacker).unwrap();

        battle.perform_attack(0).unwrap();

        let actions = battle.legal_actions();
        assert_eq!(
            actions,
            vec![Action::Promote {
                player: PlayerId::TWO,
                bench_index: 0
            }]
        );
        battle.apply(&actions[0]).unwrap();
        assert_eq!(battle.player(PlayerId::TWO).active().unwrap().entity_id, bench);
    }

    #[test]
    fn test_history_records_applied_actions() {
        let mut battle = battle(BattleConfig::default());
        place_actives(&mut battle);
        battle.apply(&Action::EndTurn).unwrap();

        let history = battle.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].action, Action::EndTurn);
        assert_eq!(history[2].turn, 0);
        assert_eq!(history[2].sequence, 2);
    }
}
