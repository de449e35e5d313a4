//! Rules scenarios that need a hand-built board.
//!
//! Each test starts from a normal setup, then edits damage, status, decks
//! or prize piles directly before exercising the rule under test.

use std::sync::Arc;

use super::{Battle, StatusOutcome};
use crate::cards::{Attack, AttackEffect, CardDefinition, Deck, EnergyCost, EnergyType, StatusCondition};
use crate::core::{BattleConfig, BattleError, EntityId, PlayerId};
use crate::rules::{RulesEngine, Victory, WinReason};

fn pikachu() -> CardDefinition {
    CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60)
        .with_attack(
            Attack::new("Circle Circuit", EnergyCost::parse("L"), 10)
                .with_effect(AttackEffect::MultiplyByBench),
        )
        .with_retreat_cost(1)
}

fn squirtle() -> CardDefinition {
    CardDefinition::pokemon("Squirtle", EnergyType::Water, 60)
        .with_attack(Attack::new("Water Gun", EnergyCost::parse("W"), 20))
        .with_weakness(EnergyType::Lightning)
        .with_retreat_cost(1)
}

fn lapras_ex() -> CardDefinition {
    CardDefinition::pokemon("Lapras ex", EnergyType::Water, 20)
        .with_weakness(EnergyType::Lightning)
        .as_ex()
}

fn started(p1: CardDefinition, p2: CardDefinition) -> Battle {
    let mut battle = Battle::new(
        Deck::new(vec![Arc::new(p1); 20]),
        Deck::new(vec![Arc::new(p2); 20]),
        BattleConfig::default(),
        42,
    )
    .unwrap();
    battle.setup();
    for id in PlayerId::both() {
        let card = first_basic(&battle, id);
        battle.play_card(id, card).unwrap();
    }
    battle
}

fn first_basic(battle: &Battle, player: PlayerId) -> EntityId {
    battle
        .player(player)
        .hand()
        .iter()
        .find(|c| c.definition().is_basic_pokemon())
        .map(|c| c.entity_id)
        .unwrap()
}

fn bench_one(battle: &mut Battle, player: PlayerId) -> EntityId {
    let card = first_basic(battle, player);
    battle.play_card(player, card).unwrap();
    card
}

fn charge(battle: &mut Battle, player: PlayerId, energy: EnergyType, count: usize) {
    let target = battle.player(player).active().unwrap().entity_id;
    for _ in 0..count {
        battle.attach_energy(player, energy, target).unwrap();
    }
}

// === Damage and status ===

#[test]
fn test_poison_bonus_damage() {
    let muk = CardDefinition::pokemon("Muk", EnergyType::Psychic, 80).with_attack(
        Attack::new("Venoshock", EnergyCost::parse("P"), 10)
            .with_effect(AttackEffect::BonusIfDefenderPoisoned),
    );
    let mut battle = started(muk, pikachu());
    charge(&mut battle, PlayerId::ONE, EnergyType::Psychic, 1);

    assert_eq!(battle.perform_attack(0).unwrap().damage.total, 10);

    battle
        .player_mut(PlayerId::TWO)
        .active_mut()
        .unwrap()
        .set_status(StatusCondition::Poisoned);
    assert_eq!(battle.perform_attack(0).unwrap().damage.total, 40);
}

#[test]
fn test_paralyzed_attacker_cannot_attack() {
    let mut battle = started(pikachu(), squirtle());
    charge(&mut battle, PlayerId::ONE, EnergyType::Lightning, 1);
    battle
        .player_mut(PlayerId::ONE)
        .active_mut()
        .unwrap()
        .set_status(StatusCondition::Paralyzed);

    let err = battle.perform_attack(0).unwrap_err();

    assert!(matches!(err, BattleError::InvalidAttack(_)));
    assert_eq!(battle.player(PlayerId::TWO).active().unwrap().damage(), 0);
}

#[test]
fn test_asleep_attacker_can_still_attack() {
    let mut battle = started(pikachu(), squirtle());
    charge(&mut battle, PlayerId::ONE, EnergyType::Lightning, 1);
    bench_one(&mut battle, PlayerId::ONE);
    battle
        .player_mut(PlayerId::ONE)
        .active_mut()
        .unwrap()
        .set_status(StatusCondition::Asleep);

    assert!(battle.perform_attack(0).is_ok());
}

#[test]
fn test_poison_persists_between_turns() {
    let mut battle = started(pikachu(), squirtle());
    battle
        .player_mut(PlayerId::ONE)
        .active_mut()
        .unwrap()
        .set_status(StatusCondition::Poisoned);

    battle.end_turn();
    battle.end_turn();
    battle.end_turn();

    let active = battle.player(PlayerId::ONE).active().unwrap();
    assert_eq!(active.damage(), 20);
    assert!(active.has_status(StatusCondition::Poisoned));
}

#[test]
fn test_paralysis_blocks_retreat_until_turn_ends() {
    let mut battle = started(pikachu(), squirtle());
    let bench = bench_one(&mut battle, PlayerId::ONE);
    charge(&mut battle, PlayerId::ONE, EnergyType::Lightning, 1);
    battle
        .player_mut(PlayerId::ONE)
        .active_mut()
        .unwrap()
        .set_status(StatusCondition::Paralyzed);

    assert!(matches!(battle.retreat(0), Err(BattleError::InvalidRetreat(_))));

    battle.end_turn();
    battle.end_turn();

    assert!(battle.player(PlayerId::ONE).can_retreat());
    battle.retreat(0).unwrap();
    assert_eq!(battle.player(PlayerId::ONE).active().unwrap().entity_id, bench);
}

// === Knockouts and prizes ===

#[test]
fn test_ex_knockout_with_one_prize_left_takes_one() {
    let mut battle = started(pikachu(), lapras_ex());
    bench_one(&mut battle, PlayerId::ONE);
    charge(&mut battle, PlayerId::ONE, EnergyType::Lightning, 1);
    battle.player_mut(PlayerId::TWO).take_prizes(2);
    let hand = battle.player(PlayerId::ONE).hand().len();

    let outcome = battle.perform_attack(0).unwrap();

    assert_eq!(outcome.knocked_out.unwrap().prizes_taken, 1);
    assert_eq!(battle.player(PlayerId::TWO).prize_count(), 0);
    assert_eq!(battle.player(PlayerId::ONE).prize_count(), 3);
    assert_eq!(battle.player(PlayerId::ONE).hand().len(), hand + 1);
    assert_eq!(
        battle.check_win_condition(),
        Some(Victory::new(PlayerId::TWO, WinReason::AllPrizesTaken))
    );
}

#[test]
fn test_knockout_with_empty_prize_pile_claims_nothing() {
    let mut battle = started(pikachu(), lapras_ex());
    bench_one(&mut battle, PlayerId::ONE);
    charge(&mut battle, PlayerId::ONE, EnergyType::Lightning, 1);
    battle.player_mut(PlayerId::TWO).take_prizes(3);
    let hand = battle.player(PlayerId::ONE).hand().len();

    let outcome = battle.perform_attack(0).unwrap();

    assert_eq!(outcome.knocked_out.unwrap().prizes_taken, 0);
    assert_eq!(battle.player(PlayerId::ONE).hand().len(), hand);
    assert!(!battle.log().contains("prize card"));
}

#[test]
fn test_poison_self_knockout_credits_opponent() {
    let mut battle = started(pikachu(), squirtle());
    {
        let active = battle.player_mut(PlayerId::ONE).active_mut().unwrap();
        active.add_damage(55);
        active.set_status(StatusCondition::Poisoned);
    }
    let opponent_hand = battle.player(PlayerId::TWO).hand().len();

    let outcome = battle.end_turn().unwrap();

    match outcome {
        StatusOutcome::PoisonDamage {
            damage,
            knocked_out,
        } => {
            assert_eq!(damage, 10);
            let ko = knocked_out.unwrap();
            assert_eq!(ko.player, PlayerId::ONE);
            assert_eq!(ko.prizes_taken, 1);
        }
        other => panic!("unexpected status outcome {other:?}"),
    }
    assert!(battle.player(PlayerId::ONE).active().is_none());
    assert_eq!(battle.player(PlayerId::ONE).discard_pile().len(), 1);
    assert_eq!(battle.player(PlayerId::ONE).prize_count(), 2);
    assert_eq!(battle.player(PlayerId::TWO).prize_count(), 3);
    // One prize plus the turn draw.
    assert_eq!(battle.player(PlayerId::TWO).hand().len(), opponent_hand + 2);
    assert!(battle.log().contains("took 10 damage from poison!"));
}

// === Win conditions ===

#[test]
fn test_deck_out_loses() {
    let mut battle = started(pikachu(), squirtle());
    while battle.player_mut(PlayerId::TWO).draw_card().is_ok() {}
    let hand = battle.player(PlayerId::TWO).hand().len();

    battle.end_turn();

    assert_eq!(battle.player(PlayerId::TWO).hand().len(), hand);
    assert!(battle.log().contains("Player 2 has no cards left to draw!"));
    assert_eq!(
        battle.check_win_condition(),
        Some(Victory::new(PlayerId::ONE, WinReason::DeckOut))
    );
    assert!(battle.log().contains("Player 1 wins!"));
}

#[test]
fn test_no_pokemon_in_play_loses() {
    let mut battle = started(pikachu(), squirtle());
    bench_one(&mut battle, PlayerId::ONE);
    charge(&mut battle, PlayerId::ONE, EnergyType::Lightning, 1);
    battle
        .player_mut(PlayerId::TWO)
        .active_mut()
        .unwrap()
        .add_damage(55);

    battle.perform_attack(0).unwrap();

    assert_eq!(
        battle.check_win_condition(),
        Some(Victory::new(PlayerId::ONE, WinReason::NoPokemonInPlay))
    );
    assert!(battle.legal_actions().is_empty());
    assert_eq!(battle.is_terminal(), battle.evaluate_win_condition());
}

#[test]
fn test_prize_win_outranks_deck_out() {
    let mut battle = started(pikachu(), squirtle());
    battle.player_mut(PlayerId::TWO).take_prizes(3);
    while battle.player_mut(PlayerId::ONE).draw_card().is_ok() {}
    battle.player_mut(PlayerId::ONE).discard_active();

    let victory = battle.check_win_condition().unwrap();

    assert_eq!(victory.winner, PlayerId::TWO);
    assert_eq!(victory.reason, WinReason::AllPrizesTaken);
}

#[test]
fn test_deck_out_outranks_no_pokemon() {
    let mut battle = started(pikachu(), squirtle());
    while battle.player_mut(PlayerId::ONE).draw_card().is_ok() {}
    battle.player_mut(PlayerId::TWO).discard_active();

    let victory = battle.evaluate_win_condition().unwrap();

    assert_eq!(victory, Victory::new(PlayerId::TWO, WinReason::DeckOut));
}
