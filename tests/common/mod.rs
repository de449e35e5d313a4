//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pocket_tcg::battle::Battle;
use pocket_tcg::cards::{
    Attack, AttackEffect, CardDefinition, CardRegistry, Deck, DeckBuilder, EnergyCost, EnergyType,
};
use pocket_tcg::core::{BattleConfig, EntityId, PlayerId};

/// Ten different cards, two copies each make a legal deck.
pub fn registry() -> CardRegistry {
    CardRegistry::from_definitions([
        CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60)
            .with_attack(
                Attack::new("Circle Circuit", EnergyCost::parse("L"), 10)
                    .with_effect(AttackEffect::MultiplyByBench),
            )
            .with_weakness(EnergyType::Fighting)
            .with_retreat_cost(1),
        CardDefinition::pokemon("Pikachu ex", EnergyType::Lightning, 120)
            .with_attack(Attack::new("Thunderbolt", EnergyCost::parse("LL"), 60))
            .with_weakness(EnergyType::Fighting)
            .with_retreat_cost(1)
            .as_ex(),
        CardDefinition::pokemon("Squirtle", EnergyType::Water, 60)
            .with_attack(Attack::new("Water Gun", EnergyCost::parse("W"), 20))
            .with_weakness(EnergyType::Lightning)
            .with_retreat_cost(1),
        CardDefinition::pokemon("Weedle", EnergyType::Grass, 50)
            .with_attack(
                Attack::new("Poison Sting", EnergyCost::parse("G"), 10)
                    .with_text("Your opponent's Active Pokémon is now Poisoned."),
            )
            .with_retreat_cost(1),
        CardDefinition::pokemon("Muk", EnergyType::Psychic, 80)
            .with_attack(
                Attack::new("Venoshock", EnergyCost::parse("PP"), 40)
                    .with_effect(AttackEffect::BonusIfDefenderPoisoned),
            )
            .with_retreat_cost(2),
        CardDefinition::pokemon("Mewtwo ex", EnergyType::Psychic, 150)
            .with_attack(Attack::new("Psydrive", EnergyCost::parse("PP"), 50))
            .with_weakness(EnergyType::Darkness)
            .with_retreat_cost(2)
            .as_ex(),
        CardDefinition::pokemon("Raichu", EnergyType::Lightning, 100)
            .evolving_from("Pikachu", pocket_tcg::cards::Stage::Stage1)
            .with_attack(Attack::new("Thunder", EnergyCost::parse("LLL"), 140)),
        CardDefinition::trainer("Potion"),
        CardDefinition::trainer("Poké Ball"),
        CardDefinition::trainer("Professor's Research"),
    ])
    .unwrap()
}

/// A legal 20-card deck: two copies of every card in `registry()`.
pub fn standard_deck(registry: &CardRegistry) -> Deck {
    let mut names: Vec<_> = registry.iter().map(|c| c.name.clone()).collect();
    names.sort();
    names
        .into_iter()
        .fold(DeckBuilder::new(registry), |builder, name| builder.add(name, 2))
        .build()
        .unwrap()
}

/// Twenty copies of one card, for scenarios that need a predictable board.
pub fn mono_deck(card: CardDefinition) -> Deck {
    Deck::new(vec![Arc::new(card); 20])
}

pub fn pikachu() -> CardDefinition {
    CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60)
        .with_attack(
            Attack::new("Circle Circuit", EnergyCost::parse("L"), 10)
                .with_effect(AttackEffect::MultiplyByBench),
        )
        .with_retreat_cost(1)
}

pub fn squirtle() -> CardDefinition {
    CardDefinition::pokemon("Squirtle", EnergyType::Water, 60)
        .with_attack(Attack::new("Water Gun", EnergyCost::parse("W"), 20))
        .with_weakness(EnergyType::Lightning)
        .with_retreat_cost(1)
}

/// Set up a battle between two mono decks and put one active Pokémon on
/// each side.
pub fn started_battle(p1: CardDefinition, p2: CardDefinition, config: BattleConfig) -> Battle {
    let mut battle = Battle::new(mono_deck(p1), mono_deck(p2), config, 42).unwrap();
    battle.setup();
    for id in PlayerId::both() {
        let card = first_basic(&battle, id);
        battle.play_card(id, card).unwrap();
    }
    battle
}

/// First Basic Pokémon in a player's hand.
pub fn first_basic(battle: &Battle, player: PlayerId) -> EntityId {
    battle
        .player(player)
        .hand()
        .iter()
        .find(|c| c.definition().is_basic_pokemon())
        .map(|c| c.entity_id)
        .unwrap()
}

/// Attach `count` energy of `energy` to `player`'s active Pokémon.
pub fn charge_active(battle: &mut Battle, player: PlayerId, energy: EnergyType, count: usize) {
    let target = battle.player(player).active().unwrap().entity_id;
    for _ in 0..count {
        battle.attach_energy(player, energy, target).unwrap();
    }
}
