//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: "Pikachu"
//! is a 60 HP Lightning Pokémon with the attack Circle Circuit. These come
//! from an external card source and are shared read-only by every
//! `CardInstance` made from them.
//!
//! Instance-specific data (damage taken, status, attached energy) is stored
//! separately in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::instance::StatusCondition;
use crate::core::{BattleError, Result};

/// Energy and Pokémon types.
///
/// Each type has a one-letter symbol used in cost strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnergyType {
    Grass,
    Fire,
    Water,
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
    Dragon,
    Colorless,
}

impl EnergyType {
    /// Every type, in symbol order.
    pub const ALL: [EnergyType; 10] = [
        EnergyType::Grass,
        EnergyType::Fire,
        EnergyType::Water,
        EnergyType::Lightning,
        EnergyType::Psychic,
        EnergyType::Fighting,
        EnergyType::Darkness,
        EnergyType::Metal,
        EnergyType::Dragon,
        EnergyType::Colorless,
    ];

    /// Parse a cost symbol (`G R W L P F D M N C`).
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'G' => Some(EnergyType::Grass),
            'R' => Some(EnergyType::Fire),
            'W' => Some(EnergyType::Water),
            'L' => Some(EnergyType::Lightning),
            'P' => Some(EnergyType::Psychic),
            'F' => Some(EnergyType::Fighting),
            'D' => Some(EnergyType::Darkness),
            'M' => Some(EnergyType::Metal),
            'N' => Some(EnergyType::Dragon),
            'C' => Some(EnergyType::Colorless),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            EnergyType::Grass => 'G',
            EnergyType::Fire => 'R',
            EnergyType::Water => 'W',
            EnergyType::Lightning => 'L',
            EnergyType::Psychic => 'P',
            EnergyType::Fighting => 'F',
            EnergyType::Darkness => 'D',
            EnergyType::Metal => 'M',
            EnergyType::Dragon => 'N',
            EnergyType::Colorless => 'C',
        }
    }
}

impl std::fmt::Display for EnergyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Energy required to use an attack: a count per energy type.
///
/// Types must match exactly. A Colorless requirement is only paid by
/// Colorless energy.
///
/// ```
/// use pocket_tcg::cards::{EnergyCost, EnergyType};
///
/// let cost = EnergyCost::parse("LLC");
/// assert_eq!(cost.required(EnergyType::Lightning), 2);
/// assert_eq!(cost.required(EnergyType::Colorless), 1);
/// assert_eq!(cost.total(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyCost {
    entries: SmallVec<[(EnergyType, u32); 3]>,
}

impl EnergyCost {
    /// A cost of nothing.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// Build a cost by counting symbols. Unknown characters are ignored.
    #[must_use]
    pub fn parse(symbols: &str) -> Self {
        symbols
            .chars()
            .filter_map(EnergyType::from_symbol)
            .fold(Self::free(), |cost, energy| cost.with(energy, 1))
    }

    /// Add `count` units of `energy` to the cost (builder pattern).
    #[must_use]
    pub fn with(mut self, energy: EnergyType, count: u32) -> Self {
        if count == 0 {
            return self;
        }
        match self.entries.iter().position(|(e, _)| *e == energy) {
            Some(i) => self.entries[i].1 += count,
            None => self.entries.push((energy, count)),
        }
        self
    }

    /// Units of `energy` this cost requires.
    #[must_use]
    pub fn required(&self, energy: EnergyType) -> u32 {
        self.entries
            .iter()
            .find(|(e, _)| *e == energy)
            .map_or(0, |(_, n)| *n)
    }

    /// Total units across all types.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnergyType, u32)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for EnergyCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (energy, count) in self.iter() {
            for _ in 0..count {
                write!(f, "{}", energy.symbol())?;
            }
        }
        Ok(())
    }
}

/// Damage modifier attached to an attack.
///
/// Effect tags come from card data. Tags the engine does not know become
/// `Unknown` and add no damage, so unfamiliar cards never stop a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum AttackEffect {
    /// Plain damage.
    #[default]
    None,
    /// Damage is multiplied by the attacker's bench size.
    MultiplyByBench,
    /// A fixed bonus if the defender is poisoned.
    BonusIfDefenderPoisoned,
    /// A tag from card data that has no rule attached.
    Unknown(String),
}

impl AttackEffect {
    /// Parse an effect tag. `multiply` and `plus` are accepted as legacy names.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "" | "none" => AttackEffect::None,
            "multiply" | "multiply_by_bench" => AttackEffect::MultiplyByBench,
            "plus" | "bonus_if_defender_poisoned" => AttackEffect::BonusIfDefenderPoisoned,
            other => AttackEffect::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            AttackEffect::None => None,
            AttackEffect::MultiplyByBench => Some("multiply_by_bench"),
            AttackEffect::BonusIfDefenderPoisoned => Some("bonus_if_defender_poisoned"),
            AttackEffect::Unknown(tag) => Some(tag),
        }
    }
}

impl From<Option<String>> for AttackEffect {
    fn from(tag: Option<String>) -> Self {
        tag.map_or(AttackEffect::None, |t| AttackEffect::from_tag(&t))
    }
}

impl From<AttackEffect> for Option<String> {
    fn from(effect: AttackEffect) -> Self {
        effect.tag().map(str::to_string)
    }
}

/// An attack printed on a Pokémon card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,

    pub cost: EnergyCost,

    /// Base damage before effects and weakness.
    pub damage: u32,

    #[serde(default)]
    pub effect: AttackEffect,

    /// Status inflicted on the defender. When absent, derived from `text`.
    #[serde(default)]
    pub inflicts: Option<StatusCondition>,

    /// Card text, for display and for cards without an explicit `inflicts`.
    #[serde(default)]
    pub text: String,
}

impl Attack {
    #[must_use]
    pub fn new(name: impl Into<String>, cost: EnergyCost, damage: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            damage,
            effect: AttackEffect::None,
            inflicts: None,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: AttackEffect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn inflicting(mut self, status: StatusCondition) -> Self {
        self.inflicts = Some(status);
        self
    }

    /// The status this attack leaves on the defender, if any.
    ///
    /// The explicit tag wins. Otherwise the text is scanned for
    /// "now Asleep", "now Paralyzed", then "now Poisoned"; the first match
    /// is used.
    #[must_use]
    pub fn status_inflicted(&self) -> Option<StatusCondition> {
        if self.inflicts.is_some() {
            return self.inflicts;
        }
        [
            ("now Asleep", StatusCondition::Asleep),
            ("now Paralyzed", StatusCondition::Paralyzed),
            ("now Poisoned", StatusCondition::Poisoned),
        ]
        .into_iter()
        .find(|(phrase, _)| self.text.contains(phrase))
        .map(|(_, status)| status)
    }
}

/// A passive ability. Stored for display and export; abilities have no
/// rules attached in this engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

/// Broad card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Pokemon,
    Trainer,
}

/// Evolution stage of a Pokémon card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Basic,
    Stage1,
    Stage2,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use pocket_tcg::cards::{Attack, AttackEffect, CardDefinition, EnergyCost, EnergyType};
///
/// let pikachu = CardDefinition::pokemon("Pikachu", EnergyType::Lightning, 60)
///     .with_attack(
///         Attack::new("Circle Circuit", EnergyCost::parse("L"), 10)
///             .with_effect(AttackEffect::MultiplyByBench),
///     )
///     .with_weakness(EnergyType::Fighting)
///     .with_retreat_cost(1);
///
/// assert!(pikachu.is_basic_pokemon());
/// assert!(pikachu.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,

    /// Pokémon type. Trainers are Colorless.
    pub element: EnergyType,

    /// Hit points. Zero for trainers.
    pub hp: u32,

    pub category: Category,

    /// ex Pokémon give up two prizes when knocked out.
    #[serde(default)]
    pub ex: bool,

    #[serde(default)]
    pub stage: Stage,

    /// Name of the Pokémon this evolves from.
    #[serde(default)]
    pub evolves_from: Option<String>,

    #[serde(default)]
    pub attacks: Vec<Attack>,

    #[serde(default)]
    pub abilities: Vec<Ability>,

    #[serde(default)]
    pub weakness: Option<EnergyType>,

    #[serde(default)]
    pub retreat_cost: u32,
}

impl CardDefinition {
    /// A Basic Pokémon with no attacks yet.
    #[must_use]
    pub fn pokemon(name: impl Into<String>, element: EnergyType, hp: u32) -> Self {
        Self {
            name: name.into(),
            element,
            hp,
            category: Category::Pokemon,
            ex: false,
            stage: Stage::Basic,
            evolves_from: None,
            attacks: Vec::new(),
            abilities: Vec::new(),
            weakness: None,
            retreat_cost: 0,
        }
    }

    /// A Trainer card.
    #[must_use]
    pub fn trainer(name: impl Into<String>) -> Self {
        Self {
            category: Category::Trainer,
            ..Self::pokemon(name, EnergyType::Colorless, 0)
        }
    }

    #[must_use]
    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.abilities.push(Ability {
            name: name.into(),
            text: text.into(),
        });
        self
    }

    #[must_use]
    pub fn with_weakness(mut self, weakness: EnergyType) -> Self {
        self.weakness = Some(weakness);
        self
    }

    #[must_use]
    pub fn with_retreat_cost(mut self, cost: u32) -> Self {
        self.retreat_cost = cost;
        self
    }

    /// Mark as an ex Pokémon.
    #[must_use]
    pub fn as_ex(mut self) -> Self {
        self.ex = true;
        self
    }

    #[must_use]
    pub fn evolving_from(mut self, from: impl Into<String>, stage: Stage) -> Self {
        self.evolves_from = Some(from.into());
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn is_pokemon(&self) -> bool {
        self.category == Category::Pokemon
    }

    #[must_use]
    pub fn is_trainer(&self) -> bool {
        self.category == Category::Trainer
    }

    /// A Pokémon that does not evolve from anything.
    #[must_use]
    pub fn is_basic_pokemon(&self) -> bool {
        self.is_pokemon() && self.evolves_from.is_none()
    }

    /// Prize cards the opponent takes for knocking this card out.
    #[must_use]
    pub fn prize_value(&self) -> usize {
        if self.ex {
            2
        } else {
            1
        }
    }

    /// Minimal sanity checks on data from an external card source.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| BattleError::InvalidCardData {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        match self.category {
            Category::Pokemon => {
                if self.hp == 0 {
                    return Err(invalid("Pokémon must have positive HP"));
                }
                if (self.stage == Stage::Basic) != self.evolves_from.is_none() {
                    return Err(invalid("stage and evolves_from disagree"));
                }
            }
            Category::Trainer => {
                if !self.attacks.is_empty() {
                    return Err(invalid("Trainer cards cannot have attacks"));
                }
                if self.ex {
                    return Err(invalid("Trainer cards cannot be ex"));
                }
            }
        }
        Ok(())
    }
}
