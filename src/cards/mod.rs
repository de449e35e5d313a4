//! Card system: definitions, instances, registry, and deck lists.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Static card data (HP, type, attacks, weakness)
//! - `CardInstance`: Runtime card state (damage, status, attached energy)
//! - `CardRegistry`: Definition lookup by name
//! - `DeckBuilder`: Turns card names into a `Deck`, enforcing the copy limit

pub mod definition;
pub mod instance;
pub mod registry;
pub mod deck;

pub use definition::{
    Ability, Attack, AttackEffect, CardDefinition, Category, EnergyCost, EnergyType, Stage,
};
pub use instance::{CardInstance, StatusCondition};
pub use registry::CardRegistry;
pub use deck::{Deck, DeckBuilder};
