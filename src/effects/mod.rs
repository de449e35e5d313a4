//! Card effects: attack damage and trainer resolution.
//!
//! - `calculate_damage`: base damage, then the attack effect, then weakness
//! - `TrainerRegistry`: Pluggable trainer handlers keyed by card name
//!
//! Effects read and write cards and players directly; sequencing (when an
//! effect fires, what happens after a knockout) belongs to the battle.

mod attack;
mod trainer;

pub use attack::{calculate_damage, DamageBreakdown};
pub use trainer::{Heal, TrainerContext, TrainerEffect, TrainerRegistry};
