//! Rules engine trait and game results.
//!
//! `Battle` implements `RulesEngine` so generic drivers (random players,
//! replay tools, search) can run a game without knowing its action methods.

pub mod engine;

pub use engine::{RulesEngine, Victory, WinReason};
