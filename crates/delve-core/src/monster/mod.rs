//! Monster system
//!
//! Contains species templates, enemy instances and enemy AI.

pub mod ai;
mod enemy;
mod species;

pub use ai::{AiAction, chase_direction, decide};
pub use enemy::{Enemy, EnemyId, spawn_enemies};
pub use species::{Species, default_species, unlocked_tiers};
