//! delve-core: Core game logic for the Delve dungeon crawler
//!
//! This crate contains all game logic with no I/O dependencies beyond
//! loading a config file. Every run is driven by a seeded RNG, so a seed
//! and a list of intents replay the same game.

pub mod combat;
pub mod config;
pub mod controller;
pub mod dungeon;
pub mod error;
pub mod monster;
pub mod object;
pub mod player;

mod consts;
mod gameloop;
mod rng;

pub use config::GameConfig;
pub use consts::*;
pub use controller::{HpFlash, HpSignal, Simulation};
pub use dungeon::generate_dungeon;
pub use gameloop::{Intent, RunState, RunStatus, TurnOutcome, apply_player_intent, step};
pub use monster::spawn_enemies;
pub use object::spawn_items;
pub use rng::GameRng;
