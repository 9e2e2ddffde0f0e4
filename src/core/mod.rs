//! Core engine types: timestamps, RNG, configuration.
//!
//! These are the building blocks shared by the cards, the game engine and
//! the providers.

pub mod config;
pub mod rng;
pub mod time;

pub use config::GameConfig;
pub use rng::GameRng;
pub use time::Millis;
