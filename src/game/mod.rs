//! The game engine: flips, pair resolution, win detection and the clock.
//!
//! - `engine`: the `GameEngine` state machine
//! - `clock`: elapsed-time counter owning its repeating tick
//! - `scheduler`: deferred tasks fired as time advances
//! - `status`: derived status, click outcomes, events and errors

pub mod clock;
pub mod engine;
pub mod scheduler;
pub mod status;

pub use clock::GameClock;
pub use engine::{GameEngine, GameSnapshot, SelectedCards};
pub use scheduler::{Scheduler, Task, TaskHandle};
pub use status::{ClickOutcome, EngineEvent, GameError, GameStatus, IgnoreReason};
