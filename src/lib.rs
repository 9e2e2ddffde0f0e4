//! # memory-match
//!
//! A memory-matching (card pairs) game engine and its read-only deck
//! service.
//!
//! ## Design Principles
//!
//! 1. **Single owner**: `GameEngine` is the only thing that mutates the
//!    deck, the selection, the comparison lock and the clock.
//!
//! 2. **Injected time**: Every operation takes the current time. Deferred
//!    work (clock ticks, flip-backs, reset deals) fires when time advances,
//!    so the same engine runs against a wall clock or a test script.
//!
//! 3. **Guards over cancellation**: One-shot deferred work always fires and
//!    re-checks live state, so a late flip-back is a harmless no-op.
//!
//! ## Modules
//!
//! - `core`: timestamps, RNG, configuration
//! - `cards`: card kinds, cards and the dealt deck
//! - `game`: the engine, its clock and scheduler
//! - `provider`: where kinds come from (memory, file, PostgreSQL)
//! - `server`: the `/api/images` endpoint
//! - `session`: fetch-once bootstrap with an explicit failure state
//! - `render`, `play`: text surface and terminal loop

pub mod cards;
pub mod core;
pub mod game;
pub mod play;
pub mod provider;
pub mod render;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, Millis};

pub use crate::cards::{validate_kinds, Card, CardId, CardKind, Deck, DeckError, KindId};

pub use crate::game::{
    ClickOutcome, EngineEvent, GameEngine, GameError, GameSnapshot, GameStatus, IgnoreReason,
};

pub use crate::provider::{
    DeckProvider, JsonFileProvider, PgImageStore, ProviderError, StaticProvider, StoreConfig,
};

pub use crate::session::{InitError, Session};
