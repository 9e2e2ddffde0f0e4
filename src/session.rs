//! Bootstrap: fetch the kinds once and build a game.
//!
//! A failed fetch or an unplayable deck does not panic and does not
//! produce an empty board. It yields `Session::Failed`, which has zero
//! playable cards and carries the reason for the renderer to show.

use thiserror::Error;
use tracing::{error, info};

use crate::cards::{CardKind, DeckError};
use crate::core::GameConfig;
use crate::game::GameEngine;
use crate::provider::{DeckProvider, ProviderError};

/// Why a session could not start.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not load the deck: {0}")]
    Provider(#[from] ProviderError),

    #[error("the deck is not playable: {0}")]
    Deck(#[from] DeckError),
}

/// A loaded game, or the reason there is none.
#[derive(Debug)]
pub enum Session {
    Ready(GameEngine),
    Failed(InitError),
}

impl Session {
    /// Fetch from `provider` once and deal.
    pub async fn load<P: DeckProvider>(provider: &P, config: GameConfig) -> Self {
        Self::from_fetch(provider.fetch_deck().await, config)
    }

    /// Build from the outcome of a fetch.
    pub fn from_fetch(fetched: Result<Vec<CardKind>, ProviderError>, config: GameConfig) -> Self {
        let built = fetched
            .map_err(InitError::from)
            .and_then(|kinds| GameEngine::new(kinds, config).map_err(InitError::from));

        match built {
            Ok(engine) => {
                info!(cards = engine.deck().len(), seed = engine.seed(), "session ready");
                Session::Ready(engine)
            }
            Err(e) => {
                error!(error = %e, "session failed to initialize");
                Session::Failed(e)
            }
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Session::Ready(_))
    }

    #[must_use]
    pub fn engine(&self) -> Option<&GameEngine> {
        match self {
            Session::Ready(engine) => Some(engine),
            Session::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&InitError> {
        match self {
            Session::Ready(_) => None,
            Session::Failed(e) => Some(e),
        }
    }

    /// Cards on the table; zero when failed.
    #[must_use]
    pub fn playable_cards(&self) -> usize {
        self.engine().map_or(0, |engine| engine.deck().len())
    }

    /// Take the engine, or the error.
    pub fn into_result(self) -> Result<GameEngine, InitError> {
        match self {
            Session::Ready(engine) => Ok(engine),
            Session::Failed(e) => Err(e),
        }
    }
}
