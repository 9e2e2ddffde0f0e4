//! Deck providers: where the card kinds come from.
//!
//! A provider returns the distinct kinds a deck is dealt from, or fails.
//! The engine never talks to a provider itself; the session bootstrap
//! fetches once and hands the kinds over.
//!
//! ## Providers
//!
//! - `StaticProvider`: a fixed in-memory list
//! - `JsonFileProvider`: a file in the `/api/images` response shape
//! - `PgImageStore`: the `image` table of a PostgreSQL database

use std::future::Future;

use thiserror::Error;

use crate::cards::CardKind;

pub mod memory;
pub mod payload;
pub mod postgres;

pub use memory::{JsonFileProvider, StaticProvider};
pub use payload::{decode_images, ImagesResponse};
pub use postgres::{ConfigError, PgImageStore, StoreConfig};

/// Why a deck could not be fetched.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("could not read deck source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed deck payload: {0}")]
    Malformed(String),

    #[error("deck service reported an error: {0}")]
    Remote(String),

    #[error("image store query failed: {0}")]
    Store(#[from] sqlx::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Source of card kinds.
///
/// Fetches are one-shot and never retried.
pub trait DeckProvider {
    /// Fetch the kinds, ordered by ascending id.
    fn fetch_deck(&self) -> impl Future<Output = Result<Vec<CardKind>, ProviderError>> + Send;
}
