//! PostgreSQL-backed provider.
//!
//! Reads the `image` table (`id`, `label`, `url`). Every fetch opens its
//! own connection and closes it again whether or not the query succeeded;
//! there is no pool.

use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::Connection;
use thiserror::Error;
use tracing::{debug, warn};

use super::{DeckProvider, ProviderError};
use crate::cards::CardKind;

const SELECT_IMAGES: &str = r#"SELECT id::BIGINT AS id, label, url FROM "public"."image" ORDER BY id ASC"#;

/// Database used when `POSTGRES_DB` is unset.
pub const DEFAULT_DATABASE: &str = "memory";

/// Port used when `POSTGRES_PORT` is unset.
pub const DEFAULT_PORT: u16 = 5432;

/// Invalid or missing store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Connection parameters for the image store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

impl StoreConfig {
    /// Read `POSTGRES_HOST`, `POSTGRES_USER`, `POSTGRES_PASSWORD` and the
    /// optional `POSTGRES_DB` and `POSTGRES_PORT` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::MissingVar(var));

        let port = match lookup("POSTGRES_PORT") {
            None => DEFAULT_PORT,
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                var: "POSTGRES_PORT",
                value,
            })?,
        };

        Ok(Self {
            host: required("POSTGRES_HOST")?,
            user: required("POSTGRES_USER")?,
            password: required("POSTGRES_PASSWORD")?,
            database: lookup("POSTGRES_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            port,
        })
    }

    /// sqlx connection options. SSL is disabled.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: i64,
    label: String,
    url: String,
}

impl From<ImageRow> for CardKind {
    fn from(row: ImageRow) -> Self {
        CardKind::new(row.id, row.label, row.url)
    }
}

/// The `image` table as a deck provider.
///
/// A store built from an incomplete environment still exists; every fetch
/// then fails with `ProviderError::Config`, so callers report it like any
/// other provider failure.
#[derive(Clone, Debug)]
pub struct PgImageStore {
    config: Result<StoreConfig, ConfigError>,
}

impl PgImageStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config: Ok(config) }
    }

    /// Build from the `POSTGRES_*` environment variables.
    pub fn from_env() -> Self {
        Self::resolved(StoreConfig::from_env())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::resolved(StoreConfig::from_lookup(lookup))
    }

    fn resolved(config: Result<StoreConfig, ConfigError>) -> Self {
        if let Err(e) = &config {
            warn!(error = %e, "image store is not configured");
        }
        Self { config }
    }

    /// Read every image, ordered by ascending id.
    pub async fn fetch_images(&self) -> Result<Vec<CardKind>, ProviderError> {
        let config = self.config.as_ref().map_err(|e| ProviderError::Config(e.clone()))?;
        let mut conn = PgConnection::connect_with(&config.connect_options()).await?;

        let result = sqlx::query_as::<_, ImageRow>(SELECT_IMAGES)
            .fetch_all(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close image store connection");
        }

        let rows = result?;
        debug!(rows = rows.len(), host = %config.host, "fetched images");
        Ok(rows.into_iter().map(CardKind::from).collect())
    }
}

impl DeckProvider for PgImageStore {
    async fn fetch_deck(&self) -> Result<Vec<CardKind>, ProviderError> {
        self.fetch_images().await
    }
}
