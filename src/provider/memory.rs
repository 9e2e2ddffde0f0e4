//! In-memory and file-backed providers.

use std::path::PathBuf;

use tracing::debug;

use super::payload::decode_images;
use super::{DeckProvider, ProviderError};
use crate::cards::CardKind;

/// A fixed list of kinds.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    kinds: Vec<CardKind>,
}

impl StaticProvider {
    /// Serve `kinds`, sorted by ascending id.
    pub fn new(mut kinds: Vec<CardKind>) -> Self {
        kinds.sort_by_key(|k| k.id);
        Self { kinds }
    }

    /// Eight built-in kinds for playing without a database.
    pub fn demo() -> Self {
        let animals = ["cat", "dog", "owl", "fox", "bee", "elk", "yak", "eel"];
        Self::new(
            animals
                .iter()
                .zip(1i64..)
                .map(|(name, id)| CardKind::new(id, *name, format!("/images/{name}.png")))
                .collect(),
        )
    }

    /// The kinds served.
    #[must_use]
    pub fn kinds(&self) -> &[CardKind] {
        &self.kinds
    }
}

impl DeckProvider for StaticProvider {
    async fn fetch_deck(&self) -> Result<Vec<CardKind>, ProviderError> {
        Ok(self.kinds.clone())
    }
}

/// Reads a file holding a `/api/images` response body.
#[derive(Clone, Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeckProvider for JsonFileProvider {
    async fn fetch_deck(&self) -> Result<Vec<CardKind>, ProviderError> {
        let body = tokio::fs::read(&self.path).await?;
        let kinds = decode_images(&body)?;
        debug!(path = %self.path.display(), kinds = kinds.len(), "loaded deck file");
        Ok(kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_sorted_by_id() {
        let provider = StaticProvider::new(vec![
            CardKind::new(3, "owl", "owl.png"),
            CardKind::new(1, "cat", "cat.png"),
        ]);
        let kinds = provider.fetch_deck().await.unwrap();
        let ids: Vec<i64> = kinds.iter().map(|k| k.id.raw()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_demo_deck_is_playable() {
        let kinds = StaticProvider::demo().fetch_deck().await.unwrap();
        assert_eq!(kinds.len(), 8);
        assert!(crate::cards::validate_kinds(&kinds, 2).is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let provider = JsonFileProvider::new("/definitely/not/here.json");
        assert!(matches!(provider.fetch_deck().await, Err(ProviderError::Io(_))));
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("memory-match-deck-{}.json", std::process::id()));
        tokio::fs::write(&path, br#"[{"id":1,"label":"cat","url":"cat.png"}]"#)
            .await
            .unwrap();

        let kinds = JsonFileProvider::new(&path).fetch_deck().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(kinds, vec![CardKind::new(1, "cat", "cat.png")]);
    }
}
