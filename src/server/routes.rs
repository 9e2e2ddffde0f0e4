use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{debug, error};

use crate::provider::{DeckProvider, ImagesResponse};

pub fn create_routes<P>(provider: Arc<P>) -> Router
where
    P: DeckProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/api/images", get(list_images::<P>))
        .route("/health", get(health))
        .with_state(provider)
}

/// `GET /api/images`: every kind ordered by id, or `500 {"error": ...}`.
pub async fn list_images<P>(State(provider): State<Arc<P>>) -> Response
where
    P: DeckProvider + Send + Sync + 'static,
{
    match provider.fetch_deck().await {
        Ok(mut kinds) => {
            kinds.sort_by_key(|k| k.id);
            debug!(count = kinds.len(), "serving images");
            (StatusCode::OK, Json(ImagesResponse::Images(kinds))).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to load images");
            let body = ImagesResponse::Error {
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::provider::{decode_images, ProviderError, StaticProvider};

    struct BrokenProvider;

    impl DeckProvider for BrokenProvider {
        async fn fetch_deck(&self) -> Result<Vec<CardKind>, ProviderError> {
            Err(ProviderError::Malformed("Unexpected result from query".into()))
        }
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_list_images_sorted() {
        let provider = Arc::new(StaticProvider::new(vec![
            CardKind::new(2, "dog", "dog.png"),
            CardKind::new(1, "cat", "cat.png"),
        ]));

        let response = list_images(State(provider)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let kinds = decode_images(&body_bytes(response).await).unwrap();
        assert_eq!(kinds[0].label, "cat");
        assert_eq!(kinds[1].label, "dog");
    }

    #[tokio::test]
    async fn test_list_images_failure() {
        let response = list_images(State(Arc::new(BrokenProvider))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body["error"],
            "malformed deck payload: Unexpected result from query"
        );
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }
}
