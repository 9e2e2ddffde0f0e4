//! Wire shape of the `/api/images` response.
//!
//! Success is a JSON array of `{id, label, url}` records; failure is an
//! object `{"error": "..."}`. Anything else is malformed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProviderError;
use crate::cards::CardKind;

/// Body of a `/api/images` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImagesResponse {
    Images(Vec<CardKind>),
    Error { error: String },
}

/// Decode a response body into kinds.
pub fn decode_images(body: &[u8]) -> Result<Vec<CardKind>, ProviderError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    match value {
        Value::Array(_) => {
            serde_json::from_value(value).map_err(|e| ProviderError::Malformed(e.to_string()))
        }
        Value::Object(ref fields) => match fields.get("error") {
            Some(Value::String(message)) => Err(ProviderError::Remote(message.clone())),
            _ => Err(ProviderError::Malformed("expected an array of images, got an object".into())),
        },
        other => Err(ProviderError::Malformed(format!(
            "expected an array of images, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array() {
        let body = br#"[{"id":1,"label":"cat","url":"cat.png"},{"id":2,"label":"dog","url":"dog.png"}]"#;
        let kinds = decode_images(body).unwrap();

        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0], CardKind::new(1, "cat", "cat.png"));
        assert_eq!(kinds[1].image_ref, "dog.png");
    }

    #[test]
    fn test_decode_error_object() {
        let body = br#"{"error":"Unexpected result from query"}"#;
        match decode_images(body) {
            Err(ProviderError::Remote(message)) => assert_eq!(message, "Unexpected result from query"),
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_non_sequence() {
        let bodies: [&[u8]; 4] = [b"42", b"null", br#""cards""#, br#"{"images":[]}"#];
        for body in bodies {
            assert!(
                matches!(decode_images(body), Err(ProviderError::Malformed(_))),
                "body {:?} should be malformed",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_decode_bad_record() {
        let body = br#"[{"id":"one","label":"cat"}]"#;
        assert!(matches!(decode_images(body), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(decode_images(b"[{"), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_response_shapes() {
        let ok = ImagesResponse::Images(vec![CardKind::new(3, "owl", "owl.png")]);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!([{"id": 3, "label": "owl", "url": "owl.png"}])
        );

        let err = ImagesResponse::Error { error: "boom".into() };
        assert_eq!(serde_json::to_value(&err).unwrap(), serde_json::json!({"error": "boom"}));
    }
}
