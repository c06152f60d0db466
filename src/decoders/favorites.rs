use serde::Deserialize;
use serde_json::{Map, Value};

use crate::decoders::Decoder;
use crate::error::ClientError;
use crate::model::Favorite;

pub struct FavoritesDecoder;

#[derive(Debug, Deserialize)]
struct FavoritesResponse {
    #[serde(default)]
    status: String,
    message: Option<String>,
    #[serde(default)]
    data: Vec<Map<String, Value>>,
}

fn field_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Decoder for FavoritesDecoder {
    /// `None` when the user has no favorites
    type Output = Option<Vec<Favorite>>;

    fn decode(&self, body: &str) -> Result<Self::Output, ClientError> {
        let response: FavoritesResponse = serde_json::from_str(body)?;

        if response.status != "success" {
            return Err(ClientError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Failed to load favorites".to_string()),
            ));
        }

        let favorites: Vec<Favorite> = response
            .data
            .into_iter()
            .map(|row| Favorite {
                fields: row
                    .into_iter()
                    .map(|(key, value)| (key, field_to_string(value)))
                    .collect(),
            })
            .collect();

        Ok((!favorites.is_empty()).then_some(favorites))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_become_string_maps() {
        let body = r#"{
            "status": "success",
            "data": [
                {"id": 1, "username": "john_doe", "recipe_id": "715538", "note": null},
                {"id": 2, "username": "john_doe", "recipe_id": 642583}
            ]
        }"#;

        let favorites = FavoritesDecoder.decode(body).unwrap().unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].recipe_id(), Some("715538"));
        assert_eq!(favorites[0].get("note"), Some(""));
        assert_eq!(favorites[1].recipe_id(), Some("642583"));
        assert_eq!(favorites[1].get("id"), Some("2"));
    }

    #[test]
    fn test_empty_data_is_none() {
        let result = FavoritesDecoder
            .decode(r#"{"status":"success","data":[]}"#)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_error_status_carries_message() {
        let result = FavoritesDecoder.decode(r#"{"status":"error","message":"Username required"}"#);
        match result {
            Err(ClientError::Rejected(message)) => assert_eq!(message, "Username required"),
            other => panic!("Expected rejection, got {:?}", other),
        }
    }
}
