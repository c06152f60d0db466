use log::debug;
use serde::Deserialize;

use crate::decoders::Decoder;
use crate::error::ClientError;
use crate::model::{Coordinates, PlaceResult};

/// Decodes a nearby-search response into places
pub struct PlacesDecoder;

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: Option<String>,
    error_message: Option<String>,
    results: Option<Vec<Place>>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: Option<String>,
    vicinity: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl Decoder for PlacesDecoder {
    /// `None` when no store matched
    type Output = Option<Vec<PlaceResult>>;

    fn decode(&self, body: &str) -> Result<Self::Output, ClientError> {
        let response: NearbySearchResponse = serde_json::from_str(body)?;

        match response.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(status) => {
                return Err(ClientError::DecodeError(format!(
                    "places search returned {}: {}",
                    status,
                    response.error_message.unwrap_or_default()
                )))
            }
        }

        let places: Vec<PlaceResult> = response
            .results
            .ok_or_else(|| ClientError::DecodeError("missing results".to_string()))?
            .into_iter()
            .map(|place| PlaceResult {
                name: place.name.unwrap_or_default(),
                vicinity: place.vicinity.unwrap_or_default(),
                location: place
                    .geometry
                    .and_then(|g| g.location)
                    .map(|l| Coordinates::new(l.lat, l.lng)),
            })
            .collect();

        debug!("places decoded {} results", places.len());
        Ok((!places.is_empty()).then_some(places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_places() {
        let body = r#"{
            "html_attributions": [],
            "results": [
                {
                    "name": "Trader Joe's",
                    "vicinity": "2110 Ventura Blvd, Camarillo",
                    "geometry": {"location": {"lat": 34.2164, "lng": -119.0376}}
                },
                {"name": "Costco Wholesale"}
            ],
            "status": "OK"
        }"#;

        let places = PlacesDecoder.decode(body).unwrap().unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Trader Joe's");
        assert_eq!(
            places[0].location,
            Some(Coordinates::new(34.2164, -119.0376))
        );
        assert_eq!(places[1].vicinity, "");
        assert!(places[1].location.is_none());
    }

    #[test]
    fn test_zero_results_is_none() {
        let result = PlacesDecoder
            .decode(r#"{"results": [], "status": "ZERO_RESULTS"}"#)
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_request_denied_is_error() {
        let body = r#"{
            "error_message": "The provided API key is invalid.",
            "results": [],
            "status": "REQUEST_DENIED"
        }"#;
        match PlacesDecoder.decode(body) {
            Err(ClientError::DecodeError(msg)) => {
                assert!(msg.contains("REQUEST_DENIED"));
                assert!(msg.contains("API key is invalid"));
            }
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_results_is_error() {
        assert!(PlacesDecoder.decode(r#"{"status": "OK"}"#).is_err());
    }
}
