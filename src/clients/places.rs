use log::debug;

use crate::clients::join_segments;
use crate::config::AppConfig;
use crate::decoders::{Decoder, PlacesDecoder};
use crate::error::ClientError;
use crate::fetchers::RequestFetcher;
use crate::model::{Coordinates, PlaceResult};

/// Client for the nearby places search API
#[derive(Debug, Clone)]
pub struct PlacesClient {
    fetcher: RequestFetcher,
    base_url: String,
    api_key: Option<String>,
    radius_meters: u32,
    place_type: String,
    keywords: Vec<String>,
}

impl PlacesClient {
    pub fn new(fetcher: RequestFetcher, config: &AppConfig) -> Self {
        PlacesClient {
            fetcher,
            base_url: config.places.base_url.clone(),
            api_key: config.places_api_key(),
            radius_meters: config.places.radius_meters,
            place_type: config.places.place_type.clone(),
            keywords: config.places.keywords.clone(),
        }
    }

    /// First page of stores around `around`; `None` when nothing matched
    pub async fn nearby(
        &self,
        around: Coordinates,
    ) -> Result<Option<Vec<PlaceResult>>, ClientError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ClientError::MissingApiKey("the places API"))?;
        let url = join_segments(
            &self.base_url,
            &["maps", "api", "place", "nearbysearch", "json"],
        )?;

        let location = format!("{},{}", around.latitude, around.longitude);
        let radius = self.radius_meters.to_string();
        let keyword = self.keywords.join("|");

        debug!("searching places around {} within {}m", location, radius);
        let body = self
            .fetcher
            .get_text(
                &url,
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("type", self.place_type.as_str()),
                    ("keyword", keyword.as_str()),
                    ("key", api_key),
                ],
            )
            .await?;
        PlacesDecoder.decode(&body)
    }
}
