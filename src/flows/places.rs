use async_trait::async_trait;
use log::{debug, info};
use reqwest::Url;

use crate::clients::PlacesClient;
use crate::error::ClientError;
use crate::flows::into_lookup;
use crate::model::{Coordinates, Lookup, MapMarker, PlaceResult};

/// Label of the marker placed at the device's own position
pub const CURRENT_LOCATION_LABEL: &str = "currentLocation";

/// Device location as the host platform exposes it
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the user has granted location access
    fn has_permission(&self) -> bool;

    /// Last known position, if the device has one
    async fn last_location(&self) -> Option<Coordinates>;
}

/// A provider that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    pub location: Option<Coordinates>,
    pub permission_granted: bool,
}

impl FixedLocation {
    pub fn new(location: Coordinates) -> Self {
        FixedLocation {
            location: Some(location),
            permission_granted: true,
        }
    }

    pub fn denied() -> Self {
        FixedLocation {
            location: None,
            permission_granted: false,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    fn has_permission(&self) -> bool {
        self.permission_granted
    }

    async fn last_location(&self) -> Option<Coordinates> {
        self.location
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NearbyPlaces {
    /// The host must ask for location access first
    PermissionRequired,
    /// Access granted but the device has no fix yet
    LocationUnavailable,
    Results {
        origin: Coordinates,
        places: Lookup<Vec<PlaceResult>>,
    },
}

/// Grocery stores around the device
#[derive(Debug, Clone)]
pub struct NearbyPlacesFlow {
    client: PlacesClient,
}

impl NearbyPlacesFlow {
    pub fn new(client: PlacesClient) -> Self {
        NearbyPlacesFlow { client }
    }

    pub async fn find_nearby<L>(&self, location: &L) -> NearbyPlaces
    where
        L: LocationProvider + ?Sized,
    {
        if !location.has_permission() {
            info!("location permission not granted");
            return NearbyPlaces::PermissionRequired;
        }

        let Some(origin) = location.last_location().await else {
            info!("no last known location");
            return NearbyPlaces::LocationUnavailable;
        };

        let places = into_lookup(self.client.nearby(origin).await, "nearby places");
        if let Lookup::Found(found) = &places {
            debug!("{} stores near {:?}", found.len(), origin);
        }
        NearbyPlaces::Results { origin, places }
    }
}

/// One `name\nvicinity\n` block per place.
pub fn render_text(places: &[PlaceResult]) -> String {
    places
        .iter()
        .map(|place| format!("{}\n{}\n", place.name, place.vicinity))
        .collect()
}

/// Project places onto map pins. The device position comes first; places
/// without coordinates are left off the map.
pub fn map_markers(origin: Coordinates, places: &[PlaceResult]) -> Vec<MapMarker> {
    let current = MapMarker {
        position: origin,
        label: CURRENT_LOCATION_LABEL.to_string(),
    };

    std::iter::once(current)
        .chain(places.iter().filter_map(|place| {
            place.location.map(|position| MapMarker {
                position,
                label: place.name.clone(),
            })
        }))
        .collect()
}

/// `geo:` URI an external maps app can open to search for `query`.
pub fn maps_search_uri(query: &str) -> Result<String, ClientError> {
    Url::parse_with_params("geo:0,0", &[("q", query)])
        .map(String::from)
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))
}
