pub mod auth;
pub mod favorites;
pub mod places;
pub mod recipes;

pub use auth::{
    AuthFailure, AuthFlow, AuthRequest, AuthState, LoginForm, RegistrationForm, ResetPasswordForm,
};
pub use favorites::FavoritesFlow;
pub use places::{
    map_markers, maps_search_uri, render_text, FixedLocation, LocationProvider, NearbyPlaces,
    NearbyPlacesFlow, CURRENT_LOCATION_LABEL,
};
pub use recipes::{DetailRenderer, RecipeFlow};

use log::warn;

use crate::error::ClientError;
use crate::model::Lookup;

/// Collapse a client result into the single failure signal a screen shows.
/// The underlying error is logged, only its user-facing text is kept.
pub(crate) fn into_lookup<T>(result: Result<Option<T>, ClientError>, what: &str) -> Lookup<T> {
    match result {
        Ok(value) => value.into(),
        Err(e) => {
            warn!("{} failed: {}", what, e);
            Lookup::Failed(e.user_message())
        }
    }
}
