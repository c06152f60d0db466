pub mod builder;
pub mod clients;
pub mod config;
pub mod decoders;
pub mod error;
pub mod fetchers;
pub mod flows;
pub mod model;

// UniFFI bindings for iOS/Android
pub mod uniffi_bindings;

pub use builder::{BrokeButHungry, BrokeButHungryBuilder};
pub use config::AppConfig;
pub use error::{ClientError, Field, ValidationError};
pub use flows::{
    AuthFailure, AuthFlow, AuthRequest, AuthState, DetailRenderer, FavoritesFlow, FixedLocation,
    LocationProvider, LoginForm, NearbyPlaces, NearbyPlacesFlow, RecipeFlow, RegistrationForm,
    ResetPasswordForm,
};
pub use model::{
    AuthResult, AuthStatus, Coordinates, Favorite, Lookup, MapMarker, NutritionLabel,
    PlaceResult, PriceBreakdown, RecipeDetail, RecipeInfo, RecipeSummary,
};

/// Search recipes with configuration from `config.toml` and the environment.
pub async fn search_recipes(query: &str) -> Result<Lookup<Vec<RecipeSummary>>, ClientError> {
    let app = BrokeButHungry::builder().build()?;
    Ok(app.recipes().search(query).await)
}

/// Fetch every detail part of one recipe with configuration from
/// `config.toml` and the environment.
pub async fn fetch_recipe_detail(recipe_id: &str) -> Result<RecipeDetail, ClientError> {
    let app = BrokeButHungry::builder().build()?;
    Ok(app.recipes().detail(recipe_id).await)
}
