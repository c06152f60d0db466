//! UniFFI bindings for brokebuthungry
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;

use crate::flows::{maps_search_uri as geo_uri, AuthFailure, AuthState, FixedLocation};
use crate::{
    BrokeButHungry, ClientError, Coordinates, Favorite, LoginForm, Lookup, NearbyPlaces,
    PlaceResult, RecipeDetail, RecipeSummary, RegistrationForm, ResetPasswordForm,
};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible search result
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeSummary {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub ingredient_count: u32,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(summary: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: summary.id,
            title: summary.title,
            image_url: summary.image_url,
            ingredient_count: u32::try_from(summary.ingredient_count).unwrap_or(u32::MAX),
        }
    }
}

/// FFI-compatible recipe detail.
///
/// Each part is empty when it could not be loaded; the matching `*_error`
/// field then says why.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeDetail {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub info_error: Option<String>,
    /// Raw nutrition label markup
    pub nutrition_label_html: Option<String>,
    pub nutrition_label_error: Option<String>,
    /// `data:` URI of the price breakdown image
    pub price_breakdown_uri: Option<String>,
    pub price_breakdown_error: Option<String>,
}

/// Reason text for a part that is not `Found`
fn lookup_error<T>(lookup: &Lookup<T>) -> Option<String> {
    match lookup {
        Lookup::Found(_) => None,
        Lookup::NotFound => Some("Not found".to_string()),
        Lookup::Failed(reason) => Some(reason.clone()),
    }
}

impl From<RecipeDetail> for FfiRecipeDetail {
    fn from(detail: RecipeDetail) -> Self {
        let mut ffi = FfiRecipeDetail {
            id: detail.id,
            info_error: lookup_error(&detail.info),
            nutrition_label_error: lookup_error(&detail.nutrition_label),
            price_breakdown_error: lookup_error(&detail.price_breakdown),
            ..Default::default()
        };

        if let Lookup::Found(info) = detail.info {
            ffi.title = info.title;
            ffi.image_url = info.image_url;
            ffi.ingredients = info.ingredients;
            ffi.instructions = info.instructions;
        }
        ffi.nutrition_label_html = detail.nutrition_label.found().map(|label| label.html);
        ffi.price_breakdown_uri = detail.price_breakdown.found().map(|image| image.data_uri());
        ffi
    }
}

/// FFI-compatible store
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiPlace {
    pub name: String,
    pub vicinity: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<PlaceResult> for FfiPlace {
    fn from(place: PlaceResult) -> Self {
        FfiPlace {
            name: place.name,
            vicinity: place.vicinity,
            latitude: place.location.map(|l| l.latitude),
            longitude: place.location.map(|l| l.longitude),
        }
    }
}

/// FFI-compatible nearby search outcome
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiNearbyPlaces {
    PermissionRequired,
    LocationUnavailable,
    Places { places: Vec<FfiPlace> },
}

/// Key-value pair (since maps of arbitrary rows aren't directly supported in UniFFI)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiKeyValue {
    pub key: String,
    pub value: String,
}

/// FFI-compatible favorites row
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFavorite {
    pub recipe_id: Option<String>,
    pub fields: Vec<FfiKeyValue>,
}

impl From<Favorite> for FfiFavorite {
    fn from(favorite: Favorite) -> Self {
        FfiFavorite {
            recipe_id: favorite.recipe_id().map(str::to_string),
            fields: favorite
                .fields
                .into_iter()
                .map(|(key, value)| FfiKeyValue { key, value })
                .collect(),
        }
    }
}

/// FFI-compatible auth outcome
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiAuthOutcome {
    pub success: bool,
    pub message: String,
    /// Form field the message belongs to, e.g. "username"
    pub field: Option<String>,
}

impl From<AuthState> for FfiAuthOutcome {
    fn from(state: AuthState) -> Self {
        match state {
            AuthState::Succeeded { message } => FfiAuthOutcome {
                success: true,
                message,
                field: None,
            },
            AuthState::Failed(failure) => failed_outcome(&failure),
            other => FfiAuthOutcome {
                success: false,
                message: format!("Unexpected auth state: {:?}", other),
                field: None,
            },
        }
    }
}

fn failed_outcome(failure: &AuthFailure) -> FfiAuthOutcome {
    FfiAuthOutcome {
        success: false,
        message: failure.message(),
        field: failure.field().map(|f| f.to_string()),
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiError {
    /// Input rejected before any request
    InvalidInput { message: String },
    /// Network or HTTP failure
    RequestFailed { message: String },
    /// Unexpected response shape
    DecodeError { message: String },
    /// Business-rule failure reported by the backend
    Rejected { message: String },
    /// Missing key, bad config or builder misuse
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
    /// A lookup failed; the message is already fit to show
    Failed { message: String },
}

impl fmt::Display for FfiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiError::RequestFailed { message } => write!(f, "Request failed: {}", message),
            FfiError::DecodeError { message } => write!(f, "Decode error: {}", message),
            FfiError::Rejected { message } => write!(f, "{}", message),
            FfiError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
            FfiError::Failed { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for FfiError {}

impl From<ClientError> for FfiError {
    fn from(err: ClientError) -> Self {
        let message = err.user_message();
        match err {
            ClientError::Validation(_) => FfiError::InvalidInput { message },
            ClientError::FetchError(_) | ClientError::HttpStatus(_) | ClientError::InvalidUrl(_) => {
                FfiError::RequestFailed { message }
            }
            ClientError::DecodeError(_) => FfiError::DecodeError { message },
            ClientError::Rejected(_) => FfiError::Rejected { message },
            ClientError::MissingApiKey(_)
            | ClientError::BuilderError(_)
            | ClientError::ConfigError(_) => FfiError::ConfigError {
                message: err.to_string(),
            },
        }
    }
}

/// `Lookup` to a plain list: `NotFound` is empty, `Failed` is an error.
fn lookup_list<T, U: From<T>>(lookup: Lookup<Vec<T>>) -> Result<Vec<U>, FfiError> {
    match lookup {
        Lookup::Found(items) => Ok(items.into_iter().map(U::from).collect()),
        Lookup::NotFound => Ok(Vec::new()),
        Lookup::Failed(message) => Err(FfiError::Failed { message }),
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn app() -> Result<BrokeButHungry, FfiError> {
    Ok(BrokeButHungry::builder().build()?)
}

/// Log in with a username and password
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn login(username: String, password: String) -> Result<FfiAuthOutcome, FfiError> {
    let app = app()?;
    let rt = create_runtime()?;
    let state = rt.block_on(async { app.auth().login(LoginForm { username, password }).await });
    Ok(state.into())
}

/// Create an account
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn register(
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<FfiAuthOutcome, FfiError> {
    let form = RegistrationForm {
        first_name,
        last_name,
        username,
        password,
        confirm_password,
        email,
    };
    let app = app()?;
    let rt = create_runtime()?;
    Ok(rt.block_on(async { app.auth().register(form).await }).into())
}

/// Reset a password after confirming the account's identity fields
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn reset_password(
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<FfiAuthOutcome, FfiError> {
    let form = ResetPasswordForm {
        first_name,
        last_name,
        username,
        email,
        password,
        confirm_password,
    };
    let app = app()?;
    let rt = create_runtime()?;
    Ok(rt.block_on(async { app.auth().reset_password(form).await }).into())
}

/// Search recipes, least ingredients first
///
/// # Returns
/// An empty list when nothing matched
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(query: String) -> Result<Vec<FfiRecipeSummary>, FfiError> {
    let app = app()?;
    let rt = create_runtime()?;
    rt.block_on(async {
        app.recipes()
            .try_search(&query)
            .await
            .map_err(FfiError::from)
            .map(|found| {
                found
                    .unwrap_or_default()
                    .into_iter()
                    .map(FfiRecipeSummary::from)
                    .collect()
            })
    })
}

/// Fetch every detail part of one recipe. Parts fail independently.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn fetch_recipe_detail(recipe_id: String) -> Result<FfiRecipeDetail, FfiError> {
    let app = app()?;
    let rt = create_runtime()?;
    let detail = rt.block_on(async { app.recipes().detail(&recipe_id).await });
    Ok(detail.into())
}

/// Grocery stores around a position the host already resolved
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn find_nearby_places(
    latitude: f64,
    longitude: f64,
    permission_granted: bool,
) -> Result<FfiNearbyPlaces, FfiError> {
    let location = FixedLocation {
        location: Some(Coordinates::new(latitude, longitude)),
        permission_granted,
    };

    let app = app()?;
    let rt = create_runtime()?;
    match rt.block_on(async { app.places().find_nearby(&location).await }) {
        NearbyPlaces::PermissionRequired => Ok(FfiNearbyPlaces::PermissionRequired),
        NearbyPlaces::LocationUnavailable => Ok(FfiNearbyPlaces::LocationUnavailable),
        NearbyPlaces::Results { places, .. } => Ok(FfiNearbyPlaces::Places {
            places: lookup_list(places)?,
        }),
    }
}

/// Saved recipes for a user
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_favorites(username: String) -> Result<Vec<FfiFavorite>, FfiError> {
    let app = app()?;
    let rt = create_runtime()?;
    rt.block_on(async {
        app.favorites()
            .try_favorites(&username)
            .await
            .map_err(FfiError::from)
            .map(|found| {
                found
                    .unwrap_or_default()
                    .into_iter()
                    .map(FfiFavorite::from)
                    .collect()
            })
    })
}

/// `geo:` URI for handing a store search to a maps app
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn maps_search_uri(query: String) -> Result<String, FfiError> {
    Ok(geo_uri(&query)?)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
