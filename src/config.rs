use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Owned backend (auth and favorites)
    #[serde(default)]
    pub backend: BackendConfig,
    /// Third-party recipe API
    #[serde(default)]
    pub recipes: RecipesConfig,
    /// Third-party places API
    #[serde(default)]
    pub places: PlacesConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            recipes: RecipesConfig::default(),
            places: PlacesConfig::default(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Full URL of the backend script
    #[serde(default = "default_backend_url")]
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

/// Configuration for the recipe search/detail API
#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    #[serde(default = "default_recipes_base_url")]
    pub base_url: String,
    /// API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Maximum number of results requested per search
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Rendering mode of the price breakdown widget
    #[serde(default = "default_price_breakdown_mode")]
    pub price_breakdown_mode: u8,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            base_url: default_recipes_base_url(),
            api_key: None,
            search_limit: default_search_limit(),
            price_breakdown_mode: default_price_breakdown_mode(),
        }
    }
}

/// Configuration for the nearby places API
#[derive(Debug, Deserialize, Clone)]
pub struct PlacesConfig {
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// API key (can also be set via GOOGLE_PLACES_API_KEY)
    pub api_key: Option<String>,
    /// Search radius in meters
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,
    /// Place category filter
    #[serde(default = "default_place_type")]
    pub place_type: String,
    /// Store brands allowed in results, joined with `|` on the wire
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_places_base_url(),
            api_key: None,
            radius_meters: default_radius_meters(),
            place_type: default_place_type(),
            keywords: default_keywords(),
        }
    }
}

// Default value functions
fn default_backend_url() -> String {
    "https://brokebuthungry.appsbycarla.com/api.php".to_string()
}

fn default_recipes_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_search_limit() -> u32 {
    6
}

fn default_price_breakdown_mode() -> u8 {
    2
}

fn default_radius_meters() -> u32 {
    10_000
}

fn default_place_type() -> String {
    "grocery_or_supermarket".to_string()
}

fn default_keywords() -> Vec<String> {
    [
        "Vons",
        "Costco",
        "Walmart",
        "Ralphs",
        "Trader Joe's",
        "Albertsons",
        "Grocery Outlet",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

fn default_timeout() -> u64 {
    15
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with BROKEBUTHUNGRY__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: BROKEBUTHUNGRY__RECIPES__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Recipe API key from config, falling back to SPOONACULAR_API_KEY
    pub fn recipes_api_key(&self) -> Option<String> {
        self.recipes
            .api_key
            .clone()
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
    }

    /// Places API key from config, falling back to GOOGLE_PLACES_API_KEY
    pub fn places_api_key(&self) -> Option<String> {
        self.places
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_PLACES_API_KEY").ok())
    }
}

/// Load configuration from an optional `config.toml` and the environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: BROKEBUTHUNGRY__PLACES__RADIUS_METERS
        .add_source(
            Environment::with_prefix("BROKEBUTHUNGRY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
