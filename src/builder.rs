use std::time::Duration;

use log::debug;

use crate::clients::{BackendClient, PlacesClient, RecipeApiClient};
use crate::config::AppConfig;
use crate::error::ClientError;
use crate::fetchers::RequestFetcher;
use crate::flows::{AuthFlow, FavoritesFlow, NearbyPlacesFlow, RecipeFlow};

/// Builder for wiring configuration into the API clients
#[derive(Debug, Default)]
pub struct BrokeButHungryBuilder {
    config: Option<AppConfig>,
    timeout: Option<Duration>,
    backend_url: Option<String>,
    recipes_base_url: Option<String>,
    recipes_api_key: Option<String>,
    places_base_url: Option<String>,
    places_api_key: Option<String>,
}

impl BrokeButHungryBuilder {
    /// Start from an explicit configuration instead of `config.toml` and the
    /// environment
    ///
    /// # Example
    /// ```
    /// use brokebuthungry::{AppConfig, BrokeButHungry};
    ///
    /// let builder = BrokeButHungry::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use brokebuthungry::BrokeButHungry;
    /// use std::time::Duration;
    ///
    /// let builder = BrokeButHungry::builder().timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the backend script URL
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Override the recipe API base URL
    pub fn recipes_base_url(mut self, url: impl Into<String>) -> Self {
        self.recipes_base_url = Some(url.into());
        self
    }

    /// Set the recipe API key
    ///
    /// This allows passing the key directly instead of relying on
    /// environment variables or config files.
    pub fn recipes_api_key(mut self, key: impl Into<String>) -> Self {
        self.recipes_api_key = Some(key.into());
        self
    }

    /// Override the places API base URL
    pub fn places_base_url(mut self, url: impl Into<String>) -> Self {
        self.places_base_url = Some(url.into());
        self
    }

    /// Set the places API key
    pub fn places_api_key(mut self, key: impl Into<String>) -> Self {
        self.places_api_key = Some(key.into());
        self
    }

    /// Build the clients
    ///
    /// # Errors
    /// Returns `ClientError` if:
    /// - No configuration was given and loading one fails
    /// - A timeout of zero was requested
    /// - The recipe search limit is zero
    /// - The HTTP client cannot be created
    ///
    /// # Example
    /// ```no_run
    /// # use brokebuthungry::BrokeButHungry;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let app = BrokeButHungry::builder()
    ///     .recipes_api_key("your-api-key")
    ///     .build()?;
    /// let results = app.recipes().search("pasta").await;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<BrokeButHungry, ClientError> {
        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };

        if let Some(url) = self.backend_url {
            config.backend.url = url;
        }
        if let Some(url) = self.recipes_base_url {
            config.recipes.base_url = url;
        }
        if let Some(key) = self.recipes_api_key {
            config.recipes.api_key = Some(key);
        }
        if let Some(url) = self.places_base_url {
            config.places.base_url = url;
        }
        if let Some(key) = self.places_api_key {
            config.places.api_key = Some(key);
        }

        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));
        if timeout.is_zero() {
            return Err(ClientError::BuilderError(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if config.recipes.search_limit == 0 {
            return Err(ClientError::BuilderError(
                "Recipe search limit must be greater than zero".to_string(),
            ));
        }

        debug!("building clients with a {:?} timeout", timeout);
        let fetcher = RequestFetcher::new(Some(timeout))?;

        Ok(BrokeButHungry {
            backend: BackendClient::new(fetcher.clone(), &config),
            recipes: RecipeApiClient::new(fetcher.clone(), &config),
            places: PlacesClient::new(fetcher, &config),
            config,
        })
    }
}

/// Main entry point: every flow, sharing one HTTP client
#[derive(Debug, Clone)]
pub struct BrokeButHungry {
    config: AppConfig,
    backend: BackendClient,
    recipes: RecipeApiClient,
    places: PlacesClient,
}

impl BrokeButHungry {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use brokebuthungry::BrokeButHungry;
    ///
    /// let builder = BrokeButHungry::builder();
    /// ```
    pub fn builder() -> BrokeButHungryBuilder {
        BrokeButHungryBuilder::default()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A fresh auth state machine, starting at `Idle`
    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(self.backend.clone())
    }

    pub fn recipes(&self) -> RecipeFlow {
        RecipeFlow::new(self.recipes.clone())
    }

    pub fn places(&self) -> NearbyPlacesFlow {
        NearbyPlacesFlow::new(self.places.clone())
    }

    pub fn favorites(&self) -> FavoritesFlow {
        FavoritesFlow::new(self.backend.clone())
    }
}
