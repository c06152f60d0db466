use log::debug;

use crate::clients::join_segments;
use crate::config::AppConfig;
use crate::decoders::{Decoder, IngredientCountDecoder, RecipeInfoDecoder, SearchDecoder};
use crate::error::ClientError;
use crate::fetchers::RequestFetcher;
use crate::model::{NutritionLabel, PriceBreakdown, RecipeInfo, SearchHit};

/// Client for the third-party recipe search/detail API
#[derive(Debug, Clone)]
pub struct RecipeApiClient {
    fetcher: RequestFetcher,
    base_url: String,
    api_key: Option<String>,
    search_limit: u32,
    price_breakdown_mode: u8,
}

impl RecipeApiClient {
    pub fn new(fetcher: RequestFetcher, config: &AppConfig) -> Self {
        RecipeApiClient {
            fetcher,
            base_url: config.recipes.base_url.clone(),
            api_key: config.recipes_api_key(),
            search_limit: config.recipes.search_limit,
            price_breakdown_mode: config.recipes.price_breakdown_mode,
        }
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit as usize
    }

    fn api_key(&self) -> Result<&str, ClientError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ClientError::MissingApiKey("the recipe API"))
    }

    /// `None` when nothing matched
    pub async fn search(&self, query: &str) -> Result<Option<Vec<SearchHit>>, ClientError> {
        let api_key = self.api_key()?;
        let url = join_segments(&self.base_url, &["recipes", "complexSearch"])?;
        let number = self.search_limit.to_string();

        debug!("searching recipes for {:?}", query);
        let body = self
            .fetcher
            .get_text(
                &url,
                &[("query", query), ("number", number.as_str()), ("apiKey", api_key)],
            )
            .await?;
        SearchDecoder.decode(&body)
    }

    pub async fn ingredient_count(&self, recipe_id: &str) -> Result<usize, ClientError> {
        let body = self.information_body(recipe_id).await?;
        IngredientCountDecoder.decode(&body)
    }

    pub async fn information(&self, recipe_id: &str) -> Result<RecipeInfo, ClientError> {
        let body = self.information_body(recipe_id).await?;
        RecipeInfoDecoder.decode(&body)
    }

    async fn information_body(&self, recipe_id: &str) -> Result<String, ClientError> {
        let api_key = self.api_key()?;
        let url = join_segments(&self.base_url, &["recipes", recipe_id, "information"])?;
        self.fetcher.get_text(&url, &[("apiKey", api_key)]).await
    }

    /// `None` when the API sends back an empty label
    pub async fn nutrition_label(
        &self,
        recipe_id: &str,
    ) -> Result<Option<NutritionLabel>, ClientError> {
        let api_key = self.api_key()?;
        let url = join_segments(&self.base_url, &["recipes", recipe_id, "nutritionLabel"])?;
        let html = self.fetcher.get_text(&url, &[("apiKey", api_key)]).await?;

        Ok((!html.trim().is_empty()).then_some(NutritionLabel { html }))
    }

    /// `None` when the API sends back no image data
    pub async fn price_breakdown(
        &self,
        recipe_id: &str,
    ) -> Result<Option<PriceBreakdown>, ClientError> {
        let api_key = self.api_key()?;
        let url = join_segments(
            &self.base_url,
            &["recipes", recipe_id, "priceBreakdownWidget.png"],
        )?;
        let mode = self.price_breakdown_mode.to_string();

        let (bytes, content_type) = self
            .fetcher
            .get_bytes(&url, &[("mode", mode.as_str()), ("apiKey", api_key)], "image/png")
            .await?;

        Ok((!bytes.is_empty()).then(|| PriceBreakdown {
            content_type: content_type.unwrap_or_else(|| "image/png".to_string()),
            bytes,
        }))
    }
}
