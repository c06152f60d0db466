use log::{debug, info};

use crate::clients::RecipeApiClient;
use crate::error::{ClientError, ValidationError};
use crate::flows::into_lookup;
use crate::model::{
    Lookup, NutritionLabel, PriceBreakdown, RecipeDetail, RecipeInfo, RecipeSummary,
};

/// Receives detail parts as they resolve.
///
/// Every method has a no-op default so a screen only implements what it
/// shows. Updates are skipped once `is_alive` returns false.
pub trait DetailRenderer {
    fn is_alive(&self) -> bool {
        true
    }

    fn render_info(&self, _info: &Lookup<RecipeInfo>) {}

    fn render_nutrition_label(&self, _label: &Lookup<NutritionLabel>) {}

    fn render_price_breakdown(&self, _image: &Lookup<PriceBreakdown>) {}
}

/// Renders nothing
impl DetailRenderer for () {}

/// Recipe search and detail
#[derive(Debug, Clone)]
pub struct RecipeFlow {
    api: RecipeApiClient,
}

impl RecipeFlow {
    pub fn new(api: RecipeApiClient) -> Self {
        RecipeFlow { api }
    }

    /// Search by keyword, least ingredients first.
    pub async fn search(&self, query: &str) -> Lookup<Vec<RecipeSummary>> {
        into_lookup(self.try_search(query).await, "recipe search")
    }

    /// Like [`RecipeFlow::search`] but keeps the error.
    ///
    /// Each hit costs one extra request for its ingredient count. Those run
    /// in order and the first failure fails the whole search.
    pub async fn try_search(
        &self,
        query: &str,
    ) -> Result<Option<Vec<RecipeSummary>>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }

        let Some(mut hits) = self.api.search(query).await? else {
            info!("no recipes matched {:?}", query);
            return Ok(None);
        };
        hits.truncate(self.api.search_limit());

        let mut summaries = Vec::with_capacity(hits.len());
        for hit in hits {
            let count = self.api.ingredient_count(&hit.id).await?;
            debug!("recipe {} has {} ingredients", hit.id, count);
            summaries.push(RecipeSummary::from_hit(hit, count));
        }

        // Stable: equal counts keep the API's order
        summaries.sort_by_key(|summary| summary.ingredient_count);

        info!("{} recipes matched {:?}", summaries.len(), query);
        Ok((!summaries.is_empty()).then_some(summaries))
    }

    /// Fetch every detail part and return them together.
    pub async fn detail(&self, recipe_id: &str) -> RecipeDetail {
        self.detail_with(recipe_id, &()).await
    }

    /// Fetch the detail parts concurrently, handing each to `renderer` as soon
    /// as it resolves. A failed part never holds back the others.
    pub async fn detail_with<R>(&self, recipe_id: &str, renderer: &R) -> RecipeDetail
    where
        R: DetailRenderer + ?Sized,
    {
        let info = async {
            let info = into_lookup(
                self.api.information(recipe_id).await.map(Some),
                "recipe information",
            );
            if renderer.is_alive() {
                renderer.render_info(&info);
            }
            info
        };

        let nutrition_label = async {
            let label = into_lookup(
                self.api.nutrition_label(recipe_id).await,
                "nutrition label",
            );
            if renderer.is_alive() {
                renderer.render_nutrition_label(&label);
            }
            label
        };

        let price_breakdown = async {
            let image = into_lookup(
                self.api.price_breakdown(recipe_id).await,
                "price breakdown",
            );
            if renderer.is_alive() {
                renderer.render_price_breakdown(&image);
            }
            image
        };

        let (info, nutrition_label, price_breakdown) =
            tokio::join!(info, nutrition_label, price_breakdown);

        RecipeDetail {
            id: recipe_id.to_string(),
            info,
            nutrition_label,
            price_breakdown,
        }
    }
}
