use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use scraper::Html;
use serde::Serialize;

/// Outcome of a lookup that may legitimately find nothing.
///
/// Keeps "no results" apart from "the request failed", which a bare
/// `Option` or empty `Vec` would conflate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(String),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(reason) => Lookup::Failed(reason.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(reason) => Lookup::Failed(reason),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Lookup::NotFound, Lookup::Found)
    }
}

/// Whether the backend accepted a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthStatus {
    Success,
    Error,
}

/// Decoded backend reply to a login, createLogin or resetPassword request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    pub status: AuthStatus,
    pub message: Option<String>,
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        self.status == AuthStatus::Success
    }
}

/// One row of the backend's favorites table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub fields: BTreeMap<String, String>,
}

impl Favorite {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn recipe_id(&self) -> Option<&str> {
        ["recipe_id", "recipeId", "recipe"]
            .iter()
            .find_map(|key| self.get(key))
    }
}

/// Raw search hit before its ingredient count is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

/// Lightweight list item shown in search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub ingredient_count: usize,
}

impl RecipeSummary {
    pub fn from_hit(hit: SearchHit, ingredient_count: usize) -> Self {
        RecipeSummary {
            id: hit.id,
            title: hit.title,
            image_url: hit.image_url,
            ingredient_count,
        }
    }
}

/// Core recipe detail: title, image, ingredients and numbered steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeInfo {
    pub title: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
    /// Steps formatted as `"<number>. <step>"`
    pub instructions: Vec<String>,
}

impl RecipeInfo {
    pub fn total_ingredients(&self) -> usize {
        self.ingredients.len()
    }
}

/// Nutrition facts widget markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutritionLabel {
    pub html: String,
}

impl NutritionLabel {
    /// Visible text of the label, one non-empty fragment per line.
    pub fn plain_text(&self) -> String {
        let fragment = Html::parse_fragment(&self.html);
        fragment
            .root_element()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|el| matches!(el.name(), "script" | "style"));
                (!hidden).then(|| text.trim())
            })
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Price breakdown widget image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl PriceBreakdown {
    /// Inline `data:` URI for hosts that render images from strings.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Everything the detail screen shows for one recipe.
///
/// The parts come from independent requests and may fail independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub info: Lookup<RecipeInfo>,
    pub nutrition_label: Lookup<NutritionLabel>,
    pub price_breakdown: Lookup<PriceBreakdown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

/// A store returned by the nearby search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceResult {
    pub name: String,
    pub vicinity: String,
    pub location: Option<Coordinates>,
}

/// A pin for an external map surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub position: Coordinates,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn test_lookup_map_keeps_failure() {
        let failed: Lookup<i32> = Lookup::Failed("boom".to_string());
        assert_eq!(failed.map(|v| v * 2), Lookup::Failed("boom".to_string()));
        assert_eq!(Lookup::Found(2).map(|v| v * 2), Lookup::Found(4));
    }

    #[test]
    fn test_favorite_recipe_id_aliases() {
        let mut favorite = Favorite::default();
        favorite
            .fields
            .insert("recipeId".to_string(), "715538".to_string());
        assert_eq!(favorite.recipe_id(), Some("715538"));
        assert_eq!(favorite.get("username"), None);
    }

    #[test]
    fn test_nutrition_label_plain_text() {
        let label = NutritionLabel {
            html: r#"
                <style>.spoonacular-nutrition-visualization { color: red; }</style>
                <div class="spoonacular-nutrition-visualization">
                    <div>Calories <b>584</b></div>
                    <div>Fat <b>20g</b></div>
                </div>
                <script>spoonacularRender();</script>
            "#
            .to_string(),
        };

        let text = label.plain_text();
        assert!(text.contains("Calories"));
        assert!(text.contains("584"));
        assert!(text.contains("20g"));
        assert!(!text.contains("spoonacularRender"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_price_breakdown_data_uri() {
        let image = PriceBreakdown {
            content_type: "image/png".to_string(),
            bytes: b"png".to_vec(),
        };
        assert_eq!(image.data_uri(), "data:image/png;base64,cG5n");
    }
}
