use html_escape::decode_html_entities;
use log::debug;
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::decoders::Decoder;
use crate::error::ClientError;
use crate::model::{RecipeInfo, SearchHit};

/// Decodes `recipes/complexSearch` into search hits
pub struct SearchDecoder;

/// Decodes `recipes/{id}/information` into an ingredient count only
pub struct IngredientCountDecoder;

/// Decodes `recipes/{id}/information` into the full core detail
pub struct RecipeInfoDecoder;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeId {
    Number(u64),
    Text(String),
}

impl RecipeId {
    fn into_string(self) -> String {
        match self {
            RecipeId::Number(n) => n.to_string(),
            RecipeId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: RecipeId,
    title: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IngredientsOnly {
    #[serde(rename = "extendedIngredients")]
    extended_ingredients: Vec<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct InformationResponse {
    title: Option<String>,
    image: Option<String>,
    #[serde(rename = "extendedIngredients")]
    extended_ingredients: Option<Vec<ExtendedIngredient>>,
    #[serde(rename = "analyzedInstructions")]
    analyzed_instructions: Option<Vec<InstructionBlock>>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    original: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstructionBlock {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    number: Option<u32>,
    step: Option<String>,
}

fn decode_html_symbols(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}

impl Decoder for SearchDecoder {
    /// `None` when the search matched nothing
    type Output = Option<Vec<SearchHit>>;

    fn decode(&self, body: &str) -> Result<Self::Output, ClientError> {
        let response: SearchResponse = serde_json::from_str(body)?;

        let hits: Vec<SearchHit> = response
            .results
            .into_iter()
            .map(|result| SearchHit {
                id: result.id.into_string(),
                title: decode_html_symbols(&result.title.unwrap_or_default()),
                image_url: result.image.unwrap_or_default(),
            })
            .collect();

        debug!("search decoded {} hits", hits.len());
        Ok((!hits.is_empty()).then_some(hits))
    }
}

impl Decoder for IngredientCountDecoder {
    type Output = usize;

    fn decode(&self, body: &str) -> Result<usize, ClientError> {
        let response: IngredientsOnly = serde_json::from_str(body)?;
        Ok(response.extended_ingredients.len())
    }
}

impl Decoder for RecipeInfoDecoder {
    type Output = RecipeInfo;

    fn decode(&self, body: &str) -> Result<RecipeInfo, ClientError> {
        let response: InformationResponse = serde_json::from_str(body)?;

        let ingredients: Vec<String> = response
            .extended_ingredients
            .ok_or_else(|| ClientError::DecodeError("missing extendedIngredients".to_string()))?
            .into_iter()
            .filter_map(|i| i.original)
            .map(|original| decode_html_symbols(&original))
            .filter(|original| !original.is_empty())
            .collect();
        if ingredients.is_empty() {
            return Err(ClientError::DecodeError(
                "recipe has no ingredients".to_string(),
            ));
        }

        // Only the first instruction block is shown
        let block = response
            .analyzed_instructions
            .and_then(|blocks| blocks.into_iter().next())
            .ok_or_else(|| ClientError::DecodeError("recipe has no instructions".to_string()))?;
        if block.steps.is_empty() {
            return Err(ClientError::DecodeError(
                "recipe instructions have no steps".to_string(),
            ));
        }

        let instructions = block
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let number = step.number.unwrap_or(index as u32 + 1);
                format!("{}. {}", number, step.step.unwrap_or_default().trim())
            })
            .collect();

        Ok(RecipeInfo {
            title: decode_html_symbols(&response.title.unwrap_or_default()),
            image_url: response.image.unwrap_or_default(),
            ingredients,
            instructions,
        })
    }
}
