use crate::error::ClientError;

mod auth;
mod favorites;
mod places;
mod recipes;

pub use self::auth::AuthDecoder;
pub use self::favorites::FavoritesDecoder;
pub use self::places::PlacesDecoder;
pub use self::recipes::{IngredientCountDecoder, RecipeInfoDecoder, SearchDecoder};

/// Turns a response body into a typed record for one endpoint shape.
///
/// Optional fields fall back to empty values; anything the record cannot
/// exist without is a `ClientError::DecodeError`. No partial record is
/// ever returned.
pub trait Decoder {
    type Output;

    fn decode(&self, body: &str) -> Result<Self::Output, ClientError>;
}
