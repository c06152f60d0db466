use log::info;

use crate::clients::BackendClient;
use crate::error::{ClientError, Field, ValidationError};
use crate::flows::into_lookup;
use crate::model::{Favorite, Lookup};

/// Saved recipes for one user
#[derive(Debug, Clone)]
pub struct FavoritesFlow {
    backend: BackendClient,
}

impl FavoritesFlow {
    pub fn new(backend: BackendClient) -> Self {
        FavoritesFlow { backend }
    }

    pub async fn favorites(&self, username: &str) -> Lookup<Vec<Favorite>> {
        into_lookup(self.try_favorites(username).await, "favorites lookup")
    }

    pub async fn try_favorites(
        &self,
        username: &str,
    ) -> Result<Option<Vec<Favorite>>, ClientError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingField(Field::Username).into());
        }

        let favorites = self.backend.favorites(username).await?;
        info!(
            "{} favorites for {}",
            favorites.as_ref().map_or(0, Vec::len),
            username
        );
        Ok(favorites)
    }
}
