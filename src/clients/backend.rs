use log::debug;

use crate::config::AppConfig;
use crate::decoders::{AuthDecoder, Decoder, FavoritesDecoder};
use crate::error::ClientError;
use crate::fetchers::RequestFetcher;
use crate::model::{AuthResult, Favorite};

/// Client for the owned backend script.
///
/// Every POST carries a `request` field naming the operation; GETs carry it
/// as a query parameter.
#[derive(Debug, Clone)]
pub struct BackendClient {
    fetcher: RequestFetcher,
    url: String,
}

impl BackendClient {
    pub fn new(fetcher: RequestFetcher, config: &AppConfig) -> Self {
        BackendClient {
            fetcher,
            url: config.backend.url.clone(),
        }
    }

    /// POST `request=<request>` plus `fields` as a form and decode the status.
    pub async fn submit(
        &self,
        request: &str,
        fields: &[(&str, &str)],
    ) -> Result<AuthResult, ClientError> {
        debug!("backend request={}", request);

        let mut form: Vec<(&str, &str)> = Vec::with_capacity(fields.len() + 1);
        form.push(("request", request));
        form.extend_from_slice(fields);

        let body = self.fetcher.post_form(&self.url, &form).await?;
        AuthDecoder.decode(&body)
    }

    pub async fn favorites(&self, username: &str) -> Result<Option<Vec<Favorite>>, ClientError> {
        let query = [("request", "getFavorites"), ("username", username)];
        let body = self.fetcher.get_text(&self.url, &query).await?;
        FavoritesDecoder.decode(&body)
    }
}
