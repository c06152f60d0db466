use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("BrokeButHungry/", env!("CARGO_PKG_VERSION"));

/// Executes HTTP requests and hands back the body of HTTP 200 responses.
///
/// Anything other than a 200 is an error. Form and query values always go
/// through reqwest's URL encoder, never through string concatenation.
#[derive(Debug, Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    pub async fn get_text<Q>(&self, url: &str, query: &Q) -> Result<String, ClientError>
    where
        Q: Serialize + ?Sized,
    {
        let url = parse_url(url)?;
        let response = self.send(self.client.get(url).query(query)).await?;
        Ok(response.text().await?)
    }

    pub async fn get_bytes<Q>(
        &self,
        url: &str,
        query: &Q,
        accept: &str,
    ) -> Result<(Vec<u8>, Option<String>), ClientError>
    where
        Q: Serialize + ?Sized,
    {
        let url = parse_url(url)?;
        let request = self.client.get(url).query(query).header(ACCEPT, accept);
        let response = self.send(request).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok((bytes.to_vec(), content_type))
    }

    /// POST an `application/x-www-form-urlencoded` body
    pub async fn post_form<F>(&self, url: &str, fields: &F) -> Result<String, ClientError>
    where
        F: Serialize + ?Sized,
    {
        let url = parse_url(url)?;
        let response = self.send(self.client.post(url).form(fields)).await?;
        Ok(response.text().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ClientError::from(e)
        })?;

        debug!("{} {}", response.status(), response.url().path());

        // Dropping the response releases the connection
        if response.status() != StatusCode::OK {
            let status = response.status();
            warn!("Request to {} returned {}", response.url().path(), status);
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        Ok(response)
    }
}

fn parse_url(url: &str) -> Result<Url, ClientError> {
    Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))
}
