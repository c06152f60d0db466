use log::debug;
use serde::Deserialize;

use crate::decoders::Decoder;
use crate::error::ClientError;
use crate::model::{AuthResult, AuthStatus};

pub struct AuthDecoder;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    status: String,
    message: Option<String>,
}

impl Decoder for AuthDecoder {
    type Output = AuthResult;

    fn decode(&self, body: &str) -> Result<AuthResult, ClientError> {
        let response: AuthResponse = serde_json::from_str(body)?;
        debug!("auth response status={:?}", response.status);

        // Case-sensitive on purpose: "Success" is not a success
        let status = if response.status == "success" {
            AuthStatus::Success
        } else {
            AuthStatus::Error
        };

        Ok(AuthResult {
            status,
            message: response.message.filter(|m| !m.is_empty()),
        })
    }
}
