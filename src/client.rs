use log::{error, info};
use reqwest::blocking::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::Deserialize;
use serde_json::Value as Json;
use std::time::Duration;

use crate::configuration::Configuration;
use crate::error::{ApiError, Error};
use crate::transport::Transport;
use crate::value::WireMap;

/// HTTP client for communicating with the Telegram API
pub struct Client {
    client: ReqwestClient,
    base_url: String,
}

/// Response envelope returned by every Bot API method
#[derive(Debug, Deserialize)]
pub struct Response {
    /// Whether the request was successful
    pub ok: bool,
    /// Error description when `ok` is false
    pub description: Option<String>,
    /// Error code when `ok` is false
    pub error_code: Option<i64>,
    /// Method result when `ok` is true
    pub result: Option<Json>,
}

impl Client {
    /// Create a new Telegram client from a validated configuration
    pub fn new(config: &Configuration) -> Result<Self, Error> {
        config.validate()?;
        let token = config.bot_token()?;

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.client_options().timeout))
            .build()?;

        Ok(Client {
            client,
            base_url: format!("{}/bot{}", config.api_url(), token),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Turn an HTTP response into the method result or a structured error
    fn handle_response(&self, method: &str, response: ReqwestResponse) -> Result<Json, Error> {
        let status = response.status();
        info!("{}: received response with status code {}", method, status);

        // Telegram sends a JSON envelope for API errors too, so the body is
        // parsed before the status is looked at.
        let body = response.text()?;
        let envelope: Response = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("{}: failed to parse API response: {}", method, e);
                return Err(Error::api(
                    i64::from(status.as_u16()),
                    format!("Failed to parse API response (status {}): {}", status, body),
                ));
            }
        };

        if !envelope.ok {
            let err = ApiError::new(
                envelope
                    .error_code
                    .unwrap_or_else(|| i64::from(status.as_u16())),
                envelope
                    .description
                    .unwrap_or_else(|| "Unknown API error".to_string()),
            );
            error!("{}: Telegram API returned error: {}", method, err);
            return Err(Error::Api(err));
        }

        Ok(envelope.result.unwrap_or(Json::Null))
    }
}

impl Transport for Client {
    fn invoke(&self, method: &str, params: &WireMap) -> Result<Json, Error> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .map_err(|e| {
                error!("{}: HTTP request failed: {}", method, e);
                Error::Http(e)
            })?;

        self.handle_response(method, response)
    }
}
