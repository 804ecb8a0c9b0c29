//! Client for the homework status endpoint.

use async_trait::async_trait;
use common::config::Config;
use common::error::PollError;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

/// Source of raw status answers. The body is returned unvalidated.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value, PollError>;
}

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_header: format!("OAuth {}", config.practicum_token),
        }
    }
}

#[async_trait]
impl StatusApi for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value, PollError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?;

        check_status(resp.status(), &self.endpoint)?;

        resp.json::<Value>()
            .await
            .map_err(|e| PollError::Unexpected(e.to_string()))
    }
}

/// Map a non-200 answer to its failure.
pub fn check_status(status: StatusCode, endpoint: &str) -> Result<(), PollError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::BAD_REQUEST => Err(PollError::BadDateFormat),
        StatusCode::UNAUTHORIZED => Err(PollError::Unauthorized),
        StatusCode::NOT_FOUND => Err(PollError::EndpointUnavailable(endpoint.to_string())),
        other => Err(PollError::UnexpectedStatus(other.as_u16())),
    }
}
