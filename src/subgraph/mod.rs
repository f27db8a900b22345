use crate::types::Market;
use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{Value, json};

/// Upper bound on markets per request. A shorter page ends the result set.
pub const PAGE_SIZE: usize = 1000;

pub const MARKETS_QUERY: &str = r#"
query GetMarkets($lastTimestamp: BigInt!) {
    markets(
        first: 1000
        orderBy: createdTimestamp
        orderDirection: asc
        where: { createdTimestamp_gt: $lastTimestamp }
    ) {
        id
        createdTimestamp
        outputToken { id name symbol }
        sToken { id name symbol }
        vToken { id name symbol }
    }
}
"#;

/// Request body for the page of markets created after `last_timestamp`.
pub fn markets_request(last_timestamp: u64) -> Value {
    json!({
        "query": MARKETS_QUERY,
        "variables": {
            "lastTimestamp": last_timestamp
        }
    })
}

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait GraphTransport: Send + Sync {
    async fn post(&self, url: &str, body: &Value) -> Result<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphTransport for HttpTransport {
    async fn post(&self, url: &str, body: &Value) -> Result<RawResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// What a successful HTTP exchange carried.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    Markets(Vec<Market>),
    Errors(Vec<String>),
    NoData,
}

impl PageResponse {
    /// Classify a GraphQL response body. Errors win over data when both are present.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;

        if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(|e| match e.get("message").and_then(|m| m.as_str()) {
                        Some(message) => message.to_string(),
                        None => e.to_string(),
                    })
                    .collect();
                return Ok(PageResponse::Errors(messages));
            }
        }

        match value.get("data").and_then(|d| d.get("markets")) {
            Some(markets) if !markets.is_null() => {
                let markets: Vec<Market> = serde_json::from_value(markets.clone())?;
                Ok(PageResponse::Markets(markets))
            }
            _ => Ok(PageResponse::NoData),
        }
    }
}
