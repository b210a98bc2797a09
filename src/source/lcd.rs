//! LCD REST client
//!
//! Queries `{endpoint}/oracle/validators/{address}/miss` on each configured
//! endpoint in order. The first HTTP 200 answers the query; transport
//! failures and other statuses fall through to the next endpoint.

use super::traits::MetricSource;
use crate::domain::{miss_query, MissReading};
use crate::error::SourceError;
use crate::http;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct MissResponse {
    miss_counter: MissCounter,
}

// Nodes serialize the counter either as a number or as a decimal string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MissCounter {
    Number(u64),
    Text(String),
}

/// Parse the `miss_counter` field of an LCD response body
pub fn parse_miss_counter(body: &str) -> Result<u64, String> {
    let response: MissResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;
    match response.miss_counter {
        MissCounter::Number(n) => Ok(n),
        MissCounter::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("miss_counter is not an unsigned integer: {:?}", s)),
    }
}

/// Miss counter client over one or more LCD endpoints
pub struct LcdClient {
    endpoints: Vec<String>,
    client: Client,
}

impl LcdClient {
    /// Create a client over `endpoints`, tried in order
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Result<Self, SourceError> {
        if endpoints.is_empty() {
            return Err(SourceError::NoEndpoints);
        }

        let client = http::client(timeout).map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self { endpoints, client })
    }

    /// Configured endpoints
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

impl MetricSource for LcdClient {
    fn miss_count(&self, address: &str) -> Result<MissReading, SourceError> {
        let query = miss_query(address);
        let mut last_error = String::new();

        for endpoint in &self.endpoints {
            let url = format!("{}{}", endpoint.trim_end_matches('/'), query);

            let response = match self.client.get(&url).send() {
                Ok(response) => response,
                Err(e) => {
                    log::debug!("Endpoint: {}", endpoint);
                    log::debug!("Request failed: {}", e);
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            if status != StatusCode::OK {
                log::debug!("Endpoint: {}", endpoint);
                log::debug!("Status Code: {}", status.as_u16());
                last_error = format!("status {}", status.as_u16());
                continue;
            }

            let body = match response.text() {
                Ok(body) => body,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let misses = parse_miss_counter(&body).map_err(|message| SourceError::Malformed {
                endpoint: endpoint.clone(),
                message,
            })?;

            return Ok(MissReading::new(address, misses, endpoint.clone()));
        }

        Err(SourceError::AllEndpointsFailed {
            address: address.to_string(),
            attempted: self.endpoints.len(),
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_counter() {
        assert_eq!(parse_miss_counter(r#"{"miss_counter": 17}"#), Ok(17));
    }

    #[test]
    fn test_parse_string_counter() {
        assert_eq!(parse_miss_counter(r#"{"miss_counter": "42"}"#), Ok(42));
    }

    #[test]
    fn test_parse_missing_field() {
        assert!(parse_miss_counter(r#"{"height": "10"}"#).is_err());
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(parse_miss_counter(r#"{"miss_counter": "lots"}"#).is_err());
        assert!(parse_miss_counter(r#"{"miss_counter": -3}"#).is_err());
    }

    #[test]
    fn test_parse_not_json() {
        assert!(parse_miss_counter("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn test_endpoints_keep_order() {
        let endpoints = vec![
            "https://b.example.org".to_string(),
            "https://a.example.org".to_string(),
        ];
        let client = LcdClient::new(endpoints.clone(), http::DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.endpoints(), endpoints.as_slice());
    }

    #[test]
    fn test_no_endpoints() {
        let result = LcdClient::new(Vec::new(), http::DEFAULT_TIMEOUT);
        assert!(matches!(result, Err(SourceError::NoEndpoints)));
    }
}
