//! Common utilities for NetBox API client
//!
//! Provides shared functionality used across all API modules.

pub mod query;

use crate::error::NetBoxError;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Paginated response wrapper from NetBox API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// HTTP client wrapper with authentication
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Fetch all pages of a paginated response
    pub async fn fetch_all_pages<T: for<'de> Deserialize<'de>>(
        &self,
        mut url: String,
    ) -> Result<Vec<T>, NetBoxError> {
        let mut all_results = Vec::new();

        loop {
            debug!("Fetching page: {}", url);

            let response = self.client
                .get(&url)
                .header("Authorization", self.auth_header())
                .header("Accept", "application/json")
                .send()
                .await?;

            let response = Self::check_status("GET", &url, response).await?;
            let page: PaginatedResponse<T> = Self::decode(&url, response).await?;
            all_results.extend(page.results);

            match page.next {
                Some(next_url) => {
                    url = self.build_url(&next_url);
                }
                None => break,
            }
        }

        Ok(all_results)
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<T, NetBoxError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::check_status("GET", path, response).await?;
        Self::decode(path, response).await
    }

    /// Make a POST request
    pub async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, NetBoxError> {
        let url = self.build_url(path);
        debug!("POST {} with body: {}", url, body);

        let response = self.client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let response = Self::check_status("POST", path, response).await?;
        Self::decode(path, response).await
    }

    /// Build query string from filters
    pub fn build_query_string(&self, filters: &[(&str, &str)]) -> String {
        if filters.is_empty() {
            String::new()
        } else {
            filters
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&")
        }
    }

    /// Map non-success statuses onto [`NetBoxError`] variants
    async fn check_status(
        method: &str,
        path: &str,
        response: Response,
    ) -> Result<Response, NetBoxError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NetBoxError::Authentication(
                format!("{} {} rejected: {} - {}", method, path, status, body),
            ),
            StatusCode::NOT_FOUND if method == "GET" => {
                NetBoxError::NotFound(format!("Resource not found: {} - {}", path, body))
            }
            _ => NetBoxError::api(
                status.as_u16(),
                format!("{} {} failed: {}", method, path, body),
            ),
        })
    }

    /// Decode a response body, keeping a snippet of it on failure
    async fn decode<T: for<'de> Deserialize<'de>>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, NetBoxError> {
        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| NetBoxError::Decode {
            endpoint: endpoint.to_string(),
            message: format!(
                "{} - Response (first 500 chars): {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new(Client::new(), "http://netbox:8000/".to_string(), "secret".to_string())
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(http().base_url(), "http://netbox:8000");
        assert_eq!(http().build_url("/api/status/"), "http://netbox:8000/api/status/");
    }

    #[test]
    fn test_absolute_next_url_kept() {
        let next = "http://netbox:8000/api/ipam/vlans/?limit=50&offset=50";
        assert_eq!(http().build_url(next), next);
    }

    #[test]
    fn test_query_string_encodes_values() {
        let query = http().build_query_string(&[("address", "10.0.0.1/32"), ("name", "Araz Cloud")]);
        assert_eq!(query, "address=10.0.0.1%2F32&name=Araz%20Cloud");
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", http());
        assert!(!rendered.contains("secret"));
    }
}
