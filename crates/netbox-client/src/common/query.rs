//! Query and create helpers shared by every NetBox endpoint
//!
//! Endpoints are given without the `/api/` prefix, e.g. `"ipam/vlans"`.

use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Query resources with optional filtering and pagination
pub async fn query_resources<T: for<'de> Deserialize<'de>>(
    http: &HttpClient,
    endpoint: &str,
    filters: &[(&str, &str)],
    fetch_all: bool,
) -> Result<Vec<T>, NetBoxError> {
    let mut url = format!("/api/{}/", endpoint);

    if !filters.is_empty() {
        let query_string = http.build_query_string(filters);
        url = format!("{}?{}", url, query_string);
    }

    debug!("Querying {} with filters: {:?}", endpoint, filters);

    if fetch_all {
        http.fetch_all_pages(http.build_url(&url)).await
    } else {
        let response: PaginatedResponse<T> = http.get(&url).await?;
        Ok(response.results)
    }
}

/// Create a resource from a typed request body
pub async fn create_resource<Req, T>(
    http: &HttpClient,
    endpoint: &str,
    request: &Req,
) -> Result<T, NetBoxError>
where
    Req: Serialize,
    T: for<'de> Deserialize<'de>,
{
    let body = serde_json::to_value(request)?;
    http.post(&format!("/api/{}/", endpoint), &body).await
}
