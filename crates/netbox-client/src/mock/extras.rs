//! Extras operations for MockNetBoxClient
//!
//! Handles tags

use super::helpers;
use super::MockNetBoxClient;
use crate::endpoints;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn query_tags(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Tag>, NetBoxError> {
    let tags = client.tags.lock().unwrap();
    Ok(tags
        .values()
        .filter(|tag| helpers::matches(filters, "name", &tag.name) && helpers::matches(filters, "slug", &tag.slug))
        .cloned()
        .collect())
}

pub async fn create_tag(client: &MockNetBoxClient, request: &CreateTagRequest) -> Result<Tag, NetBoxError> {
    client.record_create(endpoints::TAGS, &request.name)?;

    let id = client.next_id();
    let tag = Tag {
        id,
        url: format!("{}/api/extras/tags/{}/", client.base_url, id),
        display: request.name.clone(),
        name: request.name.clone(),
        slug: request.slug.clone(),
        color: request.color.clone().unwrap_or_else(|| "9e9e9e".to_string()),
        description: request.description.clone().unwrap_or_default(),
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    client.tags.lock().unwrap().insert(id, tag.clone());
    Ok(tag)
}
