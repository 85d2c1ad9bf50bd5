//! DCIM operations for MockNetBoxClient
//!
//! Handles sites

use super::helpers;
use super::MockNetBoxClient;
use crate::endpoints;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn query_sites(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
    let sites = client.sites.lock().unwrap();
    Ok(sites
        .values()
        .filter(|site| helpers::matches(filters, "name", &site.name) && helpers::matches(filters, "slug", &site.slug))
        .cloned()
        .collect())
}

pub async fn create_site(client: &MockNetBoxClient, request: &CreateSiteRequest) -> Result<Site, NetBoxError> {
    client.record_create(endpoints::SITES, &request.name)?;

    let tenant = request.tenant.map(|id| helpers::nested_tenant(client, id));
    let tags = helpers::nested_tags(client, &request.tags);
    let id = client.next_id();
    let site = Site {
        id,
        url: format!("{}/api/dcim/sites/{}/", client.base_url, id),
        display: request.name.clone(),
        name: request.name.clone(),
        slug: request.slug.clone(),
        status: helpers::choice(request.status.unwrap_or(SiteStatus::Active)),
        tenant,
        description: request.description.clone().unwrap_or_default(),
        tags,
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    client.sites.lock().unwrap().insert(id, site.clone());
    Ok(site)
}
