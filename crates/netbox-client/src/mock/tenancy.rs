//! Tenancy operations for MockNetBoxClient
//!
//! Handles tenants and tenant groups

use super::helpers;
use super::MockNetBoxClient;
use crate::endpoints;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn query_tenant_groups(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<TenantGroup>, NetBoxError> {
    let tenant_groups = client.tenant_groups.lock().unwrap();
    Ok(tenant_groups
        .values()
        .filter(|group| helpers::matches(filters, "name", &group.name) && helpers::matches(filters, "slug", &group.slug))
        .cloned()
        .collect())
}

pub async fn create_tenant_group(client: &MockNetBoxClient, request: &CreateTenantGroupRequest) -> Result<TenantGroup, NetBoxError> {
    client.record_create(endpoints::TENANT_GROUPS, &request.name)?;

    let parent = request.parent.map(|id| helpers::nested_tenant_group(client, id));
    let tags = helpers::nested_tags(client, &request.tags);
    let id = client.next_id();
    let tenant_group = TenantGroup {
        id,
        url: format!("{}/api/tenancy/tenant-groups/{}/", client.base_url, id),
        display: request.name.clone(),
        name: request.name.clone(),
        slug: request.slug.clone(),
        parent,
        description: request.description.clone().unwrap_or_default(),
        tags,
        tenant_count: 0,
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    client.tenant_groups.lock().unwrap().insert(id, tenant_group.clone());
    Ok(tenant_group)
}

pub async fn query_tenants(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Tenant>, NetBoxError> {
    let tenants = client.tenants.lock().unwrap();
    Ok(tenants
        .values()
        .filter(|tenant| helpers::matches(filters, "name", &tenant.name) && helpers::matches(filters, "slug", &tenant.slug))
        .cloned()
        .collect())
}

pub async fn create_tenant(client: &MockNetBoxClient, request: &CreateTenantRequest) -> Result<Tenant, NetBoxError> {
    client.record_create(endpoints::TENANTS, &request.name)?;

    let group = request.group.map(|id| helpers::nested_tenant_group(client, id));
    let tags = helpers::nested_tags(client, &request.tags);
    let id = client.next_id();
    let tenant = Tenant {
        id,
        url: format!("{}/api/tenancy/tenants/{}/", client.base_url, id),
        display: request.name.clone(),
        name: request.name.clone(),
        slug: request.slug.clone(),
        group,
        description: request.description.clone().unwrap_or_default(),
        tags,
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    if let Some(group_id) = request.group {
        if let Some(group) = client.tenant_groups.lock().unwrap().get_mut(&group_id) {
            group.tenant_count += 1;
        }
    }

    client.tenants.lock().unwrap().insert(id, tenant.clone());
    Ok(tenant)
}
