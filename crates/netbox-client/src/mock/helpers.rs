//! Helper functions for filtering and for creating nested NetBox model types

use super::MockNetBoxClient;
use crate::models::*;

/// Value of `key` in a filter list, if present
pub fn filter_value<'a>(filters: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    filters.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// True when `actual` satisfies the optional `key` filter
pub fn matches(filters: &[(&str, &str)], key: &str, actual: &str) -> bool {
    filter_value(filters, key).is_none_or(|wanted| wanted == actual)
}

/// Current time in the shape NetBox models store it
pub fn now() -> Option<chrono::DateTime<chrono::Utc>> {
    Some(chrono::Utc::now())
}

/// Nested tag references for `ids`; unknown ids get a placeholder name
pub fn nested_tags(client: &MockNetBoxClient, ids: &[u64]) -> Vec<NestedTag> {
    let tags = client.tags.lock().unwrap();
    ids.iter()
        .map(|id| match tags.get(id) {
            Some(tag) => NestedTag {
                id: tag.id,
                url: tag.url.clone(),
                display: tag.name.clone(),
                name: tag.name.clone(),
                slug: tag.slug.clone(),
            },
            None => NestedTag {
                id: *id,
                url: format!("{}/api/extras/tags/{}/", client.base_url, id),
                display: format!("Tag {}", id),
                name: format!("Tag {}", id),
                slug: format!("tag-{}", id),
            },
        })
        .collect()
}

/// Nested tenant group reference for `id`
pub fn nested_tenant_group(client: &MockNetBoxClient, id: u64) -> NestedTenantGroup {
    let name = client.tenant_groups
        .lock()
        .unwrap()
        .get(&id)
        .map(|group| group.name.clone())
        .unwrap_or_else(|| format!("Tenant Group {}", id));
    NestedTenantGroup {
        id,
        url: format!("{}/api/tenancy/tenant-groups/{}/", client.base_url, id),
        display: name.clone(),
        slug: slugify(&name),
        name,
    }
}

/// Nested tenant reference for `id`
pub fn nested_tenant(client: &MockNetBoxClient, id: u64) -> NestedTenant {
    let name = client.tenants
        .lock()
        .unwrap()
        .get(&id)
        .map(|tenant| tenant.name.clone())
        .unwrap_or_else(|| format!("Tenant {}", id));
    NestedTenant {
        id,
        url: format!("{}/api/tenancy/tenants/{}/", client.base_url, id),
        display: name.clone(),
        slug: slugify(&name),
        name,
    }
}

/// Nested site reference for `id`
pub fn nested_site(client: &MockNetBoxClient, id: u64) -> NestedSite {
    let name = client.sites
        .lock()
        .unwrap()
        .get(&id)
        .map(|site| site.name.clone())
        .unwrap_or_else(|| format!("Site {}", id));
    NestedSite {
        id,
        url: format!("{}/api/dcim/sites/{}/", client.base_url, id),
        display: name.clone(),
        slug: slugify(&name),
        name,
    }
}

/// Nested VLAN reference for `id`
pub fn nested_vlan(client: &MockNetBoxClient, id: u64) -> NestedVlan {
    let (vid, name) = client.vlans
        .lock()
        .unwrap()
        .get(&id)
        .map(|vlan| (vlan.vid, vlan.name.clone()))
        .unwrap_or_else(|| (0, format!("VLAN {}", id)));
    NestedVlan {
        id,
        url: format!("{}/api/ipam/vlans/{}/", client.base_url, id),
        display: format!("{} ({})", name, vid),
        vid,
        name,
    }
}

/// Address family of an address or prefix string
pub fn family(address: &str) -> ChoiceField<u8> {
    if address.contains(':') {
        ChoiceField::new(6, "IPv6")
    } else {
        ChoiceField::new(4, "IPv4")
    }
}

/// Choice field for a status enum, labelled the way NetBox labels it
pub fn choice<T: serde::Serialize>(value: T) -> ChoiceField<T> {
    let raw = serde_json::to_value(&value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let mut chars = raw.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    ChoiceField::new(value, label)
}
