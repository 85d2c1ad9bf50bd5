//! IPAM operations for MockNetBoxClient
//!
//! Handles VLANs, prefixes and IP addresses

use super::helpers;
use super::MockNetBoxClient;
use crate::endpoints;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn query_vlans(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Vlan>, NetBoxError> {
    let vlans = client.vlans.lock().unwrap();
    Ok(vlans
        .values()
        .filter(|vlan| helpers::matches(filters, "vid", &vlan.vid.to_string()) && helpers::matches(filters, "name", &vlan.name))
        .cloned()
        .collect())
}

pub async fn create_vlan(client: &MockNetBoxClient, request: &CreateVlanRequest) -> Result<Vlan, NetBoxError> {
    client.record_create(endpoints::VLANS, &request.vid.to_string())?;

    if !(1..=4094).contains(&request.vid) {
        return Err(NetBoxError::api(
            400u16,
            format!("vid: Ensure this value is between 1 and 4094 (got {})", request.vid),
        ));
    }

    let site = request.site.map(|id| helpers::nested_site(client, id));
    let tenant = request.tenant.map(|id| helpers::nested_tenant(client, id));
    let tags = helpers::nested_tags(client, &request.tags);
    let id = client.next_id();
    let vlan = Vlan {
        id,
        url: format!("{}/api/ipam/vlans/{}/", client.base_url, id),
        display: format!("{} ({})", request.name, request.vid),
        site,
        vid: request.vid,
        name: request.name.clone(),
        tenant,
        status: helpers::choice(request.status.unwrap_or(VlanStatus::Active)),
        description: request.description.clone().unwrap_or_default(),
        tags,
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    client.vlans.lock().unwrap().insert(id, vlan.clone());
    Ok(vlan)
}

pub async fn query_prefixes(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
    let prefixes = client.prefixes.lock().unwrap();
    Ok(prefixes
        .values()
        .filter(|prefix| helpers::matches(filters, "prefix", &prefix.prefix))
        .cloned()
        .collect())
}

pub async fn create_prefix(client: &MockNetBoxClient, request: &CreatePrefixRequest) -> Result<Prefix, NetBoxError> {
    client.record_create(endpoints::PREFIXES, &request.prefix)?;

    let site = request.site.map(|id| helpers::nested_site(client, id));
    let tenant = request.tenant.map(|id| helpers::nested_tenant(client, id));
    let vlan = request.vlan.map(|id| helpers::nested_vlan(client, id));
    let tags = helpers::nested_tags(client, &request.tags);
    let id = client.next_id();
    let prefix = Prefix {
        id,
        url: format!("{}/api/ipam/prefixes/{}/", client.base_url, id),
        display: request.prefix.clone(),
        family: helpers::family(&request.prefix),
        prefix: request.prefix.clone(),
        site,
        tenant,
        vlan,
        status: helpers::choice(request.status.unwrap_or_default()),
        description: request.description.clone().unwrap_or_default(),
        tags,
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    client.prefixes.lock().unwrap().insert(id, prefix.clone());
    Ok(prefix)
}

pub async fn query_ip_addresses(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
    let ips = client.ip_addresses.lock().unwrap();
    Ok(ips
        .values()
        .filter(|ip| helpers::matches(filters, "address", &ip.address))
        .cloned()
        .collect())
}

pub async fn create_ip_address(client: &MockNetBoxClient, request: &CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
    client.record_create(endpoints::IP_ADDRESSES, &request.address)?;

    let tenant = request.tenant.map(|id| helpers::nested_tenant(client, id));
    let vlan = request.vlan.map(|id| helpers::nested_vlan(client, id));
    let tags = helpers::nested_tags(client, &request.tags);
    let id = client.next_id();
    let ip = IPAddress {
        id,
        url: format!("{}/api/ipam/ip-addresses/{}/", client.base_url, id),
        display: request.address.clone(),
        family: helpers::family(&request.address),
        address: request.address.clone(),
        tenant,
        vlan,
        status: helpers::choice(request.status.unwrap_or(IPAddressStatus::Active)),
        dns_name: request.dns_name.clone().unwrap_or_default(),
        description: request.description.clone().unwrap_or_default(),
        tags,
        created: helpers::now(),
        last_updated: helpers::now(),
    };

    client.ip_addresses.lock().unwrap().insert(id, ip.clone());
    Ok(ip)
}
