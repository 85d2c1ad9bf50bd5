//! Test utilities for unit testing the provisioner
//!
//! This module provides helpers for building configurations and seeding the
//! mock NetBox with pre-existing resources.

#[cfg(test)]
use crate::config::{self, ProvisionerConfig};
#[cfg(test)]
use netbox_client::{CreateVlanRequest, MockNetBoxClient, NetBoxClientTrait, Vlan};
#[cfg(test)]
use std::collections::HashMap;

/// Helper to create a test configuration, with `overrides` replacing the
/// default variable values
#[cfg(test)]
pub fn create_test_config(overrides: &[(&str, &str)]) -> ProvisionerConfig {
    let mut vars: HashMap<&str, &str> = HashMap::from([
        (config::NETBOX_URL, "http://test-netbox"),
        (config::API_TOKEN, "test-token"),
        (config::TAG_NAME, "provisioned"),
        (config::TENANT_GROUP_NAME, "Cloud Customers"),
        (config::TENANT_NAME, "Araz Cloud"),
        (config::SITE_NAME, "DC1"),
        (config::VLAN_ID, "100"),
        (config::VLAN_NAME, "servers"),
        (config::PREFIX, "10.0.0.0/24"),
        (config::IP_START_ADDRESS, "10.0.0.1"),
        (config::IP_END_ADDRESS, "10.0.0.3"),
    ]);
    vars.extend(overrides.iter().copied());

    ProvisionerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test configuration should be valid")
}

/// Helper to create a test mock client
#[cfg(test)]
pub fn create_test_mock() -> MockNetBoxClient {
    MockNetBoxClient::new("http://test-netbox")
}

/// Helper to seed a VLAN that exists before the run
#[cfg(test)]
pub async fn seed_vlan(mock: &MockNetBoxClient, vid: u16, name: &str) -> Vlan {
    mock.create_vlan(&CreateVlanRequest {
        vid,
        name: name.to_string(),
        ..Default::default()
    })
    .await
    .expect("seeding VLAN should succeed")
}
