//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! The mock is organized into domain-specific modules:
//! - `extras.rs` - Tags
//! - `tenancy.rs` - Tenant groups and tenants
//! - `dcim.rs` - Sites
//! - `ipam.rs` - VLANs, prefixes and IP addresses
//! - `helpers.rs` - Filter matching and nested reference builders
//!
//! Besides storing resources, the mock records every create call per
//! endpoint and can be told to reject creates, either for a whole endpoint
//! or for a single key (tag name, VLAN vid, prefix, address, ...).

mod helpers;
mod ipam;
mod dcim;
mod tenancy;
mod extras;

use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock NetBoxClient for testing
///
/// Resources live in id-ordered maps, so "first match" of a query is the
/// lowest id, like NetBox's default ordering for most endpoints. Clones share
/// the same store, which lets a test hand one clone to the code under test
/// and inspect the other.
#[derive(Clone, Debug)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) tags: Arc<Mutex<BTreeMap<u64, Tag>>>,
    pub(crate) tenant_groups: Arc<Mutex<BTreeMap<u64, TenantGroup>>>,
    pub(crate) tenants: Arc<Mutex<BTreeMap<u64, Tenant>>>,
    pub(crate) sites: Arc<Mutex<BTreeMap<u64, Site>>>,
    pub(crate) vlans: Arc<Mutex<BTreeMap<u64, Vlan>>>,
    pub(crate) prefixes: Arc<Mutex<BTreeMap<u64, Prefix>>>,
    pub(crate) ip_addresses: Arc<Mutex<BTreeMap<u64, IPAddress>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
    // Failure injection and call recording
    failing_creates: Arc<Mutex<HashSet<String>>>,
    create_calls: Arc<Mutex<Vec<(String, String)>>>,
    token_rejected: Arc<Mutex<bool>>,
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            tags: Arc::new(Mutex::new(BTreeMap::new())),
            tenant_groups: Arc::new(Mutex::new(BTreeMap::new())),
            tenants: Arc::new(Mutex::new(BTreeMap::new())),
            sites: Arc::new(Mutex::new(BTreeMap::new())),
            vlans: Arc::new(Mutex::new(BTreeMap::new())),
            prefixes: Arc::new(Mutex::new(BTreeMap::new())),
            ip_addresses: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            failing_creates: Arc::new(Mutex::new(HashSet::new())),
            create_calls: Arc::new(Mutex::new(Vec::new())),
            token_rejected: Arc::new(Mutex::new(false)),
        }
    }

    /// Reject every create on `endpoint` (e.g. [`crate::endpoints::VLANS`])
    pub fn fail_creates(&self, endpoint: &str) {
        self.failing_creates.lock().unwrap().insert(endpoint.to_string());
    }

    /// Reject the create on `endpoint` whose key equals `key`
    ///
    /// Keys: tag/tenant group/tenant/site name, VLAN vid, prefix CIDR,
    /// IP address string.
    pub fn fail_create_for(&self, endpoint: &str, key: &str) {
        self.failing_creates
            .lock()
            .unwrap()
            .insert(format!("{}:{}", endpoint, key));
    }

    /// Make `validate_token` answer with an authentication error
    pub fn reject_token(&self) {
        *self.token_rejected.lock().unwrap() = true;
    }

    /// Keys of every create attempted on `endpoint`, in call order,
    /// including rejected ones
    pub fn create_calls(&self, endpoint: &str) -> Vec<String> {
        self.create_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| e == endpoint)
            .map(|(_, key)| key.clone())
            .collect()
    }

    /// Snapshot of stored tags
    pub fn tags(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored tenant groups
    pub fn tenant_groups(&self) -> Vec<TenantGroup> {
        self.tenant_groups.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored tenants
    pub fn tenants(&self) -> Vec<Tenant> {
        self.tenants.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored sites
    pub fn sites(&self) -> Vec<Site> {
        self.sites.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored VLANs
    pub fn vlans(&self) -> Vec<Vlan> {
        self.vlans.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored prefixes
    pub fn prefixes(&self) -> Vec<Prefix> {
        self.prefixes.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored IP addresses
    pub fn ip_addresses(&self) -> Vec<IPAddress> {
        self.ip_addresses.lock().unwrap().values().cloned().collect()
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    /// Record a create call and apply any configured rejection
    pub(crate) fn record_create(&self, endpoint: &str, key: &str) -> Result<(), NetBoxError> {
        self.create_calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), key.to_string()));

        let failing = self.failing_creates.lock().unwrap();
        if failing.contains(endpoint) || failing.contains(&format!("{}:{}", endpoint, key)) {
            return Err(NetBoxError::api(
                400u16,
                format!("POST /api/{}/ rejected by mock for '{}'", endpoint, key),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        if *self.token_rejected.lock().unwrap() {
            return Err(NetBoxError::Authentication(
                "GET /api/status/ rejected: 403 Forbidden - Invalid token".to_string(),
            ));
        }
        Ok(())
    }

    // Extras Operations - delegated to extras module
    async fn query_tags(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tag>, NetBoxError> {
        extras::query_tags(self, filters, fetch_all).await
    }

    async fn create_tag(&self, request: &CreateTagRequest) -> Result<Tag, NetBoxError> {
        extras::create_tag(self, request).await
    }

    // Tenancy Operations - delegated to tenancy module
    async fn query_tenant_groups(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<TenantGroup>, NetBoxError> {
        tenancy::query_tenant_groups(self, filters, fetch_all).await
    }

    async fn create_tenant_group(&self, request: &CreateTenantGroupRequest) -> Result<TenantGroup, NetBoxError> {
        tenancy::create_tenant_group(self, request).await
    }

    async fn query_tenants(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tenant>, NetBoxError> {
        tenancy::query_tenants(self, filters, fetch_all).await
    }

    async fn create_tenant(&self, request: &CreateTenantRequest) -> Result<Tenant, NetBoxError> {
        tenancy::create_tenant(self, request).await
    }

    // DCIM Operations - delegated to dcim module
    async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        dcim::query_sites(self, filters, fetch_all).await
    }

    async fn create_site(&self, request: &CreateSiteRequest) -> Result<Site, NetBoxError> {
        dcim::create_site(self, request).await
    }

    // IPAM Operations - delegated to ipam module
    async fn query_vlans(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Vlan>, NetBoxError> {
        ipam::query_vlans(self, filters, fetch_all).await
    }

    async fn create_vlan(&self, request: &CreateVlanRequest) -> Result<Vlan, NetBoxError> {
        ipam::create_vlan(self, request).await
    }

    async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
        ipam::query_prefixes(self, filters, fetch_all).await
    }

    async fn create_prefix(&self, request: &CreatePrefixRequest) -> Result<Prefix, NetBoxError> {
        ipam::create_prefix(self, request).await
    }

    async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        ipam::query_ip_addresses(self, filters, fetch_all).await
    }

    async fn create_ip_address(&self, request: &CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
        ipam::create_ip_address(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints;

    #[tokio::test]
    async fn test_query_filters_by_name() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        for name in ["alpha", "beta"] {
            mock.create_tag(&CreateTagRequest {
                name: name.to_string(),
                slug: slugify(name),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let found = mock.query_tags(&[("name", "beta")], false).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "beta");
        assert!(mock.query_tags(&[("name", "gamma")], false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fail_create_for_single_key() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        mock.fail_create_for(endpoints::IP_ADDRESSES, "10.0.0.2/32");

        let ok = mock
            .create_ip_address(&CreateIPAddressRequest {
                address: "10.0.0.1/32".to_string(),
                ..Default::default()
            })
            .await;
        let rejected = mock
            .create_ip_address(&CreateIPAddressRequest {
                address: "10.0.0.2/32".to_string(),
                ..Default::default()
            })
            .await;

        assert!(ok.is_ok());
        assert!(matches!(rejected, Err(NetBoxError::Api { status: 400, .. })));
        assert_eq!(mock.ip_addresses().len(), 1);
        assert_eq!(
            mock.create_calls(endpoints::IP_ADDRESSES),
            vec!["10.0.0.1/32".to_string(), "10.0.0.2/32".to_string()]
        );
    }

    #[tokio::test]
    async fn test_created_vlan_resolves_nested_references() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let tag = mock
            .create_tag(&CreateTagRequest {
                name: "provisioned".to_string(),
                slug: "provisioned".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let tenant = mock
            .create_tenant(&CreateTenantRequest {
                name: "Acme".to_string(),
                slug: "acme".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let vlan = mock
            .create_vlan(&CreateVlanRequest {
                vid: 100,
                name: "servers".to_string(),
                tenant: Some(tenant.id),
                status: Some(VlanStatus::Active),
                tags: vec![tag.id],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(vlan.tenant.as_ref().map(|t| t.name.as_str()), Some("Acme"));
        assert_eq!(vlan.tags.len(), 1);
        assert_eq!(vlan.tags[0].slug, "provisioned");
        assert_eq!(mock.query_vlans(&[("vid", "100")], false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reject_token() {
        let mock = MockNetBoxClient::new("http://test-netbox");
        assert!(mock.validate_token().await.is_ok());
        mock.reject_token();
        assert!(matches!(
            mock.validate_token().await,
            Err(NetBoxError::Authentication(_))
        ));
    }
}
