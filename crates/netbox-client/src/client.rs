//! NetBox API client
//!
//! Implements the NetBox REST API client for the extras, tenancy, dcim and
//! ipam endpoints used during provisioning. Every list endpoint goes through
//! [`query::query_resources`] and every create through
//! [`query::create_resource`], so auth headers, status mapping and decoding
//! live in [`HttpClient`].

use crate::common::query;
use crate::common::HttpClient;
use crate::endpoints;
use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// NetBox API client
#[derive(Debug)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Create a new NetBox client with a custom request timeout
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, NetBoxError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// Uses the status endpoint as it is lightweight and requires
    /// authentication.
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and NetBox is reachable
    /// * `Err(NetBoxError::Authentication)` - Token was rejected
    /// * `Err(NetBoxError)` - NetBox is unreachable or answered with an error
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _status: serde_json::Value = self.http
            .get(&format!("/api/{}/", endpoints::STATUS))
            .await?;
        debug!("Token validated successfully");
        Ok(())
    }

    // ====================
    // Tag API Methods
    // ====================

    /// Query tags by filters
    pub async fn query_tags(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tag>, NetBoxError> {
        query::query_resources(&self.http, endpoints::TAGS, filters, fetch_all).await
    }

    /// Create a new tag
    pub async fn create_tag(&self, request: &CreateTagRequest) -> Result<Tag, NetBoxError> {
        debug!("Creating tag {} in NetBox", request.name);
        query::create_resource(&self.http, endpoints::TAGS, request).await
    }

    // ====================
    // Tenancy API Methods
    // ====================

    /// Query tenant groups by filters
    pub async fn query_tenant_groups(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<TenantGroup>, NetBoxError> {
        query::query_resources(&self.http, endpoints::TENANT_GROUPS, filters, fetch_all).await
    }

    /// Create a new tenant group
    pub async fn create_tenant_group(&self, request: &CreateTenantGroupRequest) -> Result<TenantGroup, NetBoxError> {
        debug!("Creating tenant group {} in NetBox", request.name);
        query::create_resource(&self.http, endpoints::TENANT_GROUPS, request).await
    }

    /// Query tenants by filters
    pub async fn query_tenants(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tenant>, NetBoxError> {
        query::query_resources(&self.http, endpoints::TENANTS, filters, fetch_all).await
    }

    /// Create a new tenant
    pub async fn create_tenant(&self, request: &CreateTenantRequest) -> Result<Tenant, NetBoxError> {
        debug!("Creating tenant {} in NetBox", request.name);
        query::create_resource(&self.http, endpoints::TENANTS, request).await
    }

    // ====================
    // Site API Methods
    // ====================

    /// Query sites by filters
    pub async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        query::query_resources(&self.http, endpoints::SITES, filters, fetch_all).await
    }

    /// Create a new site
    pub async fn create_site(&self, request: &CreateSiteRequest) -> Result<Site, NetBoxError> {
        debug!("Creating site {} in NetBox", request.name);
        query::create_resource(&self.http, endpoints::SITES, request).await
    }

    // ====================
    // IPAM API Methods
    // ====================

    /// Query VLANs by filters (e.g. `[("vid", "100")]`)
    pub async fn query_vlans(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Vlan>, NetBoxError> {
        query::query_resources(&self.http, endpoints::VLANS, filters, fetch_all).await
    }

    /// Create a new VLAN
    pub async fn create_vlan(&self, request: &CreateVlanRequest) -> Result<Vlan, NetBoxError> {
        debug!("Creating VLAN {} ({}) in NetBox", request.vid, request.name);
        query::create_resource(&self.http, endpoints::VLANS, request).await
    }

    /// Query prefixes by filters (e.g. `[("prefix", "10.0.0.0/24")]`)
    pub async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
        query::query_resources(&self.http, endpoints::PREFIXES, filters, fetch_all).await
    }

    /// Create a new prefix
    pub async fn create_prefix(&self, request: &CreatePrefixRequest) -> Result<Prefix, NetBoxError> {
        debug!("Creating prefix {} in NetBox", request.prefix);
        query::create_resource(&self.http, endpoints::PREFIXES, request).await
    }

    /// Query IP addresses by filters (e.g. `[("address", "10.0.0.1/32")]`)
    pub async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        query::query_resources(&self.http, endpoints::IP_ADDRESSES, filters, fetch_all).await
    }

    /// Create a new IP address
    pub async fn create_ip_address(&self, request: &CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
        debug!("Creating IP address: {}", request.address);
        query::create_resource(&self.http, endpoints::IP_ADDRESSES, request).await
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.validate_token().await
    }

    async fn query_tags(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tag>, NetBoxError> {
        self.query_tags(filters, fetch_all).await
    }

    async fn create_tag(&self, request: &CreateTagRequest) -> Result<Tag, NetBoxError> {
        self.create_tag(request).await
    }

    async fn query_tenant_groups(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<TenantGroup>, NetBoxError> {
        self.query_tenant_groups(filters, fetch_all).await
    }

    async fn create_tenant_group(&self, request: &CreateTenantGroupRequest) -> Result<TenantGroup, NetBoxError> {
        self.create_tenant_group(request).await
    }

    async fn query_tenants(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tenant>, NetBoxError> {
        self.query_tenants(filters, fetch_all).await
    }

    async fn create_tenant(&self, request: &CreateTenantRequest) -> Result<Tenant, NetBoxError> {
        self.create_tenant(request).await
    }

    async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        self.query_sites(filters, fetch_all).await
    }

    async fn create_site(&self, request: &CreateSiteRequest) -> Result<Site, NetBoxError> {
        self.create_site(request).await
    }

    async fn query_vlans(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Vlan>, NetBoxError> {
        self.query_vlans(filters, fetch_all).await
    }

    async fn create_vlan(&self, request: &CreateVlanRequest) -> Result<Vlan, NetBoxError> {
        self.create_vlan(request).await
    }

    async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError> {
        self.query_prefixes(filters, fetch_all).await
    }

    async fn create_prefix(&self, request: &CreatePrefixRequest) -> Result<Prefix, NetBoxError> {
        self.create_prefix(request).await
    }

    async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        self.query_ip_addresses(filters, fetch_all).await
    }

    async fn create_ip_address(&self, request: &CreateIPAddressRequest) -> Result<IPAddress, NetBoxError> {
        self.create_ip_address(request).await
    }
}
