//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.

use crate::error::NetBoxError;
use crate::models::*;

/// Trait for NetBox API client operations
///
/// Lookups are filtered list queries (`filters` are `(field, value)` pairs,
/// `fetch_all` follows pagination); creates take a typed request body.
/// All async methods must be `Send` to work with Tokio's runtime.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    // Extras Operations
    async fn query_tags(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tag>, NetBoxError>;
    async fn create_tag(&self, request: &CreateTagRequest) -> Result<Tag, NetBoxError>;

    // Tenancy Operations
    async fn query_tenant_groups(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<TenantGroup>, NetBoxError>;
    async fn create_tenant_group(&self, request: &CreateTenantGroupRequest) -> Result<TenantGroup, NetBoxError>;
    async fn query_tenants(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Tenant>, NetBoxError>;
    async fn create_tenant(&self, request: &CreateTenantRequest) -> Result<Tenant, NetBoxError>;

    // DCIM Operations
    async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError>;
    async fn create_site(&self, request: &CreateSiteRequest) -> Result<Site, NetBoxError>;

    // IPAM Operations
    async fn query_vlans(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Vlan>, NetBoxError>;
    async fn create_vlan(&self, request: &CreateVlanRequest) -> Result<Vlan, NetBoxError>;
    async fn query_prefixes(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Prefix>, NetBoxError>;
    async fn create_prefix(&self, request: &CreatePrefixRequest) -> Result<Prefix, NetBoxError>;
    async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError>;
    async fn create_ip_address(&self, request: &CreateIPAddressRequest) -> Result<IPAddress, NetBoxError>;
}
