//! Tenancy steps
//!
//! Handles: TenantGroup, Tenant

use super::Provisioner;
use crate::error::ProvisionerError;
use crate::provision_helpers::{self, Resolution};
use netbox_client::{slugify, CreateTenantGroupRequest, CreateTenantRequest, Tenant, TenantGroup};
use tracing::info;

impl Provisioner<'_> {
    /// Find the tenant group by name, creating it (tagged) if absent.
    pub(crate) async fn ensure_tenant_group(&self, tag_id: u64) -> Result<Resolution<TenantGroup>, ProvisionerError> {
        let name = self.config.tenant_group_name.as_str();
        info!("Checking for tenant group '{}'...", name);

        let request = CreateTenantGroupRequest {
            name: name.to_string(),
            slug: slugify(name),
            tags: vec![tag_id],
            ..Default::default()
        };
        provision_helpers::find_or_create(
            &format!("Tenant group '{}'", name),
            self.netbox_client.query_tenant_groups(&[("name", name)], false),
            self.netbox_client.create_tenant_group(&request),
        )
        .await
    }

    /// Find the tenant by name, creating it in `group_id` if absent.
    ///
    /// An existing tenant is left as is, even when it sits in another group.
    pub(crate) async fn ensure_tenant(
        &self,
        group_id: Option<u64>,
        tag_id: u64,
    ) -> Result<Resolution<Tenant>, ProvisionerError> {
        let name = self.config.tenant_name.as_str();
        info!("Checking for tenant '{}'...", name);

        let request = CreateTenantRequest {
            name: name.to_string(),
            slug: slugify(name),
            group: group_id,
            tags: vec![tag_id],
            ..Default::default()
        };
        provision_helpers::find_or_create(
            &format!("Tenant '{}'", name),
            self.netbox_client.query_tenants(&[("name", name)], false),
            self.netbox_client.create_tenant(&request),
        )
        .await
    }
}
