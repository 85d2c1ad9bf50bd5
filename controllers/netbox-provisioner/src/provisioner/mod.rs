//! Provisioning logic for NetBox resources.
//!
//! This module is organized by NetBox API sections:
//! - `extras`: Tags
//! - `tenancy`: Tenant groups and tenants
//! - `dcim`: Sites
//! - `ipam`: VLANs, prefixes and the IP address range
//!
//! Each step is a get-or-create whose resolved ID feeds the later steps.
//! Failures are logged and recorded in the [`ProvisionReport`]; they never
//! abort the run, only the steps that need the missing ID.

pub mod report;
mod extras;
mod tenancy;
mod dcim;
mod ipam;
#[cfg(test)]
mod provisioner_test;

pub use report::{ProvisionReport, StepOutcome};

use crate::config::ProvisionerConfig;
use crate::error::ProvisionerError;
use netbox_client::NetBoxClientTrait;
use tracing::{error, info, warn};

/// Provisions the configured NetBox resources.
pub struct Provisioner<'a> {
    pub(crate) netbox_client: Box<dyn NetBoxClientTrait + Send + Sync>,
    pub(crate) config: &'a ProvisionerConfig,
}

impl<'a> Provisioner<'a> {
    pub fn new(netbox_client: Box<dyn NetBoxClientTrait + Send + Sync>, config: &'a ProvisionerConfig) -> Self {
        Self { netbox_client, config }
    }

    /// Check that NetBox is reachable and accepts the API token.
    pub async fn check_connection(&self) -> Result<(), ProvisionerError> {
        info!("Connecting to NetBox API at {}...", self.netbox_client.base_url());
        self.netbox_client.validate_token().await?;
        info!("NetBox API token accepted");
        Ok(())
    }

    /// Run every step in order and report what each one resolved to.
    pub async fn run(&self) -> ProvisionReport {
        info!("Provisioning NetBox resources at {}", self.netbox_client.base_url());

        let tag = StepOutcome::from(self.ensure_tag().await);
        let Some(tag_id) = tag.id() else {
            error!(
                "Tag '{}' is unresolved, skipping all remaining steps so no untagged resources are created",
                self.config.tag_name
            );
            return ProvisionReport::tag_unresolved(tag);
        };

        let tenant_group = StepOutcome::from(self.ensure_tenant_group(tag_id).await);
        if !tenant_group.is_resolved() {
            warn!(
                "Tenant group '{}' is unresolved, tenant '{}' will be created without a group",
                self.config.tenant_group_name, self.config.tenant_name
            );
        }

        let tenant = StepOutcome::from(self.ensure_tenant(tenant_group.id(), tag_id).await);
        let site = StepOutcome::from(self.ensure_site(tag_id).await);
        let vlan = StepOutcome::from(self.ensure_vlan(tenant.id(), tag_id).await);

        let prefix = match vlan.id() {
            Some(vlan_id) => StepOutcome::from(
                self.ensure_prefix(vlan_id, tenant.id(), site.id(), tag_id).await,
            ),
            None => {
                error!(
                    "Cannot create prefix {} because VLAN {} ({}) is unresolved",
                    self.config.prefix, self.config.vlan.vid, self.config.vlan.name
                );
                StepOutcome::Skipped("VLAN unresolved".to_string())
            }
        };

        let addresses = self.provision_addresses(vlan.id(), tenant.id(), tag_id).await;

        ProvisionReport {
            tag,
            tenant_group,
            tenant,
            site,
            vlan,
            prefix,
            addresses,
        }
    }
}
