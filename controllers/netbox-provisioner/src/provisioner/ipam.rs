//! IPAM steps
//!
//! Handles: VLAN, Prefix, IP addresses of the configured range

use super::report::AddressReport;
use super::Provisioner;
use crate::error::ProvisionerError;
use crate::provision_helpers::{self, Resolution};
use crate::range::host_cidr;
use netbox_client::{
    CreateIPAddressRequest, CreatePrefixRequest, CreateVlanRequest, IPAddressStatus, Prefix, Vlan,
    VlanStatus,
};
use tracing::{debug, info, warn};

impl Provisioner<'_> {
    /// Find the VLAN by vid, creating it if absent.
    ///
    /// The vid is the identity; an existing VLAN with the same vid but a
    /// different name is reused as is.
    pub(crate) async fn ensure_vlan(
        &self,
        tenant_id: Option<u64>,
        tag_id: u64,
    ) -> Result<Resolution<Vlan>, ProvisionerError> {
        let vlan = &self.config.vlan;
        let vid = vlan.vid.to_string();
        info!("Checking for VLAN '{}' (vid {})...", vlan.name, vlan.vid);

        let request = CreateVlanRequest {
            vid: vlan.vid,
            name: vlan.name.clone(),
            tenant: tenant_id,
            status: Some(VlanStatus::Active),
            tags: vec![tag_id],
            ..Default::default()
        };
        let resolution = provision_helpers::find_or_create(
            &format!("VLAN '{}' (vid {})", vlan.name, vlan.vid),
            self.netbox_client.query_vlans(&[("vid", vid.as_str())], false),
            self.netbox_client.create_vlan(&request),
        )
        .await?;

        if let Resolution::Existing(existing) = &resolution {
            if existing.name != vlan.name {
                warn!(
                    "VLAN vid {} exists under the name '{}', not '{}'; reusing it",
                    vlan.vid, existing.name, vlan.name
                );
            }
        }
        Ok(resolution)
    }

    /// Find the prefix by CIDR, creating it on `vlan_id` if absent.
    pub(crate) async fn ensure_prefix(
        &self,
        vlan_id: u64,
        tenant_id: Option<u64>,
        site_id: Option<u64>,
        tag_id: u64,
    ) -> Result<Resolution<Prefix>, ProvisionerError> {
        let prefix = self.config.prefix.to_string();
        info!("Checking for prefix '{}'...", prefix);

        let request = CreatePrefixRequest {
            prefix: prefix.clone(),
            status: Some(self.config.prefix_status),
            site: site_id,
            tenant: tenant_id,
            vlan: Some(vlan_id),
            tags: vec![tag_id],
            ..Default::default()
        };
        provision_helpers::find_or_create(
            &format!("Prefix '{}'", prefix),
            self.netbox_client.query_prefixes(&[("prefix", prefix.as_str())], false),
            self.netbox_client.create_prefix(&request),
        )
        .await
    }

    /// Get-or-create every host address of the configured range as a `/32`.
    ///
    /// A failed address is recorded and the loop moves on to the next one.
    pub(crate) async fn provision_addresses(
        &self,
        vlan_id: Option<u64>,
        tenant_id: Option<u64>,
        tag_id: u64,
    ) -> AddressReport {
        let range = &self.config.ip_range;
        info!("Adding individual IP addresses from {} to {}...", range.start(), range.end());
        debug!("Range {} covers blocks {:?}", range, range.blocks());
        if vlan_id.is_none() {
            warn!(
                "VLAN {} is unresolved, IP addresses in {} will not be attached to a VLAN",
                self.config.vlan.vid, range
            );
        }

        let mut report = AddressReport::default();
        for host in range.hosts() {
            let address = host_cidr(host);
            let request = CreateIPAddressRequest {
                address: address.clone(),
                status: Some(IPAddressStatus::Active),
                tenant: tenant_id,
                vlan: vlan_id,
                tags: vec![tag_id],
                ..Default::default()
            };

            let result = provision_helpers::find_or_create(
                &format!("IP address {}", address),
                self.netbox_client.query_ip_addresses(&[("address", address.as_str())], false),
                self.netbox_client.create_ip_address(&request),
            )
            .await;

            match result {
                Ok(Resolution::Existing(_)) => report.existing += 1,
                Ok(Resolution::Created(_)) => report.created += 1,
                // Already logged by the helper
                Err(_) => report.failed.push(address),
            }
        }

        info!(
            "Processed {} IP addresses in {}: {} existing, {} created, {} failed",
            report.total(),
            range,
            report.existing,
            report.created,
            report.failed.len()
        );
        report
    }
}
