//! DCIM steps
//!
//! Handles: Site

use super::Provisioner;
use crate::error::ProvisionerError;
use crate::provision_helpers::{self, Resolution};
use netbox_client::{slugify, CreateSiteRequest, Site, SiteStatus};
use tracing::info;

impl Provisioner<'_> {
    /// Find the site by name, creating an active tagged site if absent.
    pub(crate) async fn ensure_site(&self, tag_id: u64) -> Result<Resolution<Site>, ProvisionerError> {
        let name = self.config.site_name.as_str();
        info!("Checking for site '{}'...", name);

        let request = CreateSiteRequest {
            name: name.to_string(),
            slug: slugify(name),
            status: Some(SiteStatus::Active),
            tags: vec![tag_id],
            ..Default::default()
        };
        provision_helpers::find_or_create(
            &format!("Site '{}'", name),
            self.netbox_client.query_sites(&[("name", name)], false),
            self.netbox_client.create_site(&request),
        )
        .await
    }
}
