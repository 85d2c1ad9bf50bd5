//! Extras steps
//!
//! Handles: Tag

use super::Provisioner;
use crate::error::ProvisionerError;
use crate::provision_helpers::{self, Resolution};
use netbox_client::{slugify, CreateTagRequest, Tag};
use tracing::info;

impl Provisioner<'_> {
    /// Find the run's tag by name, creating it if absent.
    pub(crate) async fn ensure_tag(&self) -> Result<Resolution<Tag>, ProvisionerError> {
        let name = self.config.tag_name.as_str();
        info!("Checking for tag '{}'...", name);

        let request = CreateTagRequest {
            name: name.to_string(),
            slug: slugify(name),
            ..Default::default()
        };
        provision_helpers::find_or_create(
            &format!("Tag '{}'", name),
            self.netbox_client.query_tags(&[("name", name)], false),
            self.netbox_client.create_tag(&request),
        )
        .await
    }
}
