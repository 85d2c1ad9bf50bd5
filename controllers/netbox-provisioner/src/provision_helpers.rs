//! Helper functions for the get-or-create pattern
//!
//! Every provisioning step looks a resource up by its unique key and creates
//! it only when the lookup comes back empty. These helpers hold that pattern
//! and its logging so the steps only build filters and request bodies.

use std::future::Future;

use netbox_client::NetBoxError;
use tracing::{debug, error, info, warn};

use crate::error::ProvisionerError;

/// Trait for NetBox resources that have an ID and URL
pub trait NetBoxResource {
    fn id(&self) -> u64;
    fn url(&self) -> &str;
}

impl NetBoxResource for netbox_client::Tag {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}
impl NetBoxResource for netbox_client::TenantGroup {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}
impl NetBoxResource for netbox_client::Tenant {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}
impl NetBoxResource for netbox_client::Site {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}
impl NetBoxResource for netbox_client::Vlan {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}
impl NetBoxResource for netbox_client::Prefix {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}
impl NetBoxResource for netbox_client::IPAddress {
    fn id(&self) -> u64 { self.id }
    fn url(&self) -> &str { &self.url }
}

/// Outcome of a successful get-or-create
#[derive(Debug, Clone)]
pub enum Resolution<R> {
    /// Found in NetBox, left untouched
    Existing(R),
    /// Created by this run
    Created(R),
}

impl<R: NetBoxResource> Resolution<R> {
    pub fn resource(&self) -> &R {
        match self {
            Resolution::Existing(r) | Resolution::Created(r) => r,
        }
    }

    pub fn id(&self) -> u64 {
        self.resource().id()
    }
}

/// Look up a resource by its unique key
///
/// `find_fn` is a filtered list query. An empty list is the normal
/// "needs creation" signal; with several matches the first one wins.
///
/// Returns:
/// - `Ok(Some(resource))` if at least one match exists
/// - `Ok(None)` if nothing matched
/// - `Err(ProvisionerError::LookupFailed)` on transport or API errors
pub async fn find_existing<FFind, Resource>(
    resource_name: &str,
    find_fn: FFind,
) -> Result<Option<Resource>, ProvisionerError>
where
    FFind: Future<Output = Result<Vec<Resource>, NetBoxError>> + Send,
    Resource: NetBoxResource,
{
    match find_fn.await {
        Ok(found) => {
            if found.len() > 1 {
                warn!(
                    "{} matched {} resources in NetBox, using the first (ID: {})",
                    resource_name,
                    found.len(),
                    found[0].id()
                );
            }
            Ok(found.into_iter().next())
        }
        Err(e) => {
            error!("Failed to look up {} in NetBox: {}", resource_name, e);
            Err(ProvisionerError::LookupFailed {
                resource: resource_name.to_string(),
                source: e,
            })
        }
    }
}

/// Generic get-or-create
///
/// Awaits `find_fn`; only when nothing matches is `create_fn` awaited.
/// Futures are lazy, so an unused `create_fn` never reaches NetBox.
pub async fn find_or_create<FFind, FCreate, Resource>(
    resource_name: &str,
    find_fn: FFind,
    create_fn: FCreate,
) -> Result<Resolution<Resource>, ProvisionerError>
where
    FFind: Future<Output = Result<Vec<Resource>, NetBoxError>> + Send,
    FCreate: Future<Output = Result<Resource, NetBoxError>> + Send,
    Resource: NetBoxResource,
{
    if let Some(existing) = find_existing(resource_name, find_fn).await? {
        info!("{} already exists in NetBox (ID: {})", resource_name, existing.id());
        debug!("{} URL: {}", resource_name, existing.url());
        return Ok(Resolution::Existing(existing));
    }

    info!("{} not found in NetBox, creating it", resource_name);
    match create_fn.await {
        Ok(created) => {
            info!("Created {} in NetBox (ID: {})", resource_name, created.id());
            debug!("{} URL: {}", resource_name, created.url());
            Ok(Resolution::Created(created))
        }
        Err(e) => {
            error!("Failed to create {} in NetBox: {}", resource_name, e);
            Err(ProvisionerError::CreateFailed {
                resource: resource_name.to_string(),
                source: e,
            })
        }
    }
}
