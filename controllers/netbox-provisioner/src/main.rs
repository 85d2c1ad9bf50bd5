//! NetBox Provisioner
//!
//! One-shot, idempotent get-or-create of the NetBox resources a tenant
//! network needs:
//! - Tag applied to everything the run creates
//! - Tenant group and tenant
//! - Site
//! - VLAN, its prefix, and every host address of an IPv4 range as a `/32`
//!
//! Configuration comes from environment variables, optionally through a
//! `.env` file. Re-running converges on the same state.

mod config;
mod error;
mod provision_helpers;
#[cfg(test)]
mod provision_helpers_test;
mod provisioner;
mod range;
#[cfg(test)]
mod test_utils;

use anyhow::Context;
use config::ProvisionerConfig;
use netbox_client::NetBoxClient;
use provisioner::Provisioner;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, variables may come from the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting NetBox Provisioner");

    let config = ProvisionerConfig::from_env().context("failed to load configuration")?;

    info!("Configuration:");
    info!("  NetBox URL: {}", config.netbox_url);
    info!("  Tag: {}", config.tag_name);
    info!("  Tenant: {} (group: {})", config.tenant_name, config.tenant_group_name);
    info!("  Site: {}", config.site_name);
    info!("  VLAN: {} (vid {})", config.vlan.name, config.vlan.vid);
    info!("  Prefix: {} ({})", config.prefix, config.prefix_status);
    info!("  IP range: {}", config.ip_range);

    let netbox_client = NetBoxClient::new(config.netbox_url.clone(), config.api_token.clone())
        .context("failed to build NetBox client")?;
    let provisioner = Provisioner::new(Box::new(netbox_client), &config);
    provisioner
        .check_connection()
        .await
        .with_context(|| format!("cannot use NetBox API at {}", config.netbox_url))?;

    let report = provisioner.run().await;
    report.log_summary();

    if report.is_complete() {
        info!("Provisioning finished, all resources are in place");
    } else {
        warn!("Provisioning finished with failed or skipped steps, re-run after fixing the errors above");
    }

    Ok(())
}
