//! Provisioner configuration.
//!
//! Everything comes from environment variables (a `.env` file in the working
//! directory is loaded first by `main`). Values are validated up front so a
//! bad VLAN id or address never reaches NetBox.

use std::env;
use std::fmt;
use std::net::Ipv4Addr;

use ipnet::IpNet;
use netbox_client::PrefixStatus;

use crate::error::ProvisionerError;
use crate::range::Ipv4Range;

pub const NETBOX_URL: &str = "NETBOX_URL";
pub const API_TOKEN: &str = "API_TOKEN";
pub const TENANT_NAME: &str = "TENANT_NAME";
pub const TENANT_GROUP_NAME: &str = "TENANT_GROUP_NAME";
pub const VLAN_ID: &str = "VLAN_ID";
pub const VLAN_NAME: &str = "VLAN_NAME";
pub const IP_START_ADDRESS: &str = "IP_START_ADDRESS";
pub const IP_END_ADDRESS: &str = "IP_END_ADDRESS";
pub const PREFIX: &str = "PREFIX";
pub const SITE_NAME: &str = "SITE_NAME";
pub const TAG_NAME: &str = "TAG_NAME";
pub const PREFIX_STATUS: &str = "PREFIX_STATUS";

/// Valid 802.1Q VLAN ids
const VID_RANGE: std::ops::RangeInclusive<u16> = 1..=4094;

/// VLAN to look up by vid and create if absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanConfig {
    pub vid: u16,
    pub name: String,
}

/// Static values driving one provisioning run
#[derive(Clone)]
pub struct ProvisionerConfig {
    pub netbox_url: String,
    pub api_token: String,
    pub tag_name: String,
    pub tenant_group_name: String,
    pub tenant_name: String,
    pub site_name: String,
    pub vlan: VlanConfig,
    pub prefix: IpNet,
    pub prefix_status: PrefixStatus,
    pub ip_range: Ipv4Range,
}

impl fmt::Debug for ProvisionerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionerConfig")
            .field("netbox_url", &self.netbox_url)
            .field("api_token", &"<redacted>")
            .field("tag_name", &self.tag_name)
            .field("tenant_group_name", &self.tenant_group_name)
            .field("tenant_name", &self.tenant_name)
            .field("site_name", &self.site_name)
            .field("vlan", &self.vlan)
            .field("prefix", &self.prefix)
            .field("prefix_status", &self.prefix_status)
            .field("ip_range", &self.ip_range)
            .finish()
    }
}

impl ProvisionerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ProvisionerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProvisionerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, ProvisionerError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    ProvisionerError::InvalidConfig(format!(
                        "{} environment variable is required",
                        key
                    ))
                })
        };

        let vid = parse_vid(&required(VLAN_ID)?)?;
        let start = parse_ipv4(IP_START_ADDRESS, &required(IP_START_ADDRESS)?)?;
        let end = parse_ipv4(IP_END_ADDRESS, &required(IP_END_ADDRESS)?)?;

        let prefix_raw = required(PREFIX)?;
        let prefix: IpNet = prefix_raw.parse().map_err(|e| {
            ProvisionerError::InvalidConfig(format!("{} '{}' is not a CIDR prefix: {}", PREFIX, prefix_raw, e))
        })?;
        if prefix != prefix.trunc() {
            return Err(ProvisionerError::InvalidConfig(format!(
                "{} '{}' has host bits set, expected {}",
                PREFIX,
                prefix_raw,
                prefix.trunc()
            )));
        }

        let prefix_status = match lookup(PREFIX_STATUS).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .parse::<PrefixStatus>()
                .map_err(|e| ProvisionerError::InvalidConfig(format!("{}: {}", PREFIX_STATUS, e)))?,
            None => PrefixStatus::Active,
        };

        Ok(Self {
            netbox_url: required(NETBOX_URL)?,
            api_token: required(API_TOKEN)?,
            tag_name: required(TAG_NAME)?,
            tenant_group_name: required(TENANT_GROUP_NAME)?,
            tenant_name: required(TENANT_NAME)?,
            site_name: required(SITE_NAME)?,
            vlan: VlanConfig {
                vid,
                name: required(VLAN_NAME)?,
            },
            prefix,
            prefix_status,
            ip_range: Ipv4Range::new(start, end)?,
        })
    }
}

fn parse_vid(raw: &str) -> Result<u16, ProvisionerError> {
    raw.parse::<u16>()
        .ok()
        .filter(|vid| VID_RANGE.contains(vid))
        .ok_or_else(|| {
            ProvisionerError::InvalidConfig(format!(
                "{} must be an integer between 1 and 4094, got '{}'",
                VLAN_ID, raw
            ))
        })
}

fn parse_ipv4(key: &str, raw: &str) -> Result<Ipv4Addr, ProvisionerError> {
    raw.parse::<Ipv4Addr>().map_err(|e| {
        ProvisionerError::InvalidConfig(format!("{} '{}' is not an IPv4 address: {}", key, raw, e))
    })
}
