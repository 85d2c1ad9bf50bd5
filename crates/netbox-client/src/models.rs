//! NetBox API models
//!
//! Response models follow the NetBox REST serializers for the extras,
//! tenancy, dcim and ipam endpoints. Request models only carry the fields
//! the provisioning tools write; `None` fields and empty tag lists are left
//! out of the JSON body so NetBox applies its own defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetBoxError;

/// NetBox choice field, e.g. `{"value": "active", "label": "Active"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceField<T> {
    pub value: T,
    pub label: String,
}

impl<T> ChoiceField<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

// ====================
// Extras
// ====================

/// Tag model matching NetBox TagSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String, // Hex color code without '#'
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ====================
// Tenancy
// ====================

/// Tenant group model matching NetBox TenantGroupSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantGroup {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<NestedTenantGroup>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub tenant_count: u64,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating a tenant group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTenantGroupRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

/// Tenant model matching NetBox TenantSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub group: Option<NestedTenantGroup>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating a tenant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

// ====================
// DCIM
// ====================

/// Site model matching NetBox SiteSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub status: ChoiceField<SiteStatus>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating a site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SiteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

// ====================
// IPAM
// ====================

/// VLAN model matching NetBox VLANSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vlan {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub site: Option<NestedSite>,
    pub vid: u16,
    pub name: String,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    pub status: ChoiceField<VlanStatus>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating a VLAN
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVlanRequest {
    pub vid: u16,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VlanStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

/// Prefix model matching NetBox PrefixSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prefix {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub family: ChoiceField<u8>, // 4 or 6
    pub prefix: String,          // e.g., "192.168.1.0/24"
    #[serde(default)]
    pub site: Option<NestedSite>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub vlan: Option<NestedVlan>,
    pub status: ChoiceField<PrefixStatus>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating a prefix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePrefixRequest {
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PrefixStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

/// IP Address model matching NetBox IPAddressSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IPAddress {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub family: ChoiceField<u8>, // 4 or 6
    pub address: String,         // e.g., "192.168.1.1/32"
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub vlan: Option<NestedVlan>, // Only populated by NetBox installs exposing the relation
    pub status: ChoiceField<IPAddressStatus>,
    #[serde(default)]
    pub dns_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Request body for creating an IP address
///
/// `vlan` is written as-is; NetBox versions without a VLAN relation on IP
/// addresses ignore the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateIPAddressRequest {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IPAddressStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
}

// Nested serializers (simplified versions for references)

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedTag {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedTenantGroup {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedTenant {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedSite {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedVlan {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub vid: u16,
    pub name: String,
}

// Status choices

/// Site status choices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SiteStatus {
    Planned,
    Staging,
    Active,
    Decommissioning,
    Retired,
}

/// VLAN status choices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VlanStatus {
    Active,
    Reserved,
    Deprecated,
}

/// Prefix status choices
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixStatus {
    Container,
    #[default]
    Active,
    Reserved,
    Deprecated,
}

impl PrefixStatus {
    /// API value of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixStatus::Container => "container",
            PrefixStatus::Active => "active",
            PrefixStatus::Reserved => "reserved",
            PrefixStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for PrefixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefixStatus {
    type Err = NetBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "container" => Ok(PrefixStatus::Container),
            "active" => Ok(PrefixStatus::Active),
            "reserved" => Ok(PrefixStatus::Reserved),
            "deprecated" => Ok(PrefixStatus::Deprecated),
            other => Err(NetBoxError::InvalidRequest(format!(
                "unknown prefix status '{}', expected one of container, active, reserved, deprecated",
                other
            ))),
        }
    }
}

/// IP Address status choices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IPAddressStatus {
    Active,
    Reserved,
    Deprecated,
    Dhcp,
    #[serde(rename = "slaac")]
    Slaac,
}

/// Builds a NetBox slug from a display name.
///
/// NetBox slugs match `^[-a-zA-Z0-9_]+$`: the name is lowercased, every
/// other character becomes `-`, and runs of `-` collapse into one.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
