//! NetBox REST endpoint paths, relative to `/api/`

pub const TAGS: &str = "extras/tags";
pub const TENANT_GROUPS: &str = "tenancy/tenant-groups";
pub const TENANTS: &str = "tenancy/tenants";
pub const SITES: &str = "dcim/sites";
pub const VLANS: &str = "ipam/vlans";
pub const PREFIXES: &str = "ipam/prefixes";
pub const IP_ADDRESSES: &str = "ipam/ip-addresses";
pub const STATUS: &str = "status";
