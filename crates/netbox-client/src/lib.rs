//! NetBox REST API Client
//!
//! A Rust client library for interacting with the NetBox REST API.
//! Provides type-safe models and get-or-create building blocks for tags,
//! tenancy, sites, VLANs, prefixes and IP addresses.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::{CreateIPAddressRequest, IPAddressStatus, NetBoxClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Look an address up before creating it
//! let existing = client.query_ip_addresses(&[("address", "10.0.0.1/32")], false).await?;
//! if existing.is_empty() {
//!     let request = CreateIPAddressRequest {
//!         address: "10.0.0.1/32".to_string(),
//!         status: Some(IPAddressStatus::Active),
//!         ..Default::default()
//!     };
//!     client.create_ip_address(&request).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Tenancy / Extras**: Tags, tenant groups, tenants
//! - **DCIM**: Sites
//! - **IPAM**: VLANs, prefixes, IP addresses
//! - **Pagination**: Support for fetching all pages of large result sets
//! - **test-util**: In-memory [`MockNetBoxClient`] for unit tests

pub mod client;
pub mod common;
pub mod endpoints;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod netbox_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::NetBoxClient;
pub use common::{HttpClient, PaginatedResponse};
pub use error::NetBoxError;
pub use models::*;
pub use netbox_trait::NetBoxClientTrait;
#[cfg(feature = "test-util")]
pub use mock::MockNetBoxClient;
