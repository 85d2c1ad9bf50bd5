//! Provisioner error types.
//!
//! Lookup and create failures carry the resource they were about so the
//! run log names what could not be provisioned.

use thiserror::Error;
use netbox_client::NetBoxError;

/// Errors that can occur while provisioning NetBox resources.
#[derive(Debug, Error)]
pub enum ProvisionerError {
    /// NetBox API error outside a get-or-create step (token validation, client setup)
    #[error("NetBox error: {0}")]
    NetBox(#[from] NetBoxError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Existence check failed (transport or API error, not "no match")
    #[error("Failed to look up {resource}: {source}")]
    LookupFailed {
        resource: String,
        #[source]
        source: NetBoxError,
    },

    /// Creation was rejected or failed
    #[error("Failed to create {resource}: {source}")]
    CreateFailed {
        resource: String,
        #[source]
        source: NetBoxError,
    },
}
