//! Run report
//!
//! Records what each step resolved to so `main` can log a summary and tests
//! can assert on the run without scraping logs.

use std::fmt;

use tracing::{info, warn};

use crate::error::ProvisionerError;
use crate::provision_helpers::{NetBoxResource, Resolution};

/// Result of one get-or-create step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Found in NetBox with this ID
    Existing(u64),
    /// Created by this run with this ID
    Created(u64),
    /// Lookup or creation failed
    Failed(String),
    /// Not attempted because a step it depends on is unresolved
    Skipped(String),
}

impl StepOutcome {
    /// NetBox ID when the step resolved a resource
    pub fn id(&self) -> Option<u64> {
        match self {
            StepOutcome::Existing(id) | StepOutcome::Created(id) => Some(*id),
            StepOutcome::Failed(_) | StepOutcome::Skipped(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.id().is_some()
    }
}

impl<R: NetBoxResource> From<Result<Resolution<R>, ProvisionerError>> for StepOutcome {
    fn from(result: Result<Resolution<R>, ProvisionerError>) -> Self {
        match result {
            Ok(Resolution::Existing(r)) => StepOutcome::Existing(r.id()),
            Ok(Resolution::Created(r)) => StepOutcome::Created(r.id()),
            Err(e) => StepOutcome::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Existing(id) => write!(f, "existing (ID: {})", id),
            StepOutcome::Created(id) => write!(f, "created (ID: {})", id),
            StepOutcome::Failed(reason) => write!(f, "failed: {}", reason),
            StepOutcome::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

/// Per-address tallies for the range step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressReport {
    pub existing: usize,
    pub created: usize,
    /// Addresses (`a.b.c.d/32`) whose lookup or creation failed
    pub failed: Vec<String>,
    /// Set when the range step did not run at all
    pub skipped: Option<String>,
}

impl AddressReport {
    pub fn total(&self) -> usize {
        self.existing + self.created + self.failed.len()
    }
}

/// Outcome of a full provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub tag: StepOutcome,
    pub tenant_group: StepOutcome,
    pub tenant: StepOutcome,
    pub site: StepOutcome,
    pub vlan: StepOutcome,
    pub prefix: StepOutcome,
    pub addresses: AddressReport,
}

impl ProvisionReport {
    /// Report for a run that stopped after the tag step
    pub(crate) fn tag_unresolved(tag: StepOutcome) -> Self {
        let reason = "tag unresolved".to_string();
        Self {
            tag,
            tenant_group: StepOutcome::Skipped(reason.clone()),
            tenant: StepOutcome::Skipped(reason.clone()),
            site: StepOutcome::Skipped(reason.clone()),
            vlan: StepOutcome::Skipped(reason.clone()),
            prefix: StepOutcome::Skipped(reason.clone()),
            addresses: AddressReport {
                skipped: Some(reason),
                ..Default::default()
            },
        }
    }

    fn steps(&self) -> [(&'static str, &StepOutcome); 6] {
        [
            ("Tag", &self.tag),
            ("Tenant group", &self.tenant_group),
            ("Tenant", &self.tenant),
            ("Site", &self.site),
            ("VLAN", &self.vlan),
            ("Prefix", &self.prefix),
        ]
    }

    /// True when every step resolved and no address failed
    pub fn is_complete(&self) -> bool {
        self.steps().iter().all(|(_, outcome)| outcome.is_resolved())
            && self.addresses.failed.is_empty()
            && self.addresses.skipped.is_none()
    }

    /// Log one line per step plus the address tallies
    pub fn log_summary(&self) {
        info!("Provisioning summary:");
        for (label, outcome) in self.steps() {
            match outcome {
                StepOutcome::Existing(_) | StepOutcome::Created(_) => info!("  {}: {}", label, outcome),
                StepOutcome::Failed(_) | StepOutcome::Skipped(_) => warn!("  {}: {}", label, outcome),
            }
        }

        match &self.addresses.skipped {
            Some(reason) => warn!("  IP addresses: skipped: {}", reason),
            None => info!(
                "  IP addresses: {} existing, {} created, {} failed",
                self.addresses.existing,
                self.addresses.created,
                self.addresses.failed.len()
            ),
        }
        for address in &self.addresses.failed {
            warn!("    failed: {}", address);
        }
    }
}
