//! IPv4 range summarization and host enumeration.
//!
//! A range `start..=end` is split into the minimal list of CIDR blocks that
//! covers it exactly, then each block contributes its usable host addresses:
//! network and broadcast are dropped for blocks shorter than /31, a /31
//! yields both of its addresses and a /32 its single address.

use std::fmt;
use std::net::Ipv4Addr;

use ipnet::{Ipv4Net, Ipv4Subnets};

use crate::error::ProvisionerError;

/// Inclusive IPv4 address range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Range {
    start: Ipv4Addr,
    end: Ipv4Addr,
}

impl Ipv4Range {
    /// Create a range; `start` must not be above `end`.
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Result<Self, ProvisionerError> {
        if start > end {
            return Err(ProvisionerError::InvalidConfig(format!(
                "IP range start {} is above end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Ipv4Addr {
        self.start
    }

    pub fn end(&self) -> Ipv4Addr {
        self.end
    }

    /// Minimal CIDR blocks covering the range, in ascending order
    pub fn blocks(&self) -> Vec<Ipv4Net> {
        Ipv4Subnets::new(self.start, self.end, 0).collect()
    }

    /// Usable host addresses of every block, ascending, block by block
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        Ipv4Subnets::new(self.start, self.end, 0).flat_map(|block| block.hosts())
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Host address in the `/32` form NetBox stores it under
pub fn host_cidr(address: Ipv4Addr) -> String {
    format!("{}/32", address)
}
