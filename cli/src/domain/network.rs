//! SSH ingress range derivation.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::{ConfigError, DeployError};

/// A validated IPv4 CIDR block used for the `SSHAllowedCIDR` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct SshCidr {
    addr: Ipv4Addr,
    prefix: u8,
}

impl SshCidr {
    /// A single-host range (`/32`) for the given address.
    #[must_use]
    pub fn host(addr: Ipv4Addr) -> Self {
        Self { addr, prefix: 32 }
    }

    #[must_use]
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    #[must_use]
    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl fmt::Display for SshCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl From<SshCidr> for String {
    fn from(cidr: SshCidr) -> Self {
        cidr.to_string()
    }
}

impl FromStr for SshCidr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidCidr(s.to_string());
        let (addr, prefix) = s.trim().split_once('/').ok_or_else(invalid)?;
        let addr: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
        let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
        if prefix > 32 {
            return Err(invalid());
        }
        Ok(Self { addr, prefix })
    }
}

/// Parse the body returned by a "what is my IP" endpoint.
///
/// Such endpoints answer with the address followed by a newline.
///
/// # Errors
///
/// Returns [`DeployError::PublicIpLookup`] if the body is not an IPv4 address.
pub fn parse_public_ip(body: &str) -> Result<Ipv4Addr, DeployError> {
    let trimmed = body.trim();
    trimmed
        .parse()
        .map_err(|_| DeployError::PublicIpLookup(format!("unexpected response {trimmed:?}")))
}
