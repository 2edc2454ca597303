//! Route values and shared validation.
//!
//! A classless static route pairs an IPv4 destination prefix with a gateway.
//! Both the encoder and the merge engine accept routes as strings and run
//! them through the checks here; a route that fails validation is skipped by
//! those callers, never fatal for the whole batch.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An IPv4 classless static route.
///
/// Host bits of `network` beyond `prefix_len` are conventionally zero. The
/// wire format only ever carries the first [`significant_octets`] network
/// octets, so trailing bits never reach the payload either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Destination network address.
    pub network: Ipv4Addr,

    /// Prefix length in bits, `0..=32`. `0` is the default route.
    pub prefix_len: u8,

    /// Next-hop gateway. Never `0.0.0.0` or `255.255.255.255`.
    pub gateway: Ipv4Addr,
}

impl Route {
    /// Parses and validates a `"a.b.c.d/len"` network plus a dotted-quad
    /// gateway into a [`Route`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoute`] if the network is not valid CIDR
    /// notation, the prefix length is outside `0..=32`, or the gateway
    /// fails [`validate_gateway`].
    pub fn parse(network: &str, gateway: &str) -> Result<Self> {
        let (network, prefix_len) = parse_cidr(network)?;
        let gateway = validate_gateway(gateway)?;
        Ok(Self {
            network,
            prefix_len,
            gateway,
        })
    }

    /// Returns true for the default route (`0.0.0.0/0`).
    pub fn is_default(&self) -> bool {
        self.prefix_len == 0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} via {}", self.network, self.prefix_len, self.gateway)
    }
}

/// Number of destination octets carried on the wire for a prefix length.
///
/// Per RFC 3442 this is `ceil(prefix_len / 8)`:
///
/// | prefix length | octets |
/// |---------------|--------|
/// | 0             | 0      |
/// | 1..=8         | 1      |
/// | 9..=16        | 2      |
/// | 17..=24       | 3      |
/// | 25..=32       | 4      |
pub fn significant_octets(prefix_len: u8) -> usize {
    (prefix_len as usize).div_ceil(8)
}

/// Parses `"a.b.c.d/len"` into an address and prefix length.
///
/// # Errors
///
/// Returns [`Error::InvalidRoute`] on a missing `/`, a non-dotted-quad
/// address, or a prefix length outside `0..=32`.
pub fn parse_cidr(cidr: &str) -> Result<(Ipv4Addr, u8)> {
    let (address, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| Error::InvalidRoute(format!("invalid network format: {cidr}")))?;

    let address = Ipv4Addr::from_str(address)
        .map_err(|_| Error::InvalidRoute(format!("invalid network address: {address}")))?;

    let prefix_len: u8 = prefix
        .parse()
        .map_err(|_| Error::InvalidRoute(format!("invalid prefix length: {prefix}")))?;
    if prefix_len > 32 {
        return Err(Error::InvalidRoute(format!(
            "invalid prefix length: {prefix_len}"
        )));
    }

    Ok((address, prefix_len))
}

/// Validates a gateway address string.
///
/// # Errors
///
/// Returns [`Error::InvalidRoute`] if the string is not a dotted-quad IPv4
/// address, or if it is `0.0.0.0` or `255.255.255.255` - neither is a
/// usable next hop in option 121/249.
pub fn validate_gateway(gateway: &str) -> Result<Ipv4Addr> {
    let address = Ipv4Addr::from_str(gateway)
        .map_err(|_| Error::InvalidRoute(format!("invalid gateway format: {gateway}")))?;

    if address == Ipv4Addr::UNSPECIFIED || address == Ipv4Addr::BROADCAST {
        return Err(Error::InvalidRoute(format!(
            "gateway {gateway} is not a usable next hop"
        )));
    }

    Ok(address)
}
