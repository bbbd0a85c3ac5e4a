//! Text IP address parsing and canonical key normalization.

use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use crate::error::XdbError;
use crate::version::IpVersion;

/// An opaque, canonical network-order key: 4 bytes for v4, 16 for v6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpKey {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl IpKey {
    pub fn version(&self) -> IpVersion {
        match self {
            IpKey::V4(_) => IpVersion::V4,
            IpKey::V6(_) => IpVersion::V6,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IpKey::V4(b) => b.as_slice(),
            IpKey::V6(b) => b.as_slice(),
        }
    }
}

/// True for IPv4-mapped (`::ffff:a.b.c.d`) and IPv4-compatible (`::a.b.c.d`)
/// forms: `std::net::Ipv6Addr`'s `FromStr` accepts both as plain `V6`
/// addresses, but `spec.md` §4.2 requires mixed-form addresses to be
/// rejected rather than silently treated as IPv6 keys.
fn is_embedded_v4(v6: &Ipv6Addr) -> bool {
    if v6.to_ipv4_mapped().is_some() {
        return true;
    }
    let octets = v6.octets();
    let unspecified_or_loopback = octets[12..15] == [0, 0, 0] && octets[15] <= 1;
    octets[0..12] == [0u8; 12] && !unspecified_or_loopback
}

/// Parse `text` into a canonical network-order key, detecting v4 vs v6.
///
/// Relies on `std::net::IpAddr`'s `FromStr`, which already rejects
/// zone-id suffixes (`fe80::1%eth0`); IPv4-mapped/IPv4-compatible mixed
/// forms slip through that parser as plain `V6` addresses and are
/// rejected separately by [`is_embedded_v4`].
pub fn parse_ip(text: &str) -> Result<IpKey, XdbError> {
    let addr = IpAddr::from_str(text).map_err(|_| XdbError::InvalidAddress)?;
    Ok(match addr {
        IpAddr::V4(v4) => IpKey::V4(v4.octets()),
        IpAddr::V6(v6) if is_embedded_v4(&v6) => return Err(XdbError::InvalidAddress),
        IpAddr::V6(v6) => IpKey::V6(v6.octets()),
    })
}
