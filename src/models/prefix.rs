//! IP prefix (CIDR block) representation for IPv4 and IPv6.
//!
//! Provides the [`Prefix`] struct for representing a network prefix in
//! canonical form, along with bit-level helpers for address arithmetic.

use crate::error::ParseError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Address family of a prefix. IPv4 sorts before IPv6.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    Ipv4,
    Ipv6,
}

impl Family {
    /// Bit width of addresses in this family (32 or 128).
    pub fn width(&self) -> u8 {
        match self {
            Family::Ipv4 => 32,
            Family::Ipv6 => 128,
        }
    }

    /// Maximum prefix length, equal to the address width.
    pub fn max_length(&self) -> u8 {
        self.width()
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Family::Ipv4 => write!(f, "IPv4"),
            Family::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Numeric value of an address, widened to u128 for family-independent math.
pub fn addr_bits(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u32::from(*a) as u128,
        IpAddr::V6(a) => u128::from(*a),
    }
}

/// Convert a numeric value back to an address of the given family.
///
/// For IPv4 only the low 32 bits are significant.
pub fn bits_to_addr(family: Family, bits: u128) -> IpAddr {
    match family {
        Family::Ipv4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        Family::Ipv6 => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// Mask covering the host bits of a prefix of the given length.
///
/// # Examples
/// ```
/// use cidr_consolidate::models::{host_mask, Family};
/// assert_eq!(host_mask(Family::Ipv4, 24), 0xFF);
/// assert_eq!(host_mask(Family::Ipv4, 0), 0xFFFF_FFFF);
/// ```
pub fn host_mask(family: Family, len: u8) -> u128 {
    debug_assert!(len <= family.width());
    let host_bits = family.width() - len;
    if host_bits == 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    }
}

/// A network prefix in canonical CIDR form.
///
/// Invariant: `addr` is the network address of the block, i.e. every bit
/// beyond `len` (counting from the most significant bit) is zero. Both
/// constructors enforce this by masking, so a `Prefix` value is always
/// canonical.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    addr: IpAddr,
    len: u8,
}

impl Prefix {
    /// Create a [`Prefix`] from an address and prefix length.
    ///
    /// Host bits beyond `len` are masked to zero. Fails only when `len`
    /// exceeds the width of the address family.
    pub fn new(addr: IpAddr, len: u8) -> Result<Prefix, ParseError> {
        let family = family_of(&addr);
        if len > family.max_length() {
            return Err(ParseError::LengthOutOfRange { len, family });
        }
        let network = addr_bits(&addr) & !host_mask(family, len);
        Ok(Prefix {
            addr: bits_to_addr(family, network),
            len,
        })
    }

    /// Build a prefix from raw bits already known to be aligned.
    pub(crate) fn from_bits(family: Family, bits: u128, len: u8) -> Prefix {
        debug_assert!(len <= family.max_length());
        debug_assert_eq!(bits & host_mask(family, len), 0);
        Prefix {
            addr: bits_to_addr(family, bits),
            len,
        }
    }

    /// The network (base) address of the block.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// The prefix length.
    pub fn length(&self) -> u8 {
        self.len
    }

    /// The address family of this prefix.
    pub fn family(&self) -> Family {
        family_of(&self.addr)
    }

    /// The lowest (network) address in the block.
    pub fn lo(&self) -> IpAddr {
        self.addr
    }

    /// The highest (last) address in the block.
    pub fn hi(&self) -> IpAddr {
        bits_to_addr(self.family(), self.last_bits())
    }

    /// Numeric value of the first covered address.
    pub(crate) fn first_bits(&self) -> u128 {
        addr_bits(&self.addr)
    }

    /// Numeric value of the last covered address.
    pub(crate) fn last_bits(&self) -> u128 {
        self.first_bits() | host_mask(self.family(), self.len)
    }

    /// Whether the block covers the given address. Always false across
    /// families.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        if family_of(addr) != self.family() {
            return false;
        }
        let bits = addr_bits(addr);
        self.first_bits() <= bits && bits <= self.last_bits()
    }
}

fn family_of(addr: &IpAddr) -> Family {
    match addr {
        IpAddr::V4(_) => Family::Ipv4,
        IpAddr::V6(_) => Family::Ipv6,
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl Ord for Prefix {
    fn cmp(&self, other: &Prefix) -> std::cmp::Ordering {
        (self.family(), self.first_bits(), self.len).cmp(&(
            other.family(),
            other.first_bits(),
            other.len,
        ))
    }
}

impl PartialOrd for Prefix {
    fn partial_cmp(&self, other: &Prefix) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Prefix {
    type Err = ParseError;

    /// Parse `addr` or `addr/length` in either family.
    ///
    /// An address without an explicit length is a host route (`/32` IPv4,
    /// `/128` IPv6). When an explicit length is given and host bits beyond
    /// it are set, the address is normalized to the network address and a
    /// warning is logged; this is deliberate lenient behavior, not an error.
    fn from_str(s: &str) -> Result<Prefix, ParseError> {
        let s = s.trim();
        let mut parts = s.splitn(2, '/');
        let addr_part = parts.next().unwrap_or_default();
        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| ParseError::InvalidAddress(addr_part.to_string()))?;
        let len = match parts.next() {
            None => family_of(&addr).max_length(),
            Some(len_part) => len_part
                .parse::<u8>()
                .map_err(|_| ParseError::InvalidLength(len_part.to_string()))?,
        };
        let prefix = Prefix::new(addr, len)?;
        if prefix.addr != addr {
            log::warn!("host bits set in '{}', normalized to {}", s, prefix);
        }
        Ok(prefix)
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
