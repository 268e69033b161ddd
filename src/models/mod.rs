//! Domain models for CIDR consolidation.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Prefix`] - canonical IP network prefix (IPv4 or IPv6)
//! - [`Family`] - address family tag

mod prefix;

// Re-export public types and helpers
pub use prefix::{addr_bits, bits_to_addr, host_mask, Family, Prefix};
