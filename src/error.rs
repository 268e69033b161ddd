//! Error types for prefix parsing.

use crate::models::Family;

/// Errors produced when parsing a textual address or CIDR prefix.
///
/// Always fatal to the single input item; the I/O layer decides whether to
/// abort the run or skip the line (see `input::read_prefix_file`).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The address part is not a valid IPv4 or IPv6 address.
    #[error("invalid IP address '{0}'")]
    InvalidAddress(String),
    /// The prefix length part is not a number.
    #[error("invalid prefix length '{0}'")]
    InvalidLength(String),
    /// The prefix length exceeds the width of the address family.
    #[error("prefix length /{len} out of range for {family} (max /{max})", max = .family.max_length())]
    LengthOutOfRange { len: u8, family: Family },
}
