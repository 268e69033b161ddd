//! Supernet consolidation.
//!
//! Merges a collection of prefixes into the minimal equivalent set of
//! non-overlapping CIDR blocks covering exactly the same addresses.
//! Families are processed independently and never merge across.

use crate::models::{host_mask, Family, Prefix};
use itertools::Itertools;

/// Inclusive address range, the internal working form during merging.
///
/// A range corresponds to a single prefix only when its span is a power of
/// two and its start is aligned to that size; merged ranges that break this
/// are re-decomposed by [`split_aligned`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct AddrRange {
    family: Family,
    start: u128,
    end: u128,
}

impl AddrRange {
    fn of(prefix: &Prefix) -> AddrRange {
        AddrRange {
            family: prefix.family(),
            start: prefix.first_bits(),
            end: prefix.last_bits(),
        }
    }

    /// True when `other` overlaps this range or starts directly after it
    /// (no gap). Assumes `other.start >= self.start`, i.e. sorted input.
    fn joins(&self, other: &AddrRange) -> bool {
        match self.end.checked_add(1) {
            Some(next) => other.start <= next,
            // This range already ends at the top of the address space, so
            // nothing sorted after it can leave a gap.
            None => true,
        }
    }
}

/// Consolidate prefixes into the minimal equivalent set.
///
/// The result is sorted by (family, address, length), pairwise
/// non-overlapping, and maximal: no two entries can be replaced by one
/// larger aligned block. Duplicates collapse, nested prefixes are absorbed,
/// and adjacent blocks merge into their common parent. Empty input yields
/// empty output.
///
/// # Examples
/// ```
/// use cidr_consolidate::{consolidate, Prefix};
/// let input: Vec<Prefix> = ["10.0.0.0/25", "10.0.0.128/25"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let merged = consolidate(&input);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].to_string(), "10.0.0.0/24");
/// ```
pub fn consolidate(prefixes: &[Prefix]) -> Vec<Prefix> {
    let mut result = Vec::new();
    for family in [Family::Ipv4, Family::Ipv6] {
        let mut ranges: Vec<AddrRange> = prefixes
            .iter()
            .filter(|p| p.family() == family)
            .map(AddrRange::of)
            .collect();
        ranges.sort_by_key(|r| (r.start, r.end));

        // Left-to-right sweep: fold each range into the accumulator while it
        // overlaps or touches, close the accumulator on the first gap.
        let merged = ranges.into_iter().coalesce(|acc, next| {
            if acc.joins(&next) {
                Ok(AddrRange {
                    family,
                    start: acc.start,
                    end: acc.end.max(next.end),
                })
            } else {
                Err((acc, next))
            }
        });

        for range in merged {
            split_aligned(&range, &mut result);
        }
    }
    log::debug!(
        "consolidated {} prefixes into {}",
        prefixes.len(),
        result.len()
    );
    result
}

/// Decompose a merged range into the minimal sequence of aligned CIDR
/// blocks: greedily emit the largest aligned block that fits, advance past
/// it, repeat.
fn split_aligned(range: &AddrRange, out: &mut Vec<Prefix>) {
    let width = range.family.width();
    let mut start = range.start;
    loop {
        let host_bits = max_block_host_bits(start, range.end, width);
        let len = width - host_bits;
        out.push(Prefix::from_bits(range.family, start, len));
        let block_end = start | host_mask(range.family, len);
        if block_end >= range.end {
            break;
        }
        start = block_end + 1;
    }
}

/// Host-bit count of the largest aligned block starting at `start` that does
/// not extend past `end`.
fn max_block_host_bits(start: u128, end: u128, width: u8) -> u8 {
    // Alignment limit: the block size must divide the start address.
    let align = if start == 0 {
        width
    } else {
        (start.trailing_zeros() as u8).min(width)
    };
    // Span limit: the block must not reach past `end`. The checked add only
    // fails for the full 128-bit space, where the span is exactly 2^128.
    let span = match (end - start).checked_add(1) {
        Some(count) => (127 - count.leading_zeros()) as u8,
        None => 128,
    };
    align.min(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes(input: &[&str]) -> Vec<Prefix> {
        input
            .iter()
            .map(|s| s.parse().expect("test input must parse"))
            .collect()
    }

    fn consolidate_strs(input: &[&str]) -> Vec<String> {
        consolidate(&prefixes(input))
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_adjacent_halves_merge_into_parent() {
        assert_eq!(
            consolidate_strs(&["10.0.0.0/25", "10.0.0.128/25"]),
            vec!["10.0.0.0/24"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(
            consolidate_strs(&["192.168.1.0/24", "192.168.1.0/24"]),
            vec!["192.168.1.0/24"]
        );
    }

    #[test]
    fn test_gap_prevents_merge() {
        assert_eq!(
            consolidate_strs(&["10.0.0.0/24", "10.0.2.0/24"]),
            vec!["10.0.0.0/24", "10.0.2.0/24"]
        );
    }

    #[test]
    fn test_ipv6_adjacency_merge() {
        assert_eq!(
            consolidate_strs(&["2001:db8::/33", "2001:db8:8000::/33"]),
            vec!["2001:db8::/32"]
        );
    }

    #[test]
    fn test_full_ipv4_space_merge() {
        // Width boundary: end of the upper half is 255.255.255.255.
        assert_eq!(
            consolidate_strs(&["0.0.0.0/1", "128.0.0.0/1"]),
            vec!["0.0.0.0/0"]
        );
    }

    #[test]
    fn test_families_never_merge() {
        assert_eq!(
            consolidate_strs(&["10.0.0.0/24", "::/0"]),
            vec!["10.0.0.0/24", "::/0"]
        );
    }

    #[test]
    fn test_zero_length_absorbs_family() {
        assert_eq!(
            consolidate_strs(&["0.0.0.0/0", "10.0.0.0/8", "192.168.1.1/32"]),
            vec!["0.0.0.0/0"]
        );
        assert_eq!(
            consolidate_strs(&["::/0", "2001:db8::/32"]),
            vec!["::/0"]
        );
    }

    #[test]
    fn test_nested_prefix_absorbed() {
        assert_eq!(
            consolidate_strs(&["10.1.2.0/24", "10.0.0.0/8"]),
            vec!["10.0.0.0/8"]
        );
    }

    #[test]
    fn test_merged_range_redecomposed_when_unaligned() {
        // The three blocks form one contiguous range 10.0.0.128 - 10.0.2.127,
        // which is not expressible as a single prefix.
        assert_eq!(
            consolidate_strs(&["10.0.0.128/25", "10.0.1.0/24", "10.0.2.0/25"]),
            vec!["10.0.0.128/25", "10.0.1.0/24", "10.0.2.0/25"]
        );
    }

    #[test]
    fn test_overlap_swallowed() {
        assert_eq!(
            consolidate_strs(&["10.0.0.0/23", "10.0.1.128/25"]),
            vec!["10.0.0.0/23"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(consolidate(&[]).is_empty());
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        assert_eq!(
            consolidate_strs(&["2001:db8::/48", "172.16.0.0/16", "10.0.0.0/24", "::1/128"]),
            vec!["10.0.0.0/24", "172.16.0.0/16", "::1/128", "2001:db8::/48"]
        );
    }

    #[test]
    fn test_idempotence() {
        let input = prefixes(&[
            "10.0.0.0/25",
            "10.0.0.128/25",
            "10.0.2.0/24",
            "2001:db8::/33",
            "2001:db8:8000::/33",
        ]);
        let once = consolidate(&input);
        let twice = consolidate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_host_routes_merge_up() {
        // Four consecutive /32s starting on a /30 boundary.
        assert_eq!(
            consolidate_strs(&["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]),
            vec!["10.0.0.0/30"]
        );
    }

    #[test]
    fn test_adjacent_but_unaligned_stay_separate() {
        // 10.0.1.0/24 and 10.0.2.0/24 touch but their union is not aligned.
        assert_eq!(
            consolidate_strs(&["10.0.1.0/24", "10.0.2.0/24"]),
            vec!["10.0.1.0/24", "10.0.2.0/24"]
        );
    }

    #[test]
    fn test_outputs_never_overlap_and_cover_inputs() {
        let input = prefixes(&[
            "10.0.0.0/26",
            "10.0.0.64/26",
            "10.0.0.0/25",
            "10.0.1.0/24",
            "192.168.0.0/16",
            "192.168.128.0/17",
        ]);
        let merged = consolidate(&input);
        for pair in merged.windows(2) {
            if pair[0].family() == pair[1].family() {
                assert!(
                    pair[0].hi() < pair[1].lo(),
                    "outputs overlap: {} vs {}",
                    pair[0],
                    pair[1]
                );
            }
        }
        for p in &input {
            assert!(
                merged.iter().any(|m| m.contains(&p.lo()) && m.contains(&p.hi())),
                "input {} not covered",
                p
            );
        }
    }

    #[test]
    fn test_max_block_host_bits() {
        // Aligned /24 span.
        assert_eq!(max_block_host_bits(0x0A000000, 0x0A0000FF, 32), 8);
        // Start alignment caps the block even with a big span.
        assert_eq!(max_block_host_bits(0x0A000080, 0x0A0002FF, 32), 7);
        // Span caps the block even with perfect alignment.
        assert_eq!(max_block_host_bits(0x0A000000, 0x0A00007F, 32), 7);
        // Full spaces.
        assert_eq!(max_block_host_bits(0, 0xFFFF_FFFF, 32), 32);
        assert_eq!(max_block_host_bits(0, u128::MAX, 128), 128);
    }
}
