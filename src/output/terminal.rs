//! Terminal output utilities.
//!
//! Renders the same plain report as the original consolidation tool: input
//! count, consolidated count, then the merged list one prefix per line.

use crate::models::Prefix;
use colored::Colorize;

/// Print the consolidation summary and the merged list to stdout.
pub fn print_summary(input_count: usize, consolidated: &[Prefix]) {
    println!("IPs: {}", input_count);
    println!(
        "Consolidated IPs: {}",
        consolidated.len().to_string().green()
    );
    println!("Merged IP list:");
    for line in merged_lines(consolidated) {
        println!("{}", line);
    }
}

/// Canonical one-per-line rendering of the merged list.
pub fn merged_lines(consolidated: &[Prefix]) -> Vec<String> {
    consolidated.iter().map(|p| p.to_string()).collect()
}
