//! CLI subcommand implementations.

pub mod config;
pub mod dashboard;
pub mod init;
pub mod lists;
pub mod next;
pub mod problem;
pub mod reset;
pub mod solve;
pub mod stats;

use prepdeck_core::{Config, Filter};

/// Build the selection filter from CLI flags, falling back to the configured
/// default list when no `--list` is given.
pub fn filter_from_args(pattern: Option<String>, list: Option<String>, config: &Config) -> Filter {
    Filter {
        pattern,
        list: list.or_else(|| config.default_list.clone()),
    }
}
