use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

/// Counters for a single solve invocation.
///
/// A fresh record is created at the start of every
/// [`backtracking_search`](crate::solver::model::Csp::backtracking_search)
/// call and returned alongside the outcome, so concurrent solves of the same
/// model never share counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Search-tree nodes expanded: incremented once for every node that was
    /// not already a complete assignment.
    pub backtracks: u64,
    /// Nodes whose every candidate value failed, forcing the parent to try
    /// its next candidate.
    pub failures: u64,
    /// Arc revisions attempted by propagation.
    pub revisions: u64,
    /// Candidate values removed from domains by propagation.
    pub prunings: u64,
}

/// Renders the counters as a bordered console table.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Counter"), Cell::new("Value")]));
    for (name, value) in [
        ("Backtracks", stats.backtracks),
        ("Failures", stats.failures),
        ("Revise Calls", stats.revisions),
        ("Prunings", stats.prunings),
    ] {
        table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value.to_string())]));
    }
    table.to_string()
}
