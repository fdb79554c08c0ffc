//! Heuristics for ordering the candidate values of the variable being
//! branched on.

use crate::solver::{
    assignment::Assignment,
    model::{Csp, Variable},
    value::ValueEquality,
};

/// A strategy for deciding the order in which a variable's remaining
/// candidate values are tried.
pub trait ValueOrderingHeuristic<V: ValueEquality> {
    /// Returns `var`'s current candidates in the order they should be tried.
    fn order_values(&self, csp: &Csp<V>, assignment: &Assignment<V>, var: &Variable) -> Vec<V>;
}

/// Tries values in their domain order.
pub struct DomainOrder;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for DomainOrder {
    fn order_values(&self, _csp: &Csp<V>, assignment: &Assignment<V>, var: &Variable) -> Vec<V> {
        assignment
            .domain(var.as_ref())
            .map(|domain| domain.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Least Constraining Value: tries first the value that leaves the neighbors
/// the most options.
///
/// Each candidate is scored by the number of legal pairs, across all of the
/// variable's constraint tables, that start with it; candidates are then
/// tried from the highest score down. The ordering is produced by a stable
/// ascending sort followed by a reversal, so equally-scored values come out
/// in reverse domain order.
pub struct LeastConstrainingValue;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for LeastConstrainingValue {
    fn order_values(&self, csp: &Csp<V>, assignment: &Assignment<V>, var: &Variable) -> Vec<V> {
        let mut values: Vec<V> = assignment
            .domain(var.as_ref())
            .map(|domain| domain.iter().cloned().collect())
            .unwrap_or_default();
        values.sort_by_key(|value| csp.supported_pair_count(var, value));
        values.reverse();
        values
    }
}
