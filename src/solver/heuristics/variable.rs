//! Heuristics for selecting which variable to branch on next during the
//! search process.

use crate::solver::{
    assignment::Assignment,
    model::{Csp, Variable},
    value::ValueEquality,
};

/// A strategy for choosing the next unassigned variable to branch on.
///
/// A good choice can dramatically shrink the search tree. Implementations
/// must return `None` exactly when no variable has more than one candidate
/// left.
pub trait VariableSelectionHeuristic<V: ValueEquality> {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable>;
}

/// Selects the first unassigned variable in registration order.
///
/// The simplest deterministic baseline.
pub struct SelectFirst;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for SelectFirst {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        csp.variables()
            .iter()
            .find(|var| assignment.domain(var.as_ref()).is_some_and(|d| d.len() > 1))
            .cloned()
    }
}

/// Minimum Remaining Values: selects the unassigned variable with the
/// smallest current domain.
///
/// A "fail-first" strategy that tackles the most constrained variable early,
/// pruning hopeless subtrees sooner. Ties are broken by registration order,
/// first registered wins, which keeps repeated solves reproducible.
pub struct MinimumRemainingValues;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for MinimumRemainingValues {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        let mut best: Option<(&Variable, usize)> = None;
        for var in csp.variables() {
            let Some(domain) = assignment.domain(var.as_ref()) else {
                continue;
            };
            if domain.len() > 1 && best.map_or(true, |(_, size)| domain.len() < size) {
                best = Some((var, domain.len()));
            }
        }
        best.map(|(var, _)| var.clone())
    }
}

/// Selects an unassigned variable uniformly at random.
///
/// Useful for experiments; repeated solves are no longer reproducible, so
/// the deterministic heuristics are the better default.
pub struct RandomChoice;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for RandomChoice {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        use rand::seq::IteratorRandom;

        csp.variables()
            .iter()
            .filter(|var| assignment.domain(var.as_ref()).is_some_and(|d| d.len() > 1))
            .choose(&mut rand::thread_rng())
            .cloned()
    }
}
