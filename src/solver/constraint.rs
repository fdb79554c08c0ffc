use std::collections::{HashMap, HashSet};

use crate::solver::{domain::Domain, value::ValueEquality};

/// The set of legal value pairs for one ordered arc `(i, j)`.
///
/// The table is seeded with the full cross-product of the two variables'
/// base domains and then filtered down through the caller's predicates.
/// Storage is keyed by the first component, so the two queries the solver
/// needs are direct lookups: "does `(x, y)` satisfy the constraint?" and
/// "how many legal pairs start with `x`?".
///
/// Tables are built once during model construction and never mutated
/// afterwards; propagation narrows domains, not tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairTable<V: ValueEquality> {
    support: HashMap<V, HashSet<V>>,
}

impl<V: ValueEquality> PairTable<V> {
    /// Seeds a table with every pairing of the two domains.
    pub(crate) fn cross_product(left: &Domain<V>, right: &Domain<V>) -> Self {
        let partners: HashSet<V> = right.iter().cloned().collect();
        let support = left
            .iter()
            .map(|x| (x.clone(), partners.clone()))
            .collect();
        Self { support }
    }

    /// Keeps only the pairs the predicate accepts. First-component entries
    /// left with no partners are removed outright, so equality comparisons
    /// between tables are insensitive to how the pairs were filtered away.
    pub(crate) fn retain(&mut self, keep: impl Fn(&V, &V) -> bool) {
        for (x, partners) in self.support.iter_mut() {
            partners.retain(|y| keep(x, y));
        }
        self.support.retain(|_, partners| !partners.is_empty());
    }

    /// Whether the pair `(x, y)` satisfies the constraint.
    pub fn allows(&self, x: &V, y: &V) -> bool {
        self.support.get(x).is_some_and(|partners| partners.contains(y))
    }

    /// The number of legal pairs whose first component is `x`. This is the
    /// raw material of the least-constraining-value heuristic.
    pub fn supported_count(&self, x: &V) -> usize {
        self.support.get(x).map_or(0, HashSet::len)
    }

    /// Total number of legal pairs in the table.
    pub fn pair_count(&self) -> usize {
        self.support.values().map(HashSet::len).sum()
    }
}
