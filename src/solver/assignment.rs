use im::HashMap;

use crate::solver::{domain::Domain, model::Variable, value::ValueEquality};

/// A search-time snapshot of every variable's current domain.
///
/// One assignment is owned by exactly one search-tree node. Children work on
/// clones, which the persistent backing map makes cheap while keeping the
/// branches fully independent: undoing a failed branch is just dropping its
/// snapshot. For a live (non-failed) assignment every domain is non-empty;
/// propagation reports failure the moment one would empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<V: ValueEquality> {
    domains: HashMap<Variable, Domain<V>>,
}

impl<V: ValueEquality> Assignment<V> {
    pub(crate) fn new(domains: HashMap<Variable, Domain<V>>) -> Self {
        Self { domains }
    }

    /// The current domain of `var`, or `None` for an unknown variable.
    pub fn domain(&self, var: &str) -> Option<&Domain<V>> {
        self.domains.get(var)
    }

    pub(crate) fn set_domain(&mut self, var: Variable, domain: Domain<V>) {
        self.domains.insert(var, domain);
    }

    /// Narrows `var` to the single candidate `value`.
    pub(crate) fn assign(&mut self, var: Variable, value: V) {
        self.set_domain(var, Domain::singleton(value));
    }

    /// Whether `var` has been narrowed to a single value.
    pub fn is_assigned(&self, var: &str) -> bool {
        self.domain(var).is_some_and(Domain::is_singleton)
    }

    /// Whether every variable is assigned.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(Domain::is_singleton)
    }

    /// The value assigned to `var`, if `var` is assigned.
    pub fn value_of(&self, var: &str) -> Option<&V> {
        self.domain(var)?.singleton_value()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Domain<V>)> {
        self.domains.iter()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
