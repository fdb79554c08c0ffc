use std::collections::HashMap as StdHashMap;
use std::sync::Arc;

use im::HashMap;

use crate::{
    error::{ModelError, Result},
    solver::{
        assignment::Assignment, constraint::PairTable, domain::Domain,
        search::BacktrackingSearch, stats::SearchStats, value::ValueEquality,
    },
};

/// A variable name. Names are interned as shared string slices so that arcs
/// and assignment snapshots copy a pointer, not the text.
pub type Variable = Arc<str>;

/// A finite-domain constraint satisfaction problem.
///
/// The model owns the variables (in registration order), their base domains,
/// and the binary constraint tables. It is built once through
/// [`add_variable`](Csp::add_variable),
/// [`add_constraint_one_way`](Csp::add_constraint_one_way), and
/// [`add_all_different_constraint`](Csp::add_all_different_constraint), and
/// is read-only from then on: solving borrows the model immutably and works
/// on [`Assignment`] snapshots, so the same model can be solved repeatedly.
///
/// Constraints are directional in storage. A symmetric relation must be
/// registered in both directions; the solver does not detect an asymmetric
/// registration.
pub struct Csp<V: ValueEquality> {
    /// Registration order; all tie-breaking falls back to this order.
    variables: Vec<Variable>,
    /// Base domains, copied wholesale into the root assignment of a solve.
    domains: HashMap<Variable, Domain<V>>,
    /// Legal-pair tables keyed by ordered arc.
    tables: StdHashMap<(Variable, Variable), PairTable<V>>,
    /// For each variable, the constraint targets in registration order.
    neighbors: StdHashMap<Variable, Vec<Variable>>,
}

impl<V: ValueEquality> Csp<V> {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            domains: HashMap::new(),
            tables: StdHashMap::new(),
            neighbors: StdHashMap::new(),
        }
    }

    /// Registers a new variable with its candidate domain. Duplicate values
    /// in `domain` are dropped, keeping the first occurrence's position.
    ///
    /// Registering a name twice is a configuration error.
    pub fn add_variable(
        &mut self,
        name: impl Into<Variable>,
        domain: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        let name = name.into();
        if self.domains.contains_key(&name) {
            return Err(ModelError::DuplicateVariable(name.to_string()).into());
        }
        self.variables.push(name.clone());
        self.domains.insert(name.clone(), Domain::new(domain));
        self.neighbors.insert(name, Vec::new());
        Ok(())
    }

    /// Restricts the legal pairs for the arc `(i, j)` to those the predicate
    /// accepts. On first registration the table is seeded with the full
    /// cross-product of the two base domains, so repeated registrations
    /// intersect their predicates.
    ///
    /// This adds the constraint one way only, from `i` to `j`. Call it again
    /// with the arguments swapped to make the relation symmetric.
    pub fn add_constraint_one_way(
        &mut self,
        i: &str,
        j: &str,
        predicate: impl Fn(&V, &V) -> bool,
    ) -> Result<()> {
        let i = self.interned(i)?;
        let j = self.interned(j)?;

        let key = (i.clone(), j.clone());
        if !self.tables.contains_key(&key) {
            let left = self.domains.get(&i).unwrap();
            let right = self.domains.get(&j).unwrap();
            self.tables.insert(key.clone(), PairTable::cross_product(left, right));
            self.neighbors.get_mut(&i).unwrap().push(j);
        }
        self.tables.get_mut(&key).unwrap().retain(predicate);
        Ok(())
    }

    /// Constrains every ordered pair of distinct variables in `vars` to take
    /// different values. Both directions of each pair are registered, so the
    /// relation is symmetric.
    pub fn add_all_different_constraint<T: AsRef<str>>(&mut self, vars: &[T]) -> Result<()> {
        for a in vars {
            for b in vars {
                if a.as_ref() != b.as_ref() {
                    self.add_constraint_one_way(a.as_ref(), b.as_ref(), |x, y| x != y)?;
                }
            }
        }
        Ok(())
    }

    /// The registered variables, in registration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The base (pre-search) domain of `var`.
    pub fn domain(&self, var: &str) -> Option<&Domain<V>> {
        self.domains.get(var)
    }

    /// Every arc `(i, j)` with a registered constraint, in registration
    /// order. This is the seed queue for full propagation.
    pub fn get_all_arcs(&self) -> Vec<(Variable, Variable)> {
        self.variables
            .iter()
            .flat_map(|i| self.neighbors[i].iter().map(move |j| (i.clone(), j.clone())))
            .collect()
    }

    /// Every arc `(k, var)` whose revision could be affected by a change to
    /// `var`'s domain. Unknown names yield no arcs.
    pub fn get_all_neighboring_arcs(&self, var: &str) -> Vec<(Variable, Variable)> {
        let Some((stored, targets)) = self.neighbors.get_key_value(var) else {
            return Vec::new();
        };
        targets.iter().map(|k| (k.clone(), stored.clone())).collect()
    }

    /// A fresh snapshot of the base domains, the root state of a solve.
    pub fn initial_assignment(&self) -> Assignment<V> {
        Assignment::new(self.domains.clone())
    }

    /// Solves the model: prunes the base domains to arc consistency, then
    /// runs backtracking search with minimum-remaining-values variable
    /// selection and least-constraining-value ordering.
    ///
    /// Returns the completed assignment (every domain a singleton) or `None`
    /// when no solution exists, together with the statistics of this solve.
    /// Counters start from zero on every call.
    pub fn backtracking_search(&self) -> (Option<Assignment<V>>, SearchStats) {
        BacktrackingSearch::default().solve(self)
    }

    /// The legal-pair table for the arc `(i, j)`, if one was registered.
    /// An absent table means the pair is unconstrained.
    pub(crate) fn pair_table(&self, i: &Variable, j: &Variable) -> Option<&PairTable<V>> {
        self.tables.get(&(i.clone(), j.clone()))
    }

    /// The number of legal pairs, across all of `var`'s constraint tables,
    /// whose first component is `value`. A high count means assigning
    /// `value` leaves the neighbors comparatively many options.
    pub fn supported_pair_count(&self, var: &Variable, value: &V) -> usize {
        let Some(targets) = self.neighbors.get(var) else {
            return 0;
        };
        targets
            .iter()
            .filter_map(|j| self.pair_table(var, j))
            .map(|table| table.supported_count(value))
            .sum()
    }

    /// Cheap pre-filter used before full propagation: `value` is locally
    /// consistent for `var` when every one of `var`'s constraint tables has
    /// at least one legal pair starting with it.
    pub(crate) fn is_value_consistent(&self, var: &Variable, value: &V) -> bool {
        let Some(targets) = self.neighbors.get(var) else {
            return true;
        };
        targets.iter().all(|j| {
            self.pair_table(var, j)
                .map_or(true, |table| table.supported_count(value) > 0)
        })
    }

    pub(crate) fn base_domain(&self, var: &Variable) -> &Domain<V> {
        self.domains.get(var).unwrap()
    }

    /// Looks up the interned name for `name`, failing fast on unknowns so a
    /// typo surfaces at construction time instead of as a mysterious
    /// empty-domain failure during search.
    fn interned(&self, name: &str) -> Result<Variable> {
        self.neighbors
            .get_key_value(name)
            .map(|(stored, _)| stored.clone())
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()).into())
    }
}

impl<V: ValueEquality> Default for Csp<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueEquality> std::fmt::Debug for Csp<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Csp")
            .field("variables", &self.variables)
            .field("constraints", &self.tables.len())
            .finish()
    }
}
