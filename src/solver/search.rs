use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    heuristics::{
        value::{LeastConstrainingValue, ValueOrderingHeuristic},
        variable::{MinimumRemainingValues, VariableSelectionHeuristic},
    },
    model::Csp,
    stats::SearchStats,
    value::ValueEquality,
};

/// Depth-first backtracking search that re-establishes arc consistency after
/// every trial assignment.
///
/// Each node of the search tree owns an independent [`Assignment`] snapshot;
/// a failed branch is undone by dropping its snapshot. Branch failure is an
/// ordinary outcome reported through the return value, never an error: only
/// the top-level caller reads an exhausted root as "no solution exists".
pub struct BacktrackingSearch<V: ValueEquality> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
}

impl<V: ValueEquality> BacktrackingSearch<V> {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
        }
    }

    /// Solves `csp`: snapshots the base domains, prunes them to arc
    /// consistency, and searches. Counters start from zero on every call.
    pub fn solve(&self, csp: &Csp<V>) -> (Option<Assignment<V>>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut assignment = csp.initial_assignment();

        if !csp.inference(&mut assignment, csp.get_all_arcs(), &mut stats) {
            return (None, stats);
        }

        let solution = self.backtrack(csp, assignment, &mut stats);
        debug!(
            solved = solution.is_some(),
            backtracks = stats.backtracks,
            failures = stats.failures,
            "search finished"
        );
        (solution, stats)
    }

    fn backtrack(
        &self,
        csp: &Csp<V>,
        mut assignment: Assignment<V>,
        stats: &mut SearchStats,
    ) -> Option<Assignment<V>> {
        if assignment.is_complete() {
            return Some(assignment);
        }
        stats.backtracks += 1;

        // An incomplete assignment always has an open variable here: every
        // domain entering this node is non-empty, so incompleteness means
        // some domain still holds at least two values.
        let var = self.variable_heuristic.select_variable(csp, &assignment)?;

        for value in self.value_heuristic.order_values(csp, &assignment, &var) {
            if !csp.is_value_consistent(&var, &value) {
                continue;
            }

            let mut candidate = assignment.clone();
            candidate.assign(var.clone(), value);
            if csp.inference(&mut candidate, csp.get_all_arcs(), stats) {
                if let Some(found) = self.backtrack(csp, candidate, stats) {
                    return Some(found);
                }
            }

            // A failed candidate puts the branching variable's full base
            // domain back, not the propagated one: later candidates are
            // evaluated against values earlier branches had already ruled
            // out. Counters depend on this, so it stays as-is.
            assignment.set_domain(var.clone(), csp.base_domain(&var).clone());
        }

        stats.failures += 1;
        None
    }
}

impl<V: ValueEquality> Default for BacktrackingSearch<V> {
    /// Minimum-remaining-values selection with least-constraining-value
    /// ordering, the configuration used by
    /// [`Csp::backtracking_search`](crate::solver::model::Csp::backtracking_search).
    fn default() -> Self {
        Self::new(
            Box::new(MinimumRemainingValues),
            Box::new(LeastConstrainingValue),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::heuristics::{value::DomainOrder, variable::SelectFirst};
    use crate::solver::model::Variable;

    const COLOURS: [&str; 3] = ["red", "green", "blue"];

    fn colour_map(regions: &[&str], borders: &[(&str, &str)]) -> Csp<&'static str> {
        let mut csp = Csp::new();
        for region in regions {
            csp.add_variable(*region, COLOURS).unwrap();
        }
        for (i, j) in borders {
            csp.add_constraint_one_way(i, j, |x, y| x != y).unwrap();
            csp.add_constraint_one_way(j, i, |x, y| x != y).unwrap();
        }
        csp
    }

    fn assert_borders_differ(
        solution: &Assignment<&'static str>,
        borders: &[(&str, &str)],
    ) {
        for (i, j) in borders {
            let a = solution.value_of(i).unwrap();
            let b = solution.value_of(j).unwrap();
            assert_ne!(a, b, "{i} and {j} share colour {a}");
        }
    }

    #[test]
    fn colours_a_cycle_of_four_regions() {
        let _ = tracing_subscriber::fmt::try_init();

        let borders = [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")];
        let csp = colour_map(&["A", "B", "C", "D"], &borders);

        let (solution, stats) = csp.backtracking_search();
        let solution = solution.unwrap();

        assert!(solution.is_complete());
        assert_borders_differ(&solution, &borders);
        assert_eq!(stats.failures, 0);
    }

    #[test]
    fn colours_the_australia_map() {
        let borders = [
            ("SA", "WA"),
            ("SA", "NT"),
            ("SA", "Q"),
            ("SA", "NSW"),
            ("SA", "V"),
            ("NT", "WA"),
            ("NT", "Q"),
            ("NSW", "Q"),
            ("NSW", "V"),
        ];
        let csp = colour_map(&["WA", "NT", "Q", "NSW", "V", "SA", "T"], &borders);

        let (solution, _) = csp.backtracking_search();
        let solution = solution.unwrap();
        assert!(solution.is_complete());
        assert_borders_differ(&solution, &borders);
    }

    #[test]
    fn solved_assignment_satisfies_every_registered_arc() {
        let borders = [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A"), ("A", "C")];
        let csp = colour_map(&["A", "B", "C", "D"], &borders);

        let (solution, _) = csp.backtracking_search();
        let solution = solution.unwrap();

        for (i, j) in csp.get_all_arcs() {
            let x = solution.value_of(i.as_ref()).unwrap();
            let y = solution.value_of(j.as_ref()).unwrap();
            assert!(
                csp.pair_table(&i, &j).unwrap().allows(x, y),
                "arc ({i}, {j}) violated by ({x:?}, {y:?})"
            );
        }
    }

    #[test]
    fn reports_unsatisfiable_when_values_run_out() {
        // Three pairwise-distinct variables over two values.
        let mut csp: Csp<i32> = Csp::new();
        for name in ["A", "B", "C"] {
            csp.add_variable(name, [1, 2]).unwrap();
        }
        csp.add_all_different_constraint(&["A", "B", "C"]).unwrap();

        let (solution, stats) = csp.backtracking_search();
        assert!(solution.is_none());
        assert!(stats.failures >= 1);
        assert!(stats.backtracks >= 1);
    }

    #[test]
    fn all_different_assignments_are_pairwise_distinct() {
        let mut csp: Csp<i32> = Csp::new();
        let names = ["A", "B", "C", "D"];
        for name in names {
            csp.add_variable(name, [1, 2, 3, 4]).unwrap();
        }
        csp.add_all_different_constraint(&names).unwrap();

        let (solution, _) = csp.backtracking_search();
        let solution = solution.unwrap();

        let mut seen = std::collections::HashSet::new();
        for name in names {
            assert!(seen.insert(*solution.value_of(name).unwrap()));
        }
    }

    #[test]
    fn propagation_alone_finishes_a_nearly_solved_row() {
        // Eight cells of a nine-cell all-different row are fixed to distinct
        // digits; the ninth must fall out of propagation without search.
        let mut csp: Csp<u8> = Csp::new();
        let names: Vec<String> = (0..9).map(|i| format!("cell-{i}")).collect();
        for (i, name) in names.iter().enumerate().take(8) {
            csp.add_variable(name.clone(), [i as u8 + 1]).unwrap();
        }
        csp.add_variable(names[8].clone(), 1..=9).unwrap();
        csp.add_all_different_constraint(&names).unwrap();

        let (solution, stats) = csp.backtracking_search();
        let solution = solution.unwrap();

        assert_eq!(stats.backtracks, 0);
        assert_eq!(solution.value_of("cell-8"), Some(&9));
    }

    #[test]
    fn resolving_an_untouched_model_is_deterministic() {
        let borders = [("A", "B"), ("B", "C"), ("C", "A")];
        let csp = colour_map(&["A", "B", "C"], &borders);

        let first = csp.backtracking_search();
        let second = csp.backtracking_search();

        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
        assert!(first.0.is_some());
    }

    #[test]
    fn counts_one_node_per_branching_decision() {
        // Two unconstrained variables: one node to open each of them.
        let mut csp: Csp<i32> = Csp::new();
        csp.add_variable("A", [1, 2]).unwrap();
        csp.add_variable("B", [1, 2]).unwrap();

        let (solution, stats) = csp.backtracking_search();
        assert!(solution.unwrap().is_complete());
        assert_eq!(stats.backtracks, 2);
        assert_eq!(stats.failures, 0);
    }

    #[test]
    fn alternative_heuristics_reach_a_valid_solution() {
        let borders = [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")];
        let csp = colour_map(&["A", "B", "C", "D"], &borders);

        let search =
            BacktrackingSearch::new(Box::new(SelectFirst), Box::new(DomainOrder));
        let (solution, _) = search.solve(&csp);
        let solution = solution.unwrap();

        assert!(solution.is_complete());
        assert_borders_differ(&solution, &borders);
    }

    #[test]
    fn assigned_variable_keeps_its_base_domain_reachable() {
        // C's fixed value cascades through B onto A.
        let mut csp: Csp<i32> = Csp::new();
        csp.add_variable("A", [1, 2]).unwrap();
        csp.add_variable("B", [1, 2]).unwrap();
        csp.add_variable("C", [2]).unwrap();
        csp.add_constraint_one_way("A", "B", |x, y| x != y).unwrap();
        csp.add_constraint_one_way("B", "A", |x, y| x != y).unwrap();
        csp.add_constraint_one_way("B", "C", |x, y| x != y).unwrap();
        csp.add_constraint_one_way("C", "B", |x, y| x != y).unwrap();

        let (solution, _) = csp.backtracking_search();
        let solution = solution.unwrap();
        assert_eq!(solution.value_of("A"), Some(&2));
        assert_eq!(solution.value_of("B"), Some(&1));
        assert_eq!(solution.value_of("C"), Some(&2));

        // The model's own domains are untouched by the solve.
        assert_eq!(csp.domain("A").unwrap().len(), 2);
        assert_eq!(csp.domain("B").unwrap().len(), 2);

        let ver = Variable::from("B");
        assert_eq!(csp.base_domain(&ver).len(), 2);
    }

    mod prop_tests {
        use proptest::prelude::*;

        use super::*;

        const FOUR_COLOURS: [&str; 4] = ["red", "green", "blue", "yellow"];

        fn random_map() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
            (2..12usize).prop_flat_map(|regions| {
                let edges = proptest::collection::vec(
                    (0..regions, 0..regions)
                        .prop_filter("borders join distinct regions", |(a, b)| a != b)
                        .prop_map(|(a, b)| if a < b { (a, b) } else { (b, a) }),
                    0..=(regions * (regions - 1) / 2).min(20),
                )
                .prop_map(|edges| {
                    let unique: std::collections::HashSet<_> = edges.into_iter().collect();
                    unique.into_iter().collect::<Vec<_>>()
                });
                (Just(regions), edges)
            })
        }

        proptest! {
            #[test]
            fn any_returned_colouring_is_proper((regions, edges) in random_map()) {
                let mut csp: Csp<&'static str> = Csp::new();
                for r in 0..regions {
                    csp.add_variable(format!("r{r}"), FOUR_COLOURS).unwrap();
                }
                for (a, b) in &edges {
                    let (a, b) = (format!("r{a}"), format!("r{b}"));
                    csp.add_constraint_one_way(&a, &b, |x, y| x != y).unwrap();
                    csp.add_constraint_one_way(&b, &a, |x, y| x != y).unwrap();
                }

                let (solution, _) = csp.backtracking_search();
                if let Some(solution) = solution {
                    prop_assert!(solution.is_complete());
                    for (a, b) in &edges {
                        let x = solution.value_of(&format!("r{a}")).unwrap();
                        let y = solution.value_of(&format!("r{b}")).unwrap();
                        prop_assert_ne!(x, y, "regions r{} and r{} share a colour", a, b);
                    }
                }
            }
        }
    }
}
