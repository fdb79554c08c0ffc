//! Consat is a generic finite-domain constraint satisfaction problem (CSP)
//! solver.
//!
//! A problem is modelled as a set of named variables, each with a finite
//! domain of candidate values, plus binary constraints stored as explicit
//! tables of allowed value pairs. The solver interleaves constraint
//! propagation with depth-first search:
//!
//! - **[`Csp`]**: the model. Register variables and constraints, then call
//!   [`Csp::backtracking_search`].
//! - **AC-3 propagation**: [`Csp::inference`] repeatedly revises arcs until
//!   every remaining value has support in its neighbours' domains, detecting
//!   dead branches early.
//! - **Backtracking search**: [`BacktrackingSearch`] branches on one variable
//!   at a time, re-establishing arc consistency after every trial assignment.
//!   Variable and value ordering are pluggable; the defaults are
//!   minimum-remaining-values and least-constraining-value.
//!
//! The solver is generic over the value type: anything `Clone + Debug + Eq +
//! Hash + 'static` can populate a domain.
//!
//! # Example: colouring a cycle of four regions
//!
//! ```
//! use consat::solver::model::Csp;
//!
//! let mut csp: Csp<&str> = Csp::new();
//! for region in ["A", "B", "C", "D"] {
//!     csp.add_variable(region, ["red", "green", "blue"]).unwrap();
//! }
//!
//! // Constraints are directional in storage; register both ways for a
//! // symmetric relation.
//! for (i, j) in [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")] {
//!     csp.add_constraint_one_way(i, j, |x, y| x != y).unwrap();
//!     csp.add_constraint_one_way(j, i, |x, y| x != y).unwrap();
//! }
//!
//! let (solution, stats) = csp.backtracking_search();
//! let solution = solution.expect("a cycle of four regions is colourable");
//!
//! assert!(solution.is_complete());
//! assert_ne!(solution.value_of("A"), solution.value_of("B"));
//! assert_ne!(solution.value_of("B"), solution.value_of("C"));
//! assert_ne!(solution.value_of("C"), solution.value_of("D"));
//! assert_ne!(solution.value_of("D"), solution.value_of("A"));
//! assert_eq!(stats.failures, 0);
//! ```
//!
//! An unsolvable model is not an error: `backtracking_search` returns `None`
//! and the statistics record describes the search that proved it.
//!
//! [`Csp`]: solver::model::Csp
//! [`Csp::backtracking_search`]: solver::model::Csp::backtracking_search
//! [`Csp::inference`]: solver::model::Csp::inference
//! [`BacktrackingSearch`]: solver::search::BacktrackingSearch
pub mod error;
pub mod solver;
