use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    model::{Csp, Variable},
    stats::SearchStats,
    value::ValueEquality,
    work_list::WorkList,
};

impl<V: ValueEquality> Csp<V> {
    /// AC-3: drains the arc worklist, revising each popped arc and
    /// re-enqueuing the neighborhood of any variable whose domain shrank.
    ///
    /// Returns `false` the moment a domain empties, which dooms the current
    /// branch; `true` means the assignment reached an arc-consistent
    /// fixpoint. A `true` result does not imply a full solution exists.
    pub fn inference(
        &self,
        assignment: &mut Assignment<V>,
        queue: Vec<(Variable, Variable)>,
        stats: &mut SearchStats,
    ) -> bool {
        let mut work = WorkList::seeded(queue);
        while let Some((i, j)) = work.pop() {
            stats.revisions += 1;
            let before = assignment.domain(i.as_ref()).map_or(0, |d| d.len());
            if self.revise(assignment, &i, &j) {
                let narrowed = assignment.domain(i.as_ref()).unwrap();
                stats.prunings += (before - narrowed.len()) as u64;
                if narrowed.is_empty() {
                    return false;
                }
                // Everything constrained against `i` may now be prunable,
                // except across the arc we just came from.
                for (k, target) in self.get_all_neighboring_arcs(i.as_ref()) {
                    if k != j {
                        work.push((k, target));
                    }
                }
            }
        }
        debug!("arc consistency fixpoint reached");
        true
    }

    /// Removes from `i`'s domain every value with no legal partner left in
    /// `j`'s domain under the `(i, j)` constraint table. Returns whether any
    /// value was removed. An unconstrained arc never revises.
    pub fn revise(&self, assignment: &mut Assignment<V>, i: &Variable, j: &Variable) -> bool {
        let Some(table) = self.pair_table(i, j) else {
            return false;
        };
        let Some(neighbor) = assignment.domain(j.as_ref()).cloned() else {
            return false;
        };
        let Some(current) = assignment.domain(i.as_ref()) else {
            return false;
        };

        let kept = current.retain(|x| neighbor.iter().any(|y| table.allows(x, y)));
        if kept.len() < current.len() {
            assignment.set_domain(i.clone(), kept);
            true
        } else {
            false
        }
    }
}
