// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Cycle enumeration over the dual support graph.
//!
//! After an infeasible check, the support graph is rebuilt from the
//! active dual values (`α`, `γ` above tolerance). Every active sync arc
//! seeds a DFS path search; each simple path closed by the reverse sync
//! arc is a cycle certifying the infeasibility. Cycles that select the
//! same routing arcs are duplicates and collapse to one canonical
//! representative.

use ctsp_sched_core::prelude::SearchGraph;
use ctsp_sched_model::prelude::SyncModel;
use std::collections::HashSet;

const ACTIVITY_TOL: f64 = 1e-3;

#[derive(Debug)]
pub struct PathFinder<'a> {
    model: &'a SyncModel,
    tol: f64,
    graph: SearchGraph,
}

impl<'a> PathFinder<'a> {
    pub fn new(model: &'a SyncModel) -> Self {
        Self {
            model,
            tol: ACTIVITY_TOL,
            graph: SearchGraph::new(model.n_operations()),
        }
    }

    /// Enumerate the canonical violated cycles of one dual certificate.
    ///
    /// Cycles are arc-index sequences: routing arcs keep their index,
    /// sync arc `a` is stored as `a + n_routing_arcs`.
    pub fn find_cycles(&mut self, alpha: &[f64], gamma: &[f64]) -> Vec<Vec<usize>> {
        let seeds = self.update_support_graph(alpha, gamma);

        let mut cycles = Vec::new();
        let mut paths = Vec::new();

        for &(source, target) in &seeds {
            // The cycle closes over the reverse sync arc; a seed without
            // one cannot form a cycle.
            let Some(closing) = self.model.sync_map().get(target, source) else {
                tracing::debug!(
                    source,
                    target,
                    "active sync arc has no reverse arc, skipping seed"
                );
                continue;
            };
            let closing = closing + self.model.n_routing_arcs();

            self.graph.simple_paths(source, target, &mut paths);
            if paths.is_empty() {
                tracing::debug!(source, target, "no support path for active sync arc");
                continue;
            }

            for path in &paths {
                let mut cycle = self.sequence_to_arcs(path);
                cycle.push(closing);
                cycles.push(cycle);
            }
        }

        Self::remove_duplicate_cycles(self.model.n_routing_arcs(), &mut cycles);
        cycles
    }

    /// Rebuild the support graph; returns the seed arcs for the search.
    fn update_support_graph(&mut self, alpha: &[f64], gamma: &[f64]) -> Vec<(usize, usize)> {
        self.graph.clear();

        let model = self.model;
        let mut active_depots = HashSet::new();

        for (e, arc) in model.routing_arcs().iter().enumerate() {
            if alpha[e] > self.tol {
                self.graph.add_arc(arc.from, arc.to);
                active_depots.insert(arc.subset_from);
            }
        }

        let mut seeds = Vec::new();
        for (a, arc) in model.sync_arcs().iter().enumerate() {
            if gamma[a] <= self.tol {
                continue;
            }
            self.graph.add_arc(arc.from, arc.to);

            if model.is_visit(arc.from) || model.is_visit(arc.to) {
                // Customer coupling: search against the arc direction so
                // the arc itself closes the cycle.
                seeds.push((arc.to, arc.from));
            } else if active_depots.contains(&model.op_depot()[arc.from])
                && active_depots.contains(&model.op_depot()[arc.to])
            {
                seeds.push((arc.from, arc.to));
            }
        }

        seeds
    }

    /// Translate a vertex path into arc indices.
    fn sequence_to_arcs(&self, path: &[usize]) -> Vec<usize> {
        let model = self.model;
        let mut arcs = Vec::with_capacity(path.len());
        for pair in path.windows(2) {
            let (s, t) = (pair[0], pair[1]);
            if let Some(e) = model.routing_map().get(s, t) {
                arcs.push(e);
            } else if let Some(a) = model.sync_map().get(s, t) {
                arcs.push(a + model.n_routing_arcs());
            } else {
                debug_assert!(false, "support edge {s}->{t} is not a model arc");
            }
        }
        arcs
    }

    /// Drop cycles whose routing-arc set was already seen.
    fn remove_duplicate_cycles(n_routing_arcs: usize, cycles: &mut Vec<Vec<usize>>) {
        if cycles.len() <= 1 {
            return;
        }

        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        cycles.retain(|cycle| {
            let mut key: Vec<usize> = cycle
                .iter()
                .copied()
                .filter(|&arc| arc < n_routing_arcs)
                .collect();
            key.sort_unstable();
            seen.insert(key)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctsp_sched_core::prelude::Matrix;
    use ctsp_sched_model::prelude::ProblemType;

    fn symmetric(n: usize, values: &[(usize, usize, f64)]) -> Matrix<f64> {
        let mut m = Matrix::new(n, n, 0.0);
        for i in 0..n {
            m.set(i, i, 100_000_000.0);
        }
        for &(i, j, d) in values {
            m.set(i, j, d);
            m.set(j, i, d);
        }
        m
    }

    /// One customer visited on both of two days.
    fn two_visit_model() -> SyncModel {
        let demands = vec![vec![0, 0], vec![1, 1]];
        let distances = symmetric(2, &[(0, 1, 10.0)]);
        SyncModel::from_parts(
            ProblemType::Ctsp1,
            "pf",
            2,
            1,
            &demands,
            100.0,
            &[5.0],
            &distances,
        )
    }

    #[test]
    fn cycle_closes_over_the_reverse_sync_arc() {
        let m = two_visit_model();
        // Ops: dep 0/1, ret 2/3, visits 4 (day 1) and 5 (day 2).
        let mut alpha = vec![0.0; m.n_routing_arcs()];
        let mut gamma = vec![0.0; m.n_sync_arcs()];

        // A routed day plus both directions of the customer coupling.
        alpha[m.routing_map().get(0, 4).unwrap()] = 1.0;
        alpha[m.routing_map().get(4, 2).unwrap()] = 1.0;
        gamma[m.sync_map().get(4, 5).unwrap()] = 1.0;
        gamma[m.sync_map().get(5, 4).unwrap()] = 1.0;

        let mut finder = PathFinder::new(&m);
        let cycles = finder.find_cycles(&alpha, &gamma);

        // Both seed directions find the two-arc cycle over the visits;
        // they share the (empty) routing-arc set, so one survives.
        assert_eq!(cycles.len(), 1);
        let fwd = m.sync_map().get(4, 5).unwrap() + m.n_routing_arcs();
        let rev = m.sync_map().get(5, 4).unwrap() + m.n_routing_arcs();
        assert!(cycles[0].contains(&fwd));
        assert!(cycles[0].contains(&rev));
    }

    #[test]
    fn duplicate_routing_sets_collapse() {
        let n_routing = 4;
        let mut cycles = vec![
            vec![0, 1, n_routing + 2],
            vec![1, 0, n_routing + 3],
            vec![0, 2, n_routing + 2],
        ];
        PathFinder::remove_duplicate_cycles(n_routing, &mut cycles);
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0], vec![0, 1, n_routing + 2]);
        assert_eq!(cycles[1], vec![0, 2, n_routing + 2]);
    }

    #[test]
    fn inactive_arcs_stay_out_of_the_support_graph() {
        let m = two_visit_model();
        let alpha = vec![0.0; m.n_routing_arcs()];
        let gamma = vec![0.0; m.n_sync_arcs()];
        let mut finder = PathFinder::new(&m);
        assert!(finder.find_cycles(&alpha, &gamma).is_empty());
    }
}
