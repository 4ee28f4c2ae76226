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

//! Parametric feasibility check of a routing against the sync model.
//!
//! The dual of the [`PrimalModel`](crate::check::model::PrimalModel) is
//! solved for every candidate routing `x`: its objective and the
//! `x`-dependent constraint coefficients are rewritten in place, the
//! verdict is read off the optimal value, and on infeasibility the
//! variable values are the `α`/`β`/`γ` certificate. On feasibility the
//! start times are recovered from the used-arc restriction of the primal.

use crate::{
    check::model::{PrimalModel, Variant, INF_RESOURCE_THRESHOLD, START_TIME_BOUND},
    lp::{
        backend::{solve_description, CheckerSolver},
        desc::{ModelDescription, ObjSense, RowSense},
        err::SolverError,
    },
};
use ctsp_sched_model::prelude::SyncModel;

/// Economically inactive objective coefficient.
const INACTIVE_COEF: f64 = 1e100;

/// Feasibility threshold on the LP objective.
const FEASIBILITY_EPS: f64 = 1e-3;

/// Verdict of one feasibility check.
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    Feasible {
        /// Start time per operation, un-normalized.
        start_times: Vec<f64>,
        objective: f64,
    },
    Infeasible {
        alpha: Vec<f64>,
        beta: Vec<f64>,
        gamma: Vec<f64>,
        objective: f64,
    },
}

impl CheckOutcome {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, CheckOutcome::Feasible { .. })
    }
}

#[derive(Debug)]
pub struct SyncChecker {
    solver: CheckerSolver,
    variant: Variant,
    tol: f64,
    precision: f64,

    n_operations: usize,
    n_depots: usize,
    n_alpha: usize,
    n_beta: usize,
    n_gamma: usize,
    base_alpha: usize,
    base_beta: usize,
    base_gamma: usize,

    routing_arc_times: Vec<f64>,
    routing_arc_tails: Vec<usize>,
    routing_arc_heads: Vec<usize>,
    sync_rows: Vec<(usize, usize, f64)>,
    outbound: Vec<Vec<usize>>,
    inbound: Vec<Vec<usize>>,
}

impl SyncChecker {
    pub fn new(model: &SyncModel, variant: Variant, tol: f64) -> Result<Self, SolverError> {
        let primal = PrimalModel::new(model, variant);
        let dual = primal.description().dual()?;

        let sync_rows = model
            .sync_arcs()
            .iter()
            .zip(model.sync_arc_times())
            .map(|(arc, &w)| {
                let rhs = if w < INF_RESOURCE_THRESHOLD { w } else { 0.0 };
                (arc.from, arc.to, rhs)
            })
            .collect();

        Ok(Self {
            solver: CheckerSolver::new(dual),
            variant,
            tol,
            precision: 1000.0,
            n_operations: model.n_operations(),
            n_depots: model.n_depots(),
            n_alpha: primal.n_alpha(),
            n_beta: primal.n_beta(),
            n_gamma: primal.n_gamma(),
            base_alpha: primal.base_alpha(),
            base_beta: primal.base_beta(),
            base_gamma: primal.base_gamma(),
            routing_arc_times: model.routing_arc_times().to_vec(),
            routing_arc_tails: model.routing_arcs().iter().map(|a| a.from).collect(),
            routing_arc_heads: model.routing_arcs().iter().map(|a| a.to).collect(),
            sync_rows,
            outbound: model.outbound_arcs().to_vec(),
            inbound: model.inbound_arcs().to_vec(),
        })
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn n_alpha(&self) -> usize {
        self.n_alpha
    }

    #[inline]
    pub fn n_beta(&self) -> usize {
        self.n_beta
    }

    #[inline]
    pub fn n_gamma(&self) -> usize {
        self.n_gamma
    }

    /// Round towards the configured precision grid.
    #[inline]
    fn trunc(&self, v: f64) -> f64 {
        (v * self.precision).round() / self.precision
    }

    #[inline]
    fn is_return(&self, op: usize) -> bool {
        op >= self.n_depots && op < 2 * self.n_depots
    }

    /// Check whether the routing `x` admits a schedule.
    pub fn check(&mut self, x: &[f64]) -> Result<CheckOutcome, SolverError> {
        self.x_to_objective(x);
        self.x_to_coefs(x);

        let solution = match self.solver.solve() {
            Ok(solution) => solution,
            Err(SolverError::Unbounded) => return Err(SolverError::Unbounded),
            Err(e) => {
                // Legacy behavior: a backend failure other than
                // unboundedness is reported and the routing is treated as
                // feasible.
                tracing::error!("LP solve failed, treating routing as feasible: {e}");
                let start_times = self.realize_start_times(x)?;
                return Ok(CheckOutcome::Feasible {
                    start_times,
                    objective: 0.0,
                });
            }
        };

        if solution.objective > -FEASIBILITY_EPS {
            let start_times = self.realize_start_times(x)?;
            Ok(CheckOutcome::Feasible {
                start_times,
                objective: solution.objective,
            })
        } else {
            let v = &solution.values;
            Ok(CheckOutcome::Infeasible {
                alpha: v[self.base_alpha..self.base_alpha + self.n_alpha].to_vec(),
                beta: v[self.base_beta..self.base_beta + self.n_beta].to_vec(),
                gamma: v[self.base_gamma..self.base_gamma + self.n_gamma].to_vec(),
                objective: solution.objective,
            })
        }
    }

    fn x_to_objective(&mut self, x: &[f64]) {
        let mut updates = Vec::with_capacity(self.n_alpha + self.n_beta);

        for e in 0..self.n_alpha {
            let value = if x[e].abs() > self.tol {
                let xt = self.trunc(x[e]);
                self.trunc(-self.routing_arc_times[e] * xt)
            } else {
                0.0
            };
            updates.push((self.base_alpha + e, value));
        }

        if self.n_beta > 0 {
            for e in 0..self.n_beta {
                let value = if self.is_return(self.routing_arc_heads[e]) {
                    if x[e].abs() > self.tol {
                        let xt = self.trunc(x[e]);
                        self.trunc(self.routing_arc_times[e] * xt)
                    } else {
                        0.0
                    }
                } else {
                    INACTIVE_COEF
                };
                updates.push((self.base_beta + e, value));
            }
        }

        self.solver.set_obj_coefs(&updates);
    }

    fn x_to_coefs(&mut self, x: &[f64]) {
        let mut updates = Vec::new();

        for op in 0..self.n_operations {
            for &e in &self.outbound[op] {
                let value = if x[e].abs() > self.tol {
                    self.trunc(x[e])
                } else {
                    0.0
                };
                updates.push((op, self.base_alpha + e, value));
            }
            if self.n_beta > 0 {
                for &e in &self.inbound[op] {
                    let value = if x[e].abs() > self.tol {
                        self.trunc(x[e])
                    } else {
                        0.0
                    };
                    updates.push((op, self.base_beta + e, value));
                }
            }
        }

        self.solver.set_coef_list(&updates);
    }

    /// Solve the used-arc restriction of the primal for start times.
    ///
    /// Minimizing the sum of start times pins the earliest-start
    /// schedule, which keeps repeated checks deterministic.
    fn realize_start_times(&self, x: &[f64]) -> Result<Vec<f64>, SolverError> {
        let mut desc = ModelDescription::new("start_times", ObjSense::Minimize);

        for op in 0..self.n_operations {
            desc.push_col(1.0, (0.0, START_TIME_BOUND), format!("s{op}"));
        }

        for e in 0..self.n_alpha {
            if x[e].abs() <= self.tol {
                continue;
            }
            let xt = self.trunc(x[e]);
            let t = self.routing_arc_times[e];
            let row = desc.push_row(RowSense::LessEq, self.trunc(-t * xt), format!("a{e}"));
            desc.set_coef(row, self.routing_arc_tails[e], xt);
            desc.set_coef(row, self.routing_arc_heads[e], -1.0);

            if self.n_beta > 0 && self.is_return(self.routing_arc_heads[e]) {
                let row = desc.push_row(RowSense::LessEq, self.trunc(t * xt), format!("b{e}"));
                desc.set_coef(row, self.routing_arc_tails[e], -1.0);
                desc.set_coef(row, self.routing_arc_heads[e], xt);
            }
        }

        for (a, &(from, to, rhs)) in self.sync_rows.iter().enumerate() {
            let row = desc.push_row(RowSense::LessEq, rhs, format!("g{a}"));
            desc.set_coef(row, from, 1.0);
            desc.set_coef(row, to, -1.0);
        }

        let solution = solve_description(&desc)?;
        Ok(solution.values)
    }

    /// Dump the parametric dual model for inspection.
    pub fn write_model(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        self.solver.write_model(path)
    }
}
