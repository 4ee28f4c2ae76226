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

//! Parametric feasibility LP over the Model-A structure.
//!
//! Stated as a primal over per-operation start times with one row per
//! arc; the checker solves the transposed (dual) model, whose variables
//! are the `α`/`β`/`γ` blocks and whose row duals are the start times.

use crate::lp::desc::{ModelDescription, ObjSense, RowSense};
use ctsp_sched_model::prelude::SyncModel;

/// Sync-arc resources at or above this threshold stand for "unbounded"
/// and contribute a zero right-hand side.
pub const INF_RESOURCE_THRESHOLD: f64 = 1e6;

/// Upper bound of the start-time variables.
pub const START_TIME_BOUND: f64 = 1e10;

/// Which variable blocks the LP carries.
///
/// `Full` keeps the route-duration block `β`; `LowerBound` drops it and
/// is the variant the scheduler uses to extract start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Full,
    LowerBound,
}

/// The feasibility LP in primal form, plus the block layout.
#[derive(Debug, Clone)]
pub struct PrimalModel {
    desc: ModelDescription,
    variant: Variant,
    n_alpha: usize,
    n_beta: usize,
    n_gamma: usize,
}

impl PrimalModel {
    pub fn new(model: &SyncModel, variant: Variant) -> Self {
        let n_alpha = model.n_routing_arcs();
        let n_beta = match variant {
            Variant::Full => model.n_routing_arcs(),
            Variant::LowerBound => 0,
        };
        let n_gamma = model.n_sync_arcs();

        let mut desc = ModelDescription::new(
            match variant {
                Variant::Full => "ctsp_primal_model",
                Variant::LowerBound => "ctsp_lb_primal_model",
            },
            ObjSense::Maximize,
        );

        for op in model.operations() {
            desc.push_col(0.0, (0.0, START_TIME_BOUND), format!("Operation_{}", op.name()));
        }

        // Alpha block: arrival-time propagation along routing arcs.
        for (e, arc) in model.routing_arcs().iter().enumerate() {
            let t = model.routing_arc_times()[e];
            let row = desc.push_row(
                RowSense::LessEq,
                -t,
                format!("alpha{}", model.routing_arc_names()[e]),
            );
            desc.set_coef(row, arc.from, 1.0);
            desc.set_coef(row, arc.to, -1.0);
        }

        // Beta block: route-duration accounting, only in the full model.
        if n_beta > 0 {
            for (e, arc) in model.routing_arcs().iter().enumerate() {
                let t = model.routing_arc_times()[e];
                let row = desc.push_row(
                    RowSense::LessEq,
                    t,
                    format!("beta{}", model.routing_arc_names()[e]),
                );
                desc.set_coef(row, arc.from, -1.0);
                desc.set_coef(row, arc.to, 1.0);
            }
        }

        // Gamma block: synchronization coupling.
        for (a, arc) in model.sync_arcs().iter().enumerate() {
            let w = model.sync_arc_times()[a];
            let rhs = if w < INF_RESOURCE_THRESHOLD { w } else { 0.0 };
            let row = desc.push_row(
                RowSense::LessEq,
                rhs,
                format!("gamma{}", model.sync_arc_names()[a]),
            );
            desc.set_coef(row, arc.from, 1.0);
            desc.set_coef(row, arc.to, -1.0);
        }

        Self {
            desc,
            variant,
            n_alpha,
            n_beta,
            n_gamma,
        }
    }

    #[inline]
    pub fn description(&self) -> &ModelDescription {
        &self.desc
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

    #[inline]
    pub fn base_alpha(&self) -> usize {
        0
    }

    #[inline]
    pub fn base_beta(&self) -> usize {
        self.n_alpha
    }

    #[inline]
    pub fn base_gamma(&self) -> usize {
        self.n_alpha + self.n_beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctsp_sched_core::prelude::Matrix;
    use ctsp_sched_model::prelude::ProblemType;

    fn model() -> SyncModel {
        let demands = vec![vec![0, 0], vec![1, 1]];
        let mut distances = Matrix::new(2, 2, 10.0);
        distances.set(0, 0, 100_000_000.0);
        distances.set(1, 1, 100_000_000.0);
        SyncModel::from_parts(
            ProblemType::Ctsp1,
            "lp",
            2,
            1,
            &demands,
            50.0,
            &[20.0],
            &distances,
        )
    }

    #[test]
    fn lower_bound_variant_drops_beta() {
        let m = model();
        let lb = PrimalModel::new(&m, Variant::LowerBound);
        assert_eq!(lb.n_beta(), 0);
        assert_eq!(
            lb.description().n_rows(),
            m.n_routing_arcs() + m.n_sync_arcs()
        );
        assert_eq!(lb.description().n_cols(), m.n_operations());

        let full = PrimalModel::new(&m, Variant::Full);
        assert_eq!(full.n_beta(), m.n_routing_arcs());
        assert_eq!(
            full.description().n_rows(),
            2 * m.n_routing_arcs() + m.n_sync_arcs()
        );
    }

    #[test]
    fn alpha_rows_carry_negative_travel_times() {
        let m = model();
        let lb = PrimalModel::new(&m, Variant::LowerBound);
        let desc = lb.description();
        for (e, arc) in m.routing_arcs().iter().enumerate() {
            assert_eq!(desc.rhs()[e], -m.routing_arc_times()[e]);
            assert_eq!(desc.coef(e, arc.from), Some(1.0));
            assert_eq!(desc.coef(e, arc.to), Some(-1.0));
        }
    }

    #[test]
    fn gamma_rhs_clamps_unbounded_resources() {
        let demands = vec![vec![0, 0], vec![1, 1]];
        let mut distances = Matrix::new(2, 2, 10.0);
        distances.set(0, 0, 100_000_000.0);
        distances.set(1, 1, 100_000_000.0);
        let m = SyncModel::from_parts(
            ProblemType::Ctsp2,
            "lp",
            2,
            1,
            &demands,
            999_999_999.0,
            &[20.0],
            &distances,
        );
        let lb = PrimalModel::new(&m, Variant::LowerBound);
        let desc = lb.description();

        // Depot sync arcs carry the disabled max-distance: rhs drops to 0.
        let a = m.sync_map().get(m.n_depots(), 0).unwrap();
        assert_eq!(desc.rhs()[lb.base_gamma() + a], 0.0);
    }

    #[test]
    fn dual_has_unit_boxed_arc_columns() {
        let m = model();
        let lb = PrimalModel::new(&m, Variant::LowerBound);
        let dual = lb.description().dual().unwrap();
        assert_eq!(dual.n_cols(), m.n_routing_arcs() + m.n_sync_arcs());
        assert_eq!(dual.n_rows(), m.n_operations());
        assert_eq!(dual.obj_sense(), ObjSense::Minimize);
        for &b in dual.bounds() {
            assert_eq!(b, (0.0, 1.0));
        }
    }
}
