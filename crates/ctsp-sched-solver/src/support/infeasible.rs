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

//! Infeasibility certificate and its file renderings.

use ctsp_sched_model::prelude::SyncModel;
use std::io::Write;

/// Activity tolerance of the graph rendering. Finer than the path
/// finder's search tolerance on purpose.
const RENDER_TOL: f64 = 1e-6;

/// The dual certificate of an unschedulable routing, with the violated
/// cycles that explain it.
#[derive(Debug, Clone)]
pub struct InfeasibilityReport {
    instance_name: String,
    x: Vec<f64>,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    gamma: Vec<f64>,
    cycles: Vec<Vec<usize>>,
}

impl InfeasibilityReport {
    pub fn new(
        instance_name: String,
        x: Vec<f64>,
        alpha: Vec<f64>,
        beta: Vec<f64>,
        gamma: Vec<f64>,
        cycles: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            instance_name,
            x,
            alpha,
            beta,
            gamma,
            cycles,
        }
    }

    #[inline]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    #[inline]
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    #[inline]
    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    #[inline]
    pub fn gamma(&self) -> &[f64] {
        &self.gamma
    }

    #[inline]
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    fn arc_name<'m>(&self, model: &'m SyncModel, arc: usize) -> &'m str {
        if arc < model.n_routing_arcs() {
            &model.routing_arc_names()[arc]
        } else {
            &model.sync_arc_names()[arc - model.n_routing_arcs()]
        }
    }

    /// Plain-text listing of the violated cycles, one per line.
    pub fn write_infeasible_paths<W: Write>(
        &self,
        model: &SyncModel,
        w: &mut W,
    ) -> std::io::Result<()> {
        writeln!(w, "Infeasible paths detected in the solution:")?;
        for cycle in &self.cycles {
            for &arc in cycle {
                write!(w, "{} ", self.arc_name(model, arc))?;
            }
            writeln!(w)?;
            writeln!(w)?;
        }
        Ok(())
    }

    /// DOT rendering of the primal/dual support graph.
    ///
    /// Routing arcs: blue where the dual agrees with the routing, green
    /// where both are active, gray where only the routing uses the arc.
    /// Active sync arcs are red. Line styles bin the magnitudes.
    pub fn write_primal_dual_graph<W: Write>(
        &self,
        model: &SyncModel,
        w: &mut W,
    ) -> std::io::Result<()> {
        writeln!(w)?;
        writeln!(w, "digraph G {{ \n\nrankdir=LR; \noverlap=false \n ")?;

        let names = model.operations();
        for (e, arc) in model.routing_arcs().iter().enumerate() {
            let alpha = self.alpha[e];
            let x = self.x[e];
            let from = names[arc.from].name();
            let to = names[arc.to].name();

            if alpha.abs() > RENDER_TOL && (x - alpha).abs() < RENDER_TOL {
                writeln!(
                    w,
                    "{:>5} -> {:>5} [ fontsize=\"10pt\" , label = \" {:.2}\", color =\"blue\" , style =\"{}\"  ] ",
                    from,
                    to,
                    alpha,
                    style_bin(alpha)
                )?;
            } else if x > RENDER_TOL {
                if alpha > RENDER_TOL {
                    writeln!(
                        w,
                        "{:>5} -> {:>5} [ fontsize=\"10pt\", label = \" {:.2} / {:.2}\", color =\"green\", style =\"{}\"  ] ",
                        from,
                        to,
                        x,
                        alpha,
                        style_bin(x)
                    )?;
                } else {
                    writeln!(
                        w,
                        "{:>5} -> {:>5} [ fontsize=\"10pt\", label = \" {:.2}\", color =\"gray\", style =\"{}\"  ] ",
                        from,
                        to,
                        x,
                        style_bin(x)
                    )?;
                }
            } else if alpha.abs() > RENDER_TOL {
                writeln!(
                    w,
                    "{:>5} -> {:>5} [ fontsize=\"10pt\", label = \" {:.2}\", color =\"blue\" ]",
                    from, to, alpha
                )?;
            }
        }

        for (a, arc) in model.sync_arcs().iter().enumerate() {
            let gamma = self.gamma[a];
            if gamma > RENDER_TOL {
                writeln!(
                    w,
                    "{:>5} -> {:>5} [ fontsize=\"10pt\" , style =\"{}\" , color =\"red\" ]",
                    names[arc.from].name(),
                    names[arc.to].name(),
                    style_bin(gamma)
                )?;
            }
        }

        writeln!(w, "}}")
    }
}

fn style_bin(v: f64) -> &'static str {
    if v > 0.9 {
        "solid"
    } else if v > 0.4 {
        "dashed"
    } else {
        "dotted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctsp_sched_core::prelude::Matrix;
    use ctsp_sched_model::prelude::{ProblemType, SyncModel};

    fn model() -> SyncModel {
        let demands = vec![vec![0, 0], vec![1, 1]];
        let mut distances = Matrix::new(2, 2, 10.0);
        distances.set(0, 0, 100_000_000.0);
        distances.set(1, 1, 100_000_000.0);
        SyncModel::from_parts(
            ProblemType::Ctsp1,
            "report",
            2,
            1,
            &demands,
            100.0,
            &[5.0],
            &distances,
        )
    }

    fn report(m: &SyncModel) -> InfeasibilityReport {
        let mut alpha = vec![0.0; m.n_routing_arcs()];
        let mut gamma = vec![0.0; m.n_sync_arcs()];
        let mut x = vec![0.0; m.n_routing_arcs()];

        let e = m.routing_map().get(0, 4).unwrap();
        alpha[e] = 1.0;
        x[e] = 1.0;
        let lone = m.routing_map().get(1, 5).unwrap();
        x[lone] = 1.0;
        let a = m.sync_map().get(4, 5).unwrap();
        gamma[a] = 1.0;

        let cycle = vec![e, a + m.n_routing_arcs()];
        InfeasibilityReport::new("report".into(), x, alpha, vec![], gamma, vec![cycle])
    }

    #[test]
    fn path_listing_uses_arc_names() {
        let m = model();
        let r = report(&m);
        let mut buf = Vec::new();
        r.write_infeasible_paths(&m, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Infeasible paths detected in the solution:"));
        assert!(text.contains("(Op_1_c2_1)"));
        assert!(text.contains("(c2_1_c2_2)"));
    }

    #[test]
    fn dot_graph_colors_arcs_by_role() {
        let m = model();
        let r = report(&m);
        let mut buf = Vec::new();
        r.write_primal_dual_graph(&m, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("digraph G {"));
        assert!(text.contains("rankdir=LR;"));
        // Routing arc carried by both x and alpha: blue, solid.
        assert!(text.contains("color =\"blue\""));
        assert!(text.contains("style =\"solid\""));
        // Routing arc carried by x alone: gray.
        assert!(text.contains("color =\"gray\""));
        // Active sync arc: red.
        assert!(text.contains("color =\"red\""));
        assert!(text.trim_end().ends_with('}'));
    }
}
