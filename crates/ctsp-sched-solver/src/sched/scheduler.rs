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

//! Schedule realization.
//!
//! Runs the feasibility check in lower-bound mode. A feasible verdict is
//! turned into per-route arrival/start times and customer time windows;
//! an infeasible one is explained by the violated cycles of the dual
//! support graph.

use crate::{
    check::{
        checker::{CheckOutcome, SyncChecker},
        model::Variant,
    },
    sched::{
        err::SchedulingError,
        output::{RouteSchedule, ScheduleDocument, Task},
    },
    support::{infeasible::InfeasibilityReport, path_finder::PathFinder},
};
use ctsp_sched_model::prelude::SyncModel;

const TIME_EPS: f64 = 1e-6;

/// Result of realizing one routing.
#[derive(Debug)]
pub enum ScheduleOutcome {
    Feasible(ScheduleDocument),
    Infeasible(InfeasibilityReport),
}

impl ScheduleOutcome {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, ScheduleOutcome::Feasible(_))
    }
}

#[derive(Debug)]
pub struct Scheduler<'a> {
    model: &'a SyncModel,
    checker: SyncChecker,
    finder: PathFinder<'a>,
}

impl<'a> Scheduler<'a> {
    pub fn new(model: &'a SyncModel) -> Result<Self, SchedulingError> {
        Ok(Self {
            model,
            checker: SyncChecker::new(model, Variant::LowerBound, 1e-6)?,
            finder: PathFinder::new(model),
        })
    }

    /// Realize the routing `x` as a schedule, or explain why none exists.
    pub fn solve(
        &mut self,
        instance_name: &str,
        x: &[f64],
    ) -> Result<ScheduleOutcome, SchedulingError> {
        match self.checker.check(x)? {
            CheckOutcome::Feasible {
                mut start_times, ..
            } => {
                self.normalize(&mut start_times);
                let schedule = self.realize_schedule(&start_times)?;
                let time_windows = self.time_windows(&start_times)?;
                Ok(ScheduleOutcome::Feasible(ScheduleDocument {
                    instance_name: instance_name.to_string(),
                    schedule,
                    time_windows,
                }))
            }
            CheckOutcome::Infeasible {
                alpha,
                beta,
                gamma,
                ..
            } => {
                tracing::info!("routing is not schedulable under the synchronization constraints");
                let cycles = self.finder.find_cycles(&alpha, &gamma);
                Ok(ScheduleOutcome::Infeasible(InfeasibilityReport::new(
                    instance_name.to_string(),
                    x.to_vec(),
                    alpha,
                    beta,
                    gamma,
                    cycles,
                )))
            }
        }
    }

    /// Shift all start times so the earliest departure is at 0. Temporal
    /// differences are preserved.
    fn normalize(&self, s: &mut [f64]) {
        let min = s[..self.model.n_depots()]
            .iter()
            .fold(f64::INFINITY, |acc, &v| acc.min(v));
        for v in s.iter_mut() {
            *v -= min;
        }
    }

    fn realize_schedule(&self, s: &[f64]) -> Result<Vec<RouteSchedule>, SchedulingError> {
        let model = self.model;
        let mut schedule = Vec::with_capacity(model.n_depots());

        for k in 0..model.n_depots() {
            let mut ops: Vec<usize> = (0..model.n_operations())
                .filter(|&op| model.op_depot()[op] == k)
                .collect();

            // A day without customer visits is an empty route.
            if !ops.iter().any(|&op| model.is_visit(op)) {
                schedule.push(RouteSchedule {
                    route: k + 1,
                    tasks: Vec::new(),
                });
                continue;
            }

            ops.sort_by(|&a, &b| {
                s[a].partial_cmp(&s[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(&b))
            });

            // Departure first, return last.
            let dep_pos = ops
                .iter()
                .position(|&op| op == k)
                .expect("every depot partition contains its departure");
            let dep = ops.remove(dep_pos);
            ops.insert(0, dep);
            let ret_pos = ops
                .iter()
                .position(|&op| op == model.n_depots() + k)
                .expect("every depot partition contains its return");
            let last = ops.len() - 1;
            ops.swap(ret_pos, last);

            let mut tasks = Vec::with_capacity(ops.len());
            tasks.push(Task {
                customer: 1,
                arrival_starting: [0.0, 0.0],
            });

            for i in 1..ops.len() {
                let prev = ops[i - 1];
                let cur = ops[i];
                let travel = model.arc_time_matrix().at(prev, cur);

                if s[cur] < s[prev] + travel - TIME_EPS {
                    return Err(SchedulingError::TravelBound {
                        depot: k,
                        prev,
                        cur,
                        gap: s[prev] + travel - s[cur],
                    });
                }

                let arrival = tasks[i - 1].arrival_starting[1] + travel;
                let customer = if i == ops.len() - 1 {
                    1
                } else {
                    model.op_customer()[cur] + 1
                };
                tasks.push(Task {
                    customer,
                    arrival_starting: [arrival, s[cur]],
                });
            }

            schedule.push(RouteSchedule {
                route: k + 1,
                tasks,
            });
        }

        Ok(schedule)
    }

    fn time_windows(&self, s: &[f64]) -> Result<Vec<[f64; 2]>, SchedulingError> {
        let model = self.model;
        let n = model.n_customers();

        let mut lo = vec![f64::INFINITY; n + 1];
        let mut hi = vec![f64::NEG_INFINITY; n + 1];
        for op in 2 * model.n_depots()..model.n_operations() {
            let customer = model.op_customer()[op];
            lo[customer] = lo[customer].min(s[op]);
            hi[customer] = hi[customer].max(s[op]);
        }

        let mut windows = Vec::with_capacity(n + 1);
        windows.push([0.0, model.max_distance()]);

        for customer in 1..=n {
            let width = model.time_window_widths()[customer - 1];

            if lo[customer] > hi[customer] {
                // Customer without a scheduled visit.
                windows.push([0.0, width]);
                continue;
            }

            let spread = hi[customer] - lo[customer];
            if spread > width + TIME_EPS {
                return Err(SchedulingError::WindowWidth {
                    customer,
                    spread,
                    limit: width,
                });
            }

            let center = 0.5 * (lo[customer] + hi[customer]);
            let start = (center - 0.5 * width).max(0.0);
            windows.push([start, start + width]);
        }

        Ok(windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctsp_sched_core::prelude::Matrix;
    use ctsp_sched_model::prelude::{ProblemType, Routing, SolutionCodec};

    fn distances(n: usize, values: &[(usize, usize, f64)]) -> Matrix<f64> {
        let mut m = Matrix::new(n, n, 50.0);
        for i in 0..n {
            m.set(i, i, 100_000_000.0);
        }
        for &(i, j, d) in values {
            m.set(i, j, d);
        }
        m
    }

    fn symmetric(n: usize, values: &[(usize, usize, f64)]) -> Matrix<f64> {
        let mut m = distances(n, values);
        for &(i, j, d) in values {
            m.set(j, i, d);
        }
        m
    }

    fn arc_vector(model: &SyncModel, routes: Vec<Vec<usize>>) -> Vec<f64> {
        let routing = Routing::new(model.instance_name().to_string(), routes);
        SolutionCodec::new(model)
            .routes_to_arc_vector(&routing)
            .unwrap()
    }

    /// Scenario A: two customers, one per day, all distances 10.
    fn scenario_a_model() -> SyncModel {
        let demands = vec![vec![0, 0], vec![1, 0], vec![0, 1]];
        let d = symmetric(3, &[(0, 1, 10.0), (1, 2, 10.0), (0, 2, 10.0)]);
        SyncModel::from_parts(
            ProblemType::Ctsp1,
            "scenario-a",
            2,
            2,
            &demands,
            100.0,
            &[100.0, 100.0],
            &d,
        )
    }

    #[test]
    fn scenario_a_realizes_the_expected_schedule() {
        let model = scenario_a_model();
        let x = arc_vector(&model, vec![vec![0, 1, 0], vec![0, 2, 0]]);
        let mut scheduler = Scheduler::new(&model).unwrap();

        let outcome = scheduler.solve("scenario-a", &x).unwrap();
        let ScheduleOutcome::Feasible(doc) = outcome else {
            panic!("expected a schedule");
        };

        assert_eq!(doc.instance_name, "scenario-a");
        assert_eq!(doc.schedule.len(), 2);

        let day1 = &doc.schedule[0];
        assert_eq!(day1.route, 1);
        let customers: Vec<usize> = day1.tasks.iter().map(|t| t.customer).collect();
        assert_eq!(customers, vec![1, 2, 1]);
        // The visit starts at 10; arrival equals start on a tight chain.
        assert!((day1.tasks[1].arrival_starting[0] - 10.0).abs() < 1e-6);
        assert!((day1.tasks[1].arrival_starting[1] - 10.0).abs() < 1e-6);
        assert!((day1.tasks[2].arrival_starting[1] - 20.0).abs() < 1e-6);

        let day2 = &doc.schedule[1];
        assert_eq!(day2.route, 2);
        assert_eq!(day2.tasks[1].customer, 3);
        assert!((day2.tasks[1].arrival_starting[1] - 10.0).abs() < 1e-6);

        // Windows of width 100 centered on the visit at 10, clamped at 0.
        assert_eq!(doc.time_windows[0], [0.0, 100.0]);
        for c in 1..=2 {
            let [lo, hi] = doc.time_windows[c];
            assert!((hi - lo - 100.0).abs() < 1e-6);
            assert!(lo <= 10.0 + 1e-6 && hi >= 10.0 - 1e-6);
        }
    }

    #[test]
    fn schedule_starts_are_normalized_to_zero() {
        // Scenario E: the earliest departure sits at 0 after realization.
        let model = scenario_a_model();
        let x = arc_vector(&model, vec![vec![0, 1, 0], vec![0, 2, 0]]);
        let mut scheduler = Scheduler::new(&model).unwrap();
        let ScheduleOutcome::Feasible(doc) = scheduler.solve("e", &x).unwrap() else {
            panic!("expected a schedule");
        };
        let min_start = doc
            .schedule
            .iter()
            .filter_map(|r| r.tasks.first())
            .map(|t| t.arrival_starting[1])
            .fold(f64::INFINITY, f64::min);
        assert!(min_start.abs() < 1e-9);
    }

    #[test]
    fn travel_times_are_respected_along_routes() {
        let model = scenario_a_model();
        let x = arc_vector(&model, vec![vec![0, 1, 0], vec![0, 2, 0]]);
        let mut scheduler = Scheduler::new(&model).unwrap();
        let ScheduleOutcome::Feasible(doc) = scheduler.solve("chain", &x).unwrap() else {
            panic!("expected a schedule");
        };
        for route in &doc.schedule {
            for pair in route.tasks.windows(2) {
                let prev_start = pair[0].arrival_starting[1];
                let arrival = pair[1].arrival_starting[0];
                let start = pair[1].arrival_starting[1];
                assert!(arrival >= prev_start - 1e-6);
                assert!(start >= arrival - 1e-6);
            }
        }
    }

    #[test]
    fn zero_demand_instance_yields_empty_routes() {
        let demands = vec![vec![0, 0], vec![0, 0]];
        let d = symmetric(2, &[(0, 1, 10.0)]);
        let model = SyncModel::from_parts(
            ProblemType::Ctsp1,
            "empty",
            2,
            1,
            &demands,
            100.0,
            &[50.0],
            &d,
        );
        let x = vec![0.0; model.n_routing_arcs()];
        let mut scheduler = Scheduler::new(&model).unwrap();
        let ScheduleOutcome::Feasible(doc) = scheduler.solve("empty", &x).unwrap() else {
            panic!("expected a schedule");
        };
        assert_eq!(doc.schedule.len(), 2);
        assert!(doc.schedule.iter().all(|r| r.tasks.is_empty()));
    }

    /// Scenario C: two routes forced apart beyond the shared customer's
    /// window width.
    fn scenario_c_model() -> SyncModel {
        // Locations: 0 depot, 1..3 customers. Day 1 serves customer 1
        // with a long return leg; day 2 reaches customer 1 late via
        // customer 3. max_distance 35 pins both routes.
        let mut d = Matrix::new(4, 4, 50.0);
        for i in 0..4 {
            d.set(i, i, 100_000_000.0);
        }
        d.set(0, 1, 5.0);
        d.set(1, 0, 15.0);
        d.set(0, 3, 20.0);
        d.set(3, 1, 5.0);
        d.set(1, 2, 5.0);
        d.set(2, 0, 5.0);

        let demands = vec![vec![0, 0], vec![1, 1], vec![0, 1], vec![0, 1]];
        SyncModel::from_parts(
            ProblemType::Ctsp2,
            "scenario-c",
            2,
            3,
            &demands,
            35.0,
            &[4.0, 4.0, 4.0],
            &d,
        )
    }

    #[test]
    fn scenario_c_reports_a_sync_cycle() {
        let model = scenario_c_model();
        let x = arc_vector(&model, vec![vec![0, 1, 0], vec![0, 3, 1, 2, 0]]);
        let mut scheduler = Scheduler::new(&model).unwrap();

        let outcome = scheduler.solve("scenario-c", &x).unwrap();
        let ScheduleOutcome::Infeasible(report) = outcome else {
            panic!("expected an infeasibility report");
        };

        assert!(!report.cycles().is_empty());

        // The certificate couples the two visits of customer 1.
        let v_day1 = model.op_of(1, 0).unwrap();
        let v_day2 = model.op_of(1, 1).unwrap();
        let coupling = model.sync_map().get(v_day2, v_day1).unwrap() + model.n_routing_arcs();
        assert!(report.cycles().iter().any(|c| c.contains(&coupling)));

        // The cycle runs through routing arcs of both days.
        let cycle = report
            .cycles()
            .iter()
            .find(|c| c.contains(&coupling))
            .unwrap();
        let depots: std::collections::HashSet<usize> = cycle
            .iter()
            .filter(|&&a| a < model.n_routing_arcs())
            .map(|&a| model.routing_arcs()[a].subset_from)
            .collect();
        assert!(depots.contains(&0) && depots.contains(&1));

        // Re-running the enumeration returns the same canonical cycles.
        let ScheduleOutcome::Infeasible(again) = scheduler.solve("scenario-c", &x).unwrap()
        else {
            panic!("expected an infeasibility report");
        };
        assert_eq!(again.cycles(), report.cycles());
    }

    #[test]
    fn ctsp2_duration_overrun_yields_vacuous_cycles() {
        // Scenario B: the duration certificate closes over a depot sync
        // arc whose reverse does not exist, so no cycle can be formed.
        let demands = vec![vec![0, 0], vec![1, 0], vec![0, 1]];
        let d = symmetric(3, &[(0, 1, 10.0), (1, 2, 10.0), (0, 2, 10.0)]);
        let model = SyncModel::from_parts(
            ProblemType::Ctsp2,
            "scenario-b",
            2,
            2,
            &demands,
            15.0,
            &[100.0, 100.0],
            &d,
        );
        let x = arc_vector(&model, vec![vec![0, 1, 0], vec![0, 2, 0]]);
        let mut scheduler = Scheduler::new(&model).unwrap();

        let ScheduleOutcome::Infeasible(report) = scheduler.solve("scenario-b", &x).unwrap()
        else {
            panic!("expected an infeasibility report");
        };
        assert!(report.cycles().is_empty());
        assert!(report.gamma().iter().any(|&g| g > 1e-3));
    }

    #[test]
    fn repeated_solves_agree() {
        let model = scenario_a_model();
        let x = arc_vector(&model, vec![vec![0, 1, 0], vec![0, 2, 0]]);
        let mut scheduler = Scheduler::new(&model).unwrap();

        let ScheduleOutcome::Feasible(a) = scheduler.solve("idem", &x).unwrap() else {
            panic!("expected a schedule");
        };
        let ScheduleOutcome::Feasible(b) = scheduler.solve("idem", &x).unwrap() else {
            panic!("expected a schedule");
        };
        assert_eq!(a.schedule.len(), b.schedule.len());
        for (ra, rb) in a.schedule.iter().zip(&b.schedule) {
            for (ta, tb) in ra.tasks.iter().zip(&rb.tasks) {
                assert!((ta.arrival_starting[1] - tb.arrival_starting[1]).abs() < 1e-6);
            }
        }
    }
}
