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

//! Operation graph and Model-A construction.
//!
//! The builder turns a CTSP instance into the static arc structure the
//! feasibility LP is written over: operations, the per-depot routing
//! partition, the per-customer synchronization partition, and the dense
//! arc-index artifacts (pair maps, adjacency tables, arc-time matrix).
//!
//! Construction order is fixed so operation and arc indices are stable:
//! departures, returns, customer visits in ascending `(customer, depot)`;
//! then routing arcs per depot subset; then synchronization arcs per
//! customer subset followed by the depot subset.

use crate::{
    instance::Instance,
    problem::{
        ops::{ArcTriplet, Operation, Partition, Subset},
        ProblemType,
    },
};
use ctsp_sched_core::prelude::{Matrix, PairMap};

/// Distances above this bound are treated as forbidden arcs.
const FORBIDDEN_DISTANCE: f64 = 10_000.0;

/// Default entry of the arc-time matrix for pairs without a routing arc.
const NO_ARC_TIME: f64 = 1e9;

const NO_OPERATION: usize = usize::MAX;

/// The static Model-A artifacts of one CTSP instance and routing variant.
///
/// Built once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct SyncModel {
    instance_name: String,
    problem_type: ProblemType,
    n_customers: usize,
    n_depots: usize,
    max_distance: f64,
    time_window_widths: Vec<f64>,

    operations: Vec<Operation>,
    routing: Partition,
    synchronization: Partition,

    routing_arcs: Vec<ArcTriplet>,
    routing_arc_names: Vec<String>,
    routing_arc_times: Vec<f64>,
    sync_arcs: Vec<ArcTriplet>,
    sync_arc_names: Vec<String>,
    sync_arc_times: Vec<f64>,

    routing_map: PairMap,
    sync_map: PairMap,
    outbound_arcs: Vec<Vec<usize>>,
    inbound_arcs: Vec<Vec<usize>>,
    arc_time_matrix: Matrix<f64>,

    op_map: Matrix<usize>,
    op_customer: Vec<usize>,
    op_depot: Vec<usize>,
}

impl SyncModel {
    /// Build the model for an instance; one model depot per day.
    pub fn build(problem_type: ProblemType, instance: &Instance) -> Self {
        Self::from_parts(
            problem_type,
            instance.name(),
            instance.n_days(),
            instance.n_customers(),
            instance.demands(),
            instance.max_distance(),
            instance.time_window_widths(),
            instance.distances(),
        )
    }

    /// Build the model from raw parts.
    ///
    /// `demands` is indexed by location (`0` = depot) and day; `distances`
    /// is a full location matrix; `widths` holds `T[i]` per customer.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        problem_type: ProblemType,
        instance_name: &str,
        n_depots: usize,
        n_customers: usize,
        demands: &[Vec<i32>],
        max_distance: f64,
        widths: &[f64],
        distances: &Matrix<f64>,
    ) -> Self {
        let mut model = Self {
            instance_name: instance_name.to_string(),
            problem_type,
            n_customers,
            n_depots,
            max_distance,
            time_window_widths: widths.to_vec(),
            operations: Vec::new(),
            routing: Partition::new("Routing".into()),
            synchronization: Partition::new("Synchronization".into()),
            routing_arcs: Vec::new(),
            routing_arc_names: Vec::new(),
            routing_arc_times: Vec::new(),
            sync_arcs: Vec::new(),
            sync_arc_names: Vec::new(),
            sync_arc_times: Vec::new(),
            routing_map: PairMap::new(0),
            sync_map: PairMap::new(0),
            outbound_arcs: Vec::new(),
            inbound_arcs: Vec::new(),
            arc_time_matrix: Matrix::new(0, 0, NO_ARC_TIME),
            op_map: Matrix::new(n_customers + 2, n_depots, NO_OPERATION),
            op_customer: Vec::new(),
            op_depot: Vec::new(),
        };

        model.build_operations(demands);
        model.build_routing_partition(distances);
        model.build_synchronization_partition();
        model.build_model_a();
        model
    }

    fn build_operations(&mut self, demands: &[Vec<i32>]) {
        let n = self.n_customers;

        // Depots the customer is delivered from, ascending.
        let mut deliveries: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (c, delivery) in deliveries.iter_mut().enumerate() {
            for k in 0..self.n_depots {
                if demands[c + 1][k] > 0 {
                    delivery.push(k);
                }
            }
        }

        for k in 0..self.n_depots {
            self.operations.push(Operation::new(
                format!("Op_{}", k + 1),
                0,
                k,
                [0.0, self.max_distance],
            ));
        }
        for k in 0..self.n_depots {
            self.operations.push(Operation::new(
                format!("Om_{}", k + 1),
                n + 1,
                k,
                [0.0, self.max_distance],
            ));
        }
        for (c, delivery) in deliveries.iter().enumerate() {
            for &k in delivery {
                let id = self.operations.len();
                self.op_map.set(c + 1, k, id);
                self.operations.push(Operation::new(
                    format!("c{}_{}", c + 2, k + 1),
                    c + 1,
                    k,
                    [1.0, self.time_window_widths[c]],
                ));
            }
        }

        self.op_customer = self.operations.iter().map(|o| o.customer()).collect();
        self.op_depot = self.operations.iter().map(|o| o.depot()).collect();
    }

    /// Location of an operation in the distance matrix. Return operations
    /// alias the depot location.
    #[inline]
    fn location_of(&self, op: usize) -> usize {
        self.op_customer[op] % (self.n_customers + 1)
    }

    fn build_routing_partition(&mut self, distances: &Matrix<f64>) {
        for k in 0..self.n_depots {
            let mut subset = Subset::new(
                format!("Day {}", k + 1),
                vec![self.operations.len() as f64, self.max_distance],
            );
            for op in 0..self.operations.len() {
                if self.op_depot[op] == k {
                    subset.push_operation(op);
                }
            }

            let departure = k;
            let ret = self.n_depots + k;
            let members = subset.operations().to_vec();

            for &i in &members {
                // Returns have no outgoing arcs.
                if i == ret {
                    continue;
                }
                for &j in &members {
                    if j == i || j == departure || (i == departure && j == ret) {
                        continue;
                    }

                    let loc_i = self.location_of(i);
                    let loc_j = self.location_of(j);
                    let mut distance = distances.at(loc_i, loc_j);
                    let mut time = distance;

                    if distance > FORBIDDEN_DISTANCE {
                        tracing::warn!(
                            "Distance between {} and {} is too large: {}",
                            loc_i + 1,
                            loc_j + 1,
                            distance
                        );
                        distance = 0.0;
                        time = 0.0;
                    }

                    subset.push_arc(ArcTriplet::new(i, j, k, k), vec![distance, time]);
                }
            }

            self.routing.push(subset);
        }
    }

    fn build_synchronization_partition(&mut self) {
        for c in 0..self.n_customers {
            let width = self.time_window_widths[c];
            let mut subset = Subset::new(format!("c_{}", c + 1), vec![width]);
            for op in 2 * self.n_depots..self.operations.len() {
                if self.op_customer[op] == c + 1 {
                    subset.push_operation(op);
                }
            }

            let members = subset.operations().to_vec();
            for &i in &members {
                for &j in &members {
                    if i != j {
                        subset.push_arc(ArcTriplet::new(i, j, c, c), vec![width]);
                    }
                }
            }

            self.synchronization.push(subset);
        }

        let mut depots = Subset::new("Depots".into(), vec![self.max_distance]);
        for op in 0..2 * self.n_depots {
            depots.push_operation(op);
        }

        match self.problem_type {
            ProblemType::Ctsp1 => {
                // Shared depot: all departures are coupled with zero slack.
                for i in 0..self.n_depots {
                    for j in 0..self.n_depots {
                        if i != j {
                            depots.push_arc(ArcTriplet::new(i, j, 0, 0), vec![0.0]);
                        }
                    }
                }
            }
            ProblemType::Ctsp2 => {
                // Every return couples to every departure through the
                // route-duration bound.
                for i in 0..self.n_depots {
                    let ret = self.n_depots + i;
                    for j in 0..self.n_depots {
                        depots.push_arc(ArcTriplet::new(ret, j, i, j), vec![self.max_distance]);
                    }
                }
            }
        }

        self.synchronization.push(depots);
    }

    fn build_model_a(&mut self) {
        let n_ops = self.operations.len();

        for subset in self.routing.subsets() {
            for sa in subset.arcs() {
                self.routing_arcs.push(sa.arc);
                self.routing_arc_names.push(self.arc_name(&sa.arc));
                self.routing_arc_times.push(sa.resources[1]);
            }
        }
        for subset in self.synchronization.subsets() {
            for sa in subset.arcs() {
                self.sync_arcs.push(sa.arc);
                self.sync_arc_names.push(self.arc_name(&sa.arc));
                self.sync_arc_times.push(sa.resources[0]);
            }
        }

        self.routing_map = PairMap::new(n_ops);
        self.routing_map
            .assign(self.routing_arcs.iter().map(|a| (a.from, a.to)));
        self.sync_map = PairMap::new(n_ops);
        self.sync_map
            .assign(self.sync_arcs.iter().map(|a| (a.from, a.to)));

        self.outbound_arcs = vec![Vec::new(); n_ops];
        self.inbound_arcs = vec![Vec::new(); n_ops];
        self.arc_time_matrix = Matrix::new(n_ops, n_ops, NO_ARC_TIME);
        for (e, arc) in self.routing_arcs.iter().enumerate() {
            self.outbound_arcs[arc.from].push(e);
            self.inbound_arcs[arc.to].push(e);
            self.arc_time_matrix
                .set(arc.from, arc.to, self.routing_arc_times[e]);
        }
    }

    fn arc_name(&self, arc: &ArcTriplet) -> String {
        format!(
            "({}_{})",
            self.operations[arc.from].name(),
            self.operations[arc.to].name()
        )
    }

    #[inline]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    #[inline]
    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    #[inline]
    pub fn n_customers(&self) -> usize {
        self.n_customers
    }

    #[inline]
    pub fn n_depots(&self) -> usize {
        self.n_depots
    }

    #[inline]
    pub fn n_operations(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    #[inline]
    pub fn time_window_widths(&self) -> &[f64] {
        &self.time_window_widths
    }

    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    #[inline]
    pub fn routing_partition(&self) -> &Partition {
        &self.routing
    }

    #[inline]
    pub fn synchronization_partition(&self) -> &Partition {
        &self.synchronization
    }

    #[inline]
    pub fn routing_arcs(&self) -> &[ArcTriplet] {
        &self.routing_arcs
    }

    #[inline]
    pub fn routing_arc_names(&self) -> &[String] {
        &self.routing_arc_names
    }

    #[inline]
    pub fn routing_arc_times(&self) -> &[f64] {
        &self.routing_arc_times
    }

    #[inline]
    pub fn n_routing_arcs(&self) -> usize {
        self.routing_arcs.len()
    }

    #[inline]
    pub fn sync_arcs(&self) -> &[ArcTriplet] {
        &self.sync_arcs
    }

    #[inline]
    pub fn sync_arc_names(&self) -> &[String] {
        &self.sync_arc_names
    }

    #[inline]
    pub fn sync_arc_times(&self) -> &[f64] {
        &self.sync_arc_times
    }

    #[inline]
    pub fn n_sync_arcs(&self) -> usize {
        self.sync_arcs.len()
    }

    #[inline]
    pub fn routing_map(&self) -> &PairMap {
        &self.routing_map
    }

    #[inline]
    pub fn sync_map(&self) -> &PairMap {
        &self.sync_map
    }

    /// Routing arc indices leaving each operation.
    #[inline]
    pub fn outbound_arcs(&self) -> &[Vec<usize>] {
        &self.outbound_arcs
    }

    /// Routing arc indices entering each operation.
    #[inline]
    pub fn inbound_arcs(&self) -> &[Vec<usize>] {
        &self.inbound_arcs
    }

    /// Travel time between operations; `1e9` where no routing arc exists.
    #[inline]
    pub fn arc_time_matrix(&self) -> &Matrix<f64> {
        &self.arc_time_matrix
    }

    /// Customer id of each operation (0 / `n_customers + 1` for sentinels).
    #[inline]
    pub fn op_customer(&self) -> &[usize] {
        &self.op_customer
    }

    /// Depot of each operation.
    #[inline]
    pub fn op_depot(&self) -> &[usize] {
        &self.op_depot
    }

    /// Visit operation serving `customer` (1-based) from `depot`, if any.
    #[inline]
    pub fn op_of(&self, customer: usize, depot: usize) -> Option<usize> {
        if customer >= self.op_map.rows() || depot >= self.op_map.cols() {
            return None;
        }
        match self.op_map.at(customer, depot) {
            NO_OPERATION => None,
            op => Some(op),
        }
    }

    #[inline]
    pub fn is_departure(&self, op: usize) -> bool {
        op < self.n_depots
    }

    #[inline]
    pub fn is_return(&self, op: usize) -> bool {
        op >= self.n_depots && op < 2 * self.n_depots
    }

    #[inline]
    pub fn is_visit(&self, op: usize) -> bool {
        op >= 2 * self.n_depots
    }
}
