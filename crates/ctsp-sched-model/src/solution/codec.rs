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

//! Bidirectional converter between route lists and the Model-A
//! arc-indicator vector `x ∈ {0,1}^{A_r}`.

use crate::{
    problem::builder::SyncModel,
    solution::{err::EncodingError, routes::Routing},
};

#[derive(Debug, Clone, Copy)]
pub struct SolutionCodec<'a> {
    model: &'a SyncModel,
}

impl<'a> SolutionCodec<'a> {
    #[inline]
    pub fn new(model: &'a SyncModel) -> Self {
        Self { model }
    }

    /// Encode a routing as the arc-indicator vector.
    ///
    /// Routes carrying no customer (e.g. `[0, 0]`) contribute no arcs.
    pub fn routes_to_arc_vector(&self, routing: &Routing) -> Result<Vec<f64>, EncodingError> {
        let model = self.model;
        let mut x = vec![0.0; model.n_routing_arcs()];

        if routing.is_empty() {
            return Ok(x);
        }
        if routing.routes().len() != model.n_depots() {
            return Err(EncodingError::RouteCount {
                expected: model.n_depots(),
                found: routing.routes().len(),
            });
        }

        for (k, route) in routing.routes().iter().enumerate() {
            if route.iter().all(|&v| v == 0) {
                continue;
            }
            if route.len() < 3 || route[0] != 0 || route[route.len() - 1] != 0 {
                return Err(EncodingError::MalformedRoute { depot: k });
            }

            let visit = |customer: usize| {
                model
                    .op_of(customer, k)
                    .ok_or(EncodingError::MissingOperation {
                        customer,
                        depot: k,
                    })
            };
            let arc = |from: usize, to: usize| {
                model
                    .routing_map()
                    .get(from, to)
                    .ok_or(EncodingError::MissingArc { from, to })
            };

            // Departure to the first customer.
            let mut prev = visit(route[1])?;
            x[arc(k, prev)?] = 1.0;

            for &customer in &route[2..route.len() - 1] {
                let next = visit(customer)?;
                x[arc(prev, next)?] = 1.0;
                prev = next;
            }

            // Last customer back to the return.
            x[arc(prev, model.n_depots() + k)?] = 1.0;
        }

        Ok(x)
    }

    /// Reconstruct per-depot routes by walking out-arcs from each
    /// departure until its return is reached.
    pub fn arc_vector_to_routes(&self, x: &[f64]) -> Result<Routing, EncodingError> {
        let model = self.model;
        let n_ops = model.n_operations();

        let mut next: Vec<Option<usize>> = vec![None; n_ops];
        for (e, arc) in model.routing_arcs().iter().enumerate() {
            if x[e] > 0.5 {
                next[arc.from] = Some(arc.to);
            }
        }

        let mut routes = Vec::with_capacity(model.n_depots());
        for k in 0..model.n_depots() {
            let mut route = vec![0];

            if next[k].is_none() {
                route.push(0);
                routes.push(route);
                continue;
            }

            let mut cur = k;
            let mut steps = 0;
            loop {
                cur = match next[cur] {
                    Some(op) => op,
                    None => return Err(EncodingError::WalkDidNotTerminate { depot: k }),
                };
                steps += 1;
                if steps > n_ops {
                    return Err(EncodingError::WalkDidNotTerminate { depot: k });
                }

                if model.is_return(cur) {
                    if cur != model.n_depots() + k {
                        return Err(EncodingError::WalkDidNotTerminate { depot: k });
                    }
                    route.push(0);
                    break;
                }
                route.push(model.op_customer()[cur]);
            }

            routes.push(route);
        }

        Ok(Routing::new(model.instance_name().to_string(), routes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemType;
    use ctsp_sched_core::prelude::Matrix;

    fn distances(n: usize) -> Matrix<f64> {
        let mut m = Matrix::new(n, n, 10.0);
        for i in 0..n {
            m.set(i, i, 100_000_000.0);
        }
        m
    }

    /// 3 customers over 2 days; customer 2 on both days.
    fn model() -> SyncModel {
        let demands = vec![vec![0, 0], vec![1, 0], vec![1, 1], vec![0, 1]];
        SyncModel::from_parts(
            ProblemType::Ctsp1,
            "codec",
            2,
            3,
            &demands,
            1000.0,
            &[50.0, 50.0, 50.0],
            &distances(4),
        )
    }

    fn routing() -> Routing {
        Routing::new("codec".into(), vec![vec![0, 1, 2, 0], vec![0, 3, 2, 0]])
    }

    #[test]
    fn encode_marks_exactly_the_route_arcs() {
        let m = model();
        let codec = SolutionCodec::new(&m);
        let x = codec.routes_to_arc_vector(&routing()).unwrap();

        assert_eq!(x.iter().filter(|&&v| v > 0.5).count(), 6);

        // Day 1: dep0 -> c1, c1 -> c2, c2 -> ret0.
        let v1 = m.op_of(1, 0).unwrap();
        let v2 = m.op_of(2, 0).unwrap();
        assert_eq!(x[m.routing_map().get(0, v1).unwrap()], 1.0);
        assert_eq!(x[m.routing_map().get(v1, v2).unwrap()], 1.0);
        assert_eq!(x[m.routing_map().get(v2, 2).unwrap()], 1.0);
    }

    #[test]
    fn decode_reconstructs_the_routes() {
        let m = model();
        let codec = SolutionCodec::new(&m);
        let x = codec.routes_to_arc_vector(&routing()).unwrap();
        let back = codec.arc_vector_to_routes(&x).unwrap();
        assert_eq!(back.routes(), routing().routes());
    }

    #[test]
    fn encode_decode_encode_is_identity() {
        let m = model();
        let codec = SolutionCodec::new(&m);
        let x = codec.routes_to_arc_vector(&routing()).unwrap();
        let again = codec
            .routes_to_arc_vector(&codec.arc_vector_to_routes(&x).unwrap())
            .unwrap();
        assert_eq!(again, x);
    }

    #[test]
    fn empty_day_round_trips() {
        let demands = vec![vec![0, 0], vec![1, 0]];
        let m = SyncModel::from_parts(
            ProblemType::Ctsp1,
            "empty-day",
            2,
            1,
            &demands,
            1000.0,
            &[50.0],
            &distances(2),
        );
        let codec = SolutionCodec::new(&m);
        let routing = Routing::new("empty-day".into(), vec![vec![0, 1, 0], vec![0, 0]]);
        let x = codec.routes_to_arc_vector(&routing).unwrap();
        let back = codec.arc_vector_to_routes(&x).unwrap();
        assert_eq!(back.routes(), routing.routes());
    }

    #[test]
    fn unknown_visit_is_an_encoding_error() {
        let m = model();
        let codec = SolutionCodec::new(&m);
        // Customer 1 is not served on day 2.
        let bad = Routing::new("codec".into(), vec![vec![0, 1, 2, 0], vec![0, 1, 0]]);
        let err = codec.routes_to_arc_vector(&bad).unwrap_err();
        assert_eq!(
            err,
            EncodingError::MissingOperation {
                customer: 1,
                depot: 1
            }
        );
    }

    #[test]
    fn broken_walk_is_detected() {
        let m = model();
        let codec = SolutionCodec::new(&m);
        let mut x = vec![0.0; m.n_routing_arcs()];
        // Departure 0 heads to customer 1, but the walk then dead-ends.
        let v1 = m.op_of(1, 0).unwrap();
        x[m.routing_map().get(0, v1).unwrap()] = 1.0;
        let err = codec.arc_vector_to_routes(&x).unwrap_err();
        assert_eq!(err, EncodingError::WalkDidNotTerminate { depot: 0 });
    }

    #[test]
    fn route_count_mismatch_is_detected() {
        let m = model();
        let codec = SolutionCodec::new(&m);
        let bad = Routing::new("codec".into(), vec![vec![0, 1, 0]]);
        let err = codec.routes_to_arc_vector(&bad).unwrap_err();
        assert_eq!(
            err,
            EncodingError::RouteCount {
                expected: 2,
                found: 1
            }
        );
    }
}
