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

//! Codec round trips on a euclidean multi-day instance.

use ctsp_sched_model::prelude::{Instance, ProblemType, Routing, SolutionCodec, SyncModel};

/// 5 customers over 3 days around a central depot.
const FIVE_CUSTOMERS: &str = "\
NAME: five9
TYPE: CTSP
COMMENT: 180.0, 174.0
DIMENSION: 6
EDGE_WEIGHT_TYPE: EUC_2D
NUM_DAYS: 3
DISTANCE: 200
MAXIMUM_ALLOWABLE_DIFFERENTIAL: 60
NODE_COORD_SECTION
1 0.0 0.0
2 10.0 0.0
3 0.0 10.0
4 -10.0 0.0
5 0.0 -10.0
6 7.0 7.0
DEMAND_SECTION
1 0 0 0
2 1 0 1
3 1 1 0
4 0 1 1
5 1 0 0
6 0 1 1
EOF
";

fn routing() -> Routing {
    Routing::new(
        "five9".into(),
        vec![
            vec![0, 1, 2, 4, 0],
            vec![0, 2, 5, 3, 0],
            vec![0, 3, 5, 1, 0],
        ],
    )
}

#[test]
fn encode_decode_reencode_is_identity() {
    let instance = Instance::from_str(FIVE_CUSTOMERS).unwrap();
    assert_eq!(instance.n_customers(), 5);
    assert_eq!(instance.n_days(), 3);

    let model = SyncModel::build(ProblemType::Ctsp1, &instance);
    let codec = SolutionCodec::new(&model);

    let x = codec.routes_to_arc_vector(&routing()).unwrap();
    let decoded = codec.arc_vector_to_routes(&x).unwrap();
    let x_again = codec.routes_to_arc_vector(&decoded).unwrap();

    assert_eq!(x_again, x);
    assert_eq!(decoded.routes(), routing().routes());
}

#[test]
fn decoded_routes_visit_each_scheduled_customer_once() {
    let instance = Instance::from_str(FIVE_CUSTOMERS).unwrap();
    let model = SyncModel::build(ProblemType::Ctsp1, &instance);
    let codec = SolutionCodec::new(&model);

    let x = codec.routes_to_arc_vector(&routing()).unwrap();
    let decoded = codec.arc_vector_to_routes(&x).unwrap();

    for (day, route) in decoded.routes().iter().enumerate() {
        let inner = &route[1..route.len() - 1];
        for &customer in inner {
            assert!(instance.demands()[customer][day] > 0);
        }
        let mut sorted = inner.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), inner.len());
    }
}

#[test]
fn arc_count_matches_route_legs() {
    let instance = Instance::from_str(FIVE_CUSTOMERS).unwrap();
    let model = SyncModel::build(ProblemType::Ctsp1, &instance);
    let codec = SolutionCodec::new(&model);

    let x = codec.routes_to_arc_vector(&routing()).unwrap();
    let legs: usize = routing().routes().iter().map(|r| r.len() - 1).sum();
    assert_eq!(x.iter().filter(|&&v| v > 0.5).count(), legs);
}
