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

//! Schedule document written for feasible routings.

use serde::Serialize;
use std::io::Write;

/// One scheduled stop: 1-based customer id (1 is the depot boundary) and
/// its `[arrival, service_start]` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub customer: usize,
    pub arrival_starting: [f64; 2],
}

/// The ordered stops of one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSchedule {
    pub route: usize,
    pub tasks: Vec<Task>,
}

/// The complete schedule emitted for a feasible routing.
///
/// `time_windows[0]` is the depot window `[0, max_distance]`; entry `c`
/// is the realized service window of customer `c`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleDocument {
    pub instance_name: String,
    pub schedule: Vec<RouteSchedule>,
    pub time_windows: Vec<[f64; 2]>,
}

impl ScheduleDocument {
    pub fn write_json<W: Write>(&self, w: &mut W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(w, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_matches_the_documented_object() {
        let doc = ScheduleDocument {
            instance_name: "tiny".into(),
            schedule: vec![RouteSchedule {
                route: 1,
                tasks: vec![
                    Task {
                        customer: 1,
                        arrival_starting: [0.0, 0.0],
                    },
                    Task {
                        customer: 2,
                        arrival_starting: [10.0, 10.0],
                    },
                ],
            }],
            time_windows: vec![[0.0, 100.0], [0.0, 100.0]],
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["instance_name"], "tiny");
        assert_eq!(value["schedule"][0]["route"], 1);
        assert_eq!(value["schedule"][0]["tasks"][1]["customer"], 2);
        assert_eq!(
            value["schedule"][0]["tasks"][1]["arrival_starting"][0],
            10.0
        );
        assert_eq!(value["time_windows"][1][1], 100.0);
    }
}
