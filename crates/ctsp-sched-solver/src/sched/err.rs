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

use crate::lp::err::SolverError;

/// Failures while realizing a schedule.
///
/// The assertion variants mean the LP declared the routing feasible but
/// the reconstructed schedule violates a bound; that is a bug, not an
/// input problem, and is fatal at the boundary.
#[derive(Debug)]
pub enum SchedulingError {
    Solver(SolverError),
    /// `start[cur] < start[prev] + travel_time` beyond tolerance.
    TravelBound {
        depot: usize,
        prev: usize,
        cur: usize,
        gap: f64,
    },
    /// A customer's visit spread exceeds its window width.
    WindowWidth {
        customer: usize,
        spread: f64,
        limit: f64,
    },
}

impl From<SolverError> for SchedulingError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::Solver(e) => write!(f, "{e}"),
            SchedulingError::TravelBound {
                depot,
                prev,
                cur,
                gap,
            } => write!(
                f,
                "schedule of depot {depot} breaks the travel bound between operations {prev} and {cur} by {gap}"
            ),
            SchedulingError::WindowWidth {
                customer,
                spread,
                limit,
            } => write!(
                f,
                "customer {customer} visits spread over {spread}, exceeding the window width {limit}"
            ),
        }
    }
}

impl std::error::Error for SchedulingError {}
