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

pub mod err;
pub mod tsplib;

use crate::instance::{err::InstanceError, tsplib::TsplibReader};
use ctsp_sched_core::prelude::Matrix;
use std::{io::Read, path::Path};

/// Value of `max_distance` that disables the route-duration bound.
pub const MAX_DISTANCE_NOT_SET: f64 = 999_999_999.0;

/// A CTSP instance: customers visited over several days by independent
/// vehicles sharing one depot configuration.
///
/// Location 0 is the depot; customers occupy locations `1..=n_customers`.
/// `demands[l][d] > 0` means location `l` must be visited on day `d`.
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    type_tag: String,
    optima: (f64, f64),
    n_customers: usize,
    n_days: usize,
    distances: Matrix<f64>,
    demands: Vec<Vec<i32>>,
    max_distance: f64,
    time_window_widths: Vec<f64>,
    triangle_inequality: bool,
    symmetric: bool,
}

impl Instance {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        Self::from_tsplib(TsplibReader::new().from_path(path)?)
    }

    pub fn from_reader<R: Read>(r: R) -> Result<Self, InstanceError> {
        Self::from_tsplib(TsplibReader::new().from_reader(r)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self, InstanceError> {
        Self::from_tsplib(TsplibReader::new().from_str(contents)?)
    }

    fn from_tsplib(data: tsplib::TsplibData) -> Result<Self, InstanceError> {
        if data.dimension() == 0 {
            return Err(InstanceError::DimensionUndefined);
        }

        let n_customers = data.dimension() - 1;
        let n_days = data
            .num_days()
            .ok_or(InstanceError::MissingExtension("NUM_DAYS"))?;
        let max_distance = data
            .max_distance()
            .ok_or(InstanceError::MissingExtension("DISTANCE"))?;
        let width = data
            .maximum_allowable_differential()
            .ok_or(InstanceError::MissingExtension("MAXIMUM_ALLOWABLE_DIFFERENTIAL"))?;

        let distances = data.distance_matrix();

        let mut demands: Vec<Vec<i32>> = data.demands().to_vec();
        for row in &mut demands {
            row.resize(n_days, 0);
        }

        let symmetric = check_symmetry(&distances);
        if !symmetric {
            tracing::warn!("distances are not symmetric");
        }

        let triangle_inequality = check_triangle_inequality(&distances);
        if !triangle_inequality {
            tracing::warn!("triangle inequality violated");
        }

        Ok(Self {
            name: data.name().to_string(),
            type_tag: data.type_tag().to_string(),
            optima: data.optima(),
            n_customers,
            n_days,
            distances,
            demands,
            max_distance,
            time_window_widths: vec![width; n_customers],
            triangle_inequality,
            symmetric,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Known optima: (no waiting allowed, waiting allowed).
    #[inline]
    pub fn optima(&self) -> (f64, f64) {
        self.optima
    }

    #[inline]
    pub fn n_customers(&self) -> usize {
        self.n_customers
    }

    #[inline]
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    #[inline]
    pub fn distances(&self) -> &Matrix<f64> {
        &self.distances
    }

    #[inline]
    pub fn demands(&self) -> &[Vec<i32>] {
        &self.demands
    }

    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Per-customer time-window widths `T[i]`, indexed by customer − 1.
    #[inline]
    pub fn time_window_widths(&self) -> &[f64] {
        &self.time_window_widths
    }

    #[inline]
    pub fn triangle_inequality(&self) -> bool {
        self.triangle_inequality
    }

    #[inline]
    pub fn symmetric(&self) -> bool {
        self.symmetric
    }

    /// Drop the route-duration bound.
    pub fn disable_max_distance(&mut self) {
        self.max_distance = MAX_DISTANCE_NOT_SET;
    }

    /// Number of customer-visit operations the model will contain.
    pub fn n_customer_operations(&self) -> usize {
        self.demands
            .iter()
            .map(|row| row.iter().filter(|&&d| d > 0).count())
            .sum()
    }
}

fn check_symmetry(distances: &Matrix<f64>) -> bool {
    let n = distances.rows();
    for i in 0..n {
        for j in i + 1..n {
            if (distances.at(i, j) - distances.at(j, i)).abs() > 1e-9 {
                return false;
            }
        }
    }
    true
}

fn check_triangle_inequality(distances: &Matrix<f64>) -> bool {
    let n = distances.rows();
    for i in 0..n {
        for j in 0..n {
            if j == i {
                continue;
            }
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                if distances.at(i, j) > distances.at(i, k) + distances.at(k, j) + 1e-9 {
                    return false;
                }
            }
        }
    }
    true
}
