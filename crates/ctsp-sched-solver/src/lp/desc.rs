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

//! Backend-independent LP model description.
//!
//! The description carries the full model (bounds, senses, sparse
//! coefficients, labels) and supports the in-place mutations the
//! parametric feasibility check needs between solves. Transposition into
//! the dual is a structural operation here, so the checker can solve the
//! dual while the model is stated as a primal.

use crate::lp::err::SolverError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjSense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSense {
    LessEq,
    GreaterEq,
    Equal,
}

/// One sparse coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coef {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct ModelDescription {
    name: String,
    obj_sense: ObjSense,
    objective: Vec<f64>,
    bounds: Vec<(f64, f64)>,
    col_labels: Vec<String>,
    row_sense: Vec<RowSense>,
    rhs: Vec<f64>,
    row_labels: Vec<String>,
    coefs: Vec<Coef>,
    coef_index: HashMap<(usize, usize), usize>,
}

impl ModelDescription {
    pub fn new(name: impl Into<String>, obj_sense: ObjSense) -> Self {
        Self {
            name: name.into(),
            obj_sense,
            objective: Vec::new(),
            bounds: Vec::new(),
            col_labels: Vec::new(),
            row_sense: Vec::new(),
            rhs: Vec::new(),
            row_labels: Vec::new(),
            coefs: Vec::new(),
            coef_index: HashMap::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn obj_sense(&self) -> ObjSense {
        self.obj_sense
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.objective.len()
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rhs.len()
    }

    #[inline]
    pub fn nz(&self) -> usize {
        self.coefs.len()
    }

    #[inline]
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    #[inline]
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    #[inline]
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    #[inline]
    pub fn row_sense(&self) -> &[RowSense] {
        &self.row_sense
    }

    #[inline]
    pub fn coefs(&self) -> &[Coef] {
        &self.coefs
    }

    #[inline]
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    #[inline]
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn push_col(&mut self, objective: f64, bounds: (f64, f64), label: impl Into<String>) -> usize {
        self.objective.push(objective);
        self.bounds.push(bounds);
        self.col_labels.push(label.into());
        self.objective.len() - 1
    }

    pub fn push_row(&mut self, sense: RowSense, rhs: f64, label: impl Into<String>) -> usize {
        self.row_sense.push(sense);
        self.rhs.push(rhs);
        self.row_labels.push(label.into());
        self.rhs.len() - 1
    }

    /// Set one coefficient, inserting it if absent.
    pub fn set_coef(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.n_rows() && col < self.n_cols());
        match self.coef_index.get(&(row, col)) {
            Some(&i) => self.coefs[i].value = value,
            None => {
                self.coef_index.insert((row, col), self.coefs.len());
                self.coefs.push(Coef { row, col, value });
            }
        }
    }

    #[inline]
    pub fn coef(&self, row: usize, col: usize) -> Option<f64> {
        self.coef_index.get(&(row, col)).map(|&i| self.coefs[i].value)
    }

    #[inline]
    pub fn set_objective(&mut self, col: usize, value: f64) {
        self.objective[col] = value;
    }

    #[inline]
    pub fn set_rhs(&mut self, row: usize, value: f64) {
        self.rhs[row] = value;
    }

    /// Delete the given rows, compacting indices.
    pub fn delete_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let n = self.n_rows();
        let mut keep = vec![true; n];
        for &r in rows {
            keep[r] = false;
        }

        let mut remap = vec![usize::MAX; n];
        let mut next = 0;
        for (r, &k) in keep.iter().enumerate() {
            if k {
                remap[r] = next;
                next += 1;
            }
        }

        let mut r = 0;
        self.rhs.retain(|_| {
            let k = keep[r];
            r += 1;
            k
        });
        let mut r = 0;
        self.row_sense.retain(|_| {
            let k = keep[r];
            r += 1;
            k
        });
        let mut r = 0;
        self.row_labels.retain(|_| {
            let k = keep[r];
            r += 1;
            k
        });

        self.coefs.retain(|c| keep[c.row]);
        for c in &mut self.coefs {
            c.row = remap[c.row];
        }
        self.rebuild_coef_index();
    }

    fn rebuild_coef_index(&mut self) {
        self.coef_index = self
            .coefs
            .iter()
            .enumerate()
            .map(|(i, c)| ((c.row, c.col), i))
            .collect();
    }

    /// Transpose into the dual model.
    ///
    /// Supported shape: every column boxed at `[0, upper]` (dual rows
    /// become equalities with the primal objective as right-hand side);
    /// dual columns take the primal right-hand sides as objective and the
    /// unit box implied by the row sense. The objective sense flips.
    pub fn dual(&self) -> Result<ModelDescription, SolverError> {
        let mut dual = ModelDescription::new(
            format!("{}_dual", self.name),
            match self.obj_sense {
                ObjSense::Minimize => ObjSense::Maximize,
                ObjSense::Maximize => ObjSense::Minimize,
            },
        );

        const BOUND: f64 = 1.0;

        for row in 0..self.n_rows() {
            let bounds = match (self.row_sense[row], self.obj_sense) {
                (RowSense::LessEq, ObjSense::Maximize) | (RowSense::GreaterEq, ObjSense::Minimize) => {
                    (0.0, BOUND)
                }
                (RowSense::LessEq, ObjSense::Minimize) | (RowSense::GreaterEq, ObjSense::Maximize) => {
                    (-BOUND, 0.0)
                }
                (RowSense::Equal, _) => (-BOUND, BOUND),
            };
            dual.push_col(self.rhs[row], bounds, self.row_labels[row].clone());
        }

        for col in 0..self.n_cols() {
            let (lower, _) = self.bounds[col];
            if lower != 0.0 {
                return Err(SolverError::UnsupportedModel(format!(
                    "column {col} is not lower-bounded at zero"
                )));
            }
            dual.push_row(RowSense::Equal, self.objective[col], self.col_labels[col].clone());
        }

        for c in &self.coefs {
            dual.set_coef(c.col, c.row, c.value);
        }

        Ok(dual)
    }
}
