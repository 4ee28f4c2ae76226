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

//! LP solver wrapper.
//!
//! Owns a [`ModelDescription`] and exposes the mutation surface the
//! parametric feasibility check uses between solves. `solve()`
//! materializes the description through `good_lp`; the backend (HiGHS or
//! CBC) is fixed at build time via cargo features, and the code is
//! agnostic to the choice.

use crate::lp::{
    desc::{ModelDescription, ObjSense, RowSense},
    err::SolverError,
};
use good_lp::{default_solver, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use std::{fs::File, io::Write, path::Path};

/// Variable values and objective of a solved LP.
#[derive(Debug, Clone)]
pub struct LpSolution {
    pub objective: f64,
    pub values: Vec<f64>,
}

#[derive(Debug)]
pub struct CheckerSolver {
    desc: ModelDescription,
}

impl CheckerSolver {
    #[inline]
    pub fn new(desc: ModelDescription) -> Self {
        Self { desc }
    }

    #[inline]
    pub fn description(&self) -> &ModelDescription {
        &self.desc
    }

    /// Update objective coefficients, `(column, value)` pairs.
    pub fn set_obj_coefs(&mut self, updates: &[(usize, f64)]) {
        for &(col, value) in updates {
            self.desc.set_objective(col, value);
        }
    }

    /// Update right-hand sides, `(row, value)` pairs.
    pub fn set_rhs(&mut self, updates: &[(usize, f64)]) {
        for &(row, value) in updates {
            self.desc.set_rhs(row, value);
        }
    }

    /// Update constraint coefficients, `(row, column, value)` triples.
    pub fn set_coef_list(&mut self, updates: &[(usize, usize, f64)]) {
        for &(row, col, value) in updates {
            self.desc.set_coef(row, col, value);
        }
    }

    /// Append a constraint row; returns its index.
    pub fn add_row(
        &mut self,
        sense: RowSense,
        rhs: f64,
        coefs: &[(usize, f64)],
        label: impl Into<String>,
    ) -> usize {
        let row = self.desc.push_row(sense, rhs, label);
        for &(col, value) in coefs {
            self.desc.set_coef(row, col, value);
        }
        row
    }

    /// Delete constraint rows.
    pub fn delete_rows(&mut self, rows: &[usize]) {
        self.desc.delete_rows(rows);
    }

    /// Solve the current model.
    pub fn solve(&self) -> Result<LpSolution, SolverError> {
        solve_description(&self.desc)
    }

    /// Write the model in CPLEX-LP text format for inspection.
    pub fn write_model(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut f = File::create(path)?;
        write_lp_format(&self.desc, &mut f)
    }
}

/// Solve a model description with the configured `good_lp` backend.
pub fn solve_description(desc: &ModelDescription) -> Result<LpSolution, SolverError> {
    let mut vars = variables!();
    let mut xs = Vec::with_capacity(desc.n_cols());
    for col in 0..desc.n_cols() {
        let (lower, upper) = desc.bounds()[col];
        xs.push(vars.add(variable().min(lower).max(upper).name(format!("c{col}"))));
    }

    let objective = desc
        .objective()
        .iter()
        .zip(&xs)
        .filter(|(&c, _)| c != 0.0)
        .fold(Expression::from(0.0), |acc, (&c, &x)| acc + c * x);

    let mut problem = match desc.obj_sense() {
        ObjSense::Minimize => vars.minimise(objective).using(default_solver),
        ObjSense::Maximize => vars.maximise(objective).using(default_solver),
    };

    let mut row_terms: Vec<Vec<(usize, f64)>> = vec![Vec::new(); desc.n_rows()];
    for c in desc.coefs() {
        if c.value != 0.0 {
            row_terms[c.row].push((c.col, c.value));
        }
    }
    for row in 0..desc.n_rows() {
        let expr = row_terms[row]
            .iter()
            .fold(Expression::from(0.0), |acc, &(col, v)| acc + v * xs[col]);
        let rhs = desc.rhs()[row];
        match desc.row_sense()[row] {
            RowSense::LessEq => problem.add_constraint(expr.leq(rhs)),
            RowSense::GreaterEq => problem.add_constraint(expr.geq(rhs)),
            RowSense::Equal => problem.add_constraint(expr.eq(rhs)),
        };
    }

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(ResolutionError::Unbounded) => return Err(SolverError::Unbounded),
        Err(e) => return Err(SolverError::Backend(e.to_string())),
    };

    let values: Vec<f64> = xs.iter().map(|&x| solution.value(x)).collect();
    let objective = desc
        .objective()
        .iter()
        .zip(&values)
        .map(|(c, v)| c * v)
        .sum();

    Ok(LpSolution { objective, values })
}

fn write_lp_format<W: Write>(desc: &ModelDescription, w: &mut W) -> std::io::Result<()> {
    writeln!(w, "\\ {}", desc.name())?;
    match desc.obj_sense() {
        ObjSense::Minimize => writeln!(w, "Minimize")?,
        ObjSense::Maximize => writeln!(w, "Maximize")?,
    }

    write!(w, " obj:")?;
    for (col, &c) in desc.objective().iter().enumerate() {
        if c != 0.0 {
            write!(w, " {:+} c{}", c, col)?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Subject To")?;
    let mut row_terms: Vec<Vec<(usize, f64)>> = vec![Vec::new(); desc.n_rows()];
    for c in desc.coefs() {
        if c.value != 0.0 {
            row_terms[c.row].push((c.col, c.value));
        }
    }
    for row in 0..desc.n_rows() {
        write!(w, " {}:", desc.row_labels()[row])?;
        for &(col, v) in &row_terms[row] {
            write!(w, " {:+} c{}", v, col)?;
        }
        let op = match desc.row_sense()[row] {
            RowSense::LessEq => "<=",
            RowSense::GreaterEq => ">=",
            RowSense::Equal => "=",
        };
        writeln!(w, " {} {}", op, desc.rhs()[row])?;
    }

    writeln!(w, "Bounds")?;
    for (col, &(lower, upper)) in desc.bounds().iter().enumerate() {
        writeln!(w, " {} <= c{} <= {}", lower, col, upper)?;
    }
    writeln!(w, "End")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_a_small_minimization() {
        // min x + y  s.t.  x + y >= 2, x - y = 0, x,y in [0, 10].
        let mut desc = ModelDescription::new("small", ObjSense::Minimize);
        desc.push_col(1.0, (0.0, 10.0), "x");
        desc.push_col(1.0, (0.0, 10.0), "y");
        desc.push_row(RowSense::GreaterEq, 2.0, "cover");
        desc.push_row(RowSense::Equal, 0.0, "balance");
        desc.set_coef(0, 0, 1.0);
        desc.set_coef(0, 1, 1.0);
        desc.set_coef(1, 0, 1.0);
        desc.set_coef(1, 1, -1.0);

        let solution = CheckerSolver::new(desc).solve().unwrap();
        assert!((solution.objective - 2.0).abs() < 1e-6);
        assert!((solution.values[0] - 1.0).abs() < 1e-6);
        assert!((solution.values[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn objective_updates_take_effect() {
        let mut desc = ModelDescription::new("obj", ObjSense::Maximize);
        desc.push_col(0.0, (0.0, 5.0), "x");
        let mut solver = CheckerSolver::new(desc);

        let flat = solver.solve().unwrap();
        assert!(flat.objective.abs() < 1e-9);

        solver.set_obj_coefs(&[(0, 2.0)]);
        let raised = solver.solve().unwrap();
        assert!((raised.objective - 10.0).abs() < 1e-6);
    }

    #[test]
    fn added_rows_constrain_the_solution() {
        let mut desc = ModelDescription::new("rows", ObjSense::Maximize);
        desc.push_col(1.0, (0.0, 10.0), "x");
        let mut solver = CheckerSolver::new(desc);

        let free = solver.solve().unwrap();
        assert!((free.objective - 10.0).abs() < 1e-6);

        let row = solver.add_row(RowSense::LessEq, 3.0, &[(0, 1.0)], "cap");
        let capped = solver.solve().unwrap();
        assert!((capped.objective - 3.0).abs() < 1e-6);

        solver.delete_rows(&[row]);
        let free_again = solver.solve().unwrap();
        assert!((free_again.objective - 10.0).abs() < 1e-6);
    }

    #[test]
    fn lp_format_dump_contains_rows_and_bounds() {
        let mut desc = ModelDescription::new("dump", ObjSense::Minimize);
        desc.push_col(1.0, (0.0, 1.0), "x");
        desc.push_row(RowSense::LessEq, 1.0, "r");
        desc.set_coef(0, 0, 1.0);

        let mut buf = Vec::new();
        write_lp_format(&desc, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Minimize"));
        assert!(text.contains("r: +1 c0 <= 1"));
        assert!(text.contains("Bounds"));
    }
}
