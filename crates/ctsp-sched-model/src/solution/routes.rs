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

use crate::solution::err::SolutionError;
use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

/// A candidate routing: one customer sequence per depot.
///
/// Stored 0-based: 0 is the depot, customers keep their 1-based customer
/// id. Solution files are 1-based; the reader converts on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    instance_name: String,
    routes: Vec<Vec<usize>>,
}

impl Routing {
    #[inline]
    pub fn new(instance_name: String, routes: Vec<Vec<usize>>) -> Self {
        Self {
            instance_name,
            routes,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SolutionError> {
        Self::from_contents(&fs::read_to_string(path)?)
    }

    pub fn from_reader<R: Read>(mut r: R) -> Result<Self, SolutionError> {
        let mut contents = String::new();
        r.read_to_string(&mut contents)?;
        Self::from_contents(&contents)
    }

    pub fn from_contents(contents: &str) -> Result<Self, SolutionError> {
        let mut tokens = contents.split_whitespace();

        let instance_name = tokens.next().ok_or(SolutionError::Empty)?.to_string();

        let n_routes: usize = tokens
            .next()
            .ok_or(SolutionError::UnexpectedEof)?
            .parse()?;

        let mut routes = Vec::with_capacity(n_routes);
        for _ in 0..n_routes {
            let len: usize = tokens
                .next()
                .ok_or(SolutionError::UnexpectedEof)?
                .parse()?;
            let mut route = Vec::with_capacity(len);
            for _ in 0..len {
                let id: usize = tokens
                    .next()
                    .ok_or(SolutionError::UnexpectedEof)?
                    .parse()?;
                if id == 0 {
                    return Err(SolutionError::ZeroId);
                }
                route.push(id - 1);
            }
            routes.push(route);
        }

        Ok(Self {
            instance_name,
            routes,
        })
    }

    /// Write in the solution-file format, re-inserting the depot at both
    /// ends of any route that lacks it.
    pub fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "{:<15}", self.instance_name)?;
        writeln!(w)?;
        writeln!(w, " {:>4}", self.routes.len())?;
        writeln!(w)?;

        for route in &self.routes {
            writeln!(w, " {:>4}", route.len())?;
            writeln!(w)?;

            if !route.is_empty() {
                let depot_present = route[0] == 0;
                if !depot_present {
                    write!(w, " {:>4} ", 1)?;
                }
                for &id in route {
                    write!(w, "{:>4} ", id + 1)?;
                }
                if !depot_present {
                    write!(w, " {:>4} ", 1)?;
                }
            }
            writeln!(w)?;
            writeln!(w)?;
        }

        writeln!(w)
    }

    #[inline]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    #[inline]
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Consecutive location pairs of one route.
    pub fn arcs(&self, depot: usize) -> Vec<(usize, usize)> {
        let route = &self.routes[depot];
        route.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTION: &str = "\
tiny3

    2

    4
  1 2 3 1

    3
  1 3 1

";

    #[test]
    fn reads_routes_zero_based() {
        let sol = Routing::from_contents(SOLUTION).unwrap();
        assert_eq!(sol.instance_name(), "tiny3");
        assert_eq!(sol.routes().len(), 2);
        assert_eq!(sol.routes()[0], vec![0, 1, 2, 0]);
        assert_eq!(sol.routes()[1], vec![0, 2, 0]);
    }

    #[test]
    fn arcs_walk_consecutive_pairs() {
        let sol = Routing::from_contents(SOLUTION).unwrap();
        assert_eq!(sol.arcs(1), vec![(0, 2), (2, 0)]);
    }

    #[test]
    fn write_read_round_trip() {
        let sol = Routing::from_contents(SOLUTION).unwrap();
        let mut buf = Vec::new();
        sol.write(&mut buf).unwrap();
        let again = Routing::from_contents(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(again, sol);
    }

    #[test]
    fn writer_inserts_missing_depot() {
        let sol = Routing::new("x".into(), vec![vec![1, 2]]);
        let mut buf = Vec::new();
        sol.write(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        // The depot id 1 brackets the customer ids 2 and 3.
        let ids: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(&ids[ids.len() - 4..], &["1", "2", "3", "1"]);
    }

    #[test]
    fn zero_id_is_rejected() {
        let err = Routing::from_contents("x 1 2 0 1").unwrap_err();
        assert!(matches!(err, SolutionError::ZeroId));
    }

    #[test]
    fn empty_file_is_rejected() {
        let err = Routing::from_contents("   ").unwrap_err();
        assert!(matches!(err, SolutionError::Empty));
    }
}
