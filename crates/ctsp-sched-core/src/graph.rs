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

use fixedbitset::FixedBitSet;

/// One suspended branch of the iterative depth-first search: the vertex to
/// expand, the path that led to it (exclusive) and the vertices already on
/// that path.
#[derive(Debug, Clone)]
struct Frame {
    vertex: usize,
    path: Vec<usize>,
    visited: FixedBitSet,
}

/// Directed graph specialized for enumerating all simple paths between two
/// vertices.
///
/// Arcs can be cleared and re-added between searches without reallocating;
/// the search itself is iterative with an explicit frame stack preallocated
/// to `n·(n−1)` entries, so deep graphs cannot overflow the call stack.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    n_vertices: usize,
    successors: Vec<Vec<usize>>,
    present: Vec<FixedBitSet>,
    stack: Vec<Frame>,
}

impl SearchGraph {
    pub fn new(n_vertices: usize) -> Self {
        Self {
            n_vertices,
            successors: vec![Vec::new(); n_vertices],
            present: vec![FixedBitSet::with_capacity(n_vertices); n_vertices],
            stack: Vec::with_capacity(n_vertices.saturating_mul(n_vertices.saturating_sub(1))),
        }
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    /// Add the arc `(i, j)`; adding an existing arc has no effect.
    pub fn add_arc(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.n_vertices && j < self.n_vertices);
        if self.present[i].contains(j) {
            return;
        }
        self.present[i].insert(j);
        self.successors[i].push(j);
    }

    #[inline]
    pub fn has_arc(&self, i: usize, j: usize) -> bool {
        self.present[i].contains(j)
    }

    /// Remove all arcs, keeping the allocated adjacency storage.
    pub fn clear(&mut self) {
        for succ in &mut self.successors {
            succ.clear();
        }
        for mask in &mut self.present {
            mask.clear();
        }
    }

    /// Enumerate every simple path from `source` to `target`.
    ///
    /// Each path is a vertex sequence including both endpoints. The visit
    /// order is deterministic given the arc insertion order.
    pub fn simple_paths(&mut self, source: usize, target: usize, paths: &mut Vec<Vec<usize>>) {
        paths.clear();
        self.stack.clear();

        let mut visited = FixedBitSet::with_capacity(self.n_vertices);
        visited.insert(source);
        self.stack.push(Frame {
            vertex: source,
            path: Vec::new(),
            visited,
        });

        while let Some(frame) = self.stack.pop() {
            let mut path = frame.path;
            path.push(frame.vertex);

            if frame.vertex == target {
                paths.push(path);
                continue;
            }

            for &next in &self.successors[frame.vertex] {
                if frame.visited.contains(next) {
                    continue;
                }
                let mut visited = frame.visited.clone();
                visited.insert(next);
                self.stack.push(Frame {
                    vertex: next,
                    path: path.clone(),
                    visited,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut paths: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        paths.sort();
        paths
    }

    #[test]
    fn diamond_yields_both_paths() {
        let mut g = SearchGraph::new(4);
        g.add_arc(0, 1);
        g.add_arc(1, 3);
        g.add_arc(0, 2);
        g.add_arc(2, 3);

        let mut paths = Vec::new();
        g.simple_paths(0, 3, &mut paths);
        assert_eq!(sorted(paths), vec![vec![0, 1, 3], vec![0, 2, 3]]);
    }

    #[test]
    fn cycles_are_not_revisited() {
        let mut g = SearchGraph::new(3);
        g.add_arc(0, 1);
        g.add_arc(1, 0);
        g.add_arc(1, 2);

        let mut paths = Vec::new();
        g.simple_paths(0, 2, &mut paths);
        assert_eq!(paths, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn unreachable_target_yields_no_paths() {
        let mut g = SearchGraph::new(3);
        g.add_arc(0, 1);

        let mut paths = Vec::new();
        g.simple_paths(0, 2, &mut paths);
        assert!(paths.is_empty());
    }

    #[test]
    fn duplicate_arcs_are_ignored() {
        let mut g = SearchGraph::new(2);
        g.add_arc(0, 1);
        g.add_arc(0, 1);

        let mut paths = Vec::new();
        g.simple_paths(0, 1, &mut paths);
        assert_eq!(paths, vec![vec![0, 1]]);
    }

    #[test]
    fn clear_resets_arcs() {
        let mut g = SearchGraph::new(2);
        g.add_arc(0, 1);
        g.clear();
        assert!(!g.has_arc(0, 1));

        let mut paths = Vec::new();
        g.simple_paths(0, 1, &mut paths);
        assert!(paths.is_empty());
    }
}
