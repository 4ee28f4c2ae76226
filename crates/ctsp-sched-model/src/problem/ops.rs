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

//! Operations, arcs and operation partitions.
//!
//! An operation is the smallest schedulable unit: one vehicle (depot)
//! serving one customer, plus the per-depot departure/return sentinels.

/// A schedulable unit of work.
///
/// `customer` is 0 for departures and `n_customers + 1` for returns;
/// customer visits carry their 1-based customer id. `depot` is 0-based.
/// The resource vector is `(processing_time, duration_bound)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    name: String,
    customer: usize,
    depot: usize,
    resources: [f64; 2],
}

impl Operation {
    #[inline]
    pub fn new(name: String, customer: usize, depot: usize, resources: [f64; 2]) -> Self {
        Self {
            name,
            customer,
            depot,
            resources,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn customer(&self) -> usize {
        self.customer
    }

    #[inline]
    pub fn depot(&self) -> usize {
        self.depot
    }

    #[inline]
    pub fn resources(&self) -> [f64; 2] {
        self.resources
    }

    #[inline]
    pub fn processing_time(&self) -> f64 {
        self.resources[0]
    }

    #[inline]
    pub fn duration_bound(&self) -> f64 {
        self.resources[1]
    }
}

/// A directed arc between two operations, tagged with the subsets its
/// endpoints belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcTriplet {
    pub from: usize,
    pub to: usize,
    pub subset_from: usize,
    pub subset_to: usize,
}

impl ArcTriplet {
    #[inline]
    pub fn new(from: usize, to: usize, subset_from: usize, subset_to: usize) -> Self {
        Self {
            from,
            to,
            subset_from,
            subset_to,
        }
    }
}

/// An arc inside a subset, together with its resource vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetArc {
    pub arc: ArcTriplet,
    pub resources: Vec<f64>,
}

/// A named group of operations and the arcs wired among them.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    name: String,
    resources: Vec<f64>,
    operations: Vec<usize>,
    arcs: Vec<SubsetArc>,
}

impl Subset {
    #[inline]
    pub fn new(name: String, resources: Vec<f64>) -> Self {
        Self {
            name,
            resources,
            operations: Vec::new(),
            arcs: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn resources(&self) -> &[f64] {
        &self.resources
    }

    #[inline]
    pub fn operations(&self) -> &[usize] {
        &self.operations
    }

    #[inline]
    pub fn arcs(&self) -> &[SubsetArc] {
        &self.arcs
    }

    #[inline]
    pub fn push_operation(&mut self, op: usize) {
        self.operations.push(op);
    }

    #[inline]
    pub fn push_arc(&mut self, arc: ArcTriplet, resources: Vec<f64>) {
        self.arcs.push(SubsetArc { arc, resources });
    }

    #[inline]
    pub fn contains(&self, op: usize) -> bool {
        self.operations.contains(&op)
    }
}

/// An ordered collection of subsets covering the operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    name: String,
    subsets: Vec<Subset>,
}

impl Partition {
    #[inline]
    pub fn new(name: String) -> Self {
        Self {
            name,
            subsets: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }

    #[inline]
    pub fn push(&mut self, subset: Subset) {
        self.subsets.push(subset);
    }

    /// Subset index of each operation, or `None` where uncovered.
    pub fn subset_of(&self, n_operations: usize) -> Vec<Option<usize>> {
        let mut map = vec![None; n_operations];
        for (k, subset) in self.subsets.iter().enumerate() {
            for &op in subset.operations() {
                map[op] = Some(k);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_membership_and_arcs() {
        let mut s = Subset::new("Day 1".into(), vec![3.0, 100.0]);
        s.push_operation(0);
        s.push_operation(4);
        s.push_arc(ArcTriplet::new(0, 4, 0, 0), vec![10.0, 10.0]);

        assert!(s.contains(4));
        assert!(!s.contains(2));
        assert_eq!(s.arcs().len(), 1);
        assert_eq!(s.arcs()[0].arc.to, 4);
    }

    #[test]
    fn partition_subset_map_covers_members() {
        let mut p = Partition::new("Routing".into());
        let mut a = Subset::new("a".into(), vec![]);
        a.push_operation(0);
        let mut b = Subset::new("b".into(), vec![]);
        b.push_operation(2);
        p.push(a);
        p.push(b);

        let map = p.subset_of(3);
        assert_eq!(map, vec![Some(0), None, Some(1)]);
    }
}
