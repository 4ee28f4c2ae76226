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

use crate::matrix::Matrix;

const EMPTY: usize = usize::MAX;

/// Dense lookup from an ordered pair of item ids to a linear arc index.
///
/// The map is the bijection between arcs and LP variable positions: arcs
/// are assigned indices in the order they are fed to [`PairMap::assign`],
/// and any pair that was never assigned resolves to `None`.
#[derive(Debug, Clone)]
pub struct PairMap {
    map: Matrix<usize>,
    len: usize,
}

impl PairMap {
    #[inline]
    pub fn new(n_items: usize) -> Self {
        Self {
            map: Matrix::new(n_items, n_items, EMPTY),
            len: 0,
        }
    }

    /// Assign dense indices `0..` to the given pairs, in iteration order.
    pub fn assign<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        self.map.fill(EMPTY);
        self.len = 0;
        for (index, (i, j)) in pairs.into_iter().enumerate() {
            self.map.set(i, j, index);
            self.len = index + 1;
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        match self.map.at(i, j) {
            EMPTY => None,
            index => Some(index),
        }
    }

    /// Number of assigned pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_pairs_resolve_in_order() {
        let mut pm = PairMap::new(4);
        pm.assign([(0, 1), (1, 2), (3, 0)]);
        assert_eq!(pm.get(0, 1), Some(0));
        assert_eq!(pm.get(1, 2), Some(1));
        assert_eq!(pm.get(3, 0), Some(2));
        assert_eq!(pm.len(), 3);
    }

    #[test]
    fn unassigned_pairs_resolve_to_none() {
        let mut pm = PairMap::new(3);
        pm.assign([(0, 1)]);
        assert_eq!(pm.get(1, 0), None);
        assert_eq!(pm.get(2, 2), None);
    }

    #[test]
    fn reassign_clears_previous_mapping() {
        let mut pm = PairMap::new(3);
        pm.assign([(0, 1), (1, 2)]);
        pm.assign([(2, 0)]);
        assert_eq!(pm.get(0, 1), None);
        assert_eq!(pm.get(2, 0), Some(0));
        assert_eq!(pm.len(), 1);
    }
}
