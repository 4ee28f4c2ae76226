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

use num_traits::Zero;

/// Dense row-major matrix over copyable values.
///
/// Backs the distance tables, arc-time tables and pair-index maps of the
/// model layer. Indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    #[inline]
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    #[inline]
    pub fn zeros(rows: usize, cols: usize) -> Self
    where
        T: Zero,
    {
        Self::new(rows, cols, T::zero())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self {
            rows: self.cols,
            cols: self.rows,
            data: self.data.clone(),
        };
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Row slice, useful for iterating a full row without index math.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        debug_assert!(row < self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_every_cell() {
        let m = Matrix::new(2, 3, 7i64);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m.at(i, j), 7);
            }
        }
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut m = Matrix::zeros(3, 3);
        m.set(1, 2, 42.0);
        assert_eq!(m.at(1, 2), 42.0);
        assert_eq!(m.at(2, 1), 0.0);
    }

    #[test]
    fn transpose_swaps_axes() {
        let mut m = Matrix::zeros(2, 3);
        m.set(0, 1, 1.0);
        m.set(1, 2, 2.0);
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.at(1, 0), 1.0);
        assert_eq!(t.at(2, 1), 2.0);
    }

    #[test]
    fn row_slice_matches_cells() {
        let mut m = Matrix::zeros(2, 2);
        m.set(1, 0, 3.0);
        m.set(1, 1, 4.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }
}
